//! Realm setup.

use kc_email_domain_mapper::Protocol;

use super::{CLIENT_OIDC, REALM};
use crate::client::AdminClient;
use crate::error::SetupResult;
use crate::representation::{ClientRepresentation, RealmRepresentation};

/// Builds the example realm with its public OIDC client.
///
/// The client's internal ID equals its client ID so later steps can address
/// it without a lookup.
#[must_use]
pub fn example_realm() -> RealmRepresentation {
    let client = ClientRepresentation {
        id: CLIENT_OIDC.to_string(),
        client_id: CLIENT_OIDC.to_string(),
        name: Some(CLIENT_OIDC.to_string()),
        protocol: Protocol::OpenidConnect.as_str().to_string(),
        enabled: true,
        public_client: true,
        direct_access_grants_enabled: true,
    };

    RealmRepresentation {
        id: REALM.to_string(),
        realm: REALM.to_string(),
        display_name: Some(REALM.to_string()),
        enabled: true,
        login_with_email_allowed: true,
        clients: vec![client],
    }
}

/// Creates the example realm.
pub async fn setup_realm(client: &AdminClient) -> SetupResult<()> {
    client.create("", &example_realm(), "realm", REALM).await?;
    tracing::info!(realm = REALM, "realm created");
    Ok(())
}
