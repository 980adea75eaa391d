//! Setup steps.
//!
//! Each step issues admin API calls against the fixed example realm. Steps
//! are not idempotent: re-running one against an existing realm fails with
//! [`crate::SetupError::AlreadyExists`].

pub mod mappers;
pub mod realm;
pub mod users;

pub use mappers::{setup_oidc_mappers, setup_saml_mappers};
pub use realm::setup_realm;
pub use users::setup_users;

use crate::cli::Command;
use crate::client::AdminClient;
use crate::error::SetupResult;
use crate::output::{info, success};

/// Realm provisioned by the setup.
pub const REALM: &str = "example-realm";

/// OIDC client created together with the realm.
pub const CLIENT_OIDC: &str = "example-realm-client-oidc";

/// SAML client the SAML mappers are attached to.
pub const CLIENT_SAML: &str = "example-realm-client-saml";

/// Runs a setup step. [`Command::All`] runs realm, mappers and users in
/// that order and stops at the first failure.
pub async fn run(client: &AdminClient, command: Command) -> SetupResult<()> {
    match command {
        Command::All => {
            run_realm(client).await?;
            run_oidc_mappers(client).await?;
            run_users(client).await
        }
        Command::Realm => run_realm(client).await,
        Command::Mappers => run_oidc_mappers(client).await,
        Command::Users => run_users(client).await,
        Command::SamlMappers => {
            setup_saml_mappers(client).await?;
            success(&format!("Registered protocol mappers on client '{CLIENT_SAML}'"));
            Ok(())
        }
    }
}

async fn run_realm(client: &AdminClient) -> SetupResult<()> {
    setup_realm(client).await?;
    success(&format!("Created realm '{REALM}' with client '{CLIENT_OIDC}'"));
    Ok(())
}

async fn run_oidc_mappers(client: &AdminClient) -> SetupResult<()> {
    setup_oidc_mappers(client).await?;
    success(&format!("Registered protocol mappers on client '{CLIENT_OIDC}'"));
    Ok(())
}

async fn run_users(client: &AdminClient) -> SetupResult<()> {
    let ids = setup_users(client).await?;
    for (user, id) in users::USERS.iter().zip(&ids) {
        info(&format!("{} -> {id}", user.username));
    }
    success(&format!("Created {} users", ids.len()));
    Ok(())
}
