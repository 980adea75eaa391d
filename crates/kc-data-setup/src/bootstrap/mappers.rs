//! Protocol mapper setup for the example clients.

use kc_email_domain_mapper::config::{CLAIM_NAME, INCLUDE_IN_ACCESS_TOKEN};
use kc_email_domain_mapper::{
    MapperConfig, OidcCustomEmailDomainMapper, Protocol, SamlCustomEmailDomainMapper,
};

use super::{CLIENT_OIDC, CLIENT_SAML, REALM};
use crate::client::AdminClient;
use crate::error::SetupResult;
use crate::representation::ProtocolMapperRepresentation;

/// Mapper type of the built-in group membership mapper.
pub const GROUP_MEMBERSHIP_MAPPER: &str = "oidc-group-membership-mapper";

const GROUP_MAPPER_NAME: &str = "Group mapper";
const CUSTOM_MAPPER_NAME: &str = "Custom Email Domain Mapper";

fn group_mapper(protocol: Protocol) -> MapperConfig {
    MapperConfig::new(GROUP_MAPPER_NAME, GROUP_MEMBERSHIP_MAPPER)
        .with_protocol(protocol)
        .with_config("full.path", "true")
        .with_config(CLAIM_NAME, "groups")
}

/// Mapper instances registered on the OIDC client.
#[must_use]
pub fn oidc_mappers() -> Vec<MapperConfig> {
    vec![
        group_mapper(Protocol::OpenidConnect).with_config(INCLUDE_IN_ACCESS_TOKEN, "true"),
        MapperConfig::new(CUSTOM_MAPPER_NAME, OidcCustomEmailDomainMapper::PROVIDER_ID)
            .with_config(INCLUDE_IN_ACCESS_TOKEN, "true")
            .with_config(CLAIM_NAME, "email"),
    ]
}

/// Mapper instances registered on the SAML client.
///
/// The custom mapper carries no config; the server applies the property
/// defaults.
#[must_use]
pub fn saml_mappers() -> Vec<MapperConfig> {
    vec![
        group_mapper(Protocol::Saml),
        MapperConfig::new(CUSTOM_MAPPER_NAME, SamlCustomEmailDomainMapper::PROVIDER_ID)
            .with_protocol(Protocol::Saml),
    ]
}

/// Registers the mappers on the OIDC client.
pub async fn setup_oidc_mappers(client: &AdminClient) -> SetupResult<()> {
    register(client, CLIENT_OIDC, &oidc_mappers()).await
}

/// Registers the mappers on the SAML client.
pub async fn setup_saml_mappers(client: &AdminClient) -> SetupResult<()> {
    register(client, CLIENT_SAML, &saml_mappers()).await
}

async fn register(
    client: &AdminClient,
    client_id: &str,
    mappers: &[MapperConfig],
) -> SetupResult<()> {
    let path = format!("/{REALM}/clients/{client_id}/protocol-mappers/models");
    for mapper in mappers {
        let body = ProtocolMapperRepresentation::from(mapper);
        client.create(&path, &body, "protocol mapper", &mapper.name).await?;
        tracing::info!(
            client = client_id,
            mapper = %mapper.name,
            mapper_type = %mapper.mapper_type,
            "protocol mapper registered"
        );
    }
    Ok(())
}
