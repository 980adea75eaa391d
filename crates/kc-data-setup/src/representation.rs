//! Admin API representations sent by the setup steps.

use std::collections::HashMap;

use kc_email_domain_mapper::MapperConfig;
use serde::{Deserialize, Serialize};

/// Realm representation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RealmRepresentation {
    /// Realm ID.
    pub id: String,
    /// Realm name.
    pub realm: String,
    /// Display name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    /// Whether the realm is enabled.
    pub enabled: bool,
    /// Whether users may log in with their email address.
    pub login_with_email_allowed: bool,
    /// Clients created together with the realm.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub clients: Vec<ClientRepresentation>,
}

/// Client representation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientRepresentation {
    /// Internal client ID.
    pub id: String,
    /// Client ID used in protocol requests.
    pub client_id: String,
    /// Display name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Protocol (openid-connect or saml).
    pub protocol: String,
    /// Whether the client is enabled.
    pub enabled: bool,
    /// Whether the client is public.
    pub public_client: bool,
    /// Whether the resource owner password grant is allowed.
    pub direct_access_grants_enabled: bool,
}

/// Protocol mapper representation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProtocolMapperRepresentation {
    /// Mapper name.
    pub name: String,
    /// Protocol (openid-connect or saml).
    pub protocol: String,
    /// Mapper type ID.
    pub protocol_mapper: String,
    /// Mapper configuration.
    #[serde(default)]
    pub config: HashMap<String, String>,
}

impl From<&MapperConfig> for ProtocolMapperRepresentation {
    fn from(config: &MapperConfig) -> Self {
        Self {
            name: config.name.clone(),
            protocol: config.protocol.as_str().to_string(),
            protocol_mapper: config.mapper_type.clone(),
            config: config.config.clone(),
        }
    }
}

/// User representation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRepresentation {
    /// Username.
    pub username: String,
    /// First name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    /// Last name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    /// Email address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Whether the user is enabled.
    pub enabled: bool,
    /// Initial credentials.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub credentials: Vec<CredentialRepresentation>,
}

/// Credential representation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialRepresentation {
    /// Credential type.
    #[serde(rename = "type")]
    pub credential_type: String,
    /// Credential value.
    pub value: String,
    /// Whether the user must change the credential on first login.
    pub temporary: bool,
}

impl CredentialRepresentation {
    /// Creates a password credential.
    #[must_use]
    pub fn password(value: impl Into<String>, temporary: bool) -> Self {
        Self {
            credential_type: "password".to_string(),
            value: value.into(),
            temporary,
        }
    }
}
