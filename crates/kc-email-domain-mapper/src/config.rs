//! Mapper instance configuration and configuration-property metadata.
//!
//! A [`MapperConfig`] is what an administrator stores for one mapper instance
//! on a client: the mapper type, the protocol and a free-form key/value map.
//! A [`ConfigProperty`] describes one entry of that map for the host's
//! configuration dialog.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Config key holding the destination claim name of OIDC mappers.
pub const CLAIM_NAME: &str = "claim.name";

/// Config key switching a mapper on for ID tokens.
pub const INCLUDE_IN_ID_TOKEN: &str = "id.token.claim";

/// Config key switching a mapper on for access tokens.
pub const INCLUDE_IN_ACCESS_TOKEN: &str = "access.token.claim";

/// Config key switching a mapper on for userinfo responses.
pub const INCLUDE_IN_USERINFO: &str = "userinfo.token.claim";

/// Login protocol a mapper instance belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Protocol {
    /// `OpenID` Connect.
    #[default]
    OpenidConnect,
    /// SAML 2.0.
    Saml,
}

impl Protocol {
    /// Returns the protocol name used by the admin API.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::OpenidConnect => "openid-connect",
            Self::Saml => "saml",
        }
    }
}

impl std::fmt::Display for Protocol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Configuration for a protocol mapper instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapperConfig {
    /// Unique identifier for this mapper instance.
    pub id: Uuid,

    /// Mapper name (user-defined).
    pub name: String,

    /// Protocol mapper type ID (e.g., `"oidc-custom-email-domain-mapper"`).
    pub mapper_type: String,

    /// Protocol of the client the mapper is attached to.
    #[serde(default)]
    pub protocol: Protocol,

    /// Configuration key-value pairs.
    #[serde(default)]
    pub config: HashMap<String, String>,
}

impl MapperConfig {
    /// Creates a new OIDC mapper configuration.
    #[must_use]
    pub fn new(name: impl Into<String>, mapper_type: impl Into<String>) -> Self {
        Self {
            id: Uuid::now_v7(),
            name: name.into(),
            mapper_type: mapper_type.into(),
            protocol: Protocol::OpenidConnect,
            config: HashMap::new(),
        }
    }

    /// Sets the protocol.
    #[must_use]
    pub const fn with_protocol(mut self, protocol: Protocol) -> Self {
        self.protocol = protocol;
        self
    }

    /// Sets a configuration value.
    #[must_use]
    pub fn with_config(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.insert(key.into(), value.into());
        self
    }

    /// Gets a configuration value.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.config.get(key).map(String::as_str)
    }

    /// Gets a configuration value, treating an empty string as unset.
    #[must_use]
    pub fn get_non_empty(&self, key: &str) -> Option<&str> {
        self.get(key).filter(|v| !v.is_empty())
    }

    /// Gets a configuration value as a boolean.
    #[must_use]
    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.config.get(key).and_then(|v| v.parse().ok())
    }

    /// Checks if the mapper should be included in access tokens.
    #[must_use]
    pub fn include_in_access_token(&self) -> bool {
        self.get_bool(INCLUDE_IN_ACCESS_TOKEN).unwrap_or(true)
    }

    /// Checks if the mapper should be included in ID tokens.
    #[must_use]
    pub fn include_in_id_token(&self) -> bool {
        self.get_bool(INCLUDE_IN_ID_TOKEN).unwrap_or(true)
    }

    /// Checks if the mapper should be included in userinfo responses.
    #[must_use]
    pub fn include_in_userinfo(&self) -> bool {
        self.get_bool(INCLUDE_IN_USERINFO).unwrap_or(true)
    }

    /// Gets the claim name to use in tokens.
    #[must_use]
    pub fn claim_name(&self) -> Option<&str> {
        self.get_non_empty(CLAIM_NAME)
    }
}

/// Configuration property definition for mapper UIs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigProperty {
    /// Property name (config key).
    pub name: String,

    /// Display label.
    pub label: String,

    /// Help text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub help_text: Option<String>,

    /// Property type.
    pub property_type: ConfigPropertyType,

    /// Default value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,

    /// Options for list types.
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub options: Vec<String>,
}

/// Configuration property type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConfigPropertyType {
    /// Text input.
    String,
    /// Boolean checkbox.
    Boolean,
    /// Select dropdown.
    List,
}

impl ConfigProperty {
    fn with_type(
        name: impl Into<String>,
        label: impl Into<String>,
        property_type: ConfigPropertyType,
    ) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            help_text: None,
            property_type,
            default_value: None,
            options: vec![],
        }
    }

    /// Creates a new string property.
    #[must_use]
    pub fn string(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self::with_type(name, label, ConfigPropertyType::String)
    }

    /// Creates a new boolean property, defaulting to `false`.
    #[must_use]
    pub fn boolean(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self::with_type(name, label, ConfigPropertyType::Boolean).with_default("false")
    }

    /// Creates a new list (select) property.
    #[must_use]
    pub fn list<I, S>(name: impl Into<String>, label: impl Into<String>, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut property = Self::with_type(name, label, ConfigPropertyType::List);
        property.options = options.into_iter().map(Into::into).collect();
        property
    }

    /// Sets the help text.
    #[must_use]
    pub fn with_help(mut self, help_text: impl Into<String>) -> Self {
        self.help_text = Some(help_text.into());
        self
    }

    /// Sets the default value.
    #[must_use]
    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        self.default_value = Some(default.into());
        self
    }
}
