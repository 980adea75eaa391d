//! Mapper traits and capabilities.
//!
//! A mapper describes itself through [`ProtocolMapper`] and produces values
//! through one of the protocol-specific traits:
//! - [`ClaimMapper`] - sets a claim on an OIDC token or userinfo response
//! - [`AttributeStatementMapper`] - adds attributes to a SAML attribute statement
//!
//! Which token kinds a mapper runs for is an explicit [`Capability`] set the
//! mapper hands to [`crate::registry::MapperRegistry`] on registration.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::config::{ConfigProperty, MapperConfig, Protocol};
use crate::error::MapperResult;
use crate::identity::UserIdentity;
use crate::saml::AttributeStatement;

/// Claims of a token or userinfo response, keyed by claim name.
pub type Claims = HashMap<String, serde_json::Value>;

/// A token or assertion kind a mapper can be registered for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    /// OIDC access token.
    AccessToken,
    /// OIDC ID token.
    IdToken,
    /// OIDC userinfo response.
    UserInfo,
    /// SAML attribute statement.
    AttributeStatement,
}

/// The OIDC token kinds a [`ClaimMapper`] writes into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Access token.
    AccessToken,
    /// ID token.
    IdToken,
    /// `UserInfo` response.
    UserInfo,
}

impl TokenKind {
    /// Returns the capability a mapper needs to run for this token kind.
    #[must_use]
    pub const fn capability(self) -> Capability {
        match self {
            Self::AccessToken => Capability::AccessToken,
            Self::IdToken => Capability::IdToken,
            Self::UserInfo => Capability::UserInfo,
        }
    }

    /// Checks the mapper instance's include switch for this token kind.
    #[must_use]
    pub fn is_included(self, config: &MapperConfig) -> bool {
        match self {
            Self::AccessToken => config.include_in_access_token(),
            Self::IdToken => config.include_in_id_token(),
            Self::UserInfo => config.include_in_userinfo(),
        }
    }
}

/// Core trait for protocol mappers.
///
/// Each mapper type has a unique ID, display information and a fixed list of
/// configuration properties.
pub trait ProtocolMapper: Send + Sync {
    /// Returns the unique identifier for this mapper type.
    ///
    /// Mapper instances reference it as their `mapper_type`.
    fn id(&self) -> &'static str;

    /// Returns the protocol this mapper type belongs to.
    fn protocol(&self) -> Protocol;

    /// Returns the display name shown in admin UIs.
    fn display_name(&self) -> &'static str;

    /// Returns the category used for grouping in admin UIs.
    fn category(&self) -> &'static str;

    /// Returns the help text shown in admin UIs.
    fn help_text(&self) -> &'static str;

    /// Returns the configuration properties for this mapper.
    fn config_properties(&self) -> &[ConfigProperty];

    /// Returns the priority for this mapper. Lower values execute first.
    fn priority(&self) -> i32 {
        0
    }
}

/// Trait for mappers that set a claim on OIDC tokens.
pub trait ClaimMapper: ProtocolMapper {
    /// Returns the token kinds this mapper runs for.
    ///
    /// The registry runs the mapper for exactly these kinds.
    fn capabilities(&self) -> &[Capability];

    /// Sets this mapper's claim.
    ///
    /// # Errors
    ///
    /// Returns an error if the claim value cannot be computed.
    fn set_claim(
        &self,
        claims: &mut Claims,
        config: &MapperConfig,
        identity: &UserIdentity,
    ) -> MapperResult<()>;

    /// Sets the claim if this mapper runs for `kind` and the instance's
    /// include switch for `kind` is on.
    ///
    /// # Errors
    ///
    /// Returns an error if the claim value cannot be computed.
    fn transform(
        &self,
        kind: TokenKind,
        claims: &mut Claims,
        config: &MapperConfig,
        identity: &UserIdentity,
    ) -> MapperResult<()> {
        if self.capabilities().contains(&kind.capability()) && kind.is_included(config) {
            self.set_claim(claims, config, identity)?;
        }
        Ok(())
    }
}

/// Trait for mappers that add attributes to SAML attribute statements.
pub trait AttributeStatementMapper: ProtocolMapper {
    /// Adds this mapper's attributes to the statement.
    ///
    /// # Errors
    ///
    /// Returns an error if the attribute value cannot be computed.
    fn transform_attribute_statement(
        &self,
        statement: &mut AttributeStatement,
        config: &MapperConfig,
        identity: &UserIdentity,
    ) -> MapperResult<()>;
}

/// Splits a claim name into its path segments.
///
/// Dots separate nesting levels; `\.` is a literal dot.
#[must_use]
pub fn split_claim_path(path: &str) -> Vec<String> {
    let mut segments = Vec::new();
    let mut current = String::new();
    let mut chars = path.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\\' if chars.peek() == Some(&'.') => {
                current.push('.');
                chars.next();
            }
            '.' => segments.push(std::mem::take(&mut current)),
            _ => current.push(c),
        }
    }
    segments.push(current);
    segments
}

/// Sets a claim value, supporting nested paths (e.g., `"address.country"`).
///
/// Intermediate objects are created as needed. A non-object value in the
/// way is left untouched and the claim is dropped.
pub fn set_claim_nested(claims: &mut Claims, path: &str, value: serde_json::Value) {
    let segments = split_claim_path(path);
    let Some((first, rest)) = segments.split_first() else {
        return;
    };

    if rest.is_empty() {
        claims.insert(first.clone(), value);
        return;
    }

    let entry = claims
        .entry(first.clone())
        .or_insert_with(|| serde_json::Value::Object(serde_json::Map::new()));
    if let serde_json::Value::Object(obj) = entry {
        set_in_object(obj, rest, value);
    } else {
        tracing::warn!(claim = path, "claim path blocked by a non-object value");
    }
}

fn set_in_object(
    obj: &mut serde_json::Map<String, serde_json::Value>,
    segments: &[String],
    value: serde_json::Value,
) {
    let Some((first, rest)) = segments.split_first() else {
        return;
    };

    if rest.is_empty() {
        obj.insert(first.clone(), value);
        return;
    }

    let entry = obj
        .entry(first.clone())
        .or_insert_with(|| serde_json::Value::Object(serde_json::Map::new()));
    if let serde_json::Value::Object(nested) = entry {
        set_in_object(nested, rest, value);
    }
}
