//! Registry for protocol mappers.
//!
//! Each mapper is registered with the set of [`Capability`]s it runs for.
//! Claim mappers bring their own set, see [`ClaimMapper::capabilities`].
//! Applying mappers walks the configured mapper instances of a client,
//! looks each instance's `mapper_type` up and runs it if it is registered for
//! the requested capability.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use crate::config::MapperConfig;
use crate::error::MapperResult;
use crate::identity::UserIdentity;
use crate::mapper::{
    AttributeStatementMapper, Capability, ClaimMapper, Claims, ProtocolMapper, TokenKind,
};
use crate::oidc::OidcCustomEmailDomainMapper;
use crate::saml::{AttributeStatement, SamlCustomEmailDomainMapper};

enum Registered {
    Claim(Arc<dyn ClaimMapper>),
    AttributeStatement(Arc<dyn AttributeStatementMapper>),
}

impl Registered {
    fn as_protocol_mapper(&self) -> &dyn ProtocolMapper {
        match self {
            Self::Claim(m) => m.as_ref(),
            Self::AttributeStatement(m) => m.as_ref(),
        }
    }
}

struct Entry {
    mapper: Registered,
    capabilities: HashSet<Capability>,
}

/// Registry for protocol mappers.
#[derive(Default)]
pub struct MapperRegistry {
    entries: HashMap<&'static str, Entry>,
}

impl std::fmt::Debug for MapperRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MapperRegistry")
            .field("mappers", &self.entries.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl MapperRegistry {
    /// Creates a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry with both custom email domain mappers registered.
    #[must_use]
    pub fn with_custom_mappers() -> Self {
        let mut registry = Self::new();

        registry.register_claim_mapper(Arc::new(OidcCustomEmailDomainMapper::new()));
        registry.register_attribute_mapper(Arc::new(SamlCustomEmailDomainMapper::new()));

        registry
    }

    /// Registers an OIDC claim mapper for the token kinds it declares.
    ///
    /// Replaces any mapper registered under the same ID.
    pub fn register_claim_mapper(&mut self, mapper: Arc<dyn ClaimMapper>) {
        let capabilities: HashSet<_> = mapper
            .capabilities()
            .iter()
            .copied()
            .filter(|c| *c != Capability::AttributeStatement)
            .collect();
        self.insert(Registered::Claim(mapper), capabilities);
    }

    /// Registers a SAML attribute statement mapper.
    ///
    /// Replaces any mapper registered under the same ID.
    pub fn register_attribute_mapper(&mut self, mapper: Arc<dyn AttributeStatementMapper>) {
        self.insert(
            Registered::AttributeStatement(mapper),
            HashSet::from([Capability::AttributeStatement]),
        );
    }

    fn insert(&mut self, mapper: Registered, capabilities: HashSet<Capability>) {
        let id = mapper.as_protocol_mapper().id();
        tracing::debug!(mapper = id, ?capabilities, "registered protocol mapper");
        self.entries.insert(id, Entry {
            mapper,
            capabilities,
        });
    }

    /// Gets a mapper by ID.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&dyn ProtocolMapper> {
        self.entries.get(id).map(|e| e.mapper.as_protocol_mapper())
    }

    /// Checks whether the mapper is registered for a capability.
    #[must_use]
    pub fn supports(&self, id: &str, capability: Capability) -> bool {
        self.entries
            .get(id)
            .is_some_and(|e| e.capabilities.contains(&capability))
    }

    /// Returns all registered mapper IDs, sorted.
    #[must_use]
    pub fn mapper_ids(&self) -> Vec<&'static str> {
        let mut ids: Vec<_> = self.entries.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    /// Orders the mapper instances registered for `capability` by priority.
    fn ordered<'a>(
        &self,
        mapper_configs: &'a [MapperConfig],
        capability: Capability,
    ) -> Vec<(&Entry, &'a MapperConfig)> {
        let mut selected: Vec<_> = mapper_configs
            .iter()
            .filter_map(|config| match self.entries.get(config.mapper_type.as_str()) {
                Some(entry) if entry.capabilities.contains(&capability) => Some((entry, config)),
                Some(_) => None,
                None => {
                    tracing::warn!(
                        mapper = %config.name,
                        mapper_type = %config.mapper_type,
                        "skipping mapper of unregistered type"
                    );
                    None
                }
            })
            .collect();

        selected.sort_by_key(|(entry, _)| entry.mapper.as_protocol_mapper().priority());
        selected
    }

    /// Applies all configured claim mappers to a token's claims.
    ///
    /// # Errors
    ///
    /// Returns the first mapper error; mappers after it do not run.
    pub fn apply_claim_mappers(
        &self,
        kind: TokenKind,
        claims: &mut Claims,
        mapper_configs: &[MapperConfig],
        identity: &UserIdentity,
    ) -> MapperResult<()> {
        for (entry, config) in self.ordered(mapper_configs, kind.capability()) {
            if let Registered::Claim(mapper) = &entry.mapper {
                mapper.transform(kind, claims, config, identity)?;
            }
        }
        Ok(())
    }

    /// Applies all configured attribute statement mappers.
    ///
    /// # Errors
    ///
    /// Returns the first mapper error; mappers after it do not run.
    pub fn apply_attribute_mappers(
        &self,
        statement: &mut AttributeStatement,
        mapper_configs: &[MapperConfig],
        identity: &UserIdentity,
    ) -> MapperResult<()> {
        for (entry, config) in self.ordered(mapper_configs, Capability::AttributeStatement) {
            if let Registered::AttributeStatement(mapper) = &entry.mapper {
                mapper.transform_attribute_statement(statement, config, identity)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::config::Protocol;
    use crate::error::MapperError;

    fn oidc_config(claim: &str, domain: &str) -> MapperConfig {
        MapperConfig::new(claim, OidcCustomEmailDomainMapper::PROVIDER_ID)
            .with_config("claim.name", claim)
            .with_config("emailDomain", domain)
    }

    #[test]
    fn custom_mappers_registered() {
        let registry = MapperRegistry::with_custom_mappers();

        assert_eq!(
            registry.mapper_ids(),
            vec!["oidc-custom-email-domain-mapper", "saml-custom-email-domain-mapper"]
        );
        assert!(registry.supports("oidc-custom-email-domain-mapper", Capability::IdToken));
        assert!(!registry.supports(
            "oidc-custom-email-domain-mapper",
            Capability::AttributeStatement
        ));
        assert!(registry.supports(
            "saml-custom-email-domain-mapper",
            Capability::AttributeStatement
        ));
        assert_eq!(
            registry.get("saml-custom-email-domain-mapper").map(|m| m.protocol()),
            Some(Protocol::Saml)
        );
    }

    #[test]
    fn declared_capabilities_limit_token_kinds() {
        let mut registry = MapperRegistry::new();
        let mapper = OidcCustomEmailDomainMapper::with_capabilities([Capability::AccessToken]);
        let switches: Vec<_> = mapper
            .config_properties()
            .iter()
            .map(|p| p.name.as_str())
            .filter(|name| name.ends_with(".claim"))
            .collect();
        assert_eq!(switches, vec!["access.token.claim"]);
        registry.register_claim_mapper(Arc::new(mapper));

        let id = OidcCustomEmailDomainMapper::PROVIDER_ID;
        assert!(registry.supports(id, Capability::AccessToken));
        assert!(!registry.supports(id, Capability::IdToken));
        assert!(!registry.supports(id, Capability::UserInfo));

        let identity = UserIdentity::new("jdoe").with_email("jdoe@corp.internal");
        let configs = [oidc_config("email", "public.org")];

        let mut id_token = Claims::new();
        registry
            .apply_claim_mappers(TokenKind::IdToken, &mut id_token, &configs, &identity)
            .unwrap();
        assert!(id_token.is_empty());

        let mut access_token = Claims::new();
        registry
            .apply_claim_mappers(TokenKind::AccessToken, &mut access_token, &configs, &identity)
            .unwrap();
        assert_eq!(access_token.get("email"), Some(&json!("jdoe@public.org")));
    }

    #[test]
    fn applies_every_instance_and_skips_unknown_types() {
        let registry = MapperRegistry::with_custom_mappers();
        let identity = UserIdentity::new("jdoe").with_email("jdoe@corp.internal");
        let configs = [
            oidc_config("email", "public.org"),
            MapperConfig::new("groups", "oidc-group-membership-mapper"),
            oidc_config("alt_email", "other.example").with_config("userinfo.token.claim", "false"),
        ];

        let mut claims = Claims::new();
        registry
            .apply_claim_mappers(TokenKind::AccessToken, &mut claims, &configs, &identity)
            .unwrap();
        assert_eq!(claims.get("email"), Some(&json!("jdoe@public.org")));
        assert_eq!(claims.get("alt_email"), Some(&json!("jdoe@other.example")));

        let mut userinfo = Claims::new();
        registry
            .apply_claim_mappers(TokenKind::UserInfo, &mut userinfo, &configs, &identity)
            .unwrap();
        assert!(userinfo.contains_key("email"));
        assert!(!userinfo.contains_key("alt_email"));
    }

    #[test]
    fn attribute_mappers_ignore_oidc_instances() {
        let registry = MapperRegistry::with_custom_mappers();
        let identity = UserIdentity::new("jdoe").with_email("jdoe@corp.internal");
        let configs = [
            oidc_config("email", "public.org"),
            MapperConfig::new("saml email", SamlCustomEmailDomainMapper::PROVIDER_ID)
                .with_protocol(Protocol::Saml),
        ];

        let mut statement = AttributeStatement::new();
        registry
            .apply_attribute_mappers(&mut statement, &configs, &identity)
            .unwrap();

        assert_eq!(statement.attributes.len(), 1);
        assert_eq!(statement.attributes[0].values, vec!["jdoe@example.com".to_string()]);
    }

    #[test]
    fn first_error_stops_application() {
        let registry = MapperRegistry::with_custom_mappers();
        let configs = [oidc_config("email", "public.org")];
        let mut claims = Claims::new();

        let err = registry
            .apply_claim_mappers(
                TokenKind::AccessToken,
                &mut claims,
                &configs,
                &UserIdentity::new("nomail"),
            )
            .unwrap_err();

        assert_eq!(err, MapperError::MissingEmail);
        assert!(claims.is_empty());
    }
}
