//! OIDC custom email domain mapper.

use crate::config::{
    CLAIM_NAME, ConfigProperty, INCLUDE_IN_ACCESS_TOKEN, INCLUDE_IN_ID_TOKEN, INCLUDE_IN_USERINFO,
    MapperConfig, Protocol,
};
use crate::error::MapperResult;
use crate::identity::UserIdentity;
use crate::mapper::{Capability, ClaimMapper, Claims, ProtocolMapper, set_claim_nested};
use crate::rewrite::{DEFAULT_EMAIL_DOMAIN, EMAIL_DOMAIN, rewrite};

/// Sets a token claim to the user's email address with a custom domain.
///
/// The claim name comes from the instance's `claim.name`; an instance
/// without one emits nothing.
#[derive(Debug, Clone)]
pub struct OidcCustomEmailDomainMapper {
    capabilities: Vec<Capability>,
    properties: Vec<ConfigProperty>,
}

impl OidcCustomEmailDomainMapper {
    /// Mapper type ID.
    pub const PROVIDER_ID: &'static str = "oidc-custom-email-domain-mapper";

    /// Creates the mapper for access tokens, ID tokens and userinfo.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capabilities([
            Capability::AccessToken,
            Capability::IdToken,
            Capability::UserInfo,
        ])
    }

    /// Creates the mapper for the given token kinds only.
    ///
    /// Capabilities other than the three OIDC token kinds are ignored.
    #[must_use]
    pub fn with_capabilities(capabilities: impl IntoIterator<Item = Capability>) -> Self {
        let mut capabilities: Vec<Capability> = capabilities
            .into_iter()
            .filter(|c| *c != Capability::AttributeStatement)
            .collect();
        capabilities.sort_unstable();
        capabilities.dedup();

        let properties = Self::build_properties(&capabilities);
        Self {
            capabilities,
            properties,
        }
    }

    fn build_properties(capabilities: &[Capability]) -> Vec<ConfigProperty> {
        let mut properties = vec![
            ConfigProperty::string(EMAIL_DOMAIN, "Email Domain")
                .with_help(
                    "Return an email address where the domain part is replaced with this custom domain.",
                )
                .with_default(DEFAULT_EMAIL_DOMAIN),
            ConfigProperty::string(CLAIM_NAME, "Token Claim Name").with_help(
                "Name of the claim to insert into the token. Use dots for nested claims, \
                 escape a literal dot with a backslash.",
            ),
        ];

        let switches = [
            (Capability::IdToken, INCLUDE_IN_ID_TOKEN, "Add to ID token"),
            (Capability::AccessToken, INCLUDE_IN_ACCESS_TOKEN, "Add to access token"),
            (Capability::UserInfo, INCLUDE_IN_USERINFO, "Add to userinfo"),
        ];
        for (capability, key, label) in switches {
            if capabilities.contains(&capability) {
                properties.push(ConfigProperty::boolean(key, label).with_default("true"));
            }
        }

        properties
    }
}

impl Default for OidcCustomEmailDomainMapper {
    fn default() -> Self {
        Self::new()
    }
}

impl ProtocolMapper for OidcCustomEmailDomainMapper {
    fn id(&self) -> &'static str {
        Self::PROVIDER_ID
    }

    fn protocol(&self) -> Protocol {
        Protocol::OpenidConnect
    }

    fn display_name(&self) -> &'static str {
        "Custom Email Domain Mapper"
    }

    fn category(&self) -> &'static str {
        "Token mapper"
    }

    fn help_text(&self) -> &'static str {
        "Returns an email address whose domain part is replaced with a custom domain."
    }

    fn config_properties(&self) -> &[ConfigProperty] {
        &self.properties
    }
}

impl ClaimMapper for OidcCustomEmailDomainMapper {
    fn capabilities(&self) -> &[Capability] {
        &self.capabilities
    }

    fn set_claim(
        &self,
        claims: &mut Claims,
        config: &MapperConfig,
        identity: &UserIdentity,
    ) -> MapperResult<()> {
        let value = rewrite(identity, config)?;
        if let Some(claim_name) = config.claim_name() {
            set_claim_nested(claims, claim_name, serde_json::Value::String(value));
        }
        Ok(())
    }
}
