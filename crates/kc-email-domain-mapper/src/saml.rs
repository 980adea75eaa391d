//! SAML custom email domain mapper and the attribute types it writes.

use serde::{Deserialize, Serialize};

use crate::config::{ConfigProperty, MapperConfig, Protocol};
use crate::error::MapperResult;
use crate::identity::UserIdentity;
use crate::mapper::{AttributeStatementMapper, ProtocolMapper};
use crate::rewrite::{DEFAULT_EMAIL_DOMAIN, EMAIL_DOMAIN, rewrite};

/// Config key holding the SAML attribute name.
pub const SAML_ATTRIBUTE_NAME: &str = "SAMLAttributeStatement";

/// Attribute name used when [`SAML_ATTRIBUTE_NAME`] is unset.
pub const DEFAULT_SAML_ATTRIBUTE_NAME: &str =
    "http://schemas.xmlsoap.org/ws/2005/05/identity/claims/emailaddress";

/// Config key holding the SAML attribute name format.
pub const SAML_ATTRIBUTE_NAMEFORMAT: &str = "SAMLAttributeFormat";

/// Category shared by all attribute statement mappers.
pub const ATTRIBUTE_STATEMENT_CATEGORY: &str = "AttributeStatement Mapper";

const FRIENDLY_NAME: &str = "Email from Custom Email Domain Mapper";

/// SAML attribute name formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttributeNameFormat {
    /// URI reference.
    Uri,
    /// Basic (simple string).
    Basic,
    /// Unspecified.
    Unspecified,
}

impl AttributeNameFormat {
    /// All formats, in the order offered to administrators.
    pub const ALL: [Self; 3] = [Self::Uri, Self::Basic, Self::Unspecified];

    /// Returns the URI for this name format.
    #[must_use]
    pub const fn uri(&self) -> &'static str {
        match self {
            Self::Uri => "urn:oasis:names:tc:SAML:2.0:attrname-format:uri",
            Self::Basic => "urn:oasis:names:tc:SAML:2.0:attrname-format:basic",
            Self::Unspecified => "urn:oasis:names:tc:SAML:2.0:attrname-format:unspecified",
        }
    }

    /// Parses a name format from its URI.
    #[must_use]
    pub fn from_uri(uri: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.uri() == uri)
    }
}

/// Attribute statement.
///
/// Contains attributes about the subject.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeStatement {
    /// List of attributes.
    pub attributes: Vec<Attribute>,
}

impl AttributeStatement {
    /// Creates a new empty attribute statement.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            attributes: Vec::new(),
        }
    }

    /// Adds an attribute.
    pub fn add_attribute(&mut self, attr: Attribute) {
        self.attributes.push(attr);
    }

    /// Finds the first attribute with the given name.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|a| a.name == name)
    }
}

/// SAML Attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    /// The attribute name (typically a URI).
    pub name: String,

    /// The format of the attribute name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name_format: Option<String>,

    /// A human-readable name for the attribute.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub friendly_name: Option<String>,

    /// The attribute values.
    pub values: Vec<String>,
}

impl Attribute {
    /// Creates a new attribute with a single value.
    #[must_use]
    pub fn single(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            name_format: None,
            friendly_name: None,
            values: vec![value.into()],
        }
    }

    /// Sets the friendly name.
    #[must_use]
    pub fn with_friendly_name(mut self, name: impl Into<String>) -> Self {
        self.friendly_name = Some(name.into());
        self
    }

    /// Sets the name format.
    #[must_use]
    pub fn with_format(mut self, format: AttributeNameFormat) -> Self {
        self.name_format = Some(format.uri().to_string());
        self
    }
}

/// Adds an attribute holding the user's email address with a custom domain.
#[derive(Debug, Clone)]
pub struct SamlCustomEmailDomainMapper {
    properties: Vec<ConfigProperty>,
}

impl SamlCustomEmailDomainMapper {
    /// Mapper type ID.
    pub const PROVIDER_ID: &'static str = "saml-custom-email-domain-mapper";

    /// Creates the mapper.
    #[must_use]
    pub fn new() -> Self {
        let properties = vec![
            ConfigProperty::string(EMAIL_DOMAIN, "Email Domain")
                .with_help(
                    "Return an email address where the domain part is replaced with this custom domain.",
                )
                .with_default(DEFAULT_EMAIL_DOMAIN),
            ConfigProperty::string(SAML_ATTRIBUTE_NAME, "SAML Attribute Statement")
                .with_help("Set name of SAML Attribute Statement to add")
                .with_default(DEFAULT_SAML_ATTRIBUTE_NAME),
            ConfigProperty::list(
                SAML_ATTRIBUTE_NAMEFORMAT,
                "SAML Attribute Format",
                AttributeNameFormat::ALL.map(|f| f.uri()),
            )
            .with_help("Set format of SAML Attribute Statement to add"),
        ];
        Self { properties }
    }

    /// Resolves the configured name format; unknown values count as unset.
    fn name_format(config: &MapperConfig) -> Option<AttributeNameFormat> {
        let raw = config.get_non_empty(SAML_ATTRIBUTE_NAMEFORMAT)?;
        let format = AttributeNameFormat::from_uri(raw);
        if format.is_none() {
            tracing::warn!(
                mapper = %config.name,
                name_format = raw,
                "ignoring unknown SAML attribute name format"
            );
        }
        format
    }
}

impl Default for SamlCustomEmailDomainMapper {
    fn default() -> Self {
        Self::new()
    }
}

impl ProtocolMapper for SamlCustomEmailDomainMapper {
    fn id(&self) -> &'static str {
        Self::PROVIDER_ID
    }

    fn protocol(&self) -> Protocol {
        Protocol::Saml
    }

    fn display_name(&self) -> &'static str {
        "Custom Email Domain Mapper"
    }

    fn category(&self) -> &'static str {
        ATTRIBUTE_STATEMENT_CATEGORY
    }

    fn help_text(&self) -> &'static str {
        "Returns an email address whose domain part is replaced with a custom domain."
    }

    fn config_properties(&self) -> &[ConfigProperty] {
        &self.properties
    }
}

impl AttributeStatementMapper for SamlCustomEmailDomainMapper {
    fn transform_attribute_statement(
        &self,
        statement: &mut AttributeStatement,
        config: &MapperConfig,
        identity: &UserIdentity,
    ) -> MapperResult<()> {
        let value = rewrite(identity, config)?;
        let name = config
            .get_non_empty(SAML_ATTRIBUTE_NAME)
            .unwrap_or(DEFAULT_SAML_ATTRIBUTE_NAME);

        let mut attribute = Attribute::single(name, value).with_friendly_name(FRIENDLY_NAME);
        if let Some(format) = Self::name_format(config) {
            attribute = attribute.with_format(format);
        }
        statement.add_attribute(attribute);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigPropertyType;
    use crate::error::MapperError;

    fn config() -> MapperConfig {
        MapperConfig::new("Custom Email Domain Mapper", SamlCustomEmailDomainMapper::PROVIDER_ID)
            .with_protocol(Protocol::Saml)
    }

    fn identity() -> UserIdentity {
        UserIdentity::new("jdoe").with_email("jdoe@corp.internal")
    }

    #[test]
    fn metadata() {
        let mapper = SamlCustomEmailDomainMapper::new();
        assert_eq!(mapper.id(), "saml-custom-email-domain-mapper");
        assert_eq!(mapper.protocol(), Protocol::Saml);
        assert_eq!(mapper.category(), ATTRIBUTE_STATEMENT_CATEGORY);
        assert!(!mapper.display_name().is_empty());
        assert!(!mapper.help_text().is_empty());
    }

    #[test]
    fn exposes_three_properties_in_order() {
        let mapper = SamlCustomEmailDomainMapper::new();
        let props = mapper.config_properties();

        let names: Vec<_> = props.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["emailDomain", "SAMLAttributeStatement", "SAMLAttributeFormat"]);

        let format = &props[2];
        assert_eq!(format.property_type, ConfigPropertyType::List);
        assert_eq!(
            format.options,
            vec![
                "urn:oasis:names:tc:SAML:2.0:attrname-format:uri".to_string(),
                "urn:oasis:names:tc:SAML:2.0:attrname-format:basic".to_string(),
                "urn:oasis:names:tc:SAML:2.0:attrname-format:unspecified".to_string(),
            ]
        );
        assert_eq!(format.default_value, None);
    }

    #[test]
    fn adds_attribute_with_defaults() {
        let mapper = SamlCustomEmailDomainMapper::new();
        let mut statement = AttributeStatement::new();

        mapper
            .transform_attribute_statement(&mut statement, &config(), &identity())
            .unwrap();

        assert_eq!(statement.attributes.len(), 1);
        let attr = &statement.attributes[0];
        assert_eq!(attr.name, DEFAULT_SAML_ATTRIBUTE_NAME);
        assert_eq!(attr.name_format, None);
        assert_eq!(attr.friendly_name.as_deref(), Some(FRIENDLY_NAME));
        assert_eq!(attr.values, vec!["jdoe@example.com".to_string()]);
    }

    #[test]
    fn adds_attribute_with_configured_name_and_format() {
        let mapper = SamlCustomEmailDomainMapper::new();
        let config = config()
            .with_config(EMAIL_DOMAIN, "public.org")
            .with_config(SAML_ATTRIBUTE_NAME, "mail")
            .with_config(SAML_ATTRIBUTE_NAMEFORMAT, AttributeNameFormat::Basic.uri());
        let mut statement = AttributeStatement::new();

        mapper
            .transform_attribute_statement(&mut statement, &config, &identity())
            .unwrap();

        let attr = statement.attribute("mail").unwrap();
        assert_eq!(
            attr.name_format.as_deref(),
            Some("urn:oasis:names:tc:SAML:2.0:attrname-format:basic")
        );
        assert_eq!(attr.values, vec!["jdoe@public.org".to_string()]);
    }

    #[test]
    fn empty_attribute_name_uses_default() {
        let mapper = SamlCustomEmailDomainMapper::new();
        let config = config().with_config(SAML_ATTRIBUTE_NAME, "");
        let mut statement = AttributeStatement::new();

        mapper
            .transform_attribute_statement(&mut statement, &config, &identity())
            .unwrap();

        assert_eq!(statement.attributes[0].name, DEFAULT_SAML_ATTRIBUTE_NAME);
    }

    #[test]
    fn unknown_format_is_unset() {
        let mapper = SamlCustomEmailDomainMapper::new();
        let config = config().with_config(SAML_ATTRIBUTE_NAMEFORMAT, "urn:bogus");
        let mut statement = AttributeStatement::new();

        mapper
            .transform_attribute_statement(&mut statement, &config, &identity())
            .unwrap();

        assert_eq!(statement.attributes[0].name_format, None);
    }

    #[test]
    fn missing_email_leaves_statement_untouched() {
        let mapper = SamlCustomEmailDomainMapper::new();
        let mut statement = AttributeStatement::new();

        let err = mapper
            .transform_attribute_statement(&mut statement, &config(), &UserIdentity::new("nomail"))
            .unwrap_err();

        assert_eq!(err, MapperError::MissingEmail);
        assert!(statement.attributes.is_empty());
    }

    #[test]
    fn name_format_uris() {
        for format in AttributeNameFormat::ALL {
            assert_eq!(AttributeNameFormat::from_uri(format.uri()), Some(format));
        }
        assert_eq!(AttributeNameFormat::from_uri("basic"), None);
    }
}
