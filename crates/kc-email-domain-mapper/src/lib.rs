//! # kc-email-domain-mapper
//!
//! Protocol mappers that emit the user's email address with its domain part
//! replaced by a configured domain.
//!
//! Two variants share one rewrite rule:
//! - [`OidcCustomEmailDomainMapper`] sets a token claim (access token, ID token, userinfo)
//! - [`SamlCustomEmailDomainMapper`] adds an attribute to a SAML attribute statement
//!
//! ## Modules
//!
//! - [`config`] - Mapper instance configuration and config-property metadata
//! - [`error`] - Mapper error types
//! - [`identity`] - The user view handed to mappers and the derived email address
//! - [`mapper`] - Mapper traits, capabilities and claim helpers
//! - [`oidc`] - OIDC claim mapper
//! - [`registry`] - Capability-based mapper registry
//! - [`rewrite`] - The email domain rewrite rule
//! - [`saml`] - SAML attribute statement mapper and attribute types
//!
//! ## Example
//!
//! ```rust
//! use kc_email_domain_mapper::{rewrite, MapperConfig, UserIdentity};
//!
//! let user = UserIdentity::new("jdoe").with_email("jdoe@corp.internal");
//! let config = MapperConfig::new("email", "oidc-custom-email-domain-mapper")
//!     .with_config("emailDomain", "public.org");
//!
//! assert_eq!(rewrite(&user, &config).unwrap(), "jdoe@public.org");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod identity;
pub mod mapper;
pub mod oidc;
pub mod registry;
pub mod rewrite;
pub mod saml;

pub use config::{ConfigProperty, ConfigPropertyType, MapperConfig, Protocol};
pub use error::{MapperError, MapperResult};
pub use identity::{EmailAddress, UserIdentity};
pub use mapper::{
    AttributeStatementMapper, Capability, ClaimMapper, Claims, ProtocolMapper, TokenKind,
};
pub use oidc::OidcCustomEmailDomainMapper;
pub use registry::MapperRegistry;
pub use rewrite::{DEFAULT_EMAIL_DOMAIN, EMAIL_DOMAIN, rewrite};
pub use saml::{Attribute, AttributeNameFormat, AttributeStatement, SamlCustomEmailDomainMapper};
