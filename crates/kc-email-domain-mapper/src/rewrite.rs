//! The email domain rewrite rule shared by the OIDC and SAML mappers.

use crate::config::MapperConfig;
use crate::error::{MapperError, MapperResult};
use crate::identity::{EmailAddress, UserIdentity};

/// Config key holding the replacement domain.
pub const EMAIL_DOMAIN: &str = "emailDomain";

/// Domain used when [`EMAIL_DOMAIN`] is unset or empty.
pub const DEFAULT_EMAIL_DOMAIN: &str = "example.com";

/// Returns the user's email address with its domain replaced by the
/// configured one.
///
/// The local part is everything before the first `@` (the whole address if
/// there is no `@`). The result is not validated.
///
/// # Errors
///
/// Returns [`MapperError::MissingEmail`] if the user has no email address.
pub fn rewrite(identity: &UserIdentity, config: &MapperConfig) -> MapperResult<String> {
    let email = identity.email().ok_or(MapperError::MissingEmail)?;
    let domain = config
        .get_non_empty(EMAIL_DOMAIN)
        .unwrap_or(DEFAULT_EMAIL_DOMAIN);

    let value = EmailAddress::parse(email).with_domain(domain);
    tracing::debug!(
        username = %identity.username,
        mapper = %config.name,
        domain,
        "rewrote email domain"
    );
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> MapperConfig {
        MapperConfig::new("email", "oidc-custom-email-domain-mapper")
    }

    fn user(email: &str) -> UserIdentity {
        UserIdentity::new("user").with_email(email)
    }

    #[test]
    fn replaces_domain() {
        let config = config().with_config(EMAIL_DOMAIN, "new.com");
        assert_eq!(rewrite(&user("user@old.com"), &config).unwrap(), "user@new.com");
    }

    #[test]
    fn defaults_domain() {
        assert_eq!(
            rewrite(&user("mmustermann@example.com"), &config()).unwrap(),
            "mmustermann@example.com"
        );
        assert_eq!(rewrite(&user("jdoe@corp.internal"), &config()).unwrap(), "jdoe@example.com");
    }

    #[test]
    fn empty_domain_falls_back_to_default() {
        let config = config().with_config(EMAIL_DOMAIN, "");
        assert_eq!(rewrite(&user("jdoe@corp.internal"), &config).unwrap(), "jdoe@example.com");
    }

    #[test]
    fn missing_email_fails() {
        let err = rewrite(&UserIdentity::new("nomail"), &config()).unwrap_err();
        assert_eq!(err, MapperError::MissingEmail);

        let err = rewrite(&user(""), &config()).unwrap_err();
        assert_eq!(err, MapperError::MissingEmail);
    }

    #[test]
    fn address_without_at_is_taken_whole() {
        let config = config().with_config(EMAIL_DOMAIN, "public.org");
        assert_eq!(rewrite(&user("nodomain"), &config).unwrap(), "nodomain@public.org");
    }

    #[test]
    fn only_first_at_splits() {
        let config = config().with_config(EMAIL_DOMAIN, "public.org");
        assert_eq!(rewrite(&user("a@b@c"), &config).unwrap(), "a@public.org");
    }

    #[test]
    fn repeated_calls_agree() {
        let config = config().with_config(EMAIL_DOMAIN, "public.org");
        let identity = user("jdoe@corp.internal");

        let first = rewrite(&identity, &config).unwrap();
        let second = rewrite(&identity, &config).unwrap();

        assert_eq!(first, "jdoe@public.org");
        assert_eq!(first, second);
        assert_eq!(identity.email.as_deref(), Some("jdoe@corp.internal"));
    }
}
