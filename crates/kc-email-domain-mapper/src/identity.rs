//! The user view handed to mappers.

use serde::{Deserialize, Serialize};

/// The authenticated principal at claim-emission time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIdentity {
    /// Username.
    pub username: String,

    /// Email address, if the user has one on record.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl UserIdentity {
    /// Creates an identity without an email address.
    #[must_use]
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            email: None,
        }
    }

    /// Sets the email address.
    #[must_use]
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Returns the email address, treating an empty string as absent.
    #[must_use]
    pub fn email(&self) -> Option<&str> {
        self.email.as_deref().filter(|e| !e.is_empty())
    }
}

/// An email address split at its first `@`.
///
/// The parts are taken verbatim; nothing is validated against RFC 5322.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmailAddress<'a> {
    /// Everything before the first `@`, or the whole input if there is none.
    pub local_part: &'a str,

    /// Everything after the first `@`; empty if there is none.
    pub domain: &'a str,
}

impl<'a> EmailAddress<'a> {
    /// Splits `address` at its first `@`.
    #[must_use]
    pub fn parse(address: &'a str) -> Self {
        let (local_part, domain) = address.split_once('@').unwrap_or((address, ""));
        Self { local_part, domain }
    }

    /// Returns the address with its domain replaced.
    #[must_use]
    pub fn with_domain(&self, domain: &str) -> String {
        format!("{}@{domain}", self.local_part)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_splits_at_first_at() {
        let addr = EmailAddress::parse("a@b@c.example");
        assert_eq!(addr.local_part, "a");
        assert_eq!(addr.domain, "b@c.example");
    }

    #[test]
    fn parse_without_at_keeps_whole_string() {
        let addr = EmailAddress::parse("nodomain");
        assert_eq!(addr.local_part, "nodomain");
        assert_eq!(addr.domain, "");
    }

    #[test]
    fn parse_leading_at_yields_empty_local_part() {
        let addr = EmailAddress::parse("@example.com");
        assert_eq!(addr.local_part, "");
        assert_eq!(addr.with_domain("new.example"), "@new.example");
    }

    #[test]
    fn empty_email_counts_as_absent() {
        let user = UserIdentity::new("jdoe").with_email("");
        assert_eq!(user.email(), None);
        assert_eq!(UserIdentity::new("jdoe").email(), None);
        assert_eq!(
            UserIdentity::new("jdoe").with_email("jdoe@example.com").email(),
            Some("jdoe@example.com")
        );
    }
}
