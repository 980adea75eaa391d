//! Mapper error types.

use thiserror::Error;

/// Result type for mapper operations.
pub type MapperResult<T> = Result<T, MapperError>;

/// Errors raised while computing a claim or attribute value.
///
/// These are fatal for the current emission: the host pipeline decides
/// whether to drop the claim, abort token issuance or fail the login.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MapperError {
    /// The user has no email address on record.
    #[error("user email is missing")]
    MissingEmail,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_email_message() {
        assert_eq!(MapperError::MissingEmail.to_string(), "user email is missing");
    }
}
