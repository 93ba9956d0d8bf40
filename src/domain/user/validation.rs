//! Credential input validation
//!
//! Registration only requires both values to be present. Emails are taken
//! verbatim: no trimming, no case folding.

use thiserror::Error;

/// Errors that can occur while validating registration input
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    #[error("Email cannot be empty")]
    EmptyEmail,

    #[error("Password cannot be empty")]
    EmptyPassword,
}

/// Validate an email address
pub fn validate_email(email: &str) -> Result<(), UserValidationError> {
    if email.is_empty() {
        return Err(UserValidationError::EmptyEmail);
    }

    Ok(())
}

/// Validate a raw password before hashing
pub fn validate_password(password: &str) -> Result<(), UserValidationError> {
    if password.is_empty() {
        return Err(UserValidationError::EmptyPassword);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_emails() {
        assert!(validate_email("a@x.com").is_ok());
        assert!(validate_email("Test1@Example.com").is_ok());
        // Whitespace is preserved and accepted as-is
        assert!(validate_email(" a@x.com ").is_ok());
    }

    #[test]
    fn test_empty_email() {
        assert_eq!(validate_email(""), Err(UserValidationError::EmptyEmail));
    }

    #[test]
    fn test_valid_passwords() {
        assert!(validate_password("secure123").is_ok());
        assert!(validate_password("x").is_ok());
    }

    #[test]
    fn test_empty_password() {
        assert_eq!(
            validate_password(""),
            Err(UserValidationError::EmptyPassword)
        );
    }
}
