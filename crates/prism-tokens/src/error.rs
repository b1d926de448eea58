//! Token error types

use thiserror::Error;

/// Errors from token issuance, storage, and configuration.
///
/// Consumption failures are not errors: they collapse to a `None` result
/// by design, so only infrastructure problems surface here.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    /// Deployment configuration is missing or malformed.
    #[error("invalid token configuration: {message}")]
    Config {
        /// Description of the configuration problem
        message: String,
    },

    /// The token store failed.
    #[error("token storage failure: {message}")]
    Storage {
        /// Description of the storage failure
        message: String,
    },

    /// The requested time-to-live is unusable.
    #[error("invalid token TTL: {message}")]
    InvalidTtl {
        /// Description of the TTL problem
        message: String,
    },
}

impl TokenError {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a storage error
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    /// Create an invalid-TTL error
    pub fn invalid_ttl(message: impl Into<String>) -> Self {
        Self::InvalidTtl {
            message: message.into(),
        }
    }
}

/// Result type for token operations
pub type TokenResult<T> = Result<T, TokenError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = TokenError::config("PRISM_TOKEN_KEY is not set");
        assert!(err.to_string().contains("PRISM_TOKEN_KEY"));

        let err = TokenError::invalid_ttl("TTL must be greater than zero");
        assert!(err.to_string().contains("greater than zero"));
    }
}
