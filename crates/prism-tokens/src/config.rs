//! Deployment configuration
//!
//! The token subsystem is configured per deployment: a persistence toggle
//! (durable file store for horizontally-scaled deployments, in-memory for
//! single-process and test contexts) and the key protecting token hashes
//! at rest. Configuration is read explicitly; nothing here consults the
//! environment implicitly at use time.

use crate::error::{TokenError, TokenResult};
use crate::hashing::TokenKey;
use std::env;
use std::path::PathBuf;

/// Environment variable selecting the persistence mode.
pub const ENV_PERSISTENCE: &str = "PRISM_TOKEN_PERSISTENCE";
/// Environment variable naming the durable snapshot path.
pub const ENV_PATH: &str = "PRISM_TOKEN_PATH";
/// Environment variable carrying the hex-encoded token key.
pub const ENV_KEY: &str = "PRISM_TOKEN_KEY";

/// Where tokens are persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenPersistence {
    /// In-memory only; tokens die with the process
    Disabled,
    /// Durable file-backed store
    Enabled {
        /// Snapshot path
        path: PathBuf,
    },
}

/// Token subsystem configuration.
#[derive(Debug, Clone)]
pub struct TokenConfig {
    /// Persistence mode
    pub persistence: TokenPersistence,
    /// Key protecting token hashes at rest
    pub key: TokenKey,
}

impl TokenConfig {
    /// In-memory configuration with the given key
    pub fn in_memory(key: TokenKey) -> Self {
        Self {
            persistence: TokenPersistence::Disabled,
            key,
        }
    }

    /// Durable configuration with the given snapshot path and key
    pub fn durable(path: impl Into<PathBuf>, key: TokenKey) -> Self {
        Self {
            persistence: TokenPersistence::Enabled { path: path.into() },
            key,
        }
    }

    /// Read configuration from the environment.
    ///
    /// `PRISM_TOKEN_KEY` is always required (64 hex characters).
    /// `PRISM_TOKEN_PERSISTENCE` defaults to `disabled`; when `enabled`,
    /// `PRISM_TOKEN_PATH` must name the snapshot file.
    pub fn from_env() -> TokenResult<Self> {
        let key = match env::var(ENV_KEY) {
            Ok(hex_key) => TokenKey::from_hex(&hex_key)?,
            Err(_) => return Err(TokenError::config(format!("{ENV_KEY} is not set"))),
        };

        let persistence = match env::var(ENV_PERSISTENCE).as_deref() {
            Ok("enabled") => match env::var(ENV_PATH) {
                Ok(path) => TokenPersistence::Enabled { path: path.into() },
                Err(_) => {
                    return Err(TokenError::config(format!(
                        "{ENV_PATH} is required when persistence is enabled"
                    )))
                }
            },
            Ok("disabled") | Err(_) => TokenPersistence::Disabled,
            Ok(other) => {
                return Err(TokenError::config(format!(
                    "{ENV_PERSISTENCE} must be \"enabled\" or \"disabled\", got \"{other}\""
                )))
            }
        };

        Ok(Self { persistence, key })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors() {
        let key = TokenKey::from_bytes([1u8; 32]);
        let config = TokenConfig::in_memory(key.clone());
        assert_eq!(config.persistence, TokenPersistence::Disabled);

        let config = TokenConfig::durable("/tmp/tokens.json", key);
        assert_eq!(
            config.persistence,
            TokenPersistence::Enabled {
                path: PathBuf::from("/tmp/tokens.json")
            }
        );
    }
}
