//! Prism Security Tokens
//!
//! Single-use, time-boxed credentials for password reset and invite
//! activation. A raw bearer secret is handed to the caller exactly once at
//! issuance; only its keyed hash is ever stored. Consumption is an atomic
//! check-and-mark, so a token can be spent once no matter how many callers
//! race on it.
//!
//! # Persistence modes
//!
//! The behavioral contract (single use, expiry, purpose check) is
//! identical across both store handlers; only durability differs:
//!
//! - [`MemoryTokenStore`] - process lifetime, for tests and single-process
//!   deployments
//! - [`FileTokenStore`] - JSON snapshot with atomic writes, for
//!   deployments that must survive restarts
//!
//! # Failure shape
//!
//! `consume` collapses every failure sub-cause (unknown token, wrong
//! purpose, expired, already consumed) to `None` so callers cannot leak
//! which condition failed.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

/// Deployment configuration
pub mod config;

/// Token error types
pub mod error;

/// Keyed hashing of bearer secrets
pub mod hashing;

/// Issue / consume / prune service
pub mod service;

/// Token persistence handlers
pub mod store;

/// Token and purpose types
pub mod token;

pub use config::{TokenConfig, TokenPersistence};
pub use error::{TokenError, TokenResult};
pub use hashing::{generate_secret, TokenKey};
pub use service::{IssuedToken, TokenService};
pub use store::{ConsumeOutcome, FileTokenStore, MemoryTokenStore, TokenStore};
pub use token::{SecurityToken, TokenPurpose};
