//! Token and purpose types

use prism_core::UserId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// What a token authorizes when consumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenPurpose {
    /// Password reset flow
    PasswordReset,
    /// Invite activation flow
    InviteActivation,
}

impl TokenPurpose {
    /// Stable string form, matching the serde representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PasswordReset => "password_reset",
            Self::InviteActivation => "invite_activation",
        }
    }
}

impl fmt::Display for TokenPurpose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A stored single-use token.
///
/// Only the keyed hash of the bearer secret is kept; the raw secret lives
/// exclusively in the [`crate::IssuedToken`] returned at issuance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecurityToken {
    /// Keyed hash of the bearer secret, hex-encoded
    pub token_hash: String,
    /// User the token was issued for
    pub user_id: UserId,
    /// Email the token was delivered to
    pub email: String,
    /// What the token authorizes
    pub purpose: TokenPurpose,
    /// Issuance time, milliseconds since the Unix epoch
    pub issued_at: u64,
    /// Expiry time, milliseconds since the Unix epoch
    pub expires_at: u64,
    /// Consumption time; `None` until the single successful consumption
    pub consumed_at: Option<u64>,
    /// Count of consumption attempts, successful or not
    pub attempts: u32,
}

impl SecurityToken {
    /// True once the token has been spent
    pub fn is_consumed(&self) -> bool {
        self.consumed_at.is_some()
    }

    /// True when `now_ms` is past the expiry time
    pub fn is_expired(&self, now_ms: u64) -> bool {
        now_ms > self.expires_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token(expires_at: u64) -> SecurityToken {
        SecurityToken {
            token_hash: "abc".to_string(),
            user_id: UserId::new(),
            email: "a@example.com".to_string(),
            purpose: TokenPurpose::PasswordReset,
            issued_at: 0,
            expires_at,
            consumed_at: None,
            attempts: 0,
        }
    }

    #[test]
    fn test_purpose_strings() {
        assert_eq!(TokenPurpose::PasswordReset.as_str(), "password_reset");
        assert_eq!(
            TokenPurpose::InviteActivation.to_string(),
            "invite_activation"
        );
        let json = serde_json::to_string(&TokenPurpose::InviteActivation).unwrap();
        assert_eq!(json, "\"invite_activation\"");
    }

    #[test]
    fn test_expiry_boundary() {
        let t = token(1_000);
        assert!(!t.is_expired(999));
        assert!(!t.is_expired(1_000));
        assert!(t.is_expired(1_001));
    }

    #[test]
    fn test_consumed_flag() {
        let mut t = token(1_000);
        assert!(!t.is_consumed());
        t.consumed_at = Some(500);
        assert!(t.is_consumed());
    }
}
