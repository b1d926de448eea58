//! Allow/deny decision values
//!
//! Guards communicate through values, never through errors: a denial is a
//! normal outcome carrying the transport status the caller should map it
//! to.

use serde::{Deserialize, Serialize};

/// Outcome of a guard evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum GuardDecision {
    /// The operation may proceed
    Allow,
    /// The operation is rejected
    Deny {
        /// Transport status the caller should surface (e.g. 400, 403)
        status: u16,
        /// Human-readable reason
        reason: String,
    },
}

impl GuardDecision {
    /// An allow decision
    pub fn allow() -> Self {
        Self::Allow
    }

    /// A deny decision with the given status and reason
    pub fn deny(status: u16, reason: impl Into<String>) -> Self {
        Self::Deny {
            status,
            reason: reason.into(),
        }
    }

    /// True when the operation may proceed
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allow)
    }

    /// True when the operation was rejected
    pub fn is_denied(&self) -> bool {
        !self.is_allowed()
    }

    /// The denial status, if denied
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Allow => None,
            Self::Deny { status, .. } => Some(*status),
        }
    }

    /// The denial reason, if denied
    pub fn reason(&self) -> Option<&str> {
        match self {
            Self::Allow => None,
            Self::Deny { reason, .. } => Some(reason),
        }
    }
}
