//! Classified store errors — tells the calling screen *why* an operation
//! failed so it can show the right message. All of these are recoverable;
//! none are fatal to the process.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// The identity provider rejected the credentials.
    Authentication(String),
    /// A per-user operation was attempted with no signed-in user.
    NoActiveSession,
    /// A redemption or point adjustment would drive the balance below zero.
    /// The balance is left untouched.
    InsufficientPoints { needed: u64, available: u64 },
    /// The rewards ledger refused to record a redemption.
    Ledger(String),
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::Authentication(msg) => write!(f, "authentication failed: {}", msg),
            SessionError::NoActiveSession => write!(f, "no active session"),
            SessionError::InsufficientPoints { needed, available } => write!(
                f,
                "insufficient points: need {}, have {}",
                needed, available
            ),
            SessionError::Ledger(msg) => write!(f, "rewards ledger error: {}", msg),
        }
    }
}

impl std::error::Error for SessionError {}
