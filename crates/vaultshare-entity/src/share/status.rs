//! Share and recipient state enumerations.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use vaultshare_core::AppError;

/// Lifecycle status of a share entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShareStatus {
    /// Created but not yet confirmed by the mirror.
    Pending,
    /// Live and visible to its recipients.
    Active,
    /// Past its expiry timestamp.
    Expired,
    /// Withdrawn by the owner.
    Revoked,
}

impl ShareStatus {
    /// Return the status as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Active => "active",
            Self::Expired => "expired",
            Self::Revoked => "revoked",
        }
    }
}

impl fmt::Display for ShareStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How recipients may use the shared entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessMode {
    /// Recipients may only read the entry.
    ReadOnly,
    /// Recipients may also edit their copy of the entry.
    ReadWrite,
}

/// Role granted to a recipient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecipientRole {
    /// Read-only access to the shared entry.
    Viewer,
    /// May edit the shared entry.
    Editor,
}

impl RecipientRole {
    /// Return the role as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Viewer => "viewer",
            Self::Editor => "editor",
        }
    }
}

impl fmt::Display for RecipientRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for RecipientRole {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "viewer" => Ok(Self::Viewer),
            "editor" => Ok(Self::Editor),
            _ => Err(AppError::validation(format!(
                "Invalid recipient role: '{s}'. Expected one of: viewer, editor"
            ))),
        }
    }
}

/// Per-recipient invitation state.
///
/// `Invited` is the only initial state. `Invited` moves to `Accepted` or
/// `Rejected`, and `Accepted` moves to `Revoked`. Nothing returns to
/// `Invited`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecipientStatus {
    /// Invitation sent, not yet answered.
    Invited,
    /// Invitation accepted; the recipient holds access.
    Accepted,
    /// Invitation rejected; the recipient blob is cleared.
    Rejected,
    /// Access withdrawn after acceptance; the recipient blob is cleared.
    Revoked,
}

impl RecipientStatus {
    /// Whether a move from `self` to `next` is allowed.
    ///
    /// Repeating an accept or a reject is treated as a no-op and allowed.
    pub fn can_transition_to(&self, next: RecipientStatus) -> bool {
        use RecipientStatus::*;
        matches!(
            (self, next),
            (Invited, Accepted)
                | (Invited, Rejected)
                | (Accepted, Revoked)
                | (Accepted, Accepted)
                | (Rejected, Rejected)
        )
    }

    /// Whether the recipient still holds, or may still gain, access.
    pub fn has_access(&self) -> bool {
        matches!(self, Self::Invited | Self::Accepted)
    }

    /// Return the status as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Invited => "invited",
            Self::Accepted => "accepted",
            Self::Rejected => "rejected",
            Self::Revoked => "revoked",
        }
    }
}

impl fmt::Display for RecipientStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
