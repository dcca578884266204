//! Share lifecycle events.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::EventKind;
use crate::types::id::{RecipientId, ShareId, UserId};

/// Closed set of share lifecycle events with their correlation identifiers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ShareEvent {
    /// A share was created through the mirror and stored locally.
    ShareCreated {
        /// The share ID.
        share_id: ShareId,
        /// The owning user.
        owner_id: UserId,
    },
    /// A recipient was invited to a share.
    RecipientAdded {
        /// The share ID.
        share_id: ShareId,
        /// The new recipient.
        recipient_id: RecipientId,
        /// The invited email address.
        email: String,
    },
    /// A recipient accepted an invitation.
    ShareAccepted {
        /// The share ID.
        share_id: ShareId,
        /// The accepting recipient.
        recipient_id: RecipientId,
        /// The recipient's user account.
        user_id: UserId,
    },
    /// A recipient rejected an invitation.
    ShareRejected {
        /// The share ID.
        share_id: ShareId,
        /// The rejecting recipient.
        recipient_id: RecipientId,
        /// The recipient's user account.
        user_id: UserId,
    },
    /// A recipient lost access to a share.
    AccessRevoked {
        /// The share ID.
        share_id: ShareId,
        /// The recipient whose access ended.
        recipient_id: RecipientId,
        /// The owner who revoked access.
        owner_id: UserId,
        /// The recipient's email address.
        email: String,
    },
    /// A recipient of an expired share asked for access to be extended.
    AccessRenewalRequested {
        /// The share ID.
        share_id: ShareId,
        /// The requesting recipient.
        recipient_id: RecipientId,
        /// The share owner to notify.
        owner_id: UserId,
        /// The recipient's email address.
        email: String,
    },
    /// The owner extended a share's expiry for a recipient.
    AccessRenewalApproved {
        /// The share ID.
        share_id: ShareId,
        /// The recipient the renewal was requested for.
        recipient_id: RecipientId,
        /// The approving owner.
        owner_id: UserId,
        /// The new expiry.
        expires_at: DateTime<Utc>,
    },
}

impl ShareEvent {
    /// The discriminant used to route this event.
    pub fn kind(&self) -> EventKind {
        match self {
            Self::ShareCreated { .. } => EventKind::ShareCreated,
            Self::RecipientAdded { .. } => EventKind::RecipientAdded,
            Self::ShareAccepted { .. } => EventKind::ShareAccepted,
            Self::ShareRejected { .. } => EventKind::ShareRejected,
            Self::AccessRevoked { .. } => EventKind::AccessRevoked,
            Self::AccessRenewalRequested { .. } => EventKind::AccessRenewalRequested,
            Self::AccessRenewalApproved { .. } => EventKind::AccessRenewalApproved,
        }
    }

    /// The share every event correlates to.
    pub fn share_id(&self) -> ShareId {
        match self {
            Self::ShareCreated { share_id, .. }
            | Self::RecipientAdded { share_id, .. }
            | Self::ShareAccepted { share_id, .. }
            | Self::ShareRejected { share_id, .. }
            | Self::AccessRevoked { share_id, .. }
            | Self::AccessRenewalRequested { share_id, .. }
            | Self::AccessRenewalApproved { share_id, .. } => *share_id,
        }
    }

    /// The recipient the event concerns, if any.
    pub fn recipient_id(&self) -> Option<RecipientId> {
        match self {
            Self::ShareCreated { .. } => None,
            Self::RecipientAdded { recipient_id, .. }
            | Self::ShareAccepted { recipient_id, .. }
            | Self::ShareRejected { recipient_id, .. }
            | Self::AccessRevoked { recipient_id, .. }
            | Self::AccessRenewalRequested { recipient_id, .. }
            | Self::AccessRenewalApproved { recipient_id, .. } => Some(*recipient_id),
        }
    }
}
