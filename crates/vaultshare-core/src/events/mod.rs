//! Domain events emitted by share lifecycle transitions.
//!
//! Events are created exactly once, at the moment of the triggering state
//! transition, and handed to the event dispatcher. They are consumed by the
//! audit trail, the log stream, and any other registered handler.

pub mod share;

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::types::id::{EventId, ShareId, UserId};

pub use share::ShareEvent;

/// Discriminant of a [`ShareEvent`], used as the dispatch key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    /// `ShareCreated`
    ShareCreated,
    /// `RecipientAdded`
    RecipientAdded,
    /// `ShareAccepted`
    ShareAccepted,
    /// `ShareRejected`
    ShareRejected,
    /// `AccessRevoked`
    AccessRevoked,
    /// `AccessRenewalRequested`
    AccessRenewalRequested,
    /// `AccessRenewalApproved`
    AccessRenewalApproved,
}

impl EventKind {
    /// Every event kind, in declaration order.
    pub const ALL: [EventKind; 7] = [
        Self::ShareCreated,
        Self::RecipientAdded,
        Self::ShareAccepted,
        Self::ShareRejected,
        Self::AccessRevoked,
        Self::AccessRenewalRequested,
        Self::AccessRenewalApproved,
    ];

    /// The event name as seen by consumers.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ShareCreated => "ShareCreated",
            Self::RecipientAdded => "RecipientAdded",
            Self::ShareAccepted => "ShareAccepted",
            Self::ShareRejected => "ShareRejected",
            Self::AccessRevoked => "AccessRevoked",
            Self::AccessRenewalRequested => "AccessRenewalRequested",
            Self::AccessRenewalApproved => "AccessRenewalApproved",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| AppError::validation(format!("Unknown event name '{s}'")))
    }
}

/// Envelope for a share domain event with its metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainEvent {
    /// Unique event ID.
    pub id: EventId,
    /// When the transition occurred.
    pub occurred_at: DateTime<Utc>,
    /// The user whose request caused the transition.
    pub actor_id: UserId,
    /// The event payload.
    pub payload: ShareEvent,
}

impl DomainEvent {
    /// Create a new domain event stamped with the current time.
    pub fn new(actor_id: UserId, payload: ShareEvent) -> Self {
        Self {
            id: EventId::new(),
            occurred_at: Utc::now(),
            actor_id,
            payload,
        }
    }

    /// The dispatch key of this event.
    pub fn kind(&self) -> EventKind {
        self.payload.kind()
    }

    /// The event name, e.g. `"RecipientAdded"`.
    pub fn event_name(&self) -> &'static str {
        self.kind().as_str()
    }

    /// The share this event correlates to.
    pub fn share_id(&self) -> ShareId {
        self.payload.share_id()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::id::RecipientId;

    #[test]
    fn test_event_kind_round_trips_through_name() {
        for kind in EventKind::ALL {
            let parsed: EventKind = kind.as_str().parse().expect("known name");
            assert_eq!(parsed, kind);
        }
        assert!("ShareDeleted".parse::<EventKind>().is_err());
    }

    #[test]
    fn test_envelope_exposes_payload_correlation() {
        let share_id = ShareId::new();
        let event = DomainEvent::new(
            UserId::new(),
            ShareEvent::RecipientAdded {
                share_id,
                recipient_id: RecipientId::new(),
                email: "bob@x.com".to_string(),
            },
        );
        assert_eq!(event.event_name(), "RecipientAdded");
        assert_eq!(event.share_id(), share_id);
    }

    #[test]
    fn test_payload_serializes_with_type_tag() {
        let event = ShareEvent::ShareCreated {
            share_id: ShareId::new(),
            owner_id: UserId::new(),
        };
        let json = serde_json::to_value(&event).expect("serialize");
        assert_eq!(json["type"], "ShareCreated");
    }
}
