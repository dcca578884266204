//! # vaultshare-events
//!
//! Decouples share state transitions from the consumers that audit, log,
//! or notify about them. Producers hand a [`DomainEvent`] to the
//! [`EventDispatcher`]; every handler registered for the event's kind runs
//! in its own task and the producer does not wait for any of them.
//!
//! Dispatch is best effort: nothing is persisted, retried, or replayed.
//!
//! [`DomainEvent`]: vaultshare_core::events::DomainEvent

pub mod dispatcher;
pub mod handler;
pub mod handlers;
pub mod registry;

pub use dispatcher::EventDispatcher;
pub use handler::{EventHandler, FnHandler};
pub use handlers::{AuditTrailHandler, LogStreamHandler};
pub use registry::EventRegistry;
