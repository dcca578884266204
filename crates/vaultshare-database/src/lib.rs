//! # vaultshare-database
//!
//! Persistence boundary for VaultShare. The [`repositories`] module holds
//! the ports the orchestrator depends on; [`memory`] holds the in-memory
//! reference implementations. Any store implementing the ports
//! (relational, document, in-memory) is interchangeable.

pub mod memory;
pub mod repositories;

pub use memory::{InMemoryAuditLogRepository, InMemoryShareRepository};
pub use repositories::{AuditLogRepository, ShareRepository};
