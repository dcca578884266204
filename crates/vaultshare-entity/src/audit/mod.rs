//! Audit trail entities.

pub mod model;

pub use model::{AuditLog, CreateAuditLog};
