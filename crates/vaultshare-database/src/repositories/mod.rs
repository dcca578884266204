//! Repository ports consumed by the share orchestrator.

pub mod audit;
pub mod share;

pub use audit::AuditLogRepository;
pub use share::ShareRepository;
