//! In-memory reference repositories.
//!
//! Each port call takes the store lock once, so every call is atomic on
//! its own. Calls from different requests interleave freely and the last
//! write wins.

pub mod audit;
pub mod share;

pub use audit::InMemoryAuditLogRepository;
pub use share::InMemoryShareRepository;
