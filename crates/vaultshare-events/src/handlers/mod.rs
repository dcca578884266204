//! Built-in event consumers.

pub mod audit;
pub mod log_stream;

pub use audit::AuditTrailHandler;
pub use log_stream::LogStreamHandler;
