//! # vaultshare-entity
//!
//! Domain models for VaultShare. The [`share::ShareEntry`] aggregate owns
//! its [`share::Recipient`]s and is persisted and loaded as one unit;
//! [`audit::AuditLog`] rows are append-only records of dispatched events.

pub mod audit;
pub mod share;
