//! # vaultshare-core
//!
//! Core crate for VaultShare. Contains configuration schemas, typed
//! identifiers, the share domain events, and the unified error system.
//!
//! This crate has **no** internal dependencies on other VaultShare crates.

pub mod config;
pub mod error;
pub mod events;
pub mod result;
pub mod types;

pub use error::{AppError, ErrorKind};
pub use result::AppResult;
