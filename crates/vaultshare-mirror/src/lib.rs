//! # vaultshare-mirror
//!
//! The remote share service is the system of record for share creation
//! and listing. This crate defines the narrow [`MirrorClient`] port the
//! orchestrator calls, an HTTP implementation, and an in-process loopback
//! used when no remote endpoint is configured.

pub mod client;
pub mod http;
pub mod loopback;

pub use client::MirrorClient;
pub use http::HttpMirrorClient;
pub use loopback::LoopbackMirrorClient;
