//! # vaultshare-service
//!
//! Share lifecycle orchestration. [`ShareService`] drives every use case:
//! it checks permissions, reads and writes through the share repository,
//! calls the mirror client where it is the system of record, and emits a
//! domain event for each completed transition.
//!
//! Dependencies are injected at construction time via `Arc` references.

pub mod context;
pub mod share;

pub use context::RequestContext;
pub use share::{
    AcceptShareResult, AddReceiverRequest, AddReceiverResult, CreateShareRequest,
    InvitationPreview, RejectShareResult, RenewalRequestResult, ShareService,
};
