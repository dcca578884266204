//! Share lifecycle use cases.

pub mod access;
pub mod membership;
pub mod permission;
pub mod request;
pub mod service;

pub use request::{
    AcceptShareResult, AddReceiverRequest, AddReceiverResult, CreateShareRequest,
    InvitationPreview, RejectShareResult, RenewalRequestResult,
};
pub use service::ShareService;
