//! Permission rules over (share, actor) pairs.
//!
//! Ownership is the only trust boundary: accepting a share never gives a
//! recipient owner rights.

use tracing::warn;

use vaultshare_core::error::AppError;
use vaultshare_core::result::AppResult;
use vaultshare_core::types::id::UserId;
use vaultshare_entity::share::ShareEntry;

/// Whether `requester_id` may change the membership of `share`.
pub fn can_add_recipient(share: &ShareEntry, requester_id: UserId) -> bool {
    requester_id == share.owner_id
}

/// Fails with `PermissionDenied` unless [`can_add_recipient`] holds.
pub fn require_owner(share: &ShareEntry, requester_id: UserId, action: &str) -> AppResult<()> {
    if can_add_recipient(share, requester_id) {
        return Ok(());
    }
    warn!(
        share_id = %share.id,
        requester_id = %requester_id,
        action,
        "Permission denied: requester does not own the share"
    );
    Err(AppError::permission_denied(format!(
        "Only the share owner may {action}"
    )))
}
