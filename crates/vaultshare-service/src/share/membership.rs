//! Owner-side use cases that change who holds access to a share.

use chrono::{DateTime, Utc};
use tracing::{info, warn};
use validator::Validate;

use vaultshare_core::error::AppError;
use vaultshare_core::events::ShareEvent;
use vaultshare_core::types::id::{RecipientId, ShareId};
use vaultshare_entity::share::{Recipient, RecipientStatus, ShareEntry, ShareStatus};

use super::access::ensure_transition;
use super::permission;
use super::request::{AddReceiverRequest, AddReceiverResult};
use super::service::ShareService;
use crate::context::RequestContext;

impl ShareService {
    /// Invites a user to a share. Owner only.
    pub async fn add_receiver(
        &self,
        ctx: &RequestContext,
        share_id: ShareId,
        req: AddReceiverRequest,
    ) -> Result<AddReceiverResult, AppError> {
        let share = self.load_share(share_id, "load share for add recipient").await?;
        permission::require_owner(&share, ctx.user_id, "add recipients")?;

        req.validate()?;
        if req.user_id == share.owner_id {
            return Err(AppError::validation(
                "The owner cannot be invited to their own share",
            ));
        }
        if share.recipient_for_user(req.user_id).is_some() {
            warn!(
                share_id = %share_id,
                user_id = %req.user_id,
                "Recipient already invited"
            );
            return Err(AppError::conflict(format!(
                "User {} is already a recipient of share {share_id}",
                req.user_id
            )));
        }
        let active = share
            .recipients
            .iter()
            .filter(|r| r.status.has_access())
            .count();
        if active >= self.config.max_recipients_per_share {
            warn!(
                share_id = %share_id,
                limit = self.config.max_recipients_per_share,
                "Recipient limit reached"
            );
            return Err(AppError::conflict(format!(
                "Share {share_id} already has {active} recipients"
            )));
        }

        let recipient = Recipient::invite(share_id, req.user_id, req.name, req.email, req.role)
            .with_public_key(req.public_key)
            .with_blob(req.encrypted_blob);

        self.share_repo
            .create_recipient(&recipient)
            .await
            .map_err(|e| e.in_operation("create recipient"))?;

        info!(
            user_id = %ctx.user_id,
            share_id = %share_id,
            recipient_id = %recipient.id,
            role = %recipient.role,
            "Recipient added"
        );

        self.emit(
            ctx.user_id,
            ShareEvent::RecipientAdded {
                share_id,
                recipient_id: recipient.id,
                email: recipient.email.clone(),
            },
        )
        .await;

        Ok(AddReceiverResult {
            share_id,
            recipient_id: recipient.id,
            message: "Recipient added".to_string(),
        })
    }

    /// Withdraws an accepted recipient's access. Owner only.
    pub async fn revoke_access(
        &self,
        ctx: &RequestContext,
        share_id: ShareId,
        recipient_id: RecipientId,
    ) -> Result<(), AppError> {
        let share = self.load_share(share_id, "load share for revoke").await?;
        permission::require_owner(&share, ctx.user_id, "revoke access")?;

        let recipient = find_recipient(&share, recipient_id)?;
        ensure_transition(recipient, RecipientStatus::Revoked)?;

        self.share_repo
            .mark_recipient_revoked(recipient_id)
            .await
            .map_err(|e| e.in_operation("mark recipient revoked"))?;

        info!(
            user_id = %ctx.user_id,
            share_id = %share_id,
            recipient_id = %recipient_id,
            "Access revoked"
        );

        self.emit(
            ctx.user_id,
            ShareEvent::AccessRevoked {
                share_id,
                recipient_id,
                owner_id: share.owner_id,
                email: recipient.email.clone(),
            },
        )
        .await;

        Ok(())
    }

    /// Extends the share's expiry in answer to a recipient's renewal
    /// request. Owner only.
    pub async fn approve_access_renewal(
        &self,
        ctx: &RequestContext,
        share_id: ShareId,
        recipient_id: RecipientId,
        expires_at: DateTime<Utc>,
    ) -> Result<ShareEntry, AppError> {
        let mut share = self.load_share(share_id, "load share for renewal").await?;
        permission::require_owner(&share, ctx.user_id, "approve access renewal")?;
        let recipient = find_recipient(&share, recipient_id)?;
        if !recipient.status.has_access() {
            warn!(
                share_id = %share_id,
                recipient_id = %recipient_id,
                status = ?recipient.status,
                "Renewal refused: recipient has no access"
            );
            return Err(AppError::conflict(format!(
                "Recipient {recipient_id} no longer holds access to share {share_id}"
            )));
        }

        if expires_at <= ctx.request_time {
            return Err(AppError::validation("expires_at must be in the future"));
        }

        share.expires_at = Some(expires_at);
        share.status = ShareStatus::Active;
        share.updated_at = Utc::now();

        self.share_repo
            .save(&share)
            .await
            .map_err(|e| e.in_operation("save renewed share"))?;

        info!(
            user_id = %ctx.user_id,
            share_id = %share_id,
            recipient_id = %recipient_id,
            expires_at = %expires_at,
            "Access renewal approved"
        );

        self.emit(
            ctx.user_id,
            ShareEvent::AccessRenewalApproved {
                share_id,
                recipient_id,
                owner_id: share.owner_id,
                expires_at,
            },
        )
        .await;

        Ok(share)
    }
}

fn find_recipient(share: &ShareEntry, recipient_id: RecipientId) -> Result<&Recipient, AppError> {
    share.recipient(recipient_id).ok_or_else(|| {
        AppError::not_found(format!(
            "Recipient {recipient_id} not found on share {}",
            share.id
        ))
    })
}
