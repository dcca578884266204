//! Recipient-side use cases: previewing, accepting, and rejecting an
//! invitation, and asking the owner for renewed access.

use tracing::{info, warn};

use vaultshare_core::error::AppError;
use vaultshare_core::events::ShareEvent;
use vaultshare_core::types::id::ShareId;
use vaultshare_entity::share::{Recipient, RecipientStatus};

use super::request::{AcceptShareResult, InvitationPreview, RejectShareResult, RenewalRequestResult};
use super::service::ShareService;
use crate::context::RequestContext;

impl ShareService {
    /// Reads the share, the caller's recipient record, and the blob sealed
    /// for the caller. Changes nothing.
    pub async fn get_share_for_accept(
        &self,
        ctx: &RequestContext,
        share_id: ShareId,
    ) -> Result<InvitationPreview, AppError> {
        let (share, recipient, blob) = self
            .share_repo
            .get_share_for_accept(share_id, ctx.user_id)
            .await
            .map_err(|e| e.in_operation("load invitation"))?;

        Ok(InvitationPreview {
            share,
            recipient,
            blob,
        })
    }

    /// Accepts the caller's invitation and hands back the sealed blob.
    ///
    /// Fails with `ShareExpired` once the share's expiry has passed, leaving
    /// the recipient untouched.
    pub async fn accept_share(
        &self,
        ctx: &RequestContext,
        share_id: ShareId,
    ) -> Result<AcceptShareResult, AppError> {
        let (share, recipient) = self
            .share_repo
            .get_share_and_recipient(share_id, ctx.user_id)
            .await
            .map_err(|e| e.in_operation("load share for accept"))?;

        if share.is_expired_at(ctx.request_time) {
            warn!(
                share_id = %share_id,
                recipient_id = %recipient.id,
                expires_at = ?share.expires_at,
                "Acceptance refused: share expired"
            );
            return Err(AppError::share_expired(format!("Share {share_id} has expired")));
        }

        ensure_transition(&recipient, RecipientStatus::Accepted)?;

        if recipient.status == RecipientStatus::Accepted {
            let blob = recipient.encrypted_blob.clone();
            return Ok(AcceptShareResult {
                share,
                recipient,
                blob,
            });
        }

        if self.config.mirror_transitions {
            let token = ctx.require_token()?;
            let _session = self.mirror_session.lock().await;
            self.mirror.set_token(token).await;
            self.mirror
                .accept_share(share_id)
                .await
                .map_err(|e| e.in_operation("accept share via mirror"))?;
        }

        self.share_repo
            .mark_recipient_accepted(recipient.id)
            .await
            .map_err(|e| e.in_operation("mark recipient accepted"))?;

        let (share, recipient) = self
            .share_repo
            .get_share_and_recipient(share_id, ctx.user_id)
            .await
            .map_err(|e| e.in_operation("reload accepted share"))?;

        info!(
            user_id = %ctx.user_id,
            share_id = %share_id,
            recipient_id = %recipient.id,
            "Share accepted"
        );

        self.emit(
            ctx.user_id,
            ShareEvent::ShareAccepted {
                share_id,
                recipient_id: recipient.id,
                user_id: ctx.user_id,
            },
        )
        .await;

        let blob = recipient.encrypted_blob.clone();
        Ok(AcceptShareResult {
            share,
            recipient,
            blob,
        })
    }

    /// Rejects the caller's invitation. The recipient record stays, its
    /// blob is dropped. Expired invitations may still be rejected.
    pub async fn reject_share(
        &self,
        ctx: &RequestContext,
        share_id: ShareId,
    ) -> Result<RejectShareResult, AppError> {
        let (_, recipient) = self
            .share_repo
            .get_share_and_recipient(share_id, ctx.user_id)
            .await
            .map_err(|e| e.in_operation("load share for reject"))?;

        ensure_transition(&recipient, RecipientStatus::Rejected)?;

        let result = RejectShareResult {
            share_id,
            recipient_id: recipient.id,
            message: "Share rejected".to_string(),
        };

        if recipient.status == RecipientStatus::Rejected {
            return Ok(result);
        }

        if self.config.mirror_transitions {
            let token = ctx.require_token()?;
            let _session = self.mirror_session.lock().await;
            self.mirror.set_token(token).await;
            self.mirror
                .reject_share(share_id)
                .await
                .map_err(|e| e.in_operation("reject share via mirror"))?;
        }

        self.share_repo
            .mark_recipient_rejected(recipient.id)
            .await
            .map_err(|e| e.in_operation("mark recipient rejected"))?;

        info!(
            user_id = %ctx.user_id,
            share_id = %share_id,
            recipient_id = %recipient.id,
            "Share rejected"
        );

        self.emit(
            ctx.user_id,
            ShareEvent::ShareRejected {
                share_id,
                recipient_id: recipient.id,
                user_id: ctx.user_id,
            },
        )
        .await;

        Ok(result)
    }

    /// Asks the owner of an expired share to extend it. Changes nothing
    /// locally; the owner learns about it through `AccessRenewalRequested`.
    pub async fn request_access_renewal(
        &self,
        ctx: &RequestContext,
        share_id: ShareId,
    ) -> Result<RenewalRequestResult, AppError> {
        let (share, recipient) = self
            .share_repo
            .get_share_and_recipient(share_id, ctx.user_id)
            .await
            .map_err(|e| e.in_operation("load share for renewal request"))?;

        if !share.is_expired_at(ctx.request_time) {
            return Err(AppError::validation(format!(
                "Share {share_id} has not expired"
            )));
        }
        if !recipient.status.has_access() {
            warn!(
                share_id = %share_id,
                recipient_id = %recipient.id,
                status = ?recipient.status,
                "Renewal refused: recipient has no access"
            );
            return Err(AppError::conflict(format!(
                "Recipient {} can no longer request access",
                recipient.id
            )));
        }

        info!(
            user_id = %ctx.user_id,
            share_id = %share_id,
            recipient_id = %recipient.id,
            "Access renewal requested"
        );

        self.emit(
            ctx.user_id,
            ShareEvent::AccessRenewalRequested {
                share_id,
                recipient_id: recipient.id,
                owner_id: share.owner_id,
                email: recipient.email.clone(),
            },
        )
        .await;

        Ok(RenewalRequestResult {
            share_id,
            recipient_id: recipient.id,
            message: "Renewal requested".to_string(),
        })
    }
}

/// Fails with `Conflict` unless the recipient may move to `next`.
pub(super) fn ensure_transition(recipient: &Recipient, next: RecipientStatus) -> Result<(), AppError> {
    if recipient.status.can_transition_to(next) {
        return Ok(());
    }
    warn!(
        share_id = %recipient.share_id,
        recipient_id = %recipient.id,
        from = ?recipient.status,
        to = ?next,
        "Invalid recipient transition"
    );
    Err(AppError::conflict(format!(
        "Recipient {} cannot move from {:?} to {:?}",
        recipient.id, recipient.status, next
    )))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::{Duration, Utc};

    use super::*;
    use vaultshare_core::config::sharing::SharingConfig;
    use vaultshare_core::error::ErrorKind;
    use vaultshare_core::types::id::UserId;
    use vaultshare_database::repositories::ShareRepository;
    use vaultshare_database::InMemoryShareRepository;
    use vaultshare_entity::share::{AccessMode, CreateShareEntry, RecipientRole, ShareEntry};
    use vaultshare_mirror::LoopbackMirrorClient;

    struct Fixture {
        repo: Arc<InMemoryShareRepository>,
        service: ShareService,
        share: ShareEntry,
        bob: UserId,
    }

    async fn fixture(expires_in: Option<Duration>) -> Fixture {
        let repo = Arc::new(InMemoryShareRepository::new());
        let mut share = CreateShareEntry {
            owner_id: UserId::new(),
            name: "Bank".to_string(),
            entry_type: "login".to_string(),
            entry_snapshot: serde_json::Value::Null,
            access_mode: AccessMode::ReadOnly,
            encrypted: true,
            expires_at: None,
            allow_download: true,
        }
        .into_entry();
        share.expires_at = expires_in.map(|d| Utc::now() + d);
        repo.save(&share).await.unwrap();

        let bob = UserId::new();
        let recipient = Recipient::invite(share.id, bob, "Bob", "bob@x.com", RecipientRole::Viewer)
            .with_blob(Some(b"sealed".to_vec()));
        repo.create_recipient(&recipient).await.unwrap();

        let service = ShareService::new(
            repo.clone(),
            Arc::new(LoopbackMirrorClient::new(repo.clone())),
            SharingConfig::default(),
        );
        Fixture {
            repo,
            service,
            share,
            bob,
        }
    }

    #[tokio::test]
    async fn test_accept_returns_blob_and_marks_accepted() {
        let f = fixture(None).await;
        let result = f
            .service
            .accept_share(&RequestContext::new(f.bob), f.share.id)
            .await
            .unwrap();
        assert_eq!(result.blob, Some(b"sealed".to_vec()));
        assert_eq!(result.recipient.status, RecipientStatus::Accepted);
        assert!(result.recipient.joined_at.is_some());

        let (stored_share, stored) = f.repo.get_share_and_recipient(f.share.id, f.bob).await.unwrap();
        assert_eq!(stored.status, RecipientStatus::Accepted);
        assert_eq!(result.recipient, stored);
        assert_eq!(result.share, stored_share);
    }

    #[tokio::test]
    async fn test_accept_is_idempotent() {
        let f = fixture(None).await;
        let ctx = RequestContext::new(f.bob);
        f.service.accept_share(&ctx, f.share.id).await.unwrap();
        let again = f.service.accept_share(&ctx, f.share.id).await.unwrap();
        assert_eq!(again.recipient.status, RecipientStatus::Accepted);
    }

    #[tokio::test]
    async fn test_expired_share_cannot_be_accepted_but_can_be_rejected() {
        let f = fixture(Some(Duration::days(-1))).await;
        let ctx = RequestContext::new(f.bob);

        let err = f.service.accept_share(&ctx, f.share.id).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::ShareExpired);
        let (_, stored) = f.repo.get_share_and_recipient(f.share.id, f.bob).await.unwrap();
        assert_eq!(stored.status, RecipientStatus::Invited);

        let rejected = f.service.reject_share(&ctx, f.share.id).await.unwrap();
        assert_eq!(rejected.message, "Share rejected");
    }

    #[tokio::test]
    async fn test_rejected_recipient_cannot_accept() {
        let f = fixture(None).await;
        let ctx = RequestContext::new(f.bob);
        f.service.reject_share(&ctx, f.share.id).await.unwrap();

        let err = f.service.accept_share(&ctx, f.share.id).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Conflict);
    }

    #[tokio::test]
    async fn test_preview_changes_nothing() {
        let f = fixture(None).await;
        let preview = f
            .service
            .get_share_for_accept(&RequestContext::new(f.bob), f.share.id)
            .await
            .unwrap();
        assert_eq!(preview.recipient.status, RecipientStatus::Invited);
        assert_eq!(preview.blob, Some(b"sealed".to_vec()));

        let err = f
            .service
            .get_share_for_accept(&RequestContext::new(UserId::new()), f.share.id)
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::RecipientNotAllowed);
    }

    #[tokio::test]
    async fn test_renewal_only_for_expired_shares() {
        let live = fixture(Some(Duration::days(1))).await;
        let err = live
            .service
            .request_access_renewal(&RequestContext::new(live.bob), live.share.id)
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);

        let expired = fixture(Some(Duration::hours(-1))).await;
        let ctx = RequestContext::new(expired.bob);
        let result = expired
            .service
            .request_access_renewal(&ctx, expired.share.id)
            .await
            .unwrap();
        assert_eq!(result.share_id, expired.share.id);

        expired.service.reject_share(&ctx, expired.share.id).await.unwrap();
        let err = expired
            .service
            .request_access_renewal(&ctx, expired.share.id)
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Conflict);
    }

    #[tokio::test]
    async fn test_mirrored_accept_requires_token() {
        let mut f = fixture(None).await;
        f.service.config.mirror_transitions = true;

        let err = f
            .service
            .accept_share(&RequestContext::new(f.bob), f.share.id)
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);

        let ctx = RequestContext::new(f.bob).with_token(f.bob.to_string());
        let result = f.service.accept_share(&ctx, f.share.id).await.unwrap();
        assert_eq!(result.recipient.status, RecipientStatus::Accepted);
    }
}
