//! Share orchestrator: creation, listing, deletion.
//!
//! Invitation answers live in [`super::access`]; membership changes in
//! [`super::membership`].

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{info, warn};
use validator::Validate;

use vaultshare_core::config::sharing::SharingConfig;
use vaultshare_core::error::AppError;
use vaultshare_core::events::{DomainEvent, ShareEvent};
use vaultshare_core::types::id::{ShareId, UserId};
use vaultshare_database::repositories::ShareRepository;
use vaultshare_entity::share::ShareEntry;
use vaultshare_events::EventDispatcher;
use vaultshare_mirror::MirrorClient;

use super::permission;
use super::request::CreateShareRequest;
use crate::context::RequestContext;

/// Coordinates the share lifecycle across the repository, the mirror
/// client, and the event dispatcher.
///
/// Holds no per-share locks: concurrent mutations of one share race at the
/// repository and the last write wins.
#[derive(Debug)]
pub struct ShareService {
    /// Share aggregate repository.
    pub(super) share_repo: Arc<dyn ShareRepository>,
    /// Remote system of record for creation and listing.
    pub(super) mirror: Arc<dyn MirrorClient>,
    /// Event dispatcher (optional).
    pub(super) events: Option<Arc<EventDispatcher>>,
    /// Lifecycle policies.
    pub(super) config: SharingConfig,
    /// Serializes `set_token` with the mirror call that follows it.
    pub(super) mirror_session: Mutex<()>,
}

impl ShareService {
    /// Creates a new share service without event dispatch.
    pub fn new(
        share_repo: Arc<dyn ShareRepository>,
        mirror: Arc<dyn MirrorClient>,
        config: SharingConfig,
    ) -> Self {
        Self {
            share_repo,
            mirror,
            events: None,
            config,
            mirror_session: Mutex::new(()),
        }
    }

    /// Emits domain events through `dispatcher`.
    pub fn with_events(mut self, dispatcher: Arc<EventDispatcher>) -> Self {
        self.events = Some(dispatcher);
        self
    }

    /// Creates a share through the mirror and stores the mirror's result
    /// locally.
    pub async fn create_share(
        &self,
        ctx: &RequestContext,
        req: CreateShareRequest,
    ) -> Result<ShareEntry, AppError> {
        req.validate()?;
        if req.expires_at.is_some_and(|at| at <= ctx.request_time) {
            return Err(AppError::validation("expires_at must be in the future"));
        }

        let token = ctx.require_token()?;

        let entry = req.into_create(ctx.user_id).into_entry();

        let created = {
            let _session = self.mirror_session.lock().await;
            self.mirror.set_token(token).await;
            self.mirror
                .create_share(&entry)
                .await
                .map_err(|e| e.in_operation("create share via mirror"))?
        };

        self.share_repo
            .save(&created)
            .await
            .map_err(|e| e.in_operation("store created share"))?;

        info!(
            user_id = %ctx.user_id,
            share_id = %created.id,
            entry_type = %created.entry_type,
            "Share created"
        );

        self.emit(
            ctx.user_id,
            ShareEvent::ShareCreated {
                share_id: created.id,
                owner_id: created.owner_id,
            },
        )
        .await;

        Ok(created)
    }

    /// Lists shares created by the caller, read through the mirror.
    pub async fn list_shared_entries(
        &self,
        ctx: &RequestContext,
    ) -> Result<Vec<ShareEntry>, AppError> {
        let token = ctx.require_token()?;
        let _session = self.mirror_session.lock().await;
        self.mirror.set_token(token).await;
        self.mirror
            .get_share_by_me()
            .await
            .map_err(|e| e.in_operation("list shares by me"))
    }

    /// Lists shares received by the caller, read through the mirror.
    pub async fn list_received_shares(
        &self,
        ctx: &RequestContext,
    ) -> Result<Vec<ShareEntry>, AppError> {
        let token = ctx.require_token()?;
        let _session = self.mirror_session.lock().await;
        self.mirror.set_token(token).await;
        self.mirror
            .get_share_with_me()
            .await
            .map_err(|e| e.in_operation("list shares with me"))
    }

    /// Deletes a share with all its recipients. Owner only.
    ///
    /// Every recipient that still held or could still gain access gets an
    /// `AccessRevoked` event.
    pub async fn delete_share(&self, ctx: &RequestContext, share_id: ShareId) -> Result<(), AppError> {
        let share = self.load_share(share_id, "delete share").await?;
        permission::require_owner(&share, ctx.user_id, "delete the share")?;

        let removed = self
            .share_repo
            .delete(share_id)
            .await
            .map_err(|e| e.in_operation("delete share"))?;
        if !removed {
            warn!(share_id = %share_id, "Share vanished before delete");
            return Err(AppError::not_found(format!("Share {share_id} not found")));
        }

        info!(
            user_id = %ctx.user_id,
            share_id = %share_id,
            recipients = share.recipients.len(),
            "Share deleted"
        );

        for recipient in share.recipients.iter().filter(|r| r.status.has_access()) {
            self.emit(
                ctx.user_id,
                ShareEvent::AccessRevoked {
                    share_id,
                    recipient_id: recipient.id,
                    owner_id: share.owner_id,
                    email: recipient.email.clone(),
                },
            )
            .await;
        }

        Ok(())
    }

    /// Loads a share, naming `operation` if the repository fails.
    pub(super) async fn load_share(
        &self,
        share_id: ShareId,
        operation: &str,
    ) -> Result<ShareEntry, AppError> {
        self.share_repo
            .get_by_id(share_id)
            .await
            .map_err(|e| e.in_operation(operation))
    }

    /// Hands an event to the dispatcher, if one is configured.
    pub(super) async fn emit(&self, actor_id: UserId, payload: ShareEvent) {
        if let Some(ref events) = self.events {
            events.dispatch(DomainEvent::new(actor_id, payload)).await;
        }
    }
}
