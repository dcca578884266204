//! Shared test helpers for integration tests.

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::{Mutex, RwLock, mpsc};

use vaultshare_core::config::events::EventsConfig;
use vaultshare_core::config::sharing::SharingConfig;
use vaultshare_core::error::AppError;
use vaultshare_core::events::{DomainEvent, EventKind};
use vaultshare_core::result::AppResult;
use vaultshare_core::types::id::{ShareId, UserId};
use vaultshare_database::{InMemoryAuditLogRepository, InMemoryShareRepository};
use vaultshare_entity::share::ShareEntry;
use vaultshare_events::{AuditTrailHandler, EventDispatcher, EventHandler, FnHandler};
use vaultshare_mirror::{LoopbackMirrorClient, MirrorClient};
use vaultshare_service::{CreateShareRequest, RequestContext, ShareService};

/// Test application context
pub struct TestApp {
    /// The orchestrator under test
    pub service: ShareService,
    /// Backing share repository for direct reads
    pub share_repo: Arc<InMemoryShareRepository>,
    /// Backing audit repository
    pub audit_repo: Arc<InMemoryAuditLogRepository>,
    /// Dispatcher wired into the service
    pub dispatcher: Arc<EventDispatcher>,
    /// Every dispatched event, in dispatch order of arrival
    pub events: mpsc::UnboundedReceiver<DomainEvent>,
}

impl TestApp {
    /// Service over the loopback mirror with default policies
    pub async fn new() -> Self {
        Self::with_config(SharingConfig::default()).await
    }

    /// Service over the loopback mirror with custom policies
    pub async fn with_config(config: SharingConfig) -> Self {
        let share_repo = Arc::new(InMemoryShareRepository::new());
        let mirror = Arc::new(LoopbackMirrorClient::new(share_repo.clone()));
        Self::build(share_repo, mirror, config).await
    }

    /// Service over a custom mirror
    pub async fn with_mirror(mirror: Arc<dyn MirrorClient>, config: SharingConfig) -> Self {
        Self::build(Arc::new(InMemoryShareRepository::new()), mirror, config).await
    }

    async fn build(
        share_repo: Arc<InMemoryShareRepository>,
        mirror: Arc<dyn MirrorClient>,
        config: SharingConfig,
    ) -> Self {
        let audit_repo = Arc::new(InMemoryAuditLogRepository::new());
        let dispatcher = Arc::new(EventDispatcher::new(&EventsConfig::default()));
        dispatcher
            .register_all(Arc::new(AuditTrailHandler::new(audit_repo.clone())))
            .await;

        let (tx, events) = mpsc::unbounded_channel();
        dispatcher.register_all(recording_handler(tx)).await;

        let service =
            ShareService::new(share_repo.clone(), mirror, config).with_events(dispatcher.clone());

        Self {
            service,
            share_repo,
            audit_repo,
            dispatcher,
            events,
        }
    }

    /// Creates the "Bank" login share owned by `owner`
    pub async fn create_bank_share(&self, owner: UserId) -> ShareEntry {
        self.service
            .create_share(&ctx(owner), CreateShareRequest::new("Bank", "login"))
            .await
            .expect("share created")
    }

    /// Waits for the next dispatched event of `kind`, skipping others
    pub async fn next_event(&mut self, kind: EventKind) -> DomainEvent {
        loop {
            let event = tokio::time::timeout(Duration::from_secs(5), self.events.recv())
                .await
                .expect("event dispatched in time")
                .expect("event channel open");
            if event.kind() == kind {
                return event;
            }
        }
    }

    /// Asserts no further event arrives within a short window
    pub async fn assert_no_event(&mut self) {
        let next = tokio::time::timeout(Duration::from_millis(100), self.events.recv()).await;
        assert!(next.is_err(), "unexpected event: {:?}", next);
    }
}

/// Context for `user_id` carrying a loopback-compatible token
pub fn ctx(user_id: UserId) -> RequestContext {
    RequestContext::new(user_id).with_token(user_id.to_string())
}

/// Handler forwarding every event into a channel
pub fn recording_handler(tx: mpsc::UnboundedSender<DomainEvent>) -> Arc<dyn EventHandler> {
    Arc::new(FnHandler::new("recorder", move |event: DomainEvent| {
        let tx = tx.clone();
        async move {
            let _ = tx.send(event);
            Ok(())
        }
    }))
}

/// Mirror whose every call fails
#[derive(Debug, Default)]
pub struct FailingMirror;

#[async_trait]
impl MirrorClient for FailingMirror {
    async fn set_token(&self, _token: &str) {}

    async fn create_share(&self, _entry: &ShareEntry) -> AppResult<ShareEntry> {
        Err(AppError::external_service("mirror unavailable"))
    }

    async fn accept_share(&self, _share_id: ShareId) -> AppResult<()> {
        Err(AppError::external_service("mirror unavailable"))
    }

    async fn reject_share(&self, _share_id: ShareId) -> AppResult<()> {
        Err(AppError::external_service("mirror unavailable"))
    }

    async fn get_share_by_me(&self) -> AppResult<Vec<ShareEntry>> {
        Err(AppError::external_service("mirror unavailable"))
    }

    async fn get_share_with_me(&self) -> AppResult<Vec<ShareEntry>> {
        Err(AppError::external_service("mirror unavailable"))
    }
}

/// Loopback mirror that records the bearer token seen by each create
#[derive(Debug)]
pub struct TokenRecordingMirror {
    inner: LoopbackMirrorClient,
    token: RwLock<Option<String>>,
    /// Token in effect for every `create_share` call, in call order
    pub create_tokens: Mutex<Vec<Option<String>>>,
}

impl TokenRecordingMirror {
    pub fn new(repo: Arc<InMemoryShareRepository>) -> Self {
        Self {
            inner: LoopbackMirrorClient::new(repo),
            token: RwLock::new(None),
            create_tokens: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl MirrorClient for TokenRecordingMirror {
    async fn set_token(&self, token: &str) {
        *self.token.write().await = Some(token.to_string());
        self.inner.set_token(token).await;
    }

    async fn create_share(&self, entry: &ShareEntry) -> AppResult<ShareEntry> {
        let token = self.token.read().await.clone();
        self.create_tokens.lock().await.push(token);
        self.inner.create_share(entry).await
    }

    async fn accept_share(&self, share_id: ShareId) -> AppResult<()> {
        self.inner.accept_share(share_id).await
    }

    async fn reject_share(&self, share_id: ShareId) -> AppResult<()> {
        self.inner.reject_share(share_id).await
    }

    async fn get_share_by_me(&self) -> AppResult<Vec<ShareEntry>> {
        self.inner.get_share_by_me().await
    }

    async fn get_share_with_me(&self) -> AppResult<Vec<ShareEntry>> {
        self.inner.get_share_with_me().await
    }
}
