//! Event handler trait and a closure adapter.

use std::fmt;
use std::future::Future;

use async_trait::async_trait;

use vaultshare_core::events::DomainEvent;
use vaultshare_core::result::AppResult;

/// A consumer of dispatched domain events.
///
/// Each invocation runs in its own task. A returned error, a panic, or a
/// timeout is logged by the dispatcher and does not affect other handlers.
#[async_trait]
pub trait EventHandler: Send + Sync + fmt::Debug {
    /// Handles one event.
    async fn handle(&self, event: &DomainEvent) -> AppResult<()>;

    /// Name used in logs.
    fn name(&self) -> &str;
}

/// Adapts an async closure into an [`EventHandler`].
pub struct FnHandler<F> {
    name: String,
    f: F,
}

impl<F> FnHandler<F> {
    /// Wrap `f` under the given handler name.
    pub fn new<Fut>(name: impl Into<String>, f: F) -> Self
    where
        F: Fn(DomainEvent) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = AppResult<()>> + Send + 'static,
    {
        Self {
            name: name.into(),
            f,
        }
    }
}

impl<F> fmt::Debug for FnHandler<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnHandler").field("name", &self.name).finish()
    }
}

#[async_trait]
impl<F, Fut> EventHandler for FnHandler<F>
where
    F: Fn(DomainEvent) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = AppResult<()>> + Send + 'static,
{
    async fn handle(&self, event: &DomainEvent) -> AppResult<()> {
        (self.f)(event.clone()).await
    }

    fn name(&self) -> &str {
        &self.name
    }
}
