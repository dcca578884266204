//! HTTP implementation of the mirror client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, Response};
use tokio::sync::RwLock;
use tracing::{debug, error};

use vaultshare_core::config::mirror::MirrorConfig;
use vaultshare_core::error::{AppError, ErrorKind};
use vaultshare_core::result::AppResult;
use vaultshare_core::types::id::ShareId;
use vaultshare_entity::share::ShareEntry;

use crate::client::MirrorClient;

/// Talks to the remote share API over HTTP with a bearer token.
///
/// Routes:
/// - `POST /shares`
/// - `POST /shares/{id}/accept`, `POST /shares/{id}/reject`
/// - `GET /shares/by-me`, `GET /shares/with-me`
#[derive(Debug)]
pub struct HttpMirrorClient {
    http: reqwest::Client,
    base_url: String,
    token: RwLock<Option<String>>,
}

impl HttpMirrorClient {
    /// Build a client from the mirror configuration.
    pub fn new(config: &MirrorConfig) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Configuration,
                    "Failed to build mirror HTTP client",
                    e,
                )
            })?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: RwLock::new(None),
        })
    }

    /// Absolute URL for an API path.
    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self.http.request(method, self.url(path));
        match self.token.read().await.as_deref() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Send a request and turn transport errors and non-2xx statuses into
    /// external-service errors.
    async fn send(&self, builder: RequestBuilder, operation: &str) -> AppResult<Response> {
        let response = builder.send().await.map_err(|e| {
            error!(operation, error = %e, "Mirror request failed");
            AppError::with_source(
                ErrorKind::ExternalService,
                format!("Mirror {operation} request failed"),
                e,
            )
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(operation, status = %status, "Mirror returned an error status");
            return Err(AppError::external_service(format!(
                "Mirror {operation} returned {status}: {body}"
            )));
        }

        debug!(operation, status = %status, "Mirror request succeeded");
        Ok(response)
    }

    async fn decode<T: serde::de::DeserializeOwned>(
        response: Response,
        operation: &str,
    ) -> AppResult<T> {
        response.json::<T>().await.map_err(|e| {
            AppError::with_source(
                ErrorKind::ExternalService,
                format!("Mirror {operation} returned an unreadable body"),
                e,
            )
        })
    }
}

#[async_trait]
impl MirrorClient for HttpMirrorClient {
    async fn set_token(&self, token: &str) {
        *self.token.write().await = Some(token.to_string());
    }

    async fn create_share(&self, entry: &ShareEntry) -> AppResult<ShareEntry> {
        let builder = self.request(Method::POST, "shares").await.json(entry);
        let response = self.send(builder, "create share").await?;
        Self::decode(response, "create share").await
    }

    async fn accept_share(&self, share_id: ShareId) -> AppResult<()> {
        let builder = self
            .request(Method::POST, &format!("shares/{share_id}/accept"))
            .await;
        self.send(builder, "accept share").await?;
        Ok(())
    }

    async fn reject_share(&self, share_id: ShareId) -> AppResult<()> {
        let builder = self
            .request(Method::POST, &format!("shares/{share_id}/reject"))
            .await;
        self.send(builder, "reject share").await?;
        Ok(())
    }

    async fn get_share_by_me(&self) -> AppResult<Vec<ShareEntry>> {
        let builder = self.request(Method::GET, "shares/by-me").await;
        let response = self.send(builder, "list shares by me").await?;
        Self::decode(response, "list shares by me").await
    }

    async fn get_share_with_me(&self) -> AppResult<Vec<ShareEntry>> {
        let builder = self.request(Method::GET, "shares/with-me").await;
        let response = self.send(builder, "list shares with me").await?;
        Self::decode(response, "list shares with me").await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(base_url: &str) -> MirrorConfig {
        MirrorConfig {
            base_url: base_url.to_string(),
            timeout_seconds: 2,
            ..MirrorConfig::default()
        }
    }

    #[test]
    fn test_url_joins_without_double_slash() {
        let client = HttpMirrorClient::new(&config("http://mirror.local/api/")).unwrap();
        assert_eq!(client.url("/shares"), "http://mirror.local/api/shares");
        assert_eq!(client.url("shares/by-me"), "http://mirror.local/api/shares/by-me");
    }

    #[tokio::test]
    async fn test_unreachable_mirror_is_external_service_error() {
        let client = HttpMirrorClient::new(&config("http://127.0.0.1:1")).unwrap();
        client.set_token("token").await;
        let err = client.get_share_by_me().await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::ExternalService);
    }
}
