//! Test helpers for integration tests
//!
//! Spawns the real application on an ephemeral port and wraps a reqwest
//! client with the bearer-auth conveniences the tests need.

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::Result;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use vidshare_api::{create_app, create_app_state, serve};
use vidshare_common::AppConfig;

const API_PREFIX: &str = "/api/v1";

/// Test server instance that manages lifecycle
pub struct TestServer {
    pub addr: SocketAddr,
    pub client: Client,
    handle: JoinHandle<()>,
}

impl TestServer {
    /// Start a new test server
    pub async fn start() -> Result<Self> {
        Self::start_with_config(test_config()?).await
    }

    /// Start a test server with custom config
    pub async fn start_with_config(config: AppConfig) -> Result<Self> {
        let state = create_app_state(config).await?;
        let app = create_app(state)?;

        let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
        let addr = listener.local_addr()?;

        let handle = tokio::spawn(async move {
            serve(listener, app).await.ok();
        });

        let client = Client::builder().timeout(Duration::from_secs(10)).build()?;

        Ok(Self {
            addr,
            client,
            handle,
        })
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Absolute URL for a path under `/api/v1`
    pub fn api_url(&self, path: &str) -> String {
        format!("{}{API_PREFIX}{path}", self.base_url())
    }

    /// GET outside the API prefix (health probes)
    pub async fn get_raw(&self, path: &str) -> Result<Response> {
        let url = format!("{}{path}", self.base_url());
        Ok(self.client.get(url).send().await?)
    }

    pub async fn get(&self, path: &str) -> Result<Response> {
        send(self.client.get(self.api_url(path)), None).await
    }

    pub async fn get_auth(&self, path: &str, token: &str) -> Result<Response> {
        send(self.client.get(self.api_url(path)), Some(token)).await
    }

    pub async fn post<T: Serialize>(&self, path: &str, body: &T) -> Result<Response> {
        send(self.client.post(self.api_url(path)).json(body), None).await
    }

    pub async fn post_auth<T: Serialize>(
        &self,
        path: &str,
        token: &str,
        body: &T,
    ) -> Result<Response> {
        send(self.client.post(self.api_url(path)).json(body), Some(token)).await
    }

    /// POST without a body (like/dislike)
    pub async fn post_empty_auth(&self, path: &str, token: &str) -> Result<Response> {
        send(self.client.post(self.api_url(path)), Some(token)).await
    }

    pub async fn patch_auth<T: Serialize>(
        &self,
        path: &str,
        token: &str,
        body: &T,
    ) -> Result<Response> {
        send(self.client.patch(self.api_url(path)).json(body), Some(token)).await
    }

    pub async fn put_auth<T: Serialize>(
        &self,
        path: &str,
        token: &str,
        body: &T,
    ) -> Result<Response> {
        send(self.client.put(self.api_url(path)).json(body), Some(token)).await
    }

    pub async fn delete_auth(&self, path: &str, token: &str) -> Result<Response> {
        send(self.client.delete(self.api_url(path)), Some(token)).await
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn send(request: RequestBuilder, token: Option<&str>) -> Result<Response> {
    let request = match token {
        Some(token) => request.bearer_auth(token),
        None => request,
    };
    Ok(request.send().await?)
}

/// Configuration from the environment, tuned for tests
pub fn test_config() -> Result<AppConfig> {
    let mut config =
        AppConfig::from_env().map_err(|e| anyhow::anyhow!("Config error: {e}"))?;
    // Every test shares the loopback address, so the per-IP bucket must not trip
    config.rate_limit.requests_per_second = 1000;
    config.rate_limit.burst = 10_000;
    config.app.seed_demo_data = false;
    Ok(config)
}

/// Whether the backing services for end-to-end tests are configured
pub async fn check_test_env() -> bool {
    for key in ["DATABASE_URL", "REDIS_URL", "JWT_SECRET"] {
        if std::env::var(key).is_err() {
            eprintln!("Skipping test: {key} not set");
            return false;
        }
    }
    true
}

/// Assert response status and parse JSON body
pub async fn assert_json<T: DeserializeOwned>(
    response: Response,
    expected_status: StatusCode,
) -> Result<T> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!("Expected status {expected_status}, got {status}. Body: {body}");
    }
    Ok(response.json().await?)
}

/// Assert response status without parsing body
pub async fn assert_status(response: Response, expected_status: StatusCode) -> Result<()> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!("Expected status {expected_status}, got {status}. Body: {body}");
    }
    Ok(())
}

/// Assert an error status and return the `error.code` field
pub async fn assert_error_code(response: Response, expected_status: StatusCode) -> Result<String> {
    let body: serde_json::Value = assert_json(response, expected_status).await?;
    body["error"]["code"]
        .as_str()
        .map(String::from)
        .ok_or_else(|| anyhow::anyhow!("error body without code: {body}"))
}
