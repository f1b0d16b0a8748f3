//! Test helpers for integration tests
//!
//! Spawns the full application (REST + realtime route) on an ephemeral
//! port and wraps reqwest with auth-aware request helpers.

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::Result;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use skillswap_api::{create_app, create_app_state};
use skillswap_common::AppConfig;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// Test server instance that manages lifecycle
pub struct TestServer {
    pub addr: SocketAddr,
    pub client: Client,
    _handle: JoinHandle<()>,
}

impl TestServer {
    /// Start a new test server
    pub async fn start() -> Result<Self> {
        Self::start_with_config(test_config()?).await
    }

    /// Start a test server with custom config
    pub async fn start_with_config(config: AppConfig) -> Result<Self> {
        let state = create_app_state(config).await?;
        let app = create_app(state);

        // Port 0: the OS picks a free port, so parallel tests never clash
        let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
        let addr = listener.local_addr()?;

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        // Give the accept loop a moment before firing requests
        tokio::time::sleep(Duration::from_millis(100)).await;

        Ok(Self {
            addr,
            client: Client::builder().timeout(Duration::from_secs(10)).build()?,
            _handle: handle,
        })
    }

    /// Get base URL for the server
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    fn request(&self, method: Method, path: &str, token: Option<&str>) -> RequestBuilder {
        let builder = self.client.request(method, format!("{}{path}", self.base_url()));
        match token {
            Some(token) => builder.header("Authorization", format!("Bearer {token}")),
            None => builder,
        }
    }

    /// GET without credentials
    pub async fn get(&self, path: &str) -> Result<Response> {
        Ok(self.request(Method::GET, path, None).send().await?)
    }

    /// GET with a Bearer token
    pub async fn get_auth(&self, path: &str, token: &str) -> Result<Response> {
        Ok(self.request(Method::GET, path, Some(token)).send().await?)
    }

    /// POST a JSON body without credentials
    pub async fn post<T: Serialize>(&self, path: &str, body: &T) -> Result<Response> {
        Ok(self.request(Method::POST, path, None).json(body).send().await?)
    }

    /// POST a JSON body with a Bearer token
    pub async fn post_auth<T: Serialize>(
        &self,
        path: &str,
        token: &str,
        body: &T,
    ) -> Result<Response> {
        Ok(self.request(Method::POST, path, Some(token)).json(body).send().await?)
    }

    /// PATCH a JSON body with a Bearer token
    pub async fn patch_auth<T: Serialize>(
        &self,
        path: &str,
        token: &str,
        body: &T,
    ) -> Result<Response> {
        Ok(self.request(Method::PATCH, path, Some(token)).json(body).send().await?)
    }

    /// DELETE with a Bearer token
    pub async fn delete_auth(&self, path: &str, token: &str) -> Result<Response> {
        Ok(self.request(Method::DELETE, path, Some(token)).send().await?)
    }
}

/// Create a test configuration from the environment
pub fn test_config() -> Result<AppConfig> {
    dotenvy::dotenv().ok();

    // The listener binds its own port; SERVER_PORT only has to parse
    if std::env::var("SERVER_PORT").is_err() {
        std::env::set_var("SERVER_PORT", "0");
    }

    AppConfig::from_env().map_err(|e| anyhow::anyhow!("Config error: {e}"))
}

/// Helper to check if the test environment is available
pub async fn check_test_env() -> bool {
    for var in ["DATABASE_URL", "JWT_SECRET"] {
        if std::env::var(var).is_err() {
            eprintln!("Skipping test: {var} not set");
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

/// Assert response status without parsing the body
pub async fn assert_status(response: Response, expected_status: StatusCode) -> Result<()> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!("Expected status {expected_status}, got {status}. Body: {body}");
    }
    Ok(())
}
