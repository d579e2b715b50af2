//! HTTP client abstraction for the sync server endpoints.
//!
//! The view and endpoint client only talk to the server through this trait,
//! so tests can substitute a mock and never touch the network.
//!
//! # Example Usage:
//! ```ignore
//! use std::collections::HashMap;
//! use std::sync::Arc;
//! use syncboard_core::{DefaultHttpClient, HttpClient};
//!
//! let http: Arc<dyn HttpClient> = Arc::new(DefaultHttpClient::new());
//! let response = http.get(url, HashMap::new()).await?;
//! ```

use async_trait::async_trait;
use reqwest;
use std::collections::HashMap;
use tracing::debug;
use crate::Error;

/// What the callers need from a completed GET.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    /// URL after redirects were followed.
    pub final_url: String,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn get(
        &self,
        url: String,
        headers: HashMap<String, String>,
    ) -> Result<HttpResponse, Error>;
}

#[derive(Clone)]
pub struct DefaultHttpClient {
    client: reqwest::Client,
}

impl DefaultHttpClient {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }
}

impl Default for DefaultHttpClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpClient for DefaultHttpClient {
    async fn get(
        &self,
        url: String,
        headers: HashMap<String, String>,
    ) -> Result<HttpResponse, Error> {
        let mut request = self.client.get(&url);
        for (key, value) in headers {
            request = request.header(&key, value);
        }
        let response = request.send().await?;
        let status = response.status().as_u16();
        let final_url = response.url().to_string();
        let body = response.text().await?;
        debug!("GET {} -> {} ({} bytes)", url, status, body.len());
        Ok(HttpResponse { status, final_url, body })
    }
}
