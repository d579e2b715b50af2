// File: syncboard-core/src/client.rs
//
// Typed access to the two endpoints the status page consumes.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use syncboard_common::error::Error;
use syncboard_common::models::{Integration, LinkTarget, SyncStatus};
use crate::http::HttpClient;
use crate::session::{is_login_redirect, Session};

pub const STATUS_ENDPOINT: &str = "syncStatus";

/// URL of the page the status view lives on. Endpoints are addressed
/// relative to it by plain concatenation (`<page-url>syncStatus`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageUrl(String);

impl PageUrl {
    /// Query string and fragment are dropped; they would otherwise end up in
    /// the middle of every endpoint URL.
    pub fn parse(raw: &str) -> Result<Self, Error> {
        let mut url = Url::parse(raw)?;
        url.set_query(None);
        url.set_fragment(None);
        Ok(Self(url.to_string()))
    }

    pub fn endpoint(&self, name: &str) -> String {
        format!("{}{}", self.0, name)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

pub struct StatusClient {
    http: Arc<dyn HttpClient>,
    page_url: PageUrl,
    session: Session,
    timeout: Option<Duration>,
}

impl StatusClient {
    pub fn new(http: Arc<dyn HttpClient>, page_url: PageUrl, session: Session) -> Self {
        Self {
            http,
            page_url,
            session,
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn page_url(&self) -> &PageUrl {
        &self.page_url
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub async fn fetch_status(&self) -> Result<SyncStatus, Error> {
        self.get_json(self.page_url.endpoint(STATUS_ENDPOINT)).await
    }

    pub async fn fetch_link_target(&self, integration: Integration) -> Result<LinkTarget, Error> {
        let target: LinkTarget = self
            .get_json(self.page_url.endpoint(&integration.link_endpoint()))
            .await?;
        if target.url.trim().is_empty() {
            return Err(Error::Parse(format!(
                "{} link response carried an empty url",
                integration
            )));
        }
        Ok(target)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: String) -> Result<T, Error> {
        let mut headers = HashMap::new();
        headers.insert("Cache-Control".to_string(), "no-cache".to_string());
        headers.insert("Pragma".to_string(), "no-cache".to_string());
        if let Some(cookie) = self.session.cookie_header() {
            headers.insert("Cookie".to_string(), cookie);
        }

        debug!("GET {}", url);
        let request = self.http.get(url.clone(), headers);
        let response = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, request).await??,
            None => request.await?,
        };

        if is_login_redirect(&url, &response.final_url) {
            return Err(Error::NotLoggedIn(response.final_url));
        }
        if !response.is_success() {
            return Err(Error::HttpStatus {
                status: response.status,
                url,
            });
        }
        Ok(serde_json::from_str(&response.body)?)
    }
}
