// File: syncboard-core/src/cookies.rs
//
// Cookie lookup over an injected cookie store.

use std::fs;
use std::path::PathBuf;
use tracing::{debug, warn};

use syncboard_common::error::Error;
use syncboard_common::traits::CookieStore;

/// Look up a cookie value by name, or `None` if the store is empty or has no
/// matching entry. The store is read on every call.
pub fn get_cookie(store: &dyn CookieStore, name: &str) -> Option<String> {
    match store.raw_cookies() {
        Ok(raw) => parse_cookie(&raw, name),
        Err(e) => {
            warn!("Failed to read cookie store: {}", e);
            None
        }
    }
}

/// Find `name` in a raw `k=v; k2=v2` header.
///
/// Each entry is split at its first `=` only, so values that themselves
/// contain `=` come back whole. Keys match exactly (case-sensitive) after
/// trimming; the first match wins.
pub fn parse_cookie(raw: &str, name: &str) -> Option<String> {
    let cookies = match urlencoding::decode(raw) {
        Ok(decoded) => decoded.into_owned(),
        Err(e) => {
            debug!("Cookie header is not valid UTF-8 once decoded ({}), using it raw", e);
            raw.to_string()
        }
    };

    if cookies.is_empty() {
        debug!("No cookies present.");
        return None;
    }

    for entry in cookies.split(';') {
        let mut tok = entry.splitn(2, '=');
        let key = tok.next().unwrap_or_default().trim();
        let Some(value) = tok.next() else {
            continue;
        };
        if key == name {
            return Some(value.trim().to_string());
        }
    }

    None
}

/// A fixed cookie header, e.g. from `--cookie`.
#[derive(Debug, Clone, Default)]
pub struct StaticCookieStore {
    header: String,
}

impl StaticCookieStore {
    pub fn new(header: impl Into<String>) -> Self {
        Self { header: header.into() }
    }
}

impl CookieStore for StaticCookieStore {
    fn raw_cookies(&self) -> Result<String, Error> {
        Ok(self.header.clone())
    }
}

/// A cookie header kept in a file. Re-read on every lookup so edits made
/// while the client runs (e.g. after logging in elsewhere) are picked up.
#[derive(Debug, Clone)]
pub struct FileCookieStore {
    path: PathBuf,
}

impl FileCookieStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl CookieStore for FileCookieStore {
    fn raw_cookies(&self) -> Result<String, Error> {
        let contents = fs::read_to_string(&self.path)?;
        Ok(contents.trim_end_matches(['\r', '\n']).to_string())
    }
}
