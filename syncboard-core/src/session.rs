// File: syncboard-core/src/session.rs

use std::sync::Arc;
use url::Url;

use syncboard_common::traits::CookieStore;
use crate::cookies::get_cookie;

/// Cookie the sync server uses to identify the logged in user.
pub const USER_ID_COOKIE: &str = "userid";

/// Pages the server redirects to when the session is missing or stale.
/// The server mounts them with a trailing slash, so both forms show up.
const LOGIN_PAGES: [&str; 2] = ["login", "logout"];

/// Cookie backed session shared by every request the client makes.
#[derive(Clone)]
pub struct Session {
    store: Arc<dyn CookieStore>,
}

impl Session {
    pub fn new(store: Arc<dyn CookieStore>) -> Self {
        Self { store }
    }

    /// The raw header to send as `Cookie`, or `None` when the store is empty.
    pub fn cookie_header(&self) -> Option<String> {
        match self.store.raw_cookies() {
            Ok(raw) if !raw.trim().is_empty() => Some(raw),
            _ => None,
        }
    }

    pub fn cookie(&self, name: &str) -> Option<String> {
        get_cookie(self.store.as_ref(), name)
    }

    pub fn user_id(&self) -> Option<String> {
        self.cookie(USER_ID_COOKIE)
    }
}

/// True when a request for `requested` ended up on the server's login or
/// logout page after following redirects.
pub fn is_login_redirect(requested: &str, final_url: &str) -> bool {
    if requested == final_url {
        return false;
    }
    match Url::parse(final_url) {
        Ok(url) => {
            let page = url
                .path()
                .trim_end_matches('/')
                .rsplit('/')
                .next()
                .unwrap_or_default();
            LOGIN_PAGES.iter().any(|p| *p == page)
        }
        Err(_) => false,
    }
}
