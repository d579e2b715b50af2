// File: syncboard-common/src/traits/page_traits.rs
//
// Ambient page state that a browser would provide implicitly. The view takes
// these as injected collaborators so it can be driven without a real browser.

use crate::error::Error;

/// Read-only access to the raw cookie header (`a=1; b=2`).
pub trait CookieStore: Send + Sync {
    /// Returns the current raw header. Implementations must not cache; every
    /// lookup reads the store again.
    fn raw_cookies(&self) -> Result<String, Error>;
}

/// Performs a full navigation to a server supplied URL.
pub trait Navigator: Send + Sync {
    fn navigate(&self, url: &str) -> Result<(), Error>;
}
