use open;

use syncboard_common::traits::Navigator;
use syncboard_core::Error;

/// Sends the user's browser to authorization pages.
pub struct BrowserNavigator {
    /// When false the URL is only printed, for headless sessions.
    open_browser: bool,
}

impl BrowserNavigator {
    pub fn new(open_browser: bool) -> Self {
        Self { open_browser }
    }
}

impl Navigator for BrowserNavigator {
    fn navigate(&self, url: &str) -> Result<(), Error> {
        println!("Open this URL to authenticate:\n  {}", url);
        if self.open_browser {
            open::that(url).map_err(|e| {
                Error::Navigation(format!("Could not open browser automatically: {}", e))
            })?;
        }
        Ok(())
    }
}
