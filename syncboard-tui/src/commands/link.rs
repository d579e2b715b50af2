// File: syncboard-tui/src/commands/link.rs

use std::str::FromStr;

use syncboard_common::models::Integration;
use syncboard_core::Error;
use crate::tui_module::TuiModule;

/// Handles 'link <integration>'
pub async fn handle_link_command(args: &[&str], tui_module: &TuiModule) -> String {
    if args.is_empty() {
        return "Usage: link <nokia|fatsecret>".to_string();
    }

    let integration = match Integration::from_str(args[0]) {
        Ok(i) => i,
        Err(e) => return e,
    };

    let Some(view) = tui_module.view() else {
        return "No status view mounted. Try 'reload'.".to_string();
    };

    match view.initiate_link(integration).await {
        Ok(url) => format!("Started {} linking via {}", integration, url),
        Err(Error::NotLinkable(name)) => {
            format!("Linking {} is not available yet.", name)
        }
        Err(Error::LinkInProgress(name)) => {
            format!("A {} link request is already running, please wait.", name)
        }
        Err(Error::Navigation(msg)) => msg,
        Err(e) => format!("Error starting {} link => {}", integration, e),
    }
}
