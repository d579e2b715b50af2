// File: syncboard-tui/src/commands/cookie.rs

use crate::tui_module::TuiModule;

/// Handles 'cookie <name>'
pub fn handle_cookie_command(args: &[&str], tui_module: &TuiModule) -> String {
    if args.is_empty() {
        return "Usage: cookie <name>".to_string();
    }

    match tui_module.client().session().cookie(args[0]) {
        Some(value) => format!("{}={}", args[0], value),
        None => format!("No cookie named '{}'.", args[0]),
    }
}
