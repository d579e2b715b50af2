// File: syncboard-tui/src/commands/mod.rs

mod cookie;
mod link;

use crate::render::render_table;
use crate::tui_module::TuiModule;

const HELP: &str = "\
Commands:
  help
  status                 show the sync status table
  link <integration>     start linking (nokia)
  reload                 remount the view and poll the server again
  cookie <name>          show a cookie from the session store
  quit
";

/// Runs one command line. Returns (quit_requested, output).
pub async fn dispatch(line: &str, tui_module: &TuiModule) -> (bool, Option<String>) {
    let parts: Vec<&str> = line.split_whitespace().collect();
    let cmd = parts.first().unwrap_or(&"").to_lowercase();
    let args = if parts.is_empty() { &[][..] } else { &parts[1..] };

    match cmd.as_str() {
        "help" => (false, Some(HELP.to_string())),
        "status" => match tui_module.view() {
            Some(view) => (false, Some(render_table(&view.render()))),
            None => (false, Some("No status view mounted. Try 'reload'.".to_string())),
        },
        "link" => {
            let message = link::handle_link_command(args, tui_module).await;
            (false, Some(message))
        }
        "reload" => {
            let mut output = String::new();
            if let Err(e) = tui_module.mount().await {
                output.push_str(&format!("Status poll failed => {}\n", e));
            }
            if let Some(view) = tui_module.view() {
                output.push_str(&render_table(&view.render()));
            }
            (false, Some(output))
        }
        "cookie" => (false, Some(cookie::handle_cookie_command(args, tui_module))),
        "quit" | "exit" => {
            tui_module.shutdown();
            (true, Some("Shutting down...".to_string()))
        }
        "" => (false, None),
        other => (false, Some(format!("Unknown command '{}'. Type 'help' for usage.", other))),
    }
}
