// Terminal front end for the sync status page
use std::io::{stdout, Write};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

use syncboard_common::traits::CookieStore;
use syncboard_core::cookies::{FileCookieStore, StaticCookieStore};
use syncboard_core::session::{Session, USER_ID_COOKIE};
use syncboard_core::{DefaultHttpClient, PageUrl, StatusClient};
use syncboard_tui::commands::dispatch;
use syncboard_tui::render::render_table;
use syncboard_tui::{BrowserNavigator, TuiModule};

#[derive(Parser, Debug, Clone)]
#[command(name = "syncboard")]
#[command(author, version, about = "Show and link Nokia/FatSecret sync status")]
struct Args {
    /// URL of the status page; endpoints are resolved relative to it
    #[arg(long, env = "SYNCBOARD_PAGE_URL", default_value = "http://localhost:8080/")]
    page_url: String,

    /// Raw cookie header, e.g. "userid=1234"
    #[arg(long, env = "SYNCBOARD_COOKIE", conflicts_with = "cookie_file")]
    cookie: Option<String>,

    /// File holding the raw cookie header, re-read on every lookup
    #[arg(long, env = "SYNCBOARD_COOKIE_FILE")]
    cookie_file: Option<PathBuf>,

    /// Per-request timeout in seconds (0 disables it)
    #[arg(long, env = "SYNCBOARD_TIMEOUT_SECS", default_value = "10")]
    timeout_secs: u64,

    /// Re-poll the status every N seconds (off by default)
    #[arg(long, env = "SYNCBOARD_REFRESH_SECS")]
    refresh_secs: Option<u64>,

    /// Print the table after the first poll and exit
    #[arg(long, default_value = "false")]
    once: bool,

    /// Print authorization URLs instead of opening a browser
    #[arg(long, default_value = "false")]
    no_browser: bool,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new("syncboard=info,syncboard_core=info,syncboard_tui=info")
    });
    let sub = fmt().with_env_filter(filter).with_writer(std::io::stderr).finish();
    if let Err(e) = tracing::subscriber::set_global_default(sub) {
        eprintln!("Failed to set global subscriber: {}", e);
    }
}

fn cookie_store(args: &Args) -> Arc<dyn CookieStore> {
    match (&args.cookie, &args.cookie_file) {
        (_, Some(path)) => Arc::new(FileCookieStore::new(path.clone())),
        (Some(header), None) => Arc::new(StaticCookieStore::new(header.clone())),
        (None, None) => Arc::new(StaticCookieStore::default()),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    init_tracing();
    let args = Args::parse();

    let page_url = PageUrl::parse(&args.page_url)
        .with_context(|| format!("invalid --page-url '{}'", args.page_url))?;
    let session = Session::new(cookie_store(&args));
    match session.user_id() {
        Some(user) => info!("Session user: {}", user),
        None => warn!(
            "No '{}' cookie present; the server will likely ask you to log in",
            USER_ID_COOKIE
        ),
    }

    let mut client = StatusClient::new(Arc::new(DefaultHttpClient::new()), page_url, session);
    if args.timeout_secs > 0 {
        client = client.with_timeout(Duration::from_secs(args.timeout_secs));
    }
    let navigator = Arc::new(BrowserNavigator::new(!args.no_browser));

    let mut tui_module = TuiModule::new(Arc::new(client), navigator);
    if let Some(secs) = args.refresh_secs.filter(|s| *s > 0) {
        tui_module = tui_module.with_refresh(Duration::from_secs(secs));
    }

    info!("Polling sync status from {}", tui_module.client().page_url().as_str());
    let first_poll = tui_module.mount().await;
    if let Some(view) = tui_module.view() {
        print!("{}", render_table(&view.render()));
    }

    if args.once {
        tui_module.shutdown();
        return first_poll.map(|_| ()).context("status poll failed");
    }

    println!("\nType 'help' for available commands.\n");

    // Main input loop
    let mut reader = BufReader::new(tokio::io::stdin()).lines();

    loop {
        print!("{}", tui_module.prompt_string());
        stdout().flush()?;

        let line = match reader.next_line().await? {
            Some(line) => line.trim().to_string(),
            None => break, // EOF
        };

        if line.is_empty() {
            continue;
        }

        let (quit_requested, output) = dispatch(&line, &tui_module).await;

        if let Some(msg) = output {
            println!("{}", msg);
        }

        if quit_requested {
            break;
        }
    }

    if !tui_module.is_shutdown() {
        tui_module.shutdown();
    }
    println!("Goodbye!");

    Ok(())
}
