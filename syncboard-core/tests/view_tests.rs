// tests/view_tests.rs
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use async_trait::async_trait;

use syncboard_common::traits::Navigator;
use syncboard_core::cookies::StaticCookieStore;
use syncboard_core::models::{DisplayStatus, Integration, LinkLabel, SyncStatus};
use syncboard_core::refresh::spawn_refresh;
use syncboard_core::session::Session;
use syncboard_core::{
    Error, HttpClient, HttpResponse, LinkControl, PageUrl, StatusClient, StatusView,
};

const PAGE: &str = "http://localhost:8080/";
const OAUTH_URL: &str = "https://example.com/oauth";

#[derive(Clone)]
enum Reply {
    Body(u16, String),
    Refused,
}

/// Serves canned replies keyed by endpoint name, optionally after a delay.
#[derive(Default)]
struct ScriptedHttpClient {
    replies: Mutex<HashMap<String, (Reply, Duration)>>,
    requests: Mutex<Vec<String>>,
}

impl ScriptedHttpClient {
    fn new() -> Self {
        Self::default()
    }

    fn with_reply(self, endpoint: &str, reply: Reply) -> Self {
        self.with_slow_reply(endpoint, reply, Duration::ZERO)
    }

    fn with_slow_reply(self, endpoint: &str, reply: Reply, delay: Duration) -> Self {
        self.replies
            .lock()
            .unwrap()
            .insert(format!("{}{}", PAGE, endpoint), (reply, delay));
        self
    }

    fn request_count(&self, endpoint: &str) -> usize {
        let url = format!("{}{}", PAGE, endpoint);
        self.requests.lock().unwrap().iter().filter(|u| **u == url).count()
    }
}

#[async_trait]
impl HttpClient for ScriptedHttpClient {
    async fn get(
        &self,
        url: String,
        _headers: HashMap<String, String>,
    ) -> Result<HttpResponse, Error> {
        self.requests.lock().unwrap().push(url.clone());
        let scripted = self.replies.lock().unwrap().get(&url).cloned();
        let (reply, delay) =
            scripted.unwrap_or((Reply::Body(404, "not found".into()), Duration::ZERO));
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        match reply {
            Reply::Body(status, body) => Ok(HttpResponse { status, final_url: url, body }),
            Reply::Refused => Err(Error::Io(std::io::Error::new(
                std::io::ErrorKind::ConnectionRefused,
                "connection refused",
            ))),
        }
    }
}

#[derive(Default)]
struct RecordingNavigator {
    visited: Mutex<Vec<String>>,
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, url: &str) -> Result<(), Error> {
        self.visited.lock().unwrap().push(url.to_string());
        Ok(())
    }
}

impl RecordingNavigator {
    fn visited(&self) -> Vec<String> {
        self.visited.lock().unwrap().clone()
    }
}

fn json(body: &str) -> Reply {
    Reply::Body(200, body.to_string())
}

fn status_reply(nokia: bool, fatsecret: bool) -> Reply {
    json(&format!(r#"{{"nokia":{},"fatsecret":{}}}"#, nokia, fatsecret))
}

fn link_reply() -> Reply {
    json(&format!(r#"{{"url":"{}"}}"#, OAUTH_URL))
}

fn labels(nokia: LinkLabel, fatsecret: LinkLabel) -> DisplayStatus {
    DisplayStatus { nokia, fatsecret }
}

fn control_of(view: &StatusView, integration: Integration) -> LinkControl {
    view.render()
        .rows
        .into_iter()
        .find(|row| row.integration == integration)
        .map(|row| row.control)
        .expect("row missing from table")
}

fn build_client(http: Arc<ScriptedHttpClient>) -> Arc<StatusClient> {
    Arc::new(StatusClient::new(
        http,
        PageUrl::parse(PAGE).unwrap(),
        Session::new(Arc::new(StaticCookieStore::new("userid=42"))),
    ))
}

fn build_view(http: Arc<ScriptedHttpClient>) -> (StatusView, Arc<RecordingNavigator>) {
    let navigator = Arc::new(RecordingNavigator::default());
    let view = StatusView::new(build_client(http), navigator.clone());
    (view, navigator)
}

#[tokio::test]
async fn labels_are_loading_until_the_first_response() -> Result<(), Error> {
    let http = Arc::new(ScriptedHttpClient::new().with_slow_reply(
        "syncStatus",
        status_reply(true, true),
        Duration::from_millis(200),
    ));
    let navigator = Arc::new(RecordingNavigator::default());
    let (view, initial_poll) = StatusView::mount(build_client(http.clone()), navigator);

    assert_eq!(view.display(), DisplayStatus::loading());
    let table = view.render();
    assert!(table.rows.iter().all(|row| row.label == LinkLabel::Loading));
    assert!(table.updated_at.is_none());

    initial_poll.await.expect("poll task panicked")?;
    assert_eq!(view.display(), labels(LinkLabel::Linked, LinkLabel::Linked));
    assert_eq!(http.request_count("syncStatus"), 1);
    Ok(())
}

#[tokio::test]
async fn status_response_drives_labels() -> Result<(), Error> {
    let script = ScriptedHttpClient::new().with_reply("syncStatus", status_reply(true, false));
    let http = Arc::new(script);
    let (view, _) = build_view(http);
    let status = view.fetch_status().await?;
    assert_eq!(status, SyncStatus { nokia: true, fatsecret: false });
    assert_eq!(view.display().nokia.as_str(), "Linked");
    assert_eq!(view.display().fatsecret.as_str(), "Not Linked");

    let script = ScriptedHttpClient::new().with_reply("syncStatus", status_reply(false, true));
    let http = Arc::new(script);
    let (view, _) = build_view(http);
    view.fetch_status().await?;
    assert_eq!(view.display(), labels(LinkLabel::NotLinked, LinkLabel::Linked));
    assert!(view.render().updated_at.is_some());
    Ok(())
}

#[tokio::test]
async fn every_failure_kind_ends_in_error_labels() {
    let replies = vec![
        Reply::Refused,
        Reply::Body(502, "bad gateway".into()),
        json("{not json"),
        json(r#"{"fatsecret":true}"#),
    ];

    for reply in replies {
        let http = Arc::new(ScriptedHttpClient::new().with_reply("syncStatus", reply));
        let (view, _) = build_view(http);
        assert!(view.fetch_status().await.is_err());
        assert_eq!(view.display(), DisplayStatus::errored());
        let table = view.render();
        assert!(table.rows.iter().all(|row| row.label.as_str() == "Error"));
    }
}

#[tokio::test]
async fn hung_request_times_out_instead_of_loading_forever() {
    let http = Arc::new(ScriptedHttpClient::new().with_slow_reply(
        "syncStatus",
        status_reply(true, true),
        Duration::from_secs(30),
    ));
    let client = StatusClient::new(
        http,
        PageUrl::parse(PAGE).unwrap(),
        Session::new(Arc::new(StaticCookieStore::default())),
    )
    .with_timeout(Duration::from_millis(50));
    let view = StatusView::new(Arc::new(client), Arc::new(RecordingNavigator::default()));

    assert!(matches!(view.fetch_status().await, Err(Error::Timeout(_))));
    assert_eq!(view.display(), DisplayStatus::errored());
}

#[tokio::test]
async fn link_click_navigates_to_server_url() -> Result<(), Error> {
    let http = Arc::new(ScriptedHttpClient::new().with_reply("syncNokia", link_reply()));
    let (view, navigator) = build_view(http.clone());

    let url = view.initiate_link(Integration::Nokia).await?;
    assert_eq!(url, OAUTH_URL);
    assert_eq!(navigator.visited(), vec![OAUTH_URL.to_string()]);
    assert_eq!(http.request_count("syncNokia"), 1);
    Ok(())
}

#[tokio::test]
async fn fatsecret_link_is_disabled() {
    let http = Arc::new(ScriptedHttpClient::new());
    let (view, navigator) = build_view(http.clone());

    let control = control_of(&view, Integration::FatSecret);
    assert_eq!(control, LinkControl::Disabled);
    assert!(!control.is_clickable());

    let rejected = view.initiate_link(Integration::FatSecret).await;
    assert!(matches!(rejected, Err(Error::NotLinkable(_))));
    assert_eq!(http.request_count("syncFatSecret"), 0);
    assert!(navigator.visited().is_empty());
    assert_eq!(view.display().fatsecret, LinkLabel::Loading);
}

#[tokio::test]
async fn second_click_while_in_flight_is_rejected() {
    let http = Arc::new(ScriptedHttpClient::new().with_slow_reply(
        "syncNokia",
        link_reply(),
        Duration::from_millis(200),
    ));
    let (view, navigator) = build_view(http.clone());

    let first = {
        let view = view.clone();
        tokio::spawn(async move { view.initiate_link(Integration::Nokia).await })
    };
    tokio::time::sleep(Duration::from_millis(50)).await;

    assert_eq!(control_of(&view, Integration::Nokia), LinkControl::Busy);
    let repeated = view.initiate_link(Integration::Nokia).await;
    assert!(matches!(repeated, Err(Error::LinkInProgress(_))));

    let url = first.await.expect("link task panicked").expect("first link failed");
    assert_eq!(url, OAUTH_URL);
    assert_eq!(http.request_count("syncNokia"), 1);
    assert_eq!(navigator.visited().len(), 1);

    assert_eq!(control_of(&view, Integration::Nokia), LinkControl::Enabled);
}

#[tokio::test]
async fn abandoned_link_request_releases_the_control() -> Result<(), Error> {
    let http = Arc::new(ScriptedHttpClient::new().with_slow_reply(
        "syncNokia",
        link_reply(),
        Duration::from_millis(50),
    ));
    let (view, navigator) = build_view(http.clone());

    let pending = view.initiate_link(Integration::Nokia);
    assert!(tokio::time::timeout(Duration::from_millis(10), pending).await.is_err());
    tokio::time::sleep(Duration::from_millis(80)).await;

    assert_eq!(control_of(&view, Integration::Nokia), LinkControl::Enabled);
    assert!(navigator.visited().is_empty());

    let url = view.initiate_link(Integration::Nokia).await?;
    assert_eq!(url, OAUTH_URL);
    assert_eq!(http.request_count("syncNokia"), 2);
    assert_eq!(navigator.visited(), vec![OAUTH_URL.to_string()]);
    Ok(())
}

#[tokio::test]
async fn failed_link_marks_only_that_row() -> Result<(), Error> {
    let http = Arc::new(
        ScriptedHttpClient::new()
            .with_reply("syncStatus", status_reply(false, true))
            .with_reply("syncNokia", json(r#"{"redirect":"nope"}"#)),
    );
    let (view, navigator) = build_view(http);
    view.fetch_status().await?;

    assert!(matches!(view.initiate_link(Integration::Nokia).await, Err(Error::Json(_))));
    assert_eq!(view.display(), labels(LinkLabel::Error, LinkLabel::Linked));
    assert!(navigator.visited().is_empty());
    Ok(())
}

#[tokio::test]
async fn responses_after_teardown_are_ignored() {
    let http = Arc::new(
        ScriptedHttpClient::new()
            .with_slow_reply("syncStatus", status_reply(true, true), Duration::from_millis(100))
            .with_slow_reply("syncNokia", link_reply(), Duration::from_millis(100)),
    );
    let navigator = Arc::new(RecordingNavigator::default());
    let (view, initial_poll) = StatusView::mount(build_client(http), navigator.clone());

    let link = {
        let view = view.clone();
        tokio::spawn(async move { view.initiate_link(Integration::Nokia).await })
    };
    tokio::time::sleep(Duration::from_millis(10)).await;
    view.teardown();

    assert!(matches!(initial_poll.await.unwrap(), Err(Error::Cancelled)));
    assert!(matches!(link.await.unwrap(), Err(Error::Cancelled)));
    assert!(view.is_torn_down());
    assert_eq!(view.display(), DisplayStatus::loading());
    assert!(navigator.visited().is_empty());
}

#[tokio::test]
async fn refresh_task_repolls_until_teardown() {
    let script = ScriptedHttpClient::new().with_reply("syncStatus", status_reply(true, false));
    let http = Arc::new(script);
    let (view, _) = build_view(http.clone());

    let task = spawn_refresh(view.clone(), Duration::from_millis(20));
    tokio::time::sleep(Duration::from_millis(110)).await;
    view.teardown();
    tokio::time::timeout(Duration::from_secs(1), task)
        .await
        .expect("refresh task did not stop")
        .expect("refresh task panicked");

    let polls = http.request_count("syncStatus");
    assert!(polls >= 2, "expected repeated polls, saw {}", polls);
    assert_eq!(view.display(), labels(LinkLabel::Linked, LinkLabel::NotLinked));

    tokio::time::sleep(Duration::from_millis(60)).await;
    assert_eq!(http.request_count("syncStatus"), polls);
}

#[tokio::test]
async fn rendered_table_lists_both_integrations() -> Result<(), Error> {
    let script = ScriptedHttpClient::new().with_reply("syncStatus", status_reply(true, false));
    let http = Arc::new(script);
    let (view, _) = build_view(http);
    view.fetch_status().await?;

    let text = view.render().to_string();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[1].starts_with("Nokia"));
    assert!(lines[1].contains("Linked") && lines[1].contains("[Link]"));
    assert!(lines[2].starts_with("FatSecret"));
    assert!(lines[2].contains("Not Linked") && lines[2].contains("not available"));
    Ok(())
}
