//! End-to-end CLI runs against an in-process HTTP registry.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use axum::Router;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use serde_json::{Value, json};

use registryx_cli::client::ApiClient;
use registryx_cli::commands::shell::run_session;
use registryx_cli::commands::wbs::WbsArgs;
use registryx_cli::commands::{summary, wbs};
use registryx_cli::render::TerminalAdapter;
use registryx_cli::{Config, OutputFormat};
use registryx_core::source::paths;
use registryx_core::{IndexSession, TeamRoster};

#[derive(Clone, Default)]
struct Registry {
    built: Arc<AtomicBool>,
    build_broken: Arc<AtomicBool>,
}

async fn build(State(state): State<Registry>) -> impl IntoResponse {
    if state.build_broken.load(Ordering::SeqCst) {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            axum::Json(json!({ "detail": "index build failed" })),
        );
    }
    state.built.store(true, Ordering::SeqCst);
    (StatusCode::OK, axum::Json(json!({ "status": "ok", "count": 3 })))
}

async fn index(State(state): State<Registry>) -> axum::Json<Value> {
    let mut items = vec![
        json!({ "project_id": "P-1", "name": "Launch Plan", "text": "YouTube launch plan",
                "family": "Core Platforms", "channel": "YouTube", "status": "In Progress",
                "percent_complete": 40 }),
        json!({ "project_id": "P-2", "name": "Budget", "text": "quarterly budget" }),
    ];
    if state.built.load(Ordering::SeqCst) {
        items.push(json!({ "project_id": "P-3", "name": "Recap", "text": "youtube recap" }));
    }
    let count = items.len();
    axum::Json(json!({ "count": count, "items": items }))
}

async fn projects() -> axum::Json<Value> {
    axum::Json(json!({
        "count": 2,
        "items": [
            { "project_id": "P-1", "name": "Launch Plan" },
            { "project_id": "P-2", "name": "Budget" },
        ],
        "groups": {},
    }))
}

async fn team() -> axum::Json<Value> {
    axum::Json(json!({
        "project_id": "P-1",
        "members": [
            { "role": "Lead", "assignee": "Sam", "capacity_pct": "50",
              "work_packages": "WP1", "notes": "" },
        ],
    }))
}

async fn project_summary() -> axum::Json<Value> {
    axum::Json(json!({
        "families": { "YouTube Automations": 1, "Experiments/Misc": 1 },
        "channels": { "YouTube": 1, "unspecified": 1 },
        "categories": { "unspecified": 2 },
        "status": { "In Progress": 1, "unspecified": 1 },
        "completion": { "40–69%": 1, "Unspecified": 1 },
        "total": 2,
    }))
}

async fn work_breakdown(Query(params): Query<HashMap<String, String>>) -> axum::response::Response {
    if params.get("project_id").map(String::as_str) != Some("P-1") {
        return (
            StatusCode::NOT_FOUND,
            axum::Json(json!({ "detail": "Project not found" })),
        )
            .into_response();
    }
    axum::Json(json!({
        "project": { "id": "P-1", "name": "Launch Plan" },
        "nodes": [
            { "id": "P-1", "label": "Launch Plan" },
            { "id": "P1", "label": "Pre-Dev/Hunting" },
            { "id": "P3", "label": "Offer Design" },
            { "id": "T01_script", "label": "Script the trailer" },
        ],
        "edges": [
            { "from": "P-1", "to": "P1" },
            { "from": "P-1", "to": "P3" },
            { "from": "P3", "to": "T01_script" },
        ],
    }))
    .into_response()
}

async fn spawn_registry(state: Registry) -> String {
    let app = Router::new()
        .route(paths::BUILD_INDEX, get(build))
        .route(paths::INDEX, get(index))
        .route(paths::PROJECTS, get(projects))
        .route(paths::TEAM, get(team))
        .route(paths::SUMMARY, get(project_summary))
        .route(paths::WBS, get(work_breakdown))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    format!("http://{addr}")
}

fn config_for(base_url: String) -> Config {
    Config {
        base_url,
        timeout: Duration::from_secs(5),
        format: OutputFormat::Json,
    }
}

fn json_documents(bytes: &[u8]) -> Vec<Value> {
    serde_json::Deserializer::from_slice(bytes)
        .into_iter::<Value>()
        .collect::<Result<_, _>>()
        .expect("json documents")
}

#[tokio::test]
async fn shell_rebuild_picks_up_new_documents() {
    let base_url = spawn_registry(Registry::default()).await;
    let client = ApiClient::new(&config_for(base_url)).expect("client");
    let session = IndexSession::new(client);
    let mut adapter = TerminalAdapter::new(OutputFormat::Json, Vec::new());

    let input: &[u8] = b"youtube\n:build\nYOUTUBE\n";
    run_session(&session, input, &mut adapter)
        .await
        .expect("shell");

    let out = json_documents(&adapter.into_inner());
    assert_eq!(out.len(), 4);
    assert_eq!(out[0]["count"], 2);
    assert_eq!(out[1]["total_matches"], 1);
    assert_eq!(out[2]["count"], 3);
    assert_eq!(out[3]["total_matches"], 2);
    assert_eq!(out[3]["hits"][1]["record"]["name"], "Recap");
}

#[tokio::test]
async fn shell_reports_failed_rebuild_and_keeps_index() {
    let state = Registry::default();
    state.build_broken.store(true, Ordering::SeqCst);
    let base_url = spawn_registry(state).await;
    let client = ApiClient::new(&config_for(base_url)).expect("client");
    let session = IndexSession::new(client);
    let mut adapter = TerminalAdapter::new(OutputFormat::Json, Vec::new());

    let input: &[u8] = b":build\nbudget\n";
    run_session(&session, input, &mut adapter)
        .await
        .expect("shell");

    let out = json_documents(&adapter.into_inner());
    assert_eq!(out.len(), 3);
    assert_eq!(out[1]["error"], "index rebuild failed at build step");
    let cause = out[1]["causes"][0].as_str().expect("cause");
    assert!(cause.contains("index build failed"), "{cause}");
    assert_eq!(out[2]["hits"][0]["record"]["name"], "Budget");
    assert_eq!(session.current().count, 2);
}

#[tokio::test]
async fn roster_defaults_to_first_project_over_http() {
    let base_url = spawn_registry(Registry::default()).await;
    let client = ApiClient::new(&config_for(base_url)).expect("client");

    let roster = TeamRoster::load(&client, None).await.expect("roster");
    assert_eq!(roster.selected.as_deref(), Some("P-1"));
    assert_eq!(roster.projects.len(), 2);
    assert_eq!(roster.members[0].capacity_pct, "50");
}

#[tokio::test]
async fn summary_command_renders_registry_counts() {
    let base_url = spawn_registry(Registry::default()).await;
    let client = ApiClient::new(&config_for(base_url)).expect("client");
    let mut adapter = TerminalAdapter::new(OutputFormat::Json, Vec::new());

    summary::run(&client, &mut adapter).await.expect("summary");

    let out = json_documents(&adapter.into_inner());
    assert_eq!(out[0]["total"], 2);
    assert_eq!(out[0]["families"]["YouTube Automations"], 1);
    assert_eq!(out[0]["completion"]["40–69%"], 1);
}

#[tokio::test]
async fn wbs_command_renders_tree_and_reports_unknown_project() {
    let base_url = spawn_registry(Registry::default()).await;
    let client = ApiClient::new(&config_for(base_url)).expect("client");

    let mut adapter = TerminalAdapter::new(OutputFormat::Text, Vec::new());
    let args = WbsArgs {
        project: "P-1".to_string(),
    };
    wbs::run(&client, &args, &mut adapter)
        .await
        .expect("wbs");
    let out = String::from_utf8(adapter.into_inner()).expect("utf8");
    assert!(out.contains("  Offer Design\n"), "{out}");
    assert!(out.contains("    - Script the trailer"), "{out}");

    let mut adapter = TerminalAdapter::new(OutputFormat::Text, Vec::new());
    let args = WbsArgs {
        project: "P-404".to_string(),
    };
    let err = wbs::run(&client, &args, &mut adapter)
        .await
        .unwrap_err();
    assert!(format!("{err:#}").contains("Project not found"), "{err:#}");
}
