#![allow(dead_code)]

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

const TREES: &[(&str, usize)] = &[("root", 38), ("t1", 8), ("t2", 6), ("t3", 9), ("t4", 4)];

#[derive(Clone, Default)]
struct Fixture {
    hits: Arc<AtomicUsize>,
    fail_commits: Arc<AtomicBool>,
}

pub struct FakeGithub {
    pub base_url: String,
    fixture: Fixture,
}

impl FakeGithub {
    pub fn start() -> Self {
        let fixture = Fixture::default();
        let app = Router::new()
            .route("/repos/:owner/:name/branches/:branch", get(branch))
            .route("/repos/:owner/:name/git/trees/:sha", get(tree))
            .route("/repos/:owner/:name/pulls", get(pulls))
            .route("/repos/:owner/:name/compare/:range", get(compare))
            .route("/repos/:owner/:name/commits", get(commits))
            .with_state(fixture.clone());

        let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind fake github");
        listener.set_nonblocking(true).expect("nonblocking listener");
        let port = listener.local_addr().unwrap().port();

        std::thread::spawn(move || {
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .expect("fake github runtime");
            runtime.block_on(async move {
                let listener = tokio::net::TcpListener::from_std(listener).expect("tokio listener");
                axum::serve(listener, app).await.expect("fake github server");
            });
        });

        Self {
            base_url: format!("http://127.0.0.1:{port}"),
            fixture,
        }
    }

    pub fn hits(&self) -> usize {
        self.fixture.hits.load(Ordering::SeqCst)
    }

    pub fn fail_commits(&self, fail: bool) {
        self.fixture.fail_commits.store(fail, Ordering::SeqCst);
    }
}

fn tree_json(folders: usize) -> Value {
    let mut entries: Vec<Value> = (0..folders)
        .map(|i| json!({ "path": format!("exercise-{i}"), "type": "tree", "sha": format!("f{i}") }))
        .collect();
    entries.push(json!({ "path": "README.md", "type": "blob", "sha": "readme" }));
    entries.push(json!({ "path": "Cargo.toml", "type": "blob", "sha": "manifest" }));
    json!({ "sha": "whatever", "tree": entries, "truncated": false })
}

fn commit_json(author: &str, date: &str, tree: &str, message: &str) -> Value {
    json!({
        "sha": format!("c-{tree}"),
        "commit": {
            "message": message,
            "author": { "name": author, "date": date },
            "tree": { "sha": tree }
        },
        "author": { "login": author }
    })
}

async fn branch(State(fixture): State<Fixture>) -> Json<Value> {
    fixture.hits.fetch_add(1, Ordering::SeqCst);
    Json(json!({ "name": "master", "commit": { "commit": { "tree": { "sha": "root" } } } }))
}

async fn tree(State(fixture): State<Fixture>, Path((_, _, sha)): Path<(String, String, String)>) -> Response {
    fixture.hits.fetch_add(1, Ordering::SeqCst);
    match TREES.iter().find(|(name, _)| *name == sha) {
        Some((_, folders)) => Json(tree_json(*folders)).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn pulls(State(fixture): State<Fixture>) -> Json<Value> {
    fixture.hits.fetch_add(1, Ordering::SeqCst);
    Json(json!([
        { "number": 1, "head": { "ref": "feature-1" } },
        { "number": 2, "head": { "ref": "feature-2" } }
    ]))
}

async fn compare(
    State(fixture): State<Fixture>,
    Path((_, _, range)): Path<(String, String, String)>,
) -> Json<Value> {
    fixture.hits.fetch_add(1, Ordering::SeqCst);
    let count = if range.ends_with("feature-1") { 31 } else { 30 };
    let files: Vec<Value> = (0..count).map(|i| json!({ "filename": format!("f{i}.rs") })).collect();
    Json(json!({ "status": "ahead", "files": files }))
}

async fn commits(State(fixture): State<Fixture>) -> Response {
    fixture.hits.fetch_add(1, Ordering::SeqCst);
    if fixture.fail_commits.load(Ordering::SeqCst) {
        return (StatusCode::FORBIDDEN, "rate limited").into_response();
    }
    Json(json!([
        commit_json("alice", "2020-01-05T18:00:00Z", "t1", "add ex 10"),
        commit_json("bob", "2020-01-04T12:00:00Z", "t2", "add ex 8"),
        commit_json("alice", "2020-01-05T08:00:00Z", "t3", "add ex 11"),
        commit_json("carol", "2020-01-03T09:30:00Z", "t4", "first exercises"),
    ]))
    .into_response()
}
