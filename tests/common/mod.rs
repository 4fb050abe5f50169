#![allow(dead_code)]

use axum::{
    extract::{Path, Query, State},
    http::{header::COOKIE, HeaderMap, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Form, Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use std::net::TcpListener;
use std::sync::{mpsc, Arc};
use tokio::sync::Mutex;

pub const SESSION_COOKIE: &str = "session=admin-ok";
/// A session the backend answers with a login page instead of JSON.
pub const GARBLED_COOKIE: &str = "session=garbled";
/// Codes the backend answers with a 200 HTML page.
pub const HTML_REPLY_CODE: &str = "BROKEN";
/// Codes the backend answers with a 200 empty JSON array.
pub const ARRAY_REPLY_CODE: &str = "ARRAY";

#[derive(Debug, Clone)]
pub struct FakeClient {
    pub code: String,
    pub name: String,
    pub service: String,
    pub steps: Vec<(String, bool)>,
    pub status: Option<String>,
    pub notes: Option<String>,
    pub last_update: Option<String>,
}

#[derive(Debug, Default)]
pub struct FakeData {
    pub clients: Vec<FakeClient>,
    pub requested_codes: Vec<String>,
    pub next_code: u32,
}

impl FakeData {
    fn seeded() -> Self {
        Self {
            clients: vec![
                FakeClient {
                    code: "AB12".into(),
                    name: "Sara".into(),
                    service: "Visa".into(),
                    steps: vec![
                        ("submit".into(), true),
                        ("review".into(), false),
                        ("deliver".into(), false),
                    ],
                    status: None,
                    notes: Some("waiting on embassy".into()),
                    last_update: Some("2024-05-01".into()),
                },
                FakeClient {
                    code: "LEG1".into(),
                    name: "Omar".into(),
                    service: "Residency".into(),
                    steps: Vec::new(),
                    status: Some("awaiting-reply".into()),
                    notes: None,
                    last_update: None,
                },
            ],
            requested_codes: Vec::new(),
            next_code: 100,
        }
    }

    pub fn client(&self, code: &str) -> Option<&FakeClient> {
        self.clients.iter().find(|c| c.code == code)
    }

    fn client_mut(&mut self, code: &str) -> Option<&mut FakeClient> {
        self.clients.iter_mut().find(|c| c.code == code)
    }
}

pub type Shared = Arc<Mutex<FakeData>>;

/// A backend speaking the tracking JSON contract, running on its own thread so
/// it outlives any single test runtime.
pub struct FakeBackend {
    pub base_url: String,
    pub data: Shared,
}

impl FakeBackend {
    pub fn start() -> Self {
        let data: Shared = Arc::new(Mutex::new(FakeData::seeded()));
        let app = fake_router(Arc::clone(&data));
        let (tx, rx) = mpsc::channel();

        std::thread::spawn(move || {
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .expect("fake backend runtime");
            runtime.block_on(async move {
                let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
                    .await
                    .expect("bind fake backend");
                let addr = listener.local_addr().expect("fake backend addr");
                tx.send(addr).expect("report fake backend addr");
                axum::serve(listener, app).await.expect("fake backend serve");
            });
        });

        let addr = rx.recv().expect("fake backend did not start");
        Self {
            base_url: format!("http://{addr}"),
            data,
        }
    }
}

pub fn pick_free_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind random port");
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    port
}

/// Base url nothing is listening on.
pub fn dead_backend_url() -> String {
    format!("http://127.0.0.1:{}", pick_free_port())
}

fn fake_router(data: Shared) -> Router {
    Router::new()
        .route("/track", get(track))
        .route("/admin/api/clients", get(list_clients))
        .route("/admin/api/client/:code/checklist", get(checklist))
        .route("/admin/api/client/:code/toggle-step", post(toggle_step))
        .route("/admin/api/client/:code/delete-step", post(delete_step))
        .route("/admin/api/add-client", post(add_client))
        .route("/admin/manage", post(manage))
        .with_state(data)
}

fn cookie(headers: &HeaderMap) -> Option<&str> {
    headers.get(COOKIE).and_then(|v| v.to_str().ok())
}

fn authorized(headers: &HeaderMap) -> bool {
    cookie(headers) == Some(SESSION_COOKIE)
}

fn malformed_reply(code: &str) -> Option<Response> {
    match code {
        HTML_REPLY_CODE => Some(Html("<html><body>maintenance</body></html>").into_response()),
        ARRAY_REPLY_CODE => Some(Json(json!([])).into_response()),
        _ => None,
    }
}

#[derive(Deserialize)]
struct CodeQuery {
    code: String,
}

async fn track(State(data): State<Shared>, Query(query): Query<CodeQuery>) -> Response {
    let mut data = data.lock().await;
    data.requested_codes.push(query.code.clone());
    if let Some(reply) = malformed_reply(&query.code) {
        return reply;
    }
    let reply = match data.client(&query.code) {
        Some(client) if client.status.is_some() => (
            StatusCode::OK,
            Json(json!({
                "name": client.name,
                "service": client.service,
                "status": client.status,
                "step": "embassy",
                "notes": client.notes,
                "last_update": client.last_update,
            })),
        ),
        Some(client) => (
            StatusCode::OK,
            Json(json!({
                "name": client.name,
                "service": client.service,
                "notes": client.notes,
                "last_update": client.last_update,
                "checklist": steps_json(client),
            })),
        ),
        None => (StatusCode::NOT_FOUND, Json(json!({ "error": "not found" }))),
    };
    reply.into_response()
}

fn steps_json(client: &FakeClient) -> Value {
    client
        .steps
        .iter()
        .map(|(name, done)| json!({ "name": name, "done": done }))
        .collect()
}

async fn list_clients(State(data): State<Shared>, headers: HeaderMap) -> Response {
    if cookie(&headers) == Some(GARBLED_COOKIE) {
        return Html("<form action=\"/login\"></form>").into_response();
    }
    if !authorized(&headers) {
        let body = Json(json!({ "error": "login required" }));
        return (StatusCode::UNAUTHORIZED, body).into_response();
    }
    let data = data.lock().await;
    let list: Value = data
        .clients
        .iter()
        .map(|c| json!({ "name": c.name, "code": c.code }))
        .collect();
    (StatusCode::OK, Json(list)).into_response()
}

async fn checklist(State(data): State<Shared>, Path(code): Path<String>) -> Response {
    if let Some(reply) = malformed_reply(&code) {
        return reply;
    }
    let data = data.lock().await;
    let reply = match data.client(&code) {
        Some(client) => Json(json!({
            "name": client.name,
            "service": client.service,
            "steps": steps_json(client),
        })),
        None => Json(json!({ "error": "client not found" })),
    };
    reply.into_response()
}

#[derive(Deserialize)]
struct StepBody {
    step: String,
}

async fn toggle_step(
    State(data): State<Shared>,
    Path(code): Path<String>,
    Json(body): Json<StepBody>,
) -> Response {
    if let Some(reply) = malformed_reply(&code) {
        return reply;
    }
    let mut data = data.lock().await;
    let Some(client) = data.client_mut(&code) else {
        return Json(json!({ "ok": false, "error": "client not found" })).into_response();
    };
    let reply = match client.steps.iter_mut().find(|(name, _)| *name == body.step) {
        Some((_, done)) => {
            *done = !*done;
            Json(json!({ "ok": true }))
        }
        None => Json(json!({ "ok": false, "error": "step not found" })),
    };
    reply.into_response()
}

async fn delete_step(
    State(data): State<Shared>,
    Path(code): Path<String>,
    Json(body): Json<StepBody>,
) -> Json<Value> {
    let mut data = data.lock().await;
    let Some(client) = data.client_mut(&code) else {
        return Json(json!({ "ok": false, "error": "client not found" }));
    };
    let before = client.steps.len();
    client.steps.retain(|(name, _)| *name != body.step);
    if client.steps.len() == before {
        return Json(json!({ "ok": false, "error": "step not found" }));
    }
    Json(json!({ "ok": true }))
}

#[derive(Deserialize)]
struct NewClient {
    name: String,
    service: String,
}

async fn add_client(State(data): State<Shared>, Json(body): Json<NewClient>) -> Json<Value> {
    let mut data = data.lock().await;
    data.next_code += 1;
    let code = format!("C{}", data.next_code);
    data.clients.push(FakeClient {
        code: code.clone(),
        name: body.name,
        service: body.service,
        steps: Vec::new(),
        status: None,
        notes: None,
        last_update: None,
    });
    Json(json!({ "ok": true, "code": code }))
}

#[derive(Deserialize)]
struct ManageForm {
    code: String,
    step: String,
}

async fn manage(State(data): State<Shared>, Form(form): Form<ManageForm>) -> impl IntoResponse {
    let mut data = data.lock().await;
    match data.client_mut(&form.code) {
        Some(client) => {
            client.steps.push((form.step, false));
            (StatusCode::OK, "<p>saved</p>")
        }
        None => (StatusCode::NOT_FOUND, "<p>unknown client</p>"),
    }
}
