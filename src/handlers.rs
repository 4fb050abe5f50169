use crate::errors::{AppError, ClientError, TRANSPORT_MESSAGE};
use crate::models::{AddClientOutcome, ClientRecord, Outcome, TrackingResult};
use crate::render::{render_admin_panel, render_checklist, AdminPanelView, ChecklistView};
use crate::state::AppState;
use crate::tracking::normalize_code;
use crate::ui::{encode, render_admin_page, render_client_page, render_delete_confirm, render_index, AdminPage};
use axum::{
    extract::{Path, Query, State},
    http::{header::COOKIE, HeaderMap, StatusCode},
    response::{Html, Redirect},
    Form, Json,
};
use serde::Deserialize;
use tracing::warn;

pub const DELETE_UNCONFIRMED_MESSAGE: &str = "deleting a step needs confirmation";

#[derive(Debug, Default, Deserialize)]
pub struct IndexQuery {
    pub error: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct CodeQuery {
    #[serde(default)]
    pub code: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct AdminQuery {
    pub client: Option<String>,
    pub notice: Option<String>,
    pub error: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct StepForm {
    #[serde(default)]
    pub step: String,
    pub confirm: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct NewClientForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub service: String,
}

pub async fn index(Query(query): Query<IndexQuery>) -> Html<String> {
    Html(render_index(query.error.as_deref()))
}

/// Form target of the home page: normalizes the code and sends the user to
/// the client's own page.
pub async fn track_home(Query(query): Query<CodeQuery>) -> Redirect {
    match normalize_code(&query.code) {
        Ok(code) => Redirect::to(&format!("/client/{}", encode(&code))),
        Err(err) => Redirect::to(&format!("/?error={}", encode(&err.to_string()))),
    }
}

pub async fn client_page(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> (StatusCode, Html<String>) {
    let (status, view) = match state.tracking.fetch_by_code(&code).await {
        Ok(TrackingResult::Found(record)) => (StatusCode::OK, render_checklist(&record)),
        Ok(TrackingResult::NotFound(message)) => (StatusCode::NOT_FOUND, error_view(message)),
        Ok(TrackingResult::TransportError) => (StatusCode::BAD_GATEWAY, error_view(TRANSPORT_MESSAGE)),
        Err(err) => (err.status(), error_view(err.to_string())),
    };
    let code = normalize_code(&code).unwrap_or(code);
    (status, Html(render_client_page(&code, &view)))
}

pub async fn track_api(
    State(state): State<AppState>,
    Query(query): Query<CodeQuery>,
) -> Result<Json<ChecklistView>, AppError> {
    match state.tracking.fetch_by_code(&query.code).await? {
        TrackingResult::Found(record) => Ok(Json(render_checklist(&record))),
        TrackingResult::NotFound(message) => Err(ClientError::NotFound(message).into()),
        TrackingResult::TransportError => Err(ClientError::Transport.into()),
    }
}

fn error_view(message: impl Into<String>) -> ChecklistView {
    render_checklist(&ClientRecord {
        error: Some(message.into()),
        ..ClientRecord::default()
    })
}

pub async fn admin_console(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<AdminQuery>,
) -> (StatusCode, Html<String>) {
    let admin = state.admin(session_cookie(&headers));

    let (status, clients) = match admin.list_clients().await {
        Ok(clients) => (StatusCode::OK, Ok(clients)),
        Err(err) => (err.status(), Err(err.to_string())),
    };

    let panel = match query.client.as_deref().filter(|code| !code.is_empty()) {
        Some(code) => Some(match admin.get_checklist(code).await {
            Ok(checklist) => render_admin_panel(code, &checklist),
            Err(err) => AdminPanelView::Error {
                code: code.to_string(),
                message: err.to_string(),
            },
        }),
        None => None,
    };

    let page = AdminPage {
        clients,
        panel,
        notice: query.notice,
        error: query.error,
    };
    (status, Html(render_admin_page(&page)))
}

pub async fn add_client(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<NewClientForm>,
) -> Redirect {
    let outcome = state
        .admin(session_cookie(&headers))
        .add_client(&form.name, &form.service)
        .await;

    match outcome {
        AddClientOutcome {
            ok: true,
            code: Some(code),
            ..
        } => admin_redirect(Some(code.as_str()), Ok(format!("client added, tracking code: {code}").as_str())),
        AddClientOutcome { ok: true, .. } => admin_redirect(None, Ok("client added")),
        AddClientOutcome { error, .. } => admin_redirect(None, Err(failure_message(error).as_str())),
    }
}

pub async fn add_step(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(code): Path<String>,
    Form(form): Form<StepForm>,
) -> Redirect {
    let outcome = state
        .admin(session_cookie(&headers))
        .add_step(&code, &form.step)
        .await;
    step_redirect(&code, outcome, "step added")
}

pub async fn toggle_step(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(code): Path<String>,
    Form(form): Form<StepForm>,
) -> Redirect {
    let outcome = state
        .admin(session_cookie(&headers))
        .toggle_step(&code, &form.step)
        .await;
    step_redirect(&code, outcome, "step updated")
}

pub async fn confirm_delete(
    Path(code): Path<String>,
    Query(form): Query<StepForm>,
) -> Result<Html<String>, AppError> {
    if form.step.is_empty() {
        return Err(AppError::bad_request("missing step"));
    }
    Ok(Html(render_delete_confirm(&code, &form.step)))
}

pub async fn delete_step(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(code): Path<String>,
    Form(form): Form<StepForm>,
) -> Redirect {
    if form.confirm.as_deref() != Some("yes") {
        return admin_redirect(Some(code.as_str()), Err(DELETE_UNCONFIRMED_MESSAGE));
    }
    let outcome = state
        .admin(session_cookie(&headers))
        .delete_step(&code, &form.step)
        .await;
    step_redirect(&code, outcome, "step deleted")
}

fn step_redirect(code: &str, outcome: Outcome, success: &str) -> Redirect {
    if outcome.ok {
        admin_redirect(Some(code), Ok(success))
    } else {
        let message = failure_message(outcome.error);
        warn!(%code, %message, "admin action failed");
        admin_redirect(Some(code), Err(message.as_str()))
    }
}

fn failure_message(error: Option<String>) -> String {
    match error.filter(|e| !e.is_empty()) {
        Some(error) => format!("error: {error}"),
        None => "error: the server did not accept the change".to_string(),
    }
}

/// Sends the browser back to the console, which re-reads everything from
/// the backend.
fn admin_redirect(code: Option<&str>, message: Result<&str, &str>) -> Redirect {
    let mut target = String::from("/admin?");
    if let Some(code) = code {
        target.push_str(&format!("client={}&", encode(code)));
    }
    match message {
        Ok(notice) => target.push_str(&format!("notice={}", encode(notice))),
        Err(error) => target.push_str(&format!("error={}", encode(error))),
    }
    Redirect::to(&target)
}

fn session_cookie(headers: &HeaderMap) -> Option<String> {
    headers
        .get(COOKIE)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
}
