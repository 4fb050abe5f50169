use crate::backend::{decode_json, decode_object, transport_failure, Backend};
use crate::errors::{ClientError, TRANSPORT_MESSAGE};
use crate::models::{
    AddClientOutcome, AddClientRequest, AdminChecklist, ClientSummary, Outcome, StepRequest,
};
use reqwest::{header::COOKIE, RequestBuilder};
use tracing::{info, warn};

pub const EMPTY_STEP_MESSAGE: &str = "please enter a step name";
pub const EMPTY_CLIENT_NAME_MESSAGE: &str = "please enter the client name";

/// Admin operations against the backend.
///
/// Authentication belongs to the backend; the caller's session cookie is
/// forwarded as-is. Mutations are attempt-once and never deduplicated here.
#[derive(Debug, Clone)]
pub struct AdminStepsClient {
    backend: Backend,
    session: Option<String>,
}

impl AdminStepsClient {
    pub fn new(backend: Backend) -> Self {
        Self {
            backend,
            session: None,
        }
    }

    pub fn with_session(mut self, cookie: Option<String>) -> Self {
        self.session = cookie;
        self
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.session {
            Some(cookie) => request.header(COOKIE, cookie),
            None => request,
        }
    }

    pub async fn list_clients(&self) -> Result<Vec<ClientSummary>, ClientError> {
        let url = self.backend.endpoint(&["admin", "api", "clients"])?;
        let response = self
            .authorize(self.backend.http().get(url))
            .send()
            .await
            .map_err(|err| transport_failure("list clients", err))?;

        if !response.status().is_success() {
            warn!(status = %response.status(), "client list rejected");
            return Err(ClientError::Unauthorized);
        }
        decode_json(response, "list clients").await
    }

    pub async fn get_checklist(&self, code: &str) -> Result<AdminChecklist, ClientError> {
        let url = self
            .backend
            .endpoint(&["admin", "api", "client", code, "checklist"])?;
        let response = self
            .authorize(self.backend.http().get(url))
            .send()
            .await
            .map_err(|err| transport_failure("checklist", err))?;

        let checklist: AdminChecklist =
            decode_object(response, "checklist", &["steps", "error"]).await?;
        match checklist.error {
            Some(message) => Err(ClientError::NotFound(message)),
            None => Ok(checklist),
        }
    }

    pub async fn toggle_step(&self, code: &str, step: &str) -> Outcome {
        self.post_step(code, "toggle-step", step).await
    }

    /// Removes the step for good. Callers confirm with the user first.
    pub async fn delete_step(&self, code: &str, step: &str) -> Outcome {
        self.post_step(code, "delete-step", step).await
    }

    async fn post_step(&self, code: &str, action: &str, step: &str) -> Outcome {
        let result: Result<Outcome, ClientError> = async {
            let url = self
                .backend
                .endpoint(&["admin", "api", "client", code, action])?;
            let response = self
                .authorize(self.backend.http().post(url))
                .json(&StepRequest {
                    step: step.to_string(),
                })
                .send()
                .await
                .map_err(|err| transport_failure(action, err))?;
            decode_object::<Outcome>(response, action, &["ok"]).await
        }
        .await;

        match result {
            Ok(outcome) => {
                if outcome.ok {
                    info!(%code, %step, action, "step updated");
                }
                outcome
            }
            Err(err) => Outcome::failure(err.to_string()),
        }
    }

    /// Appends a step through the legacy `/admin/manage` form endpoint.
    ///
    /// The response body is not structured; any 2xx reply counts as success.
    pub async fn add_step(&self, code: &str, step: &str) -> Outcome {
        let step = step.trim();
        if step.is_empty() {
            return Outcome::failure(EMPTY_STEP_MESSAGE);
        }

        let url = match self.backend.endpoint(&["admin", "manage"]) {
            Ok(url) => url,
            Err(err) => return Outcome::failure(err.to_string()),
        };
        let sent = self
            .authorize(self.backend.http().post(url))
            .form(&[("code", code), ("step", step)])
            .send()
            .await;

        match sent {
            Ok(response) if response.status().is_success() => {
                info!(%code, %step, "step added");
                Outcome::success()
            }
            Ok(response) => {
                warn!(status = %response.status(), %code, "add step rejected");
                Outcome::failure(format!("server answered {}", response.status()))
            }
            Err(err) => Outcome::failure(transport_failure("add step", err).to_string()),
        }
    }

    pub async fn add_client(&self, name: &str, service: &str) -> AddClientOutcome {
        let name = name.trim();
        if name.is_empty() {
            return AddClientOutcome::failure(EMPTY_CLIENT_NAME_MESSAGE);
        }

        let result: Result<AddClientOutcome, ClientError> = async {
            let url = self.backend.endpoint(&["admin", "api", "add-client"])?;
            let response = self
                .authorize(self.backend.http().post(url))
                .json(&AddClientRequest {
                    name: name.to_string(),
                    service: service.trim().to_string(),
                })
                .send()
                .await
                .map_err(|err| transport_failure("add client", err))?;
            decode_object::<AddClientOutcome>(response, "add client", &["ok"]).await
        }
        .await;

        match result {
            Ok(outcome) => {
                if let (true, Some(code)) = (outcome.ok, &outcome.code) {
                    info!(%code, "client added");
                }
                outcome
            }
            Err(_) => AddClientOutcome::failure(TRANSPORT_MESSAGE),
        }
    }
}
