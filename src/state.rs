use crate::admin::AdminStepsClient;
use crate::backend::Backend;
use crate::tracking::TrackingClient;
use reqwest::Url;

#[derive(Clone)]
pub struct AppState {
    pub backend: Backend,
    pub tracking: TrackingClient,
}

impl AppState {
    pub fn new(backend_url: Url) -> Self {
        let backend = Backend::new(backend_url);
        Self {
            tracking: TrackingClient::new(backend.clone()),
            backend,
        }
    }

    /// Admin client carrying the browser's session cookie through to the backend.
    pub fn admin(&self, session: Option<String>) -> AdminStepsClient {
        AdminStepsClient::new(self.backend.clone()).with_session(session)
    }
}
