use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/track", get(handlers::track_home))
        .route("/client/:code", get(handlers::client_page))
        .route("/api/track", get(handlers::track_api))
        .route("/admin", get(handlers::admin_console))
        .route("/admin/clients", post(handlers::add_client))
        .route("/admin/client/:code/steps", post(handlers::add_step))
        .route("/admin/client/:code/toggle", post(handlers::toggle_step))
        .route(
            "/admin/client/:code/delete",
            get(handlers::confirm_delete).post(handlers::delete_step),
        )
        .with_state(state)
}
