pub mod admin;
pub mod app;
pub mod backend;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod progress;
pub mod render;
pub mod state;
pub mod tracking;
pub mod ui;

pub use admin::AdminStepsClient;
pub use app::router;
pub use backend::Backend;
pub use config::Config;
pub use errors::ClientError;
pub use progress::{compute_progress, progress_from_status_label, ProgressColor};
pub use render::{render_checklist, ChecklistView};
pub use state::AppState;
pub use tracking::TrackingClient;
