//! View models for the tracking page and the admin panel.
//!
//! Everything here is pure: a record goes in, a serializable view comes out.
//! Writing the view into HTML is left to [`crate::ui`].

use crate::models::{AdminChecklist, ChecklistStep, ClientRecord, ProgressSummary};
use crate::progress::{compute_progress, progress_from_status_label, ProgressColor};
use serde::Serialize;

pub const DONE_GLYPH: &str = "✅";
pub const PENDING_GLYPH: &str = "⏳";
pub const DETAILS_SEPARATOR: &str = " — ";
pub const MARK_DONE_LABEL: &str = "mark done";
pub const UNDO_LABEL: &str = "undo";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChecklistView {
    Error { message: String },
    Ready(ClientView),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClientView {
    pub name: String,
    pub service: String,
    /// Legacy flat-status label, only set when the record has no checklist.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub step: Option<String>,
    pub steps: Vec<StepEntry>,
    pub progress: ProgressSummary,
    /// Percent mapped from the legacy status label; drives the bar instead of
    /// `progress` when set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_percent: Option<u8>,
    pub color: ProgressColor,
    /// Step-count summary, absent in legacy status mode.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ClientView {
    pub fn bar_percent(&self) -> u8 {
        self.status_percent.unwrap_or(self.progress.percent)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepEntry {
    pub index: usize,
    pub name: String,
    pub done: bool,
    pub done_glyph: &'static str,
}

pub fn render_checklist(record: &ClientRecord) -> ChecklistView {
    if let Some(message) = &record.error {
        return ChecklistView::Error {
            message: message.clone(),
        };
    }

    let checklist = record.checklist.as_deref().unwrap_or_default();
    let steps = step_entries(checklist);
    let progress = compute_progress(checklist);

    let legacy_status = match (&record.checklist, non_empty(&record.status)) {
        (None, Some(status)) => Some(status.to_string()),
        _ => None,
    };
    let status_percent = legacy_status.as_deref().map(progress_from_status_label);

    ClientView {
        name: record.name.clone(),
        service: record.service.clone(),
        step: legacy_status
            .as_ref()
            .and_then(|_| non_empty(&record.step))
            .map(str::to_string),
        status: legacy_status,
        steps,
        color: ProgressColor::for_percent(status_percent.unwrap_or(progress.percent)),
        summary: status_percent.is_none().then(|| summary_text(&progress)),
        status_percent,
        progress,
        details: details_line(&record.last_update, &record.notes),
    }
    .into()
}

impl From<ClientView> for ChecklistView {
    fn from(view: ClientView) -> Self {
        Self::Ready(view)
    }
}

pub fn summary_text(progress: &ProgressSummary) -> String {
    format!(
        "completed {} of {} steps ({}%)",
        progress.completed_count, progress.total_count, progress.percent
    )
}

fn step_entries(steps: &[ChecklistStep]) -> Vec<StepEntry> {
    steps
        .iter()
        .enumerate()
        .map(|(i, step)| StepEntry {
            index: i + 1,
            name: step.name.clone(),
            done: step.done,
            done_glyph: if step.done { DONE_GLYPH } else { PENDING_GLYPH },
        })
        .collect()
}

fn details_line(last_update: &Option<String>, notes: &Option<String>) -> Option<String> {
    let parts: Vec<String> = [
        non_empty(last_update).map(|value| format!("last update: {value}")),
        non_empty(notes).map(|value| format!("note: {value}")),
    ]
    .into_iter()
    .flatten()
    .collect();

    if parts.is_empty() {
        None
    } else {
        Some(parts.join(DETAILS_SEPARATOR))
    }
}

// Empty and absent are the same thing to the page.
fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AdminPanelView {
    Error { code: String, message: String },
    Ready(AdminClientView),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdminClientView {
    pub code: String,
    pub name: String,
    pub service: String,
    pub steps: Vec<AdminStepEntry>,
    pub progress: ProgressSummary,
    pub summary: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdminStepEntry {
    pub name: String,
    pub done: bool,
    pub toggle_label: &'static str,
}

pub fn render_admin_panel(code: &str, checklist: &AdminChecklist) -> AdminPanelView {
    if let Some(message) = &checklist.error {
        return AdminPanelView::Error {
            code: code.to_string(),
            message: message.clone(),
        };
    }

    let progress = compute_progress(&checklist.steps);
    AdminPanelView::Ready(AdminClientView {
        code: code.to_string(),
        name: checklist.name.clone(),
        service: checklist.service.clone(),
        steps: checklist
            .steps
            .iter()
            .map(|step| AdminStepEntry {
                name: step.name.clone(),
                done: step.done,
                toggle_label: if step.done { UNDO_LABEL } else { MARK_DONE_LABEL },
            })
            .collect(),
        summary: summary_text(&progress),
        progress,
    })
}
