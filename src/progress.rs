use crate::models::{ChecklistStep, ProgressSummary};
use serde::Serialize;

/// Percentage used for any status label outside the known vocabulary.
pub const UNKNOWN_STATUS_PERCENT: u8 = 30;

const STATUS_TABLE: &[(&str, u8)] = &[
    ("received", 20),
    ("in-progress", 40),
    ("submitted", 60),
    ("awaiting-reply", 80),
    ("complete", 100),
    // Labels still stored by older sheets.
    ("مستلم", 20),
    ("قيد الإجراء", 40),
    ("تم التقديم", 60),
    ("بانتظار الرد", 80),
    ("مكتمل", 100),
];

pub fn compute_progress(steps: &[ChecklistStep]) -> ProgressSummary {
    let total_count = steps.len();
    let completed_count = steps.iter().filter(|step| step.done).count();

    ProgressSummary {
        percent: percent_of(completed_count, total_count),
        completed_count,
        total_count,
    }
}

/// Round-half-up of `100 * completed / total`, 0 for an empty checklist.
fn percent_of(completed: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let completed = completed.min(total) as u64;
    let total = total as u64;
    ((200 * completed + total) / (2 * total)) as u8
}

/// Exact-match lookup, no trimming or case folding.
pub fn progress_from_status_label(label: &str) -> u8 {
    STATUS_TABLE
        .iter()
        .find(|(known, _)| *known == label)
        .map(|(_, percent)| *percent)
        .unwrap_or(UNKNOWN_STATUS_PERCENT)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProgressColor {
    Complete,
    InProgress,
}

impl ProgressColor {
    pub fn for_percent(percent: u8) -> Self {
        if percent == 100 {
            Self::Complete
        } else {
            Self::InProgress
        }
    }

    pub fn css_class(self) -> &'static str {
        match self {
            Self::Complete => "complete",
            Self::InProgress => "in-progress",
        }
    }

    pub fn gradient(self) -> &'static str {
        match self {
            Self::Complete => "linear-gradient(90deg,#28a745,#1db954)",
            Self::InProgress => "linear-gradient(90deg,#1e3a8a,#2563eb)",
        }
    }
}
