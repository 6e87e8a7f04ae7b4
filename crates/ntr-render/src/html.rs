//! Analysis result → HTML fragment
//!
//! The error shape renders as a single line; the success shape renders a
//! header, summary, recommended action, and one row per checklist item in
//! array order.

use crate::linkify::linkify;
use ntr_model::{AnalysisError, AnalysisReport, CheckItem, CheckStatus};

const HEADING: &str = "<h3>NTR Issue Analysis</h3>";

/// Glyph markup for a checklist status.
///
/// Fixed table: success for `Ok`, neutral for `NotApplicable`, warning for
/// the three deficiency statuses. Anything else falls through to the error
/// glyph and is logged — never a panic.
#[must_use]
pub fn status_icon(status: &CheckStatus) -> &'static str {
    match status {
        CheckStatus::Ok => r#"<span class="status-icon success">✔</span>"#,
        CheckStatus::NotApplicable => r#"<span class="status-icon na">-</span>"#,
        CheckStatus::Missing | CheckStatus::Incomplete | CheckStatus::InvalidFormat => {
            r#"<span class="status-icon warning">⚠️</span>"#
        }
        CheckStatus::Unrecognized(raw) => {
            tracing::warn!(status = %raw, "unknown status received from the model");
            r#"<span class="status-icon error">✖</span>"#
        }
    }
}

fn render_check(item: &CheckItem) -> String {
    let comment = linkify(item.comment.as_deref().unwrap_or("No comment provided."));
    format!(
        "<div class=\"analysis-item\">{icon}<div><strong>{field}:</strong> {comment}</div></div>",
        icon = status_icon(&item.status),
        field = item.field,
    )
}

fn render_report(report: &AnalysisReport) -> String {
    let summary = report.summary.as_deref().unwrap_or("");
    let action = report
        .recommended_action
        .as_deref()
        .unwrap_or("NONE")
        .replace('_', " ");
    let action_comment = report.action_comment.as_deref().unwrap_or("");
    let checks: String = report.checks.iter().map(|item| render_check(item)).collect();

    format!(
        "{HEADING}\
         <p><strong>Summary:</strong> {summary}</p>\
         <p><strong>Recommended Action:</strong> <strong>{action}</strong> - {action_comment}</p>\
         <hr style=\"border-color: #d0d7de; margin: 12px 0;\">\
         <h4>Template Checklist</h4>\
         {checks}"
    )
}

fn render_error(error: &AnalysisError) -> String {
    if error.is_precondition() {
        return format!("<p style=\"color: #d29922;\">{error}</p>");
    }
    format!("<p style=\"color: #d1242f;\">Error during analysis: {error}</p>")
}

/// Render an analysis outcome as an HTML fragment.
///
/// Pure and deterministic: identical inputs produce byte-identical output.
#[must_use]
pub fn render(result: &Result<AnalysisReport, AnalysisError>) -> String {
    match result {
        Ok(report) => render_report(report),
        Err(error) => render_error(error),
    }
}
