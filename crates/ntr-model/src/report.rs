//! Structured analysis report
//!
//! The model's final answer enters as an untrusted `serde_json::Value` and
//! is shape-validated here before anything else touches it. Validation is
//! structural only: the `checks` array must exist and be well-formed, while
//! the documented optional fields degrade to `None` and are handled by the
//! renderer's fallbacks. Content correctness (e.g. whether the model obeyed
//! a commanded status) is trusted, not re-verified.

use crate::error::AnalysisError;
use serde_json::Value;

/// Status of a single checklist item
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckStatus {
    /// Requirement satisfied
    Ok,
    /// Requirement absent
    Missing,
    /// Requirement present but incomplete
    Incomplete,
    /// Requirement present but malformed
    InvalidFormat,
    /// Requirement does not apply to this issue
    NotApplicable,
    /// Anything else the model produced; preserved verbatim, never rejected
    Unrecognized(String),
}

impl CheckStatus {
    /// Parse a raw status string from the model, case-insensitively.
    ///
    /// Unknown values are preserved as `Unrecognized` so the renderer can
    /// fall through to its error glyph without failing the run.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        match raw.to_uppercase().as_str() {
            "OK" => Self::Ok,
            "MISSING" => Self::Missing,
            "INCOMPLETE" => Self::Incomplete,
            "INVALID_FORMAT" => Self::InvalidFormat,
            "NOT_APPLICABLE" => Self::NotApplicable,
            _ => Self::Unrecognized(raw.to_string()),
        }
    }

    /// Check if the status is one of the defined wire values
    #[inline]
    #[must_use]
    pub fn is_recognized(&self) -> bool {
        !matches!(self, Self::Unrecognized(_))
    }
}

impl std::fmt::Display for CheckStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ok => write!(f, "OK"),
            Self::Missing => write!(f, "MISSING"),
            Self::Incomplete => write!(f, "INCOMPLETE"),
            Self::InvalidFormat => write!(f, "INVALID_FORMAT"),
            Self::NotApplicable => write!(f, "NOT_APPLICABLE"),
            Self::Unrecognized(raw) => write!(f, "{raw}"),
        }
    }
}

/// One checklist row of the analysis.
///
/// Ordering of items is significant and workflow-dependent: 5 fields for
/// the simple workflow, 6 for the gene workflow with "Gene Identifier"
/// always last.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckItem {
    /// Template field the check refers to, e.g. "Definition"
    pub field: String,
    /// Check outcome
    pub status: CheckStatus,
    /// Free-text curator comment; may contain URLs
    pub comment: Option<String>,
}

impl CheckItem {
    /// Create new check item
    #[inline]
    #[must_use]
    pub fn new(field: impl Into<String>, status: CheckStatus, comment: Option<String>) -> Self {
        Self {
            field: field.into(),
            status,
            comment,
        }
    }
}

/// The success shape of an analysis run.
///
/// The full result of a run is `Result<AnalysisReport, AnalysisError>`:
/// exactly one side exists, constructed fresh per run and discarded when
/// the next run starts.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AnalysisReport {
    /// One-paragraph summary of the issue
    pub summary: Option<String>,
    /// Ordered checklist rows
    pub checks: Vec<CheckItem>,
    /// Recommended curator action, e.g. "READY_FOR_CURATOR"
    pub recommended_action: Option<String>,
    /// Free-text rationale for the recommended action
    pub action_comment: Option<String>,
}

impl AnalysisReport {
    /// Validate and convert the model's raw JSON into a report.
    ///
    /// # Errors
    /// `MalformedUpstreamResponse` if `checks` is absent, not an array, or
    /// contains an entry whose `field` is not a string. All other fields
    /// are lenient: absent or mistyped values become `None`.
    pub fn from_value(value: &Value) -> Result<Self, AnalysisError> {
        let checks_value = value.get("checks").ok_or_else(|| {
            AnalysisError::MalformedUpstreamResponse("response has no 'checks' field".into())
        })?;
        let raw_checks = checks_value.as_array().ok_or_else(|| {
            AnalysisError::MalformedUpstreamResponse("'checks' is not an array".into())
        })?;

        let mut checks = Vec::with_capacity(raw_checks.len());
        for (index, entry) in raw_checks.iter().enumerate() {
            let field = entry
                .get("field")
                .and_then(Value::as_str)
                .ok_or_else(|| {
                    AnalysisError::MalformedUpstreamResponse(format!(
                        "checks[{index}] has no string 'field'"
                    ))
                })?;
            let status = entry
                .get("status")
                .and_then(Value::as_str)
                .map(CheckStatus::parse)
                .unwrap_or_else(|| CheckStatus::Unrecognized(String::new()));
            let comment = entry
                .get("comment")
                .and_then(Value::as_str)
                .map(str::to_string);
            checks.push(CheckItem::new(field, status, comment));
        }

        Ok(Self {
            summary: string_field(value, "summary"),
            checks,
            recommended_action: string_field(value, "recommendedAction"),
            action_comment: string_field(value, "actionComment"),
        })
    }

    /// Field names of the checklist, in order
    #[must_use]
    pub fn check_fields(&self) -> Vec<&str> {
        self.checks.iter().map(|c| c.field.as_str()).collect()
    }
}

fn string_field(value: &Value, key: &str) -> Option<String> {
    value.get(key).and_then(Value::as_str).map(str::to_string)
}
