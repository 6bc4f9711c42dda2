//! Training record models.
//!
//! Fields the platform does not interpret are kept in `extra` so a record
//! read back from storage equals the record that was saved.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::string_or_number;

/// Progress of one user through one module.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressRecord {
    /// User identifier.
    #[serde(deserialize_with = "string_or_number")]
    pub user_id: String,
    /// Course identifier.
    #[serde(deserialize_with = "string_or_number")]
    pub course_id: String,
    /// Module identifier.
    #[serde(deserialize_with = "string_or_number")]
    pub module_id: String,
    /// Completion percentage (0-100).
    #[serde(default)]
    pub progress: f64,
    /// Whether the module is finished.
    #[serde(default)]
    pub completed: bool,
    /// Seconds spent in the module.
    #[serde(default)]
    pub time_spent: u64,
    /// Client timestamp of the last access.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_accessed: Option<String>,
    /// Any other fields sent by the client.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Result of one quiz attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizResult {
    /// User identifier.
    #[serde(deserialize_with = "string_or_number")]
    pub user_id: String,
    /// Course identifier.
    #[serde(deserialize_with = "string_or_number")]
    pub course_id: String,
    /// Module identifier.
    #[serde(deserialize_with = "string_or_number")]
    pub module_id: String,
    /// Quiz identifier, when a module has several quizzes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quiz_id: Option<String>,
    /// Score achieved.
    #[serde(default)]
    pub score: f64,
    /// Number of questions asked.
    #[serde(default)]
    pub total_questions: u32,
    /// Whether the pass mark was reached.
    #[serde(default)]
    pub passed: bool,
    /// Submitted answers as sent by the client.
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub answers: Value,
    /// Client timestamp of completion.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<String>,
    /// Any other fields sent by the client.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A generated training report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainingReport {
    /// User the report is about.
    #[serde(deserialize_with = "string_or_number")]
    pub user_id: String,
    /// Report kind, e.g. "progress-summary".
    pub report_type: String,
    /// Client timestamp of generation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generated_at: Option<String>,
    /// Report body.
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub data: Value,
    /// Any other fields sent by the client.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Everything stored for one user, as returned by the admin overview.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserTrainingData {
    /// Progress records, oldest first.
    pub progress: Vec<ProgressRecord>,
    /// Quiz results, oldest first.
    pub quiz_results: Vec<QuizResult>,
}
