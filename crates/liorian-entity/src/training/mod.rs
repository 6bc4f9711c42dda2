//! Training progress, quiz and report records stored as JSON blobs.

pub mod model;

pub use model::{ProgressRecord, QuizResult, TrainingReport, UserTrainingData};

use serde::{Deserialize, Deserializer};

/// Accept identifiers sent either as JSON strings or numbers.
pub(crate) fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Int(i64),
        Float(f64),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(s) => s,
        Raw::Int(n) => n.to_string(),
        Raw::Float(n) => n.to_string(),
    })
}
