//! Content catalog configuration.

use serde::{Deserialize, Serialize};

/// Storage keys and retention for the content catalog and training data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentConfig {
    /// Key holding the serialized course array.
    #[serde(default = "default_courses_key")]
    pub courses_key: String,
    /// Key holding the serialized service array.
    #[serde(default = "default_services_key")]
    pub services_key: String,
    /// Key holding the serialized post array.
    #[serde(default = "default_posts_key")]
    pub posts_key: String,
    /// Age in days after which training blobs are removed by cleanup.
    #[serde(default = "default_retention_days")]
    pub training_retention_days: u32,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            courses_key: default_courses_key(),
            services_key: default_services_key(),
            posts_key: default_posts_key(),
            training_retention_days: default_retention_days(),
        }
    }
}

fn default_courses_key() -> String {
    "liorian_courses".to_string()
}

fn default_services_key() -> String {
    "liorian_services".to_string()
}

fn default_posts_key() -> String {
    "liorian_posts".to_string()
}

fn default_retention_days() -> u32 {
    90
}
