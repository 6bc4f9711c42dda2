//! Content catalog change events.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Which catalog collection changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentCollection {
    /// Training courses.
    Courses,
    /// Consulting services.
    Services,
    /// Blog posts.
    Posts,
}

impl fmt::Display for ContentCollection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Courses => write!(f, "courses"),
            Self::Services => write!(f, "services"),
            Self::Posts => write!(f, "posts"),
        }
    }
}

/// A mutation applied to the content catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ContentEvent {
    /// An entry was added.
    Added {
        /// The collection.
        collection: ContentCollection,
        /// The assigned id.
        id: u64,
    },
    /// An entry was updated.
    Updated {
        /// The collection.
        collection: ContentCollection,
        /// The entry id.
        id: u64,
    },
    /// An entry was deleted.
    Deleted {
        /// The collection.
        collection: ContentCollection,
        /// The entry id.
        id: u64,
    },
    /// The whole catalog was reset to defaults.
    Reset,
}
