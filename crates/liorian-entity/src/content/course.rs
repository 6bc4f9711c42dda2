//! Course model.

use serde::{Deserialize, Serialize};

use liorian_core::events::ContentCollection;

use super::CatalogItem;

/// Publication status of a course.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum CourseStatus {
    /// Listed on the site.
    #[default]
    Active,
    /// Hidden from the site.
    Inactive,
}

/// A training course.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    /// Sequential identifier assigned by the catalog.
    #[serde(default)]
    pub id: u64,
    /// Course name.
    pub name: String,
    /// Short description.
    #[serde(default)]
    pub description: String,
    /// Duration label, e.g. "12 weeks".
    #[serde(default)]
    pub duration: String,
    /// Level label, e.g. "Beginner".
    #[serde(default)]
    pub level: String,
    /// Price label as displayed.
    #[serde(default)]
    pub price: String,
    /// Instructor name.
    #[serde(default)]
    pub instructor: String,
    /// Publication status.
    #[serde(default)]
    pub status: CourseStatus,
}

impl CatalogItem for Course {
    const COLLECTION: ContentCollection = ContentCollection::Courses;

    fn id(&self) -> u64 {
        self.id
    }

    fn set_id(&mut self, id: u64) {
        self.id = id;
    }

    fn is_visible(&self) -> bool {
        self.status == CourseStatus::Active
    }

    fn title(&self) -> &str {
        &self.name
    }
}
