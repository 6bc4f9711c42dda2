//! Consulting service model.

use serde::{Deserialize, Serialize};

use liorian_core::events::ContentCollection;

use super::CatalogItem;

/// Publication status of a service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ServiceStatus {
    /// Listed on the site.
    #[default]
    Active,
    /// Hidden from the site.
    Inactive,
}

/// A service offered by the company.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    /// Sequential identifier assigned by the catalog.
    #[serde(default)]
    pub id: u64,
    /// Service title.
    pub title: String,
    /// Description.
    #[serde(default)]
    pub description: String,
    /// Icon name used by the front end.
    #[serde(default)]
    pub icon: String,
    /// Bullet-point features.
    #[serde(default)]
    pub features: Vec<String>,
    /// Publication status.
    #[serde(default)]
    pub status: ServiceStatus,
}

impl CatalogItem for Service {
    const COLLECTION: ContentCollection = ContentCollection::Services;

    fn id(&self) -> u64 {
        self.id
    }

    fn set_id(&mut self, id: u64) {
        self.id = id;
    }

    fn is_visible(&self) -> bool {
        self.status == ServiceStatus::Active
    }

    fn title(&self) -> &str {
        &self.title
    }
}
