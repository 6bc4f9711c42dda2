//! Catalog entries shown on the marketing pages and managed by admins.

pub mod course;
pub mod post;
pub mod service;

use serde::Serialize;
use serde::de::DeserializeOwned;

use liorian_core::events::ContentCollection;

pub use course::{Course, CourseStatus};
pub use post::{Post, PostStatus};
pub use service::{Service, ServiceStatus};

/// Common behaviour of every catalog entry.
pub trait CatalogItem:
    Clone + Serialize + DeserializeOwned + Send + Sync + std::fmt::Debug + 'static
{
    /// Which collection this entry belongs to.
    const COLLECTION: ContentCollection;

    /// Numeric identifier.
    fn id(&self) -> u64;

    /// Overwrite the identifier (used when the catalog assigns one).
    fn set_id(&mut self, id: u64);

    /// Whether the entry is shown publicly (`Active` / `Published`).
    fn is_visible(&self) -> bool;

    /// Human-readable title for listings.
    fn title(&self) -> &str;
}
