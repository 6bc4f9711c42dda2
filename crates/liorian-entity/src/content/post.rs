//! Blog post model.

use serde::{Deserialize, Serialize};

use liorian_core::events::ContentCollection;

use super::CatalogItem;

/// Publication status of a post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum PostStatus {
    /// Visible on the blog.
    Published,
    /// Work in progress.
    #[default]
    Draft,
}

/// A blog post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    /// Sequential identifier assigned by the catalog.
    #[serde(default)]
    pub id: u64,
    /// Headline.
    pub title: String,
    /// Teaser shown in listings.
    #[serde(default)]
    pub excerpt: String,
    /// Full body.
    #[serde(default)]
    pub content: String,
    /// Author name.
    #[serde(default)]
    pub author: String,
    /// Publication date label (`YYYY-MM-DD`).
    #[serde(default)]
    pub date: String,
    /// Category label.
    #[serde(default)]
    pub category: String,
    /// Publication status.
    #[serde(default)]
    pub status: PostStatus,
}

impl CatalogItem for Post {
    const COLLECTION: ContentCollection = ContentCollection::Posts;

    fn id(&self) -> u64 {
        self.id
    }

    fn set_id(&mut self, id: u64) {
        self.id = id;
    }

    fn is_visible(&self) -> bool {
        self.status == PostStatus::Published
    }

    fn title(&self) -> &str {
        &self.title
    }
}
