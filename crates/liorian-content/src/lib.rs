//! # liorian-content
//!
//! The content catalog behind the marketing pages and the admin screens:
//! courses, services and blog posts, each persisted as one JSON array in
//! the key-value store, with change notifications for subscribers.

pub mod catalog;
pub mod collection;
pub mod defaults;
pub mod observer;

pub use catalog::ContentCatalog;
pub use collection::Collection;
pub use observer::{CatalogObserver, SubscriptionId};
