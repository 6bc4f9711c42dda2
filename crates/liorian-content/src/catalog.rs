//! The content catalog: three collections, persistence and notifications.

use std::sync::Arc;

use serde_json::Value;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use liorian_core::config::content::ContentConfig;
use liorian_core::events::ContentEvent;
use liorian_core::result::AppResult;
use liorian_core::traits::KeyValueStore;
use liorian_entity::content::{CatalogItem, Course, Post, Service};

use crate::collection::Collection;
use crate::defaults;
use crate::observer::{CatalogObserver, Observers, SubscriptionId};

/// Courses, services and posts with change notifications.
///
/// Each mutation persists the whole affected array under its key before
/// the in-memory copy changes, then notifies subscribers once.
pub struct ContentCatalog {
    store: Arc<dyn KeyValueStore>,
    config: ContentConfig,
    courses: RwLock<Collection<Course>>,
    services: RwLock<Collection<Service>>,
    posts: RwLock<Collection<Post>>,
    observers: Observers,
}

impl std::fmt::Debug for ContentCatalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContentCatalog")
            .field("store", &self.store.provider_type())
            .field("config", &self.config)
            .field("subscribers", &self.observers.len())
            .finish()
    }
}

impl ContentCatalog {
    /// Create a catalog holding the defaults, without touching storage.
    pub fn new(store: Arc<dyn KeyValueStore>, config: ContentConfig) -> Self {
        Self {
            store,
            config,
            courses: RwLock::new(Collection::new(defaults::courses())),
            services: RwLock::new(Collection::new(defaults::services())),
            posts: RwLock::new(Collection::new(defaults::posts())),
            observers: Observers::default(),
        }
    }

    /// Create a catalog and hydrate it from storage.
    pub async fn load(store: Arc<dyn KeyValueStore>, config: ContentConfig) -> AppResult<Self> {
        let catalog = Self::new(store, config);
        catalog.load_from_storage().await?;
        Ok(catalog)
    }

    /// Replace each collection with its stored array.
    ///
    /// A missing key is seeded with the defaults. An unreadable value is
    /// logged and the defaults are used without overwriting it.
    pub async fn load_from_storage(&self) -> AppResult<()> {
        let courses = self.hydrate(&self.config.courses_key, defaults::courses).await?;
        let services = self.hydrate(&self.config.services_key, defaults::services).await?;
        let posts = self.hydrate(&self.config.posts_key, defaults::posts).await?;

        info!(
            courses = courses.len(),
            services = services.len(),
            posts = posts.len(),
            "Content catalog loaded"
        );

        *self.courses.write().await = Collection::new(courses);
        *self.services.write().await = Collection::new(services);
        *self.posts.write().await = Collection::new(posts);
        Ok(())
    }

    /// Remove the stored arrays, reinstate and persist the defaults, and
    /// notify subscribers.
    pub async fn clear_storage_and_reset(&self) -> AppResult<()> {
        let mut courses = self.courses.write().await;
        let mut services = self.services.write().await;
        let mut posts = self.posts.write().await;

        self.store
            .remove_all(&[
                self.config.courses_key.as_str(),
                self.config.services_key.as_str(),
                self.config.posts_key.as_str(),
            ])
            .await?;

        let (default_courses, default_services, default_posts) =
            (defaults::courses(), defaults::services(), defaults::posts());
        self.store
            .set_json(&self.config.courses_key, &default_courses)
            .await?;
        self.store
            .set_json(&self.config.services_key, &default_services)
            .await?;
        self.store
            .set_json(&self.config.posts_key, &default_posts)
            .await?;

        *courses = Collection::new(default_courses);
        *services = Collection::new(default_services);
        *posts = Collection::new(default_posts);
        drop((courses, services, posts));

        info!("Content catalog reset to defaults");
        self.observers.notify(&ContentEvent::Reset);
        Ok(())
    }

    /// Register `observer` for change notifications.
    pub fn subscribe(&self, observer: Arc<dyn CatalogObserver>) -> SubscriptionId {
        self.observers.add(observer)
    }

    /// Stop notifying a subscriber. Returns whether it was registered.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.observers.remove(id)
    }

    // ── Courses ─────────────────────────────────────────────

    /// Active courses.
    pub async fn get_courses(&self) -> Vec<Course> {
        self.courses.read().await.visible()
    }

    /// Every course.
    pub async fn get_all_courses(&self) -> Vec<Course> {
        self.courses.read().await.all().to_vec()
    }

    /// Course by id.
    pub async fn get_course_by_id(&self, id: u64) -> Option<Course> {
        self.courses.read().await.get(id).cloned()
    }

    /// Add a course under the next id.
    pub async fn add_course(&self, course: Course) -> AppResult<Course> {
        let key = self.config.courses_key.clone();
        self.mutate(&self.courses, &key, |c| Ok(c.add(course))).await
    }

    /// Merge `patch` into course `id`.
    pub async fn update_course(&self, id: u64, patch: &Value) -> AppResult<Course> {
        let key = self.config.courses_key.clone();
        self.mutate(&self.courses, &key, |c| c.update(id, patch)).await
    }

    /// Delete course `id`.
    pub async fn delete_course(&self, id: u64) -> AppResult<Course> {
        let key = self.config.courses_key.clone();
        self.remove(&self.courses, &key, id).await
    }

    // ── Services ────────────────────────────────────────────

    /// Active services.
    pub async fn get_services(&self) -> Vec<Service> {
        self.services.read().await.visible()
    }

    /// Every service.
    pub async fn get_all_services(&self) -> Vec<Service> {
        self.services.read().await.all().to_vec()
    }

    /// Service by id.
    pub async fn get_service_by_id(&self, id: u64) -> Option<Service> {
        self.services.read().await.get(id).cloned()
    }

    /// Add a service under the next id.
    pub async fn add_service(&self, service: Service) -> AppResult<Service> {
        let key = self.config.services_key.clone();
        self.mutate(&self.services, &key, |c| Ok(c.add(service))).await
    }

    /// Merge `patch` into service `id`.
    pub async fn update_service(&self, id: u64, patch: &Value) -> AppResult<Service> {
        let key = self.config.services_key.clone();
        self.mutate(&self.services, &key, |c| c.update(id, patch)).await
    }

    /// Delete service `id`.
    pub async fn delete_service(&self, id: u64) -> AppResult<Service> {
        let key = self.config.services_key.clone();
        self.remove(&self.services, &key, id).await
    }

    // ── Posts ───────────────────────────────────────────────

    /// Published posts.
    pub async fn get_posts(&self) -> Vec<Post> {
        self.posts.read().await.visible()
    }

    /// Every post, drafts included.
    pub async fn get_all_posts(&self) -> Vec<Post> {
        self.posts.read().await.all().to_vec()
    }

    /// Post by id.
    pub async fn get_post_by_id(&self, id: u64) -> Option<Post> {
        self.posts.read().await.get(id).cloned()
    }

    /// Add a post under the next id.
    pub async fn add_post(&self, post: Post) -> AppResult<Post> {
        let key = self.config.posts_key.clone();
        self.mutate(&self.posts, &key, |c| Ok(c.add(post))).await
    }

    /// Merge `patch` into post `id`.
    pub async fn update_post(&self, id: u64, patch: &Value) -> AppResult<Post> {
        let key = self.config.posts_key.clone();
        self.mutate(&self.posts, &key, |c| c.update(id, patch)).await
    }

    /// Delete post `id`.
    pub async fn delete_post(&self, id: u64) -> AppResult<Post> {
        let key = self.config.posts_key.clone();
        self.remove(&self.posts, &key, id).await
    }

    // ── Internals ───────────────────────────────────────────

    async fn hydrate<T: CatalogItem>(
        &self,
        key: &str,
        fallback: fn() -> Vec<T>,
    ) -> AppResult<Vec<T>> {
        match self.store.get_json::<Vec<T>>(key).await {
            Ok(Some(items)) => Ok(items),
            Ok(None) => {
                let items = fallback();
                self.store.set_json(key, &items).await?;
                debug!(key, "Seeded collection with defaults");
                Ok(items)
            }
            Err(e) => {
                warn!(key, error = %e, "Stored collection unreadable, using defaults");
                Ok(fallback())
            }
        }
    }

    /// Apply `change` to a working copy, persist it, then commit and notify.
    async fn mutate<T, F>(
        &self,
        lock: &RwLock<Collection<T>>,
        key: &str,
        change: F,
    ) -> AppResult<T>
    where
        T: CatalogItem,
        F: FnOnce(&mut Collection<T>) -> AppResult<T>,
    {
        let mut guard = lock.write().await;
        let mut working = guard.clone();
        let before = working.len();
        let item = change(&mut working)?;

        self.store.set_json(key, working.all()).await?;
        *guard = working;
        let after = guard.len();
        drop(guard);

        let event = if after > before {
            ContentEvent::Added {
                collection: T::COLLECTION,
                id: item.id(),
            }
        } else {
            ContentEvent::Updated {
                collection: T::COLLECTION,
                id: item.id(),
            }
        };
        debug!(collection = %T::COLLECTION, id = item.id(), "Catalog entry saved");
        self.observers.notify(&event);
        Ok(item)
    }

    async fn remove<T: CatalogItem>(
        &self,
        lock: &RwLock<Collection<T>>,
        key: &str,
        id: u64,
    ) -> AppResult<T> {
        let mut guard = lock.write().await;
        let mut working = guard.clone();
        let removed = working.delete(id)?;

        self.store.set_json(key, working.all()).await?;
        *guard = working;
        drop(guard);

        info!(collection = %T::COLLECTION, id, title = removed.title(), "Catalog entry deleted");
        self.observers.notify(&ContentEvent::Deleted {
            collection: T::COLLECTION,
            id,
        });
        Ok(removed)
    }
}
