//! Shared application state passed to all handlers.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use liorian_auth::CredentialService;
use liorian_content::ContentCatalog;
use liorian_core::config::AppConfig;
use liorian_core::traits::{Clock, KeyValueStore};
use liorian_entity::inbox::{Application, NewsletterCampaign, NewsletterSubscriber};
use liorian_storage::{JsonList, keys};
use liorian_training::TrainingStore;

/// Application state available to every handler via `State<AppState>`.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Loaded configuration.
    pub config: Arc<AppConfig>,
    /// Server-side key-value store.
    pub kv: Arc<dyn KeyValueStore>,
    /// Courses, services and posts.
    pub catalog: Arc<ContentCatalog>,
    /// Training records on the object store.
    pub training: Arc<TrainingStore>,
    /// Email/password checks for candidates, staff and admins.
    pub credentials: Arc<CredentialService>,
    /// Newsletter subscribers.
    pub subscribers: JsonList<NewsletterSubscriber>,
    /// Sent newsletter campaigns.
    pub campaigns: JsonList<NewsletterCampaign>,
    /// Job applications.
    pub applications: JsonList<Application>,
    /// Training module definitions, kept as the admin screens send them.
    pub modules: JsonList<serde_json::Value>,
    /// Time source.
    pub clock: Arc<dyn Clock>,
    /// When the state was built.
    pub started_at: DateTime<Utc>,
}

impl AppState {
    /// Assemble the state from its services.
    pub fn new(
        config: AppConfig,
        kv: Arc<dyn KeyValueStore>,
        catalog: Arc<ContentCatalog>,
        training: Arc<TrainingStore>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let credentials = Arc::new(CredentialService::new(
            kv.clone(),
            clock.clone(),
            &config.auth,
        ));
        Self {
            config: Arc::new(config),
            subscribers: JsonList::new(kv.clone(), keys::NEWSLETTER_SUBSCRIBERS),
            campaigns: JsonList::new(kv.clone(), keys::NEWSLETTER_CAMPAIGNS),
            applications: JsonList::new(kv.clone(), keys::APPLICATIONS),
            modules: JsonList::new(kv.clone(), keys::TRAINING_MODULES),
            kv,
            catalog,
            training,
            credentials,
            started_at: clock.now(),
            clock,
        }
    }
}
