//! Change subscriptions.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use serde::{Deserialize, Serialize};

use liorian_core::events::ContentEvent;

/// Receives catalog changes.
pub trait CatalogObserver: Send + Sync {
    /// Called once per mutation, after the change is persisted.
    fn on_change(&self, event: &ContentEvent);
}

impl<F> CatalogObserver for F
where
    F: Fn(&ContentEvent) + Send + Sync,
{
    fn on_change(&self, event: &ContentEvent) {
        self(event)
    }
}

/// Handle returned by `subscribe`, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubscriptionId(pub u64);

#[derive(Default)]
pub(crate) struct Observers {
    next_id: AtomicU64,
    entries: Mutex<Vec<(SubscriptionId, Arc<dyn CatalogObserver>)>>,
}

impl Observers {
    fn entries(&self) -> MutexGuard<'_, Vec<(SubscriptionId, Arc<dyn CatalogObserver>)>> {
        match self.entries.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    pub(crate) fn add(&self, observer: Arc<dyn CatalogObserver>) -> SubscriptionId {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed) + 1);
        self.entries().push((id, observer));
        id
    }

    pub(crate) fn remove(&self, id: SubscriptionId) -> bool {
        let mut entries = self.entries();
        let before = entries.len();
        entries.retain(|(existing, _)| *existing != id);
        entries.len() != before
    }

    pub(crate) fn len(&self) -> usize {
        self.entries().len()
    }

    /// Deliver `event` to a snapshot of the current subscribers, so an
    /// observer may subscribe or unsubscribe from inside its callback.
    pub(crate) fn notify(&self, event: &ContentEvent) {
        let snapshot: Vec<Arc<dyn CatalogObserver>> =
            self.entries().iter().map(|(_, o)| o.clone()).collect();
        for observer in snapshot {
            observer.on_change(event);
        }
    }
}
