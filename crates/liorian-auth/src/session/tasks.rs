//! Periodic session upkeep: auto-save and validation.

use std::sync::Weak;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{Instant, interval_at};
use tracing::{debug, info, warn};

use super::manager::SessionManager;

#[derive(Debug, Clone, Copy)]
enum Job {
    AutoSave,
    Validate,
}

impl Job {
    fn name(self) -> &'static str {
        match self {
            Self::AutoSave => "session-auto-save",
            Self::Validate => "session-validation",
        }
    }
}

/// Handles to the spawned upkeep tasks.
///
/// The tasks stop on logout, when the manager is dropped, or on
/// [`abort`](Self::abort).
#[derive(Debug)]
pub struct BackgroundTasks {
    handles: Vec<JoinHandle<()>>,
}

impl BackgroundTasks {
    /// Whether every task has exited.
    pub fn is_finished(&self) -> bool {
        self.handles.iter().all(JoinHandle::is_finished)
    }

    /// Stop the tasks immediately.
    pub fn abort(&self) {
        for handle in &self.handles {
            handle.abort();
        }
    }

    /// Wait for every task to exit.
    pub async fn join(self) {
        for handle in self.handles {
            let _ = handle.await;
        }
    }
}

pub(crate) fn spawn(
    manager: Weak<SessionManager>,
    auto_save_every: Duration,
    validate_every: Duration,
    cancel: watch::Receiver<bool>,
) -> BackgroundTasks {
    let handles = vec![
        tokio::spawn(run(
            manager.clone(),
            Job::AutoSave,
            auto_save_every,
            cancel.clone(),
        )),
        tokio::spawn(run(manager, Job::Validate, validate_every, cancel)),
    ];
    BackgroundTasks { handles }
}

async fn run(
    manager: Weak<SessionManager>,
    job: Job,
    period: Duration,
    mut cancel: watch::Receiver<bool>,
) {
    debug!(task = job.name(), period_secs = period.as_secs(), "Session task started");
    let mut ticker = interval_at(Instant::now() + period, period);

    loop {
        tokio::select! {
            _ = ticker.tick() => {}
            changed = cancel.changed() => {
                if changed.is_err() || *cancel.borrow() {
                    break;
                }
                continue;
            }
        }

        let Some(manager) = manager.upgrade() else {
            break;
        };

        match job {
            Job::AutoSave => {
                if let Err(e) = manager.auto_save().await {
                    warn!(error = %e, "Session auto-save failed");
                }
            }
            Job::Validate => {
                if !manager.is_authenticated().await {
                    info!("Session no longer valid, logging out");
                    if let Err(e) = manager.logout_with_reason("validation").await {
                        warn!(error = %e, "Logout after failed validation did not complete");
                    }
                    break;
                }
            }
        }
    }

    debug!(task = job.name(), "Session task stopped");
}
