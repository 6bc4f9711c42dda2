//! Session lifecycle for one window: login, validation, refresh, logout.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use async_trait::async_trait;
use chrono::DateTime;
use tokio::sync::{broadcast, watch};
use tracing::{debug, info, warn};

use liorian_core::config::session::SessionConfig;
use liorian_core::error::AppError;
use liorian_core::events::SessionEvent;
use liorian_core::result::AppResult;
use liorian_core::traits::{Clock, KeyValueStore};
use liorian_entity::session::{SessionRecord, SessionState, SessionStatus};
use liorian_entity::user::UserType;
use liorian_storage::keys;

use crate::authenticator::{AuthGrant, Authenticator};

use super::device::generate_device_session_id;
use super::tasks::{self, BackgroundTasks};

/// Where to send the client after logout, and when.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogoutOutcome {
    /// Route to navigate to.
    pub redirect_to: String,
    /// Delay before navigating.
    pub after: Duration,
}

/// Result of checking the stored session against the rules.
#[derive(Debug)]
enum Verdict {
    /// Token present and every check passed.
    Valid(SessionRecord),
    /// Token missing but the record is fresh enough to keep the user in.
    Recovered(SessionRecord),
    /// Not signed in.
    Rejected(&'static str),
}

/// Session manager for one window.
///
/// `shared` is the store every window sees; `tab` belongs to this window
/// only. Two managers built over the same `shared` store and different
/// `tab` stores behave like two browser tabs.
pub struct SessionManager {
    shared: Arc<dyn KeyValueStore>,
    tab: Arc<dyn KeyValueStore>,
    clock: Arc<dyn Clock>,
    user_agent: String,
    config: SessionConfig,
    events: broadcast::Sender<SessionEvent>,
    cancel: Mutex<Option<watch::Sender<bool>>>,
}

impl std::fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionManager")
            .field("shared", &self.shared.provider_type())
            .field("tab", &self.tab.provider_type())
            .field("config", &self.config)
            .finish()
    }
}

impl SessionManager {
    /// Creates a session manager for one window.
    pub fn new(
        shared: Arc<dyn KeyValueStore>,
        tab: Arc<dyn KeyValueStore>,
        clock: Arc<dyn Clock>,
        user_agent: impl Into<String>,
        config: SessionConfig,
    ) -> Self {
        let (events, _) = broadcast::channel(32);
        Self {
            shared,
            tab,
            clock,
            user_agent: user_agent.into(),
            config,
            events,
            cancel: Mutex::new(None),
        }
    }

    /// Receive session events emitted from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    /// Session configuration in effect.
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Record a sign-in for `user_type` with a server-issued `token`.
    ///
    /// Every other role's token is removed first, so at most one token key
    /// exists afterwards. The token itself is trusted as-is.
    pub async fn login(&self, user_type: UserType, token: &str) -> AppResult<SessionRecord> {
        let token = token.trim();
        if token.is_empty() {
            return Err(AppError::validation("Token must not be empty"));
        }

        self.clear_tokens().await?;
        self.shared.set(user_type.token_key(), token).await?;
        self.shared.set(keys::USER_TYPE, user_type.as_str()).await?;

        let now = self.clock.now_millis();
        let device_id = generate_device_session_id(now, &self.user_agent);
        self.shared.set(keys::DEVICE_SESSION_ID, &device_id).await?;
        self.tab.set(keys::WINDOW_SESSION_MARKER, &device_id).await?;
        if self.config.single_device {
            self.shared.set(keys::SINGLE_DEVICE_MODE, "true").await?;
        } else {
            self.shared.remove(keys::SINGLE_DEVICE_MODE).await?;
        }

        let record = SessionRecord::new(
            user_type,
            device_id.clone(),
            user_type.dashboard_route().to_string(),
            now,
        );
        self.write_record(&record).await?;

        info!(user_type = %user_type, "Session started");
        self.emit(SessionEvent::LoggedIn {
            user_type: user_type.to_string(),
            device_session_id: device_id,
        });
        Ok(record)
    }

    /// Whether this window is signed in. Storage failures read as `false`.
    pub async fn is_authenticated(&self) -> bool {
        match self.evaluate().await {
            Ok(Verdict::Valid(_) | Verdict::Recovered(_)) => true,
            Ok(Verdict::Rejected(reason)) => {
                debug!(reason, "Session rejected");
                false
            }
            Err(e) => {
                warn!(error = %e, "Session check failed");
                false
            }
        }
    }

    /// Derived session state.
    pub async fn session_state(&self) -> SessionState {
        match self.evaluate().await {
            Ok(Verdict::Valid(record) | Verdict::Recovered(record)) => SessionState::Authenticated {
                role: record.user_type,
                issued_at: DateTime::from_timestamp_millis(record.timestamp).unwrap_or_default(),
                last_seen_at: DateTime::from_timestamp_millis(record.last_activity)
                    .unwrap_or_default(),
            },
            Ok(Verdict::Rejected(_)) => SessionState::Anonymous,
            Err(e) => {
                warn!(error = %e, "Session check failed");
                SessionState::Anonymous
            }
        }
    }

    /// Summary for "expires in N minutes" banners.
    pub async fn session_status(&self) -> SessionStatus {
        let record = match self.evaluate().await {
            Ok(Verdict::Valid(record) | Verdict::Recovered(record)) => record,
            Ok(Verdict::Rejected(_)) => return SessionStatus::anonymous(),
            Err(e) => {
                warn!(error = %e, "Session check failed");
                return SessionStatus::anonymous();
            }
        };

        let now = self.clock.now_millis();
        let remaining = (self.config.absolute_timeout_ms() - record.age_ms(now)).max(0);
        SessionStatus {
            is_authenticated: true,
            user_type: Some(record.user_type),
            time_remaining: remaining,
            last_activity: Some(record.last_activity),
        }
    }

    /// Mark activity now. Returns `false` when no session is recorded.
    pub async fn refresh_session(&self) -> AppResult<bool> {
        self.touch(None).await
    }

    /// Mark activity now and remember `path` as the current route.
    pub async fn handle_navigation(&self, path: &str) -> AppResult<bool> {
        self.touch(Some(path.to_string())).await
    }

    /// Sign out of every role and stop the background tasks.
    pub async fn logout(&self) -> AppResult<LogoutOutcome> {
        self.logout_with_reason("user").await
    }

    pub(crate) async fn logout_with_reason(&self, reason: &str) -> AppResult<LogoutOutcome> {
        self.cancel_tasks();

        self.clear_tokens().await?;
        self.shared
            .remove_all(&[
                keys::USER_TYPE,
                keys::DEVICE_SESSION_ID,
                keys::SINGLE_DEVICE_MODE,
                keys::SESSION_DATA,
            ])
            .await?;
        self.tab
            .remove_all(&[keys::WINDOW_SESSION_MARKER, keys::SESSION_BACKUP])
            .await?;

        info!(reason, "Session ended");
        self.emit(SessionEvent::LoggedOut {
            reason: reason.to_string(),
        });

        Ok(LogoutOutcome {
            redirect_to: self.config.login_route.clone(),
            after: Duration::from_millis(self.config.logout_redirect_delay_ms),
        })
    }

    /// Spawn the periodic auto-save and validation tasks.
    ///
    /// Tasks from an earlier call are cancelled first.
    pub fn start_background_tasks(self: &Arc<Self>) -> BackgroundTasks {
        let (tx, rx) = watch::channel(false);
        if let Some(previous) = self.cancel_slot().replace(tx) {
            let _ = previous.send(true);
        }
        tasks::spawn(
            Arc::downgrade(self),
            self.config.auto_save_interval(),
            self.config.validation_interval(),
            rx,
        )
    }

    /// Rewrite both record copies without recording activity.
    pub(crate) async fn auto_save(&self) -> AppResult<()> {
        if let Some(record) = self.read_record().await? {
            self.write_record(&record).await?;
            debug!("Session record auto-saved");
        }
        Ok(())
    }

    async fn evaluate(&self) -> AppResult<Verdict> {
        let now = self.clock.now_millis();

        if self.find_token().await?.is_none() {
            return Ok(match self.read_record().await? {
                Some(record) if self.is_fresh(&record, now) => {
                    if !self.owns(&record).await? {
                        self.emit(SessionEvent::DeviceMismatch);
                        return Ok(Verdict::Rejected("record belongs to another window"));
                    }
                    debug!(user_type = %record.user_type, "Session recovered from record");
                    self.emit(SessionEvent::Recovered {
                        user_type: record.user_type.to_string(),
                    });
                    Verdict::Recovered(record)
                }
                _ => Verdict::Rejected("no token"),
            });
        }

        if self.config.single_device
            && self.shared.get(keys::SINGLE_DEVICE_MODE).await?.as_deref() == Some("true")
        {
            let device = self.shared.get(keys::DEVICE_SESSION_ID).await?;
            let marker = self.tab.get(keys::WINDOW_SESSION_MARKER).await?;
            if marker.is_none() || marker != device {
                self.emit(SessionEvent::DeviceMismatch);
                return Ok(Verdict::Rejected("device mismatch"));
            }
        }

        let Some(record) = self.read_record().await? else {
            return Ok(Verdict::Rejected("no session record"));
        };

        if record.age_ms(now) >= self.config.absolute_timeout_ms() {
            self.emit(SessionEvent::Expired {
                threshold: "absolute".to_string(),
            });
            return Ok(Verdict::Rejected("absolute timeout"));
        }
        if record.idle_ms(now) >= self.config.idle_timeout_ms() {
            self.emit(SessionEvent::Expired {
                threshold: "idle".to_string(),
            });
            return Ok(Verdict::Rejected("idle timeout"));
        }

        Ok(Verdict::Valid(record))
    }

    /// Under single-device mode a record only counts for the window whose
    /// marker matches its session id.
    async fn owns(&self, record: &SessionRecord) -> AppResult<bool> {
        if !self.config.single_device {
            return Ok(true);
        }
        let marker = self.tab.get(keys::WINDOW_SESSION_MARKER).await?;
        Ok(marker.as_deref() == Some(record.session_id.as_str()))
    }

    fn is_fresh(&self, record: &SessionRecord, now: i64) -> bool {
        record.is_fresh(
            now,
            self.config.absolute_timeout_ms(),
            self.config.idle_timeout_ms(),
        )
    }

    /// Token for the stored role, or for any role when none is stored.
    async fn find_token(&self) -> AppResult<Option<(UserType, String)>> {
        let stored = match self.shared.get(keys::USER_TYPE).await? {
            Some(raw) => match raw.parse::<UserType>() {
                Ok(user_type) => Some(user_type),
                Err(e) => {
                    warn!(error = %e, "Ignoring unreadable stored user type");
                    None
                }
            },
            None => None,
        };

        let candidates: Vec<UserType> = match stored {
            Some(user_type) => vec![user_type],
            None => UserType::ALL.to_vec(),
        };
        for user_type in candidates {
            if let Some(token) = self.shared.get(user_type.token_key()).await? {
                if !token.is_empty() {
                    return Ok(Some((user_type, token)));
                }
            }
        }
        Ok(None)
    }

    /// Primary copy, falling back to the backup when absent or unreadable.
    async fn read_record(&self) -> AppResult<Option<SessionRecord>> {
        match self.shared.get_json::<SessionRecord>(keys::SESSION_DATA).await {
            Ok(Some(record)) => return Ok(Some(record)),
            Ok(None) => {}
            Err(e) => warn!(error = %e, "Primary session record unreadable, trying backup"),
        }
        match self.tab.get_json::<SessionRecord>(keys::SESSION_BACKUP).await {
            Ok(record) => Ok(record),
            Err(e) => {
                warn!(error = %e, "Backup session record unreadable");
                Ok(None)
            }
        }
    }

    async fn write_record(&self, record: &SessionRecord) -> AppResult<()> {
        let json = serde_json::to_string(record)?;
        self.shared.set(keys::SESSION_DATA, &json).await?;
        self.tab.set(keys::SESSION_BACKUP, &json).await?;
        Ok(())
    }

    async fn touch(&self, path: Option<String>) -> AppResult<bool> {
        let now = self.clock.now_millis();
        let marker = if self.config.single_device {
            match self.tab.get(keys::WINDOW_SESSION_MARKER).await? {
                Some(marker) => Some(marker),
                None => return Ok(false),
            }
        } else {
            None
        };
        let backup = self.tab.get(keys::SESSION_BACKUP).await?;

        let touched = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&touched);
        let updated = self
            .shared
            .update(
                keys::SESSION_DATA,
                Box::new(move |current| {
                    let Some(raw) = current.clone().or(backup) else {
                        return current;
                    };
                    let Ok(mut record) = serde_json::from_str::<SessionRecord>(&raw) else {
                        return current;
                    };
                    if marker.is_some_and(|m| m != record.session_id) {
                        return current;
                    }
                    record.touch(now);
                    if let Some(path) = path {
                        record.current_path = path;
                    }
                    match serde_json::to_string(&record) {
                        Ok(json) => {
                            flag.store(true, Ordering::SeqCst);
                            Some(json)
                        }
                        Err(_) => current,
                    }
                }),
            )
            .await?;

        match updated {
            Some(json) if touched.load(Ordering::SeqCst) => {
                self.tab.set(keys::SESSION_BACKUP, &json).await?;
                Ok(true)
            }
            _ => {
                debug!("No session of this window to refresh");
                Ok(false)
            }
        }
    }

    async fn clear_tokens(&self) -> AppResult<()> {
        for user_type in UserType::ALL {
            self.shared.remove(user_type.token_key()).await?;
        }
        Ok(())
    }

    fn cancel_slot(&self) -> MutexGuard<'_, Option<watch::Sender<bool>>> {
        match self.cancel.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn cancel_tasks(&self) {
        if let Some(tx) = self.cancel_slot().take() {
            let _ = tx.send(true);
        }
    }

    fn emit(&self, event: SessionEvent) {
        let _ = self.events.send(event);
    }
}

impl Drop for SessionManager {
    fn drop(&mut self) {
        self.cancel_tasks();
    }
}

#[async_trait]
impl Authenticator for SessionManager {
    async fn login(&self, grant: &AuthGrant) -> AppResult<()> {
        SessionManager::login(self, grant.user_type, &grant.token).await?;
        Ok(())
    }

    async fn logout(&self) -> AppResult<()> {
        SessionManager::logout(self).await?;
        Ok(())
    }

    async fn is_authenticated(&self) -> bool {
        SessionManager::is_authenticated(self).await
    }
}
