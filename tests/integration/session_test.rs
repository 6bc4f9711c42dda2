//! End-to-end session flow over file-backed stores: two windows sharing
//! one persistent store, each with its own window store.

use std::sync::Arc;

use serde_json::json;

use liorian_auth::{AuthGrant, Authenticator, SessionManager, SimpleAuth};
use liorian_core::config::SessionConfig;
use liorian_core::traits::{KeyValueStore, ManualClock};
use liorian_entity::session::SessionState;
use liorian_entity::user::UserType;
use liorian_storage::{FileKvStore, MemoryKvStore, SerializedStore};

struct Window {
    manager: SessionManager,
    simple: SimpleAuth,
}

fn window(shared: &Arc<dyn KeyValueStore>, clock: &ManualClock) -> Window {
    let tab: Arc<dyn KeyValueStore> =
        Arc::new(SerializedStore::spawn(Arc::new(MemoryKvStore::new())));
    Window {
        manager: SessionManager::new(
            shared.clone(),
            tab,
            Arc::new(clock.clone()),
            "Mozilla/5.0 (X11; Linux x86_64) Integration",
            SessionConfig::default(),
        ),
        simple: SimpleAuth::new(shared.clone(), Arc::new(clock.clone())),
    }
}

async fn shared_store(dir: &tempfile::TempDir) -> Arc<dyn KeyValueStore> {
    let file = FileKvStore::open(dir.path().join("storage.json"))
        .await
        .unwrap();
    Arc::new(SerializedStore::spawn(Arc::new(file)))
}

fn grant(user_type: UserType, token: &str) -> AuthGrant {
    AuthGrant {
        user_type,
        token: token.to_string(),
        user: json!({ "email": "user@liorian.com" }),
    }
}

async fn login_both(window: &Window, grant: &AuthGrant) {
    let helpers: [&dyn Authenticator; 2] = [&window.manager, &window.simple];
    for helper in helpers {
        helper.login(grant).await.unwrap();
    }
}

#[tokio::test]
async fn test_login_survives_reopening_the_store() {
    let dir = tempfile::tempdir().unwrap();
    let clock = ManualClock::default();

    let first = window(&shared_store(&dir).await, &clock);
    login_both(&first, &grant(UserType::Staff, "staff-token")).await;
    assert!(first.manager.is_authenticated().await);

    let reopened = shared_store(&dir).await;
    assert_eq!(
        reopened.get("staffToken").await.unwrap().as_deref(),
        Some("staff-token")
    );
    assert_eq!(reopened.get("userType").await.unwrap().as_deref(), Some("staff"));
    assert_eq!(
        reopened.get("singleDeviceMode").await.unwrap().as_deref(),
        Some("true")
    );
}

#[tokio::test]
async fn test_only_one_role_token_after_switching() {
    let dir = tempfile::tempdir().unwrap();
    let clock = ManualClock::default();
    let shared = shared_store(&dir).await;
    let w = window(&shared, &clock);

    for (role, token) in [
        (UserType::Admin, "a"),
        (UserType::Candidate, "c"),
        (UserType::Staff, "s"),
    ] {
        w.manager.login(role, token).await.unwrap();
        let mut present = 0;
        for key in ["adminToken", "staffToken", "candidateToken"] {
            if shared.get(key).await.unwrap().is_some() {
                present += 1;
            }
        }
        assert_eq!(present, 1);
    }

    match w.manager.session_state().await {
        SessionState::Authenticated { role, .. } => assert_eq!(role, UserType::Staff),
        SessionState::Anonymous => panic!("expected a signed-in session"),
    }
}

#[tokio::test]
async fn test_second_window_rejected_by_manager_only() {
    let dir = tempfile::tempdir().unwrap();
    let clock = ManualClock::default();
    let shared = shared_store(&dir).await;

    let first = window(&shared, &clock);
    login_both(&first, &grant(UserType::Candidate, "cand-token")).await;

    let second = window(&shared, &clock);
    assert!(!second.manager.is_authenticated().await);
    assert!(second.simple.is_authenticated().await);
    assert!(first.manager.is_authenticated().await);
}

#[tokio::test]
async fn test_timeouts_and_logout() {
    let dir = tempfile::tempdir().unwrap();
    let clock = ManualClock::default();
    let shared = shared_store(&dir).await;
    let w = window(&shared, &clock);
    login_both(&w, &grant(UserType::Admin, "admin-token")).await;

    let fresh = w.manager.session_status().await.time_remaining;
    clock.advance(chrono::Duration::minutes(90));
    let later = w.manager.session_status().await.time_remaining;
    assert_eq!(fresh - later, 90 * 60_000);

    assert!(w.manager.refresh_session().await.unwrap());
    assert_eq!(w.manager.session_status().await.time_remaining, fresh);

    clock.advance(chrono::Duration::minutes(121));
    assert!(!w.manager.is_authenticated().await);

    w.manager.logout().await.unwrap();
    w.simple.logout().await.unwrap();
    assert!(!w.simple.is_authenticated().await);
    for key in ["adminToken", "staffToken", "candidateToken", "authToken"] {
        assert_eq!(shared.get(key).await.unwrap(), None);
    }
}
