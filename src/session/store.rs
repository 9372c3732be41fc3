//! Session store - single source of truth for the signed-in identity
//!
//! Lifecycle: construct with [`SessionStore::new`], call
//! [`SessionStore::restore`] once at start-up, then drive it with
//! `login` / `register` / `logout`. Observers hold a
//! [`watch::Receiver`] from [`SessionStore::subscribe`].

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{watch, Mutex};
use tracing::{debug, info, warn};

use super::SessionSnapshot;
use crate::auth::AuthBackend;
use crate::domain::{CreateUserDto, RoleRequirement, User};
use crate::infrastructure::storage::KeyValueStore;
use crate::shared::validations::{is_blank, EMPTY_FIELDS_MESSAGE};
use crate::shared::SessionError;

/// Storage key of the persisted identity
pub const IDENTITY_SLOT: &str = "utm_user";

/// Default upper bound on a single backend round trip
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

const LOGIN_FAILED_MESSAGE: &str = "Invalid email or password";
const REGISTER_FAILED_MESSAGE: &str = "Failed to register the user";

pub struct SessionStore {
    storage: Arc<dyn KeyValueStore>,
    backend: Arc<dyn AuthBackend>,
    request_timeout: Duration,
    state: watch::Sender<SessionSnapshot>,
    /// Serializes restore/login/register so the identity slot has one writer at a time.
    in_flight: Mutex<()>,
    restored: AtomicBool,
}

impl SessionStore {
    pub fn new(storage: Arc<dyn KeyValueStore>, backend: Arc<dyn AuthBackend>) -> Self {
        let (state, _) = watch::channel(SessionSnapshot::initial());
        Self {
            storage,
            backend,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            state,
            in_flight: Mutex::new(()),
            restored: AtomicBool::new(false),
        }
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    // ── Queries ─────────────────────────────────────────────────

    pub fn snapshot(&self) -> SessionSnapshot {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.state.subscribe()
    }

    pub fn current_user(&self) -> Option<User> {
        self.state.borrow().user.clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.borrow().is_authenticated()
    }

    pub fn is_loading(&self) -> bool {
        self.state.borrow().is_loading
    }

    /// `true` when the current user's role meets `requirement`.
    /// Always `false` while signed out.
    pub fn has_permission(&self, requirement: impl Into<RoleRequirement>) -> bool {
        self.state.borrow().has_permission(&requirement.into())
    }

    // ── Lifecycle ───────────────────────────────────────────────

    /// Adopt the identity persisted by a previous run, if any.
    ///
    /// Only the first call does anything. Unreadable or malformed data is
    /// logged and treated as "no session"; it is never surfaced as an error.
    pub async fn restore(&self) {
        let _guard = self.in_flight.lock().await;
        if self.restored.swap(true, Ordering::SeqCst) {
            return;
        }

        let user = match self.storage.get(IDENTITY_SLOT) {
            Ok(Some(raw)) => match serde_json::from_str::<User>(&raw) {
                Ok(user) => Some(user),
                Err(e) => {
                    warn!(error = %e, "Ignoring malformed persisted identity");
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                warn!(error = %e, "Could not read persisted identity");
                None
            }
        };

        match &user {
            Some(u) => info!(user_id = %u.id, role = %u.role, "Session restored"),
            None => debug!("No persisted session"),
        }

        self.state.send_modify(|s| {
            // A login that completed first wins over stale persisted data.
            if s.user.is_none() {
                s.user = user;
            }
            s.is_loading = false;
        });
    }

    // ── Commands ────────────────────────────────────────────────

    pub async fn login(&self, email: &str, password: &str) -> Result<User, SessionError> {
        if is_blank(email) || password.is_empty() {
            return Err(SessionError::Validation(EMPTY_FIELDS_MESSAGE.into()));
        }
        let email = email.trim();

        let _guard = self.in_flight.lock().await;
        let _loading = self.begin_loading();

        let result = self
            .with_timeout(self.backend.login(email, password))
            .await
            .map_err(|e| match e {
                SessionError::Backend(msg) => {
                    warn!(email, error = %msg, "Login rejected by backend");
                    SessionError::Backend(LOGIN_FAILED_MESSAGE.into())
                }
                other => other,
            })?;

        self.adopt(result)
    }

    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<User, SessionError> {
        if is_blank(name) || is_blank(email) || password.is_empty() {
            return Err(SessionError::Validation(EMPTY_FIELDS_MESSAGE.into()));
        }

        let _guard = self.in_flight.lock().await;
        let _loading = self.begin_loading();

        let dto = CreateUserDto {
            name: name.trim().to_string(),
            email: email.trim().to_string(),
            password: password.to_string(),
        };
        let result = self
            .with_timeout(self.backend.register(dto))
            .await
            .map_err(|e| match e {
                SessionError::Backend(msg) => {
                    warn!(email, error = %msg, "Registration rejected by backend");
                    SessionError::Backend(REGISTER_FAILED_MESSAGE.into())
                }
                other => other,
            })?;

        self.adopt(result)
    }

    /// Forget the current identity and its persisted copy.
    pub fn logout(&self) {
        let previous = self.state.borrow().user.clone();
        self.state.send_modify(|s| s.user = None);
        if let Err(e) = self.storage.remove(IDENTITY_SLOT) {
            warn!(error = %e, "Could not remove persisted identity");
        }
        if let Some(user) = previous {
            info!(user_id = %user.id, "Signed out");
        }
    }

    // ── Internals ───────────────────────────────────────────────

    async fn with_timeout<F>(&self, call: F) -> Result<User, SessionError>
    where
        F: std::future::Future<Output = Result<User, SessionError>>,
    {
        match tokio::time::timeout(self.request_timeout, call).await {
            Ok(result) => result,
            Err(_) => {
                warn!(timeout_ms = self.request_timeout.as_millis() as u64, "Auth backend timed out");
                Err(SessionError::Timeout(self.request_timeout))
            }
        }
    }

    /// Persist first, then publish: a failed write leaves the session as it was.
    fn adopt(&self, user: User) -> Result<User, SessionError> {
        let raw = serde_json::to_string(&user).map_err(crate::shared::StorageError::from)?;
        self.storage.set(IDENTITY_SLOT, &raw)?;
        info!(user_id = %user.id, role = %user.role, "Signed in");
        self.state.send_modify(|s| {
            s.user = Some(user.clone());
            s.is_loading = false;
        });
        Ok(user)
    }

    fn begin_loading(&self) -> LoadingFlag<'_> {
        self.state.send_modify(|s| s.is_loading = true);
        LoadingFlag { state: &self.state }
    }
}

/// Clears `is_loading` when the operation ends, including when its future
/// is dropped mid-flight.
struct LoadingFlag<'a> {
    state: &'a watch::Sender<SessionSnapshot>,
}

impl Drop for LoadingFlag<'_> {
    fn drop(&mut self) {
        self.state.send_modify(|s| s.is_loading = false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::MockAuthBackend;
    use crate::domain::UserRole;
    use crate::infrastructure::storage::InMemoryKeyValueStore;
    use async_trait::async_trait;

    struct RejectingBackend;

    #[async_trait]
    impl AuthBackend for RejectingBackend {
        async fn login(&self, _email: &str, _password: &str) -> Result<User, SessionError> {
            Err(SessionError::Backend("401".into()))
        }

        async fn register(&self, _dto: CreateUserDto) -> Result<User, SessionError> {
            Err(SessionError::Backend("409".into()))
        }
    }

    struct HangingBackend;

    #[async_trait]
    impl AuthBackend for HangingBackend {
        async fn login(&self, _email: &str, _password: &str) -> Result<User, SessionError> {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            Ok(MockAuthBackend::canonical_user())
        }

        async fn register(&self, _dto: CreateUserDto) -> Result<User, SessionError> {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            Ok(MockAuthBackend::canonical_user())
        }
    }

    fn store_with(backend: Arc<dyn AuthBackend>) -> (Arc<SessionStore>, Arc<InMemoryKeyValueStore>) {
        let storage = Arc::new(InMemoryKeyValueStore::new());
        let store = Arc::new(SessionStore::new(storage.clone(), backend));
        (store, storage)
    }

    fn mock_store() -> (Arc<SessionStore>, Arc<InMemoryKeyValueStore>) {
        store_with(Arc::new(MockAuthBackend::new(Duration::from_millis(1000))))
    }

    #[tokio::test]
    async fn test_loading_until_restore_completes() {
        let (store, _) = mock_store();
        assert!(store.is_loading());
        assert!(!store.is_authenticated());

        store.restore().await;
        assert!(!store.is_loading());
        assert!(!store.is_authenticated());
    }

    #[tokio::test]
    async fn test_restore_adopts_persisted_identity() {
        let (store, storage) = mock_store();
        let user = MockAuthBackend::canonical_user();
        storage
            .set(IDENTITY_SLOT, &serde_json::to_string(&user).unwrap())
            .unwrap();

        store.restore().await;
        assert_eq!(store.current_user(), Some(user));
        assert!(store.is_authenticated());
    }

    #[tokio::test]
    async fn test_restore_treats_malformed_identity_as_signed_out() {
        let (store, storage) = mock_store();
        storage.set(IDENTITY_SLOT, "{\"id\": 1, \"role\": \"pilot\"").unwrap();

        store.restore().await;
        assert!(!store.is_authenticated());
        assert!(!store.is_loading());
    }

    #[tokio::test]
    async fn test_restore_runs_once() {
        let (store, storage) = mock_store();
        store.restore().await;

        let user = MockAuthBackend::canonical_user();
        storage
            .set(IDENTITY_SLOT, &serde_json::to_string(&user).unwrap())
            .unwrap();
        store.restore().await;
        assert!(!store.is_authenticated());
    }

    #[tokio::test(start_paused = true)]
    async fn test_login_is_loading_while_pending_then_persists() {
        let (store, storage) = mock_store();
        store.restore().await;

        let pending = {
            let store = store.clone();
            tokio::spawn(async move { store.login("a@b.com", "pw").await })
        };
        tokio::time::sleep(Duration::from_millis(10)).await;
        assert!(store.is_loading());
        assert!(!store.is_authenticated());
        assert_eq!(storage.get(IDENTITY_SLOT).unwrap(), None);

        let user = pending.await.unwrap().unwrap();
        assert!(!store.is_loading());
        assert!(store.is_authenticated());
        let persisted: User =
            serde_json::from_str(&storage.get(IDENTITY_SLOT).unwrap().unwrap()).unwrap();
        assert_eq!(persisted, user);
    }

    #[tokio::test]
    async fn test_login_rejects_empty_fields_without_state_change() {
        let (store, storage) = mock_store();
        store.restore().await;

        let err = store.login("", "pw").await.unwrap_err();
        assert!(err.is_validation());
        assert_eq!(err.to_string(), EMPTY_FIELDS_MESSAGE);
        let err = store.login("a@b.com", "").await.unwrap_err();
        assert!(err.is_validation());

        assert!(!store.is_authenticated());
        assert!(!store.is_loading());
        assert!(storage.is_empty());
    }

    #[tokio::test]
    async fn test_backend_failure_never_writes_identity() {
        let (store, storage) = store_with(Arc::new(RejectingBackend));
        store.restore().await;

        let err = store.login("a@b.com", "pw").await.unwrap_err();
        assert_eq!(err.to_string(), LOGIN_FAILED_MESSAGE);
        let err = store.register("A", "a@b.com", "pw").await.unwrap_err();
        assert_eq!(err.to_string(), REGISTER_FAILED_MESSAGE);

        assert!(!store.is_authenticated());
        assert!(!store.is_loading());
        assert!(storage.is_empty());
    }

    #[tokio::test]
    async fn test_failed_identity_write_leaves_slot_empty() {
        use crate::infrastructure::storage::FileKeyValueStore;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");
        let storage = Arc::new(FileKeyValueStore::open(&path).unwrap());
        std::fs::create_dir_all(path.join("x")).unwrap();
        let store = SessionStore::new(
            storage.clone(),
            Arc::new(MockAuthBackend::new(Duration::ZERO)),
        );
        store.restore().await;

        let err = store.login("a@b.com", "pw").await.unwrap_err();
        assert!(matches!(err, SessionError::Storage(_)));
        assert!(!store.is_authenticated());
        assert!(!store.is_loading());
        assert_eq!(storage.get(IDENTITY_SLOT).unwrap(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_backend_timeout_maps_to_failure() {
        let storage = Arc::new(InMemoryKeyValueStore::new());
        let store = SessionStore::new(storage.clone(), Arc::new(HangingBackend))
            .with_request_timeout(Duration::from_secs(5));
        store.restore().await;

        let err = store.login("a@b.com", "pw").await.unwrap_err();
        assert!(matches!(err, SessionError::Timeout(_)));
        assert!(!store.is_loading());
        assert!(storage.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_register_then_logout() {
        let (store, storage) = mock_store();
        store.restore().await;

        let user = store.register("Aigerim", "aigerim@example.com", "pw").await.unwrap();
        assert_eq!(user.name, "Aigerim");
        assert!(storage.get(IDENTITY_SLOT).unwrap().is_some());

        store.logout();
        assert!(!store.is_authenticated());
        assert_eq!(storage.get(IDENTITY_SLOT).unwrap(), None);

        // Signing out twice is harmless.
        store.logout();
    }

    #[tokio::test(start_paused = true)]
    async fn test_overlapping_logins_are_serialized() {
        let (store, storage) = mock_store();
        store.restore().await;

        let first = {
            let store = store.clone();
            tokio::spawn(async move { store.register("First", "first@example.com", "pw").await })
        };
        let second = {
            let store = store.clone();
            tokio::spawn(async move { store.register("Second", "second@example.com", "pw").await })
        };
        first.await.unwrap().unwrap();
        second.await.unwrap().unwrap();

        // Whatever finished last is both in memory and on disk.
        let persisted: User =
            serde_json::from_str(&storage.get(IDENTITY_SLOT).unwrap().unwrap()).unwrap();
        assert_eq!(Some(persisted), store.current_user());
    }

    #[tokio::test]
    async fn test_has_permission() {
        let (store, storage) = mock_store();
        let mut admin = MockAuthBackend::canonical_user();
        admin.role = UserRole::Admin;
        storage
            .set(IDENTITY_SLOT, &serde_json::to_string(&admin).unwrap())
            .unwrap();

        assert!(!store.has_permission(UserRole::Pilot));
        store.restore().await;
        for role in UserRole::ALL {
            assert!(store.has_permission(role));
        }

        store.logout();
        assert!(!store.has_permission(UserRole::Admin));
    }

    #[tokio::test]
    async fn test_dispatcher_permissions_are_flat() {
        let (store, storage) = mock_store();
        storage
            .set(
                IDENTITY_SLOT,
                &serde_json::to_string(&MockAuthBackend::canonical_user()).unwrap(),
            )
            .unwrap();
        store.restore().await;

        assert!(store.has_permission(UserRole::Dispatcher));
        assert!(store.has_permission([UserRole::Pilot, UserRole::Dispatcher]));
        assert!(!store.has_permission([UserRole::Pilot, UserRole::Observer]));
        assert!(!store.has_permission(UserRole::Admin));
    }
}
