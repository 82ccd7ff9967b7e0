//! Login/logout orchestration and the live session.

use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use reqwest::{Method, RequestBuilder};
use thiserror::Error;

use assetology_auth::{GuardDecision, RouteGuard};
use assetology_core::{BearerToken, ProfileUpdate, Role, Session};

use crate::authority::{ApiClient, AuthorityError, CredentialAuthority};
use crate::config::DEFAULT_AUTH_TIMEOUT;
use crate::events::{SessionEvent, SessionEvents, Subscription};
use crate::storage::KeyValueStorage;
use crate::store::{SessionStore, StoredSession};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("credential authority unreachable: {0}")]
    Network(String),

    #[error("an authentication attempt is already in flight")]
    AlreadyAuthenticating,

    /// The attempt was overtaken by a logout or a newer login; its result
    /// was discarded.
    #[error("authentication result discarded: superseded by a later logout or login")]
    Superseded,

    #[error("validation failed: {0}")]
    Validation(String),

    #[error("not authenticated")]
    NotAuthenticated,

    #[error("failed to persist session: {0}")]
    Storage(String),
}

impl From<AuthorityError> for AuthError {
    fn from(value: AuthorityError) -> Self {
        match value {
            AuthorityError::InvalidCredentials => AuthError::InvalidCredentials,
            AuthorityError::Unreachable(msg) => AuthError::Network(msg),
        }
    }
}

/// Credentials plus the client-asserted identity fields.
#[derive(Clone)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
    pub department: String,
    pub role: Role,
}

impl LoginRequest {
    /// A login request with the default role ([`Role::User`]).
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
        department: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            department: department.into(),
            role: Role::default(),
        }
    }

    pub fn with_role(mut self, role: Role) -> Self {
        self.role = role;
        self
    }

    fn validate(&self) -> Result<(), AuthError> {
        let missing: Vec<&str> = [
            ("username", &self.username),
            ("password", &self.password),
            ("department", &self.department),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
        .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(AuthError::Validation(format!(
                "required fields missing: {}",
                missing.join(", ")
            )))
        }
    }
}

impl core::fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("LoginRequest")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("department", &self.department)
            .field("role", &self.role)
            .finish()
    }
}

/// Externally visible manager state.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum AuthStatus {
    Anonymous,
    Authenticating,
    Authenticated,
}

#[derive(Debug)]
enum LiveState {
    Anonymous,
    Authenticating,
    Authenticated {
        session: Session,
        token: BearerToken,
    },
}

#[derive(Debug)]
struct Inner {
    state: LiveState,
    /// Bumped by every login start and every logout; a pending attempt
    /// commits only if the generation it started with is still current.
    generation: u64,
}

/// Owns the live session and keeps [`SessionStore`] in sync with it.
///
/// State machine: `Anonymous → Authenticating → Authenticated → Anonymous`.
/// At most one authentication is in flight per manager.
#[derive(Debug)]
pub struct AuthSessionManager<S, A> {
    store: SessionStore<S>,
    authority: A,
    events: SessionEvents,
    auth_timeout: Duration,
    inner: Mutex<Inner>,
}

impl<S, A> AuthSessionManager<S, A>
where
    S: KeyValueStorage,
    A: CredentialAuthority,
{
    /// Build a manager, restoring a persisted session if one is valid.
    pub fn new(store: SessionStore<S>, authority: A) -> Self {
        let state = match store.load() {
            Some(StoredSession { session, token }) => {
                tracing::debug!(username = session.username(), role = %session.role(), "restored persisted session");
                LiveState::Authenticated { session, token }
            }
            None => LiveState::Anonymous,
        };

        Self {
            store,
            authority,
            events: SessionEvents::new(),
            auth_timeout: DEFAULT_AUTH_TIMEOUT,
            inner: Mutex::new(Inner {
                state,
                generation: 0,
            }),
        }
    }

    pub fn with_auth_timeout(mut self, timeout: Duration) -> Self {
        self.auth_timeout = timeout;
        self
    }

    pub fn status(&self) -> AuthStatus {
        match self.lock().state {
            LiveState::Anonymous => AuthStatus::Anonymous,
            LiveState::Authenticating => AuthStatus::Authenticating,
            LiveState::Authenticated { .. } => AuthStatus::Authenticated,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.status() == AuthStatus::Authenticated
    }

    /// The last committed session, if any.
    pub fn current_session(&self) -> Option<Session> {
        match &self.lock().state {
            LiveState::Authenticated { session, .. } => Some(session.clone()),
            _ => None,
        }
    }

    pub fn bearer_token(&self) -> Option<BearerToken> {
        match &self.lock().state {
            LiveState::Authenticated { token, .. } => Some(token.clone()),
            _ => None,
        }
    }

    pub fn subscribe(&self) -> Subscription {
        self.events.subscribe()
    }

    /// Authenticate against the authority and commit the resulting session.
    pub async fn login(&self, request: LoginRequest) -> Result<Session, AuthError> {
        request.validate()?;

        let (generation, ended_session) = {
            let mut inner = self.lock();
            let ended_session = match inner.state {
                LiveState::Authenticating => {
                    tracing::warn!(username = %request.username, "login rejected: another attempt is in flight");
                    return Err(AuthError::AlreadyAuthenticating);
                }
                LiveState::Authenticated { .. } => {
                    self.clear_store();
                    true
                }
                LiveState::Anonymous => false,
            };
            inner.generation += 1;
            inner.state = LiveState::Authenticating;
            (inner.generation, ended_session)
        };

        if ended_session {
            self.events.publish(SessionEvent::LoggedOut);
        }

        let attempt = PendingAttempt {
            inner: &self.inner,
            generation,
        };

        tracing::info!(username = %request.username, role = %request.role, "authenticating");
        let outcome = match tokio::time::timeout(
            self.auth_timeout,
            self.authority.authenticate(&request.username, &request.password),
        )
        .await
        {
            Ok(outcome) => outcome,
            Err(_) => Err(AuthorityError::Unreachable(format!(
                "no response within {:?}",
                self.auth_timeout
            ))),
        };

        let session = {
            let mut inner = self.lock();
            attempt.disarm();

            if inner.generation != generation {
                tracing::info!(username = %request.username, "discarding stale authentication result");
                return Err(AuthError::Superseded);
            }

            let committed = outcome
                .map_err(AuthError::from)
                .and_then(|token| self.commit(&request, token));

            match committed {
                Ok((session, token)) => {
                    inner.state = LiveState::Authenticated {
                        session: session.clone(),
                        token,
                    };
                    session
                }
                Err(err) => {
                    inner.state = LiveState::Anonymous;
                    tracing::warn!(username = %request.username, "login failed: {err}");
                    return Err(err);
                }
            }
        };

        tracing::info!(username = session.username(), role = %session.role(), "logged in");
        self.events.publish(SessionEvent::LoggedIn(session.clone()));
        Ok(session)
    }

    /// End the session from any state. Idempotent; never fails.
    pub fn logout(&self) {
        let ended_session = {
            let mut inner = self.lock();
            inner.generation += 1;
            let previous = std::mem::replace(&mut inner.state, LiveState::Anonymous);
            self.clear_store();
            matches!(previous, LiveState::Authenticated { .. })
        };

        if ended_session {
            tracing::info!("logged out");
            self.events.publish(SessionEvent::LoggedOut);
        }
    }

    /// Edit profile fields of the live session and persist them.
    pub fn update_profile(&self, update: &ProfileUpdate) -> Result<Session, AuthError> {
        let updated = {
            let mut inner = self.lock();
            let LiveState::Authenticated { session, .. } = &mut inner.state else {
                return Err(AuthError::NotAuthenticated);
            };

            let next = session
                .apply_profile(update)
                .map_err(|e| AuthError::Validation(e.to_string()))?;
            self.store
                .update_session(&next)
                .map_err(|e| AuthError::Storage(e.to_string()))?;
            *session = next.clone();
            next
        };

        tracing::info!(username = updated.username(), "profile updated");
        self.events.publish(SessionEvent::ProfileUpdated(updated.clone()));
        Ok(updated)
    }

    /// Run the route guard against the live session.
    pub fn check_navigation(&self, guard: &RouteGuard, path: &str) -> GuardDecision {
        let session = self.current_session();
        guard.check(session.as_ref(), path)
    }

    /// Start an API request carrying the live bearer token (if any).
    pub fn authorized_request(&self, client: &ApiClient, method: Method, path: &str) -> RequestBuilder {
        let token = self.bearer_token();
        client.request(method, path, token.as_ref())
    }

    fn commit(&self, request: &LoginRequest, token: BearerToken) -> Result<(Session, BearerToken), AuthError> {
        let session = Session::new(
            request.username.clone(),
            request.department.clone(),
            request.role,
        )
        .map_err(|e| AuthError::Validation(e.to_string()))?;

        self.store
            .save(&session, &token)
            .map_err(|e| AuthError::Storage(e.to_string()))?;

        Ok((session, token))
    }

    fn clear_store(&self) {
        if let Err(err) = self.store.clear() {
            tracing::error!("failed to clear persisted session: {err}");
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        lock_inner(&self.inner)
    }
}

fn lock_inner(inner: &Mutex<Inner>) -> MutexGuard<'_, Inner> {
    inner.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Returns the manager to `Anonymous` if a login future is dropped while
/// its attempt is still the current one.
struct PendingAttempt<'a> {
    inner: &'a Mutex<Inner>,
    generation: u64,
}

impl PendingAttempt<'_> {
    fn disarm(self) {
        std::mem::forget(self);
    }
}

impl Drop for PendingAttempt<'_> {
    fn drop(&mut self) {
        let mut inner = lock_inner(self.inner);
        if inner.generation == self.generation && matches!(inner.state, LiveState::Authenticating) {
            tracing::debug!("login attempt abandoned; returning to anonymous");
            inner.state = LiveState::Anonymous;
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use std::sync::atomic::{AtomicUsize, Ordering};

    use tokio::sync::{Notify, oneshot};

    use super::*;
    use crate::storage::MemoryStorage;
    use crate::store::{TOKEN_KEY, USER_KEY};

    /// Accepts one fixed password.
    struct StaticAuthority {
        password: &'static str,
    }

    impl CredentialAuthority for StaticAuthority {
        async fn authenticate(&self, username: &str, password: &str) -> Result<BearerToken, AuthorityError> {
            if password == self.password {
                Ok(BearerToken::new(format!("token-{username}")).unwrap())
            } else {
                Err(AuthorityError::InvalidCredentials)
            }
        }
    }

    type Outcome = Result<BearerToken, AuthorityError>;

    #[derive(Default)]
    struct Gate {
        tx: Option<oneshot::Sender<Outcome>>,
        rx: Option<oneshot::Receiver<Outcome>>,
    }

    /// Holds each call open until the test answers it. Calls are numbered
    /// from zero in arrival order; an answer may precede its call.
    struct GatedAuthority {
        entered: Notify,
        calls: AtomicUsize,
        gates: Mutex<Vec<Gate>>,
    }

    impl GatedAuthority {
        fn new() -> Self {
            Self {
                entered: Notify::new(),
                calls: AtomicUsize::new(0),
                gates: Mutex::new(Vec::new()),
            }
        }

        fn with_gate<T>(&self, call: usize, f: impl FnOnce(&mut Gate) -> T) -> T {
            let mut gates = self.gates.lock().unwrap();
            while gates.len() <= call {
                let (tx, rx) = oneshot::channel();
                gates.push(Gate {
                    tx: Some(tx),
                    rx: Some(rx),
                });
            }
            f(&mut gates[call])
        }

        fn answer(&self, call: usize, outcome: Outcome) {
            if let Some(tx) = self.with_gate(call, |gate| gate.tx.take()) {
                // The call may already have been abandoned.
                let _ = tx.send(outcome);
            }
        }
    }

    impl CredentialAuthority for GatedAuthority {
        async fn authenticate(&self, _username: &str, _password: &str) -> Outcome {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            let rx = self.with_gate(call, |gate| gate.rx.take()).unwrap();
            self.entered.notify_one();
            rx.await.unwrap_or(Err(AuthorityError::InvalidCredentials))
        }
    }

    fn token(raw: &str) -> BearerToken {
        BearerToken::new(raw).unwrap()
    }

    type Manager<A> = AuthSessionManager<Arc<MemoryStorage>, A>;

    fn manager<A: CredentialAuthority>(authority: A) -> (Manager<A>, Arc<MemoryStorage>) {
        let storage = Arc::new(MemoryStorage::new());
        let manager = AuthSessionManager::new(SessionStore::new(storage.clone()), authority);
        (manager, storage)
    }

    fn request() -> LoginRequest {
        LoginRequest::new("alice", "secret", "it")
    }

    #[tokio::test]
    async fn login_commits_and_persists_session() {
        let (manager, storage) = manager(StaticAuthority { password: "secret" });
        let events = manager.subscribe();

        let session = manager
            .login(request().with_role(Role::Manager))
            .await
            .unwrap();

        assert_eq!(session.username(), "alice");
        assert_eq!(session.role(), Role::Manager);
        assert_eq!(manager.status(), AuthStatus::Authenticated);
        assert_eq!(manager.current_session(), Some(session.clone()));
        assert_eq!(manager.bearer_token().unwrap().as_str(), "token-alice");
        assert_eq!(storage.get(TOKEN_KEY).unwrap().as_deref(), Some("token-alice"));
        assert_eq!(events.drain(), vec![SessionEvent::LoggedIn(session)]);
    }

    #[tokio::test]
    async fn default_role_is_user() {
        let (manager, _) = manager(StaticAuthority { password: "secret" });
        let session = manager.login(request()).await.unwrap();
        assert_eq!(session.role(), Role::User);
    }

    #[tokio::test]
    async fn rejected_credentials_leave_anonymous_and_persist_nothing() {
        let (manager, storage) = manager(StaticAuthority { password: "secret" });
        let events = manager.subscribe();

        let err = manager
            .login(LoginRequest::new("alice", "wrong", "it"))
            .await
            .unwrap_err();

        assert_eq!(err, AuthError::InvalidCredentials);
        assert_eq!(manager.status(), AuthStatus::Anonymous);
        assert!(manager.current_session().is_none());
        assert!(storage.is_empty());
        assert!(events.drain().is_empty());
    }

    #[tokio::test]
    async fn missing_fields_are_rejected_before_contacting_authority() {
        let gated = Arc::new(GatedAuthority::new());
        let (manager, _) = manager(gated.clone());

        let err = manager
            .login(LoginRequest::new("alice", "", " "))
            .await
            .unwrap_err();

        match err {
            AuthError::Validation(msg) => {
                assert!(msg.contains("password"));
                assert!(msg.contains("department"));
                assert!(!msg.contains("username"));
            }
            other => panic!("expected validation error, got {other:?}"),
        }
        assert_eq!(manager.status(), AuthStatus::Anonymous);
    }

    #[tokio::test]
    async fn concurrent_login_is_rejected_and_first_attempt_wins() {
        let gated = Arc::new(GatedAuthority::new());
        let (manager, _) = manager(gated.clone());
        let manager = Arc::new(manager);

        let first = {
            let manager = manager.clone();
            tokio::spawn(async move { manager.login(request().with_role(Role::Admin)).await })
        };
        gated.entered.notified().await;
        assert_eq!(manager.status(), AuthStatus::Authenticating);

        let second = manager
            .login(LoginRequest::new("mallory", "pw", "hr"))
            .await;
        assert_eq!(second, Err(AuthError::AlreadyAuthenticating));
        assert_eq!(manager.status(), AuthStatus::Authenticating);

        gated.answer(0, Ok(token("t-first")));
        let session = first.await.unwrap().unwrap();

        assert_eq!(session.username(), "alice");
        assert_eq!(manager.current_session(), Some(session));
        assert_eq!(manager.bearer_token().unwrap().as_str(), "t-first");
    }

    #[tokio::test]
    async fn logout_discards_late_authority_response() {
        let gated = Arc::new(GatedAuthority::new());
        let (manager, storage) = manager(gated.clone());
        let manager = Arc::new(manager);

        let pending = {
            let manager = manager.clone();
            tokio::spawn(async move { manager.login(request()).await })
        };
        gated.entered.notified().await;

        manager.logout();
        assert_eq!(manager.status(), AuthStatus::Anonymous);

        gated.answer(0, Ok(token("t-late")));
        assert_eq!(pending.await.unwrap(), Err(AuthError::Superseded));

        assert_eq!(manager.status(), AuthStatus::Anonymous);
        assert!(manager.current_session().is_none());
        assert!(storage.is_empty());
    }

    #[tokio::test]
    async fn newer_login_after_logout_decides_the_outcome() {
        let gated = Arc::new(GatedAuthority::new());
        let (manager, storage) = manager(gated.clone());
        let manager = Arc::new(manager);

        let first = {
            let manager = manager.clone();
            tokio::spawn(async move { manager.login(request().with_role(Role::Admin)).await })
        };
        gated.entered.notified().await;
        manager.logout();

        let second = {
            let manager = manager.clone();
            tokio::spawn(async move { manager.login(LoginRequest::new("bob", "pw", "finance")).await })
        };
        gated.entered.notified().await;

        gated.answer(0, Ok(token("t-first")));
        assert_eq!(first.await.unwrap(), Err(AuthError::Superseded));
        assert_eq!(manager.status(), AuthStatus::Authenticating);
        assert!(storage.is_empty());

        gated.answer(1, Ok(token("t-second")));
        let session = second.await.unwrap().unwrap();

        assert_eq!(session.username(), "bob");
        assert_eq!(session.role(), Role::User);
        assert_eq!(manager.current_session(), Some(session));
        assert_eq!(manager.bearer_token(), Some(token("t-second")));
        assert_eq!(storage.get(TOKEN_KEY).unwrap().as_deref(), Some("t-second"));
    }

    #[tokio::test]
    async fn rejected_newer_login_is_not_rescued_by_stale_success() {
        let gated = Arc::new(GatedAuthority::new());
        let (manager, storage) = manager(gated.clone());
        let manager = Arc::new(manager);

        let first = {
            let manager = manager.clone();
            tokio::spawn(async move { manager.login(request()).await })
        };
        gated.entered.notified().await;
        manager.logout();

        let second = {
            let manager = manager.clone();
            tokio::spawn(async move { manager.login(LoginRequest::new("bob", "wrong", "finance")).await })
        };
        gated.entered.notified().await;

        gated.answer(1, Err(AuthorityError::InvalidCredentials));
        assert_eq!(second.await.unwrap(), Err(AuthError::InvalidCredentials));

        gated.answer(0, Ok(token("t-first")));
        assert_eq!(first.await.unwrap(), Err(AuthError::Superseded));

        assert_eq!(manager.status(), AuthStatus::Anonymous);
        assert!(manager.current_session().is_none());
        assert!(storage.is_empty());
    }

    #[tokio::test]
    async fn network_failure_is_distinguished() {
        let gated = Arc::new(GatedAuthority::new());
        let (manager, _) = manager(gated.clone());
        gated.answer(0, Err(AuthorityError::Unreachable("connection refused".into())));

        let err = manager.login(request()).await.unwrap_err();
        assert_eq!(err, AuthError::Network("connection refused".into()));
        assert_eq!(manager.status(), AuthStatus::Anonymous);
    }

    #[tokio::test]
    async fn authority_timeout_maps_to_network_error() {
        let gated = Arc::new(GatedAuthority::new());
        let (manager, _) = manager(gated.clone());
        let manager = manager.with_auth_timeout(Duration::from_millis(20));

        let err = manager.login(request()).await.unwrap_err();
        assert!(matches!(err, AuthError::Network(_)));
        assert_eq!(manager.status(), AuthStatus::Anonymous);
    }

    #[tokio::test]
    async fn dropped_login_future_returns_to_anonymous() {
        let gated = Arc::new(GatedAuthority::new());
        let (manager, _) = manager(gated.clone());

        {
            let attempt = manager.login(request());
            tokio::select! {
                _ = attempt => panic!("gated login must not complete"),
                _ = gated.entered.notified() => {}
            }
        }

        assert_eq!(manager.status(), AuthStatus::Anonymous);
        gated.answer(1, Ok(token("t-next")));
        assert!(manager.login(request()).await.is_ok());
    }

    #[tokio::test]
    async fn logout_is_idempotent() {
        let (manager, storage) = manager(StaticAuthority { password: "secret" });
        manager.login(request()).await.unwrap();
        let events = manager.subscribe();

        manager.logout();
        manager.logout();

        assert_eq!(manager.status(), AuthStatus::Anonymous);
        assert!(storage.is_empty());
        assert_eq!(events.drain(), vec![SessionEvent::LoggedOut]);
    }

    #[tokio::test]
    async fn relogin_ends_previous_session_first() {
        let (manager, _) = manager(StaticAuthority { password: "secret" });
        manager.login(request()).await.unwrap();
        let events = manager.subscribe();

        let err = manager
            .login(LoginRequest::new("bob", "wrong", "finance"))
            .await
            .unwrap_err();

        assert_eq!(err, AuthError::InvalidCredentials);
        assert!(manager.current_session().is_none());
        assert_eq!(events.drain(), vec![SessionEvent::LoggedOut]);
    }

    #[test]
    fn restores_persisted_session_at_construction() {
        let storage = Arc::new(MemoryStorage::new());
        storage
            .set(USER_KEY, r#"{"username":"carol","department":"ops"}"#)
            .unwrap();
        storage.set(TOKEN_KEY, "t-restored").unwrap();

        let manager = AuthSessionManager::new(
            SessionStore::new(storage),
            StaticAuthority { password: "secret" },
        );

        assert_eq!(manager.status(), AuthStatus::Authenticated);
        let session = manager.current_session().unwrap();
        assert_eq!(session.username(), "carol");
        assert_eq!(session.role(), Role::User);
    }

    #[test]
    fn corrupted_persisted_session_starts_anonymous() {
        let storage = Arc::new(MemoryStorage::new());
        storage.set(USER_KEY, "]]").unwrap();
        storage.set(TOKEN_KEY, "t").unwrap();

        let manager = AuthSessionManager::new(
            SessionStore::new(storage.clone()),
            StaticAuthority { password: "secret" },
        );

        assert_eq!(manager.status(), AuthStatus::Anonymous);
        assert!(storage.is_empty());
    }

    #[tokio::test]
    async fn profile_update_round_trips_through_store() {
        let (manager, storage) = manager(StaticAuthority { password: "secret" });
        assert_eq!(
            manager.update_profile(&ProfileUpdate::default()),
            Err(AuthError::NotAuthenticated)
        );

        manager.login(request().with_role(Role::Admin)).await.unwrap();
        let events = manager.subscribe();

        let updated = manager
            .update_profile(&ProfileUpdate {
                username: Some("Alex Bailey".into()),
                department: Some("IT & Operations".into()),
                location: None,
            })
            .unwrap();

        assert_eq!(updated.role(), Role::Admin);
        assert_eq!(manager.current_session(), Some(updated.clone()));
        let persisted: Session =
            serde_json::from_str(&storage.get(USER_KEY).unwrap().unwrap()).unwrap();
        assert_eq!(persisted, updated);
        assert_eq!(events.drain(), vec![SessionEvent::ProfileUpdated(updated)]);
    }

    #[tokio::test]
    async fn navigation_uses_live_session() {
        let (manager, _) = manager(StaticAuthority { password: "secret" });
        let guard = RouteGuard::default();

        assert!(matches!(
            manager.check_navigation(&guard, "/reports"),
            GuardDecision::RedirectToLogin { .. }
        ));

        manager.login(request().with_role(Role::Guest)).await.unwrap();
        assert!(matches!(
            manager.check_navigation(&guard, "/reports"),
            GuardDecision::AccessDenied { .. }
        ));
        assert!(manager.check_navigation(&guard, "/").is_render());
    }

    #[test]
    fn login_request_debug_redacts_password() {
        let rendered = format!("{:?}", LoginRequest::new("alice", "hunter2", "it"));
        assert!(!rendered.contains("hunter2"));
    }
}
