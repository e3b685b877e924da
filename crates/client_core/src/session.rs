//! The signed-in identity, its persistence slot, and the login/register/logout
//! operations that change it.

use std::{
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    },
    time::Duration,
};

use async_trait::async_trait;
use chrono::Utc;
use shared::{
    domain::{Identity, UserId, UserKind},
    error::{ErrorCode, ErrorReport},
};
use storage::KeyValueStore;
use thiserror::Error;
use tokio::sync::{broadcast, RwLock};
use tracing::{debug, info, warn};

/// Slot holding the serialized [`Identity`] between launches.
pub const IDENTITY_SLOT: &str = "towing_app.user";

pub const DEFAULT_AUTH_DELAY: Duration = Duration::from_millis(1000);
const MOCK_PHONE: &str = "+1234567890";
const MOCK_DRIVER_VEHICLE: &str = "flatbed";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("an account already exists for {email}")]
    DuplicateEmail { email: String },
    #[error("{0}")]
    Validation(String),
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error("failed to encode identity: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("identity storage failed: {0:#}")]
    Storage(anyhow::Error),
}

impl SessionError {
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Auth(AuthError::InvalidCredentials) => ErrorCode::InvalidCredentials,
            Self::Auth(AuthError::DuplicateEmail { .. }) => ErrorCode::DuplicateEmail,
            Self::Auth(AuthError::Validation(_)) => ErrorCode::Validation,
            Self::Encode(_) => ErrorCode::Internal,
            Self::Storage(_) => ErrorCode::Storage,
        }
    }
}

impl From<&SessionError> for ErrorReport {
    fn from(value: &SessionError) -> Self {
        ErrorReport::new(value.code(), value.to_string())
    }
}

/// Fields collected by the registration form once it has passed client-side
/// checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterFields {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub password: String,
    pub kind: UserKind,
    pub vehicle_type: Option<String>,
}

/// Credential verification behind login and registration.
#[async_trait]
pub trait Authenticator: Send + Sync {
    async fn authenticate(
        &self,
        email: &str,
        password: &str,
        kind: UserKind,
    ) -> Result<Identity, AuthError>;
    async fn register(&self, fields: &RegisterFields) -> Result<Identity, AuthError>;
}

/// Accepts every login and registration after a fixed simulated latency.
#[derive(Debug, Clone, Copy)]
pub struct MockAuthenticator {
    delay: Duration,
}

impl MockAuthenticator {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

impl Default for MockAuthenticator {
    fn default() -> Self {
        Self::new(DEFAULT_AUTH_DELAY)
    }
}

fn next_user_id() -> UserId {
    UserId(Utc::now().timestamp_millis())
}

/// Display name derived from an email address: everything before the `@`.
pub fn name_from_email(email: &str) -> &str {
    email.split('@').next().unwrap_or(email)
}

#[async_trait]
impl Authenticator for MockAuthenticator {
    async fn authenticate(
        &self,
        email: &str,
        _password: &str,
        kind: UserKind,
    ) -> Result<Identity, AuthError> {
        tokio::time::sleep(self.delay).await;
        Ok(Identity {
            id: next_user_id(),
            email: email.to_string(),
            name: name_from_email(email).to_string(),
            kind,
            phone: Some(MOCK_PHONE.to_string()),
            vehicle_type: (kind == UserKind::Driver).then(|| MOCK_DRIVER_VEHICLE.to_string()),
        })
    }

    async fn register(&self, fields: &RegisterFields) -> Result<Identity, AuthError> {
        tokio::time::sleep(self.delay).await;
        Ok(Identity {
            id: next_user_id(),
            email: fields.email.clone(),
            name: fields.name.clone(),
            kind: fields.kind,
            phone: fields.phone.clone(),
            vehicle_type: match fields.kind {
                UserKind::Driver => fields.vehicle_type.clone(),
                UserKind::Customer => None,
            },
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    SignedIn(Identity),
    SignedOut,
}

/// Counts an in-flight authentication for as long as it is alive, including
/// when the caller drops the future early.
struct PendingAuth<'a>(&'a AtomicUsize);

impl<'a> PendingAuth<'a> {
    fn start(counter: &'a AtomicUsize) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        Self(counter)
    }
}

impl Drop for PendingAuth<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Owns the current identity and keeps it in sync with [`IDENTITY_SLOT`].
///
/// Views receive the store explicitly and only ever read snapshots of the
/// identity; every change goes through `login`, `register` or `logout`.
pub struct SessionStore {
    store: Arc<dyn KeyValueStore>,
    authenticator: Arc<dyn Authenticator>,
    identity: RwLock<Option<Identity>>,
    pending: AtomicUsize,
    events: broadcast::Sender<SessionEvent>,
}

impl SessionStore {
    /// Restores any identity left in the slot by a previous run.
    ///
    /// An unreadable record is dropped from the slot and the session starts
    /// signed out.
    pub async fn load(
        store: Arc<dyn KeyValueStore>,
        authenticator: Arc<dyn Authenticator>,
    ) -> Result<Self, SessionError> {
        let raw = store
            .get(IDENTITY_SLOT)
            .await
            .map_err(SessionError::Storage)?;

        let identity = match raw {
            None => None,
            Some(raw) => match serde_json::from_str::<Identity>(&raw) {
                Ok(identity) => {
                    debug!(user_id = %identity.id, kind = %identity.kind, "restored session");
                    Some(identity)
                }
                Err(err) => {
                    warn!("discarding unreadable identity slot: {err}");
                    store
                        .remove(IDENTITY_SLOT)
                        .await
                        .map_err(SessionError::Storage)?;
                    None
                }
            },
        };

        let (events, _) = broadcast::channel(16);
        Ok(Self {
            store,
            authenticator,
            identity: RwLock::new(identity),
            pending: AtomicUsize::new(0),
            events,
        })
    }

    pub async fn current(&self) -> Option<Identity> {
        self.identity.read().await.clone()
    }

    pub async fn is_signed_in(&self) -> bool {
        self.identity.read().await.is_some()
    }

    /// True while a login or registration is waiting on the authenticator.
    pub fn is_loading(&self) -> bool {
        self.pending.load(Ordering::SeqCst) > 0
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    pub async fn login(
        &self,
        email: &str,
        password: &str,
        kind: UserKind,
    ) -> Result<Identity, SessionError> {
        let pending = PendingAuth::start(&self.pending);
        let outcome = match self.authenticator.authenticate(email, password, kind).await {
            Ok(identity) => self.sign_in(identity).await,
            Err(err) => Err(err.into()),
        };
        drop(pending);

        if let Err(err) = &outcome {
            warn!(%kind, "login failed: {err}");
        }
        outcome
    }

    pub async fn register(&self, fields: &RegisterFields) -> Result<Identity, SessionError> {
        let pending = PendingAuth::start(&self.pending);
        let outcome = match self.authenticator.register(fields).await {
            Ok(identity) => self.sign_in(identity).await,
            Err(err) => Err(err.into()),
        };
        drop(pending);

        if let Err(err) = &outcome {
            warn!(kind = %fields.kind, "registration failed: {err}");
        }
        outcome
    }

    /// Forgets the identity in the slot and then in memory. If the slot
    /// cannot be cleared the session stays signed in.
    pub async fn logout(&self) -> Result<(), SessionError> {
        let mut identity = self.identity.write().await;
        self.store
            .remove(IDENTITY_SLOT)
            .await
            .map_err(SessionError::Storage)?;

        if let Some(previous) = identity.take() {
            info!(user_id = %previous.id, "session signed out");
            let _ = self.events.send(SessionEvent::SignedOut);
        }
        Ok(())
    }

    async fn sign_in(&self, identity: Identity) -> Result<Identity, SessionError> {
        let raw = serde_json::to_string(&identity)?;
        self.store
            .set(IDENTITY_SLOT, &raw)
            .await
            .map_err(SessionError::Storage)?;
        *self.identity.write().await = Some(identity.clone());

        info!(user_id = %identity.id, kind = %identity.kind, "session signed in");
        let _ = self.events.send(SessionEvent::SignedIn(identity.clone()));
        Ok(identity)
    }
}

#[cfg(test)]
#[path = "tests/session_tests.rs"]
mod tests;
