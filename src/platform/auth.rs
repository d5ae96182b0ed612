//! Access gate and authenticator collaborator.
//!
//! The gate sits in front of the whole editing flow. Authentication replies
//! arrive asynchronously, so the gate state is shared behind a mutex.

use crate::core::error::AuthError;
use parking_lot::Mutex;
use std::sync::Arc;

/// Prompt shown by authenticators that display one.
pub const UNLOCK_REASON: &str = "We need to confirm it's you";

/// Called once with the outcome of an authentication attempt.
pub type AuthReply = Box<dyn FnOnce(Result<(), AuthError>) + Send>;

/// Something that can confirm the user's identity.
pub trait Authenticator: Send + Sync {
    /// Whether this device can authenticate at all.
    fn can_evaluate(&self) -> Result<(), AuthError>;

    /// Start an authentication challenge; `reply` is called exactly once.
    fn evaluate(&self, reason: &str, reply: AuthReply);
}

/// Authenticator with a fixed outcome, replying from a background worker.
#[derive(Debug, Clone)]
pub struct StaticAuthenticator {
    outcome: Result<(), AuthError>,
}

impl StaticAuthenticator {
    /// Always succeeds.
    pub fn accepting() -> Self {
        Self { outcome: Ok(()) }
    }

    /// Always rejects with `reason`.
    pub fn rejecting(reason: impl Into<String>) -> Self {
        Self {
            outcome: Err(AuthError::Rejected(reason.into())),
        }
    }
}

impl Authenticator for StaticAuthenticator {
    fn can_evaluate(&self) -> Result<(), AuthError> {
        Ok(())
    }

    fn evaluate(&self, _reason: &str, reply: AuthReply) {
        let outcome = self.outcome.clone();
        rayon::spawn(move || reply(outcome));
    }
}

/// Authenticator for platforms without biometric hardware.
#[derive(Debug, Clone, Default)]
pub struct UnavailableAuthenticator;

impl Authenticator for UnavailableAuthenticator {
    fn can_evaluate(&self) -> Result<(), AuthError> {
        Err(AuthError::Unavailable("no biometric authenticator on this platform".to_string()))
    }

    fn evaluate(&self, _reason: &str, reply: AuthReply) {
        reply(self.can_evaluate());
    }
}

/// Whether the editing flow may be used.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateState {
    /// Waiting for a successful authentication.
    Locked,
    /// Editing allowed.
    Unlocked,
}

/// Shared lock state in front of the editing flow.
#[derive(Debug, Clone)]
pub struct AccessGate {
    state: Arc<Mutex<GateState>>,
}

impl AccessGate {
    /// A gate that starts locked only when unlocking is required.
    pub fn new(require_unlock: bool) -> Self {
        let initial = if require_unlock {
            GateState::Locked
        } else {
            GateState::Unlocked
        };
        Self {
            state: Arc::new(Mutex::new(initial)),
        }
    }

    /// Current state.
    pub fn state(&self) -> GateState {
        *self.state.lock()
    }

    /// Whether the editing flow may be used.
    pub fn is_unlocked(&self) -> bool {
        self.state() == GateState::Unlocked
    }

    /// Lock the gate again.
    pub fn lock(&self) {
        *self.state.lock() = GateState::Locked;
    }

    /// Ask `authenticator` to unlock the gate.
    ///
    /// The gate unlocks only on success. `on_complete` receives the outcome,
    /// possibly on another thread.
    pub fn authenticate<F>(&self, authenticator: &dyn Authenticator, on_complete: F)
    where
        F: FnOnce(Result<(), AuthError>) + Send + 'static,
    {
        if let Err(error) = authenticator.can_evaluate() {
            log::warn!("Can't handle authentication: {}", error);
            on_complete(Err(error));
            return;
        }

        let state = Arc::clone(&self.state);
        authenticator.evaluate(
            UNLOCK_REASON,
            Box::new(move |result| {
                match &result {
                    Ok(()) => {
                        *state.lock() = GateState::Unlocked;
                        log::info!("Access gate unlocked");
                    }
                    Err(error) => log::warn!("Authentication failed: {}", error),
                }
                on_complete(result);
            }),
        );
    }
}
