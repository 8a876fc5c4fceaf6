//! Session state controller.
//!
//! DESIGN
//! ======
//! The controller is the sole writer of session state. The token store is
//! a passive durable cell: the API client clears it on a 401 and broadcasts
//! an invalidation event, and the controller folds that event into the same
//! state machine every other transition goes through. Consumers observe one
//! watch channel instead of re-deriving state from the store ad hoc.
//!
//! States: `Loading` (before the store has been consulted) →
//! `Authenticated` | `Unauthenticated`, then flipping on login/logout/
//! invalidation.

use std::sync::Arc;

use tokio::sync::{broadcast, watch};

use crate::client::{ApiClient, SessionEvent};
use crate::error::ApiError;
use crate::models::Credentials;
use crate::token::TokenStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Initial state, before the token store has been read.
    Loading,
    Authenticated,
    Unauthenticated,
}

pub struct SessionController {
    client: Arc<ApiClient>,
    store: Arc<dyn TokenStore>,
    state: watch::Sender<SessionState>,
}

impl SessionController {
    #[must_use]
    pub fn new(client: Arc<ApiClient>) -> Self {
        let store = client.token_store();
        let (state, _) = watch::channel(SessionState::Loading);
        Self { client, store, state }
    }

    /// Read the token store once and leave `Loading`. Returns the state
    /// settled on.
    pub fn initialize(&self) -> SessionState {
        let next = if self.store.get().is_some() {
            SessionState::Authenticated
        } else {
            SessionState::Unauthenticated
        };
        self.state.send_replace(next);
        tracing::debug!(?next, "session initialized");
        next
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        *self.state.borrow()
    }

    /// Watch channel for state transitions.
    #[must_use]
    pub fn watch(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    /// Log in and store the issued token. On failure the session settles on
    /// `Unauthenticated` and the error propagates to the caller unswallowed.
    pub async fn login(&self, credentials: &Credentials) -> Result<(), ApiError> {
        match self.client.login(credentials).await {
            Ok(token) => {
                self.store.set(&token.access_token);
                self.state.send_replace(SessionState::Authenticated);
                tracing::info!("login succeeded");
                Ok(())
            }
            Err(error) => {
                self.state.send_replace(SessionState::Unauthenticated);
                Err(error)
            }
        }
    }

    /// Clear the token and drop to `Unauthenticated`. No network call.
    pub fn logout(&self) {
        self.store.clear();
        self.state.send_replace(SessionState::Unauthenticated);
        tracing::info!("logged out");
    }

    /// Fold a session-invalidated event into the state machine. Idempotent:
    /// returns false (and notifies nobody) when the session is already
    /// unauthenticated, so repeated 401s cause no duplicate transitions.
    pub fn handle_invalidated(&self) -> bool {
        self.state.send_if_modified(|state| {
            if *state == SessionState::Unauthenticated {
                return false;
            }
            *state = SessionState::Unauthenticated;
            true
        })
    }

    /// Apply the client's invalidation events until the client side of the
    /// channel closes.
    pub fn spawn_invalidation_listener(self: &Arc<Self>) -> tokio::task::JoinHandle<()> {
        let controller = Arc::clone(self);
        let mut events = controller.client.subscribe();
        tokio::spawn(async move {
            loop {
                match events.recv().await {
                    Ok(SessionEvent::Invalidated) => {
                        if controller.handle_invalidated() {
                            tracing::warn!("session invalidated by unauthorized response");
                        }
                    }
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        // Collapsing missed events is safe: the transition
                        // is idempotent.
                        tracing::debug!(skipped, "invalidation listener lagged");
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        })
    }
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
