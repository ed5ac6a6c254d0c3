//! Session gate — the state machine between the entry surface and the
//! workflow surface.
//!
//! `Entering --submit--> Verifying --Authenticated--> Granted` (terminal; the
//! surface navigates away). `Verifying --Rejected--> Denied --submit-->
//! Verifying` with unlimited retries. The rejection message is deliberately
//! generic and never says whether the identifier or the secret was wrong.

use crate::auth::{verify, Verdict};
use crate::models::user::Credentials;
use crate::store::UserStore;

const DENIED_MESSAGE: &str = "Invalid email or password. Please try again.";

/// Where the user currently stands relative to the gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GateState {
    #[default]
    Entering,
    Verifying,
    Granted,
    Denied,
}

pub struct SessionGate<S> {
    store: S,
    state: GateState,
    error: Option<String>,
}

impl<S: UserStore> SessionGate<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            state: GateState::Entering,
            error: None,
        }
    }

    pub fn state(&self) -> GateState {
        self.state
    }

    /// The message the entry surface renders after a denial.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Runs one verification attempt from scratch; no token or session is
    /// carried between attempts. Granted is terminal, so a submit after
    /// success is a no-op.
    pub async fn submit(&mut self, credentials: &Credentials) -> GateState {
        if self.state == GateState::Granted {
            return GateState::Granted;
        }

        self.state = GateState::Verifying;
        self.error = None;

        match verify(&self.store, &credentials.identifier, &credentials.secret).await {
            Verdict::Authenticated => {
                self.state = GateState::Granted;
            }
            Verdict::Rejected => {
                self.state = GateState::Denied;
                self.error = Some(DENIED_MESSAGE.to_string());
            }
        }

        self.state
    }
}
