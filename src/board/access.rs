//! Access gate for password-protected posts.
//!
//! A gate lives for a single request/response cycle; nothing is memoized
//! across requests. It starts `Locked` and moves to the terminal
//! `Unlocked` state only when the supplied password verifies against the
//! post's stored hash.
//!
//! A missing post, a post without a stored hash, and a wrong password all
//! leave the gate `Locked`, so callers cannot distinguish "no such post"
//! from "wrong password".

use super::types::Post;
use crate::privacy::verify_password;

/// Gate state for one (post, requester) interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateState {
    /// Initial state; gated data must not be exposed.
    Locked,
    /// Terminal state; decrypted author fields and the reply may be shown.
    Unlocked,
}

/// Per-request password gate.
#[derive(Debug)]
pub struct AccessGate {
    hash: Option<String>,
    state: GateState,
}

impl AccessGate {
    /// Create a gate over an optional stored hash.
    pub fn new(hash: Option<String>) -> Self {
        Self {
            hash,
            state: GateState::Locked,
        }
    }

    /// Create a gate for a post lookup result.
    ///
    /// Accepts the `Option` directly so the absent-post case flows through
    /// the same path as a present one.
    pub fn for_post(post: Option<&Post>) -> Self {
        Self::new(post.and_then(|p| p.password.clone()))
    }

    /// Current gate state.
    pub fn state(&self) -> GateState {
        self.state
    }

    /// Whether the gate has been unlocked.
    pub fn is_unlocked(&self) -> bool {
        self.state == GateState::Unlocked
    }

    /// Attempt to unlock with the supplied password.
    ///
    /// Runs the deliberately slow hash verification; on the async path this
    /// belongs inside `spawn_blocking`. Returns the resulting state.
    pub fn unlock(&mut self, supplied: &str) -> GateState {
        if self.state == GateState::Unlocked {
            return self.state;
        }

        if let Some(ref hash) = self.hash {
            if verify_password(supplied, hash).is_ok() {
                self.state = GateState::Unlocked;
            }
        }

        self.state
    }
}
