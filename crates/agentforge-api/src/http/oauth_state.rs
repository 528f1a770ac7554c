//! Short-lived, single-use OAuth `state` values.

use std::sync::Arc;
use std::time::{Duration, Instant};

use dashmap::DashMap;

use agentforge_core::service::credential::TokenMinter;
use agentforge_infra::crypto::token::RandomTokenMinter;
use agentforge_types::user::OAuthProvider;

/// How long a state value stays valid.
pub const STATE_TTL: Duration = Duration::from_secs(10 * 60);

/// In-memory store of issued OAuth states.
#[derive(Clone, Default)]
pub struct OAuthStateStore {
    states: Arc<DashMap<String, (OAuthProvider, Instant)>>,
}

impl OAuthStateStore {
    /// Issue a fresh state for `provider`, dropping expired ones.
    pub fn issue(&self, provider: OAuthProvider, now: Instant) -> String {
        self.states
            .retain(|_, (_, issued)| now.saturating_duration_since(*issued) < STATE_TTL);
        let state = RandomTokenMinter.mint();
        self.states.insert(state.clone(), (provider, now));
        state
    }

    /// Consume `state`. True only if it was issued for `provider` and has not
    /// expired; the state is removed either way.
    pub fn consume(&self, state: &str, provider: OAuthProvider, now: Instant) -> bool {
        match self.states.remove(state) {
            Some((_, (issued_for, issued))) => {
                issued_for == provider && now.saturating_duration_since(issued) < STATE_TTL
            }
            None => false,
        }
    }
}
