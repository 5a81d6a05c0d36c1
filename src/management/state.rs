use std::collections::HashMap;

use tokio::sync::Mutex;

use crate::utils;

const DEFAULT_TTL_MILLIS: i64 = 10 * 60 * 1000;

/// In-memory registry of pending authorization-code flows.
///
/// `/api/login` issues a state token here before redirecting; the callback
/// consumes it exactly once. Unknown, reused or timed-out states are
/// rejected, which is the CSRF check the `state` parameter exists for.
/// Entries are pruned opportunistically on issue, so an abandoned login
/// never leaks memory beyond its TTL.
pub struct LoginStateRegistry {
    pending: Mutex<HashMap<String, i64>>,
    ttl_millis: i64,
}

impl LoginStateRegistry {
    pub fn new() -> Self {
        Self::with_ttl(DEFAULT_TTL_MILLIS)
    }

    pub fn with_ttl(ttl_millis: i64) -> Self {
        Self {
            pending: Mutex::new(HashMap::new()),
            ttl_millis,
        }
    }

    /// Issues a fresh state token and records it as pending.
    pub async fn issue(&self) -> String {
        let state = utils::generate_state_token();
        let now = utils::now_millis();

        let mut pending = self.pending.lock().await;
        pending.retain(|_, expires_at| *expires_at > now);
        pending.insert(state.clone(), now + self.ttl_millis);

        state
    }

    /// Verifies and consumes a state token. Single use.
    pub async fn consume(&self, state: &str) -> bool {
        let mut pending = self.pending.lock().await;
        match pending.remove(state) {
            Some(expires_at) => expires_at > utils::now_millis(),
            None => false,
        }
    }
}

impl Default for LoginStateRegistry {
    fn default() -> Self {
        Self::new()
    }
}
