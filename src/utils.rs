use chrono::Utc;
use rand::{Rng, distr::Alphanumeric};

/// Generates a random opaque state token for the authorization-code flow.
///
/// 16 alphanumeric characters, matching what the Spotify authorize endpoint
/// expects for the `state` parameter. Each call produces an independent
/// value; the login-state registry ties it to a pending flow.
pub fn generate_state_token() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(16)
        .map(char::from)
        .collect()
}

/// Current instant as epoch milliseconds.
///
/// All token expiry bookkeeping uses this clock.
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}
