//! Configuration management for the relay service.
//!
//! This module handles loading and accessing configuration values from
//! environment variables and `.env` files. It provides a centralized way to
//! manage application configuration including Spotify API credentials, the
//! frontend location, server settings, and the credential store path.
//!
//! The configuration system follows a hierarchical approach:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory
//! 3. Application defaults (where applicable)

use dotenv;
use std::{env, path::PathBuf};

/// Loads environment variables from a `.env` file in the local data directory.
///
/// Creates the necessary directory structure if it doesn't exist and loads
/// environment variables from a `.env` file located in the platform-specific
/// local data directory under `tunerelay/.env`. Variables already present in
/// the process environment take precedence; a missing `.env` file is not an
/// error so that fully env-var-driven deployments work unchanged.
///
/// # Directory Structure
///
/// The function looks for the `.env` file in:
/// - Linux: `~/.local/share/tunerelay/.env`
/// - macOS: `~/Library/Application Support/tunerelay/.env`
/// - Windows: `%LOCALAPPDATA%/tunerelay/.env`
///
/// # Errors
///
/// Returns an error if the parent directory cannot be created or the file
/// exists but cannot be parsed.
pub async fn load_env() -> Result<(), String> {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("tunerelay/.env");
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    if path.is_file() {
        dotenv::from_path(&path).map_err(|e| e.to_string())?;
    }
    Ok(())
}

/// Returns the address and port the relay server binds to.
///
/// Falls back to `0.0.0.0:8888` when `SERVER_ADDRESS` is not set.
pub fn server_addr() -> String {
    env::var("SERVER_ADDRESS").unwrap_or_else(|_| "0.0.0.0:8888".to_string())
}

/// Environment variables without a built-in default.
const REQUIRED_KEYS: [&str; 4] = [
    "SPOTIFY_API_AUTH_CLIENT_ID",
    "SPOTIFY_API_AUTH_CLIENT_SECRET",
    "SPOTIFY_API_REDIRECT_URI",
    "FRONTEND_URL",
];

/// Verifies that every setting without a default is present.
///
/// Run once before the server starts so a misconfigured deployment fails
/// on the startup path instead of panicking inside a request handler.
pub fn check_required() -> Result<(), String> {
    match first_unset(&REQUIRED_KEYS) {
        Some(key) => Err(format!("{key} must be set")),
        None => Ok(()),
    }
}

fn first_unset<'a>(keys: &'a [&'a str]) -> Option<&'a str> {
    keys.iter().copied().find(|key| env::var(key).is_err())
}

/// Returns the base URL of the companion frontend.
///
/// Read once at serve startup and carried in the handler state; the
/// callback handler redirects here after a completed login. Must not
/// carry a trailing slash.
///
/// # Panics
///
/// Panics if the `FRONTEND_URL` environment variable is not set;
/// `check_required` guards against that before the server starts.
pub fn frontend_url() -> String {
    env::var("FRONTEND_URL").expect("FRONTEND_URL must be set")
}

/// Returns the Spotify API client ID for authentication.
///
/// # Panics
///
/// Panics if the `SPOTIFY_API_AUTH_CLIENT_ID` environment variable is not set.
pub fn spotify_client_id() -> String {
    env::var("SPOTIFY_API_AUTH_CLIENT_ID").expect("SPOTIFY_API_AUTH_CLIENT_ID must be set")
}

/// Returns the Spotify API client secret for authentication.
///
/// The client secret should be kept confidential and never exposed in logs
/// or version control.
///
/// # Panics
///
/// Panics if the `SPOTIFY_API_AUTH_CLIENT_SECRET` environment variable is not set.
pub fn spotify_client_secret() -> String {
    env::var("SPOTIFY_API_AUTH_CLIENT_SECRET").expect("SPOTIFY_API_AUTH_CLIENT_SECRET must be set")
}

/// Returns the Spotify OAuth redirect URI.
///
/// This must match the redirect URI registered in the Spotify application
/// settings and points at this service's `/api/callback` route.
///
/// # Panics
///
/// Panics if the `SPOTIFY_API_REDIRECT_URI` environment variable is not set.
pub fn spotify_redirect_uri() -> String {
    env::var("SPOTIFY_API_REDIRECT_URI").expect("SPOTIFY_API_REDIRECT_URI must be set")
}

/// Returns the Spotify API scope permissions requested during login.
///
/// Falls back to the scopes the dashboard needs when
/// `SPOTIFY_API_AUTH_SCOPE` is not set.
pub fn spotify_scope() -> String {
    env::var("SPOTIFY_API_AUTH_SCOPE")
        .unwrap_or_else(|_| "user-read-private user-read-email user-top-read".to_string())
}

/// Returns the Spotify OAuth authorization URL.
///
/// Falls back to the public accounts-service endpoint when
/// `SPOTIFY_API_AUTH_URL` is not set.
pub fn spotify_apiauth_url() -> String {
    env::var("SPOTIFY_API_AUTH_URL")
        .unwrap_or_else(|_| "https://accounts.spotify.com/authorize".to_string())
}

/// Returns the Spotify OAuth token exchange URL.
///
/// Used for the authorization-code exchange, token refresh and the
/// client-credentials grant. Falls back to the public accounts-service
/// endpoint when `SPOTIFY_API_TOKEN_URL` is not set.
pub fn spotify_apitoken_url() -> String {
    env::var("SPOTIFY_API_TOKEN_URL")
        .unwrap_or_else(|_| "https://accounts.spotify.com/api/token".to_string())
}

/// Returns the Spotify Web API base URL.
///
/// Falls back to the public endpoint when `SPOTIFY_API_URL` is not set.
pub fn spotify_apiurl() -> String {
    env::var("SPOTIFY_API_URL").unwrap_or_else(|_| "https://api.spotify.com/v1".to_string())
}

/// Returns the path of the on-disk credential store.
///
/// Honors `CREDENTIALS_PATH` when set; otherwise the store lives under the
/// platform-specific local data directory at `tunerelay/credentials.json`.
pub fn credentials_path() -> PathBuf {
    if let Ok(path) = env::var("CREDENTIALS_PATH") {
        return PathBuf::from(path);
    }
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("tunerelay/credentials.json");
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_unset_flags_absent_variables() {
        assert_eq!(
            first_unset(&["TUNERELAY_SURELY_UNSET_VARIABLE"]),
            Some("TUNERELAY_SURELY_UNSET_VARIABLE")
        );
        // PATH is present in any test environment
        assert_eq!(first_unset(&["PATH"]), None);
        assert_eq!(
            first_unset(&["PATH", "TUNERELAY_SURELY_UNSET_VARIABLE"]),
            Some("TUNERELAY_SURELY_UNSET_VARIABLE")
        );
    }
}
