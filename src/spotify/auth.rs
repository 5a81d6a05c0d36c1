use reqwest::{Client, Url};

use crate::{
    config,
    error::ApiError,
    types::{AppTokenResponse, TokenResponse},
};

/// Builds the accounts-service authorize URL for the authorization-code flow.
///
/// Carries `response_type=code`, the configured client id, scope and
/// redirect URI, the caller-supplied CSRF `state`, and `show_dialog=true`
/// so switching Spotify accounts stays possible from the dashboard.
pub fn authorize_url(state: &str) -> Result<String, ApiError> {
    let url = Url::parse_with_params(
        &config::spotify_apiauth_url(),
        &[
            ("response_type", "code"),
            ("client_id", &config::spotify_client_id()),
            ("scope", &config::spotify_scope()),
            ("redirect_uri", &config::spotify_redirect_uri()),
            ("state", state),
            ("show_dialog", "true"),
        ],
    )
    .map_err(|e| ApiError::AuthExchangeFailed(e.to_string()))?;

    Ok(url.into())
}

/// Exchanges an authorization code for a token set.
///
/// Final step of the authorization-code flow: POSTs
/// `grant_type=authorization_code` with the code, redirect URI and client
/// credentials. The code is single-use and short-lived, so the exchange
/// happens directly in the callback handler.
pub async fn exchange_code(code: &str) -> Result<TokenResponse, ApiError> {
    let client = Client::new();
    let res = client
        .post(&config::spotify_apitoken_url())
        .form(&[
            ("grant_type", "authorization_code"),
            ("code", code),
            ("redirect_uri", &config::spotify_redirect_uri()),
            ("client_id", &config::spotify_client_id()),
            ("client_secret", &config::spotify_client_secret()),
        ])
        .send()
        .await
        .map_err(|e| ApiError::AuthExchangeFailed(e.to_string()))?
        .error_for_status()
        .map_err(|e| ApiError::AuthExchangeFailed(e.to_string()))?;

    res.json::<TokenResponse>()
        .await
        .map_err(|e| ApiError::AuthExchangeFailed(e.to_string()))
}

/// Fetches an app-only access token via the client-credentials grant.
///
/// Authenticates with HTTP Basic auth (client id and secret). The returned
/// token is never persisted; the fixed artist lookups re-fetch one per call,
/// which is acceptable for their low, non-user-scoped traffic.
pub async fn client_credentials_token() -> Result<String, ApiError> {
    let client = Client::new();
    let res = client
        .post(&config::spotify_apitoken_url())
        .basic_auth(
            config::spotify_client_id(),
            Some(config::spotify_client_secret()),
        )
        .form(&[("grant_type", "client_credentials")])
        .send()
        .await
        .map_err(|e| ApiError::AuthExchangeFailed(e.to_string()))?
        .error_for_status()
        .map_err(|e| ApiError::AuthExchangeFailed(e.to_string()))?;

    let token: AppTokenResponse = res
        .json()
        .await
        .map_err(|e| ApiError::AuthExchangeFailed(e.to_string()))?;

    Ok(token.access_token)
}
