use axum::{
    Extension,
    extract::Query,
    response::{Json, Redirect},
};
use serde_json::{Value, json};

use crate::{
    error::ApiError,
    info,
    server::AppState,
    spotify, success,
    types::{CallbackQuery, TokenRecord, UserQuery},
    utils, warning,
};

/// Starts the authorization-code flow.
///
/// Issues a pending state token and redirects the browser to the Spotify
/// authorize endpoint.
pub async fn login(Extension(state): Extension<AppState>) -> Result<Redirect, ApiError> {
    let state_token = state.login_states.issue().await;
    let auth_url = spotify::auth::authorize_url(&state_token)?;

    info!("Redirecting login to the authorize endpoint");
    Ok(Redirect::temporary(&auth_url))
}

/// Completes the authorization-code flow.
///
/// Verifies and consumes the CSRF state, exchanges the code for tokens,
/// resolves the user id behind them, upserts the credential record and
/// redirects to the dashboard. Every failure collapses into
/// `AuthExchangeFailed`; upstream error bodies are logged, never relayed.
pub async fn callback(
    Query(params): Query<CallbackQuery>,
    Extension(state): Extension<AppState>,
) -> Result<Redirect, ApiError> {
    if let Some(err) = params.error {
        return Err(ApiError::AuthExchangeFailed(format!(
            "authorize endpoint returned error '{err}'"
        )));
    }

    let code = params
        .code
        .ok_or_else(|| ApiError::AuthExchangeFailed("callback missing code".to_string()))?;
    let state_token = params
        .state
        .ok_or_else(|| ApiError::AuthExchangeFailed("callback missing state".to_string()))?;

    if !state.login_states.consume(&state_token).await {
        warning!("Callback carried an unknown or expired state token");
        return Err(ApiError::AuthExchangeFailed(
            "unknown or expired state".to_string(),
        ));
    }

    let token = spotify::auth::exchange_code(&code).await?;
    let user = spotify::users::get_current_user(&token.access_token)
        .await
        .map_err(|e| ApiError::AuthExchangeFailed(e.to_string()))?;

    let record = TokenRecord {
        user_id: user.id.clone(),
        access_token: token.access_token,
        refresh_token: token.refresh_token.ok_or_else(|| {
            ApiError::AuthExchangeFailed("token response missing refresh_token".to_string())
        })?,
        expires_at: utils::now_millis() + token.expires_in * 1000,
    };
    state
        .store
        .upsert(record)
        .await
        .map_err(|e| ApiError::AuthExchangeFailed(e.to_string()))?;

    success!(
        "Authorized user {} ({})",
        user.id,
        user.display_name.as_deref().unwrap_or("no display name")
    );

    let dashboard = format!(
        "{frontend}/dashboard?userId={user_id}",
        frontend = state.frontend_url,
        user_id = user.id,
    );
    Ok(Redirect::temporary(&dashboard))
}

/// Deletes the caller's credential record.
///
/// Idempotent: logging out a user without a record still confirms with 200.
pub async fn logout(
    Query(params): Query<UserQuery>,
    Extension(state): Extension<AppState>,
) -> Result<Json<Value>, ApiError> {
    let user_id = params.user_id.ok_or(ApiError::MissingParameter("userId"))?;

    let existed = state
        .store
        .delete(&user_id)
        .await
        .map_err(|e| ApiError::Store(e.to_string()))?;
    if existed {
        info!("Deleted credentials for user {}", user_id);
    }

    Ok(Json(json!({ "message": "Logged out successfully" })))
}
