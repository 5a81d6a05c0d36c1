use axum::{Extension, extract::Query, response::Json};
use serde_json::Value;

use crate::{
    error::ApiError,
    server::AppState,
    spotify,
    types::{TimeRange, UserQuery},
};

/// Item cap the dashboard renders for the top-tracks and top-artists tiles.
const TOP_ITEMS_LIMIT: u8 = 5;

/// Relays the user's profile from the Web API.
pub async fn profile(
    Query(params): Query<UserQuery>,
    Extension(state): Extension<AppState>,
) -> Result<Json<Value>, ApiError> {
    let user_id = params.user_id.ok_or(ApiError::MissingParameter("userId"))?;
    let token = state.refresher.ensure_valid(&user_id).await?;

    let body = spotify::users::get_profile(&token).await?;
    Ok(Json(body))
}

/// Relays the user's top tracks, capped at five items.
pub async fn top_tracks(
    Query(params): Query<UserQuery>,
    Extension(state): Extension<AppState>,
) -> Result<Json<Value>, ApiError> {
    let user_id = params.user_id.ok_or(ApiError::MissingParameter("userId"))?;
    let time_range = parse_time_range(params.time_range)?;
    let token = state.refresher.ensure_valid(&user_id).await?;

    let body = spotify::users::get_top_tracks(&token, time_range, TOP_ITEMS_LIMIT).await?;
    Ok(Json(body))
}

/// Relays the user's top artists, capped at five items.
pub async fn top_artists(
    Query(params): Query<UserQuery>,
    Extension(state): Extension<AppState>,
) -> Result<Json<Value>, ApiError> {
    let user_id = params.user_id.ok_or(ApiError::MissingParameter("userId"))?;
    let time_range = parse_time_range(params.time_range)?;
    let token = state.refresher.ensure_valid(&user_id).await?;

    let body = spotify::users::get_top_artists(&token, time_range, TOP_ITEMS_LIMIT).await?;
    Ok(Json(body))
}

fn parse_time_range(raw: Option<String>) -> Result<TimeRange, ApiError> {
    match raw {
        Some(s) => s
            .parse()
            .map_err(|_| ApiError::InvalidParameter("time_range")),
        None => Ok(TimeRange::default()),
    }
}
