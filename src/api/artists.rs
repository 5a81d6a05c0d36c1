use axum::response::Json;
use serde_json::Value;

use crate::{error::ApiError, spotify};

/// Artist rendered on the landing page; fixed by the frontend design.
const FEATURED_ARTIST_ID: &str = "2kCcBybjl3SAtIcwdWpUe3";

/// Companion artists shown next to the featured one.
const RELATED_ARTIST_IDS: [&str; 5] = [
    "5g63iWaMJ2UrkZMkCC8dMi",
    "1VKWlHqcqwmU9CGKkJR09R",
    "0LBfcXnrLErD1afLyzB2xA",
    "1fsCfvdiomqjKJFR6xI8e4",
    "1VPmR4DJC1PlOtd0IADAO0",
];

/// Relays the featured artist's metadata using an app-only token.
pub async fn featured_artist() -> Result<Json<Value>, ApiError> {
    let token = spotify::auth::client_credentials_token().await?;
    let body = spotify::artists::get_artist(&token, FEATURED_ARTIST_ID).await?;
    Ok(Json(body))
}

/// Relays the featured artist's top tracks for the US market.
pub async fn featured_artist_tracks() -> Result<Json<Value>, ApiError> {
    let token = spotify::auth::client_credentials_token().await?;
    let body = spotify::artists::get_artist_top_tracks(&token, FEATURED_ARTIST_ID, "US").await?;
    Ok(Json(body))
}

/// Relays the fixed related-artists batch lookup.
pub async fn related_artists() -> Result<Json<Value>, ApiError> {
    let token = spotify::auth::client_credentials_token().await?;
    let body = spotify::artists::get_several_artists(&token, &RELATED_ARTIST_IDS).await?;
    Ok(Json(body))
}
