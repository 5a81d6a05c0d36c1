use reqwest::Client;
use serde_json::Value;

use crate::{
    config,
    error::ApiError,
    types::{TimeRange, UserProfile},
};

/// Retrieves the authenticated user's profile as raw JSON.
///
/// The relay forwards the body verbatim, so no shape is imposed here.
pub async fn get_profile(token: &str) -> Result<Value, ApiError> {
    let api_url = format!("{uri}/me", uri = &config::spotify_apiurl());

    let client = Client::new();
    let response = client
        .get(&api_url)
        .bearer_auth(token)
        .send()
        .await?
        .error_for_status()?;

    Ok(response.json::<Value>().await?)
}

/// Resolves the stable user id behind an access token.
///
/// Used once per login to key the credential record.
pub async fn get_current_user(token: &str) -> Result<UserProfile, ApiError> {
    let api_url = format!("{uri}/me", uri = &config::spotify_apiurl());

    let client = Client::new();
    let response = client
        .get(&api_url)
        .bearer_auth(token)
        .send()
        .await?
        .error_for_status()?;

    Ok(response.json::<UserProfile>().await?)
}

/// Retrieves the user's top tracks for the given time window.
pub async fn get_top_tracks(
    token: &str,
    time_range: TimeRange,
    limit: u8,
) -> Result<Value, ApiError> {
    get_top_items(token, "tracks", time_range, limit).await
}

/// Retrieves the user's top artists for the given time window.
pub async fn get_top_artists(
    token: &str,
    time_range: TimeRange,
    limit: u8,
) -> Result<Value, ApiError> {
    get_top_items(token, "artists", time_range, limit).await
}

async fn get_top_items(
    token: &str,
    kind: &str,
    time_range: TimeRange,
    limit: u8,
) -> Result<Value, ApiError> {
    let api_url = format!(
        "{uri}/me/top/{kind}?time_range={time_range}&limit={limit}",
        uri = &config::spotify_apiurl(),
    );

    let client = Client::new();
    let response = client
        .get(&api_url)
        .bearer_auth(token)
        .send()
        .await?
        .error_for_status()?;

    Ok(response.json::<Value>().await?)
}
