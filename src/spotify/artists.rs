use reqwest::Client;
use serde_json::Value;

use crate::{config, error::ApiError};

/// Retrieves a single artist by id.
pub async fn get_artist(token: &str, artist_id: &str) -> Result<Value, ApiError> {
    let api_url = format!(
        "{uri}/artists/{artist_id}",
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

/// Retrieves an artist's top tracks for the given market.
pub async fn get_artist_top_tracks(
    token: &str,
    artist_id: &str,
    market: &str,
) -> Result<Value, ApiError> {
    let api_url = format!(
        "{uri}/artists/{artist_id}/top-tracks?market={market}",
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

/// Retrieves several artists in one batched lookup.
pub async fn get_several_artists(token: &str, artist_ids: &[&str]) -> Result<Value, ApiError> {
    let api_url = format!(
        "{uri}/artists?ids={ids}",
        uri = &config::spotify_apiurl(),
        ids = artist_ids.join(","),
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
