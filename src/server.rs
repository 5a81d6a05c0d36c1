use axum::{
    Extension, Router,
    extract::{MatchedPath, Request},
    middleware::{self, Next},
    response::Response,
    routing::{get, post},
};
use std::{net::SocketAddr, str::FromStr, sync::Arc};

use crate::{
    api, error,
    error::ErrorCause,
    info,
    management::{CredentialStore, LoginStateRegistry, TokenRefresher},
    warning,
};

/// Shared handler state. Cheap to clone; all fields are reference-counted
/// except the frontend URL, which is read once at startup.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<CredentialStore>,
    pub refresher: Arc<TokenRefresher>,
    pub login_states: Arc<LoginStateRegistry>,
    pub frontend_url: String,
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api", get(api::welcome))
        .route("/api/login", get(api::login))
        .route("/api/callback", get(api::callback))
        .route("/api/me", get(api::profile))
        .route("/api/me/top/tracks", get(api::top_tracks))
        .route("/api/me/top/artists", get(api::top_artists))
        .route("/api/artists", get(api::featured_artist))
        .route("/api/artists/tracks", get(api::featured_artist_tracks))
        .route("/api/artists/related", get(api::related_artists))
        .route("/api/logout", post(api::logout))
        .layer(middleware::from_fn(log_failures))
        .layer(Extension(state))
}

/// Logs every failed request with the endpoint that produced it.
///
/// Handlers stash the failure detail in an [`ErrorCause`] response
/// extension; pairing it with the matched route here keeps the log line
/// diagnosable without leaking anything into the response body.
async fn log_failures(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let endpoint = req
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| req.uri().path().to_string());

    let response = next.run(req).await;

    if let Some(ErrorCause(cause)) = response.extensions().get::<ErrorCause>() {
        warning!("{} {} failed: {}", method, endpoint, cause);
    }

    response
}

pub async fn start_api_server(state: AppState, address: &str) {
    let app = build_router(state);

    let addr = match SocketAddr::from_str(address) {
        Ok(addr) => addr,
        Err(e) => error!("Failed to parse server address: {}", e),
    };

    let listener = tokio::net::TcpListener::bind(&addr).await.unwrap();
    info!("Relay listening on {}", addr);
    axum::serve(listener, app).await.unwrap();
}
