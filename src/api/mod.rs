//! # API Module
//!
//! HTTP endpoints served to the companion dashboard. The module covers three
//! groups of routes:
//!
//! - **Authorization**: [`login`] redirects the browser to the Spotify
//!   authorize endpoint with a fresh CSRF state; [`callback`] verifies the
//!   state, completes the code exchange, stores the credential record and
//!   redirects back to the dashboard; [`logout`] deletes the record.
//! - **User-scoped proxies**: [`profile`], [`top_tracks`] and
//!   [`top_artists`] obtain a valid token through the token refresher and
//!   relay one upstream read each.
//! - **App-scoped proxies**: [`featured_artist`],
//!   [`featured_artist_tracks`] and [`related_artists`] use a per-call
//!   client-credentials token for fixed catalog lookups.
//!
//! Every handler validates its input, issues at most one upstream request
//! and returns either the upstream JSON verbatim or a generic error body
//! (see [`crate::error::ApiError`]). [`welcome`] is the liveness route.

mod artists;
mod auth;
mod health;
mod me;

pub use artists::featured_artist;
pub use artists::featured_artist_tracks;
pub use artists::related_artists;
pub use auth::callback;
pub use auth::login;
pub use auth::logout;
pub use health::welcome;
pub use me::profile;
pub use me::top_artists;
pub use me::top_tracks;
