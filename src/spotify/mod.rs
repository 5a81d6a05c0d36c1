//! # Spotify Integration Module
//!
//! This module is the relay's client for Spotify's two upstream services:
//! the accounts service (OAuth token grants) and the Web API (profile and
//! catalog data). Everything the HTTP handlers send upstream goes through
//! the functions defined here.
//!
//! ## Submodules
//!
//! - [`auth`] - Accounts-service grants: the authorization-code exchange,
//!   the client-credentials grant and the authorize-URL builder. Token
//!   *refresh* lives with the credential records in
//!   [`crate::management::TokenRefresher`], since it reads and rewrites
//!   stored state.
//! - [`users`] - User-scoped Web API reads: the profile and the top
//!   tracks/artists listings.
//! - [`artists`] - App-scoped artist lookups used by the fixed dashboard
//!   tiles.
//!
//! ## Request shape
//!
//! Every function issues exactly one upstream request and returns the
//! response body as untyped [`serde_json::Value`] where the relay only
//! forwards it. There are no retries: a call either fully succeeds or the
//! caller's handler fails as a whole. Non-success upstream statuses are
//! surfaced through `error_for_status` so they travel the same error path
//! as transport failures.
//!
//! ## Error mapping
//!
//! Accounts-service failures during login become
//! [`crate::error::ApiError::AuthExchangeFailed`]; Web API failures become
//! [`crate::error::ApiError::UpstreamRequestFailed`]. In both cases the
//! detail string is logged at the handler boundary and a generic body is
//! returned to the frontend.

pub mod artists;
pub mod auth;
pub mod users;
