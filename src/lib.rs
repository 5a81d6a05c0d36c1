//! Spotify Web API Relay Backend
//!
//! This library implements a thin backend relay for the Spotify Web API. It
//! drives the OAuth 2.0 authorization-code and client-credentials flows,
//! persists per-user tokens, refreshes them lazily on use, and re-exposes a
//! set of read-only endpoints to a companion single-page dashboard.
//!
//! # Modules
//!
//! - `api` - HTTP handlers served to the frontend
//! - `config` - Configuration management and environment variables
//! - `error` - Error kinds and their HTTP mapping
//! - `management` - Credential storage, token refresh, login-state tracking
//! - `server` - HTTP server setup and routing
//! - `spotify` - Spotify Web API and accounts-service client functions
//! - `types` - Data structures and type definitions
//! - `utils` - Utility functions and helpers
//!
//! # Example
//!
//! ```
//! use tunerelay::{config, management::CredentialStore, server};
//!
//! #[tokio::main]
//! async fn main() -> tunerelay::Res<()> {
//!     config::load_env().await?;
//!     let store = CredentialStore::open(config::credentials_path()).await?;
//!     // Build state and start the server...
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod management;
pub mod server;
pub mod spotify;
pub mod types;
pub mod utils;

/// A convenient Result type alias for operations that may fail.
///
/// Provides a standard error handling pattern throughout the application
/// using a boxed dynamic error trait object. This allows for flexible
/// error handling while maintaining Send + Sync bounds for async contexts.
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Prints an informational message with a blue bullet point.
///
/// Creates a formatted output line with a distinctive blue "o" indicator
/// followed by the provided message. Used for general information and
/// status updates throughout the application.
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
///
/// Creates a formatted output line with a green "✓" indicator to signify
/// successful completion of operations.
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Creates a formatted error output with a red "!" indicator and immediately
/// terminates the program with exit code 1. Reserved for unrecoverable
/// startup failures; request handlers report failures through
/// `error::ApiError` instead.
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// Creates a formatted output line with a yellow "!" indicator to highlight
/// potential issues or important notices that don't require program
/// termination. Request handlers use this to log failure causes that are
/// never leaked to the caller.
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
