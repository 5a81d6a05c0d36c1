mod credentials;
mod state;
mod tokens;

pub use credentials::CredentialStore;
pub use credentials::StoreError;
pub use state::LoginStateRegistry;
pub use tokens::TokenRefresher;
