/// Authentication: password hashing, account CRUD, session lifecycle.
pub mod auth;
/// Runtime configuration loading.
pub mod config;
/// Common error types: storage, hashing, authentication.
pub mod error;
/// Logging initialization (tracing subscriber).
pub mod logging;
/// File-backed credential storage.
pub mod store;

// -----------------------------------------------------------------------------
//  Frequently used public types
// -----------------------------------------------------------------------------

/// Password hashing and verification, account manager, session types.
pub use auth::{
    hash_password, verify_password, AccountManager, AdminError, AdminPolicy, AuthError,
    Authenticator, PasswordError, SessionState,
};
/// config
pub use config::Settings;
/// Operation errors and result types.
pub use error::{StoreError, StoreResult};
/// Credential storage: file-backed map of username to password hash.
pub use store::{CredentialMap, CredentialStore, SaveMode, StoreSnapshot, STORE_VERSION};
