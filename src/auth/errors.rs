use thiserror::Error;

use crate::error::StoreError;

#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("Password hashing failed")]
    Hash,
}

#[derive(Debug, Error)]
pub enum AdminError {
    #[error("User already exists")]
    DuplicateUser,
    #[error("User not found")]
    UserNotFound,
    #[error("Current password is incorrect")]
    InvalidCredential,
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Permission denied")]
    PermissionDenied,
    #[error("Password error: {0}")]
    Password(#[from] PasswordError),
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

#[derive(Debug, Error)]
pub enum AuthError {
    /// Неизвестный пользователь и неверный пароль намеренно не
    /// различаются для вызывающего.
    #[error("Authentication failed")]
    AuthenticationFailed,
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}
