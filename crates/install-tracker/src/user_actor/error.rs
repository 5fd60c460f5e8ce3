//! Error types for the User store.

use crate::access::AccessError;
use store_actor::StoreError;
use thiserror::Error;

/// Errors that can occur during user and account operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum UserError {
    /// The requested user was not found.
    #[error("User not found: {0}")]
    NotFound(String),

    /// Another user already holds this email.
    #[error("User already exists: {0}")]
    AlreadyExists(String),

    /// The user data provided is invalid.
    #[error("User validation error: {0}")]
    ValidationError(String),

    /// The activation token is unknown or already used.
    #[error("Invalid activation token")]
    InvalidToken,

    #[error(transparent)]
    Access(#[from] AccessError),

    /// An error occurred while communicating with the store.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl UserError {
    /// HTTP-style status for the error.
    pub fn status(&self) -> u16 {
        match self {
            UserError::NotFound(_) => 404,
            UserError::AlreadyExists(_)
            | UserError::ValidationError(_)
            | UserError::InvalidToken => 400,
            UserError::Access(e) => e.status(),
            UserError::ActorCommunicationError(_) => 500,
        }
    }
}

impl From<StoreError> for UserError {
    fn from(e: StoreError) -> Self {
        if let Some(inner) = e.entity_error::<UserError>() {
            return inner.clone();
        }
        match e {
            StoreError::NotFound(id) => UserError::NotFound(id),
            StoreError::Conflict(email) => UserError::AlreadyExists(email),
            other => UserError::ActorCommunicationError(other.to_string()),
        }
    }
}
