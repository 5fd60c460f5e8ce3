//! # Access Control
//!
//! Every lifecycle operation takes the [`Caller`] it acts for. An [`AuthGuard`] turns the
//! `Authorization` header of a request into a `Caller`; [`TokenTable`] is the in-memory guard
//! used by the binary and the tests.

use crate::model::UserId;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum AccessError {
    #[error("Not authorized")]
    Unauthorized,

    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// The token table lock was poisoned by a panicking writer.
    #[error("Token table unavailable")]
    TokenTableUnavailable,
}

impl AccessError {
    pub fn status(&self) -> u16 {
        match self {
            AccessError::Unauthorized => 401,
            AccessError::Forbidden(_) => 403,
            AccessError::TokenTableUnavailable => 500,
        }
    }
}

/// The authenticated principal behind a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Caller {
    Admin(UserId),
    Staff(UserId),
}

impl Caller {
    pub fn user_id(&self) -> UserId {
        match self {
            Caller::Admin(id) | Caller::Staff(id) => *id,
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Caller::Admin(_))
    }

    pub fn require_admin(&self) -> Result<UserId, AccessError> {
        match self {
            Caller::Admin(id) => Ok(*id),
            Caller::Staff(id) => Err(AccessError::Forbidden(format!("{id} is not an admin"))),
        }
    }
}

/// Extracts the token from a `Bearer <token>` header value.
pub fn bearer_token(header: &str) -> Result<&str, AccessError> {
    header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or(AccessError::Unauthorized)
}

#[async_trait]
pub trait AuthGuard: Send + Sync {
    /// Resolves an `Authorization` header value to a caller.
    async fn authenticate(&self, header: &str) -> Result<Caller, AccessError>;
}

/// Issued tokens, held in memory.
#[derive(Debug, Default)]
pub struct TokenTable {
    tokens: RwLock<HashMap<String, Caller>>,
}

impl TokenTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issue(&self, token: impl Into<String>, caller: Caller) -> Result<(), AccessError> {
        let mut tokens = self
            .tokens
            .write()
            .map_err(|_| AccessError::TokenTableUnavailable)?;
        tokens.insert(token.into(), caller);
        Ok(())
    }

    /// Returns whether the token was known.
    pub fn revoke(&self, token: &str) -> Result<bool, AccessError> {
        let mut tokens = self
            .tokens
            .write()
            .map_err(|_| AccessError::TokenTableUnavailable)?;
        Ok(tokens.remove(token).is_some())
    }
}

#[async_trait]
impl AuthGuard for TokenTable {
    async fn authenticate(&self, header: &str) -> Result<Caller, AccessError> {
        let token = bearer_token(header)?;
        let tokens = self.tokens.read().map_err(|_| AccessError::Unauthorized)?;
        tokens.get(token).copied().ok_or(AccessError::Unauthorized)
    }
}
