//! Error types for the Order store and the order lifecycle.

use crate::access::AccessError;
use crate::files::FileStoreError;
use crate::model::InvalidWorkStatus;
use crate::user_actor::UserError;
use store_actor::StoreError;
use thiserror::Error;

/// Errors that can occur during order operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderError {
    /// The requested order was not found.
    #[error("Order not found: {0}")]
    NotFound(String),

    /// An assignment references a user that does not exist.
    #[error("Unknown user: {0}")]
    UnknownUser(String),

    /// Another order already has this order number.
    #[error("Order already exists: {0}")]
    AlreadyExists(String),

    /// The order data provided is invalid.
    #[error("Order validation error: {0}")]
    ValidationError(String),

    #[error(transparent)]
    Access(#[from] AccessError),

    /// The file store refused an upload, delete or listing.
    #[error(transparent)]
    FileStore(#[from] FileStoreError),

    /// An error occurred while communicating with a store.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl OrderError {
    /// HTTP-style status for the error.
    pub fn status(&self) -> u16 {
        match self {
            OrderError::NotFound(_) | OrderError::UnknownUser(_) => 404,
            OrderError::AlreadyExists(_) | OrderError::ValidationError(_) => 400,
            OrderError::Access(e) => e.status(),
            OrderError::FileStore(_) => 502,
            OrderError::ActorCommunicationError(_) => 500,
        }
    }
}

impl From<StoreError> for OrderError {
    fn from(e: StoreError) -> Self {
        if let Some(inner) = e.entity_error::<OrderError>() {
            return inner.clone();
        }
        match e {
            StoreError::NotFound(id) => OrderError::NotFound(id),
            StoreError::Conflict(number) => OrderError::AlreadyExists(number),
            other => OrderError::ActorCommunicationError(other.to_string()),
        }
    }
}

/// User-store failures seen while keeping membership in step.
impl From<UserError> for OrderError {
    fn from(e: UserError) -> Self {
        match e {
            UserError::NotFound(id) => OrderError::UnknownUser(id),
            UserError::Access(access) => OrderError::Access(access),
            UserError::ActorCommunicationError(msg) => OrderError::ActorCommunicationError(msg),
            UserError::ValidationError(msg) => OrderError::ValidationError(msg),
            UserError::AlreadyExists(email) => {
                OrderError::ValidationError(format!("user {email} already exists"))
            }
            UserError::InvalidToken => {
                OrderError::ValidationError("user activation token is invalid".into())
            }
        }
    }
}

impl From<InvalidWorkStatus> for OrderError {
    fn from(e: InvalidWorkStatus) -> Self {
        OrderError::ValidationError(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses_follow_error_kind() {
        assert_eq!(OrderError::NotFound("order_1".into()).status(), 404);
        assert_eq!(OrderError::UnknownUser("user_1".into()).status(), 404);
        assert_eq!(OrderError::AlreadyExists("100".into()).status(), 400);
        assert_eq!(OrderError::from(InvalidWorkStatus(7)).status(), 400);
        assert_eq!(OrderError::Access(AccessError::Unauthorized).status(), 401);
        assert_eq!(
            OrderError::Access(AccessError::Forbidden("staff".into())).status(),
            403
        );
        let upload = FileStoreError::Upload {
            order_number: "100".into(),
            reason: "down".into(),
        };
        assert_eq!(OrderError::from(upload).status(), 502);
        assert_eq!(OrderError::from(StoreError::ActorDropped).status(), 500);
    }

    #[test]
    fn missing_user_becomes_unknown_user() {
        assert_eq!(
            OrderError::from(UserError::NotFound("user_4".into())),
            OrderError::UnknownUser("user_4".into())
        );
        assert_eq!(
            OrderError::from(StoreError::Conflict("100".into())),
            OrderError::AlreadyExists("100".into())
        );
    }

    #[test]
    fn user_errors_keep_their_meaning() {
        assert_eq!(
            OrderError::from(UserError::AlreadyExists("a@x.io".into())),
            OrderError::ValidationError("user a@x.io already exists".into())
        );
        assert_eq!(OrderError::from(UserError::InvalidToken).status(), 400);
        assert_eq!(
            OrderError::from(UserError::ValidationError("bad email".into())),
            OrderError::ValidationError("bad email".into())
        );
        assert_eq!(
            OrderError::from(UserError::Access(AccessError::Unauthorized)).status(),
            401
        );
    }
}
