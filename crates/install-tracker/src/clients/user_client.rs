//! # User Client
//!
//! Typed API over the `User` store. Membership links are crate-private: only the
//! [`MembershipIndex`](crate::membership::MembershipIndex) writes them.
use crate::model::{
    OrderId, OrderRef, User, UserAction, UserActionResult, UserCreate, UserId, UserUpdate,
};
use crate::user_actor::UserError;
use async_trait::async_trait;
use store_actor::{RecordClient, StoreClient, StoreError};
use tracing::{debug, instrument};

/// Client for interacting with the User store.
#[derive(Clone)]
pub struct UserClient {
    inner: StoreClient<User>,
}

impl UserClient {
    pub fn new(inner: StoreClient<User>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self, params), fields(email = %params.email))]
    pub async fn create_user(&self, params: UserCreate) -> Result<UserId, UserError> {
        debug!("Sending request");
        Ok(self.inner.create(params).await?)
    }

    #[instrument(skip(self))]
    pub async fn update_user(&self, id: UserId, update: UserUpdate) -> Result<User, UserError> {
        debug!("Sending request");
        Ok(self.inner.update(id, update).await?)
    }

    /// Consumes the activation token of `id`.
    #[instrument(skip(self, token))]
    pub async fn activate(&self, id: UserId, token: String) -> Result<(), UserError> {
        match self
            .inner
            .perform_action(id, UserAction::Activate { token })
            .await?
        {
            UserActionResult::Activated => Ok(()),
            other => Err(unexpected(other)),
        }
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError> {
        let users = self.list().await?;
        Ok(users
            .into_iter()
            .find(|u| u.email.eq_ignore_ascii_case(email.trim())))
    }

    pub async fn find_by_token(&self, token: &str) -> Result<Option<User>, UserError> {
        let users = self.list().await?;
        Ok(users
            .into_iter()
            .find(|u| !u.is_active && u.activation_token.as_deref() == Some(token)))
    }

    /// Adds `order_id` to the user's references. Returns `false` if it was already there.
    #[instrument(skip(self))]
    pub(crate) async fn link_order(
        &self,
        user_id: UserId,
        order_id: OrderId,
    ) -> Result<bool, UserError> {
        let action = UserAction::LinkOrder(OrderRef::new(order_id));
        match self.inner.perform_action(user_id, action).await? {
            UserActionResult::Linked { added } => Ok(added),
            other => Err(unexpected(other)),
        }
    }

    /// Drops `order_id` from the user's references. Returns `false` if it wasn't there.
    #[instrument(skip(self))]
    pub(crate) async fn unlink_order(
        &self,
        user_id: UserId,
        order_id: OrderId,
    ) -> Result<bool, UserError> {
        let action = UserAction::UnlinkOrder(OrderRef::new(order_id));
        match self.inner.perform_action(user_id, action).await? {
            UserActionResult::Unlinked { removed } => Ok(removed),
            other => Err(unexpected(other)),
        }
    }
}

fn unexpected(result: UserActionResult) -> UserError {
    UserError::ActorCommunicationError(format!("unexpected action result: {result:?}"))
}

#[async_trait]
impl RecordClient<User> for UserClient {
    type Error = UserError;

    fn inner(&self) -> &StoreClient<User> {
        &self.inner
    }

    fn map_error(e: StoreError) -> Self::Error {
        UserError::from(e)
    }
}
