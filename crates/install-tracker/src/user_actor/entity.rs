//! [`Record`] implementation for [`User`].

use crate::model::{User, UserAction, UserActionResult, UserCreate, UserId, UserUpdate};
use crate::user_actor::UserError;
use async_trait::async_trait;
use store_actor::Record;

fn check_email(email: &str) -> Result<(), UserError> {
    if email.trim().is_empty() || !email.contains('@') {
        return Err(UserError::ValidationError(format!("invalid email: {email:?}")));
    }
    Ok(())
}

#[async_trait]
impl Record for User {
    type Id = UserId;
    type Create = UserCreate;
    type Update = UserUpdate;
    type Action = UserAction;
    type ActionResult = UserActionResult;
    type Context = ();
    type Error = UserError;

    fn from_create_params(id: UserId, params: UserCreate) -> Result<Self, UserError> {
        check_email(&params.email)?;
        if params.full_name.trim().is_empty() {
            return Err(UserError::ValidationError("full name is required".into()));
        }
        Ok(Self {
            id,
            email: params.email.trim().to_string(),
            password_hash: params.password_hash,
            full_name: params.full_name,
            user_type: params.user_type,
            is_active: params.is_active,
            activation_token: params.activation_token,
            order_refs: Vec::new(),
        })
    }

    /// Emails compare case-insensitively.
    fn unique_key(&self) -> Option<String> {
        Some(self.email.to_lowercase())
    }

    async fn on_update(&mut self, update: UserUpdate, _ctx: &()) -> Result<(), UserError> {
        if let Some(email) = update.email {
            check_email(&email)?;
            self.email = email.trim().to_string();
        }
        if let Some(full_name) = update.full_name {
            self.full_name = full_name;
        }
        if let Some(user_type) = update.user_type {
            self.user_type = user_type;
        }
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: UserAction,
        _ctx: &(),
    ) -> Result<UserActionResult, UserError> {
        match action {
            UserAction::Activate { token } => {
                if self.activation_token.as_deref() != Some(token.as_str()) {
                    return Err(UserError::InvalidToken);
                }
                self.is_active = true;
                self.activation_token = None;
                Ok(UserActionResult::Activated)
            }
            UserAction::LinkOrder(order) => {
                let added = !self.has_order(order.order_id());
                if added {
                    self.order_refs.push(order.order_id());
                }
                Ok(UserActionResult::Linked { added })
            }
            UserAction::UnlinkOrder(order) => {
                let before = self.order_refs.len();
                self.order_refs.retain(|id| *id != order.order_id());
                Ok(UserActionResult::Unlinked {
                    removed: self.order_refs.len() != before,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{OrderId, OrderRef, UserType};

    fn invited() -> User {
        let mut user = User::new(UserId(1), "crew@x.io", "Crew One", UserType::Installer);
        user.activation_token = Some("tok".into());
        user
    }

    #[tokio::test]
    async fn linking_twice_keeps_one_reference() {
        let mut user = invited();
        let link = UserAction::LinkOrder(OrderRef::new(OrderId(4)));

        assert_eq!(
            user.handle_action(link.clone(), &()).await.unwrap(),
            UserActionResult::Linked { added: true }
        );
        assert_eq!(
            user.handle_action(link, &()).await.unwrap(),
            UserActionResult::Linked { added: false }
        );
        assert_eq!(user.order_refs, vec![OrderId(4)]);
    }

    #[tokio::test]
    async fn unlinking_absent_order_is_a_no_op() {
        let mut user = invited();
        let result = user
            .handle_action(UserAction::UnlinkOrder(OrderRef::new(OrderId(4))), &())
            .await
            .unwrap();
        assert_eq!(result, UserActionResult::Unlinked { removed: false });
    }

    #[tokio::test]
    async fn activation_consumes_the_token() {
        let mut user = invited();
        let wrong = UserAction::Activate { token: "nope".into() };
        assert_eq!(user.handle_action(wrong, &()).await, Err(UserError::InvalidToken));

        let right = UserAction::Activate { token: "tok".into() };
        user.handle_action(right.clone(), &()).await.unwrap();
        assert!(user.is_active);
        assert_eq!(user.handle_action(right, &()).await, Err(UserError::InvalidToken));
    }

    #[test]
    fn create_requires_email_and_name() {
        let params = UserCreate {
            email: "not-an-email".into(),
            password_hash: String::new(),
            full_name: "X".into(),
            user_type: UserType::Other,
            is_active: true,
            activation_token: None,
        };
        assert!(matches!(
            User::from_create_params(UserId(1), params),
            Err(UserError::ValidationError(_))
        ));
    }
}
