use crate::model::OrderId;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Type-safe identifier for users.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub u32);

impl From<u32> for UserId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "user_{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum UserType {
    Admin,
    Deliverer,
    Installer,
    Other,
}

/// An account: an administrator or a crew member.
///
/// # Store
/// Kept by a [`StoreActor`](store_actor::StoreActor) (see [`user_actor`](crate::user_actor)),
/// keyed uniquely by email.
///
/// `order_refs` lists the orders the user is assigned to. It is only written through
/// [`UserAction::LinkOrder`] / [`UserAction::UnlinkOrder`], whose payload can't be built
/// outside this crate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub email: String,
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    pub full_name: String,
    pub user_type: UserType,
    pub is_active: bool,
    #[serde(skip_serializing, default)]
    pub activation_token: Option<String>,
    pub order_refs: Vec<OrderId>,
}

impl User {
    /// An inactive user with no password and no assignments.
    pub fn new(
        id: UserId,
        email: impl Into<String>,
        full_name: impl Into<String>,
        user_type: UserType,
    ) -> Self {
        Self {
            id,
            email: email.into(),
            password_hash: String::new(),
            full_name: full_name.into(),
            user_type,
            is_active: false,
            activation_token: None,
            order_refs: Vec::new(),
        }
    }

    pub fn is_admin(&self) -> bool {
        self.user_type == UserType::Admin
    }

    pub fn has_order(&self, order_id: OrderId) -> bool {
        self.order_refs.contains(&order_id)
    }
}

/// Payload for creating a new user.
#[derive(Debug, Clone)]
pub struct UserCreate {
    pub email: String,
    pub password_hash: String,
    pub full_name: String,
    pub user_type: UserType,
    pub is_active: bool,
    pub activation_token: Option<String>,
}

/// Profile fields. Membership is not part of it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserUpdate {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub user_type: Option<UserType>,
}

/// A membership link, constructible only inside this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderRef(OrderId);

impl OrderRef {
    pub(crate) fn new(order_id: OrderId) -> Self {
        Self(order_id)
    }

    pub fn order_id(self) -> OrderId {
        self.0
    }
}

/// Custom actions for the User store.
#[derive(Debug, Clone)]
pub enum UserAction {
    /// Activates the account if `token` matches the one issued at invitation.
    Activate { token: String },
    LinkOrder(OrderRef),
    UnlinkOrder(OrderRef),
}

/// Results of [`UserAction`]s, one variant per action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserActionResult {
    Activated,
    Linked { added: bool },
    Unlinked { removed: bool },
}
