//! # Account Client
//!
//! Admin-side account management: admins, crew invitations, activation. Credentials arrive
//! already hashed; token issuance for logins is the [`AuthGuard`](crate::access::AuthGuard)'s
//! business.
use crate::access::{AccessError, Caller};
use crate::clients::UserClient;
use crate::model::{User, UserCreate, UserId, UserType};
use crate::user_actor::UserError;
use serde::Deserialize;
use store_actor::RecordClient;
use tracing::{info, instrument};
use uuid::Uuid;

/// Sign-up data for an admin or an invited crew member.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    pub full_name: String,
    pub email: String,
    pub password_hash: String,
}

impl Registration {
    fn check_complete(&self) -> Result<(), UserError> {
        let missing = [&self.full_name, &self.email, &self.password_hash]
            .iter()
            .any(|field| field.trim().is_empty());
        if missing {
            return Err(UserError::ValidationError("Please include all fields".into()));
        }
        Ok(())
    }
}

/// An invited user and the token that activates it.
#[derive(Debug, Clone, PartialEq)]
pub struct Invitation {
    pub user_id: UserId,
    pub token: String,
}

#[derive(Clone)]
pub struct AccountClient {
    users: UserClient,
}

impl AccountClient {
    pub fn new(users: UserClient) -> Self {
        Self { users }
    }

    async fn create_checked(
        &self,
        registration: Registration,
        user_type: UserType,
        token: Option<String>,
    ) -> Result<UserId, UserError> {
        registration.check_complete()?;
        if self.users.find_by_email(&registration.email).await?.is_some() {
            return Err(UserError::AlreadyExists(registration.email));
        }
        self.users
            .create_user(UserCreate {
                email: registration.email,
                password_hash: registration.password_hash,
                full_name: registration.full_name,
                user_type,
                is_active: token.is_none(),
                activation_token: token,
            })
            .await
    }

    /// Creates the first admin of an empty system. Refused once any admin exists.
    #[instrument(skip(self, registration), fields(email = %registration.email))]
    pub async fn bootstrap_admin(&self, registration: Registration) -> Result<UserId, UserError> {
        if self.users.list().await?.iter().any(User::is_admin) {
            return Err(AccessError::Forbidden("an admin already exists".into()).into());
        }
        let id = self.create_checked(registration, UserType::Admin, None).await?;
        info!(user_id = %id, "Bootstrap admin created");
        Ok(id)
    }

    #[instrument(skip(self, registration), fields(email = %registration.email))]
    pub async fn register_admin(
        &self,
        caller: &Caller,
        registration: Registration,
    ) -> Result<UserId, UserError> {
        caller.require_admin()?;
        let id = self.create_checked(registration, UserType::Admin, None).await?;
        info!(user_id = %id, "Admin registered");
        Ok(id)
    }

    /// Creates an inactive user holding a fresh activation token.
    #[instrument(skip(self, registration), fields(email = %registration.email))]
    pub async fn invite_user(
        &self,
        caller: &Caller,
        registration: Registration,
        user_type: UserType,
    ) -> Result<Invitation, UserError> {
        caller.require_admin()?;
        let token = Uuid::new_v4().to_string();
        let user_id = self
            .create_checked(registration, user_type, Some(token.clone()))
            .await?;
        info!(%user_id, ?user_type, "User invited");
        Ok(Invitation { user_id, token })
    }

    /// Activates the inactive user holding `token`.
    #[instrument(skip_all)]
    pub async fn activate(&self, token: &str) -> Result<User, UserError> {
        let user = self
            .users
            .find_by_token(token)
            .await?
            .ok_or_else(|| UserError::NotFound("activation token".into()))?;
        self.users.activate(user.id, token.to_string()).await?;
        info!(user_id = %user.id, "User activated");
        self.users
            .get(user.id)
            .await?
            .ok_or_else(|| UserError::NotFound(user.id.to_string()))
    }

    #[instrument(skip(self))]
    pub async fn list_users(&self, caller: &Caller) -> Result<Vec<User>, UserError> {
        caller.require_admin()?;
        let mut users = self.users.list().await?;
        users.sort_by_key(|u| u.id);
        Ok(users)
    }
}
