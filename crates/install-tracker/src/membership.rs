//! # Membership Index
//!
//! An order's `deliverers` and `installers` are the source of truth for who works on it.
//! Each referenced user keeps the reverse index in `order_refs`. [`MembershipIndex`] is the
//! only writer of that index and is driven by [`OrderClient`](crate::clients::OrderClient)
//! around every change of an order's assignments.
//!
//! Calls are sequential, one user update per assignment entry. There is no transaction
//! across users: a failure partway leaves some users updated. `add` and `remove` are both
//! idempotent, so repeating the failed operation converges.

use crate::clients::UserClient;
use crate::model::{InstallationOrder, OrderId, OrderSetup};
use crate::order_actor::OrderError;
use crate::user_actor::UserError;
use store_actor::RecordClient;
use tracing::{debug, instrument, warn};

#[derive(Clone)]
pub struct MembershipIndex {
    users: UserClient,
}

impl MembershipIndex {
    pub fn new(users: UserClient) -> Self {
        Self { users }
    }

    /// Fails with [`OrderError::UnknownUser`] if any assignment names a missing user.
    #[instrument(skip_all)]
    pub async fn verify(&self, setup: &OrderSetup) -> Result<(), OrderError> {
        for assignment in setup.assignments() {
            if self.users.get(assignment.user_id).await?.is_none() {
                warn!(user_id = %assignment.user_id, "Assignment names unknown user");
                return Err(OrderError::UnknownUser(assignment.user_id.to_string()));
            }
        }
        Ok(())
    }

    /// Links `order_id` on every installer, then every deliverer.
    #[instrument(skip(self, setup))]
    pub async fn add(&self, setup: &OrderSetup, order_id: OrderId) -> Result<(), OrderError> {
        for assignment in setup.assignments() {
            let added = self.users.link_order(assignment.user_id, order_id).await?;
            debug!(user_id = %assignment.user_id, added, "Linked");
        }
        Ok(())
    }

    /// Unlinks the order from every deliverer, then every installer.
    ///
    /// Users that no longer exist are skipped.
    #[instrument(skip(self, order), fields(order_id = %order.id))]
    pub async fn remove(&self, order: &InstallationOrder) -> Result<(), OrderError> {
        for assignment in order.deliverers.iter().chain(order.installers.iter()) {
            match self.users.unlink_order(assignment.user_id, order.id).await {
                Ok(removed) => debug!(user_id = %assignment.user_id, removed, "Unlinked"),
                Err(UserError::NotFound(_)) => {
                    warn!(user_id = %assignment.user_id, "Assigned user is gone, skipping")
                }
                Err(e) => return Err(e.into()),
            }
        }
        Ok(())
    }
}
