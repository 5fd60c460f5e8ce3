//! # Order Client
//!
//! The order lifecycle. Every write to an order goes through here so the order store, the
//! users' `order_refs` and the file store move together. Within one call the steps are
//! strictly ordered: unlink old crews, persist, link new crews, then touch files.
//!
//! Failures of a later step do not undo earlier ones; the call can be repeated, and
//! [`OrderClient::resync_files`] re-runs just the upload.
use crate::access::{AccessError, Caller};
use crate::clients::UserClient;
use crate::files::{FileStore, StoragePath};
use crate::membership::MembershipIndex;
use crate::model::{
    InstallationOrder, OrderId, OrderLoad, OrderPatch, OrderSetup, OrderUpdate, User,
};
use crate::order_actor::OrderError;
use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;
use store_actor::{RecordClient, StoreClient, StoreError};
use tracing::{debug, info, instrument, warn};

/// What the order page shows: the order, everyone who can be assigned, and the documents
/// in the order's folder.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDetail {
    pub order: InstallationOrder,
    pub users: Vec<User>,
    pub files: Vec<String>,
}

/// Client for the order lifecycle.
#[derive(Clone)]
pub struct OrderClient {
    inner: StoreClient<InstallationOrder>,
    users: UserClient,
    membership: MembershipIndex,
    files: Arc<dyn FileStore>,
    file_root: String,
}

impl OrderClient {
    pub fn new(
        inner: StoreClient<InstallationOrder>,
        users: UserClient,
        files: Arc<dyn FileStore>,
        file_root: impl Into<String>,
    ) -> Self {
        Self {
            inner,
            membership: MembershipIndex::new(users.clone()),
            users,
            files,
            file_root: file_root.into(),
        }
    }

    async fn load(&self, id: OrderId) -> Result<InstallationOrder, OrderError> {
        self.get(id)
            .await?
            .ok_or_else(|| OrderError::NotFound(id.to_string()))
    }

    async fn upload_files(
        &self,
        order: &InstallationOrder,
        files: &[String],
    ) -> Result<(), OrderError> {
        if files.is_empty() {
            return Ok(());
        }
        self.files
            .upload(&order.order_number, order.local_file_path.as_deref(), files)
            .await
            .map_err(|e| {
                warn!(order_id = %order.id, error = %e, "Upload failed, resync to retry");
                OrderError::from(e)
            })
    }

    /// Stores a batch of sales-order loads, deriving `check_items` from `order_details`.
    ///
    /// Returns the batch as stored. Stops at the first rejected load; loads before it stay.
    #[instrument(skip(self, loads), fields(count = loads.len()))]
    pub async fn batch_create(
        &self,
        caller: &Caller,
        loads: Vec<OrderLoad>,
    ) -> Result<Vec<OrderLoad>, OrderError> {
        caller.require_admin()?;
        let mut stored = Vec::with_capacity(loads.len());
        for mut load in loads {
            load.derive_check_items();
            let id = self.inner.create(load.clone()).await?;
            debug!(order_id = %id, order_number = %load.order_number, "Order stored");
            stored.push(load);
        }
        info!(count = stored.len(), "Batch stored");
        Ok(stored)
    }

    /// Assigns crews and job details to an order. Crews already on the order are released
    /// first, so a repeated setup leaves references only for the new crews.
    #[instrument(skip(self, setup))]
    pub async fn setup(
        &self,
        caller: &Caller,
        id: OrderId,
        setup: OrderSetup,
    ) -> Result<InstallationOrder, OrderError> {
        caller.require_admin()?;
        let current = self.load(id).await?;
        self.membership.verify(&setup).await?;
        self.membership.remove(&current).await?;
        let order = self
            .inner
            .update(id, OrderUpdate::Assign(setup.clone()))
            .await?;
        self.membership.add(&setup, id).await?;
        self.upload_files(&order, setup.files.as_deref().unwrap_or_default())
            .await?;
        info!(order_id = %id, "Order set up");
        Ok(order)
    }

    /// Replaces the crews and job details of an order.
    #[instrument(skip(self, setup))]
    pub async fn edit(
        &self,
        caller: &Caller,
        id: OrderId,
        setup: OrderSetup,
    ) -> Result<InstallationOrder, OrderError> {
        caller.require_admin()?;
        let current = self.load(id).await?;
        self.membership.verify(&setup).await?;
        self.membership.remove(&current).await?;
        let order = self
            .inner
            .update(id, OrderUpdate::Assign(setup.clone()))
            .await?;
        self.membership.add(&setup, id).await?;
        self.upload_files(&order, setup.files.as_deref().unwrap_or_default())
            .await?;
        info!(order_id = %id, "Order edited");
        Ok(order)
    }

    /// Removes an order, its back-references and its stored files. Returns the removed order.
    #[instrument(skip(self))]
    pub async fn delete(
        &self,
        caller: &Caller,
        id: OrderId,
    ) -> Result<InstallationOrder, OrderError> {
        caller.require_admin()?;
        let order = self.load(id).await?;
        self.membership.remove(&order).await?;
        let removed = self.inner.delete(id).await?;
        self.files.delete_directory(&removed.order_number).await?;
        info!(order_id = %id, order_number = %removed.order_number, "Order deleted");
        Ok(removed)
    }

    /// Marks an order closed and releases its crews. Assignments stay on the order.
    #[instrument(skip(self))]
    pub async fn close(
        &self,
        caller: &Caller,
        id: OrderId,
    ) -> Result<InstallationOrder, OrderError> {
        caller.require_admin()?;
        let order = self.inner.update(id, OrderUpdate::Close).await?;
        self.membership.remove(&order).await?;
        info!(order_id = %id, "Order closed");
        Ok(order)
    }

    /// All orders, highest order number first.
    #[instrument(skip(self))]
    pub async fn list_orders(&self, caller: &Caller) -> Result<Vec<InstallationOrder>, OrderError> {
        caller.require_admin()?;
        let mut orders = self.list().await?;
        orders.sort_by(|a, b| b.order_number.cmp(&a.order_number));
        Ok(orders)
    }

    #[instrument(skip(self))]
    pub async fn count_orders(&self, caller: &Caller) -> Result<usize, OrderError> {
        caller.require_admin()?;
        Ok(self.list().await?.len())
    }

    #[instrument(skip(self))]
    pub async fn get_one(&self, caller: &Caller, id: OrderId) -> Result<OrderDetail, OrderError> {
        caller.require_admin()?;
        let order = self.load(id).await?;
        let mut users = self.users.list().await?;
        users.sort_by_key(|u| u.id);
        let path = StoragePath::for_order(&self.file_root, &order);
        let files = self.files.list_files(&path).await?;
        debug!(%path, files = files.len(), "Order detail assembled");
        Ok(OrderDetail {
            order,
            users,
            files,
        })
    }

    /// Field-level update for admins and for crews assigned to an open order.
    ///
    /// The patch cannot carry assignments, so membership is left alone. A patch may not
    /// close or reopen the order.
    #[instrument(skip(self, patch))]
    pub async fn update_raw(
        &self,
        caller: &Caller,
        id: OrderId,
        patch: OrderPatch,
    ) -> Result<InstallationOrder, OrderError> {
        if !caller.is_admin() {
            let order = self.load(id).await?;
            if !order.is_assigned(caller.user_id()) {
                return Err(AccessError::Forbidden(format!(
                    "{} is not assigned to {id}",
                    caller.user_id()
                ))
                .into());
            }
            if order.work_status.is_closed() {
                return Err(AccessError::Forbidden(format!("{id} is closed")).into());
            }
        }
        Ok(self.inner.update(id, OrderUpdate::Patch(patch)).await?)
    }

    /// Uploads the order's stored file list again.
    #[instrument(skip(self))]
    pub async fn resync_files(&self, caller: &Caller, id: OrderId) -> Result<(), OrderError> {
        caller.require_admin()?;
        let order = self.load(id).await?;
        self.upload_files(&order, &order.files).await
    }
}

#[async_trait]
impl RecordClient<InstallationOrder> for OrderClient {
    type Error = OrderError;

    fn inner(&self) -> &StoreClient<InstallationOrder> {
        &self.inner
    }

    fn map_error(e: StoreError) -> Self::Error {
        OrderError::from(e)
    }
}
