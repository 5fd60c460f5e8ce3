//! [`Record`] implementation for [`InstallationOrder`].

use crate::model::{InstallationOrder, OrderId, OrderLoad, OrderUpdate, WorkStatus};
use crate::order_actor::OrderError;
use async_trait::async_trait;
use store_actor::Record;

#[async_trait]
impl Record for InstallationOrder {
    type Id = OrderId;
    type Create = OrderLoad;
    type Update = OrderUpdate;
    type Action = (); // No custom actions
    type ActionResult = ();
    type Context = ();
    type Error = OrderError;

    fn from_create_params(id: OrderId, params: OrderLoad) -> Result<Self, OrderError> {
        if params.order_number.trim().is_empty() {
            return Err(OrderError::ValidationError("order number is required".into()));
        }
        if params.customer.trim().is_empty() {
            return Err(OrderError::ValidationError("customer is required".into()));
        }
        Ok(Self::from_load(id, params))
    }

    fn unique_key(&self) -> Option<String> {
        Some(self.order_number.clone())
    }

    async fn on_update(&mut self, update: OrderUpdate, _ctx: &()) -> Result<(), OrderError> {
        match update {
            OrderUpdate::Assign(setup) => {
                if self.work_status.is_closed() {
                    return Err(OrderError::ValidationError(format!(
                        "{} is closed",
                        self.id
                    )));
                }
                self.check_status_change(setup.work_status)?;
                self.apply_setup(setup);
            }
            OrderUpdate::Patch(patch) => {
                self.check_status_change(patch.work_status)?;
                self.apply_patch(patch);
            }
            OrderUpdate::Close => self.work_status = WorkStatus::CLOSED,
        }
        Ok(())
    }

    async fn handle_action(&mut self, _action: (), _ctx: &()) -> Result<(), OrderError> {
        Ok(())
    }
}

impl InstallationOrder {
    /// Closing and reopening only happen through `OrderUpdate::Close`, which releases crews.
    fn check_status_change(&self, next: Option<WorkStatus>) -> Result<(), OrderError> {
        match next {
            Some(status) if status.is_closed() != self.work_status.is_closed() => {
                Err(OrderError::ValidationError(format!(
                    "work status {} -> {} must go through close",
                    self.work_status.code(),
                    status.code()
                )))
            }
            _ => Ok(()),
        }
    }
}
