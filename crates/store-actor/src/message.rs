//! # Store Messages
//!
//! Requests sent from a [`StoreClient`](crate::StoreClient) to a
//! [`StoreActor`](crate::StoreActor). Each variant carries a oneshot sender for the reply.

use crate::error::StoreError;
use crate::record::Record;
use tokio::sync::oneshot;

/// One-shot reply channel used by the store.
pub type Response<T> = oneshot::Sender<Result<T, StoreError>>;

/// Request sent to a store actor.
///
/// The variants map to the lifecycle of a stored record: `Create`, `Get`, `List`,
/// `Update` and `Delete`, plus `Action` for record-specific operations. The payload types
/// come from the [`Record`] implementation, so a request built for one record type
/// cannot reach the store of another.
#[derive(Debug)]
pub enum StoreRequest<T: Record> {
    Create {
        params: T::Create,
        respond_to: Response<T::Id>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>>,
    },
    List {
        respond_to: Response<Vec<T>>,
    },
    Update {
        id: T::Id,
        update: T::Update,
        respond_to: Response<T>,
    },
    Delete {
        id: T::Id,
        respond_to: Response<T>,
    },
    Action {
        id: T::Id,
        action: T::Action,
        respond_to: Response<T::ActionResult>,
    },
}
