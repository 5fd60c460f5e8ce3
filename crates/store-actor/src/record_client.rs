//! # RecordClient Trait
//!
//! Shared read surface for domain clients that wrap a [`StoreClient`]: `get` and `list`
//! come for free once the wrapper says how to reach its inner client and how to translate
//! [`StoreError`] into its own error type. Writes stay on the domain client, where they can
//! carry whatever bookkeeping the record needs.
use crate::{Record, StoreClient, StoreError};
use async_trait::async_trait;

/// Trait for domain clients built on a `StoreClient`.
///
/// ```rust
/// use store_actor::{Record, RecordClient, StoreClient, StoreError};
/// use async_trait::async_trait;
///
/// #[derive(Clone, Debug)] struct Crew { id: u32 }
/// #[derive(Debug)] struct CrewCreate;
/// #[derive(Debug)] struct CrewUpdate;
/// #[derive(Debug)] enum CrewAction {}
/// #[derive(Debug, thiserror::Error)] #[error("{0}")] struct CrewError(String);
///
/// #[async_trait]
/// impl Record for Crew {
///     type Id = u32; type Create = CrewCreate; type Update = CrewUpdate;
///     type Action = CrewAction; type ActionResult = (); type Context = (); type Error = CrewError;
///     fn from_create_params(id: u32, _: CrewCreate) -> Result<Self, CrewError> { Ok(Self { id }) }
///     async fn on_update(&mut self, _: CrewUpdate, _: &()) -> Result<(), CrewError> { Ok(()) }
///     async fn handle_action(&mut self, _: CrewAction, _: &()) -> Result<(), CrewError> { Ok(()) }
/// }
///
/// struct CrewClient { inner: StoreClient<Crew> }
///
/// #[async_trait]
/// impl RecordClient<Crew> for CrewClient {
///     type Error = CrewError;
///     fn inner(&self) -> &StoreClient<Crew> { &self.inner }
///     fn map_error(e: StoreError) -> CrewError { CrewError(e.to_string()) }
/// }
///
/// async fn usage(client: CrewClient) {
///     let _ = client.get(1).await;
///     let _ = client.list().await;
/// }
/// ```
#[async_trait]
pub trait RecordClient<T: Record>: Send + Sync {
    /// The domain error type.
    type Error: Send + Sync;

    /// The wrapped generic client.
    fn inner(&self) -> &StoreClient<T>;

    /// Translate store failures into the domain error.
    fn map_error(e: StoreError) -> Self::Error;

    /// Fetch a record by id.
    #[tracing::instrument(skip(self))]
    async fn get(&self, id: T::Id) -> Result<Option<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().get(id).await.map_err(Self::map_error)
    }

    /// Fetch every record, in no particular order.
    #[tracing::instrument(skip(self))]
    async fn list(&self) -> Result<Vec<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().list().await.map_err(Self::map_error)
    }
}
