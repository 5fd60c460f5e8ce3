//! # Order Store
//!
//! Installation orders are kept by a plain [`StoreActor`] with no context; the rules that span
//! orders and users (membership, file storage, access) live in
//! [`OrderClient`](crate::clients::OrderClient), which every write goes through.
//!
//! ## Structure
//!
//! - [`entity`] - [`Record`](store_actor::Record) implementation for
//!   [`InstallationOrder`](crate::model::InstallationOrder)
//! - [`error`] - [`OrderError`] and its status codes
//! - [`new()`] - creates the store and its lifecycle client

pub mod entity;
pub mod error;

pub use error::*;

use crate::clients::{OrderClient, UserClient};
use crate::files::FileStore;
use crate::model::InstallationOrder;
use std::sync::Arc;
use store_actor::StoreActor;

/// Creates the Order store and an [`OrderClient`] wired to the given user client and file store.
pub fn new(
    buffer_size: usize,
    users: UserClient,
    files: Arc<dyn FileStore>,
    file_root: impl Into<String>,
) -> (StoreActor<InstallationOrder>, OrderClient) {
    let (actor, generic_client) = StoreActor::new(buffer_size);
    let client = OrderClient::new(generic_client, users, files, file_root);
    (actor, client)
}
