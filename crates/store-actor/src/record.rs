//! # Record Trait
//!
//! `Record` is the contract a type implements to be kept by a [`StoreActor`](crate::StoreActor).
//! The associated types pin down, per record type, which payload creates it, which payload
//! updates it, which custom actions it understands and which error it reports. A `User`
//! store only accepts `UserCreate` payloads; the compiler rejects anything else.
//!
//! # Provided Methods
//! - [`Record::on_create`]
//! - [`Record::on_delete`]
//! - [`Record::unique_key`]
//!
//! Implement them only when the record needs the behavior. The defaults do nothing.

use async_trait::async_trait;
use std::fmt::{Debug, Display};
use std::hash::Hash;

/// Trait that any record type must implement to be managed by a `StoreActor`.
///
/// # Async & Context
/// Hooks are `#[async_trait]` so they may await other stores. The `Context` type is handed
/// to `run()` and passed into every hook, which lets a store depend on clients that were
/// created after it.
#[async_trait]
pub trait Record: Clone + Send + Sync + 'static {
    /// Identifier of the record. Generated by the store from a `u32` counter.
    type Id: Eq + Hash + Clone + Send + Sync + Display + Debug + From<u32>;

    /// Payload that creates a new record.
    type Create: Send + Sync + Debug;

    /// Payload that modifies an existing record.
    type Update: Send + Sync + Debug;

    /// Record-specific operations that don't fit create/update/delete.
    type Action: Send + Sync + Debug;

    /// Result of a custom action.
    type ActionResult: Send + Sync + Debug;

    /// Dependencies injected at `run()` time. Use `()` when there are none.
    type Context: Send + Sync;

    /// One error enum per record type, shared by all hooks and actions.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Build the record from its generated id and the create payload.
    fn from_create_params(id: Self::Id, params: Self::Create) -> Result<Self, Self::Error>;

    /// Value that must be unique across the store (an email, an order number).
    ///
    /// The store rejects a create or update that would make two records share a key.
    fn unique_key(&self) -> Option<String> {
        None
    }

    /// Called after construction, before the record is inserted.
    async fn on_create(&mut self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Apply an update. Runs against a copy; the store commits it only on `Ok`.
    async fn on_update(
        &mut self,
        update: Self::Update,
        _ctx: &Self::Context,
    ) -> Result<(), Self::Error>;

    /// Called before the record is removed. Returning an error keeps the record.
    async fn on_delete(&self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Handle a custom action.
    async fn handle_action(
        &mut self,
        action: Self::Action,
        _ctx: &Self::Context,
    ) -> Result<Self::ActionResult, Self::Error>;
}
