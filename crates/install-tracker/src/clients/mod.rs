//! Typed clients over the stores. [`OrderClient`] and [`AccountClient`] carry the rules that
//! span more than one store; [`UserClient`] is a thin wrapper.

pub mod account_client;
pub mod order_client;
pub mod user_client;

pub use account_client::*;
pub use order_client::*;
pub use user_client::*;
