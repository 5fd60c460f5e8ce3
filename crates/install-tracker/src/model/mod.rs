//! Plain data types shared by the stores and clients.

pub mod order;
pub mod user;

pub use order::*;
pub use user::*;
