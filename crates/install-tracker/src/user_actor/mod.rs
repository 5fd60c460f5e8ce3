//! # User Store
//!
//! Users have no store dependencies (`Context = ()`); order membership is written into them
//! by the order lifecycle through [`UserAction`](crate::model::UserAction)s.
//!
//! ```rust
//! use install_tracker::model::{UserCreate, UserType};
//! use install_tracker::user_actor;
//! use store_actor::RecordClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let (actor, client) = user_actor::new(8);
//!     tokio::spawn(actor.run(()));
//!
//!     let id = client
//!         .create_user(UserCreate {
//!             email: "ops@example.com".into(),
//!             password_hash: String::new(),
//!             full_name: "Ops".into(),
//!             user_type: UserType::Other,
//!             is_active: true,
//!             activation_token: None,
//!         })
//!         .await?;
//!     assert!(client.get(id).await?.is_some());
//!     Ok(())
//! }
//! ```

pub mod entity;
pub mod error;

pub use error::*;

use crate::clients::UserClient;
use crate::model::User;
use store_actor::StoreActor;

/// Creates the User store and its client.
pub fn new(buffer_size: usize) -> (StoreActor<User>, UserClient) {
    let (actor, generic_client) = StoreActor::new(buffer_size);
    (actor, UserClient::new(generic_client))
}
