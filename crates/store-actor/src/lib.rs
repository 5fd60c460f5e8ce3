//! # Store Actor
//!
//! Typed in-memory record stores, each run as a Tokio actor.
//!
//! A store owns every record of one type and answers `Create`, `Get`, `List`, `Update`,
//! `Delete` and custom `Action` requests one at a time. Because a single task owns the map,
//! an update to one record is atomic without locks, while separate stores run in parallel.
//!
//! ## Layers
//!
//! 1. **Record layer** ([`Record`]): the data type and its hooks.
//! 2. **Runtime layer** ([`StoreActor`]): request loop, id generation, unique keys.
//! 3. **Interface layer** ([`StoreClient`], [`RecordClient`]): typed async handles.
//!
//! ## Context Injection
//!
//! Dependencies are passed to [`StoreActor::run`] rather than to [`StoreActor::new`], so a
//! store can be wired to clients of stores created after it:
//!
//! ```rust
//! use store_actor::{Record, StoreActor, StoreClient};
//! use async_trait::async_trait;
//!
//! #[derive(Clone, Debug)] struct Crew { id: u32 }
//! #[derive(Debug)] struct CrewCreate;
//! #[derive(Debug)] struct CrewUpdate;
//! #[derive(Debug)] enum CrewAction {}
//! #[derive(Debug, thiserror::Error)] #[error("crew")] struct CrewError;
//!
//! #[async_trait]
//! impl Record for Crew {
//!     type Id = u32; type Create = CrewCreate; type Update = CrewUpdate; type Action = CrewAction;
//!     type ActionResult = (); type Context = (); type Error = CrewError;
//!     fn from_create_params(id: u32, _: CrewCreate) -> Result<Self, CrewError> { Ok(Self { id }) }
//!     async fn on_update(&mut self, _: CrewUpdate, _: &()) -> Result<(), CrewError> { Ok(()) }
//!     async fn handle_action(&mut self, _: CrewAction, _: &()) -> Result<(), CrewError> { Ok(()) }
//! }
//!
//! #[derive(Clone, Debug)] struct Job { id: u32 }
//! #[derive(Debug)] struct JobCreate;
//! #[derive(Debug)] struct JobUpdate;
//! #[derive(Debug)] enum JobAction {}
//! #[derive(Debug, thiserror::Error)] #[error("job")] struct JobError;
//!
//! #[async_trait]
//! impl Record for Job {
//!     type Id = u32; type Create = JobCreate; type Update = JobUpdate; type Action = JobAction;
//!     type ActionResult = (); type Context = StoreClient<Crew>; type Error = JobError;
//!     fn from_create_params(id: u32, _: JobCreate) -> Result<Self, JobError> { Ok(Self { id }) }
//!     async fn on_update(&mut self, _: JobUpdate, _: &StoreClient<Crew>) -> Result<(), JobError> { Ok(()) }
//!     async fn handle_action(&mut self, _: JobAction, _: &StoreClient<Crew>) -> Result<(), JobError> { Ok(()) }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let (crew_store, crew_client) = StoreActor::<Crew>::new(10);
//!     let (job_store, job_client) = StoreActor::<Job>::new(10);
//!
//!     tokio::spawn(crew_store.run(()));
//!     tokio::spawn(job_store.run(crew_client));
//!
//!     let _ = job_client.create(JobCreate).await;
//! }
//! ```
//!
//! ## Testing
//!
//! [`mock::MockStore`] serves scripted replies through a real [`StoreClient`], so code that
//! calls a store can be tested without running one.

pub mod actor;
pub mod client;
pub mod error;
pub mod message;
pub mod mock;
pub mod record;
pub mod record_client;

pub use actor::StoreActor;
pub use client::StoreClient;
pub use error::StoreError;
pub use message::{Response, StoreRequest};
pub use record::Record;
pub use record_client::RecordClient;
