//! # System Lifecycle
//!
//! Starting, wiring and stopping the stores.
//!
//! Stores are created first and receive their dependencies later, through `run(context)` or
//! through the client that wraps them. Here the wiring is all client-side: the order
//! lifecycle holds a [`UserClient`](crate::clients::UserClient) and a file store, and neither
//! store's `run` needs a context.
//!
//! ## Shutdown
//!
//! 1. **Drop every client**: the stores' channels close.
//! 2. **Stores drain**: `recv()` returns `None` once queued requests are served.
//! 3. **Await the tasks**.
//!
//! The dependency graph is acyclic (orders → users), so closing the channels is enough. A
//! client cloned out of the system and kept alive holds its store open.
//!
//! ## Tracing
//!
//! [`setup_tracing`] installs a compact `tracing-subscriber` filtered by `RUST_LOG`:
//!
//! ```bash
//! RUST_LOG=info cargo run      # one line per store operation
//! RUST_LOG=debug cargo run     # payloads and membership steps
//! ```

pub mod tracing;
pub mod tracker_system;

pub use self::tracing::*;
pub use tracker_system::*;
