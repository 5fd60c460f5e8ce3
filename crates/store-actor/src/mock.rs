//! # Mock Stores & Testing Guide
//!
//! [`MockStore<T>`] hands out a real [`StoreClient<T>`] whose requests are answered from a
//! queue of scripted replies instead of a running [`StoreActor`](crate::StoreActor). Use it to
//! test code that *calls* a store without standing one up.
//!
//! | | MockStore | Real store |
//! |---|---|---|
//! | **State** | none, replies are scripted | real records |
//! | **Error injection** | `return_err(..)` | needs a crafted state |
//! | **Use case** | logic around a client | the record type or the whole system |
//!
//! ## Testing Patterns
//!
//! 1. **Client logic, pure mock**: script every reply the code under test will need.
//! 2. **Single store**: spawn one `StoreActor` and drive it through its client.
//! 3. **Store with mocked dependencies**: a real store for the record under test, mocks
//!    for the stores it talks to.
//! 4. **Full system**: every store real, as in the application's integration tests.
//!
//! ```rust
//! use store_actor::mock::MockStore;
//! use store_actor::{Record, StoreError};
//! use async_trait::async_trait;
//!
//! #[derive(Clone, Debug, PartialEq)] struct Crew { id: u32, name: String }
//! #[derive(Debug)] struct CrewCreate;
//! #[derive(Debug)] struct CrewUpdate;
//! #[derive(Debug)] enum CrewAction {}
//! #[derive(Debug, thiserror::Error)] #[error("crew error")] struct CrewError;
//!
//! #[async_trait]
//! impl Record for Crew {
//!     type Id = u32; type Create = CrewCreate; type Update = CrewUpdate;
//!     type Action = CrewAction; type ActionResult = (); type Context = (); type Error = CrewError;
//!     fn from_create_params(id: u32, _: CrewCreate) -> Result<Self, CrewError> {
//!         Ok(Self { id, name: String::new() })
//!     }
//!     async fn on_update(&mut self, _: CrewUpdate, _: &()) -> Result<(), CrewError> { Ok(()) }
//!     async fn handle_action(&mut self, _: CrewAction, _: &()) -> Result<(), CrewError> { Ok(()) }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut mock = MockStore::<Crew>::new();
//!     mock.expect_get(1).return_ok(Some(Crew { id: 1, name: "North".into() }));
//!     mock.expect_get(2).return_err(StoreError::ActorClosed);
//!
//!     let client = mock.client();
//!     assert_eq!(client.get(1).await.unwrap().unwrap().name, "North");
//!     assert!(matches!(client.get(2).await, Err(StoreError::ActorClosed)));
//!     mock.verify();
//! }
//! ```

use crate::client::StoreClient;
use crate::error::StoreError;
use crate::message::StoreRequest;
use crate::record::Record;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;

/// A scripted reply, matched against the next incoming request.
enum Expectation<T: Record> {
    Get {
        id: T::Id,
        response: Result<Option<T>, StoreError>,
    },
    List {
        response: Result<Vec<T>, StoreError>,
    },
    Create {
        response: Result<T::Id, StoreError>,
    },
    Update {
        id: T::Id,
        response: Result<T, StoreError>,
    },
    Delete {
        id: T::Id,
        response: Result<T, StoreError>,
    },
    Action {
        id: T::Id,
        response: Result<T::ActionResult, StoreError>,
    },
}

type Queue<T> = Arc<Mutex<VecDeque<Expectation<T>>>>;

/// A store stand-in that answers requests in the order they were scripted.
///
/// A request that doesn't match the next expectation (wrong kind or wrong id) panics the
/// mock task; the caller then sees [`StoreError::ActorDropped`].
pub struct MockStore<T: Record> {
    client: StoreClient<T>,
    expectations: Queue<T>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<T: Record> Default for MockStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Record> MockStore<T> {
    /// Creates a mock with no expectations. Must be called inside a Tokio runtime.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<StoreRequest<T>>(100);
        let expectations: Queue<T> = Arc::new(Mutex::new(VecDeque::new()));
        let queue = expectations.clone();

        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let next = queue.lock().unwrap().pop_front();
                match (request, next) {
                    (StoreRequest::Get { id, respond_to }, Some(Expectation::Get { id: want, response })) => {
                        assert_eq!(id, want, "get called with unexpected id");
                        let _ = respond_to.send(response);
                    }
                    (StoreRequest::List { respond_to }, Some(Expectation::List { response })) => {
                        let _ = respond_to.send(response);
                    }
                    (StoreRequest::Create { respond_to, .. }, Some(Expectation::Create { response })) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        StoreRequest::Update { id, respond_to, .. },
                        Some(Expectation::Update { id: want, response }),
                    ) => {
                        assert_eq!(id, want, "update called with unexpected id");
                        let _ = respond_to.send(response);
                    }
                    (StoreRequest::Delete { id, respond_to }, Some(Expectation::Delete { id: want, response })) => {
                        assert_eq!(id, want, "delete called with unexpected id");
                        let _ = respond_to.send(response);
                    }
                    (
                        StoreRequest::Action { id, respond_to, .. },
                        Some(Expectation::Action { id: want, response }),
                    ) => {
                        assert_eq!(id, want, "action called with unexpected id");
                        let _ = respond_to.send(response);
                    }
                    _ => panic!("Unexpected request or expectation mismatch"),
                }
            }
        });

        Self {
            client: StoreClient::new(sender),
            expectations,
            _handle: handle,
        }
    }

    /// The client to hand to the code under test.
    pub fn client(&self) -> StoreClient<T> {
        self.client.clone()
    }

    pub fn expect_get(&mut self, id: T::Id) -> Reply<T, Option<T>> {
        Reply::new(&self.expectations, move |response| Expectation::Get { id, response })
    }

    pub fn expect_list(&mut self) -> Reply<T, Vec<T>> {
        Reply::new(&self.expectations, |response| Expectation::List { response })
    }

    pub fn expect_create(&mut self) -> Reply<T, T::Id> {
        Reply::new(&self.expectations, |response| Expectation::Create { response })
    }

    pub fn expect_update(&mut self, id: T::Id) -> Reply<T, T> {
        Reply::new(&self.expectations, move |response| Expectation::Update { id, response })
    }

    pub fn expect_delete(&mut self, id: T::Id) -> Reply<T, T> {
        Reply::new(&self.expectations, move |response| Expectation::Delete { id, response })
    }

    pub fn expect_action(&mut self, id: T::Id) -> Reply<T, T::ActionResult> {
        Reply::new(&self.expectations, move |response| Expectation::Action { id, response })
    }

    /// Panics if some scripted replies were never consumed.
    pub fn verify(&self) {
        let remaining = self.expectations.lock().unwrap().len();
        if remaining > 0 {
            panic!("Not all expectations were met. {remaining} remaining");
        }
    }
}

/// Finishes an expectation with the reply to send back.
pub struct Reply<T: Record, R> {
    expectations: Queue<T>,
    wrap: Box<dyn FnOnce(Result<R, StoreError>) -> Expectation<T> + Send>,
}

impl<T: Record, R> Reply<T, R> {
    fn new(
        expectations: &Queue<T>,
        wrap: impl FnOnce(Result<R, StoreError>) -> Expectation<T> + Send + 'static,
    ) -> Self {
        Self {
            expectations: expectations.clone(),
            wrap: Box::new(wrap),
        }
    }

    pub fn return_ok(self, value: R) {
        let expectation = (self.wrap)(Ok(value));
        self.expectations.lock().unwrap().push_back(expectation);
    }

    pub fn return_err(self, error: StoreError) {
        let expectation = (self.wrap)(Err(error));
        self.expectations.lock().unwrap().push_back(expectation);
    }
}

/// A client wired to a bare receiver, for tests that want to inspect each request.
pub fn channel_client<T: Record>(
    buffer_size: usize,
) -> (StoreClient<T>, mpsc::Receiver<StoreRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (StoreClient::new(sender), receiver)
}

/// Next request, if it is an action.
pub async fn next_action<T: Record>(
    receiver: &mut mpsc::Receiver<StoreRequest<T>>,
) -> Option<(
    T::Id,
    T::Action,
    tokio::sync::oneshot::Sender<Result<T::ActionResult, StoreError>>,
)> {
    match receiver.recv().await {
        Some(StoreRequest::Action {
            id,
            action,
            respond_to,
        }) => Some((id, action, respond_to)),
        _ => None,
    }
}
