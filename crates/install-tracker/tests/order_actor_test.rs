use chrono::NaiveDate;
use install_tracker::access::Caller;
use install_tracker::clients::{OrderClient, UserClient};
use install_tracker::files::MemoryFileStore;
use install_tracker::model::{
    Assignment, InstallationOrder, OrderId, OrderLoad, OrderSetup, User, UserActionResult,
    UserId, UserType, WorkStatus,
};
use install_tracker::order_actor::OrderError;
use std::sync::Arc;
use store_actor::mock::MockStore;
use store_actor::{RecordClient, StoreError};

const ADMIN: Caller = Caller::Admin(UserId(100));

fn load() -> OrderLoad {
    OrderLoad {
        order_number: "200451".into(),
        customer: "Acme".into(),
        ship_name: "Jane Roe".into(),
        ship_address: "1 Main St".into(),
        entry_date: NaiveDate::from_ymd_opt(2024, 6, 3).unwrap(),
        work_status: WorkStatus::NEW,
        order_details: None,
        check_items: Vec::new(),
    }
}

fn user(id: u32) -> User {
    User::new(
        UserId(id),
        format!("crew{id}@example.com"),
        format!("Crew {id}"),
        UserType::Installer,
    )
}

/// Real Order store, mocked User store behind the membership index.
fn order_store(users: &MockStore<User>) -> (OrderClient, tokio::task::JoinHandle<()>) {
    let (actor, client) = install_tracker::order_actor::new(
        8,
        UserClient::new(users.client()),
        Arc::new(MemoryFileStore::new()),
        "files",
    );
    (client, tokio::spawn(actor.run(())))
}

async fn stored_order(orders: &OrderClient) -> InstallationOrder {
    orders.batch_create(&ADMIN, vec![load()]).await.unwrap();
    orders.get(OrderId(1)).await.unwrap().expect("Order not stored")
}

/// Pattern 2: real store + mocked dependency.
/// Setup checks every user before writing, then links installers before deliverers.
#[tokio::test]
async fn test_setup_verifies_then_links_in_order() {
    let mut users = MockStore::<User>::new();
    users.expect_get(UserId(2)).return_ok(Some(user(2)));
    users.expect_get(UserId(1)).return_ok(Some(user(1)));
    users
        .expect_action(UserId(2))
        .return_ok(UserActionResult::Linked { added: true });
    users
        .expect_action(UserId(1))
        .return_ok(UserActionResult::Linked { added: true });

    let (orders, handle) = order_store(&users);
    let order = stored_order(&orders).await;

    let setup = OrderSetup {
        installers: vec![Assignment::new(UserId(2))],
        deliverers: vec![Assignment::new(UserId(1))],
        ..Default::default()
    };
    let updated = orders.setup(&ADMIN, order.id, setup).await.unwrap();
    assert!(updated.is_assigned(UserId(1)) && updated.is_assigned(UserId(2)));

    users.verify();
    drop(orders);
    handle.await.unwrap();
}

/// Edit unlinks the old crew (deliverers first) before linking the new one.
#[tokio::test]
async fn test_edit_unlinks_before_linking() {
    let mut users = MockStore::<User>::new();
    // setup
    users.expect_get(UserId(2)).return_ok(Some(user(2)));
    users.expect_get(UserId(1)).return_ok(Some(user(1)));
    users
        .expect_action(UserId(2))
        .return_ok(UserActionResult::Linked { added: true });
    users
        .expect_action(UserId(1))
        .return_ok(UserActionResult::Linked { added: true });
    // edit
    users.expect_get(UserId(3)).return_ok(Some(user(3)));
    users
        .expect_action(UserId(1))
        .return_ok(UserActionResult::Unlinked { removed: true });
    users
        .expect_action(UserId(2))
        .return_ok(UserActionResult::Unlinked { removed: true });
    users
        .expect_action(UserId(3))
        .return_ok(UserActionResult::Linked { added: true });

    let (orders, handle) = order_store(&users);
    let order = stored_order(&orders).await;

    let first = OrderSetup {
        installers: vec![Assignment::new(UserId(2))],
        deliverers: vec![Assignment::new(UserId(1))],
        ..Default::default()
    };
    orders.setup(&ADMIN, order.id, first).await.unwrap();

    let second = OrderSetup {
        installers: vec![Assignment::new(UserId(3))],
        ..Default::default()
    };
    let updated = orders.edit(&ADMIN, order.id, second).await.unwrap();
    assert_eq!(updated.installers, vec![Assignment::new(UserId(3))]);
    assert!(updated.deliverers.is_empty());

    users.verify();
    drop(orders);
    handle.await.unwrap();
}

/// A repeated setup releases the crew it replaces.
#[tokio::test]
async fn test_second_setup_unlinks_previous_crew() {
    let mut users = MockStore::<User>::new();
    users.expect_get(UserId(2)).return_ok(Some(user(2)));
    users
        .expect_action(UserId(2))
        .return_ok(UserActionResult::Linked { added: true });
    users.expect_get(UserId(3)).return_ok(Some(user(3)));
    users
        .expect_action(UserId(2))
        .return_ok(UserActionResult::Unlinked { removed: true });
    users
        .expect_action(UserId(3))
        .return_ok(UserActionResult::Linked { added: true });

    let (orders, handle) = order_store(&users);
    let order = stored_order(&orders).await;

    let first = OrderSetup {
        installers: vec![Assignment::new(UserId(2))],
        ..Default::default()
    };
    orders.setup(&ADMIN, order.id, first).await.unwrap();
    let second = OrderSetup {
        installers: vec![Assignment::new(UserId(3))],
        ..Default::default()
    };
    let updated = orders.setup(&ADMIN, order.id, second).await.unwrap();
    assert_eq!(updated.installers, vec![Assignment::new(UserId(3))]);

    users.verify();
    drop(orders);
    handle.await.unwrap();
}

/// An unknown user stops setup before any write.
#[tokio::test]
async fn test_unknown_user_blocks_setup() {
    let mut users = MockStore::<User>::new();
    users.expect_get(UserId(5)).return_ok(None);

    let (orders, handle) = order_store(&users);
    let order = stored_order(&orders).await;

    let setup = OrderSetup {
        installers: vec![Assignment::new(UserId(5))],
        ..Default::default()
    };
    let err = orders.setup(&ADMIN, order.id, setup).await.unwrap_err();
    assert_eq!(err, OrderError::UnknownUser("user_5".into()));

    let unchanged = orders.get(order.id).await.unwrap().unwrap();
    assert!(unchanged.installers.is_empty());

    users.verify();
    drop(orders);
    handle.await.unwrap();
}

/// Closing skips assigned users that no longer exist.
#[tokio::test]
async fn test_close_skips_missing_users() {
    let mut users = MockStore::<User>::new();
    users.expect_get(UserId(2)).return_ok(Some(user(2)));
    users
        .expect_action(UserId(2))
        .return_ok(UserActionResult::Linked { added: true });
    users
        .expect_action(UserId(2))
        .return_err(StoreError::NotFound("user_2".into()));

    let (orders, handle) = order_store(&users);
    let order = stored_order(&orders).await;

    let setup = OrderSetup {
        installers: vec![Assignment::new(UserId(2))],
        ..Default::default()
    };
    orders.setup(&ADMIN, order.id, setup).await.unwrap();

    let closed = orders.close(&ADMIN, order.id).await.unwrap();
    assert!(closed.work_status.is_closed());

    users.verify();
    drop(orders);
    handle.await.unwrap();
}

/// A user store failure other than not-found aborts the unlink pass.
#[tokio::test]
async fn test_user_store_failure_aborts_delete() {
    let mut users = MockStore::<User>::new();
    users.expect_get(UserId(2)).return_ok(Some(user(2)));
    users
        .expect_action(UserId(2))
        .return_ok(UserActionResult::Linked { added: true });
    users
        .expect_action(UserId(2))
        .return_err(StoreError::ActorClosed);

    let (orders, handle) = order_store(&users);
    let order = stored_order(&orders).await;
    let setup = OrderSetup {
        installers: vec![Assignment::new(UserId(2))],
        ..Default::default()
    };
    orders.setup(&ADMIN, order.id, setup).await.unwrap();

    let err = orders.delete(&ADMIN, order.id).await.unwrap_err();
    assert_eq!(err.status(), 500);
    assert!(orders.get(order.id).await.unwrap().is_some());

    users.verify();
    drop(orders);
    handle.await.unwrap();
}
