//! # Install Tracker demo
//!
//! Runs one pass of the order lifecycle against in-memory stores:
//! 1. Bootstrap an admin and invite two crew members.
//! 2. Load a batch of orders, set one up and edit it.
//! 3. Let a crew member update progress, then close and delete orders.

use chrono::NaiveDate;
use install_tracker::access::{AuthGuard, Caller, TokenTable};
use install_tracker::clients::Registration;
use install_tracker::config::{TrackerConfig, CONFIG_PATH_VAR};
use install_tracker::files::MemoryFileStore;
use install_tracker::lifecycle::{setup_tracing, TrackerSystem};
use install_tracker::model::{
    Assignment, CheckListEntry, OrderId, OrderLoad, OrderPatch, OrderSetup, UserType, WorkStatus,
};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, Instrument};

fn registration(name: &str, email: &str) -> Registration {
    Registration {
        full_name: name.to_string(),
        email: email.to_string(),
        password_hash: format!("hashed:{email}"),
    }
}

fn load(number: &str, ship_name: &str, details: &str) -> OrderLoad {
    OrderLoad {
        order_number: number.to_string(),
        customer: "Harbor Furnishings".to_string(),
        ship_name: ship_name.to_string(),
        ship_address: "12 Quay Rd".to_string(),
        entry_date: NaiveDate::from_ymd_opt(2024, 5, 6).unwrap_or_default(),
        work_status: WorkStatus::NEW,
        order_details: Some(details.to_string()),
        check_items: Vec::new(),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    setup_tracing();

    let config_path = std::env::var_os(CONFIG_PATH_VAR).map(PathBuf::from);
    let config = TrackerConfig::load(config_path.as_deref())?;

    let files = Arc::new(MemoryFileStore::new());
    let system = TrackerSystem::new(&config, files.clone());
    let tokens = TokenTable::new();

    let span = tracing::info_span!("accounts");
    let (installer, deliverer) = async {
        let admin_id = system
            .account_client
            .bootstrap_admin(registration("Dana Admin", "dana@example.com"))
            .await?;
        tokens.issue("admin-token", Caller::Admin(admin_id))?;
        let admin = tokens.authenticate("Bearer admin-token").await?;

        let installer = system
            .account_client
            .invite_user(
                &admin,
                registration("Ian Stall", "ian@example.com"),
                UserType::Installer,
            )
            .await?;
        let deliverer = system
            .account_client
            .invite_user(
                &admin,
                registration("Del Ivery", "del@example.com"),
                UserType::Deliverer,
            )
            .await?;
        system.account_client.activate(&installer.token).await?;
        system.account_client.activate(&deliverer.token).await?;
        tokens.issue("ian-token", Caller::Staff(installer.user_id))?;
        Ok::<_, Box<dyn std::error::Error>>((installer.user_id, deliverer.user_id))
    }
    .instrument(span)
    .await?;

    let admin = tokens.authenticate("Bearer admin-token").await?;
    let orders = &system.order_client;

    let span = tracing::info_span!("orders");
    async {
        let batch = orders
            .batch_create(
                &admin,
                vec![
                    load("100231", "Rivera", "Sofa &amp; loveseat|Coffee table"),
                    load("100232", "Okafor", "Wardrobe"),
                ],
            )
            .await?;
        info!(
            check_items = ?batch.first().map(|load| &load.check_items),
            "Batch loaded"
        );

        let first = OrderId(1);
        let delivery_day = NaiveDate::from_ymd_opt(2024, 5, 20).unwrap_or_default();
        orders
            .setup(
                &admin,
                first,
                OrderSetup {
                    installers: vec![Assignment::new(installer)],
                    files: Some(vec!["floorplan.pdf".to_string()]),
                    ..Default::default()
                },
            )
            .await?;
        orders
            .edit(
                &admin,
                first,
                OrderSetup {
                    installers: vec![Assignment::new(installer)],
                    deliverers: vec![Assignment::new(deliverer).scheduled(delivery_day)],
                    work_status: Some(WorkStatus::new(2)?),
                    check_list: Some(vec![CheckListEntry {
                        item: "Confirm access with site contact".to_string(),
                        done: false,
                    }]),
                    ..Default::default()
                },
            )
            .await?;

        let crew = tokens.authenticate("Bearer ian-token").await?;
        let patch = OrderPatch {
            work_status: Some(WorkStatus::new(4)?),
            ..Default::default()
        };
        orders.update_raw(&crew, first, patch).await?;

        let detail = orders.get_one(&admin, first).await?;
        info!(
            order_number = %detail.order.order_number,
            users = detail.users.len(),
            stored = ?files.stored(&detail.order.order_number),
            "Order detail"
        );

        orders.close(&admin, first).await?;
        orders.delete(&admin, OrderId(2)).await?;
        info!(count = orders.count_orders(&admin).await?, "Orders after cleanup");

        for order in orders.list_orders(&admin).await? {
            info!(
                order_number = %order.order_number,
                status = order.work_status.code(),
                "Remaining order"
            );
        }
        for user in system.account_client.list_users(&admin).await? {
            info!(user_id = %user.id, orders = user.order_refs.len(), "User");
        }
        Ok::<_, Box<dyn std::error::Error>>(())
    }
    .instrument(span)
    .await?;

    system.shutdown().await?;

    info!("Demo completed successfully");
    Ok(())
}
