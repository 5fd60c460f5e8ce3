use crate::model::UserId;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Type-safe identifier for orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(pub u32);

impl From<u32> for OrderId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "order_{}", self.0)
    }
}

/// Raised when a work status code falls outside `0..=5`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("work status {0} is outside 0..=5")]
pub struct InvalidWorkStatus(pub u8);

/// Progress code of an order. `5` means closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct WorkStatus(u8);

impl WorkStatus {
    pub const NEW: Self = Self(0);
    pub const CLOSED: Self = Self(5);

    pub fn new(code: u8) -> Result<Self, InvalidWorkStatus> {
        if code <= Self::CLOSED.0 {
            Ok(Self(code))
        } else {
            Err(InvalidWorkStatus(code))
        }
    }

    pub fn code(self) -> u8 {
        self.0
    }

    pub fn is_closed(self) -> bool {
        self == Self::CLOSED
    }
}

impl TryFrom<u8> for WorkStatus {
    type Error = InvalidWorkStatus;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        Self::new(code)
    }
}

impl From<WorkStatus> for u8 {
    fn from(status: WorkStatus) -> Self {
        status.0
    }
}

/// A crew member placed on an order, with optional scheduling data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
    pub user_id: UserId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheduled_on: Option<NaiveDate>,
}

impl Assignment {
    pub fn new(user_id: UserId) -> Self {
        Self {
            user_id,
            name: None,
            scheduled_on: None,
        }
    }

    pub fn scheduled(mut self, day: NaiveDate) -> Self {
        self.scheduled_on = Some(day);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckListEntry {
    pub item: String,
    #[serde(default)]
    pub done: bool,
}

/// A labelled window of days, e.g. the delivery window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeFrame {
    pub label: String,
    #[serde(default)]
    pub starts_on: Option<NaiveDate>,
    #[serde(default)]
    pub ends_on: Option<NaiveDate>,
}

/// An installation job: a customer order that crews deliver and install.
///
/// # Store
/// This struct implements the [`Record`](store_actor::Record) trait (see
/// [`order_actor`](crate::order_actor)), so it is kept by a
/// [`StoreActor`](store_actor::StoreActor). The order number is its unique key.
///
/// Assignment lists (`deliverers`, `installers`) are mirrored on each referenced
/// [`User`](crate::model::User); only [`OrderClient`](crate::clients::OrderClient) may change
/// them, so both sides stay in step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstallationOrder {
    pub id: OrderId,
    pub order_number: String,
    pub customer: String,
    pub ship_name: String,
    pub ship_address: String,
    pub entry_date: NaiveDate,
    pub work_status: WorkStatus,
    pub order_details: Option<String>,
    pub check_items: Vec<String>,
    pub check_list: Vec<CheckListEntry>,
    pub time_frames: Vec<TimeFrame>,
    pub files: Vec<String>,
    pub local_file_path: Option<String>,
    pub deliverers: Vec<Assignment>,
    pub installers: Vec<Assignment>,
}

impl InstallationOrder {
    pub fn from_load(id: OrderId, load: OrderLoad) -> Self {
        Self {
            id,
            order_number: load.order_number,
            customer: load.customer,
            ship_name: load.ship_name,
            ship_address: load.ship_address,
            entry_date: load.entry_date,
            work_status: load.work_status,
            order_details: load.order_details,
            check_items: load.check_items,
            check_list: Vec::new(),
            time_frames: Vec::new(),
            files: Vec::new(),
            local_file_path: None,
            deliverers: Vec::new(),
            installers: Vec::new(),
        }
    }

    /// Every assignment, installers first.
    pub fn assignments(&self) -> impl Iterator<Item = &Assignment> {
        self.installers.iter().chain(self.deliverers.iter())
    }

    pub fn is_assigned(&self, user_id: UserId) -> bool {
        self.assignments().any(|a| a.user_id == user_id)
    }

    /// Replace assignments and job details from a setup or edit payload.
    pub fn apply_setup(&mut self, setup: OrderSetup) {
        self.deliverers = setup.deliverers;
        self.installers = setup.installers;
        if let Some(status) = setup.work_status {
            self.work_status = status;
        }
        if let Some(check_list) = setup.check_list {
            self.check_list = check_list;
        }
        if let Some(time_frames) = setup.time_frames {
            self.time_frames = time_frames;
        }
        if let Some(files) = setup.files {
            self.files = files;
        }
        if setup.local_file_path.is_some() {
            self.local_file_path = setup.local_file_path;
        }
    }

    /// Field-level update. Never touches assignments.
    pub fn apply_patch(&mut self, patch: OrderPatch) {
        if let Some(customer) = patch.customer {
            self.customer = customer;
        }
        if let Some(ship_name) = patch.ship_name {
            self.ship_name = ship_name;
        }
        if let Some(ship_address) = patch.ship_address {
            self.ship_address = ship_address;
        }
        if let Some(entry_date) = patch.entry_date {
            self.entry_date = entry_date;
        }
        if let Some(status) = patch.work_status {
            self.work_status = status;
        }
        if let Some(check_items) = patch.check_items {
            self.check_items = check_items;
        }
        if let Some(check_list) = patch.check_list {
            self.check_list = check_list;
        }
        if let Some(time_frames) = patch.time_frames {
            self.time_frames = time_frames;
        }
    }
}

/// One order as it arrives from an external batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLoad {
    pub order_number: String,
    pub customer: String,
    pub ship_name: String,
    pub ship_address: String,
    pub entry_date: NaiveDate,
    #[serde(default)]
    pub work_status: WorkStatus,
    #[serde(default)]
    pub order_details: Option<String>,
    #[serde(default)]
    pub check_items: Vec<String>,
}

impl OrderLoad {
    /// Fills `check_items` from `order_details` when the details are present.
    pub fn derive_check_items(&mut self) {
        if let Some(details) = self.order_details.as_deref().filter(|d| !d.is_empty()) {
            self.check_items = split_check_items(details);
        }
    }
}

/// Splits pipe-delimited order details into checklist items, rewriting `&amp;` as `and`.
///
/// ```
/// use install_tracker::model::split_check_items;
///
/// assert_eq!(
///     split_check_items("Sofa &amp; chair|Lamp"),
///     vec!["Sofa and chair", "Lamp"],
/// );
/// ```
pub fn split_check_items(details: &str) -> Vec<String> {
    details
        .split('|')
        .map(|item| item.replace("&amp;", "and"))
        .collect()
}

/// Assignment payload for setup and edit.
///
/// The crew lists are always replaced; the other fields only when present.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderSetup {
    #[serde(default)]
    pub work_status: Option<WorkStatus>,
    #[serde(default)]
    pub deliverers: Vec<Assignment>,
    #[serde(default)]
    pub installers: Vec<Assignment>,
    #[serde(default)]
    pub check_list: Option<Vec<CheckListEntry>>,
    #[serde(default)]
    pub time_frames: Option<Vec<TimeFrame>>,
    #[serde(default)]
    pub files: Option<Vec<String>>,
    #[serde(default)]
    pub local_file_path: Option<String>,
}

impl OrderSetup {
    /// Every assignment, installers first.
    pub fn assignments(&self) -> impl Iterator<Item = &Assignment> {
        self.installers.iter().chain(self.deliverers.iter())
    }
}

/// Field-level update used by crews in the field. Carries no assignment fields, so it
/// cannot desynchronize membership.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct OrderPatch {
    #[serde(default)]
    pub customer: Option<String>,
    #[serde(default)]
    pub ship_name: Option<String>,
    #[serde(default)]
    pub ship_address: Option<String>,
    #[serde(default)]
    pub entry_date: Option<NaiveDate>,
    #[serde(default)]
    pub work_status: Option<WorkStatus>,
    #[serde(default)]
    pub check_items: Option<Vec<String>>,
    #[serde(default)]
    pub check_list: Option<Vec<CheckListEntry>>,
    #[serde(default)]
    pub time_frames: Option<Vec<TimeFrame>>,
}

/// Store-level update of an order.
#[derive(Debug, Clone)]
pub enum OrderUpdate {
    Assign(OrderSetup),
    Patch(OrderPatch),
    Close,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn load(details: Option<&str>) -> OrderLoad {
        OrderLoad {
            order_number: "100234".into(),
            customer: "Acme".into(),
            ship_name: "Jane Roe".into(),
            ship_address: "1 Main St".into(),
            entry_date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            work_status: WorkStatus::NEW,
            order_details: details.map(String::from),
            check_items: vec!["kept".into()],
        }
    }

    #[test]
    fn details_are_split_into_check_items() {
        let mut order = load(Some("Sofa &amp; Chair|Lamp|Rug &amp; pad &amp; tape"));
        order.derive_check_items();
        assert_eq!(
            order.check_items,
            vec!["Sofa and Chair", "Lamp", "Rug and pad and tape"]
        );
    }

    #[test]
    fn missing_or_empty_details_keep_check_items() {
        let mut order = load(None);
        order.derive_check_items();
        assert_eq!(order.check_items, vec!["kept"]);

        let mut order = load(Some(""));
        order.derive_check_items();
        assert_eq!(order.check_items, vec!["kept"]);
    }

    #[test]
    fn work_status_rejects_codes_above_closed() {
        assert!(WorkStatus::new(5).unwrap().is_closed());
        assert_eq!(WorkStatus::new(6), Err(InvalidWorkStatus(6)));
        assert!(serde_json::from_str::<WorkStatus>("9").is_err());
        assert_eq!(serde_json::from_str::<WorkStatus>("3").unwrap().code(), 3);
    }

    #[test]
    fn patch_rejects_assignment_fields() {
        let raw = r#"{"workStatus": 2, "installers": [{"userId": 1}]}"#;
        assert!(serde_json::from_str::<OrderPatch>(raw).is_err());

        let patch: OrderPatch = serde_json::from_str(r#"{"workStatus": 2}"#).unwrap();
        assert_eq!(patch.work_status, WorkStatus::new(2).ok());
    }

    #[test]
    fn setup_replaces_crews_and_keeps_unset_fields() {
        let mut order = InstallationOrder::from_load(OrderId(1), load(None));
        order.files = vec!["plan.pdf".into()];
        order.installers = vec![Assignment::new(UserId(9))];

        order.apply_setup(OrderSetup {
            deliverers: vec![Assignment::new(UserId(1))],
            ..Default::default()
        });

        assert!(order.installers.is_empty());
        assert!(order.is_assigned(UserId(1)));
        assert!(!order.is_assigned(UserId(9)));
        assert_eq!(order.files, vec!["plan.pdf"]);
    }
}
