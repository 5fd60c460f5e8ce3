//! # File Storage
//!
//! Orders carry documents (plans, photos) that live outside the stores: uploaded blobs keyed
//! by order number, and a browsable folder tree on a file server. [`FileStore`] is the seam to
//! both; [`MemoryFileStore`] keeps everything in memory and can be told to fail uploads.

use crate::model::InstallationOrder;
use async_trait::async_trait;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt::Display;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Clone, Error, PartialEq)]
pub enum FileStoreError {
    #[error("Upload failed for order {order_number}: {reason}")]
    Upload { order_number: String, reason: String },

    #[error("Could not delete files of order {order_number}: {reason}")]
    Delete { order_number: String, reason: String },

    #[error("Could not list {path}: {reason}")]
    List { path: String, reason: String },
}

/// Folder of an order on the file server: `{root}/{year}/{customer}/{ship name} - {order number}`.
///
/// Segments are trimmed and path separators inside them are replaced with `-`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct StoragePath {
    pub root: String,
    pub year: i32,
    pub customer: String,
    pub folder: String,
}

fn segment(raw: &str) -> String {
    raw.trim().replace(['/', '\\'], "-")
}

impl StoragePath {
    pub fn for_order(root: &str, order: &InstallationOrder) -> Self {
        use chrono::Datelike;

        Self {
            root: root.trim_end_matches('/').to_string(),
            year: order.entry_date.year(),
            customer: segment(&order.customer),
            folder: format!(
                "{} - {}",
                segment(&order.ship_name),
                segment(&order.order_number)
            ),
        }
    }

    pub fn to_path_buf(&self) -> PathBuf {
        let year = self.year.to_string();
        [
            self.root.as_str(),
            year.as_str(),
            self.customer.as_str(),
            self.folder.as_str(),
        ]
        .into_iter()
        .collect()
    }
}

impl Display for StoragePath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}/{}/{}", self.root, self.year, self.customer, self.folder)
    }
}

#[async_trait]
pub trait FileStore: Send + Sync {
    /// Stores `files` (read from `local_path` when given) under the order's key.
    /// Uploading a file that is already stored replaces it.
    async fn upload(
        &self,
        order_number: &str,
        local_path: Option<&str>,
        files: &[String],
    ) -> Result<(), FileStoreError>;

    /// Drops every blob of the order. Succeeds when there is nothing to drop.
    async fn delete_directory(&self, order_number: &str) -> Result<(), FileStoreError>;

    /// Names of the documents in an order folder. An absent folder lists as empty.
    async fn list_files(&self, path: &StoragePath) -> Result<Vec<String>, FileStoreError>;
}

/// In-memory [`FileStore`].
#[derive(Debug, Default)]
pub struct MemoryFileStore {
    blobs: Mutex<HashMap<String, Vec<String>>>,
    folders: Mutex<HashMap<String, Vec<String>>>,
    fail_uploads: AtomicBool,
}

impl MemoryFileStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every following upload fail until switched off again.
    pub fn fail_uploads(&self, fail: bool) {
        self.fail_uploads.store(fail, Ordering::SeqCst);
    }

    /// Blobs stored for an order.
    pub fn stored(&self, order_number: &str) -> Vec<String> {
        self.blobs
            .lock()
            .map(|blobs| blobs.get(order_number).cloned().unwrap_or_default())
            .unwrap_or_default()
    }

    /// Puts documents into a folder of the file server.
    pub fn add_to_folder(&self, path: &StoragePath, files: &[&str]) {
        if let Ok(mut folders) = self.folders.lock() {
            folders
                .entry(path.to_string())
                .or_default()
                .extend(files.iter().map(|f| f.to_string()));
        }
    }
}

#[async_trait]
impl FileStore for MemoryFileStore {
    async fn upload(
        &self,
        order_number: &str,
        local_path: Option<&str>,
        files: &[String],
    ) -> Result<(), FileStoreError> {
        if self.fail_uploads.load(Ordering::SeqCst) {
            return Err(FileStoreError::Upload {
                order_number: order_number.to_string(),
                reason: "storage unavailable".into(),
            });
        }
        let mut blobs = self.blobs.lock().map_err(|e| FileStoreError::Upload {
            order_number: order_number.to_string(),
            reason: e.to_string(),
        })?;
        let stored = blobs.entry(order_number.to_string()).or_default();
        for file in files {
            if !stored.contains(file) {
                stored.push(file.clone());
            }
        }
        info!(order_number, ?local_path, count = files.len(), "Files uploaded");
        Ok(())
    }

    async fn delete_directory(&self, order_number: &str) -> Result<(), FileStoreError> {
        let mut blobs = self.blobs.lock().map_err(|e| FileStoreError::Delete {
            order_number: order_number.to_string(),
            reason: e.to_string(),
        })?;
        let removed = blobs.remove(order_number).map_or(0, |files| files.len());
        info!(order_number, removed, "Directory deleted");
        Ok(())
    }

    async fn list_files(&self, path: &StoragePath) -> Result<Vec<String>, FileStoreError> {
        let folders = self.folders.lock().map_err(|e| FileStoreError::List {
            path: path.to_string(),
            reason: e.to_string(),
        })?;
        let files = folders.get(&path.to_string()).cloned().unwrap_or_default();
        debug!(%path, count = files.len(), "Folder listed");
        Ok(files)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{OrderId, OrderLoad, WorkStatus};
    use chrono::NaiveDate;

    fn order(ship_name: &str, customer: &str) -> InstallationOrder {
        InstallationOrder::from_load(
            OrderId(1),
            OrderLoad {
                order_number: "100234".into(),
                customer: customer.into(),
                ship_name: ship_name.into(),
                ship_address: "1 Main St".into(),
                entry_date: NaiveDate::from_ymd_opt(2023, 11, 2).unwrap(),
                work_status: WorkStatus::NEW,
                order_details: None,
                check_items: Vec::new(),
            },
        )
    }

    #[test]
    fn storage_path_is_built_from_order_fields() {
        let path = StoragePath::for_order("/srv/jobs/", &order("  Jane Roe ", "Acme"));
        assert_eq!(path.to_string(), "/srv/jobs/2023/Acme/Jane Roe - 100234");
        assert_eq!(
            path.to_path_buf(),
            PathBuf::from("/srv/jobs/2023/Acme/Jane Roe - 100234")
        );
    }

    #[test]
    fn separators_in_names_stay_inside_one_segment() {
        let path = StoragePath::for_order("root", &order("A/B", "C\\D"));
        assert_eq!(path.customer, "C-D");
        assert_eq!(path.folder, "A-B - 100234");
    }

    #[tokio::test]
    async fn reupload_does_not_duplicate_blobs() {
        let store = MemoryFileStore::new();
        let files = vec!["plan.pdf".to_string()];
        store.upload("100234", None, &files).await.unwrap();
        store.upload("100234", Some("/tmp"), &files).await.unwrap();
        assert_eq!(store.stored("100234"), files);

        store.delete_directory("100234").await.unwrap();
        assert!(store.stored("100234").is_empty());
        store.delete_directory("100234").await.unwrap();
    }

    #[tokio::test]
    async fn injected_failure_rejects_uploads() {
        let store = MemoryFileStore::new();
        store.fail_uploads(true);
        let err = store
            .upload("100234", None, &["a.pdf".to_string()])
            .await
            .unwrap_err();
        assert!(matches!(err, FileStoreError::Upload { .. }));
        assert!(store.stored("100234").is_empty());
    }
}
