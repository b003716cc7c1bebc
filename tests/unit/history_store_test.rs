//! Unit tests for the HistoryStore public API.
//!
//! These exercise load/append/clear through `HistoryStoreTrait`, the corrupt
//! data policies and write-failure reporting.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use qrscan::managers::history_store::{HistoryStore, HistoryStoreTrait};
use qrscan::storage::{KeyValueStore, MemoryKeyValueStore};
use qrscan::types::errors::{HistoryError, StorageError};
use qrscan::types::scan::ScanRecord;
use qrscan::types::settings::{CorruptHistoryPolicy, HistorySettings};

/// Memory store whose reads or writes can be switched to fail.
#[derive(Default)]
struct FlakyStore {
    inner: MemoryKeyValueStore,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
}

#[async_trait]
impl KeyValueStore for FlakyStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(StorageError::DatabaseError("read failed".to_string()));
        }
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StorageError::DatabaseError("disk full".to_string()));
        }
        self.inner.set(key, value).await
    }

    async fn delete(&self, key: &str) -> Result<(), StorageError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StorageError::DatabaseError("disk full".to_string()));
        }
        self.inner.delete(key).await
    }
}

fn setup() -> (Arc<MemoryKeyValueStore>, HistoryStore) {
    let kv = Arc::new(MemoryKeyValueStore::new());
    let history = HistoryStore::new(kv.clone());
    (kv, history)
}

fn strict(kv: Arc<dyn KeyValueStore>) -> HistoryStore {
    let settings = HistorySettings {
        on_corrupt: CorruptHistoryPolicy::Fail,
        ..HistorySettings::default()
    };
    HistoryStore::with_settings(kv, "qrList", settings)
}

#[tokio::test]
async fn test_load_all_on_absent_key_is_empty() {
    let (_, history) = setup();
    assert_eq!(history.load_all().await.unwrap(), Vec::<ScanRecord>::new());
    assert!(history.is_empty().await.unwrap());
}

#[tokio::test]
async fn test_append_returns_updated_list_in_order() {
    let (_, history) = setup();

    let first = ScanRecord::new("https://a.com", "2024-01-01 10:00:00");
    let second = ScanRecord::new("https://b.com", "2024-01-01 10:05:00");

    let after_first = history.append(first.clone()).await.unwrap();
    assert_eq!(after_first, vec![first.clone()]);

    let after_second = history.append(second.clone()).await.unwrap();
    assert_eq!(after_second, vec![first.clone(), second.clone()]);

    assert_eq!(history.load_all().await.unwrap(), vec![first, second]);

    history.clear().await.unwrap();
    assert!(history.load_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_history_is_stored_as_json_array_under_key() {
    let (kv, history) = setup();
    history
        .append(ScanRecord::new("plain text, not a url", "t1"))
        .await
        .unwrap();

    let blob = kv.get("qrList").await.unwrap().unwrap();
    assert_eq!(blob, r#"[{"url":"plain text, not a url","timestamp":"t1"}]"#);
}

#[tokio::test]
async fn test_clear_removes_key_and_is_idempotent() {
    let (kv, history) = setup();
    history.append(ScanRecord::new("x", "t")).await.unwrap();

    history.clear().await.unwrap();
    assert!(!kv.contains("qrList").await.unwrap(), "key must be absent, not empty");

    history.clear().await.unwrap();
    assert!(!kv.contains("qrList").await.unwrap());
    assert!(history.load_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_custom_key_is_used() {
    let kv = Arc::new(MemoryKeyValueStore::new());
    let history = HistoryStore::with_settings(kv.clone(), "scans", HistorySettings::default());
    history.append(ScanRecord::new("x", "t")).await.unwrap();

    assert_eq!(history.key(), "scans");
    assert!(kv.contains("scans").await.unwrap());
    assert!(!kv.contains("qrList").await.unwrap());
}

#[tokio::test]
async fn test_corrupt_blob_treated_as_empty_by_default() {
    let (kv, history) = setup();
    kv.set("qrList", "{definitely not json").await.unwrap();

    assert!(history.load_all().await.unwrap().is_empty());

    // the next append starts a fresh list
    let records = history.append(ScanRecord::new("x", "t")).await.unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(history.load_all().await.unwrap(), records);
}

#[tokio::test]
async fn test_corrupt_blob_surfaces_with_fail_policy() {
    let kv = Arc::new(MemoryKeyValueStore::new());
    kv.set("qrList", "[1, 2, 3]").await.unwrap();
    let history = strict(kv.clone());

    assert!(matches!(
        history.load_all().await,
        Err(HistoryError::CorruptData(_))
    ));
    assert!(matches!(
        history.append(ScanRecord::new("x", "t")).await,
        Err(HistoryError::CorruptData(_))
    ));
    // the corrupt blob is left alone
    assert_eq!(kv.get("qrList").await.unwrap().as_deref(), Some("[1, 2, 3]"));
}

#[tokio::test]
async fn test_read_failure_on_load_treated_as_empty() {
    let kv = Arc::new(FlakyStore::default());
    let history = HistoryStore::new(kv.clone());
    history.append(ScanRecord::new("x", "t")).await.unwrap();

    kv.fail_reads.store(true, Ordering::SeqCst);
    assert!(history.load_all().await.unwrap().is_empty());

    let strict_history = strict(kv.clone());
    assert!(matches!(
        strict_history.load_all().await,
        Err(HistoryError::StorageError(_))
    ));
}

#[tokio::test]
async fn test_read_failure_on_append_is_surfaced() {
    let kv = Arc::new(FlakyStore::default());
    let history = HistoryStore::new(kv.clone());
    history.append(ScanRecord::new("kept", "t")).await.unwrap();

    kv.fail_reads.store(true, Ordering::SeqCst);
    let result = history.append(ScanRecord::new("new", "t")).await;
    assert!(matches!(result, Err(HistoryError::StorageError(_))));

    kv.fail_reads.store(false, Ordering::SeqCst);
    let urls: Vec<String> = history
        .load_all()
        .await
        .unwrap()
        .into_iter()
        .map(|r| r.url)
        .collect();
    assert_eq!(urls, vec!["kept"]);
}

#[tokio::test]
async fn test_write_failure_is_surfaced() {
    let kv = Arc::new(FlakyStore::default());
    let history = HistoryStore::new(kv.clone());

    kv.fail_writes.store(true, Ordering::SeqCst);
    let result = history.append(ScanRecord::new("x", "t")).await;
    assert_eq!(
        result,
        Err(HistoryError::StorageError(
            "Storage database error: disk full".to_string()
        ))
    );
    assert!(history.clear().await.is_err());

    kv.fail_writes.store(false, Ordering::SeqCst);
    assert!(history.load_all().await.unwrap().is_empty());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_appends_are_not_lost() {
    let kv = Arc::new(MemoryKeyValueStore::new());
    let history = Arc::new(HistoryStore::new(kv));

    let mut handles = Vec::new();
    for i in 0..32 {
        let history = Arc::clone(&history);
        handles.push(tokio::spawn(async move {
            history
                .append(ScanRecord::new(format!("code-{}", i), "t"))
                .await
        }));
    }
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    let records = history.load_all().await.unwrap();
    assert_eq!(records.len(), 32);
    for i in 0..32 {
        let url = format!("code-{}", i);
        assert!(records.iter().any(|r| r.url == url), "missing {}", url);
    }
}
