//! Photo record store tests.

mod common;

use std::sync::Arc;
use std::sync::atomic::Ordering;

use futures_util::StreamExt;
use serde_json::json;
use tempfile::TempDir;

use snapjournal::{
    Environment, PhotoId, PhotoList, PhotoListUpdates, PhotoRecord, PhotoStore, Staleness,
    StoreConfig,
};
use snapjournal_file::FileKeyValueStore;

use common::{INLINE, MemoryKv};

fn inline_record(id: &str, title: &str, timestamp: i64) -> PhotoRecord {
    PhotoRecord {
        id: PhotoId::new(id).unwrap(),
        title: title.to_string(),
        timestamp,
        storage_ref: INLINE.to_string(),
        display_ref: Some(INLINE.to_string()),
    }
}

fn referenced_record(id: &str) -> PhotoRecord {
    PhotoRecord {
        id: PhotoId::new(id).unwrap(),
        title: String::new(),
        timestamp: 1,
        storage_ref: format!("documents:photo_{}.jpeg", id),
        display_ref: Some(format!("asset://localhost/data/documents/photo_{}.jpeg", id)),
    }
}

fn store_over(kv: Arc<MemoryKv>, environment: Environment) -> PhotoStore {
    PhotoStore::new(kv, environment, StoreConfig::default())
}

#[tokio::test]
async fn test_load_missing_key_is_empty() {
    let kv = Arc::new(MemoryKv::default());
    let store = store_over(kv.clone(), Environment::HostedWeb);

    let report = store.load().await.unwrap();

    assert!(store.is_empty());
    assert_eq!(report, Default::default());
    assert_eq!(kv.sets(), 0);
}

#[tokio::test]
async fn test_save_then_load_round_trips() {
    let tmp = TempDir::new().unwrap();
    let kv = Arc::new(FileKeyValueStore::new(tmp.path()));
    let records = vec![
        inline_record("3", "third", 3),
        referenced_record("2"),
        inline_record("1", "", 1),
    ];

    let writer = PhotoStore::new(kv.clone(), Environment::NativeMobile, StoreConfig::default());
    writer.save(&records).await;

    let reader = PhotoStore::new(kv, Environment::NativeMobile, StoreConfig::default());
    let report = reader.load().await.unwrap();

    assert_eq!(report.kept, 3);
    assert_eq!(report.dropped(), 0);
    assert_eq!(*reader.snapshot(), records);
}

#[tokio::test]
async fn test_load_drops_stale_records_and_repersists() {
    let blob = json!([
        {
            "id": "2",
            "title": "old",
            "timestamp": 2,
            "storageRef": "documents:photo_2.jpeg",
            "displayRef": "file:///data/user/0/app/files/photo_2.jpeg"
        },
        {
            "id": "1",
            "title": "kept",
            "timestamp": 1,
            "storageRef": INLINE,
            "displayRef": INLINE
        }
    ]);
    let kv = Arc::new(MemoryKv::with("photos", &blob.to_string()));
    let store = store_over(kv.clone(), Environment::NativeMobile);

    let report = store.load().await.unwrap();

    assert_eq!(report.kept, 1);
    assert_eq!(
        report.stale,
        vec![(PhotoId::new("2").unwrap(), Staleness::FileScheme)]
    );
    assert_eq!(store.len(), 1);
    assert_eq!(store.snapshot()[0].title, "kept");

    let persisted: Vec<PhotoRecord> = serde_json::from_str(&kv.raw("photos").unwrap()).unwrap();
    assert_eq!(persisted.len(), 1);
    assert_eq!(persisted[0].id.as_str(), "1");
}

#[tokio::test]
async fn test_load_is_idempotent() {
    let blob = json!([
        {"id": "3", "title": "", "timestamp": 3, "storageRef": "http://localhost:8100/photo_3.jpeg", "displayRef": "http://localhost:8100/photo_3.jpeg"},
        {"id": "2", "title": "", "timestamp": 2, "storageRef": INLINE, "displayRef": "photo_2.jpeg"},
        {"id": "1", "title": "", "timestamp": 1, "storageRef": INLINE, "displayRef": INLINE}
    ]);
    let kv = Arc::new(MemoryKv::with("photos", &blob.to_string()));
    let store = store_over(kv.clone(), Environment::HostedWeb);

    let first = store.load().await.unwrap();
    let first_list = store.snapshot();
    let writes_after_first = kv.sets();

    let second = store.load().await.unwrap();

    assert_eq!(first.dropped(), 2);
    assert_eq!(writes_after_first, 1);
    assert_eq!(second.dropped(), 0);
    assert_eq!(kv.sets(), writes_after_first);
    assert_eq!(*store.snapshot(), *first_list);
}

#[tokio::test]
async fn test_referenced_records_dropped_in_hosted_web() {
    let blob = serde_json::to_string(&vec![referenced_record("1")]).unwrap();
    let kv = Arc::new(MemoryKv::with("photos", &blob));
    let store = store_over(kv, Environment::HostedWeb);

    let report = store.load().await.unwrap();

    assert_eq!(
        report.stale,
        vec![(PhotoId::new("1").unwrap(), Staleness::ForeignEnvironment)]
    );
    assert!(store.is_empty());
}

#[tokio::test]
async fn test_corrupt_blob_resets_and_erases_key() {
    let kv = Arc::new(MemoryKv::with("photos", "{not json"));
    let store = store_over(kv.clone(), Environment::HostedWeb);

    let report = store.load().await.unwrap();

    assert!(report.reset);
    assert!(store.is_empty());
    assert_eq!(kv.raw("photos"), None);
    assert_eq!(kv.removes.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_malformed_entry_does_not_erase_list() {
    let blob = json!([
        {"id": "1700000000001", "title": "kept", "timestamp": 1, "storageRef": INLINE, "displayRef": INLINE},
        {"id": "legacy.2", "title": null, "timestamp": 2, "storageRef": INLINE, "displayRef": INLINE},
        {"id": "1700000000003", "title": "no time", "storageRef": INLINE},
        {"id": "has space", "title": "bad id", "timestamp": 4, "storageRef": INLINE},
        "not a record"
    ])
    .to_string();
    let kv = Arc::new(MemoryKv::with("photos", &blob));
    let store = store_over(kv.clone(), Environment::HostedWeb);

    let report = store.load().await.unwrap();

    assert!(!report.reset);
    assert_eq!(report.malformed, 3);
    assert_eq!(report.kept, 2);
    let ids: Vec<_> = store.snapshot().iter().map(|r| r.id.to_string()).collect();
    assert_eq!(ids, vec!["1700000000001", "legacy.2"]);
    assert_eq!(store.snapshot()[1].title, "");

    // Only the decodable records are persisted back
    let persisted: Vec<PhotoRecord> = serde_json::from_str(&kv.raw("photos").unwrap()).unwrap();
    assert_eq!(persisted.len(), 2);
    assert_eq!(kv.removes.load(Ordering::SeqCst), 0);

    // Nothing left to drop on the next load
    let again = store.load().await.unwrap();
    assert_eq!(again.dropped(), 0);
}

#[tokio::test]
async fn test_non_list_blob_resets() {
    let kv = Arc::new(MemoryKv::with("photos", r#"{"photos": []}"#));
    let store = store_over(kv.clone(), Environment::HostedWeb);

    let report = store.load().await.unwrap();

    assert!(report.reset);
    assert_eq!(kv.raw("photos"), None);
}

#[tokio::test]
async fn test_load_drops_duplicate_ids() {
    let blob = serde_json::to_string(&vec![
        inline_record("1", "first", 2),
        inline_record("1", "second", 1),
    ])
    .unwrap();
    let kv = Arc::new(MemoryKv::with("photos", &blob));
    let store = store_over(kv, Environment::HostedWeb);

    let report = store.load().await.unwrap();

    assert_eq!(report.duplicates, vec![PhotoId::new("1").unwrap()]);
    assert_eq!(store.len(), 1);
    assert_eq!(store.snapshot()[0].title, "first");
}

#[tokio::test]
async fn test_append_prepends_and_persists() {
    let kv = Arc::new(MemoryKv::default());
    let store = store_over(kv.clone(), Environment::HostedWeb);

    store.append(inline_record("1", "a", 1)).await.unwrap();
    store.append(inline_record("2", "b", 2)).await.unwrap();

    let ids: Vec<_> = store.snapshot().iter().map(|r| r.id.to_string()).collect();
    assert_eq!(ids, vec!["2", "1"]);

    let persisted: Vec<PhotoRecord> = serde_json::from_str(&kv.raw("photos").unwrap()).unwrap();
    assert_eq!(persisted, *store.snapshot());
}

#[tokio::test]
async fn test_append_rejects_duplicate_id() {
    let kv = Arc::new(MemoryKv::default());
    let store = store_over(kv, Environment::HostedWeb);

    store.append(inline_record("1", "a", 1)).await.unwrap();
    assert!(store.append(inline_record("1", "b", 2)).await.is_err());
    assert_eq!(store.len(), 1);
}

#[tokio::test]
async fn test_remove_absent_is_noop() {
    let kv = Arc::new(MemoryKv::default());
    let store = store_over(kv.clone(), Environment::HostedWeb);
    store.append(inline_record("1", "a", 1)).await.unwrap();
    let writes = kv.sets();

    assert!(!store.remove(&PhotoId::new("9").unwrap()).await);
    assert_eq!(store.len(), 1);
    assert_eq!(kv.sets(), writes);

    assert!(store.remove(&PhotoId::new("1").unwrap()).await);
    assert!(!store.remove(&PhotoId::new("1").unwrap()).await);
    assert!(store.is_empty());
}

#[tokio::test]
async fn test_update_title_allows_empty() {
    let kv = Arc::new(MemoryKv::default());
    let store = store_over(kv, Environment::HostedWeb);
    store.append(inline_record("1", "a", 1)).await.unwrap();
    let id = PhotoId::new("1").unwrap();

    assert!(store.update_title(&id, "   ").await);
    assert_eq!(store.get(&id).unwrap().title, "   ");

    assert!(!store.update_title(&PhotoId::new("2").unwrap(), "x").await);
}

#[tokio::test]
async fn test_write_failure_keeps_memory_ahead() {
    let kv = Arc::new(MemoryKv::default());
    let store = store_over(kv.clone(), Environment::HostedWeb);
    store.append(inline_record("1", "a", 1)).await.unwrap();

    kv.fail_writes.store(true, Ordering::SeqCst);
    store.append(inline_record("2", "b", 2)).await.unwrap();

    assert_eq!(store.len(), 2);
    let persisted: Vec<PhotoRecord> = serde_json::from_str(&kv.raw("photos").unwrap()).unwrap();
    assert_eq!(persisted.len(), 1);

    // The next successful write reconciles.
    kv.fail_writes.store(false, Ordering::SeqCst);
    store
        .update_title(&PhotoId::new("1").unwrap(), "renamed")
        .await;
    let persisted: Vec<PhotoRecord> = serde_json::from_str(&kv.raw("photos").unwrap()).unwrap();
    assert_eq!(persisted.len(), 2);
}

#[tokio::test]
async fn test_subscribers_see_each_mutation() {
    let kv = Arc::new(MemoryKv::default());
    let store = store_over(kv, Environment::HostedWeb);
    let mut rx = store.subscribe();

    store.append(inline_record("1", "a", 1)).await.unwrap();
    rx.changed().await.unwrap();
    assert_eq!(rx.borrow_and_update().len(), 1);

    store.remove(&PhotoId::new("1").unwrap()).await;
    rx.changed().await.unwrap();
    assert!(rx.borrow_and_update().is_empty());
}

#[tokio::test]
async fn test_update_stream_yields_new_lists() {
    let kv = Arc::new(MemoryKv::default());
    let store = Arc::new(store_over(kv, Environment::HostedWeb));
    let mut updates = store.updates();

    store.append(inline_record("1", "a", 1)).await.unwrap();
    let list = next_list(&mut updates).await;
    assert_eq!(list.len(), 1);

    store
        .update_title(&PhotoId::new("1").unwrap(), "b")
        .await;
    let list = next_list(&mut updates).await;
    assert_eq!(list[0].title, "b");
}

async fn next_list(updates: &mut (impl PhotoListUpdates + Unpin)) -> PhotoList {
    updates.next().await.expect("update stream ended")
}

#[tokio::test]
async fn test_concurrent_removes_do_not_lose_updates() {
    let kv = Arc::new(MemoryKv::default());
    let store = Arc::new(store_over(kv.clone(), Environment::HostedWeb));
    for i in 0..10 {
        store
            .append(inline_record(&i.to_string(), "", i))
            .await
            .unwrap();
    }

    let mut tasks = Vec::new();
    for i in (0..10).step_by(2) {
        let store = store.clone();
        tasks.push(tokio::spawn(async move {
            store.remove(&PhotoId::new(i.to_string()).unwrap()).await
        }));
    }
    for task in tasks {
        assert!(task.await.unwrap());
    }

    let ids: Vec<_> = store.snapshot().iter().map(|r| r.id.to_string()).collect();
    assert_eq!(ids, vec!["9", "7", "5", "3", "1"]);

    let persisted: Vec<PhotoRecord> = serde_json::from_str(&kv.raw("photos").unwrap()).unwrap();
    assert_eq!(persisted, *store.snapshot());
}
