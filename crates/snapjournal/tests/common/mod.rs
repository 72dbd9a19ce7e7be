//! Fake platform collaborators for store and controller tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use snapjournal::error::{CaptureError, ShareError, StorageError};
use snapjournal::{
    CaptureOptions, CaptureOutcome, CaptureService, CapturedImage, Clipboard, ControllerConfig,
    DeleteOutcome, Environment, FileStorage, ImageFormat, KeyValueStore, LifecycleController,
    Platform, PhotoStore, Result, ShareRequest, ShareService, StoreConfig,
};

pub const INLINE: &str = "data:image/jpeg;base64,/9j/4AAQSkZJRg==";

/// In-memory key-value store that counts writes and can be made to fail.
#[derive(Default)]
pub struct MemoryKv {
    values: Mutex<HashMap<String, String>>,
    pub sets: AtomicUsize,
    pub removes: AtomicUsize,
    pub fail_writes: AtomicBool,
}

impl MemoryKv {
    pub fn with(key: &str, value: &str) -> Self {
        let kv = Self::default();
        kv.values
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        kv
    }

    pub fn raw(&self, key: &str) -> Option<String> {
        self.values.lock().unwrap().get(key).cloned()
    }

    pub fn sets(&self) -> usize {
        self.sets.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl KeyValueStore for MemoryKv {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.raw(key))
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        self.sets.fetch_add(1, Ordering::SeqCst);
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StorageError::Io {
                message: "disk full".to_string(),
            }
            .into());
        }
        self.values
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        self.removes.fetch_add(1, Ordering::SeqCst);
        self.values.lock().unwrap().remove(key);
        Ok(())
    }
}

/// In-memory asset storage.
#[derive(Default)]
pub struct MemoryFiles {
    pub files: Mutex<HashMap<String, Vec<u8>>>,
    pub fail_writes: AtomicBool,
    pub fail_deletes: AtomicBool,
    pub fail_resolves: AtomicBool,
    pub hang_deletes: AtomicBool,
    pub deletes: AtomicUsize,
}

impl MemoryFiles {
    pub fn contains(&self, handle: &str) -> bool {
        self.files.lock().unwrap().contains_key(handle)
    }

    pub fn count(&self) -> usize {
        self.files.lock().unwrap().len()
    }
}

#[async_trait]
impl FileStorage for MemoryFiles {
    async fn write(&self, file_name: &str, bytes: &[u8]) -> Result<String> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StorageError::Unsupported {
                operation: "write".to_string(),
            }
            .into());
        }
        let handle = format!("documents:{}", file_name);
        self.files
            .lock()
            .unwrap()
            .insert(handle.clone(), bytes.to_vec());
        Ok(handle)
    }

    async fn resolve_viewable_uri(&self, handle: &str) -> Result<String> {
        if self.fail_resolves.load(Ordering::SeqCst) {
            return Err(StorageError::NotFound {
                handle: handle.to_string(),
            }
            .into());
        }
        let name = handle.trim_start_matches("documents:");
        Ok(format!("asset://localhost/data/documents/{}", name))
    }

    async fn delete(&self, handle: &str) -> Result<DeleteOutcome> {
        self.deletes.fetch_add(1, Ordering::SeqCst);
        if self.hang_deletes.load(Ordering::SeqCst) {
            tokio::time::sleep(Duration::from_secs(3600)).await;
        }
        if self.fail_deletes.load(Ordering::SeqCst) {
            return Err(StorageError::Io {
                message: "permission denied".to_string(),
            }
            .into());
        }
        match self.files.lock().unwrap().remove(handle) {
            Some(_) => Ok(DeleteOutcome::Deleted),
            None => Ok(DeleteOutcome::NotFound),
        }
    }
}

/// What the fake camera does when asked to capture.
#[derive(Clone)]
pub enum CaptureBehavior {
    Image(CapturedImage),
    Cancel,
    CancelMessage(String),
    Fail(String),
    Hang,
}

pub struct FakeCapture {
    pub behavior: Mutex<CaptureBehavior>,
}

impl FakeCapture {
    pub fn new(behavior: CaptureBehavior) -> Self {
        Self {
            behavior: Mutex::new(behavior),
        }
    }
}

#[async_trait]
impl CaptureService for FakeCapture {
    async fn capture(&self, _options: &CaptureOptions) -> Result<CaptureOutcome> {
        let behavior = self.behavior.lock().unwrap().clone();
        match behavior {
            CaptureBehavior::Image(image) => Ok(CaptureOutcome::Captured(image)),
            CaptureBehavior::Cancel => Ok(CaptureOutcome::Cancelled),
            CaptureBehavior::CancelMessage(message) | CaptureBehavior::Fail(message) => {
                Err(CaptureError::from_platform_message(message).into())
            }
            CaptureBehavior::Hang => {
                tokio::time::sleep(Duration::from_secs(3600)).await;
                Ok(CaptureOutcome::Cancelled)
            }
        }
    }
}

#[derive(Default)]
pub struct FakeShare {
    pub unavailable: AtomicBool,
    pub fail: AtomicBool,
    pub requests: Mutex<Vec<ShareRequest>>,
}

#[async_trait]
impl ShareService for FakeShare {
    fn can_share(&self) -> bool {
        !self.unavailable.load(Ordering::SeqCst)
    }

    async fn share(&self, request: ShareRequest) -> Result<()> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(ShareError::Failed {
                message: "share sheet crashed".to_string(),
            }
            .into());
        }
        self.requests.lock().unwrap().push(request);
        Ok(())
    }
}

#[derive(Default)]
pub struct FakeClipboard {
    pub text: Mutex<Option<String>>,
}

#[async_trait]
impl Clipboard for FakeClipboard {
    async fn write_text(&self, text: &str) -> Result<()> {
        *self.text.lock().unwrap() = Some(text.to_string());
        Ok(())
    }
}

/// A controller wired to fakes, with handles to every fake.
pub struct Harness {
    pub kv: Arc<MemoryKv>,
    pub files: Arc<MemoryFiles>,
    pub camera: Arc<FakeCapture>,
    pub share: Arc<FakeShare>,
    pub clipboard: Arc<FakeClipboard>,
    pub journal: LifecycleController,
}

impl Harness {
    pub fn new(environment: Environment) -> Self {
        Self::with_kv(environment, MemoryKv::default())
    }

    pub fn with_kv(environment: Environment, kv: MemoryKv) -> Self {
        let kv = Arc::new(kv);
        let files = Arc::new(MemoryFiles::default());
        let camera = Arc::new(FakeCapture::new(CaptureBehavior::Image(jpeg(b"camera"))));
        let share = Arc::new(FakeShare::default());
        let clipboard = Arc::new(FakeClipboard::default());

        let store = Arc::new(PhotoStore::new(
            kv.clone(),
            environment,
            StoreConfig::default(),
        ));
        let platform = Platform {
            capture: camera.clone(),
            files: files.clone(),
            share: share.clone(),
            clipboard: clipboard.clone(),
        };
        let config = ControllerConfig {
            collaborator_timeout: Duration::from_secs(5),
        };
        let journal = LifecycleController::new(store, environment, platform, config);

        Self {
            kv,
            files,
            camera,
            share,
            clipboard,
            journal,
        }
    }

    pub fn set_capture(&self, behavior: CaptureBehavior) {
        *self.camera.behavior.lock().unwrap() = behavior;
    }

    pub fn persisted(&self) -> Vec<serde_json::Value> {
        let raw = self.kv.raw("photos").expect("photos key is persisted");
        serde_json::from_str(&raw).unwrap()
    }
}

pub fn jpeg(bytes: &[u8]) -> CapturedImage {
    CapturedImage::new(bytes.to_vec(), ImageFormat::Jpeg)
}
