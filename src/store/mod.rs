//! Document store module
//!
//! A single file on durable storage, treated as an opaque byte blob.
//! All access goes through a read-write lock: reads share, writes are
//! exclusive, so a reader never observes a partially written document
//! and concurrent writes apply fully in some order.

use std::io;
use std::path::{Path, PathBuf};
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;
use tokio::sync::RwLock;

/// File-backed store for the single document
pub struct DocumentStore {
    path: PathBuf,
    lock: RwLock<()>,
}

impl DocumentStore {
    /// Open the store, creating an empty document if none exists.
    ///
    /// This is the startup precondition: it must run before the server
    /// accepts connections, and any failure here is fatal to the process.
    pub fn open(path: impl Into<PathBuf>) -> io::Result<Self> {
        let path = path.into();

        match std::fs::metadata(&path) {
            Ok(_) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                if let Some(parent) = path.parent() {
                    if !parent.as_os_str().is_empty() {
                        std::fs::create_dir_all(parent)?;
                    }
                }
                std::fs::File::create(&path)?;
            }
            Err(e) => return Err(e),
        }

        Ok(Self {
            path,
            lock: RwLock::new(()),
        })
    }

    /// Read the full current document
    pub async fn read(&self) -> io::Result<Vec<u8>> {
        let _guard = self.lock.read().await;
        tokio::fs::read(&self.path).await
    }

    /// Replace the document contents byte-for-byte.
    ///
    /// Opens with truncate and without create, matching the startup
    /// contract: the file exists from `open` onward, and a document
    /// removed behind the server's back surfaces as an open error
    /// rather than silently reappearing.
    pub async fn write(&self, content: &[u8]) -> io::Result<()> {
        let _guard = self.lock.write().await;
        let mut file = OpenOptions::new()
            .write(true)
            .truncate(true)
            .open(&self.path)
            .await?;
        file.write_all(content).await?;
        file.flush().await
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
