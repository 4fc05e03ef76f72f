//! Local library of saved screenshots and recordings
//!
//! The library is a single JSON array of items, each carrying its payload as
//! a base64 data URL. Every mutation rewrites the whole file. A save that
//! would exceed the configured quota is refused and the in-memory list is
//! rolled back; deletes are never subject to the quota.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::capture::Recording;
use crate::export::{data_url, parse_data_url, png_data_url};

#[derive(Debug, thiserror::Error)]
pub enum LibraryError {
    #[error("Storage quota exceeded. Please delete some items.")]
    QuotaExceeded { needed: u64, quota: u64 },
    #[error("no library item with id {0}")]
    NotFound(i64),
    #[error("library item {0} has an unreadable payload")]
    InvalidPayload(i64),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    Screenshot,
    Recording,
}

impl ItemKind {
    fn file_prefix(self) -> &'static str {
        match self {
            ItemKind::Screenshot => "screenshot",
            ItemKind::Recording => "recording",
        }
    }

    fn extension(self) -> &'static str {
        match self {
            ItemKind::Screenshot => "png",
            ItemKind::Recording => "webm",
        }
    }
}

/// One saved capture
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LibraryItem {
    /// Millisecond creation timestamp, unique within the library
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: ItemKind,
    /// Payload as a `data:<mime>;base64,` URL
    pub data: String,
    pub timestamp: DateTime<Utc>,
}

impl LibraryItem {
    /// File name used when exporting, e.g. `recording-1700000000000.webm`
    pub fn file_name(&self) -> String {
        format!(
            "{}-{}.{}",
            self.kind.file_prefix(),
            self.id,
            self.kind.extension()
        )
    }

    /// Local time label shown in listings
    pub fn display_time(&self) -> String {
        self.timestamp
            .with_timezone(&chrono::Local)
            .format("%Y-%m-%d %H:%M:%S")
            .to_string()
    }
}

#[derive(Debug, Clone)]
pub struct Library {
    path: PathBuf,
    quota_bytes: u64,
    /// Oldest first, as stored on disk
    items: Vec<LibraryItem>,
}

impl Library {
    /// Open the library at `path`
    ///
    /// A missing file is an empty library. An unreadable or corrupt file is
    /// logged and also treated as empty.
    pub fn open(path: impl Into<PathBuf>, quota_bytes: u64) -> Self {
        let path = path.into();
        let items = match fs::read(&path) {
            Ok(bytes) => match serde_json::from_slice::<Vec<LibraryItem>>(&bytes) {
                Ok(items) => items,
                Err(err) => {
                    log::error!("Error loading library {}: {}", path.display(), err);
                    Vec::new()
                }
            },
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Vec::new(),
            Err(err) => {
                log::error!("Error loading library {}: {}", path.display(), err);
                Vec::new()
            }
        };
        log::debug!("Library {} has {} item(s)", path.display(), items.len());
        Self {
            path,
            quota_bytes,
            items,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Items, newest first
    pub fn items(&self) -> impl Iterator<Item = &LibraryItem> {
        self.items.iter().rev()
    }

    pub fn get(&self, id: i64) -> Option<&LibraryItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Save an encoded PNG as a screenshot item
    pub fn add_screenshot(&mut self, png: &[u8]) -> Result<&LibraryItem, LibraryError> {
        self.add(ItemKind::Screenshot, png_data_url(png))
    }

    /// Save a finished recording
    pub fn add_recording(&mut self, recording: &Recording) -> Result<&LibraryItem, LibraryError> {
        self.add(
            ItemKind::Recording,
            data_url(&recording.mime, &recording.bytes),
        )
    }

    /// Remove an item
    pub fn delete(&mut self, id: i64) -> Result<LibraryItem, LibraryError> {
        let index = self
            .items
            .iter()
            .position(|item| item.id == id)
            .ok_or(LibraryError::NotFound(id))?;
        let removed = self.items.remove(index);
        if let Err(err) = self.persist() {
            self.items.insert(index, removed);
            return Err(err);
        }
        log::info!("Deleted library item {id}");
        Ok(removed)
    }

    /// Decode an item's data URL into its MIME type and raw bytes
    pub fn decode_payload(item: &LibraryItem) -> Result<(String, Vec<u8>), LibraryError> {
        parse_data_url(&item.data)
            .map(|(mime, bytes)| (mime.to_string(), bytes))
            .ok_or(LibraryError::InvalidPayload(item.id))
    }

    /// Write an item's payload into `dir` under its export file name
    pub fn export_item(&self, id: i64, dir: &Path) -> Result<PathBuf, LibraryError> {
        let item = self.get(id).ok_or(LibraryError::NotFound(id))?;
        let (_, bytes) = Self::decode_payload(item)?;
        fs::create_dir_all(dir)?;
        let target = dir.join(item.file_name());
        fs::write(&target, bytes)?;
        log::info!("Exported library item {} to {}", id, target.display());
        Ok(target)
    }

    fn add(&mut self, kind: ItemKind, data: String) -> Result<&LibraryItem, LibraryError> {
        let timestamp = Utc::now();
        let id = self.fresh_id(timestamp.timestamp_millis());
        self.items.push(LibraryItem {
            id,
            kind,
            data,
            timestamp,
        });
        if let Err(err) = self.persist_checked() {
            self.items.pop();
            log::warn!("Saving {kind:?} to library failed: {err}");
            return Err(err);
        }
        log::info!("Saved {kind:?} {id} to library");
        Ok(&self.items[self.items.len() - 1])
    }

    /// Millisecond ids collide when two saves land in the same tick
    fn fresh_id(&self, millis: i64) -> i64 {
        match self.items.iter().map(|item| item.id).max() {
            Some(last) if last >= millis => last + 1,
            _ => millis,
        }
    }

    /// Write the library, refusing if the result would exceed the quota
    fn persist_checked(&self) -> Result<(), LibraryError> {
        let bytes = serde_json::to_vec(&self.items)?;
        let needed = bytes.len() as u64;
        if needed > self.quota_bytes {
            return Err(LibraryError::QuotaExceeded {
                needed,
                quota: self.quota_bytes,
            });
        }
        self.write(&bytes)
    }

    /// Write the library without a quota check, used for removals
    fn persist(&self) -> Result<(), LibraryError> {
        let bytes = serde_json::to_vec(&self.items)?;
        self.write(&bytes)
    }

    fn write(&self, bytes: &[u8]) -> Result<(), LibraryError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, bytes)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MIB: u64 = 1024 * 1024;

    fn temp_library(quota: u64) -> (tempfile::TempDir, Library) {
        let temp = tempfile::tempdir().expect("temp dir should be created");
        let library = Library::open(temp.path().join("sharey-library.json"), quota);
        (temp, library)
    }

    #[test]
    fn missing_file_is_empty() {
        let (_temp, library) = temp_library(MIB);
        assert!(library.is_empty());
    }

    #[test]
    fn corrupt_file_is_empty() {
        let temp = tempfile::tempdir().expect("temp dir should be created");
        let path = temp.path().join("sharey-library.json");
        fs::write(&path, b"{not json").expect("write should succeed");
        let library = Library::open(&path, MIB);
        assert!(library.is_empty());
    }

    #[test]
    fn items_persist_and_list_newest_first() {
        let (temp, mut library) = temp_library(MIB);
        let first = library.add_screenshot(b"png-1").expect("save should succeed").id;
        let second = library
            .add_recording(&Recording::webm(b"webm-1".to_vec()))
            .expect("save should succeed")
            .id;
        assert!(second > first);

        let reopened = Library::open(temp.path().join("sharey-library.json"), MIB);
        let ids: Vec<i64> = reopened.items().map(|item| item.id).collect();
        assert_eq!(ids, vec![second, first]);
        assert_eq!(reopened.get(second).map(|i| i.kind), Some(ItemKind::Recording));
    }

    #[test]
    fn stored_json_uses_type_field() {
        let (temp, mut library) = temp_library(MIB);
        library.add_screenshot(b"png").expect("save should succeed");
        let raw = fs::read_to_string(temp.path().join("sharey-library.json"))
            .expect("library file should exist");
        let value: serde_json::Value = serde_json::from_str(&raw).expect("valid json");
        assert_eq!(value[0]["type"], "screenshot");
        assert!(
            value[0]["data"]
                .as_str()
                .is_some_and(|d| d.starts_with("data:image/png;base64,"))
        );
    }

    #[test]
    fn payload_decodes_back() {
        let (_temp, mut library) = temp_library(MIB);
        let item = library.add_screenshot(&[1, 2, 3, 250]).expect("save should succeed").clone();
        let (mime, bytes) = Library::decode_payload(&item).expect("payload should decode");
        assert_eq!(mime, "image/png");
        assert_eq!(bytes, vec![1, 2, 3, 250]);
    }

    #[test]
    fn invalid_payload_is_reported() {
        let item = LibraryItem {
            id: 7,
            kind: ItemKind::Screenshot,
            data: "not a data url".to_string(),
            timestamp: Utc::now(),
        };
        assert!(matches!(
            Library::decode_payload(&item),
            Err(LibraryError::InvalidPayload(7))
        ));
    }

    #[test]
    fn quota_violation_leaves_library_unchanged() {
        let (temp, mut library) = temp_library(400);
        library.add_screenshot(b"small").expect("save should succeed");
        let before = fs::read(temp.path().join("sharey-library.json")).expect("file exists");

        let err = library.add_screenshot(&[0u8; 1024]).unwrap_err();
        assert!(matches!(err, LibraryError::QuotaExceeded { quota: 400, .. }));
        assert_eq!(
            err.to_string(),
            "Storage quota exceeded. Please delete some items."
        );
        assert_eq!(library.len(), 1);
        let after = fs::read(temp.path().join("sharey-library.json")).expect("file exists");
        assert_eq!(before, after);
    }

    #[test]
    fn delete_removes_item() {
        let (_temp, mut library) = temp_library(MIB);
        let id = library.add_screenshot(b"png").expect("save should succeed").id;
        library.delete(id).expect("delete should succeed");
        assert!(library.get(id).is_none());
        assert!(matches!(library.delete(id), Err(LibraryError::NotFound(_))));
    }

    #[test]
    fn delete_succeeds_on_over_quota_library() {
        let (temp, mut library) = temp_library(MIB);
        let first = library.add_screenshot(&[7u8; 2000]).expect("save should succeed").id;
        let second = library.add_screenshot(&[9u8; 2000]).expect("save should succeed").id;

        // Quota lowered below the current size
        let path = temp.path().join("sharey-library.json");
        let mut shrunk = Library::open(&path, 1000);
        assert_eq!(shrunk.len(), 2);
        shrunk.delete(first).expect("delete should succeed over quota");
        assert_eq!(shrunk.len(), 1);

        let reopened = Library::open(&path, 1000);
        let ids: Vec<i64> = reopened.items().map(|item| item.id).collect();
        assert_eq!(ids, vec![second]);
    }

    #[test]
    fn export_writes_named_file() {
        let (temp, mut library) = temp_library(MIB);
        let id = library
            .add_recording(&Recording::webm(b"webm-bytes".to_vec()))
            .expect("save should succeed")
            .id;
        let out = temp.path().join("out");
        let written = library.export_item(id, &out).expect("export should succeed");
        assert_eq!(written, out.join(format!("recording-{id}.webm")));
        assert_eq!(fs::read(written).expect("file exists"), b"webm-bytes");
    }

    #[test]
    fn ids_stay_unique_within_one_tick() {
        let (_temp, mut library) = temp_library(MIB);
        let ids: Vec<i64> = (0..5)
            .map(|_| library.add_screenshot(b"x").expect("save should succeed").id)
            .collect();
        assert!(ids.windows(2).all(|pair| pair[1] > pair[0]));
    }
}
