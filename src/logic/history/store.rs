//! Scan Store
//!
//! Persisted layout: một JSON array (pretty) chứa mọi ScanRecord.
//! Append = đọc toàn bộ, push, ghi lại toàn bộ qua file tạm rồi rename.
//! File hỏng được đổi tên sang `.corrupt` trước khi ghi, không bao giờ bị đè.

use std::ffi::OsString;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::Utc;
use parking_lot::RwLock;

use crate::logic::error::StoreError;

use super::types::{ScanRecord, ScanStats};

pub struct ScanStore {
    path: PathBuf,
    /// Writers hold it exclusively for the whole read-modify-write.
    lock: RwLock<()>,
}

impl ScanStore {
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: RwLock::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one record and persist the whole collection.
    ///
    /// An unparsable history file is moved aside first, never overwritten.
    /// Any other read failure aborts the append.
    pub fn append(&self, record: &ScanRecord) -> Result<(), StoreError> {
        // A record that cannot be read back would make the whole file unreadable
        serde_json::from_slice::<ScanRecord>(&serde_json::to_vec(record)?)?;

        let _guard = self.lock.write();

        let mut records = match self.read_records() {
            Ok(records) => records,
            Err(StoreError::Serialization(e)) => {
                let backup = self.quarantine()?;
                log::warn!(
                    "Scan history {:?} is corrupt ({}), moved to {:?}; starting a new history",
                    self.path,
                    e,
                    backup
                );
                Vec::new()
            }
            Err(e) => return Err(e),
        };
        records.push(record.clone());
        self.write_all(&records)?;

        log::debug!("Scan {} appended to {:?} ({} total)", record.scan_id, self.path, records.len());
        Ok(())
    }

    /// All records, newest first. Equal timestamps keep later appends first.
    pub fn list_all(&self) -> Vec<ScanRecord> {
        let mut records = {
            let _guard = self.lock.read();
            self.load_all()
        };
        records.reverse();
        // Stable sort keeps the reversed append order among equal timestamps
        records.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        records
    }

    pub fn get_by_id(&self, scan_id: &str) -> Result<ScanRecord, StoreError> {
        let _guard = self.lock.read();
        self.load_all()
            .into_iter()
            .find(|r| r.scan_id == scan_id)
            .ok_or_else(|| StoreError::NotFound(scan_id.to_string()))
    }

    pub fn stats(&self) -> ScanStats {
        let _guard = self.lock.read();
        ScanStats::from_records(&self.load_all())
    }

    // ========================================================================
    // FILE IO (caller holds the lock)
    // ========================================================================

    /// Readers never fail: problems are logged and the history reads as empty.
    fn load_all(&self) -> Vec<ScanRecord> {
        match self.read_records() {
            Ok(records) => records,
            Err(e) => {
                log::warn!("Failed to load scan history {:?}, treating as empty: {}", self.path, e);
                Vec::new()
            }
        }
    }

    fn read_records(&self) -> Result<Vec<ScanRecord>, StoreError> {
        let data = match fs::read(&self.path) {
            Ok(data) => data,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        if data.iter().all(|b| b.is_ascii_whitespace()) {
            return Ok(Vec::new());
        }

        Ok(serde_json::from_slice(&data)?)
    }

    /// Rename the current file to `<name>.<timestamp>.corrupt`
    fn quarantine(&self) -> Result<PathBuf, StoreError> {
        let mut name = self.file_name();
        name.push(format!(".{}.corrupt", Utc::now().format("%Y%m%d%H%M%S%3f")));
        let backup = self.path.with_file_name(name);
        fs::rename(&self.path, &backup)?;
        Ok(backup)
    }

    fn write_all(&self, records: &[ScanRecord]) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let json = serde_json::to_vec_pretty(records)?;
        let tmp = self.temp_path();
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.file_name();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn file_name(&self) -> OsString {
        self.path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "results.json".into())
    }
}
