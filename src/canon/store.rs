//! The canonical on-disk store: one JSON record per (book, sequence).
//!
//! Layout:
//! ```text
//! <root>/
//!   RUTH/
//!     001.json
//!     002.json
//!   PSAL/
//!     001.json
//!     ...
//! ```
//!
//! Access discipline is read-whole-record, mutate in memory, write back the
//! whole record. A single offline process is assumed; there is no locking.
//! Full-store backups land beside the root under `backups/`, named with a
//! timestamp and never overwritten.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Local;
use log::{debug, info};

use crate::canon::types::error::{CanonError, Result};
use crate::canon::types::models::ChapterRecord;

/// Handle to an existing store root.
#[derive(Debug, Clone)]
pub struct Store {
    root: PathBuf,
}

impl Store {
    /// Opens the store at `root`.
    ///
    /// # Errors
    /// Returns [`CanonError::StoreMissing`] if the root directory does not
    /// exist. This is the one early-abort condition: everything below a
    /// present root degrades to per-chapter reporting.
    pub fn open(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref();
        if !root.is_dir() {
            return Err(CanonError::StoreMissing(root.to_path_buf()));
        }
        info!("Opened store at {}", root.display());
        Ok(Self {
            root: root.to_path_buf(),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory holding one book's chapter records.
    pub fn book_dir(&self, book_code: &str) -> PathBuf {
        self.root.join(book_code)
    }

    /// Errors with [`CanonError::StoreMissing`] unless the book directory
    /// exists.
    pub fn require_book(&self, book_code: &str) -> Result<()> {
        let dir = self.book_dir(book_code);
        if dir.is_dir() {
            Ok(())
        } else {
            Err(CanonError::StoreMissing(dir))
        }
    }

    /// Path of a chapter record, e.g. `<root>/RUTH/003.json`.
    pub fn chapter_path(&self, book_code: &str, sequence: u32) -> PathBuf {
        self.book_dir(book_code).join(format!("{:03}.json", sequence))
    }

    /// All book directories, sorted by code.
    pub fn book_codes(&self) -> Result<Vec<String>> {
        let mut codes = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let entry = entry?;
            if entry.file_type()?.is_dir() {
                codes.push(entry.file_name().to_string_lossy().into_owned());
            }
        }
        codes.sort();
        Ok(codes)
    }

    /// All chapter record paths of one book, sorted by file name (and so
    /// by sequence, thanks to zero padding).
    pub fn chapter_paths(&self, book_code: &str) -> Result<Vec<PathBuf>> {
        let mut paths = Vec::new();
        for entry in fs::read_dir(self.book_dir(book_code))? {
            let path = entry?.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                paths.push(path);
            }
        }
        paths.sort();
        Ok(paths)
    }

    /// Loads a versioned chapter record.
    ///
    /// # Errors
    /// - [`CanonError::RecordMissing`] if the file does not exist
    /// - [`CanonError::RecordCorrupt`] if it exists but cannot be parsed
    pub fn load_chapter(&self, book_code: &str, sequence: u32) -> Result<ChapterRecord> {
        let path = self.chapter_path(book_code, sequence);
        if !path.is_file() {
            return Err(CanonError::RecordMissing {
                book: book_code.to_string(),
                sequence,
            });
        }
        let bytes = fs::read(&path)?;
        serde_json::from_slice(&bytes).map_err(|e| CanonError::RecordCorrupt {
            path,
            reason: e.to_string(),
        })
    }

    /// Loads any chapter file as a raw JSON value. The migrator uses this
    /// because legacy records do not fit the versioned shape.
    pub fn load_raw(&self, path: &Path) -> Result<serde_json::Value> {
        let bytes = fs::read(path)?;
        serde_json::from_slice(&bytes).map_err(|e| CanonError::RecordCorrupt {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    /// Writes a chapter record back, replacing the whole file.
    pub fn save_chapter(&self, record: &ChapterRecord) -> Result<()> {
        let path = self.chapter_path(&record.book_key, record.sequence);
        self.write_json(&path, record)
    }

    /// Serializes `value` as pretty-printed JSON at `path`.
    pub fn write_json<T: serde::Serialize>(&self, path: &Path, value: &T) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(value)?;
        fs::write(path, bytes)?;
        debug!("Wrote {}", path.display());
        Ok(())
    }

    /// Takes a full timestamped copy of the store under `../backups/`.
    ///
    /// The target is `<store name>_<YYYYmmdd_HHMMSS>`; if that path already
    /// exists (two runs in the same second, or a restored older backup), a
    /// numbered secondary path is used instead. Existing backups are never
    /// overwritten.
    pub fn backup(&self) -> Result<PathBuf> {
        let parent = self.root.parent().unwrap_or(Path::new("."));
        let backups_dir = parent.join("backups");
        fs::create_dir_all(&backups_dir)?;

        let store_name = self
            .root
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "store".to_string());
        let stamp = Local::now().format("%Y%m%d_%H%M%S");
        let mut target = backups_dir.join(format!("{}_{}", store_name, stamp));
        let mut suffix = 0u32;
        while target.exists() {
            suffix += 1;
            target = backups_dir.join(format!("{}_{}_{}", store_name, stamp, suffix));
        }

        info!("Backing up store to {}", target.display());
        copy_dir_all(&self.root, &target)?;
        Ok(target)
    }
}

/// Recursive directory copy, the moral equivalent of `cp -r`.
fn copy_dir_all(src: &Path, dst: &Path) -> Result<()> {
    fs::create_dir_all(dst)?;
    for entry in fs::read_dir(src)? {
        let entry = entry?;
        let target = dst.join(entry.file_name());
        if entry.file_type()?.is_dir() {
            copy_dir_all(&entry.path(), &target)?;
        } else {
            fs::copy(entry.path(), &target)?;
        }
    }
    Ok(())
}
