//! Recursive enumeration of candidate source files.
//!
//! `Scanner` walks a controller tree and yields one `FileEntry` per regular
//! file, at any depth, with no name or extension filtering. Filtering is the
//! classifier's job; keeping the walk dumb means every pass over the tree sees
//! the same set of paths.

use anyhow::{Context, Result};
use std::fs::{self, ReadDir};
use std::path::{Path, PathBuf};

/// A discovered file plus the name pieces later stages key off.
///
/// The stem (file name with the extension stripped) becomes the registry key
/// for controller files; directories never contribute to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    pub path: PathBuf,
    pub stem: String,
    pub extension: String,
}

impl FileEntry {
    /// Build an entry from a path, tolerating missing or non-UTF-8 pieces.
    ///
    /// Files with no usable stem or extension still enter the stream with the
    /// affected field empty; classification rejects them by extension.
    pub fn from_path(path: PathBuf) -> Self {
        let stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or_default()
            .to_string();
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default()
            .to_string();
        Self {
            path,
            stem,
            extension,
        }
    }
}

/// Lazy, restartable walker over every file under a root directory.
///
/// The walk is re-run from scratch on each `entries()` call; the loader relies
/// on that to enumerate the same tree once per pass.
#[derive(Debug, Clone)]
pub struct Scanner {
    root: PathBuf,
}

impl Scanner {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Start a fresh depth-first traversal.
    ///
    /// The caller checks that the root exists before scanning; a vanished or
    /// unreadable root surfaces as an error item on first iteration.
    pub fn entries(&self) -> ScanIter {
        ScanIter {
            pending: vec![self.root.clone()],
            open: Vec::new(),
        }
    }
}

/// Depth-first iterator state: directories waiting to be opened plus the
/// stack of open directory readers.
pub struct ScanIter {
    pending: Vec<PathBuf>,
    open: Vec<ReadDir>,
}

impl Iterator for ScanIter {
    type Item = Result<FileEntry>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(reader) = self.open.last_mut() {
                match reader.next() {
                    Some(Ok(dir_entry)) => {
                        let path = dir_entry.path();
                        if path.is_dir() {
                            self.pending.push(path);
                            continue;
                        }
                        return Some(Ok(FileEntry::from_path(path)));
                    }
                    Some(Err(err)) => {
                        return Some(Err(err).context("reading directory entry"));
                    }
                    None => {
                        self.open.pop();
                        continue;
                    }
                }
            }

            let dir = self.pending.pop()?;
            match fs::read_dir(&dir).with_context(|| format!("scanning {}", dir.display())) {
                Ok(reader) => self.open.push(reader),
                Err(err) => return Some(Err(err)),
            }
        }
    }
}
