//! Record stores - keyed mappings persisted as JSON documents.
//!
//! A [`Store`] binds one named document to a record type and exposes
//! whole-document `load`/`save`. Nothing is cached between calls; every
//! operation re-reads from the backend, so storage is the only truth.
//!
//! The backend is injectable: [`FileBackend`] for the real data directory,
//! [`MemoryBackend`] for tests.

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::marker::PhantomData;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, PoisonError};

use indexmap::IndexMap;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::{InnkeepError, Result};

/// Persistence capability behind every store: named documents of text.
pub trait StorageBackend: Clone {
    /// Read a document. `Ok(None)` means it has never been written.
    fn read(&self, name: &str) -> Result<Option<String>>;

    /// Write a document, replacing any previous contents.
    fn write(&self, name: &str, contents: &str) -> Result<()>;
}

/// One JSON file per store under a data directory.
///
/// The directory is created on first write if absent.
#[derive(Debug, Clone)]
pub struct FileBackend {
    dir: PathBuf,
}

impl FileBackend {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn document_path(&self, name: &str) -> PathBuf {
        self.dir.join(name)
    }
}

impl StorageBackend for FileBackend {
    fn read(&self, name: &str) -> Result<Option<String>> {
        let path = self.document_path(name);
        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(InnkeepError::Io { path, source: e }),
        }
    }

    fn write(&self, name: &str, contents: &str) -> Result<()> {
        if !self.dir.exists() {
            fs::create_dir_all(&self.dir).map_err(|e| InnkeepError::Io {
                path: self.dir.clone(),
                source: e,
            })?;
        }
        let path = self.document_path(name);
        fs::write(&path, contents).map_err(|e| InnkeepError::Io { path, source: e })
    }
}

/// In-memory backend for tests.
///
/// Clones share the same documents, so a system built from one backend
/// observes its own writes across repositories exactly like the file
/// backend does.
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    documents: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StorageBackend for MemoryBackend {
    fn read(&self, name: &str) -> Result<Option<String>> {
        let documents = self
            .documents
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        Ok(documents.get(name).cloned())
    }

    fn write(&self, name: &str, contents: &str) -> Result<()> {
        let mut documents = self
            .documents
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        documents.insert(name.to_string(), contents.to_string());
        Ok(())
    }
}

/// Typed view of one store document: a keyed mapping of records.
///
/// Insertion order is preserved (via `IndexMap`) so the persisted JSON stays
/// stable between rewrites.
pub struct Store<B, R> {
    backend: B,
    name: &'static str,
    _record: PhantomData<fn() -> R>,
}

impl<B, R> Store<B, R>
where
    B: StorageBackend,
    R: Serialize + DeserializeOwned,
{
    pub fn new(backend: B, name: &'static str) -> Self {
        Self {
            backend,
            name,
            _record: PhantomData,
        }
    }

    /// Load the full mapping.
    ///
    /// A document that has never been written is an empty store. Contents
    /// that fail to parse are also recovered as an empty store, with a
    /// warning on stderr rather than an error: a damaged file should not
    /// take every operation down with it.
    pub fn load(&self) -> Result<IndexMap<String, R>> {
        let Some(contents) = self.backend.read(self.name)? else {
            return Ok(IndexMap::new());
        };

        match serde_json::from_str(&contents) {
            Ok(records) => Ok(records),
            Err(e) => {
                eprintln!("warning: malformed store '{}', treating as empty: {}", self.name, e);
                Ok(IndexMap::new())
            }
        }
    }

    /// Persist the full mapping, replacing the document.
    ///
    /// Pretty-printed with 4-space indentation for human inspection.
    pub fn save(&self, records: &IndexMap<String, R>) -> Result<()> {
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
        records.serialize(&mut serializer)?;

        // serde_json only emits UTF-8, so the lossy conversion copies nothing
        self.backend.write(self.name, &String::from_utf8_lossy(&buf))
    }
}
