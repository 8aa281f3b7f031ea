//! Configuration persistence as pretty-printed JSON.
//!
//! Only an absent file means "nothing stored". A file that exists must hold a
//! JSON object; empty text, `null`, and any other root are errors.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use skipzero_logic::document::{document_from_value, ConfigValue, Document, DocumentError};

use crate::host::ConfigStore;

/// Errors that can occur while loading or saving the configuration.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid document: {0}")]
    Document(#[from] DocumentError),

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Parse persisted text into a document.
pub fn parse_document(text: &str) -> Result<Document, StoreError> {
    if text.trim().is_empty() {
        return Err(DocumentError::Empty.into());
    }
    let value: ConfigValue = serde_json::from_str(text)?;
    Ok(document_from_value(value)?)
}

/// Render a document the way it is written to disk.
pub fn render_document(doc: &Document) -> Result<String, StoreError> {
    Ok(serde_json::to_string_pretty(doc)?)
}

/// Stores the document at `<dir>/<stem>.json`.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
    file_name: String,
}

impl JsonFileStore {
    pub fn new(dir: impl AsRef<Path>, stem: &str) -> Self {
        let file_name = format!("{}.json", stem);
        Self {
            path: dir.as_ref().join(&file_name),
            file_name,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ConfigStore for JsonFileStore {
    fn name(&self) -> &str {
        &self.file_name
    }

    fn load_raw(&self) -> Result<Option<Document>, StoreError> {
        match fs::read_to_string(&self.path) {
            Ok(text) => parse_document(&text).map(Some),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn save_raw(&mut self, doc: &Document) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, render_document(doc)?)?;
        Ok(())
    }
}

/// Keeps the persisted text in memory. Used by harnesses and tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    name: String,
    text: Option<String>,
    saves: usize,
    fail_saves: bool,
}

impl MemoryStore {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Self::default()
        }
    }

    /// A store that already holds `text`.
    pub fn with_text(name: &str, text: &str) -> Self {
        Self {
            text: Some(text.to_string()),
            ..Self::new(name)
        }
    }

    /// Make every subsequent save fail.
    pub fn fail_saves(mut self) -> Self {
        self.fail_saves = true;
        self
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn set_text(&mut self, text: &str) {
        self.text = Some(text.to_string());
    }

    /// Number of successful saves so far.
    pub fn saves(&self) -> usize {
        self.saves
    }
}

impl ConfigStore for MemoryStore {
    fn name(&self) -> &str {
        &self.name
    }

    fn load_raw(&self) -> Result<Option<Document>, StoreError> {
        match &self.text {
            Some(text) => parse_document(text).map(Some),
            None => Ok(None),
        }
    }

    fn save_raw(&mut self, doc: &Document) -> Result<(), StoreError> {
        if self.fail_saves {
            return Err(StoreError::Unavailable(format!("{} is read-only", self.name)));
        }
        self.text = Some(render_document(doc)?);
        self.saves += 1;
        Ok(())
    }
}
