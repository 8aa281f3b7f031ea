//! Typed plugin configuration.
//!
//! The persisted document is reconciled against [`PluginConfig::default_document`]
//! first; the typed view is then read out of the reconciled document. Keys the
//! typed view does not know about stay in the persisted document untouched.

use serde::{Deserialize, Serialize};

use crate::document::{document_from_serializable, document_to_typed, Document, DocumentError};

/// Settings recognized by the plugin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PluginConfig {
    /// Minimum damage amount required to pass through unsuppressed.
    /// `0` only suppresses exact-zero damage.
    #[serde(rename = "LowDamageThreshold")]
    pub low_damage_threshold: f32,
}

impl Default for PluginConfig {
    fn default() -> Self {
        Self {
            low_damage_threshold: 0.0,
        }
    }
}

impl PluginConfig {
    /// The compiled-in default document.
    pub fn default_document() -> Result<Document, DocumentError> {
        Self::default().to_document()
    }

    /// Serialized form of this config; every field appears under its
    /// persisted key.
    pub fn to_document(&self) -> Result<Document, DocumentError> {
        document_from_serializable(self)
    }

    /// Typed view of a (reconciled) document.
    ///
    /// Fails when a recognized key holds a value of the wrong type, e.g. a
    /// threshold stored as text.
    pub fn from_document(doc: &Document) -> Result<Self, DocumentError> {
        document_to_typed(doc)
    }
}
