//! Ordered configuration documents and default reconciliation.
//!
//! A persisted configuration is an ordered mapping from string keys to
//! values, where a value is a scalar, a sequence, or another mapping.
//! [`reconcile`] fills every key the compiled-in defaults know about into
//! the loaded document without touching values the user already set.
//!
//! # Reconciliation rules
//!
//! For every key in the defaults:
//!
//! | Current value | Default value | Action |
//! |---------------|---------------|--------|
//! | missing | anything | insert default (deep copy) |
//! | mapping | mapping | recurse |
//! | scalar / sequence | mapping | replace with default |
//! | anything | scalar / sequence | keep current |
//!
//! Keys only present in the current document are never removed.
//!
//! ```
//! use skipzero_logic::document::{reconcile, ConfigValue, Document};
//!
//! let mut defaults = Document::new();
//! defaults.insert("LowDamageThreshold".into(), ConfigValue::from(5));
//!
//! let mut current = Document::new();
//! assert!(reconcile(&defaults, &mut current));
//! assert_eq!(current["LowDamageThreshold"], ConfigValue::from(5));
//! assert!(!reconcile(&defaults, &mut current));
//! ```

use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Insertion-ordered mapping of configuration keys to values.
pub type Document = IndexMap<String, ConfigValue>;

/// Leaf value of a configuration document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Null,
    Bool(bool),
    Number(serde_json::Number),
    Text(String),
}

/// Any value that can appear in a configuration document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConfigValue {
    Scalar(Scalar),
    Sequence(Vec<ConfigValue>),
    Mapping(Document),
}

/// Shape class of a value, ignoring its contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Shape {
    Scalar,
    Sequence,
    Mapping,
}

/// Errors converting between documents and typed values.
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    #[error("document conversion failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("expected a mapping at the document root, found {0:?}")]
    NotAMapping(Shape),

    #[error("document is empty")]
    Empty,
}

impl ConfigValue {
    pub fn shape(&self) -> Shape {
        match self {
            Self::Scalar(_) => Shape::Scalar,
            Self::Sequence(_) => Shape::Sequence,
            Self::Mapping(_) => Shape::Mapping,
        }
    }

    pub fn as_mapping(&self) -> Option<&Document> {
        match self {
            Self::Mapping(doc) => Some(doc),
            _ => None,
        }
    }

    /// Numeric view of a scalar number; `None` for every other value.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Scalar(Scalar::Number(n)) => n.as_f64(),
            _ => None,
        }
    }
}

impl From<bool> for ConfigValue {
    fn from(value: bool) -> Self {
        Self::Scalar(Scalar::Bool(value))
    }
}

impl From<i64> for ConfigValue {
    fn from(value: i64) -> Self {
        Self::Scalar(Scalar::Number(value.into()))
    }
}

impl From<i32> for ConfigValue {
    fn from(value: i32) -> Self {
        Self::from(i64::from(value))
    }
}

/// Non-finite floats have no document representation and become null.
impl From<f64> for ConfigValue {
    fn from(value: f64) -> Self {
        match serde_json::Number::from_f64(value) {
            Some(n) => Self::Scalar(Scalar::Number(n)),
            None => Self::Scalar(Scalar::Null),
        }
    }
}

impl From<f32> for ConfigValue {
    fn from(value: f32) -> Self {
        Self::from(f64::from(value))
    }
}

impl From<&str> for ConfigValue {
    fn from(value: &str) -> Self {
        Self::Scalar(Scalar::Text(value.to_string()))
    }
}

impl From<String> for ConfigValue {
    fn from(value: String) -> Self {
        Self::Scalar(Scalar::Text(value))
    }
}

impl From<Vec<ConfigValue>> for ConfigValue {
    fn from(values: Vec<ConfigValue>) -> Self {
        Self::Sequence(values)
    }
}

impl From<Document> for ConfigValue {
    fn from(doc: Document) -> Self {
        Self::Mapping(doc)
    }
}

/// Fill `current` with every key of `defaults` it is missing.
///
/// Mutates `current` in place and returns whether anything was inserted or
/// replaced at any depth. A value already present is only replaced when the
/// default is a mapping and the current value is not. Running it again on
/// its own output always returns `false`.
pub fn reconcile(defaults: &Document, current: &mut Document) -> bool {
    let mut changed = false;

    for (key, default_value) in defaults {
        match current.get_mut(key) {
            None => {
                current.insert(key.clone(), default_value.clone());
                changed = true;
            }
            Some(current_value) => match (default_value, current_value) {
                (ConfigValue::Mapping(default_map), ConfigValue::Mapping(current_map)) => {
                    if reconcile(default_map, current_map) {
                        changed = true;
                    }
                }
                (ConfigValue::Mapping(_), mismatched) => {
                    *mismatched = default_value.clone();
                    changed = true;
                }
                // Scalars and sequences are the user's, whatever their shape.
                _ => {}
            },
        }
    }

    changed
}

/// Interpret a parsed value as a document root.
///
/// A null root parsed to nothing and is [`DocumentError::Empty`]; any other
/// non-mapping root is [`DocumentError::NotAMapping`].
pub fn document_from_value(value: ConfigValue) -> Result<Document, DocumentError> {
    match value {
        ConfigValue::Mapping(doc) => Ok(doc),
        ConfigValue::Scalar(Scalar::Null) => Err(DocumentError::Empty),
        other => Err(DocumentError::NotAMapping(other.shape())),
    }
}

/// Build a document from any value whose serialized form is a mapping.
pub fn document_from_serializable<T: Serialize>(value: &T) -> Result<Document, DocumentError> {
    let json = serde_json::to_value(value)?;
    document_from_value(serde_json::from_value(json)?)
}

/// Deserialize a typed value out of a document.
pub fn document_to_typed<T: DeserializeOwned>(doc: &Document) -> Result<T, DocumentError> {
    let json = serde_json::to_value(doc)?;
    Ok(serde_json::from_value(json)?)
}

/// Every key path of `doc`, depth-first, joined with `.`.
pub fn key_paths(doc: &Document) -> Vec<String> {
    let mut paths = Vec::new();
    collect_paths(doc, "", &mut paths);
    paths
}

fn collect_paths(doc: &Document, prefix: &str, out: &mut Vec<String>) {
    for (key, value) in doc {
        let path = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{}.{}", prefix, key)
        };
        if let ConfigValue::Mapping(nested) = value {
            collect_paths(nested, &path, out);
        }
        out.push(path);
    }
}

/// Look up a value by a `.`-joined key path.
pub fn get_path<'a>(doc: &'a Document, path: &str) -> Option<&'a ConfigValue> {
    let mut segments = path.split('.');
    let mut value = doc.get(segments.next()?)?;
    for segment in segments {
        value = value.as_mapping()?.get(segment)?;
    }
    Some(value)
}
