//! Collaborator interfaces the host provides.

use skipzero_logic::document::Document;

use crate::store::StoreError;

/// Raw persistence of the configuration document.
pub trait ConfigStore {
    /// Display name of the stored document, used in log messages.
    fn name(&self) -> &str;

    /// Load the persisted document. `Ok(None)` means nothing is stored.
    fn load_raw(&self) -> Result<Option<Document>, StoreError>;

    fn save_raw(&mut self, doc: &Document) -> Result<(), StoreError>;
}

/// Whoever invoked a command: the server console or a connected player.
pub trait Caller {
    fn is_server(&self) -> bool;
    fn is_admin(&self) -> bool;
    fn has_permission(&self, permission: &str) -> bool;
    fn reply(&mut self, message: &str);
}

/// Host permission system.
pub trait PermissionRegistry {
    fn register_permission(&mut self, permission: &str);
}

/// In-memory caller that records every reply. Used by harnesses and tests.
#[derive(Debug, Clone, Default)]
pub struct RecordingCaller {
    pub is_server: bool,
    pub is_admin: bool,
    pub permissions: Vec<String>,
    pub replies: Vec<String>,
}

impl RecordingCaller {
    pub fn console() -> Self {
        Self {
            is_server: true,
            ..Self::default()
        }
    }

    pub fn admin() -> Self {
        Self {
            is_admin: true,
            ..Self::default()
        }
    }

    pub fn player(permissions: &[&str]) -> Self {
        Self {
            permissions: permissions.iter().map(|p| p.to_string()).collect(),
            ..Self::default()
        }
    }

    pub fn last_reply(&self) -> Option<&str> {
        self.replies.last().map(String::as_str)
    }
}

impl Caller for RecordingCaller {
    fn is_server(&self) -> bool {
        self.is_server
    }

    fn is_admin(&self) -> bool {
        self.is_admin
    }

    fn has_permission(&self, permission: &str) -> bool {
        self.permissions.iter().any(|p| p == permission)
    }

    fn reply(&mut self, message: &str) {
        self.replies.push(message.to_string());
    }
}

/// In-memory permission registry.
#[derive(Debug, Clone, Default)]
pub struct PermissionSet {
    registered: Vec<String>,
}

impl PermissionSet {
    pub fn is_registered(&self, permission: &str) -> bool {
        self.registered.iter().any(|p| p == permission)
    }
}

impl PermissionRegistry for PermissionSet {
    fn register_permission(&mut self, permission: &str) {
        if !self.is_registered(permission) {
            self.registered.push(permission.to_string());
        }
    }
}
