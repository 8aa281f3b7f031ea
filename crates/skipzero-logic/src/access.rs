//! Report command authorization.
//!
//! The host knows who is calling; this module only decides. A caller may
//! view the report when any of these hold:
//!
//! | Caller | Allowed |
//! |--------|---------|
//! | Server console | always |
//! | Administrator | always |
//! | Holds `skipzerodamage.report` | yes |
//! | Anyone else | no |
//!
//! ```
//! use skipzero_logic::access::{check_report_access, ReportAccessRequest};
//!
//! let req = ReportAccessRequest {
//!     is_server: false,
//!     is_admin: false,
//!     has_report_permission: true,
//! };
//! assert!(check_report_access(&req).allowed);
//! ```

use serde::{Deserialize, Serialize};

/// Reply sent to a caller who may not view the report.
pub const DENIAL_MESSAGE: &str = "You don't have permission to use this command.";

/// What the host reports about the caller of the report command.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ReportAccessRequest {
    /// The caller is the server console.
    pub is_server: bool,
    /// The caller is a server administrator.
    pub is_admin: bool,
    /// The caller holds the report permission.
    pub has_report_permission: bool,
}

/// Result of an access check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessResult {
    pub allowed: bool,
    pub denial_reason: Option<DenialReason>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DenialReason {
    /// Not console, not admin, and no report permission.
    MissingPermission,
}

impl DenialReason {
    pub fn message(self) -> &'static str {
        match self {
            Self::MissingPermission => DENIAL_MESSAGE,
        }
    }
}

/// Decide whether a caller may view the damage-block report.
pub fn check_report_access(req: &ReportAccessRequest) -> AccessResult {
    if req.is_server || req.is_admin || req.has_report_permission {
        AccessResult {
            allowed: true,
            denial_reason: None,
        }
    } else {
        AccessResult {
            allowed: false,
            denial_reason: Some(DenialReason::MissingPermission),
        }
    }
}
