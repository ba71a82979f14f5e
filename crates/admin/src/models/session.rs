//! Session-related types.

use serde::{Deserialize, Serialize};

/// Session-stored admin identity.
///
/// Only accounts the backend reports as admins ever land in the session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentAdmin {
    /// Admin's backend user ID.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Email address used at login.
    pub email: String,
}

/// Session keys for authentication data.
pub mod keys {
    /// Key for storing the current logged-in admin.
    pub const CURRENT_ADMIN: &str = "current_admin";
}
