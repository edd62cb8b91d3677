//! Session payload types.

use serde::{Deserialize, Serialize};

use shelftalk_core::UserId;

/// Session keys for typed session access.
pub mod session_keys {
    /// Key under which the authenticated user is stored.
    pub const CURRENT_USER: &str = "current_user";
}

/// The authenticated user, as stored in the session.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentUser {
    /// User ID.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
}

impl From<&crate::models::user::User> for CurrentUser {
    fn from(user: &crate::models::user::User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            email: user.email.as_str().to_string(),
        }
    }
}
