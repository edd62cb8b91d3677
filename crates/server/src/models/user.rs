//! User model.

use chrono::{DateTime, Utc};
use serde::Serialize;

use shelftalk_core::{Email, UserId};

/// A registered user.
///
/// The password hash never leaves the repository layer; it is not part of
/// this model.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// User ID.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Email address (unique).
    pub email: Email,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
    /// When the account was last updated.
    pub updated_at: DateTime<Utc>,
}
