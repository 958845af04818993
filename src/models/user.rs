//! User model for storage and API.

use serde::{Deserialize, Serialize};

/// User profile stored in Firestore.
///
/// One record per email; repeated Google logins overwrite the mutable
/// fields rather than creating a second record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Locally minted UUID (also used as document ID)
    pub id: String,
    /// Email address; the cross-login identity
    pub email: String,
    /// First name, refreshed on every login
    pub first_name: String,
    /// Last name, refreshed on every login
    pub last_name: String,
    /// Profile picture URL, refreshed on every login
    pub profile_picture: Option<String>,
    /// Google subject ID; None until the first OAuth login completes
    pub google_id: Option<String>,
    /// When the user was first created (RFC 3339)
    pub created_at: String,
    /// Last mutation timestamp (RFC 3339)
    pub updated_at: String,
}
