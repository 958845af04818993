//! Database layer (Firestore, with an in-memory backend for tests).

pub mod store;

pub use store::Database;

/// Collection names as constants.
pub mod collections {
    pub const USERS: &str = "users";
    pub const STORIES: &str = "stories";
}
