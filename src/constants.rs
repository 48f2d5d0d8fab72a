//! Shared constants used across the application.

/// Cookie holding the session token.
pub const SESSION_COOKIE: &str = "fs_session";

/// Cookie carrying a one-shot flash message to the next rendered page.
pub const FLASH_COOKIE: &str = "fs_flash";

/// Storage key for the post collection in the local store directory.
pub const POSTS_STORE_FILE: &str = "factshield_posts.json";

/// Storage key for the remembered session user in the local store directory.
pub const USER_STORE_FILE: &str = "factshield_user.json";

/// Storage key for identifiers deleted locally, so seed posts do not
/// resurface after a delete.
pub const TOMBSTONES_FILE: &str = "factshield_deleted.json";
