pub mod middleware;
pub mod password;
pub mod session;

pub use middleware::{CurrentUser, MaybeUser, RequireUser};
pub use password::{hash_password, verify_password};
pub use session::{expiry_timestamp, generate_session_token, SessionCache};
