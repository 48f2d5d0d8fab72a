//! Reusable maud components for the web UI.

pub mod alert;
pub mod card;
pub mod layout;

pub use alert::{Alert, AlertVariant};
pub use card::PostCard;
pub use layout::BaseLayout;
