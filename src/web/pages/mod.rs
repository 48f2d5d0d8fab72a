//! Page templates using maud, one module per view.

pub mod admin;
pub mod auth;
pub mod home;
pub mod post;

pub use admin::{render_admin_page, AdminParams};
pub use auth::render_login_page;
pub use home::{render_home_page, HomeParams};
pub use post::{render_post_page, PostDetailParams};

use maud::{html, Markup};

use crate::auth::CurrentUser;
use crate::components::BaseLayout;

/// Simple not-found page.
#[must_use]
pub fn render_not_found(user: Option<&CurrentUser>) -> Markup {
    let content = html! {
        h1 { "Not found" }
        p { "The case file you were looking for does not exist." }
        p { a href="/" { "Back to the front page" } }
    };
    BaseLayout::new("Not found", user).render(content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_page() {
        let html = render_not_found(None).into_string();
        assert!(html.contains("Not found"));
        assert!(html.contains(r#"href="/""#));
    }
}
