//! Base page layout: HTML skeleton, navigation, footer.

use maud::{html, Markup, PreEscaped, DOCTYPE};

use crate::auth::CurrentUser;

/// Fades out flash alerts a few seconds after render. Inline so it works
/// without any asset pipeline.
const FLASH_DISMISS_SCRIPT: &str = r#"(function() {
    setTimeout(function() {
        document.querySelectorAll('.flash').forEach(function(el) {
            el.style.transition = 'opacity 0.5s';
            el.style.opacity = '0';
            setTimeout(function() { el.remove(); }, 500);
        });
    }, 4000);
})();"#;

/// Base page layout builder.
///
/// The user is passed explicitly so navigation always reflects the
/// session state; `None` renders the anonymous navigation.
#[derive(Debug, Clone)]
pub struct BaseLayout<'a> {
    title: &'a str,
    user: Option<&'a CurrentUser>,
    show_admin_nav: bool,
}

impl<'a> BaseLayout<'a> {
    /// Create a new base layout with the given page title and user.
    #[must_use]
    pub fn new(title: &'a str, user: Option<&'a CurrentUser>) -> Self {
        Self {
            title,
            user,
            show_admin_nav: true,
        }
    }

    /// Hide the login/admin navigation entirely (read-only deployments).
    #[must_use]
    pub const fn without_admin_nav(mut self) -> Self {
        self.show_admin_nav = false;
        self
    }

    /// Render the complete HTML page with the given content.
    #[must_use]
    pub fn render(self, content: Markup) -> Markup {
        html! {
            (DOCTYPE)
            html lang="en" {
                head {
                    meta charset="UTF-8";
                    meta name="viewport" content="width=device-width, initial-scale=1.0";
                    title { (self.title) " - FactShield" }
                    link rel="stylesheet" href="/static/css/style.css";
                }
                body {
                    (self.render_header())
                    main class="container" {
                        (content)
                    }
                    (Self::render_footer())
                    script { (PreEscaped(FLASH_DISMISS_SCRIPT)) }
                }
            }
        }
    }

    fn render_header(&self) -> Markup {
        html! {
            header class="container" {
                nav {
                    ul {
                        li { a href="/" { strong { "FactShield" } } }
                    }
                    ul {
                        li { a href="/" { "Home" } }
                        @if self.show_admin_nav {
                            @if let Some(user) = self.user {
                                li { a href="/admin" { "Admin" } }
                                li { a href="/logout" { "Logout (" (user.username) ")" } }
                            } @else {
                                li { a href="/login" { "Login" } }
                            }
                        }
                    }
                }
            }
        }
    }

    fn render_footer() -> Markup {
        html! {
            footer class="container" {
                small { "FactShield · sourced case files on circulating claims" }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anonymous_layout_shows_login() {
        let html = BaseLayout::new("Home", None)
            .render(html! { h1 { "content" } })
            .into_string();
        assert!(html.contains("Login"));
        assert!(!html.contains("Logout"));
        assert!(html.contains("<h1>content</h1>"));
        assert!(html.contains("Home - FactShield"));
    }

    #[test]
    fn test_logged_in_layout_shows_admin() {
        let user = CurrentUser {
            id: Some(1),
            username: "editor".to_string(),
        };
        let html = BaseLayout::new("Admin", Some(&user))
            .render(html! {})
            .into_string();
        assert!(html.contains(r#"href="/admin""#));
        assert!(html.contains("Logout (editor)"));
    }

    #[test]
    fn test_admin_nav_can_be_hidden() {
        let html = BaseLayout::new("Home", None)
            .without_admin_nav()
            .render(html! {})
            .into_string();
        assert!(!html.contains(r#"href="/login""#));
    }
}
