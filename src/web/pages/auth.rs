//! Login page.

use maud::{html, Markup};

use crate::components::{Alert, BaseLayout};
use crate::web::{FlashLevel, FlashMessage};

/// Render the login form, with an optional inline error.
#[must_use]
pub fn render_login_page(error: Option<&str>, flash: Option<&FlashMessage>) -> Markup {
    let content = html! {
        @if let Some(flash) = flash {
            @match flash.level {
                FlashLevel::Success => { (Alert::success(&flash.message)) }
                FlashLevel::Error => { (Alert::error(&flash.message)) }
            }
        }
        @if let Some(error) = error {
            (Alert::error(error))
        }

        h1 { "Login" }

        form method="post" action="/login" {
            label for="username" { "Username" }
            input type="text" id="username" name="username" required autofocus;

            label for="password" { "Password" }
            input type="password" id="password" name="password" required;

            button type="submit" { "Login" }
        }
    };

    BaseLayout::new("Login", None).render(content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_form_fields() {
        let html = render_login_page(None, None).into_string();
        assert!(html.contains(r#"action="/login""#));
        assert!(html.contains(r#"name="username""#));
        assert!(html.contains(r#"name="password""#));
    }

    #[test]
    fn test_login_error_shown() {
        let html = render_login_page(Some("Invalid credentials."), None).into_string();
        assert!(html.contains("Invalid credentials."));
        assert!(html.contains("alert-error"));
    }
}
