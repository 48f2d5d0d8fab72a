//! Alert components for flash messages and inline notices.

use maud::{html, Markup, Render};

/// Alert variant types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertVariant {
    Success,
    Error,
    Info,
}

impl AlertVariant {
    /// Get the CSS class for the alert element.
    #[must_use]
    pub const fn css_class(&self) -> &'static str {
        match self {
            Self::Success => "alert alert-success",
            Self::Error => "alert alert-error",
            Self::Info => "alert alert-info",
        }
    }
}

/// An alert message component.
///
/// Rendered with the `flash` class so the layout's dismiss script fades
/// it out after a few seconds.
#[derive(Debug, Clone)]
pub struct Alert<'a> {
    pub variant: AlertVariant,
    pub message: &'a str,
    pub auto_dismiss: bool,
}

impl<'a> Alert<'a> {
    /// Create a new alert with the given variant and message.
    #[must_use]
    pub const fn new(variant: AlertVariant, message: &'a str) -> Self {
        Self {
            variant,
            message,
            auto_dismiss: true,
        }
    }

    /// Create a success alert.
    #[must_use]
    pub const fn success(message: &'a str) -> Self {
        Self::new(AlertVariant::Success, message)
    }

    /// Create an error alert.
    #[must_use]
    pub const fn error(message: &'a str) -> Self {
        Self::new(AlertVariant::Error, message)
    }

    /// Create an info alert.
    #[must_use]
    pub const fn info(message: &'a str) -> Self {
        Self::new(AlertVariant::Info, message)
    }

    /// Keep the alert on screen instead of auto-dismissing it.
    #[must_use]
    pub const fn sticky(mut self) -> Self {
        self.auto_dismiss = false;
        self
    }
}

impl Render for Alert<'_> {
    fn render(&self) -> Markup {
        let class = if self.auto_dismiss {
            format!("{} flash", self.variant.css_class())
        } else {
            self.variant.css_class().to_string()
        };
        html! {
            article class=(class) role="alert" {
                (self.message)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_alert_renders_message() {
        let html = Alert::success("Case file added successfully.")
            .render()
            .into_string();
        assert!(html.contains("alert-success"));
        assert!(html.contains("flash"));
        assert!(html.contains("Case file added successfully."));
    }

    #[test]
    fn test_sticky_alert_has_no_flash_class() {
        let html = Alert::error("Invalid credentials.")
            .sticky()
            .render()
            .into_string();
        assert!(html.contains("alert-error"));
        assert!(!html.contains("flash"));
    }

    #[test]
    fn test_message_is_escaped() {
        let html = Alert::info("<script>alert(1)</script>")
            .render()
            .into_string();
        assert!(!html.contains("<script>alert(1)</script>"));
        assert!(html.contains("&lt;script&gt;"));
    }
}
