//! Alert components for displaying flash messages.

use maud::{html, Markup, Render};

use crate::auth::{Flash, FlashLevel};

/// Alert variant types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertVariant {
    Success,
    Error,
    Warning,
    Info,
}

impl AlertVariant {
    /// Get the CSS class for the alert article element.
    #[must_use]
    pub const fn article_class(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Info => "info",
        }
    }
}

impl From<FlashLevel> for AlertVariant {
    fn from(level: FlashLevel) -> Self {
        match level {
            FlashLevel::Success => Self::Success,
            FlashLevel::Danger => Self::Error,
            FlashLevel::Warning => Self::Warning,
            FlashLevel::Info => Self::Info,
        }
    }
}

/// An alert message component.
///
/// Renders as a styled article element with success/error/warning/info styling.
///
/// # Example
///
/// ```ignore
/// use crate::components::alert::{Alert, AlertVariant};
///
/// let alert = Alert::new(AlertVariant::Success, "Logged in.");
/// ```
#[derive(Debug, Clone)]
pub struct Alert<'a> {
    pub variant: AlertVariant,
    pub message: &'a str,
}

impl<'a> Alert<'a> {
    /// Create a new alert with the given variant and message.
    #[must_use]
    pub const fn new(variant: AlertVariant, message: &'a str) -> Self {
        Self { variant, message }
    }

    /// Alert for a queued flash message.
    #[must_use]
    pub fn from_flash(flash: &'a Flash) -> Self {
        Self::new(flash.level.into(), &flash.message)
    }
}

impl Render for Alert<'_> {
    fn render(&self) -> Markup {
        html! {
            article class=(self.variant.article_class()) role="alert" {
                (self.message)
            }
        }
    }
}

/// All pending flash messages, in the order they were queued.
#[derive(Debug, Clone)]
pub struct FlashList<'a> {
    pub flashes: &'a [Flash],
}

impl<'a> FlashList<'a> {
    #[must_use]
    pub const fn new(flashes: &'a [Flash]) -> Self {
        Self { flashes }
    }
}

impl Render for FlashList<'_> {
    fn render(&self) -> Markup {
        html! {
            @for flash in self.flashes {
                (Alert::from_flash(flash))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alert_variants() {
        assert_eq!(
            Alert::new(AlertVariant::Success, "ok").render().into_string(),
            r#"<article class="success" role="alert">ok</article>"#
        );
        assert!(Alert::new(AlertVariant::Error, "bad")
            .render()
            .into_string()
            .contains(r#"class="error""#));
    }

    #[test]
    fn test_alert_escapes_message() {
        let html = Alert::new(AlertVariant::Info, "<b>hi</b>")
            .render()
            .into_string();
        assert!(html.contains("&lt;b&gt;hi&lt;/b&gt;"));
    }

    #[test]
    fn test_flash_list_order() {
        let flashes = vec![Flash::danger("first"), Flash::info("second")];
        let html = FlashList::new(&flashes).render().into_string();

        let first = html.find("first").unwrap();
        let second = html.find("second").unwrap();
        assert!(first < second);
        assert!(html.contains(r#"class="error""#));
        assert!(html.contains(r#"class="info""#));
    }
}
