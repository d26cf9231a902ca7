//! Outbound reply descriptors
//!
//! The engine produces a `Reply` per turn; the transport decides how to
//! render it (inline keyboard, buttons, plain text). No wire format is
//! mandated beyond this logical shape.

use serde::{Deserialize, Serialize};

/// A pressable menu button carrying an opaque callback payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Button {
    pub label: String,
    pub data: String,
}

/// Rows of buttons attached to a reply
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Menu {
    pub rows: Vec<Vec<Button>>,
}

impl Menu {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn row(mut self, buttons: Vec<Button>) -> Self {
        self.rows.push(buttons);
        self
    }

    /// Append the standard Back button as its own row
    pub fn with_back(self) -> Self {
        self.row(vec![button("\u{2039} Back", "back")])
    }
}

/// What gets sent back to the user for one turn
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reply {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub menu: Option<Menu>,
}

impl Reply {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            menu: None,
        }
    }

    pub fn with_menu(text: impl Into<String>, menu: Menu) -> Self {
        Self {
            text: text.into(),
            menu: Some(menu),
        }
    }

    /// Prefix a one-off notice (commit confirmation, alert, error) onto a
    /// rendered prompt.
    pub fn prepend_notice(mut self, notice: impl AsRef<str>) -> Self {
        self.text = format!("{}\n\n{}", notice.as_ref(), self.text);
        self
    }
}

pub fn button(label: impl Into<String>, data: impl Into<String>) -> Button {
    Button {
        label: label.into(),
        data: data.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_menu_builder_and_back_row() {
        let menu = Menu::new()
            .row(vec![button("A", "a"), button("B", "b")])
            .with_back();
        assert_eq!(menu.rows.len(), 2);
        assert_eq!(menu.rows[1][0].data, "back");
    }

    #[test]
    fn test_prepend_notice() {
        let reply = Reply::text("prompt").prepend_notice("saved");
        assert_eq!(reply.text, "saved\n\nprompt");
    }
}
