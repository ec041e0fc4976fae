//! Modal envelope around a report body.

use crate::ui::node::{button, space, text, Node};
use serde_json::{json, Value};

/// Modal size used when nothing else is configured.
pub const DEFAULT_MODAL_SIZE: &str = "xxxl";

/// Options for the modal envelope.
#[derive(Debug, Clone)]
pub struct ModalOptions {
    /// Title shown in the header.
    pub title: String,
    /// Client size keyword.
    pub size: String,
}

impl ModalOptions {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            size: DEFAULT_MODAL_SIZE.to_string(),
        }
    }

    pub fn with_size(mut self, size: impl Into<String>) -> Self {
        self.size = size.into();
        self
    }
}

fn header(title: &str) -> Node {
    space(vec![text(title)])
}

fn footer() -> Node {
    let close = button(vec![text("Close")])
        .with_prop("className", "form_action_button")
        .with_prop("borderType", "danger")
        .with_prop("buttonType", "outlined")
        // The client expects the action as an encoded string
        .with_prop("onClick", json!({"action": "CloseModal"}).to_string());

    space(vec![close]).with_prop("justifyContent", "space-between")
}

/// Wrap `content` into the `{"ui": {"modal": ...}}` response.
pub fn create_ui(content: &Node, options: &ModalOptions) -> Value {
    json!({
        "ui": {
            "modal": {
                "size": options.size,
                "headerContent": [header(&options.title).to_json()],
                "footerContent": [footer().to_json()],
                "content": [content.to_json()],
            }
        }
    })
}
