//! Contact modal open/close state.

use log::debug;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModalEvent {
    TriggerClicked,
    CloseClicked,
    /// A click that landed on the backdrop itself, not the dialog content.
    BackdropClicked,
    KeyPressed(String),
}

/// Style change the host applies when the modal toggles.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModalEffect {
    pub open: bool,
}

impl ModalEffect {
    /// Modal `display` value.
    pub fn display(&self) -> &'static str {
        if self.open {
            "block"
        } else {
            "none"
        }
    }

    /// Body `overflow` value; `hidden` locks page scrolling.
    pub fn body_overflow(&self) -> &'static str {
        if self.open {
            "hidden"
        } else {
            "auto"
        }
    }
}

#[derive(Debug, Default)]
pub struct Modal {
    open: bool,
}

impl Modal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn handle(&mut self, event: &ModalEvent) -> Option<ModalEffect> {
        let open = match event {
            ModalEvent::TriggerClicked => true,
            ModalEvent::CloseClicked | ModalEvent::BackdropClicked => false,
            ModalEvent::KeyPressed(key) if key == "Escape" => false,
            ModalEvent::KeyPressed(_) => return None,
        };
        if open == self.open {
            return None;
        }
        debug!("modal {}", if open { "opened" } else { "closed" });
        self.open = open;
        Some(ModalEffect { open })
    }
}
