//! Modal dialogs shown inside the overlay: message boxes and the help window.

/// Severity of a message box; picks the title bar color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Info,
    Warning,
    Error,
}

/// A message box with a single OK button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub kind: MessageKind,
    pub title: String,
    pub body: String,
}

impl Message {
    pub fn info(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            kind: MessageKind::Info,
            title: title.into(),
            body: body.into(),
        }
    }

    pub fn warning(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            kind: MessageKind::Warning,
            title: title.into(),
            body: body.into(),
        }
    }

    pub fn error(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            kind: MessageKind::Error,
            title: title.into(),
            body: body.into(),
        }
    }

    pub fn lines(&self) -> Vec<&str> {
        self.body.lines().collect()
    }
}

/// The dialog currently blocking the overlay, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Modal {
    Message(Message),
    /// Help window scrolled down by `scroll` lines.
    Help { scroll: usize },
}

impl Modal {
    pub fn is_help(&self) -> bool {
        matches!(self, Modal::Help { .. })
    }
}
