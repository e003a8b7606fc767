//! Error modeling for link events surfaced to the operator.

use serial_link::{OpenContext, OpenFailureKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorCategory {
    MissingDevice,
    PortBusy,
    Configuration,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    Launch,
    StartGame,
}

impl From<OpenContext> for UiErrorContext {
    fn from(value: OpenContext) -> Self {
        match value {
            OpenContext::Launch => UiErrorContext::Launch,
            OpenContext::Start => UiErrorContext::StartGame,
        }
    }
}

#[derive(Debug, Clone)]
pub struct UiError {
    category: UiErrorCategory,
    context: UiErrorContext,
    message: String,
}

impl UiError {
    pub fn from_open_failure(
        context: OpenContext,
        kind: OpenFailureKind,
        message: impl Into<String>,
    ) -> Self {
        let category = match kind {
            OpenFailureKind::MissingDevice => UiErrorCategory::MissingDevice,
            OpenFailureKind::PortBusy => UiErrorCategory::PortBusy,
            OpenFailureKind::Configuration => UiErrorCategory::Configuration,
            OpenFailureKind::Unknown => UiErrorCategory::Unknown,
        };
        Self {
            category,
            context: context.into(),
            message: message.into(),
        }
    }

    /// Text for the blocking notification.
    pub fn user_message(&self) -> String {
        match self.context {
            UiErrorContext::Launch => format!("The port couldn't be opened: {}", self.message),
            UiErrorContext::StartGame => format!("Unable to open serial port: {}", self.message),
        }
    }

    /// One-line status text with a hint for the operator.
    pub fn status_line(&self) -> String {
        let hint = match self.category {
            UiErrorCategory::MissingDevice => "check that the board is plugged in",
            UiErrorCategory::PortBusy => "close other programs using the port",
            UiErrorCategory::Configuration => "check port_name and baud_rate in pingpong.toml",
            UiErrorCategory::Unknown => "press Start to retry",
        };
        format!("{}; {hint}", self.user_message())
    }

    pub fn category(&self) -> UiErrorCategory {
        self.category
    }

    pub fn context(&self) -> UiErrorContext {
        self.context
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}
