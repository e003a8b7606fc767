use rfd::{MessageButtons, MessageDialog, MessageLevel};

const DIALOG_TITLE: &str = "PingPong";

/// One-off notices for the operator.
pub trait Notifier {
    fn info(&self, description: &str);
    fn error(&self, description: &str);
}

/// Native message boxes; each call blocks the UI thread until dismissed.
#[derive(Debug, Clone, Copy, Default)]
pub struct DialogNotifier;

impl Notifier for DialogNotifier {
    fn info(&self, description: &str) {
        show(MessageLevel::Info, description);
    }

    fn error(&self, description: &str) {
        show(MessageLevel::Error, description);
    }
}

fn show(level: MessageLevel, description: &str) {
    let _ = MessageDialog::new()
        .set_title(DIALOG_TITLE)
        .set_description(description)
        .set_level(level)
        .set_buttons(MessageButtons::Ok)
        .show();
}
