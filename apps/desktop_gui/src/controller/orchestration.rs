//! Command orchestration helpers from UI actions to the link worker queue.

use crossbeam_channel::{Sender, TrySendError};
use serial_link::LinkCommand;

/// Queues `cmd` for the link worker. Returns false and updates `status` when it could not be queued.
pub fn dispatch_link_command(
    cmd_tx: &Sender<LinkCommand>,
    cmd: LinkCommand,
    status: &mut String,
) -> bool {
    let cmd_name = cmd.name();
    match cmd_tx.try_send(cmd) {
        Ok(()) => {
            tracing::debug!(command = cmd_name, "queued ui->link command");
            true
        }
        Err(TrySendError::Full(_)) => {
            *status = "Serial command queue is full; please retry".to_string();
            tracing::warn!(command = cmd_name, "ui->link command queue is full");
            false
        }
        Err(TrySendError::Disconnected(_)) => {
            *status = "Serial link worker stopped; restart the application".to_string();
            tracing::warn!(command = cmd_name, "link worker disconnected");
            false
        }
    }
}
