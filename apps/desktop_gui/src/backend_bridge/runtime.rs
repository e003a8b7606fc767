//! Runtime bridge between the UI command queue and link event intake.

use std::{io, thread::JoinHandle};

use crossbeam_channel::{Receiver, Sender};
use eframe::egui;
use serial_link::{spawn_link_worker, EventSink, LinkCommand, LinkEvent, LinkSettings, SystemPorts};

/// Queues link events for the UI thread and wakes its event loop.
#[derive(Clone)]
pub struct RepaintingSink {
    ui_tx: Sender<LinkEvent>,
    ctx: egui::Context,
}

impl EventSink for RepaintingSink {
    fn emit(&self, event: LinkEvent) {
        self.ui_tx.emit(event);
        self.ctx.request_repaint();
    }
}

pub fn launch(
    settings: LinkSettings,
    cmd_rx: Receiver<LinkCommand>,
    ui_tx: Sender<LinkEvent>,
    ctx: egui::Context,
) -> io::Result<JoinHandle<()>> {
    spawn_link_worker(SystemPorts, settings, cmd_rx, RepaintingSink { ui_tx, ctx })
}
