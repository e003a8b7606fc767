use std::thread::JoinHandle;

use crossbeam_channel::{Receiver, Sender};
use eframe::egui;
use serial_link::{LinkCommand, LinkEvent, OpenContext};

use crate::controller::events::UiError;
use crate::controller::orchestration::dispatch_link_command;
use crate::controller::reducer::GameState;
use crate::ui::led_strip;
use crate::ui::notify::{DialogNotifier, Notifier};

pub struct PingPongApp {
    state: GameState,
    cmd_tx: Option<Sender<LinkCommand>>,
    ui_rx: Receiver<LinkEvent>,
    worker: Option<JoinHandle<()>>,
    port_name: String,
    status: String,
    // End was pressed; the window closes once the link reports closed.
    closing: bool,
    notifier: Box<dyn Notifier>,
}

impl PingPongApp {
    pub fn new(
        cmd_tx: Sender<LinkCommand>,
        ui_rx: Receiver<LinkEvent>,
        worker: JoinHandle<()>,
        port_name: String,
    ) -> Self {
        Self {
            state: GameState::default(),
            cmd_tx: Some(cmd_tx),
            ui_rx,
            worker: Some(worker),
            status: format!("Opening {port_name}..."),
            port_name,
            closing: false,
            notifier: Box::new(DialogNotifier),
        }
    }

    pub fn with_notifier(mut self, notifier: Box<dyn Notifier>) -> Self {
        self.notifier = notifier;
        self
    }

    fn process_link_events(&mut self, ctx: &egui::Context) {
        while let Ok(event) = self.ui_rx.try_recv() {
            match event {
                LinkEvent::Opened { port_name, context } => {
                    self.status = format!("{port_name} port is open.");
                    if context == OpenContext::Launch {
                        self.notifier.info(&self.status);
                    }
                }
                LinkEvent::OpenFailed {
                    context,
                    kind,
                    message,
                } => {
                    let err = UiError::from_open_failure(context, kind, message);
                    tracing::warn!(
                        category = ?err.category(),
                        context = ?err.context(),
                        "serial port unavailable: {}",
                        err.message()
                    );
                    self.status = err.status_line();
                    self.notifier.error(&err.user_message());
                }
                LinkEvent::Started => {
                    if !self.closing {
                        self.state.start();
                        self.status = "Game running".to_string();
                    }
                }
                LinkEvent::Line(line) => {
                    if self.state.apply_line(&line) {
                        ctx.request_repaint();
                    }
                }
                LinkEvent::Closed => {
                    self.status = format!("{} closed", self.port_name);
                    if self.closing {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                }
            }
        }
    }

    fn queue(&mut self, cmd: LinkCommand) -> bool {
        match &self.cmd_tx {
            Some(cmd_tx) => dispatch_link_command(cmd_tx, cmd, &mut self.status),
            None => false,
        }
    }

    fn start_game(&mut self) {
        if self.closing {
            return;
        }
        if self.state.is_running() {
            tracing::info!("restarting a running game");
        }
        self.queue(LinkCommand::Start);
    }

    fn end_game(&mut self, ctx: &egui::Context) {
        tracing::info!(was_running = self.state.is_running(), "ending game");
        self.state.stop();
        self.closing = true;
        if !self.queue(LinkCommand::Stop) {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }
    }
}

impl eframe::App for PingPongApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_link_events(ctx);

        let mut start_clicked = false;
        let mut end_clicked = false;
        egui::TopBottomPanel::top("controls").show(ctx, |ui| {
            ui.horizontal(|ui| {
                start_clicked = ui.button("Start").clicked();
                end_clicked = ui.button("End").clicked();
            });
        });
        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            ui.label(self.status.as_str());
        });
        egui::CentralPanel::default().show(ctx, |ui| {
            led_strip::paint_led_strip(ui, &self.state);
        });

        if start_clicked {
            self.start_game();
        }
        if end_clicked {
            self.end_game(ctx);
        }
    }
}

impl Drop for PingPongApp {
    fn drop(&mut self) {
        // Disconnecting both queues lets the worker close the port and exit, even when it is
        // waiting for room to deliver a control event.
        self.cmd_tx.take();
        drop(std::mem::replace(&mut self.ui_rx, crossbeam_channel::never()));
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                tracing::warn!("serial link worker panicked");
            }
        }
    }
}

#[cfg(test)]
#[path = "../tests/app_tests.rs"]
mod tests;
