//! Link worker: owns the serial port and executes UI commands off the UI thread.

use std::{
    io,
    thread::{self, JoinHandle},
};

use crossbeam_channel::{Receiver, Sender, TrySendError};
use shared::HostCommand;

use crate::{
    best_effort::best_effort,
    config::LinkSettings,
    error::OpenFailureKind,
    link::SerialLink,
    port::PortOpener,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkCommand {
    /// Open the port if it is not already open.
    Open,
    /// Open if needed, then tell the board to start.
    Start,
    /// Tell the board to stop and close the port.
    Stop,
}

impl LinkCommand {
    pub fn name(self) -> &'static str {
        match self {
            LinkCommand::Open => "open",
            LinkCommand::Start => "start",
            LinkCommand::Stop => "stop",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenContext {
    Launch,
    Start,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkEvent {
    Opened {
        port_name: String,
        context: OpenContext,
    },
    OpenFailed {
        context: OpenContext,
        kind: OpenFailureKind,
        message: String,
    },
    /// The port is open and `START` is about to be written; lines after this belong to the new game.
    Started,
    Line(String),
    Closed,
}

/// Receives link events on whatever thread produced them.
pub trait EventSink: Clone + Send + 'static {
    fn emit(&self, event: LinkEvent);
}

/// LED lines are dropped when the queue is full; control events wait for room.
impl EventSink for Sender<LinkEvent> {
    fn emit(&self, event: LinkEvent) {
        if let LinkEvent::Line(_) = event {
            match self.try_send(event) {
                Ok(()) => {}
                Err(TrySendError::Full(event)) => {
                    tracing::debug!(?event, "link event queue full; dropping line");
                }
                Err(TrySendError::Disconnected(_)) => {
                    tracing::trace!("link event receiver gone");
                }
            }
        } else if self.send(event).is_err() {
            tracing::trace!("link event receiver gone");
        }
    }
}

pub fn spawn_link_worker<O, S>(
    opener: O,
    settings: LinkSettings,
    cmd_rx: Receiver<LinkCommand>,
    sink: S,
) -> io::Result<JoinHandle<()>>
where
    O: PortOpener,
    S: EventSink,
{
    thread::Builder::new()
        .name("serial-link".to_string())
        .spawn(move || run_link_worker(opener, settings, cmd_rx, sink))
}

/// Runs until every command sender is dropped, then closes the port if it is still open.
pub fn run_link_worker<O, S>(
    opener: O,
    settings: LinkSettings,
    cmd_rx: Receiver<LinkCommand>,
    sink: S,
) where
    O: PortOpener,
    S: EventSink,
{
    let mut link: Option<SerialLink> = None;

    while let Ok(cmd) = cmd_rx.recv() {
        tracing::debug!(command = cmd.name(), "processing link command");
        match cmd {
            LinkCommand::Open => {
                ensure_open(&opener, &settings, &sink, &mut link, OpenContext::Launch);
            }
            LinkCommand::Start => {
                let Some(open) = ensure_open(&opener, &settings, &sink, &mut link, OpenContext::Start)
                else {
                    continue;
                };
                sink.emit(LinkEvent::Started);
                best_effort("write START", open.send(HostCommand::Start));
            }
            LinkCommand::Stop => {
                if let Some(mut open) = link.take() {
                    best_effort("write STOP", open.send(HostCommand::Stop));
                    best_effort("close link", open.close());
                }
                sink.emit(LinkEvent::Closed);
            }
        }
    }

    if let Some(open) = link.take() {
        best_effort("close link on shutdown", open.close());
    }
    tracing::debug!("link worker exiting");
}

fn ensure_open<'a, O, S>(
    opener: &O,
    settings: &LinkSettings,
    sink: &S,
    link: &'a mut Option<SerialLink>,
    context: OpenContext,
) -> Option<&'a mut SerialLink>
where
    O: PortOpener,
    S: EventSink,
{
    if link.is_none() {
        match SerialLink::open(opener, settings, sink.clone()) {
            Ok(open) => {
                sink.emit(LinkEvent::Opened {
                    port_name: open.port_name().to_string(),
                    context,
                });
                *link = Some(open);
            }
            Err(err) => {
                tracing::warn!(port = %settings.port_name, ?context, "failed to open serial port: {err}");
                sink.emit(LinkEvent::OpenFailed {
                    context,
                    kind: err.open_failure_kind(),
                    message: err.to_string(),
                });
                return None;
            }
        }
    }
    link.as_mut()
}
