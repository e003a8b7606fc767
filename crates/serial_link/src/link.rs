use std::{
    io::{self, Read, Write},
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    thread::{self, JoinHandle},
};

use shared::{HostCommand, LineDecoder};

use crate::{
    best_effort::best_effort,
    config::LinkSettings,
    error::LinkError,
    port::{LinkPort, PortOpener},
    worker::{EventSink, LinkEvent},
};

const READ_CHUNK: usize = 64;

/// An open connection to the board. Incoming lines are forwarded to the sink as
/// [`LinkEvent::Line`] by a reader thread that lives as long as the link.
pub struct SerialLink {
    port_name: String,
    writer: Box<dyn LinkPort>,
    reader: Option<JoinHandle<()>>,
    shutdown: Arc<AtomicBool>,
}

impl SerialLink {
    pub fn open<O, S>(opener: &O, settings: &LinkSettings, sink: S) -> Result<Self, LinkError>
    where
        O: PortOpener + ?Sized,
        S: EventSink,
    {
        let writer = opener.open(settings)?;
        let reader_port = writer.try_clone_port()?;
        let shutdown = Arc::new(AtomicBool::new(false));
        let reader = thread::Builder::new()
            .name("serial-reader".to_string())
            .spawn({
                let shutdown = Arc::clone(&shutdown);
                move || read_lines(reader_port, shutdown, sink)
            })?;

        tracing::info!(
            port = %settings.port_name,
            baud = settings.baud_rate,
            "serial link open"
        );
        Ok(Self {
            port_name: settings.port_name.clone(),
            writer,
            reader: Some(reader),
            shutdown,
        })
    }

    pub fn port_name(&self) -> &str {
        &self.port_name
    }

    pub fn send(&mut self, command: HostCommand) -> Result<(), LinkError> {
        self.send_line(&command.to_line())?;
        tracing::debug!(port = %self.port_name, %command, "command written");
        Ok(())
    }

    pub fn send_line(&mut self, line: &str) -> Result<(), LinkError> {
        self.writer.write_all(line.as_bytes())?;
        self.writer.flush()?;
        Ok(())
    }

    /// Flushes pending output and waits for the reader thread to exit.
    pub fn close(mut self) -> Result<(), LinkError> {
        let flushed = self.writer.flush();
        self.stop_reader();
        tracing::info!(port = %self.port_name, "serial link closed");
        flushed.map_err(LinkError::from)
    }

    fn stop_reader(&mut self) {
        self.shutdown.store(true, Ordering::Release);
        if let Some(reader) = self.reader.take() {
            if reader.join().is_err() {
                tracing::warn!(port = %self.port_name, "serial reader thread panicked");
            }
        }
    }
}

impl Drop for SerialLink {
    fn drop(&mut self) {
        self.stop_reader();
    }
}

fn read_lines<S: EventSink>(mut port: Box<dyn LinkPort>, shutdown: Arc<AtomicBool>, sink: S) {
    let mut decoder = LineDecoder::default();
    let mut buf = [0u8; READ_CHUNK];

    while !shutdown.load(Ordering::Acquire) {
        match port.read(&mut buf) {
            Ok(0) => {
                tracing::debug!("serial stream ended");
                break;
            }
            Ok(n) => {
                for line in decoder.push(&buf[..n]) {
                    sink.emit(LinkEvent::Line(line));
                }
            }
            Err(err) if is_transient(&err) => continue,
            Err(err) => {
                best_effort::<()>("read line", Err(err.into()));
                break;
            }
        }
    }

    if decoder.has_partial_line() {
        tracing::debug!("discarding unterminated line at end of stream");
    }
}

fn is_transient(err: &io::Error) -> bool {
    matches!(
        err.kind(),
        io::ErrorKind::TimedOut | io::ErrorKind::WouldBlock | io::ErrorKind::Interrupted
    )
}
