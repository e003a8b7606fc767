use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LinkError {
    #[error("{port}: {source}")]
    Open {
        port: String,
        #[source]
        source: serialport::Error,
    },
    #[error("serial port error: {0}")]
    Port(#[from] serialport::Error),
    #[error("serial i/o failed: {0}")]
    Io(#[from] io::Error),
    #[error("serial link is not open")]
    NotOpen,
}

/// Coarse reason a port could not be opened, used to pick the hint shown to the operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenFailureKind {
    MissingDevice,
    PortBusy,
    Configuration,
    Unknown,
}

impl LinkError {
    pub fn open_failure_kind(&self) -> OpenFailureKind {
        match self {
            LinkError::Open { source, .. } | LinkError::Port(source) => classify_port_error(source),
            LinkError::Io(err) => classify_io_kind(err.kind()),
            LinkError::NotOpen => OpenFailureKind::Unknown,
        }
    }
}

fn classify_port_error(err: &serialport::Error) -> OpenFailureKind {
    let description = err.description.to_ascii_lowercase();
    if description.contains("busy")
        || description.contains("in use")
        || description.contains("access is denied")
    {
        return OpenFailureKind::PortBusy;
    }
    match err.kind() {
        serialport::ErrorKind::NoDevice => OpenFailureKind::MissingDevice,
        serialport::ErrorKind::InvalidInput => OpenFailureKind::Configuration,
        serialport::ErrorKind::Io(kind) => classify_io_kind(kind),
        serialport::ErrorKind::Unknown => OpenFailureKind::Unknown,
    }
}

fn classify_io_kind(kind: io::ErrorKind) -> OpenFailureKind {
    match kind {
        io::ErrorKind::NotFound => OpenFailureKind::MissingDevice,
        io::ErrorKind::PermissionDenied | io::ErrorKind::AddrInUse => OpenFailureKind::PortBusy,
        io::ErrorKind::InvalidInput => OpenFailureKind::Configuration,
        _ => OpenFailureKind::Unknown,
    }
}
