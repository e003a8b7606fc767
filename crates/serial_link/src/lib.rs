//! Serial link to the ping-pong board: port access, the link worker thread and its settings.

pub mod best_effort;
pub mod config;
pub mod error;
pub mod link;
pub mod port;
pub mod worker;

pub use best_effort::best_effort;
pub use config::{load_settings, LinkSettings};
pub use error::{LinkError, OpenFailureKind};
pub use link::SerialLink;
pub use port::{list_ports, LinkPort, PortOpener, PortSummary, SystemPorts};
pub use worker::{spawn_link_worker, EventSink, LinkCommand, LinkEvent, OpenContext};

#[cfg(test)]
#[path = "tests/worker_tests.rs"]
mod tests;
