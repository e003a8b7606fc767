//! LED strip domain and the line protocol spoken with the ping-pong controller board.

pub mod domain;
pub mod error;
pub mod protocol;

pub use domain::{LedColor, LedIndex, LED_COUNT};
pub use error::ProtocolError;
pub use protocol::{parse_led_report, HostCommand, LineDecoder};
