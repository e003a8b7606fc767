use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProtocolError {
    #[error("not a led position: {0:?}")]
    NotANumber(String),
    #[error("led position {0} is outside 1..=15")]
    OutOfRange(i64),
    #[error("unknown host command: {0:?}")]
    UnknownCommand(String),
}
