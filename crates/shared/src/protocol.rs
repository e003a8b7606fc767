use std::fmt;

use crate::{domain::LedIndex, error::ProtocolError};

/// Longest line kept by [`LineDecoder`]; anything longer is dropped up to the next newline.
pub const MAX_LINE_LEN: usize = 64;

/// Commands the host writes to the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HostCommand {
    Start,
    Stop,
}

impl HostCommand {
    pub fn as_str(self) -> &'static str {
        match self {
            HostCommand::Start => "START",
            HostCommand::Stop => "STOP",
        }
    }

    /// Wire form, newline terminated.
    pub fn to_line(self) -> String {
        format!("{}\n", self.as_str())
    }

    pub fn parse(line: &str) -> Result<Self, ProtocolError> {
        match line.trim() {
            "START" => Ok(HostCommand::Start),
            "STOP" => Ok(HostCommand::Stop),
            other => Err(ProtocolError::UnknownCommand(other.to_string())),
        }
    }
}

impl fmt::Display for HostCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parses one board report: a 1-based LED position as a decimal integer.
pub fn parse_led_report(line: &str) -> Result<LedIndex, ProtocolError> {
    let trimmed = line.trim();
    let position = trimmed
        .parse::<i64>()
        .map_err(|_| ProtocolError::NotANumber(trimmed.to_string()))?;
    LedIndex::from_position(position).ok_or(ProtocolError::OutOfRange(position))
}

/// Splits a byte stream into `\n` terminated lines.
#[derive(Debug, Default)]
pub struct LineDecoder {
    pending: Vec<u8>,
    overflowed: bool,
}

impl LineDecoder {
    pub fn push(&mut self, bytes: &[u8]) -> Vec<String> {
        let mut lines = Vec::new();
        for &byte in bytes {
            if byte == b'\n' {
                if !self.overflowed {
                    lines.push(String::from_utf8_lossy(&self.pending).into_owned());
                }
                self.pending.clear();
                self.overflowed = false;
            } else if self.overflowed {
                continue;
            } else if self.pending.len() >= MAX_LINE_LEN {
                self.pending.clear();
                self.overflowed = true;
            } else {
                self.pending.push(byte);
            }
        }
        lines
    }

    pub fn has_partial_line(&self) -> bool {
        !self.pending.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_trimmed_positions() {
        assert_eq!(parse_led_report("1").map(LedIndex::get), Ok(0));
        assert_eq!(parse_led_report(" 8\r").map(LedIndex::get), Ok(7));
        assert_eq!(parse_led_report("+15").map(LedIndex::get), Ok(14));
    }

    #[test]
    fn rejects_garbage_and_out_of_range_positions() {
        assert_eq!(
            parse_led_report("foo"),
            Err(ProtocolError::NotANumber("foo".to_string()))
        );
        assert_eq!(parse_led_report(""), Err(ProtocolError::NotANumber(String::new())));
        assert_eq!(parse_led_report("0"), Err(ProtocolError::OutOfRange(0)));
        assert_eq!(parse_led_report("16"), Err(ProtocolError::OutOfRange(16)));
        assert!(parse_led_report("3.5").is_err());
        assert!(parse_led_report("99999999999999999999").is_err());
    }

    #[test]
    fn host_commands_use_newline_terminated_wire_form() {
        assert_eq!(HostCommand::Start.to_line(), "START\n");
        assert_eq!(HostCommand::Stop.to_line(), "STOP\n");
        assert_eq!(HostCommand::parse("START\r\n"), Ok(HostCommand::Start));
        assert_eq!(HostCommand::parse("STOP"), Ok(HostCommand::Stop));
        assert!(HostCommand::parse("start").is_err());
    }

    #[test]
    fn decoder_reassembles_lines_split_across_reads() {
        let mut decoder = LineDecoder::default();
        assert!(decoder.push(b"1").is_empty());
        assert!(decoder.has_partial_line());
        assert_eq!(decoder.push(b"2\r\n3\n4"), vec!["12\r", "3"]);
        assert_eq!(decoder.push(b"\n"), vec!["4"]);
        assert!(!decoder.has_partial_line());
    }

    #[test]
    fn decoder_drops_overlong_lines_and_recovers() {
        let mut decoder = LineDecoder::default();
        let noise = vec![b'x'; MAX_LINE_LEN + 10];
        assert!(decoder.push(&noise).is_empty());
        assert_eq!(decoder.push(b"tail\n5\n"), vec!["5"]);
    }

    #[test]
    fn decoder_replaces_invalid_utf8() {
        let mut decoder = LineDecoder::default();
        let lines = decoder.push(&[0xff, b'7', b'\n']);
        assert_eq!(lines.len(), 1);
        assert!(parse_led_report(&lines[0]).is_err());
    }
}
