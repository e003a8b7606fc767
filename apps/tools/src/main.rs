use std::time::{Duration, Instant};

use anyhow::{bail, Result};
use clap::{Parser, Subcommand, ValueEnum};
use crossbeam_channel::{bounded, RecvTimeoutError};
use serial_link::{list_ports, load_settings, LinkEvent, SerialLink, SystemPorts};
use shared::{parse_led_report, HostCommand, LedColor, LedIndex, LED_COUNT};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "pingpong-tools", about = "Serial helpers for the ping-pong LED board")]
struct Cli {
    #[arg(long)]
    port: Option<String>,
    #[arg(long)]
    baud: Option<u32>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List serial ports known to the operating system.
    ListPorts,
    /// Send a single command to the board.
    Send { command: CommandArg },
    /// Start a game and print every LED report as a text strip.
    Monitor,
    /// Play the board's side of the protocol.
    Simulate {
        #[arg(long, default_value_t = 120)]
        interval_ms: u64,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CommandArg {
    Start,
    Stop,
}

impl From<CommandArg> for HostCommand {
    fn from(value: CommandArg) -> Self {
        match value {
            CommandArg::Start => HostCommand::Start,
            CommandArg::Stop => HostCommand::Stop,
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
    let cli = Cli::parse();
    let settings = load_settings().with_overrides(cli.port, cli.baud);

    match cli.command {
        Command::ListPorts => {
            let ports = list_ports()?;
            if ports.is_empty() {
                println!("no serial ports found");
            }
            for port in ports {
                println!("{}\t{}", port.name, port.description);
            }
        }
        Command::Send { command } => {
            let (event_tx, _event_rx) = bounded(1);
            let mut link = SerialLink::open(&SystemPorts, &settings, event_tx)?;
            link.send(command.into())?;
            link.close()?;
            println!("sent {} to {}", HostCommand::from(command), settings.port_name);
        }
        Command::Monitor => {
            let (event_tx, event_rx) = bounded(256);
            let mut link = SerialLink::open(&SystemPorts, &settings, event_tx)?;
            link.send(HostCommand::Start)?;

            for event in event_rx.iter() {
                let LinkEvent::Line(line) = event else {
                    continue;
                };
                match parse_led_report(&line) {
                    Ok(index) => println!("{} {:>2}", render_strip(Some(index)), index.position()),
                    Err(err) => tracing::debug!(%err, "skipping line"),
                }
            }
            bail!("serial link to {} ended", settings.port_name);
        }
        Command::Simulate { interval_ms } => {
            simulate(&settings, Duration::from_millis(interval_ms.max(1)))?;
        }
    }

    Ok(())
}

fn simulate(settings: &serial_link::LinkSettings, interval: Duration) -> Result<()> {
    let (event_tx, event_rx) = bounded(64);
    let mut link = SerialLink::open(&SystemPorts, settings, event_tx)?;
    tracing::info!(port = %settings.port_name, "waiting for START");

    let mut running = false;
    let mut bounce = Bounce::default();
    let mut next_tick = Instant::now() + interval;

    loop {
        match event_rx.recv_deadline(next_tick) {
            Ok(LinkEvent::Line(line)) => match HostCommand::parse(&line) {
                Ok(HostCommand::Start) => {
                    tracing::info!("game started");
                    running = true;
                    bounce = Bounce::default();
                }
                Ok(HostCommand::Stop) => {
                    tracing::info!("game stopped");
                    break;
                }
                Err(err) => tracing::debug!(%err, "ignoring host line"),
            },
            Ok(_) => {}
            Err(RecvTimeoutError::Timeout) => {
                next_tick += interval;
                if running {
                    if let Some(position) = bounce.next() {
                        link.send_line(&format!("{position}\n"))?;
                    }
                }
            }
            Err(RecvTimeoutError::Disconnected) => bail!("serial link closed"),
        }
    }

    link.close()?;
    Ok(())
}

/// Text rendering of the strip: the lit LED shows its color initial, the rest `.`.
fn render_strip(active: Option<LedIndex>) -> String {
    LedIndex::all()
        .map(|index| LedColor::for_led(index, active).glyph())
        .collect()
}

/// 1-based positions of a ball bouncing between the two ends of the strip.
#[derive(Debug)]
struct Bounce {
    position: u8,
    rising: bool,
}

impl Default for Bounce {
    fn default() -> Self {
        Self {
            position: 1,
            rising: true,
        }
    }
}

impl Iterator for Bounce {
    type Item = u8;

    fn next(&mut self) -> Option<u8> {
        let current = self.position;
        let last = LED_COUNT as u8;
        if self.rising {
            if current == last {
                self.rising = false;
                self.position = current - 1;
            } else {
                self.position = current + 1;
            }
        } else if current == 1 {
            self.rising = true;
            self.position = 2;
        } else {
            self.position = current - 1;
        }
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strip_shows_only_the_lit_led() {
        assert_eq!(render_strip(None), "...............");
        assert_eq!(render_strip(LedIndex::new(0)), "R..............");
        assert_eq!(render_strip(LedIndex::new(13)), ".............Y.");
        assert_eq!(render_strip(LedIndex::new(7)), ".......G.......");
    }

    #[test]
    fn bounce_turns_at_both_ends() {
        let positions: Vec<u8> = Bounce::default().take(31).collect();
        let expected: Vec<u8> = (1..=15).chain((1..=14).rev()).chain(2..=3).collect();
        assert_eq!(positions, expected);
        assert!(positions
            .iter()
            .all(|p| parse_led_report(&p.to_string()).is_ok()));
    }
}
