mod backend_bridge;
mod controller;
mod ui;

use clap::Parser;
use crossbeam_channel::bounded;
use eframe::egui;
use serial_link::{load_settings, LinkCommand, LinkEvent};
use tracing_subscriber::EnvFilter;

use crate::ui::PingPongApp;

const COMMAND_QUEUE_DEPTH: usize = 16;
const EVENT_QUEUE_DEPTH: usize = 256;

#[derive(Parser, Debug)]
#[command(name = "pingpong", about = "Mirrors the ping-pong LED board on screen")]
struct Args {
    /// Serial port of the board, e.g. COM4 or /dev/ttyACM0.
    #[arg(long)]
    port: Option<String>,
    #[arg(long)]
    baud: Option<u32>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
    let args = Args::parse();

    let settings = load_settings().with_overrides(args.port, args.baud);
    tracing::info!(
        port = %settings.port_name,
        baud = settings.baud_rate,
        "starting pingpong display"
    );

    let (cmd_tx, cmd_rx) = bounded::<LinkCommand>(COMMAND_QUEUE_DEPTH);
    let (ui_tx, ui_rx) = bounded::<LinkEvent>(EVENT_QUEUE_DEPTH);
    cmd_tx.try_send(LinkCommand::Open)?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("PingPong")
            .with_inner_size([560.0, 160.0])
            .with_min_inner_size([545.0, 130.0]),
        ..Default::default()
    };
    let port_name = settings.port_name.clone();
    eframe::run_native(
        "PingPong",
        options,
        Box::new(move |cc| {
            let worker =
                backend_bridge::runtime::launch(settings, cmd_rx, ui_tx, cc.egui_ctx.clone())?;
            Ok(Box::new(PingPongApp::new(cmd_tx, ui_rx, worker, port_name)))
        }),
    )
    .map_err(|err| anyhow::anyhow!("display loop failed: {err}"))
}
