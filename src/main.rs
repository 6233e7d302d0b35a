use std::io;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use tracing::Level;

use toolwin::config::OverlayConfig;
use toolwin::constants::{DEFAULT_CELL_HEIGHT_PX, DEFAULT_CELL_WIDTH_PX};
use toolwin::drivers::console::{ConsoleDriver, ConsoleTerminal};
use toolwin::runner::{App, run_app};
use toolwin::transcript::Transcript;

/// Browse the tool calls of a recorded code-search chat in floating windows.
#[derive(Debug, Parser)]
#[command(name = "toolwin", version, about)]
struct Cli {
    /// Transcript JSON file to open.
    #[arg(long, value_name = "PATH")]
    transcript: PathBuf,

    /// Width of one terminal cell in pixels.
    #[arg(long, value_name = "PX", default_value_t = DEFAULT_CELL_WIDTH_PX)]
    cell_width: u16,

    /// Height of one terminal cell in pixels.
    #[arg(long, value_name = "PX", default_value_t = DEFAULT_CELL_HEIGHT_PX)]
    cell_height: u16,

    /// Append log output to this file. Logging is off without it.
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    #[arg(long, value_name = "LEVEL", default_value_t = Level::INFO)]
    log_level: Level,
}

fn main() -> io::Result<()> {
    let cli = Cli::parse();
    toolwin::tracing_sub::init(cli.log_file.as_deref(), cli.log_level)?;

    let metrics = OverlayConfig {
        cell_width_px: cli.cell_width,
        cell_height_px: cli.cell_height,
    }
    .metrics()
    .map_err(|err| io::Error::new(io::ErrorKind::InvalidInput, err))?;
    let transcript = Transcript::load(&cli.transcript).map_err(io::Error::other)?;
    let mut app = App::new(transcript, metrics);

    let mut console = ConsoleTerminal::enter()?;
    let result = run_app(
        console.terminal_mut(),
        ConsoleDriver::new(),
        &mut app,
        Duration::from_millis(16),
    );
    console.exit()?;
    if let Err(err) = &result {
        tracing::warn!(error = %err, "viewer exited with an error");
    }
    result
}
