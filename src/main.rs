//! birthday-journey CLI
//!
//! Mount the animated greeting journey in the current terminal.

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;

use birthday_journey::content::QuizDeck;
use birthday_journey::tui;
use birthday_journey::tui::state::App;

/// Tick rate bounds, in milliseconds. Below 10 the terminal churns;
/// above 200 the animations stop reading as motion.
const MIN_TICK_MS: u64 = 10;
const MAX_TICK_MS: u64 = 200;

#[derive(Parser)]
#[command(name = "birthday-journey")]
#[command(about = "An animated birthday greeting journey in your terminal")]
#[command(version)]
struct Cli {
    /// Animation clock period in milliseconds
    #[arg(long, default_value_t = 33)]
    tick_rate: u64,

    /// Load a custom quiz deck (JSON array of questions)
    #[arg(long)]
    deck: Option<PathBuf>,

    /// Name shown in the greeting headline
    #[arg(long)]
    recipient: Option<String>,

    /// Instant section changes, no decorative particles
    #[arg(long)]
    reduced_motion: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), String> {
    let deck = match &cli.deck {
        Some(path) => QuizDeck::from_path(path).map_err(|e| e.to_string())?,
        None => QuizDeck::builtin(),
    };

    let tick_rate = Duration::from_millis(cli.tick_rate.clamp(MIN_TICK_MS, MAX_TICK_MS));
    let app = App::new(deck, cli.recipient.as_deref(), cli.reduced_motion);

    tui::run(app, tick_rate).map_err(|e| e.to_string())
}
