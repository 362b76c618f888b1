use anyhow::Context;
use clap::{Parser, Subcommand};
use mask_core::{MaskConfig, MaskState, is_numeric};
use mask_session::{Session, replay};
use mimalloc::MiMalloc;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[derive(Parser, Debug)]
#[command(name = "numask")]
#[command(version, about = "Numeric input mask: format values, sanitize pastes, replay edit sessions")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Format a raw value for display
    Format {
        raw: String,
        /// Mask options as TOML (defaults to "$", 2 places, "," grouping)
        #[arg(long, short = 'c', value_name = "FILE")]
        config: Option<PathBuf>,
    },
    /// Run clipboard text through the paste sanitizer
    Paste {
        text: String,
        #[arg(long, short = 'c', value_name = "FILE")]
        config: Option<PathBuf>,
    },
    /// Replay a TOML session and print its transcript
    Replay {
        session: PathBuf,
        /// Print the JSON snapshot instead of the transcript
        #[arg(long)]
        json: bool,
    },
}

fn main() -> anyhow::Result<ExitCode> {
    env_logger::init();

    match Cli::parse().command {
        Command::Format { raw, config } => {
            let config = load_config(config.as_deref())?;
            if !is_numeric(&raw, &config) {
                log::warn!("{raw:?} is not a raw number, formatting as zero");
            }
            println!("{}", config.format(Some(&raw)));
            Ok(ExitCode::SUCCESS)
        }
        Command::Paste { text, config } => {
            let config = load_config(config.as_deref())?;
            let mut state = MaskState::new(config);
            if state.handle_paste(&text).is_accepted() {
                println!("raw: {}", state.raw_value().unwrap_or_default());
                println!("display: {}", state.display_text());
                Ok(ExitCode::SUCCESS)
            } else {
                eprintln!("paste rejected: {text:?} is not a number");
                Ok(ExitCode::FAILURE)
            }
        }
        Command::Replay { session, json } => {
            let parsed = Session::load(&session)?;
            let result = replay(&parsed)
                .with_context(|| format!("replaying {}", session.display()))?;
            if json {
                println!("{}", result.snapshot.to_json()?);
            } else {
                for line in &result.transcript {
                    println!("{line}");
                }
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn load_config(path: Option<&Path>) -> anyhow::Result<MaskConfig> {
    let Some(path) = path else {
        return Ok(MaskConfig::default());
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    MaskConfig::from_toml_str(&text).with_context(|| format!("invalid config {}", path.display()))
}
