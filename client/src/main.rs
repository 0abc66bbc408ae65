mod broadcaster;
mod config;
mod input;
mod render;
mod replay_playback;
mod runner;
mod simulate;

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};
use fruit_tracker_common::{log, log_debug, logger};
use fruit_tracker_common::version::VERSION;

use config::{Config, get_config_manager};

#[derive(Parser)]
#[command(name = "fruit_match", version = VERSION)]
struct Args {
    #[command(subcommand)]
    command: Option<Command>,

    /// Seed for the board generator. Random when omitted.
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Config file to use instead of the one next to the executable.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[arg(long, global = true)]
    use_log_prefix: bool,

    #[arg(long, short, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Play in the terminal (default).
    Play,
    /// Watch a saved `.fruitreplay` file.
    Replay { file: PathBuf },
    /// Let a bot play without pacing and print the outcome.
    Simulate {
        #[arg(long, default_value_t = 60)]
        moves: u32,
    },
}

fn load_config(args: &Args) -> Result<Config, String> {
    get_config_manager(args.config.as_deref()).get_config()
}

/// Stores a new record so the next session starts from it.
fn save_best_score(args: &Args, config: &Config, best_score: u32) {
    if best_score <= config.initial_best_score {
        return;
    }
    let updated = Config {
        initial_best_score: best_score,
        ..config.clone()
    };
    match get_config_manager(args.config.as_deref()).set_config(&updated) {
        Ok(()) => log!("New best score {} saved", best_score),
        Err(e) => log!("Failed to save best score: {}", e),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let prefix = if args.use_log_prefix {
        Some("FruitMatch".to_string())
    } else {
        None
    };
    logger::init_logger(prefix, args.verbose);

    let config = load_config(&args)?;
    let seed = args.seed.unwrap_or_else(rand::random);
    log_debug!("Using seed {}", seed);

    match &args.command {
        None | Some(Command::Play) => {
            let summary = runner::run_interactive(&config, seed).await?;
            save_best_score(&args, &config, summary.final_snapshot.best_score);
        }
        Some(Command::Replay { file }) => {
            let step_delay = Duration::from_millis(config.pacing.cascade_step_delay_ms);
            replay_playback::run_replay_playback(file, step_delay).await?;
        }
        Some(Command::Simulate { moves }) => {
            let report =
                simulate::simulate(config.game, seed, *moves, config.initial_best_score)?;
            let snapshot = &report.final_snapshot;
            println!(
                "Seed {}: {:?} after {} moves, score {}/{}, {} reshuffles",
                report.seed,
                snapshot.status,
                report.moves_made,
                snapshot.score,
                snapshot.goal_score,
                report.reshuffles
            );

            if config.replays.save {
                match runner::save_replay_to_location(&config.replays, &report.replay) {
                    Ok(path) => log!("Replay saved to: {}", path.display()),
                    Err(e) => log!("Failed to save replay: {}", e),
                }
            }
        }
    }

    Ok(())
}
