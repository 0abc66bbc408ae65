use std::io::BufRead;
use std::path::{Path, PathBuf};

use fruit_tracker_common::games::match3::{
    Match3Command, Match3Session, Match3SessionState, SessionSummary,
};
use fruit_tracker_common::log;
use fruit_tracker_common::replay::{Replay, ReplayError, generate_replay_filename, save_replay};
use fruit_tracker_common::version::VERSION;
use tokio::sync::mpsc;

use crate::broadcaster::TerminalBroadcaster;
use crate::config::{Config, ReplayConfig};
use crate::input::parse_command;

/// Stdin is read on a plain thread: a blocked read must not hold up
/// runtime shutdown once the session is over.
fn spawn_stdin_reader(command_tx: mpsc::UnboundedSender<Match3Command>) {
    std::thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else {
                break;
            };
            if line.trim().is_empty() {
                continue;
            }
            match parse_command(&line) {
                Ok(command) => {
                    if command_tx.send(command).is_err() || command == Match3Command::Quit {
                        break;
                    }
                }
                Err(e) => eprintln!("{}", e),
            }
        }
    });
}

pub async fn run_interactive(config: &Config, seed: u64) -> Result<SessionSummary, String> {
    let session_state = Match3SessionState::create(
        "local".to_string(),
        config.game,
        seed,
        config.initial_best_score,
        config.pacing.to_session_pacing(),
        config.replays.save,
    )?;

    println!(
        "Collect {} points in {} seconds.",
        config.game.goal_score, config.game.session_seconds
    );
    println!("Commands: start | <row> <col> | ok | retry | leave | quit");

    let (command_tx, command_rx) = mpsc::unbounded_channel();
    spawn_stdin_reader(command_tx);

    let summary = Match3Session::run(session_state, command_rx, TerminalBroadcaster::new()).await;

    if let Some(replay) = summary.replay.as_ref() {
        match save_replay_to_location(&config.replays, replay) {
            Ok(path) => log!("Replay saved to: {}", path.display()),
            Err(e) => log!("Failed to save replay: {}", e),
        }
    }

    Ok(summary)
}

pub fn save_replay_to_location(
    replay_config: &ReplayConfig,
    replay: &Replay,
) -> Result<PathBuf, ReplayError> {
    let replay_dir = Path::new(&replay_config.location);
    std::fs::create_dir_all(replay_dir)?;

    let file_path = replay_dir.join(generate_replay_filename(VERSION));
    save_replay(&file_path, replay)?;
    Ok(file_path)
}
