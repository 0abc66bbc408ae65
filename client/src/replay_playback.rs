use std::path::Path;
use std::time::Duration;

use chrono::{DateTime, Local};
use fruit_tracker_common::games::match3::{Match3Input, Match3Snapshot};
use fruit_tracker_common::log;
use fruit_tracker_common::replay::{ReplayPlayer, load_replay};
use fruit_tracker_common::version::VERSION;

use crate::render::{describe_event, render_snapshot};

/// Plays a saved game back on stdout. Clock ticks are applied without a
/// pause; swaps and cascade passes wait `step_delay` so they can be followed.
pub async fn run_replay_playback(
    file_path: &Path,
    step_delay: Duration,
) -> Result<Match3Snapshot, String> {
    let replay = load_replay(file_path).map_err(|e| format!("Failed to load replay: {}", e))?;
    let mut player = ReplayPlayer::new(replay)?;

    let replay_version = player.engine_version().to_string();
    if replay_version != VERSION {
        log!(
            "Warning: Replay version {} differs from client version {}",
            replay_version,
            VERSION
        );
    }
    let started = DateTime::from_timestamp_millis(player.game_started_timestamp_ms())
        .map(|t| t.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| "unknown".to_string());
    log!(
        "Replaying {} inputs, seed {}, started {}",
        player.total_actions(),
        player.seed(),
        started
    );

    println!("{}", render_snapshot(&player.game_state().snapshot()));

    while let Some((entry, events)) = player.step() {
        for line in events.iter().filter_map(describe_event) {
            println!("> {}", line);
        }

        if entry.input == Match3Input::Tick {
            continue;
        }

        println!("{}", render_snapshot(&player.game_state().snapshot()));
        tokio::time::sleep(step_delay).await;
    }

    let final_snapshot = player.game_state().snapshot();
    println!(
        "Replay finished: score {}, status {:?}",
        final_snapshot.score, final_snapshot.status
    );
    Ok(final_snapshot)
}
