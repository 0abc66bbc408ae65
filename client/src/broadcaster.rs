use fruit_tracker_common::games::GameBroadcaster;
use fruit_tracker_common::games::match3::{GameEvent, Match3Snapshot, SessionSummary};

use crate::render::{describe_event, render_snapshot};

/// Draws the game on stdout.
#[derive(Clone, Default)]
pub struct TerminalBroadcaster;

impl TerminalBroadcaster {
    pub fn new() -> Self {
        Self
    }
}

/// Clock-only updates are reduced to a countdown line so the board is not
/// redrawn sixty times a game.
fn is_clock_only(events: &[GameEvent]) -> bool {
    !events.is_empty()
        && events
            .iter()
            .all(|e| matches!(e, GameEvent::TimerTick { .. }))
}

fn countdown_worth_showing(time_remaining: u32) -> bool {
    time_remaining <= 5 || time_remaining.is_multiple_of(10)
}

impl GameBroadcaster for TerminalBroadcaster {
    async fn broadcast_state(&self, snapshot: Match3Snapshot, events: Vec<GameEvent>) {
        if is_clock_only(&events) {
            if countdown_worth_showing(snapshot.time_remaining) {
                println!("{}s left", snapshot.time_remaining);
            }
            return;
        }

        for line in events.iter().filter_map(describe_event) {
            println!("> {}", line);
        }
        println!("{}", render_snapshot(&snapshot));
    }

    async fn broadcast_game_over(&self, summary: &SessionSummary) {
        println!(
            "Session over. Score {}, best {}, {} swaps, {} chains.",
            summary.final_snapshot.score,
            summary.final_snapshot.best_score,
            summary.swaps_made,
            summary.chains_resolved
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock_only_detection() {
        assert!(is_clock_only(&[GameEvent::TimerTick { time_remaining: 4 }]));
        assert!(!is_clock_only(&[]));
        assert!(!is_clock_only(&[
            GameEvent::TimerTick { time_remaining: 0 },
            GameEvent::Lost { score: 2 },
        ]));
    }

    #[test]
    fn test_countdown_lines() {
        assert!(countdown_worth_showing(50));
        assert!(countdown_worth_showing(3));
        assert!(!countdown_worth_showing(47));
    }
}
