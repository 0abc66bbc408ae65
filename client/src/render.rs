use std::fmt::Write;

use fruit_tracker_common::games::match3::{
    GameEvent, GameStatus, Match3Snapshot, Position, TileKind,
};

/// Apple, kiwi, pomegranate, banana, lime, grapefruit, then extra kinds
/// for larger configured boards.
const FRUIT_GLYPHS: &[char] = &['A', 'K', 'P', 'B', 'L', 'G', 'M', 'O', 'C', 'W', 'S', 'N'];

pub fn fruit_glyph(kind: TileKind) -> char {
    FRUIT_GLYPHS.get(kind.0 as usize).copied().unwrap_or('?')
}

pub fn render_snapshot(snapshot: &Match3Snapshot) -> String {
    let mut out = String::new();
    let size = snapshot.board.size();

    let _ = writeln!(
        out,
        "Score {}/{}  Best {}  Time {:>2}s  {}",
        snapshot.score,
        snapshot.goal_score,
        snapshot.best_score,
        snapshot.time_remaining,
        status_label(snapshot)
    );

    out.push_str("    ");
    for col in 0..size {
        let _ = write!(out, " {} ", col);
    }
    out.push('\n');

    for (row, tiles) in snapshot.board.rows().enumerate() {
        let _ = write!(out, " {}  ", row);
        for tile in tiles {
            let glyph = fruit_glyph(tile.kind);
            if snapshot.selection == Some(Position::new(row, tile.col)) {
                let _ = write!(out, "[{}]", glyph);
            } else {
                let _ = write!(out, " {} ", glyph);
            }
        }
        out.push('\n');
    }

    out
}

fn status_label(snapshot: &Match3Snapshot) -> &'static str {
    match snapshot.status {
        GameStatus::Menu => "type 'start' to play",
        GameStatus::Playing if snapshot.animating => "collecting...",
        GameStatus::Playing => "pick two neighbouring cells: <row> <col>",
        GameStatus::Won => "YOU WIN! type 'ok' to return to the menu",
        GameStatus::Lost => "TIME IS UP! type 'retry' or 'leave'",
    }
}

/// One line per event worth telling the player about.
pub fn describe_event(event: &GameEvent) -> Option<String> {
    match event {
        GameEvent::SwapRejected { first, second } => {
            Some(format!("No match between {} and {}, swap undone", first, second))
        }
        GameEvent::CascadeStep {
            chain_index,
            removed,
            points,
        } => {
            if *chain_index > 1 {
                Some(format!("Chain x{}: {} fruits, +{}", chain_index, removed, points))
            } else {
                Some(format!("{} fruits, +{}", removed, points))
            }
        }
        GameEvent::BoardReshuffled => Some("No moves left, fresh board".to_string()),
        GameEvent::Won { score } => Some(format!("Goal reached with {} points", score)),
        GameEvent::Lost { score } => Some(format!("Out of time with {} points", score)),
        GameEvent::SelectionChanged { .. } | GameEvent::TimerTick { .. } => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fruit_tracker_common::games::match3::{Match3GameState, Match3Settings};
    use fruit_tracker_common::games::SessionRng;

    fn snapshot(seed: u64) -> Match3Snapshot {
        let mut rng = SessionRng::new(seed);
        Match3GameState::new(Match3Settings::default(), &mut rng)
            .unwrap()
            .snapshot()
    }

    #[test]
    fn test_render_has_header_and_one_line_per_row() {
        let text = render_snapshot(&snapshot(1));
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2 + 6);
        assert!(lines[0].starts_with("Score 0/7  Best 7  Time 60s"));
        assert!(lines[0].contains("start"));
    }

    #[test]
    fn test_render_marks_selection() {
        let mut snap = snapshot(2);
        assert!(!render_snapshot(&snap).contains('['));
        snap.selection = Some(Position::new(1, 1));
        assert_eq!(render_snapshot(&snap).matches('[').count(), 1);
    }

    #[test]
    fn test_glyphs_cover_all_kinds() {
        for kind in 0..12u8 {
            assert_ne!(fruit_glyph(TileKind(kind)), '?');
        }
        assert_eq!(fruit_glyph(TileKind(200)), '?');
    }

    #[test]
    fn test_describe_event() {
        let step = GameEvent::CascadeStep {
            chain_index: 2,
            removed: 6,
            points: 2,
        };
        assert_eq!(describe_event(&step).unwrap(), "Chain x2: 6 fruits, +2");
        assert!(describe_event(&GameEvent::TimerTick { time_remaining: 3 }).is_none());
    }
}
