use std::future::Future;

use super::match3::{GameEvent, Match3Snapshot, SessionSummary};

/// Receives everything a front end needs to draw the game.
pub trait GameBroadcaster: Send + Sync + Clone + 'static {
    fn broadcast_state(
        &self,
        snapshot: Match3Snapshot,
        events: Vec<GameEvent>,
    ) -> impl Future<Output = ()> + Send;

    fn broadcast_game_over(&self, summary: &SessionSummary) -> impl Future<Output = ()> + Send;
}
