use crossterm::event::KeyEvent;
use rink_api::{GameState, LastGameRecap, LiveStatsUpdate, PlayByPlayFacts};

#[derive(Debug, Clone)]
pub enum NetworkRequest {
    RefreshScoreboard,
    /// Stats + latest-goal fetch; only issued while a live game is current.
    /// The team lines give the goal scan its logo/abbreviation context.
    RefreshDetail {
        game_id: String,
        home: rink_api::TeamLine,
        away: rink_api::TeamLine,
    },
    LoadLastGameRecap,
}

#[derive(Debug)]
pub enum NetworkResponse {
    /// A full snapshot built from one scoreboard poll.
    SnapshotReady { state: GameState, fetched_epoch: i64 },
    DetailReady {
        game_id: String,
        stats: Option<LiveStatsUpdate>,
        facts: Option<PlayByPlayFacts>,
    },
    RecapReady { recap: Option<LastGameRecap> },
    Error { message: String },
}

#[derive(Debug, Clone)]
pub enum UiEvent {
    /// A short press on the advance key engages or advances the manual
    /// screen cycle, standing in for the original device button.
    KeyPressed(KeyEvent),
    Tick,
    AppStarted,
}
