pub mod espn;
pub mod nhl;
pub mod nhl_client;
pub mod olympic;
pub mod reconcile;
pub mod select;
pub mod snapshot;
pub mod standings;
pub mod time;

pub use nhl_client::NhlApi;
pub use olympic::OlympicApi;

use std::fmt;
use thiserror::Error;

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("network error for {url}: {source}")]
    Network { url: String, source: reqwest::Error },
    #[error("API error for {url}: {source}")]
    Api { url: String, source: reqwest::Error },
    #[error("parse error for {url}: {source}")]
    Parsing { url: String, source: reqwest::Error },
    #[error("missing data: {0}")]
    MissingData(String),
}

// ---------------------------------------------------------------------------
// Bounded-capacity constants — tournament data sizes are fixed by the domain.
// ---------------------------------------------------------------------------

pub const MAX_STANDINGS_GROUPS: usize = 3;
pub const MAX_STANDINGS_ROWS: usize = 6;
pub const RECAP_MAX_SCORERS: usize = 3;
pub const RECAP_MAX_PERIODS: usize = 5;

pub const EVEN_STRENGTH: &str = "EVEN STRENGTH";

// ---------------------------------------------------------------------------
// Domain types — clean model, independent of either provider's wire format
// ---------------------------------------------------------------------------

/// One team's display facts for one game. Stats are `None` while unknown,
/// which is distinct from a known zero and must never regress once known
/// for the same game (see `reconcile`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TeamLine {
    pub abbr: String,
    pub name: String,
    pub logo_url: String,
    pub score: u16,
    pub sog: Option<u16>,
    pub hits: Option<u16>,
    pub fo_pct: Option<u8>,
}

/// Upstream lifecycle state. Providers disagree on whether a finished game
/// is flagged through `state` or `completed`, so finality is the union —
/// use `ParsedEvent::is_final`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EventState {
    #[default]
    Pre,
    In,
    Post,
}

/// A normalized single game as read from one upstream fetch.
#[derive(Debug, Clone, Default)]
pub struct ParsedEvent {
    pub id: String,
    /// Epoch seconds UTC; 0 = unknown.
    pub start_epoch: i64,
    pub state: EventState,
    pub completed: bool,
    pub detail: String,
    pub short_detail: String,
    pub clock: String,
    pub period: u8,
    /// Between-periods break; only meaningful while `state` is `In`.
    pub intermission: bool,
    pub group_headline: String,
    /// Tournament group letter, uppercase; `None` when not derivable.
    pub group: Option<char>,
    pub preliminary_round: bool,
    pub venue: String,
    pub city: String,
    pub home: TeamLine,
    pub away: TeamLine,
    pub has_focus_team: bool,
    pub overtime: bool,
    /// Whether the overtime flag came from a trustworthy indicator.
    /// Standings scoring falls back to regulation when this is false.
    pub overtime_reliable: bool,
}

impl ParsedEvent {
    pub fn is_final(&self) -> bool {
        self.state == EventState::Post || self.completed
    }
}

/// Lifecycle phase of the displayed game. At most one of pre/live/final
/// holds by construction; intermission only exists inside `Live`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    Pre,
    Live { intermission: bool },
    Final,
}

impl GamePhase {
    pub fn is_pre(&self) -> bool {
        matches!(self, GamePhase::Pre)
    }

    pub fn is_live(&self) -> bool {
        matches!(self, GamePhase::Live { .. })
    }

    pub fn is_intermission(&self) -> bool {
        matches!(self, GamePhase::Live { intermission: true })
    }

    pub fn is_final(&self) -> bool {
        matches!(self, GamePhase::Final)
    }
}

impl fmt::Display for GamePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GamePhase::Pre => write!(f, "pre"),
            GamePhase::Live { intermission: true } => write!(f, "intermission"),
            GamePhase::Live { intermission: false } => write!(f, "live"),
            GamePhase::Final => write!(f, "final"),
        }
    }
}

/// The game currently worth displaying: in-progress, else next scheduled,
/// else the most recent final.
#[derive(Debug, Clone)]
pub struct CurrentGame {
    pub game_id: String,
    pub start_epoch: i64,
    pub start_hhmm: String,
    pub phase: GamePhase,
    pub status_detail: String,
    pub status_short_detail: String,
    pub clock: String,
    pub period: u8,
    pub group: Option<char>,
    pub group_headline: String,
    pub home: TeamLine,
    pub away: TeamLine,
    pub strength_label: String,
    pub last_goal: Option<GoalEvent>,
}

/// Next scheduled game for the focus team, seen from the focus team's side.
#[derive(Debug, Clone, Default)]
pub struct NextGame {
    pub opponent_abbr: String,
    pub opponent_logo_url: String,
    pub focus_logo_url: String,
    pub focus_is_home: bool,
    pub venue: String,
    pub city: String,
    pub group: Option<char>,
    pub group_headline: String,
    pub start_epoch: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScorerEntry {
    pub name: String,
    pub goals: u8,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PeriodEntry {
    pub label: String,
    pub home: u8,
    pub away: u8,
}

/// Recap of the focus team's most recent completed game.
#[derive(Debug, Clone, Default)]
pub struct LastGameRecap {
    pub game_id: String,
    pub start_epoch: i64,
    pub home: TeamLine,
    pub away: TeamLine,
    pub venue: String,
    pub city: String,
    /// Up to RECAP_MAX_SCORERS per side, goals tallied per scorer.
    pub home_scorers: Vec<ScorerEntry>,
    pub away_scorers: Vec<ScorerEntry>,
    /// Up to RECAP_MAX_PERIODS period score lines ("P1", "OT", "SO").
    pub periods: Vec<PeriodEntry>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StandingsRow {
    pub abbr: String,
    pub gp: u8,
    /// Regulation wins.
    pub w: u8,
    pub otw: u8,
    pub otl: u8,
    /// Regulation losses.
    pub l: u8,
    pub pts: u8,
    pub gf: i16,
    pub ga: i16,
}

impl StandingsRow {
    pub fn goal_diff(&self) -> i16 {
        self.gf - self.ga
    }
}

#[derive(Debug, Clone, Default)]
pub struct GroupStandings {
    pub group: char,
    pub rows: Vec<StandingsRow>,
}

/// Per-group preliminary-round tables plus the focus team's standing.
#[derive(Debug, Clone, Default)]
pub struct Standings {
    pub groups: Vec<GroupStandings>,
    pub focus_group: Option<char>,
    /// 1-based rank within the focus team's group.
    pub focus_rank: Option<u8>,
    pub focus_pts: u8,
    /// True when at least one completed game had an untrustworthy OT/SO
    /// indicator and was scored as regulation. Global to the whole table.
    pub used_regulation_fallback: bool,
}

/// An immutable goal fact. `event_id` is the dedup key and is never zero.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GoalEvent {
    pub event_id: u64,
    pub text: String,
    pub team_abbr: String,
    pub team_logo_url: String,
    pub scorer: String,
    pub focus_scored: bool,
}

/// Stat corrections for one team, keyed by abbreviation, from a detail
/// fetch. `None` means the fetch did not report that stat.
#[derive(Debug, Clone, Default)]
pub struct TeamStatPatch {
    pub abbr: String,
    pub sog: Option<u16>,
    pub hits: Option<u16>,
    pub fo_pct: Option<u8>,
}

/// Clock/period/phase corrections plus per-team stats from the detail
/// endpoint, applied on top of the scoreboard snapshot.
#[derive(Debug, Clone, Default)]
pub struct LiveStatsUpdate {
    pub clock: Option<String>,
    pub period: Option<u8>,
    pub phase: Option<GamePhase>,
    pub detail: Option<String>,
    pub team_stats: Vec<TeamStatPatch>,
}

/// Facts derived from one backward scan of the play-by-play list.
#[derive(Debug, Clone, Default)]
pub struct PlayByPlayFacts {
    pub strength_label: Option<String>,
    pub home_fo_pct: Option<u8>,
    pub away_fo_pct: Option<u8>,
    pub latest_goal: Option<GoalEvent>,
}

/// The canonical renderable snapshot, rebuilt wholesale on each successful
/// poll. The only cross-poll patching is the stat carry-forward in
/// `reconcile`.
#[derive(Debug, Clone, Default)]
pub struct GameState {
    pub current: Option<CurrentGame>,
    pub next: Option<NextGame>,
    pub last: Option<LastGameRecap>,
    pub standings: Option<Standings>,
    /// Distinguishes "no game for the focus team" from "feed was empty".
    pub feed_had_events: bool,
}

impl GameState {
    pub fn is_live(&self) -> bool {
        self.current
            .as_ref()
            .map(|c| c.phase.is_live())
            .unwrap_or(false)
    }
}
