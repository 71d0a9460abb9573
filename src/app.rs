use crate::config::{Config, FeedProvider};
use crate::state::goal_queue::GoalQueue;
use crate::state::messages::NetworkRequest;
use crate::state::screen::{ScreenController, ScreenMode};
use rink_api::reconcile::carry_forward_stats;
use rink_api::{GameState, GoalEvent, LiveStatsUpdate, PlayByPlayFacts};
use tracing::debug;

pub struct App {
    pub config: Config,
    pub state: GameState,
    /// The goal currently on the banner, if the screen mode is `Goal`.
    pub displayed_goal: Option<GoalEvent>,
    screen: ScreenController,
    goal_queue: GoalQueue,
    /// Epoch seconds of the last successful scoreboard fetch; 0 = never.
    last_good_fetch_epoch: i64,
    /// Last goal id already enqueued, so the leading play isn't re-enqueued
    /// on every detail poll.
    last_seen_goal_id: u64,
    last_scoreboard_poll_ms: Option<u64>,
    last_detail_poll_ms: Option<u64>,
    recap_requested: bool,
}

impl App {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            state: GameState::default(),
            displayed_goal: None,
            screen: ScreenController::new(),
            goal_queue: GoalQueue::new(),
            last_good_fetch_epoch: 0,
            last_seen_goal_id: 0,
            last_scoreboard_poll_ms: None,
            last_detail_poll_ms: None,
            recap_requested: false,
        }
    }

    pub fn mode(&self) -> ScreenMode {
        self.screen.mode()
    }

    pub fn is_stale(&self, now_epoch: i64) -> bool {
        self.last_good_fetch_epoch == 0
            || now_epoch - self.last_good_fetch_epoch > self.config.staleness.as_secs() as i64
    }

    // -----------------------------------------------------------------------
    // Network response handlers — called from the main loop
    // -----------------------------------------------------------------------

    /// Replace the snapshot wholesale, carrying forward stats (and the goal
    /// facts already on screen) when the new snapshot describes the same
    /// game. Returns true when a recap enrichment fetch should follow.
    pub fn on_snapshot(&mut self, mut new_state: GameState, fetched_epoch: i64, now_ms: u64) -> bool {
        carry_forward_stats(&mut new_state, &self.state);
        if let (Some(cur), Some(prev)) = (new_state.current.as_mut(), self.state.current.as_ref()) {
            if cur.game_id == prev.game_id {
                cur.strength_label = prev.strength_label.clone();
                cur.last_goal = prev.last_goal.clone();
            }
        }
        // A recap enriched by an earlier fetch survives snapshot turnover.
        if let (Some(new_last), Some(old_last)) = (new_state.last.as_mut(), self.state.last.as_ref())
        {
            if new_last.game_id == old_last.game_id && !old_last.periods.is_empty() {
                *new_last = old_last.clone();
            }
        }

        self.state = new_state;
        self.last_good_fetch_epoch = fetched_epoch;
        self.screen.refresh(&self.state, now_ms);

        let wants_recap = self.config.provider == FeedProvider::Nhl
            && !self.recap_requested
            && self
                .state
                .last
                .as_ref()
                .map(|l| l.periods.is_empty())
                .unwrap_or(false);
        if wants_recap {
            self.recap_requested = true;
        }
        wants_recap
    }

    /// Apply a detail fetch to the current game; stale responses for a game
    /// no longer current are dropped.
    pub fn on_detail(
        &mut self,
        game_id: &str,
        stats: Option<LiveStatsUpdate>,
        facts: Option<PlayByPlayFacts>,
        now_ms: u64,
    ) {
        let Some(current) = self.state.current.as_mut() else {
            return;
        };
        if current.game_id != game_id {
            debug!("dropping detail for stale game {game_id}");
            return;
        }

        if let Some(stats) = stats {
            if let Some(clock) = stats.clock {
                current.clock = clock;
            }
            if let Some(period) = stats.period {
                current.period = period;
            }
            if let Some(phase) = stats.phase {
                current.phase = phase;
            }
            if let Some(detail) = stats.detail {
                current.status_detail = detail;
            }
            for patch in stats.team_stats {
                let team = if patch.abbr == current.home.abbr {
                    &mut current.home
                } else if patch.abbr == current.away.abbr {
                    &mut current.away
                } else {
                    continue;
                };
                if patch.sog.is_some() {
                    team.sog = patch.sog;
                }
                if patch.hits.is_some() {
                    team.hits = patch.hits;
                }
                if patch.fo_pct.is_some() {
                    team.fo_pct = patch.fo_pct;
                }
            }
        }

        if let Some(facts) = facts {
            if let Some(label) = facts.strength_label {
                current.strength_label = label;
            }
            if facts.home_fo_pct.is_some() {
                current.home.fo_pct = facts.home_fo_pct;
            }
            if facts.away_fo_pct.is_some() {
                current.away.fo_pct = facts.away_fo_pct;
            }
            if let Some(goal) = facts.latest_goal {
                if goal.event_id != 0 && goal.event_id != self.last_seen_goal_id {
                    self.last_seen_goal_id = goal.event_id;
                    current.last_goal = Some(goal.clone());
                    self.goal_queue.enqueue(goal);
                }
            }
        }

        self.screen.refresh(&self.state, now_ms);
    }

    pub fn on_recap(&mut self, recap: Option<rink_api::LastGameRecap>) {
        if let Some(recap) = recap {
            self.state.last = Some(recap);
        }
    }

    // -----------------------------------------------------------------------
    // Input and cadence
    // -----------------------------------------------------------------------

    pub fn on_advance(&mut self) {
        self.screen.advance(&self.state);
    }

    /// Banner bookkeeping for one tick; returns true when the screen needs
    /// re-presenting because a goal banner appeared or expired.
    pub fn tick_screen(&mut self, now_ms: u64) -> bool {
        let before = self.screen.mode();
        if let Some(goal) = self.screen.tick(&self.state, &mut self.goal_queue, now_ms) {
            self.displayed_goal = Some(goal);
            return true;
        }
        let after = self.screen.mode();
        if after != ScreenMode::Goal {
            self.displayed_goal = None;
        }
        before != after
    }

    pub fn scoreboard_poll_due(&mut self, now_ms: u64) -> bool {
        let period = self.config.scoreboard_poll.as_millis() as u64;
        let due = match self.last_scoreboard_poll_ms {
            None => true,
            Some(last) => now_ms.saturating_sub(last) >= period,
        };
        if due {
            self.last_scoreboard_poll_ms = Some(now_ms);
        }
        due
    }

    /// Detail polls only run for an in-progress current game.
    pub fn detail_poll_due(&mut self, now_ms: u64) -> Option<NetworkRequest> {
        let current = self.state.current.as_ref()?;
        if !current.phase.is_live() {
            return None;
        }
        let period = self.config.detail_poll.as_millis() as u64;
        let due = match self.last_detail_poll_ms {
            None => true,
            Some(last) => now_ms.saturating_sub(last) >= period,
        };
        if !due {
            return None;
        }
        self.last_detail_poll_ms = Some(now_ms);
        Some(NetworkRequest::RefreshDetail {
            game_id: current.game_id.clone(),
            home: current.home.clone(),
            away: current.away.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rink_api::{CurrentGame, GamePhase, TeamLine};

    fn test_app() -> App {
        App::new(Config::default())
    }

    fn snapshot(game_id: &str, phase: GamePhase) -> GameState {
        GameState {
            current: Some(CurrentGame {
                game_id: game_id.into(),
                start_epoch: 1_770_000_000,
                start_hhmm: "19:00".into(),
                phase,
                status_detail: String::new(),
                status_short_detail: String::new(),
                clock: "20:00".into(),
                period: 1,
                group: Some('A'),
                group_headline: String::new(),
                home: TeamLine { abbr: "CAN".into(), ..TeamLine::default() },
                away: TeamLine { abbr: "SWE".into(), ..TeamLine::default() },
                strength_label: "EVEN STRENGTH".into(),
                last_goal: None,
            }),
            feed_had_events: true,
            ..GameState::default()
        }
    }

    fn facts_with_goal(id: u64) -> PlayByPlayFacts {
        PlayByPlayFacts {
            latest_goal: Some(GoalEvent {
                event_id: id,
                team_abbr: "CAN".into(),
                focus_scored: true,
                ..GoalEvent::default()
            }),
            ..PlayByPlayFacts::default()
        }
    }

    #[test]
    fn staleness_tracks_the_last_good_fetch() {
        let mut app = test_app();
        assert!(app.is_stale(1_770_000_000), "no fetch yet is stale");

        app.on_snapshot(snapshot("g1", GamePhase::Live { intermission: false }), 1_770_000_000, 0);
        assert!(!app.is_stale(1_770_000_059));
        assert!(app.is_stale(1_770_000_061));
    }

    #[test]
    fn the_same_goal_id_is_enqueued_only_once() {
        let mut app = test_app();
        app.on_snapshot(snapshot("g1", GamePhase::Live { intermission: false }), 1, 0);

        app.on_detail("g1", None, Some(facts_with_goal(42)), 0);
        app.on_detail("g1", None, Some(facts_with_goal(42)), 0);
        assert!(app.tick_screen(0), "first tick shows the goal");
        assert_eq!(app.displayed_goal.as_ref().map(|g| g.event_id), Some(42));

        // No second banner for the same play on the next poll.
        assert!(!app.tick_screen(100));
    }

    #[test]
    fn detail_for_a_stale_game_is_dropped() {
        let mut app = test_app();
        app.on_snapshot(snapshot("g1", GamePhase::Live { intermission: false }), 1, 0);
        app.on_detail("g0", None, Some(facts_with_goal(7)), 0);
        assert!(!app.tick_screen(0));
    }

    #[test]
    fn stat_patches_match_teams_by_abbreviation() {
        let mut app = test_app();
        app.on_snapshot(snapshot("g1", GamePhase::Live { intermission: false }), 1, 0);
        let stats = LiveStatsUpdate {
            clock: Some("12:34".into()),
            period: Some(2),
            team_stats: vec![
                rink_api::TeamStatPatch {
                    abbr: "SWE".into(),
                    sog: Some(9),
                    ..rink_api::TeamStatPatch::default()
                },
                rink_api::TeamStatPatch {
                    abbr: "CAN".into(),
                    sog: Some(15),
                    hits: Some(12),
                    ..rink_api::TeamStatPatch::default()
                },
            ],
            ..LiveStatsUpdate::default()
        };
        app.on_detail("g1", Some(stats), None, 0);
        let cur = app.state.current.as_ref().unwrap();
        assert_eq!(cur.clock, "12:34");
        assert_eq!(cur.period, 2);
        assert_eq!(cur.home.sog, Some(15));
        assert_eq!(cur.home.hits, Some(12));
        assert_eq!(cur.away.sog, Some(9));
    }

    #[test]
    fn snapshot_turnover_keeps_stats_for_the_same_game() {
        let mut app = test_app();
        app.on_snapshot(snapshot("g1", GamePhase::Live { intermission: false }), 1, 0);
        let stats = LiveStatsUpdate {
            team_stats: vec![rink_api::TeamStatPatch {
                abbr: "CAN".into(),
                sog: Some(20),
                ..rink_api::TeamStatPatch::default()
            }],
            ..LiveStatsUpdate::default()
        };
        app.on_detail("g1", Some(stats), None, 0);

        // Next poll's snapshot reports sog unknown again.
        app.on_snapshot(snapshot("g1", GamePhase::Live { intermission: false }), 2, 0);
        assert_eq!(app.state.current.as_ref().unwrap().home.sog, Some(20));

        // A new game starts from scratch.
        app.on_snapshot(snapshot("g2", GamePhase::Live { intermission: false }), 3, 0);
        assert_eq!(app.state.current.as_ref().unwrap().home.sog, None);
    }

    #[test]
    fn detail_polls_only_run_while_live() {
        let mut app = test_app();
        assert!(app.detail_poll_due(0).is_none(), "no game, no poll");

        app.on_snapshot(snapshot("g1", GamePhase::Pre), 1, 0);
        assert!(app.detail_poll_due(0).is_none(), "pre-game, no poll");

        app.on_snapshot(snapshot("g1", GamePhase::Live { intermission: false }), 2, 0);
        assert!(app.detail_poll_due(0).is_some());
        assert!(app.detail_poll_due(1_000).is_none(), "inside the poll period");
        assert!(app.detail_poll_due(9_000).is_some());
    }

    #[test]
    fn scoreboard_poll_respects_its_period() {
        let mut app = test_app();
        assert!(app.scoreboard_poll_due(0));
        assert!(!app.scoreboard_poll_due(14_999));
        assert!(app.scoreboard_poll_due(15_000));
    }

    #[test]
    fn recap_fetch_requested_once_for_the_league_feed() {
        let mut app = App::new(Config {
            provider: FeedProvider::Nhl,
            ..Config::default()
        });
        let mut state = snapshot("g1", GamePhase::Final);
        state.last = Some(rink_api::LastGameRecap {
            game_id: "g0".into(),
            ..rink_api::LastGameRecap::default()
        });
        assert!(app.on_snapshot(state.clone(), 1, 0));
        assert!(!app.on_snapshot(state, 2, 0), "only requested once");
    }
}
