use crate::state::goal_queue::GoalQueue;
use rink_api::{GameState, GoalEvent};
use tracing::info;

/// How long a goal banner stays up before the next goal or the automatic
/// mode takes over.
pub const GOAL_BANNER_MS: u64 = 9_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenMode {
    NextGame,
    Live,
    Intermission,
    Final,
    LastGame,
    Goal,
    Standings,
    /// Legacy aliases kept for presenter compatibility; both render as
    /// `NextGame`.
    PreGame,
    NoGame,
}

impl ScreenMode {
    /// Collapses the legacy aliases onto the screen they actually show.
    pub fn canonical(self) -> ScreenMode {
        match self {
            ScreenMode::PreGame | ScreenMode::NoGame => ScreenMode::NextGame,
            other => other,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ScreenMode::NextGame | ScreenMode::PreGame | ScreenMode::NoGame => "next-game",
            ScreenMode::Live => "live",
            ScreenMode::Intermission => "intermission",
            ScreenMode::Final => "final",
            ScreenMode::LastGame => "last-game",
            ScreenMode::Goal => "goal",
            ScreenMode::Standings => "standings",
        }
    }
}

/// Button-driven manual cycle, in display order.
pub const MANUAL_SCREENS: [ScreenMode; 7] = [
    ScreenMode::LastGame,
    ScreenMode::NextGame,
    ScreenMode::Live,
    ScreenMode::Intermission,
    ScreenMode::Final,
    ScreenMode::Goal,
    ScreenMode::Standings,
];

/// The automatic mode for a snapshot. With no current game the next game
/// wins, then the recap, then the next-game screen as the empty default.
pub fn compute_mode(state: &GameState) -> ScreenMode {
    let Some(current) = state.current.as_ref() else {
        if state.next.is_some() {
            return ScreenMode::NextGame;
        }
        if state.last.is_some() {
            return ScreenMode::LastGame;
        }
        return ScreenMode::NextGame;
    };
    if current.phase.is_intermission() {
        return ScreenMode::Intermission;
    }
    if current.phase.is_live() {
        return ScreenMode::Live;
    }
    if current.phase.is_pre() {
        return ScreenMode::NextGame;
    }
    if current.phase.is_final() {
        return ScreenMode::Final;
    }
    ScreenMode::NextGame
}

/// Owns the displayed mode: automatic derivation, the manual-override
/// cycle, and the goal banner. Precedence is goal banner, then manual
/// override, then automatic. Time is passed in as milliseconds so the
/// transitions stay deterministic under test.
#[derive(Debug)]
pub struct ScreenController {
    mode: ScreenMode,
    manual_override: bool,
    manual_index: usize,
    banner_until_ms: u64,
}

impl Default for ScreenController {
    fn default() -> Self {
        Self {
            mode: ScreenMode::NextGame,
            manual_override: false,
            manual_index: 0,
            banner_until_ms: 0,
        }
    }
}

impl ScreenController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> ScreenMode {
        self.mode
    }

    pub fn manual_override(&self) -> bool {
        self.manual_override
    }

    pub fn banner_active(&self, now_ms: u64) -> bool {
        self.banner_until_ms > now_ms
    }

    /// Re-derive the automatic mode after a snapshot change. Suspended
    /// while a goal banner is up and while manual override is engaged.
    pub fn refresh(&mut self, state: &GameState, now_ms: u64) {
        if self.manual_override || self.banner_active(now_ms) {
            return;
        }
        self.transition(compute_mode(state), "auto");
    }

    /// One short press: engage override at the first screen, advance on
    /// each following press, disengage after cycling past the last entry.
    /// A press also dismisses an active goal banner.
    pub fn advance(&mut self, state: &GameState) {
        self.banner_until_ms = 0;
        if !self.manual_override {
            self.manual_override = true;
            self.manual_index = 0;
        } else {
            self.manual_index += 1;
            if self.manual_index >= MANUAL_SCREENS.len() {
                self.manual_override = false;
                self.manual_index = 0;
            }
        }
        if self.manual_override {
            self.transition(MANUAL_SCREENS[self.manual_index], "manual");
        } else {
            self.transition(compute_mode(state), "auto");
        }
    }

    /// Advance the banner clock: show a queued goal when nothing newer is
    /// on screen, and on banner expiry either chain to the next queued
    /// goal or fall back to the manual/automatic screen. A queued goal
    /// takes the screen even while manual override is engaged.
    pub fn tick(
        &mut self,
        state: &GameState,
        queue: &mut GoalQueue,
        now_ms: u64,
    ) -> Option<GoalEvent> {
        if self.mode == ScreenMode::Goal && self.banner_until_ms > 0 {
            if self.banner_active(now_ms) {
                return None;
            }
            if let Some(goal) = queue.dequeue() {
                self.show_goal(now_ms);
                return Some(goal);
            }
            self.banner_until_ms = 0;
            if self.manual_override {
                self.transition(MANUAL_SCREENS[self.manual_index], "manual");
            } else {
                self.transition(compute_mode(state), "auto");
            }
            return None;
        }

        if let Some(goal) = queue.dequeue() {
            self.show_goal(now_ms);
            return Some(goal);
        }
        None
    }

    fn show_goal(&mut self, now_ms: u64) {
        self.transition(ScreenMode::Goal, "goal");
        self.banner_until_ms = now_ms + GOAL_BANNER_MS;
    }

    fn transition(&mut self, next: ScreenMode, reason: &str) {
        if self.mode != next {
            info!(from = self.mode.label(), to = next.label(), reason, "screen mode change");
        }
        self.mode = next;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rink_api::{CurrentGame, GamePhase, LastGameRecap, NextGame, TeamLine};

    fn state_with_phase(phase: GamePhase) -> GameState {
        GameState {
            current: Some(CurrentGame {
                game_id: "g1".into(),
                start_epoch: 0,
                start_hhmm: String::new(),
                phase,
                status_detail: String::new(),
                status_short_detail: String::new(),
                clock: String::new(),
                period: 1,
                group: None,
                group_headline: String::new(),
                home: TeamLine::default(),
                away: TeamLine::default(),
                strength_label: String::new(),
                last_goal: None,
            }),
            feed_had_events: true,
            ..GameState::default()
        }
    }

    fn goal(id: u64) -> GoalEvent {
        GoalEvent { event_id: id, ..GoalEvent::default() }
    }

    #[test]
    fn automatic_mode_follows_the_phase() {
        assert_eq!(compute_mode(&state_with_phase(GamePhase::Pre)), ScreenMode::NextGame);
        assert_eq!(
            compute_mode(&state_with_phase(GamePhase::Live { intermission: false })),
            ScreenMode::Live
        );
        assert_eq!(
            compute_mode(&state_with_phase(GamePhase::Live { intermission: true })),
            ScreenMode::Intermission
        );
        assert_eq!(compute_mode(&state_with_phase(GamePhase::Final)), ScreenMode::Final);
    }

    #[test]
    fn no_current_game_prefers_next_then_recap() {
        let empty = GameState::default();
        assert_eq!(compute_mode(&empty), ScreenMode::NextGame);

        let with_next = GameState {
            next: Some(NextGame::default()),
            last: Some(LastGameRecap::default()),
            ..GameState::default()
        };
        assert_eq!(compute_mode(&with_next), ScreenMode::NextGame);

        let recap_only = GameState {
            last: Some(LastGameRecap::default()),
            ..GameState::default()
        };
        assert_eq!(compute_mode(&recap_only), ScreenMode::LastGame);
    }

    #[test]
    fn legacy_aliases_canonicalize_to_next_game() {
        assert_eq!(ScreenMode::PreGame.canonical(), ScreenMode::NextGame);
        assert_eq!(ScreenMode::NoGame.canonical(), ScreenMode::NextGame);
        assert_eq!(ScreenMode::Live.canonical(), ScreenMode::Live);
    }

    #[test]
    fn manual_cycle_walks_the_list_then_disengages() {
        let state = state_with_phase(GamePhase::Live { intermission: false });
        let mut ctl = ScreenController::new();
        ctl.refresh(&state, 0);
        assert_eq!(ctl.mode(), ScreenMode::Live);

        for expected in MANUAL_SCREENS {
            ctl.advance(&state);
            assert!(ctl.manual_override());
            assert_eq!(ctl.mode(), expected);
        }
        // One more press cycles past the end and restores automatic.
        ctl.advance(&state);
        assert!(!ctl.manual_override());
        assert_eq!(ctl.mode(), ScreenMode::Live);
    }

    #[test]
    fn refresh_never_moves_an_overridden_screen() {
        let live = state_with_phase(GamePhase::Live { intermission: false });
        let mut ctl = ScreenController::new();
        ctl.advance(&live);
        assert_eq!(ctl.mode(), ScreenMode::LastGame);
        ctl.refresh(&live, 0);
        assert_eq!(ctl.mode(), ScreenMode::LastGame);
    }

    #[test]
    fn goal_banner_runs_its_duration_then_restores_auto() {
        let live = state_with_phase(GamePhase::Live { intermission: false });
        let mut ctl = ScreenController::new();
        ctl.refresh(&live, 0);
        let mut queue = GoalQueue::new();
        queue.enqueue(goal(1));

        let shown = ctl.tick(&live, &mut queue, 1_000);
        assert_eq!(shown.map(|g| g.event_id), Some(1));
        assert_eq!(ctl.mode(), ScreenMode::Goal);

        // Mid-banner ticks hold the screen.
        assert!(ctl.tick(&live, &mut queue, 1_000 + GOAL_BANNER_MS - 1).is_none());
        assert_eq!(ctl.mode(), ScreenMode::Goal);

        assert!(ctl.tick(&live, &mut queue, 1_000 + GOAL_BANNER_MS).is_none());
        assert_eq!(ctl.mode(), ScreenMode::Live);
    }

    #[test]
    fn expiring_banner_chains_to_the_next_queued_goal() {
        let live = state_with_phase(GamePhase::Live { intermission: false });
        let mut ctl = ScreenController::new();
        let mut queue = GoalQueue::new();
        queue.enqueue(goal(1));
        queue.enqueue(goal(2));

        assert_eq!(ctl.tick(&live, &mut queue, 0).map(|g| g.event_id), Some(1));
        let second = ctl.tick(&live, &mut queue, GOAL_BANNER_MS);
        assert_eq!(second.map(|g| g.event_id), Some(2));
        assert_eq!(ctl.mode(), ScreenMode::Goal);
        // The chained goal gets a full duration of its own.
        assert!(ctl.banner_active(GOAL_BANNER_MS * 2 - 1));
    }

    #[test]
    fn goals_interrupt_manual_override_and_then_restore_it() {
        let live = state_with_phase(GamePhase::Live { intermission: false });
        let mut ctl = ScreenController::new();
        ctl.advance(&live);
        ctl.advance(&live);
        assert_eq!(ctl.mode(), ScreenMode::NextGame);

        let mut queue = GoalQueue::new();
        queue.enqueue(goal(9));
        assert!(ctl.tick(&live, &mut queue, 1_000).is_some());
        assert_eq!(ctl.mode(), ScreenMode::Goal);

        assert!(ctl.tick(&live, &mut queue, 1_000 + GOAL_BANNER_MS).is_none());
        assert!(ctl.manual_override());
        assert_eq!(ctl.mode(), ScreenMode::NextGame);
    }

    #[test]
    fn a_press_dismisses_an_active_banner() {
        let live = state_with_phase(GamePhase::Live { intermission: false });
        let mut ctl = ScreenController::new();
        let mut queue = GoalQueue::new();
        queue.enqueue(goal(1));
        ctl.tick(&live, &mut queue, 0);
        assert_eq!(ctl.mode(), ScreenMode::Goal);

        ctl.advance(&live);
        assert!(!ctl.banner_active(100));
        assert_eq!(ctl.mode(), ScreenMode::LastGame);
    }
}
