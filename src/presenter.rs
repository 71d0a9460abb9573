//! Presentation boundary. The original device drew to a panel; here the
//! same facts are rendered as plain text lines so any front end (or a
//! test) can consume them.

use crate::state::screen::ScreenMode;
use rink_api::{CurrentGame, GameState, GoalEvent, LastGameRecap, Standings};
use std::io::{self, Write};

pub trait Presenter {
    fn present(&mut self, view: &View<'_>) -> io::Result<()>;
}

/// Everything one frame needs, borrowed from the app.
pub struct View<'a> {
    pub mode: ScreenMode,
    pub state: &'a GameState,
    pub displayed_goal: Option<&'a GoalEvent>,
    pub focus_abbr: &'a str,
    pub stale: bool,
}

/// Writes one block of lines per frame to any `Write` sink.
pub struct LinePresenter<W: Write> {
    out: W,
}

impl LinePresenter<io::Stdout> {
    pub fn stdout() -> Self {
        Self { out: io::stdout() }
    }
}

impl<W: Write> LinePresenter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write> Presenter for LinePresenter<W> {
    fn present(&mut self, view: &View<'_>) -> io::Result<()> {
        for line in render_lines(view) {
            writeln!(self.out, "{line}")?;
        }
        writeln!(self.out)?;
        self.out.flush()
    }
}

pub fn render_lines(view: &View<'_>) -> Vec<String> {
    let mut lines = Vec::new();
    let mut header = format!("[{}]", view.mode.label());
    if view.stale {
        header.push_str(" (stale)");
    }
    lines.push(header);

    match view.mode.canonical() {
        ScreenMode::NextGame => render_next(&mut lines, view),
        ScreenMode::Live | ScreenMode::Intermission | ScreenMode::Final => {
            render_current(&mut lines, view)
        }
        ScreenMode::LastGame => render_last(&mut lines, view.state.last.as_ref()),
        ScreenMode::Goal => render_goal(&mut lines, view.displayed_goal),
        ScreenMode::Standings => {
            render_standings(&mut lines, view.state.standings.as_ref(), view.focus_abbr)
        }
        // canonical() never yields the aliases.
        ScreenMode::PreGame | ScreenMode::NoGame => {}
    }
    lines
}

fn render_next(lines: &mut Vec<String>, view: &View<'_>) {
    match view.state.next.as_ref() {
        Some(next) => {
            let side = if next.focus_is_home { "vs" } else { "at" };
            lines.push(format!("{} {} {}", view.focus_abbr, side, next.opponent_abbr));
            push_venue(lines, &next.venue, &next.city);
            if let Some(group) = next.group {
                lines.push(format!("Group {group}"));
            }
        }
        None => {
            if view.state.feed_had_events {
                lines.push(format!("no upcoming game for {}", view.focus_abbr));
            } else {
                lines.push("no games in the feed".to_string());
            }
        }
    }
}

fn render_current(lines: &mut Vec<String>, view: &View<'_>) {
    let Some(cur) = view.state.current.as_ref() else {
        lines.push("no current game".to_string());
        return;
    };
    lines.push(score_line(cur));
    if cur.phase.is_live() {
        let clock = if cur.phase.is_intermission() {
            format!("INT{}", cur.period)
        } else if cur.clock.is_empty() {
            format!("P{}", cur.period)
        } else {
            format!("P{} {}", cur.period, cur.clock)
        };
        lines.push(clock);
        lines.push(cur.strength_label.clone());
        push_stats(lines, cur);
    } else if cur.phase.is_final() {
        lines.push(if cur.status_short_detail.is_empty() {
            "FINAL".to_string()
        } else {
            cur.status_short_detail.clone()
        });
    } else if !cur.start_hhmm.is_empty() {
        lines.push(format!("starts {}", cur.start_hhmm));
    }
}

fn render_last(lines: &mut Vec<String>, last: Option<&LastGameRecap>) {
    let Some(last) = last else {
        lines.push("no completed game yet".to_string());
        return;
    };
    lines.push(format!(
        "{} {} - {} {}",
        last.away.abbr, last.away.score, last.home.score, last.home.abbr
    ));
    for p in &last.periods {
        lines.push(format!("{}: {}-{}", p.label, p.away, p.home));
    }
    for s in last.away_scorers.iter().chain(last.home_scorers.iter()) {
        lines.push(if s.goals > 1 {
            format!("{} ({})", s.name, s.goals)
        } else {
            s.name.clone()
        });
    }
    push_venue(lines, &last.venue, &last.city);
}

fn render_goal(lines: &mut Vec<String>, goal: Option<&GoalEvent>) {
    let Some(goal) = goal else {
        lines.push("GOAL".to_string());
        return;
    };
    lines.push(format!("GOAL {}", goal.team_abbr));
    if !goal.scorer.is_empty() {
        lines.push(goal.scorer.clone());
    }
    if !goal.text.is_empty() {
        lines.push(goal.text.clone());
    }
}

fn render_standings(lines: &mut Vec<String>, standings: Option<&Standings>, focus: &str) {
    let Some(standings) = standings else {
        lines.push("standings unavailable".to_string());
        return;
    };
    for group in &standings.groups {
        lines.push(format!("Group {}", group.group));
        for row in &group.rows {
            let marker = if row.abbr == focus { ">" } else { " " };
            lines.push(format!(
                "{marker}{} {} {}-{}-{}-{} {}pts {:+}",
                row.abbr,
                row.gp,
                row.w,
                row.otw,
                row.otl,
                row.l,
                row.pts,
                row.goal_diff()
            ));
        }
    }
    if let (Some(group), Some(rank)) = (standings.focus_group, standings.focus_rank) {
        lines.push(format!("{focus}: #{rank} in Group {group}, {}pts", standings.focus_pts));
    }
    if standings.used_regulation_fallback {
        lines.push("* some results scored as regulation".to_string());
    }
}

fn score_line(cur: &CurrentGame) -> String {
    format!(
        "{} {} - {} {}",
        cur.away.abbr, cur.away.score, cur.home.score, cur.home.abbr
    )
}

fn push_stats(lines: &mut Vec<String>, cur: &CurrentGame) {
    let fmt = |v: Option<u16>| v.map(|v| v.to_string()).unwrap_or_else(|| "-".into());
    let fmt_pct = |v: Option<u8>| v.map(|v| format!("{v}%")).unwrap_or_else(|| "-".into());
    lines.push(format!("SOG {} - {}", fmt(cur.away.sog), fmt(cur.home.sog)));
    lines.push(format!("HIT {} - {}", fmt(cur.away.hits), fmt(cur.home.hits)));
    lines.push(format!(
        "FO% {} - {}",
        fmt_pct(cur.away.fo_pct),
        fmt_pct(cur.home.fo_pct)
    ));
}

fn push_venue(lines: &mut Vec<String>, venue: &str, city: &str) {
    match (venue.is_empty(), city.is_empty()) {
        (false, false) => lines.push(format!("{venue}, {city}")),
        (false, true) => lines.push(venue.to_string()),
        (true, false) => lines.push(city.to_string()),
        (true, true) => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rink_api::{GamePhase, NextGame, TeamLine};

    fn live_state() -> GameState {
        GameState {
            current: Some(CurrentGame {
                game_id: "g1".into(),
                start_epoch: 0,
                start_hhmm: String::new(),
                phase: GamePhase::Live { intermission: false },
                status_detail: String::new(),
                status_short_detail: String::new(),
                clock: "07:12".into(),
                period: 2,
                group: Some('A'),
                group_headline: String::new(),
                home: TeamLine { abbr: "CAN".into(), score: 2, sog: Some(18), ..TeamLine::default() },
                away: TeamLine { abbr: "SWE".into(), score: 1, ..TeamLine::default() },
                strength_label: "CAN POWER PLAY".into(),
                last_goal: None,
            }),
            feed_had_events: true,
            ..GameState::default()
        }
    }

    #[test]
    fn live_screen_shows_score_clock_and_strength() {
        let state = live_state();
        let view = View {
            mode: ScreenMode::Live,
            state: &state,
            displayed_goal: None,
            focus_abbr: "CAN",
            stale: false,
        };
        let lines = render_lines(&view);
        assert_eq!(lines[0], "[live]");
        assert_eq!(lines[1], "SWE 1 - 2 CAN");
        assert_eq!(lines[2], "P2 07:12");
        assert_eq!(lines[3], "CAN POWER PLAY");
        assert!(lines.iter().any(|l| l == "SOG - - 18"));
    }

    #[test]
    fn stale_data_is_marked_in_the_header() {
        let state = GameState::default();
        let view = View {
            mode: ScreenMode::NextGame,
            state: &state,
            displayed_goal: None,
            focus_abbr: "CAN",
            stale: true,
        };
        assert_eq!(render_lines(&view)[0], "[next-game] (stale)");
    }

    #[test]
    fn empty_feed_and_no_focus_game_read_differently() {
        let empty = GameState::default();
        let view = View {
            mode: ScreenMode::NextGame,
            state: &empty,
            displayed_goal: None,
            focus_abbr: "CAN",
            stale: false,
        };
        assert!(render_lines(&view).contains(&"no games in the feed".to_string()));

        let had_events = GameState { feed_had_events: true, ..GameState::default() };
        let view = View { state: &had_events, ..view };
        assert!(render_lines(&view).contains(&"no upcoming game for CAN".to_string()));
    }

    #[test]
    fn legacy_modes_render_as_next_game() {
        let mut state = GameState { feed_had_events: true, ..GameState::default() };
        state.next = Some(NextGame {
            opponent_abbr: "FIN".into(),
            focus_is_home: false,
            ..NextGame::default()
        });
        for mode in [ScreenMode::PreGame, ScreenMode::NoGame, ScreenMode::NextGame] {
            let view = View {
                mode,
                state: &state,
                displayed_goal: None,
                focus_abbr: "CAN",
                stale: false,
            };
            assert!(render_lines(&view).contains(&"CAN at FIN".to_string()));
        }
    }

    #[test]
    fn goal_screen_uses_the_displayed_goal() {
        let state = live_state();
        let goal = GoalEvent {
            event_id: 5,
            team_abbr: "CAN".into(),
            scorer: "McDavid".into(),
            text: "ASSISTS: Crosby".into(),
            focus_scored: true,
            ..GoalEvent::default()
        };
        let view = View {
            mode: ScreenMode::Goal,
            state: &state,
            displayed_goal: Some(&goal),
            focus_abbr: "CAN",
            stale: false,
        };
        let lines = render_lines(&view);
        assert_eq!(lines[1], "GOAL CAN");
        assert_eq!(lines[2], "McDavid");
        assert_eq!(lines[3], "ASSISTS: Crosby");
    }
}
