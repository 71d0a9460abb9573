//! Snapshot assembly: one parsed event list in, one renderable
//! `GameState` out. Rebuilt wholesale on every successful poll; the only
//! cross-poll patching happens afterwards in `reconcile`.

use crate::select::{find_last_final, find_next, pick_current};
use crate::standings::build_standings;
use crate::time::hhmm_local;
use crate::{
    CurrentGame, EventState, GamePhase, GameState, LastGameRecap, NextGame, ParsedEvent,
    EVEN_STRENGTH,
};

pub fn build_game_state(events: &[ParsedEvent], focus_abbr: &str, now_epoch: i64) -> GameState {
    let mut state = GameState {
        feed_had_events: !events.is_empty(),
        ..GameState::default()
    };

    let standings = build_standings(events, focus_abbr);
    if !standings.groups.is_empty() {
        state.standings = Some(standings);
    }

    state.current = pick_current(events, now_epoch).map(current_from_event);
    state.next = find_next(events, now_epoch).map(|ev| next_from_event(ev, focus_abbr));
    state.last = find_last_final(events).map(recap_from_event);

    state
}

/// Finality wins over everything, then in-progress, then scheduled.
/// Intermission only survives into the live phase.
pub fn phase_of(ev: &ParsedEvent) -> GamePhase {
    if ev.is_final() {
        GamePhase::Final
    } else if ev.state == EventState::In {
        GamePhase::Live { intermission: ev.intermission }
    } else {
        GamePhase::Pre
    }
}

fn current_from_event(ev: &ParsedEvent) -> CurrentGame {
    CurrentGame {
        game_id: ev.id.clone(),
        start_epoch: ev.start_epoch,
        start_hhmm: if ev.start_epoch > 0 {
            hhmm_local(ev.start_epoch)
        } else {
            String::new()
        },
        phase: phase_of(ev),
        status_detail: ev.detail.clone(),
        status_short_detail: ev.short_detail.clone(),
        clock: ev.clock.clone(),
        period: ev.period,
        group: ev.group,
        group_headline: ev.group_headline.clone(),
        home: ev.home.clone(),
        away: ev.away.clone(),
        strength_label: EVEN_STRENGTH.to_string(),
        last_goal: None,
    }
}

fn next_from_event(ev: &ParsedEvent, focus_abbr: &str) -> NextGame {
    let focus_is_home = ev.home.abbr == focus_abbr;
    let (focus, opponent) = if focus_is_home {
        (&ev.home, &ev.away)
    } else {
        (&ev.away, &ev.home)
    };
    NextGame {
        opponent_abbr: opponent.abbr.clone(),
        opponent_logo_url: opponent.logo_url.clone(),
        focus_logo_url: focus.logo_url.clone(),
        focus_is_home,
        venue: ev.venue.clone(),
        city: ev.city.clone(),
        group: ev.group,
        group_headline: ev.group_headline.clone(),
        start_epoch: ev.start_epoch,
    }
}

/// Minimal recap from the scoreboard alone; the league feed enriches it
/// with scorers and period lines through `NhlApi::fetch_recap`.
fn recap_from_event(ev: &ParsedEvent) -> LastGameRecap {
    LastGameRecap {
        game_id: ev.id.clone(),
        start_epoch: ev.start_epoch,
        home: ev.home.clone(),
        away: ev.away.clone(),
        venue: ev.venue.clone(),
        city: ev.city.clone(),
        ..LastGameRecap::default()
    }
}
