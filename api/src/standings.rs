//! Preliminary-round standings, rebuilt from scratch on every poll out of
//! the completed group-stage games in the event list.
//!
//! IIHF group-stage scoring: 3 points for a regulation win, 2 for an
//! overtime or shootout win, 1 for an overtime or shootout loss, 0 for a
//! regulation loss. When a final game's overtime indicator is not
//! trustworthy it is scored as regulation and the table is flagged.

use crate::{
    GroupStandings, ParsedEvent, Standings, StandingsRow, MAX_STANDINGS_GROUPS,
    MAX_STANDINGS_ROWS,
};
use std::collections::BTreeMap;

pub fn build_standings(events: &[ParsedEvent], focus_abbr: &str) -> Standings {
    let mut groups: BTreeMap<char, Vec<StandingsRow>> = BTreeMap::new();
    let mut used_regulation_fallback = false;

    for ev in events {
        if !ev.preliminary_round || !ev.is_final() {
            continue;
        }
        let Some(group) = ev.group else { continue };
        if ev.home.abbr.is_empty() || ev.away.abbr.is_empty() {
            continue;
        }
        // No trustworthy indicator means the game is scored as regulation
        // and the whole table carries the fallback marker.
        let overtime = ev.overtime && ev.overtime_reliable;
        if !ev.overtime_reliable {
            used_regulation_fallback = true;
        }

        let rows = groups.entry(group).or_default();
        // A drawn final is malformed input in this sport; the game still
        // counts but neither side earns points.
        let home_won = ev.home.score > ev.away.score;
        let drawn = ev.home.score == ev.away.score;
        let outcome = |won| (!drawn).then_some((won, overtime));
        record_game(rows, &ev.home.abbr, ev.home.score, ev.away.score, outcome(home_won));
        record_game(rows, &ev.away.abbr, ev.away.score, ev.home.score, outcome(!home_won));
    }

    let mut table = Standings {
        used_regulation_fallback,
        ..Standings::default()
    };

    for (group, mut rows) in groups {
        if table.groups.len() >= MAX_STANDINGS_GROUPS {
            break;
        }
        sort_rows(&mut rows);
        rows.truncate(MAX_STANDINGS_ROWS);
        table.groups.push(GroupStandings { group, rows });
    }

    for group in &table.groups {
        for (idx, row) in group.rows.iter().enumerate() {
            if row.abbr == focus_abbr {
                table.focus_group = Some(group.group);
                table.focus_rank = Some(idx as u8 + 1);
                table.focus_pts = row.pts;
            }
        }
    }

    table
}

fn record_game(
    rows: &mut Vec<StandingsRow>,
    abbr: &str,
    scored: u16,
    allowed: u16,
    outcome: Option<(bool, bool)>,
) {
    let idx = match rows.iter().position(|r| r.abbr == abbr) {
        Some(idx) => idx,
        None => {
            rows.push(StandingsRow { abbr: abbr.to_string(), ..StandingsRow::default() });
            rows.len() - 1
        }
    };
    let row = &mut rows[idx];

    row.gp = row.gp.saturating_add(1);
    row.gf = row.gf.saturating_add(scored as i16);
    row.ga = row.ga.saturating_add(allowed as i16);
    let Some((won, overtime)) = outcome else { return };
    match (won, overtime) {
        (true, false) => {
            row.w = row.w.saturating_add(1);
            row.pts = row.pts.saturating_add(3);
        }
        (true, true) => {
            row.otw = row.otw.saturating_add(1);
            row.pts = row.pts.saturating_add(2);
        }
        (false, true) => {
            row.otl = row.otl.saturating_add(1);
            row.pts = row.pts.saturating_add(1);
        }
        (false, false) => {
            row.l = row.l.saturating_add(1);
        }
    }
}

/// Points, then goal differential, then goals for, all descending; ties
/// broken alphabetically so reorders are deterministic.
fn sort_rows(rows: &mut [StandingsRow]) {
    rows.sort_by(|a, b| {
        b.pts
            .cmp(&a.pts)
            .then_with(|| b.goal_diff().cmp(&a.goal_diff()))
            .then_with(|| b.gf.cmp(&a.gf))
            .then_with(|| a.abbr.cmp(&b.abbr))
    });
}
