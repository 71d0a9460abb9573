//! Cross-poll stat carry-forward.
//!
//! Snapshots replace each other wholesale, but the detail endpoint is
//! flaky: a poll that misses shots/hits/faceoff% would blank a stat the
//! display already shows. When the new snapshot describes the same game as
//! the old one, unknown stat fields inherit the old known values.

use crate::{GameState, TeamLine};

/// Same game means the game id, home abbreviation, and away abbreviation
/// all match. A new matchup starts with all stats unknown again.
pub fn carry_forward_stats(new: &mut GameState, old: &GameState) {
    let (Some(cur), Some(prev)) = (new.current.as_mut(), old.current.as_ref()) else {
        return;
    };
    if cur.game_id != prev.game_id
        || cur.home.abbr != prev.home.abbr
        || cur.away.abbr != prev.away.abbr
    {
        return;
    }
    fill_unknown(&mut cur.home, &prev.home);
    fill_unknown(&mut cur.away, &prev.away);
}

fn fill_unknown(team: &mut TeamLine, prev: &TeamLine) {
    if team.sog.is_none() {
        team.sog = prev.sog;
    }
    if team.hits.is_none() {
        team.hits = prev.hits;
    }
    if team.fo_pct.is_none() {
        team.fo_pct = prev.fo_pct;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CurrentGame, GamePhase, TeamLine};

    fn state(game_id: &str, home: &str, away: &str, home_sog: Option<u16>) -> GameState {
        GameState {
            current: Some(CurrentGame {
                game_id: game_id.into(),
                start_epoch: 0,
                start_hhmm: String::new(),
                phase: GamePhase::Live { intermission: false },
                status_detail: String::new(),
                status_short_detail: String::new(),
                clock: String::new(),
                period: 2,
                group: None,
                group_headline: String::new(),
                home: TeamLine {
                    abbr: home.into(),
                    sog: home_sog,
                    hits: home_sog.map(|_| 10),
                    fo_pct: home_sog.map(|_| 55),
                    ..TeamLine::default()
                },
                away: TeamLine { abbr: away.into(), ..TeamLine::default() },
                strength_label: String::new(),
                last_goal: None,
            }),
            ..GameState::default()
        }
    }

    #[test]
    fn unknown_stats_inherit_from_the_same_game() {
        let old = state("g1", "CAN", "SWE", Some(12));
        let mut new = state("g1", "CAN", "SWE", None);
        carry_forward_stats(&mut new, &old);
        let cur = new.current.unwrap();
        assert_eq!(cur.home.sog, Some(12));
        assert_eq!(cur.home.hits, Some(10));
        assert_eq!(cur.home.fo_pct, Some(55));
    }

    #[test]
    fn known_stats_are_never_overwritten() {
        let old = state("g1", "CAN", "SWE", Some(12));
        let mut new = state("g1", "CAN", "SWE", Some(14));
        carry_forward_stats(&mut new, &old);
        assert_eq!(new.current.unwrap().home.sog, Some(14));
    }

    #[test]
    fn a_different_game_id_blocks_carry_forward() {
        let old = state("g1", "CAN", "SWE", Some(12));
        let mut new = state("g2", "CAN", "SWE", None);
        carry_forward_stats(&mut new, &old);
        assert_eq!(new.current.unwrap().home.sog, None);
    }

    #[test]
    fn a_different_matchup_blocks_carry_forward() {
        // Same id but different teams: providers reuse ids across days.
        let old = state("g1", "CAN", "SWE", Some(12));
        let mut new = state("g1", "CAN", "FIN", None);
        carry_forward_stats(&mut new, &old);
        assert_eq!(new.current.unwrap().home.sog, None);
    }

    #[test]
    fn missing_current_on_either_side_is_a_no_op() {
        let old = state("g1", "CAN", "SWE", Some(12));
        let mut new = GameState::default();
        carry_forward_stats(&mut new, &old);
        assert!(new.current.is_none());

        let mut new = state("g1", "CAN", "SWE", None);
        carry_forward_stats(&mut new, &GameState::default());
        assert_eq!(new.current.unwrap().home.sog, None);
    }
}
