//! Selection engine: which game the board should care about, given one
//! poll's worth of normalized events.
//!
//! Priority for the displayed game is live, then next scheduled, then most
//! recent final. All three selectors only consider events involving the
//! focus team; the caller passes pre-filtered or mixed lists alike.

/// Wall clocks on embedded-ish hosts can boot at the epoch; timestamps
/// before 2020-01-01 are treated as "clock not yet valid".
pub const NOW_VALID_EPOCH: i64 = 1_577_836_800;

use crate::ParsedEvent;

pub fn now_is_valid(now_epoch: i64) -> bool {
    now_epoch > NOW_VALID_EPOCH
}

/// The focus team's in-progress game. If more than one is simultaneously
/// in progress the earliest-started one wins; unknown start times sort last.
pub fn find_live<'a>(events: &'a [ParsedEvent]) -> Option<&'a ParsedEvent> {
    events
        .iter()
        .filter(|e| e.has_focus_team && e.state == crate::EventState::In && !e.is_final())
        .min_by_key(|e| (e.start_epoch == 0, e.start_epoch))
}

/// The focus team's earliest upcoming game. Prefers games starting at or
/// after `now_epoch` (only trusted when the clock is plausibly set); when
/// none qualify, the earliest scheduled game overall is the best available
/// answer, even if its start time has passed.
pub fn find_next<'a>(events: &'a [ParsedEvent], now_epoch: i64) -> Option<&'a ParsedEvent> {
    let candidates = || {
        events
            .iter()
            .filter(|e| e.has_focus_team && e.state == crate::EventState::Pre && !e.is_final())
            .filter(|e| e.start_epoch > 0)
    };
    if now_is_valid(now_epoch) {
        if let Some(ev) = candidates()
            .filter(|e| e.start_epoch >= now_epoch)
            .min_by_key(|e| e.start_epoch)
        {
            return Some(ev);
        }
    }
    candidates().min_by_key(|e| e.start_epoch)
}

/// The focus team's most recently started completed game.
pub fn find_last_final<'a>(events: &'a [ParsedEvent]) -> Option<&'a ParsedEvent> {
    events
        .iter()
        .filter(|e| e.has_focus_team && e.is_final())
        .max_by_key(|e| e.start_epoch)
}

/// The single game worth rendering as "current": a live game always wins,
/// else the next scheduled game, else the latest final.
pub fn pick_current<'a>(events: &'a [ParsedEvent], now_epoch: i64) -> Option<&'a ParsedEvent> {
    find_live(events)
        .or_else(|| find_next(events, now_epoch))
        .or_else(|| find_last_final(events))
}
