//! Tournament feed client: ESPN-style scoreboard and summary endpoints,
//! mapped to canonical `ParsedEvent` records.

use crate::espn::{EspnCompetitor, EspnEvent, ScoreboardResponse, SummaryResponse};
use crate::time::parse_iso_utc;
use crate::{
    ApiError, ApiResult, EventState, GamePhase, GoalEvent, LiveStatsUpdate, ParsedEvent,
    PlayByPlayFacts, TeamLine, TeamStatPatch,
};
use std::time::Duration;
use tracing::{debug, warn};

const DEFAULT_BASE: &str =
    "https://site.api.espn.com/apis/site/v2/sports/hockey/olympics-mens-ice-hockey";

/// Men's tournament window; callers may override per fetch.
pub const TOURNAMENT_START: &str = "20260101";
pub const TOURNAMENT_END: &str = "20260222";

/// Tournament feed client backed by ESPN's public endpoints.
#[derive(Debug, Clone)]
pub struct OlympicApi {
    client: reqwest::Client,
    base: String,
    timeout: Duration,
}

impl Default for OlympicApi {
    fn default() -> Self {
        Self::with_base(DEFAULT_BASE)
    }
}

impl OlympicApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_base(base: &str) -> Self {
        Self {
            client: reqwest::Client::builder()
                .user_agent("rinkboard/0.2 (hockey scoreboard)")
                .build()
                .unwrap_or_default(),
            base: base.trim_end_matches('/').to_string(),
            timeout: Duration::from_secs(12),
        }
    }

    /// Fetch the tournament scoreboard for the default date window and map
    /// every event into the canonical form.
    pub async fn fetch_events(&self, focus_abbr: &str) -> ApiResult<Vec<ParsedEvent>> {
        self.fetch_events_for_range(focus_abbr, TOURNAMENT_START, TOURNAMENT_END)
            .await
    }

    pub async fn fetch_events_for_range(
        &self,
        focus_abbr: &str,
        start_yyyymmdd: &str,
        end_yyyymmdd: &str,
    ) -> ApiResult<Vec<ParsedEvent>> {
        let url = format!(
            "{}/scoreboard?dates={start_yyyymmdd}-{end_yyyymmdd}",
            self.base
        );
        let raw: ScoreboardResponse = self.get(&url).await?;
        let events = raw
            .events
            .ok_or_else(|| ApiError::MissingData("scoreboard has no events list".into()))?;
        Ok(events
            .iter()
            .map(|ev| map_event(ev, focus_abbr))
            .collect())
    }

    /// Fetch clock/phase corrections and team stats from the summary
    /// endpoint for one game.
    pub async fn fetch_game_stats(&self, game_id: &str) -> ApiResult<LiveStatsUpdate> {
        let url = format!("{}/summary?event={game_id}", self.base);
        let raw: SummaryResponse = self.get(&url).await?;

        let mut update = LiveStatsUpdate::default();

        let status = raw
            .header
            .as_ref()
            .and_then(|h| h.competitions.as_ref())
            .and_then(|c| c.first())
            .and_then(|c| c.status.as_ref());
        if let Some(status) = status {
            update.clock = status.display_clock.clone();
            update.period = status.period;
            if let Some(t) = status.status_type.as_ref() {
                update.detail = t.detail.clone();
                update.phase = t.state.as_deref().map(|state| match state {
                    "in" => GamePhase::Live {
                        intermission: t
                            .detail
                            .as_deref()
                            .map(detail_is_intermission)
                            .unwrap_or(false),
                    },
                    "post" => GamePhase::Final,
                    _ => GamePhase::Pre,
                });
            }
        }

        for team in raw
            .boxscore
            .and_then(|b| b.teams)
            .unwrap_or_default()
        {
            let abbr = team
                .team
                .as_ref()
                .and_then(|t| t.abbreviation.clone())
                .unwrap_or_default();
            if abbr.is_empty() {
                continue;
            }
            let mut patch = TeamStatPatch { abbr, ..TeamStatPatch::default() };
            for stat in team.statistics.unwrap_or_default() {
                let value = stat.display_value.as_deref().unwrap_or("");
                for key in [stat.name.as_deref(), stat.display_name.as_deref()] {
                    if let Some(key) = key.filter(|k| !k.is_empty()) {
                        apply_stat(&mut patch, key, value);
                    }
                }
            }
            update.team_stats.push(patch);
        }

        Ok(update)
    }

    /// Backward-scan the summary play list for the most recent goal.
    pub async fn fetch_latest_goal(
        &self,
        game_id: &str,
        home: &TeamLine,
        away: &TeamLine,
        focus_abbr: &str,
    ) -> ApiResult<PlayByPlayFacts> {
        let url = format!("{}/summary?event={game_id}", self.base);
        let raw: SummaryResponse = self.get(&url).await?;
        let plays = raw
            .plays
            .ok_or_else(|| ApiError::MissingData("summary has no plays list".into()))?;

        let mut facts = PlayByPlayFacts::default();
        for play in plays.iter().rev() {
            let scoring = play.scoring_play.unwrap_or(false);
            let type_text = play
                .play_type
                .as_ref()
                .and_then(|t| t.text.as_deref())
                .unwrap_or("");
            if !scoring && !contains_ignore_case(type_text, "goal") {
                continue;
            }

            // A goal without a usable id cannot be deduplicated; keep
            // scanning older plays instead of giving up.
            let event_id = play.id.as_ref().map(|id| id.as_u64()).unwrap_or(0);
            if event_id == 0 {
                continue;
            }

            let owner = play
                .team
                .as_ref()
                .and_then(|t| t.abbreviation.clone())
                .unwrap_or_default();
            let text = play.text.clone().unwrap_or_default();
            let scorer = play
                .participants
                .as_ref()
                .and_then(|p| p.first())
                .and_then(|p| p.athlete.as_ref())
                .and_then(|a| a.display_name.clone())
                .unwrap_or_default();

            let team_logo_url = if owner == home.abbr {
                home.logo_url.clone()
            } else if owner == away.abbr {
                away.logo_url.clone()
            } else {
                String::new()
            };

            if contains_ignore_case(&text, "power play") {
                facts.strength_label = Some(format!("{owner} POWER PLAY"));
            }
            facts.latest_goal = Some(GoalEvent {
                event_id,
                text,
                focus_scored: owner == focus_abbr,
                team_abbr: owner,
                team_logo_url,
                scorer,
            });
            break;
        }

        Ok(facts)
    }

    async fn get<T: Default + serde::de::DeserializeOwned>(&self, url: &str) -> ApiResult<T> {
        debug!(%url, "tournament feed GET");
        let response = self
            .client
            .get(url)
            .timeout(self.timeout)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|source| ApiError::Network { url: url.to_owned(), source })?;

        let response = response.error_for_status().map_err(|source| {
            warn!(%url, "tournament feed returned non-success status");
            ApiError::Api { url: url.to_owned(), source }
        })?;

        response
            .json::<T>()
            .await
            .map_err(|source| ApiError::Parsing { url: url.to_owned(), source })
    }
}

// ---------------------------------------------------------------------------
// Mapping: wire event → canonical ParsedEvent
// ---------------------------------------------------------------------------

fn map_event(ev: &EspnEvent, focus_abbr: &str) -> ParsedEvent {
    let mut parsed = ParsedEvent {
        id: ev.id.clone().unwrap_or_default(),
        ..ParsedEvent::default()
    };

    if let Some(date) = ev.date.as_deref() {
        parsed.start_epoch = parse_iso_utc(date).unwrap_or(0);
    }

    let Some(comp) = ev.competitions.as_ref().and_then(|c| c.first()) else {
        return parsed;
    };

    if let Some(status) = comp.status.as_ref() {
        parsed.clock = status.display_clock.clone().unwrap_or_default();
        parsed.period = status.period.unwrap_or(0);
        if let Some(t) = status.status_type.as_ref() {
            parsed.state = match t.state.as_deref() {
                Some("in") => EventState::In,
                Some("post") => EventState::Post,
                _ => EventState::Pre,
            };
            parsed.completed = t.completed.unwrap_or(false);
            parsed.detail = t.detail.clone().unwrap_or_default();
            parsed.short_detail = t.short_detail.clone().unwrap_or_default();
        }
    }

    parsed.group_headline = comp
        .notes
        .as_ref()
        .and_then(|n| n.first())
        .and_then(|n| n.headline.clone())
        .unwrap_or_default();
    parsed.group = parse_group_letter(&parsed.group_headline);
    parsed.preliminary_round = contains_ignore_case(&parsed.group_headline, "preliminary round");

    if let Some(venue) = comp.venue.as_ref() {
        parsed.venue = venue.full_name.clone().unwrap_or_default();
        parsed.city = venue
            .address
            .as_ref()
            .and_then(|a| a.city.clone())
            .unwrap_or_default();
    }

    for competitor in comp.competitors.as_deref().unwrap_or_default() {
        let team = map_competitor(competitor);
        let side = competitor
            .home_away
            .as_deref()
            .unwrap_or("")
            .to_ascii_lowercase();
        if team.abbr == focus_abbr {
            parsed.has_focus_team = true;
        }
        match side.as_str() {
            "home" => parsed.home = team,
            "away" => parsed.away = team,
            // No side tag: first unassigned competitor is away, second home.
            _ if parsed.away.abbr.is_empty() => parsed.away = team,
            _ => parsed.home = team,
        }
    }

    let (overtime, reliable) =
        detect_overtime(&parsed.detail, &parsed.short_detail, parsed.period);
    parsed.overtime = overtime;
    parsed.overtime_reliable = reliable;

    if parsed.state == EventState::In {
        let clock_zeroed =
            (parsed.clock == "0:00" || parsed.clock == "00:00") && parsed.period > 0;
        parsed.intermission = detail_is_intermission(&parsed.detail) || clock_zeroed;
    }

    parsed
}

fn map_competitor(c: &EspnCompetitor) -> TeamLine {
    let mut line = TeamLine::default();
    if let Some(team) = c.team.as_ref() {
        line.abbr = team.abbreviation.clone().unwrap_or_default();
        line.name = team.display_name.clone().unwrap_or_default();
        line.logo_url = team.logo.clone().unwrap_or_default();
    }
    line.score = c
        .score
        .as_deref()
        .and_then(parse_int_loose)
        .filter(|v| *v >= 0)
        .map(|v| v.min(i64::from(u16::MAX)) as u16)
        .unwrap_or(0);
    line
}

// ---------------------------------------------------------------------------
// Text-level parsing helpers
// ---------------------------------------------------------------------------

pub(crate) fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Extract the first optional-sign decimal integer from free text.
/// Trailing garbage is ignored; no digit at all yields `None`.
pub(crate) fn parse_int_loose(value: &str) -> Option<i64> {
    let mut out: i64 = 0;
    let mut sign: i64 = 1;
    let mut has_digit = false;
    for c in value.chars() {
        if !has_digit && c == '-' {
            sign = -1;
            continue;
        }
        if let Some(d) = c.to_digit(10) {
            out = out.saturating_mul(10).saturating_add(i64::from(d));
            has_digit = true;
            continue;
        }
        if has_digit {
            break;
        }
    }
    has_digit.then_some(out * sign)
}

/// Loose percentage: negative is unknown, above 100 clamps to 100.
pub(crate) fn parse_percent_loose(value: &str) -> Option<u8> {
    match parse_int_loose(value)? {
        v if v < 0 => None,
        v => Some(v.min(100) as u8),
    }
}

/// Group letter from a headline like "Men's Ice Hockey - Group A - ...".
pub(crate) fn parse_group_letter(headline: &str) -> Option<char> {
    let idx = headline.find("Group ")?;
    let letter = headline[idx + 6..].chars().next()?;
    let letter = letter.to_ascii_uppercase();
    letter.is_ascii_uppercase().then_some(letter)
}

/// Classify a final's overtime status from free-text status details.
///
/// Returns (overtime, indicator_reliable). Callers must not trust the
/// overtime flag when the indicator is unreliable; standings scoring
/// treats such games as regulation.
pub fn detect_overtime(detail: &str, short_detail: &str, period: u8) -> (bool, bool) {
    let detail = detail.trim().to_uppercase();
    let short_detail = short_detail.trim().to_uppercase();

    for marker in ["/OT", " OT", "/SO", " SO"] {
        if detail.contains(marker) || short_detail.contains(marker) {
            return (true, true);
        }
    }
    // More periods than regulation is itself a trustworthy signal.
    if period > 3 {
        return (true, true);
    }
    // A bare "FINAL" with no OT/SO marker is a regulation final.
    if detail.starts_with("FINAL") || short_detail.starts_with("FINAL") {
        return (false, true);
    }
    (false, false)
}

/// Intermission inference from status detail text.
pub(crate) fn detail_is_intermission(detail: &str) -> bool {
    contains_ignore_case(detail, "intermission") || contains_ignore_case(detail, "end of")
}

fn apply_stat(patch: &mut TeamStatPatch, key: &str, value: &str) {
    let key = key.to_lowercase();
    if key.contains("shot") {
        if let Some(v) = parse_int_loose(value).filter(|v| *v >= 0) {
            patch.sog = Some(v.min(i64::from(u16::MAX)) as u16);
        }
    } else if key.contains("hit") {
        if let Some(v) = parse_int_loose(value).filter(|v| *v >= 0) {
            patch.hits = Some(v.min(i64::from(u16::MAX)) as u16);
        }
    } else if key.contains("faceoff") || key.contains("face off") || key.contains("fo%") {
        if let Some(v) = parse_percent_loose(value) {
            patch.fo_pct = Some(v);
        }
    }
}
