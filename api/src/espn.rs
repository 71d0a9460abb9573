//! Tournament feed raw wire types — serde shapes for the ESPN-style
//! scoreboard and summary endpoints. Every field is optional: the mapping
//! code in `olympic.rs` supplies the defensive fallbacks.

use serde::Deserialize;

// ---------------------------------------------------------------------------
// Scoreboard
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Default, Clone)]
pub struct ScoreboardResponse {
    pub events: Option<Vec<EspnEvent>>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnEvent {
    pub id: Option<String>,
    pub date: Option<String>, // ISO 8601, UTC
    pub competitions: Option<Vec<EspnCompetition>>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnCompetition {
    pub status: Option<EspnStatus>,
    pub notes: Option<Vec<EspnNote>>,
    pub venue: Option<EspnVenue>,
    pub competitors: Option<Vec<EspnCompetitor>>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnStatus {
    #[serde(rename = "type")]
    pub status_type: Option<EspnStatusType>,
    #[serde(rename = "displayClock")]
    pub display_clock: Option<String>,
    pub period: Option<u8>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnStatusType {
    pub state: Option<String>, // "pre" | "in" | "post"
    pub completed: Option<bool>,
    pub detail: Option<String>,
    #[serde(rename = "shortDetail")]
    pub short_detail: Option<String>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnNote {
    /// E.g. "Men's Ice Hockey - Group A - Preliminary Round".
    pub headline: Option<String>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnVenue {
    #[serde(rename = "fullName")]
    pub full_name: Option<String>,
    pub address: Option<EspnAddress>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnAddress {
    pub city: Option<String>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnCompetitor {
    #[serde(rename = "homeAway")]
    pub home_away: Option<String>,
    pub score: Option<String>, // scores arrive as strings
    pub team: Option<EspnTeam>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnTeam {
    pub abbreviation: Option<String>,
    #[serde(rename = "displayName")]
    pub display_name: Option<String>,
    pub logo: Option<String>,
}

// ---------------------------------------------------------------------------
// Game summary (boxscore stats + play-by-play)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Default, Clone)]
pub struct SummaryResponse {
    pub header: Option<EspnHeader>,
    pub boxscore: Option<EspnBoxscore>,
    pub plays: Option<Vec<EspnPlay>>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnHeader {
    pub competitions: Option<Vec<EspnCompetition>>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnBoxscore {
    pub teams: Option<Vec<EspnBoxTeam>>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnBoxTeam {
    pub team: Option<EspnTeam>,
    pub statistics: Option<Vec<EspnStat>>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnStat {
    pub name: Option<String>,
    #[serde(rename = "displayName")]
    pub display_name: Option<String>,
    #[serde(rename = "displayValue")]
    pub display_value: Option<String>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnPlay {
    /// Play ids arrive as strings on some events and numbers on others.
    pub id: Option<IdValue>,
    pub text: Option<String>,
    #[serde(rename = "scoringPlay")]
    pub scoring_play: Option<bool>,
    pub team: Option<EspnTeam>,
    #[serde(rename = "type")]
    pub play_type: Option<EspnPlayType>,
    pub participants: Option<Vec<EspnParticipant>>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnPlayType {
    pub text: Option<String>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnParticipant {
    pub athlete: Option<EspnAthlete>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnAthlete {
    #[serde(rename = "displayName")]
    pub display_name: Option<String>,
}

/// A numeric id that a provider may serialize as either a JSON string or a
/// JSON number.
#[derive(Debug, Deserialize, Clone)]
#[serde(untagged)]
pub enum IdValue {
    Num(u64),
    Text(String),
}

impl IdValue {
    pub fn as_u64(&self) -> u64 {
        match self {
            IdValue::Num(n) => *n,
            IdValue::Text(s) => {
                let digits: String = s.chars().take_while(|c| c.is_ascii_digit()).collect();
                digits.parse().unwrap_or(0)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_value_accepts_both_shapes() {
        let num: IdValue = serde_json::from_str("42").unwrap();
        let text: IdValue = serde_json::from_str("\"42\"").unwrap();
        assert_eq!(num.as_u64(), 42);
        assert_eq!(text.as_u64(), 42);
        let junk: IdValue = serde_json::from_str("\"x\"").unwrap();
        assert_eq!(junk.as_u64(), 0);
    }

    #[test]
    fn scoreboard_tolerates_missing_fields() {
        let raw: ScoreboardResponse =
            serde_json::from_str(r#"{"events":[{"id":"401"}]}"#).unwrap();
        let events = raw.events.unwrap();
        assert_eq!(events[0].id.as_deref(), Some("401"));
        assert!(events[0].competitions.is_none());
    }
}
