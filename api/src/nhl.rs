//! League feed raw wire types — serde shapes for the NHL api-web
//! endpoints (scoreboard, club schedule, boxscore, play-by-play, landing).

use serde::Deserialize;

/// Many league-feed strings arrive either as a bare string or wrapped in a
/// localization object (`{"default": "..."}`).
#[derive(Debug, Deserialize, Clone)]
#[serde(untagged)]
pub enum LocalizedText {
    Plain(String),
    Localized { default: Option<String> },
}

impl LocalizedText {
    pub fn as_str(&self) -> &str {
        match self {
            LocalizedText::Plain(s) => s,
            LocalizedText::Localized { default } => default.as_deref().unwrap_or(""),
        }
    }
}

pub fn localized(value: &Option<LocalizedText>) -> String {
    value.as_ref().map(|v| v.as_str().to_string()).unwrap_or_default()
}

// ---------------------------------------------------------------------------
// Scoreboard + club schedule
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Default, Clone)]
pub struct ScoreboardNowResponse {
    #[serde(rename = "focusedDate")]
    pub focused_date: Option<String>,
    pub games: Option<Vec<NhlGame>>,
    #[serde(rename = "gamesByDate")]
    pub games_by_date: Option<Vec<NhlGamesByDate>>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct NhlGamesByDate {
    pub date: Option<String>,
    pub games: Option<Vec<NhlGame>>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct ScheduleResponse {
    #[serde(rename = "previousMonth")]
    pub previous_month: Option<String>,
    pub games: Option<Vec<NhlGame>>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct NhlGame {
    pub id: Option<u64>,
    #[serde(rename = "gameState")]
    pub game_state: Option<String>, // "FUT"|"PRE"|"LIVE"|"CRIT"|"FINAL"|"OFF"
    #[serde(rename = "startTimeUTC")]
    pub start_time_utc: Option<String>,
    #[serde(rename = "awayTeam")]
    pub away_team: Option<NhlTeamSide>,
    #[serde(rename = "homeTeam")]
    pub home_team: Option<NhlTeamSide>,
    pub clock: Option<NhlClock>,
    #[serde(rename = "periodDescriptor")]
    pub period_descriptor: Option<NhlPeriodDescriptor>,
    pub venue: Option<LocalizedText>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct NhlTeamSide {
    pub id: Option<u64>,
    pub abbrev: Option<LocalizedText>,
    pub score: Option<u16>,
    pub sog: Option<u16>,
    #[serde(rename = "placeName")]
    pub place_name: Option<LocalizedText>,
    pub logo: Option<String>,
    pub name: Option<LocalizedText>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct NhlClock {
    #[serde(rename = "timeRemaining")]
    pub time_remaining: Option<String>,
    #[serde(rename = "secondsRemaining")]
    pub seconds_remaining: Option<i32>,
    pub running: Option<bool>,
    #[serde(rename = "inIntermission")]
    pub in_intermission: Option<bool>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct NhlPeriodDescriptor {
    pub number: Option<u8>,
    #[serde(rename = "periodType")]
    pub period_type: Option<String>, // "REG" | "OT" | "SO"
}

// ---------------------------------------------------------------------------
// Boxscore
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Default, Clone)]
pub struct BoxscoreResponse {
    #[serde(rename = "awayTeam")]
    pub away_team: Option<NhlTeamSide>,
    #[serde(rename = "homeTeam")]
    pub home_team: Option<NhlTeamSide>,
    #[serde(rename = "teamStats")]
    pub team_stats: Option<NhlTeamStats>,
    #[serde(rename = "playerByGameStats")]
    pub player_by_game_stats: Option<NhlPlayerByGameStats>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct NhlTeamStats {
    #[serde(rename = "awayTeam")]
    pub away_team: Option<NhlTeamStatLine>,
    #[serde(rename = "homeTeam")]
    pub home_team: Option<NhlTeamStatLine>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct NhlTeamStatLine {
    pub hits: Option<u16>,
    #[serde(rename = "faceoffWinningPctg")]
    pub faceoff_winning_pctg: Option<f64>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct NhlPlayerByGameStats {
    #[serde(rename = "awayTeam")]
    pub away_team: Option<NhlSkaterGroups>,
    #[serde(rename = "homeTeam")]
    pub home_team: Option<NhlSkaterGroups>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct NhlSkaterGroups {
    pub forwards: Option<Vec<NhlSkaterLine>>,
    pub defense: Option<Vec<NhlSkaterLine>>,
    pub goalies: Option<Vec<NhlSkaterLine>>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct NhlSkaterLine {
    pub hits: Option<u16>,
}

impl NhlSkaterGroups {
    /// Team hits as the sum over every listed skater and goalie.
    pub fn total_hits(&self) -> u16 {
        [&self.forwards, &self.defense, &self.goalies]
            .into_iter()
            .flatten()
            .flatten()
            .map(|p| p.hits.unwrap_or(0))
            .sum()
    }
}

// ---------------------------------------------------------------------------
// Play-by-play + landing
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Default, Clone)]
pub struct PlayByPlayResponse {
    #[serde(rename = "awayTeam")]
    pub away_team: Option<NhlTeamSide>,
    #[serde(rename = "homeTeam")]
    pub home_team: Option<NhlTeamSide>,
    pub plays: Option<Vec<NhlPlay>>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct NhlPlay {
    #[serde(rename = "eventId")]
    pub event_id: Option<u64>,
    #[serde(rename = "typeDescKey")]
    pub type_desc_key: Option<String>,
    /// 4 chars: away goalie, away skaters, home skaters, home goalie.
    #[serde(rename = "situationCode")]
    pub situation_code: Option<String>,
    pub details: Option<NhlPlayDetails>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct NhlPlayDetails {
    #[serde(rename = "eventOwnerTeamId")]
    pub event_owner_team_id: Option<u64>,
    #[serde(rename = "eventOwnerTeamAbbrev")]
    pub event_owner_team_abbrev: Option<LocalizedText>,
    #[serde(rename = "teamAbbrev")]
    pub team_abbrev: Option<LocalizedText>,
    #[serde(rename = "teamTricode")]
    pub team_tricode: Option<LocalizedText>,
    #[serde(rename = "scoringTeamId")]
    pub scoring_team_id: Option<u64>,
    #[serde(rename = "scoringPlayerName")]
    pub scoring_player_name: Option<LocalizedText>,
    #[serde(rename = "assist1PlayerName")]
    pub assist1_player_name: Option<LocalizedText>,
    #[serde(rename = "assist2PlayerName")]
    pub assist2_player_name: Option<LocalizedText>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct LandingResponse {
    #[serde(rename = "awayTeam")]
    pub away_team: Option<NhlTeamSide>,
    #[serde(rename = "homeTeam")]
    pub home_team: Option<NhlTeamSide>,
    pub summary: Option<NhlSummary>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct NhlSummary {
    pub scoring: Option<Vec<NhlScoringPeriod>>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct NhlScoringPeriod {
    #[serde(rename = "periodDescriptor")]
    pub period_descriptor: Option<NhlPeriodDescriptor>,
    pub goals: Option<Vec<NhlScoringGoal>>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct NhlScoringGoal {
    #[serde(rename = "teamAbbrev")]
    pub team_abbrev: Option<LocalizedText>,
    #[serde(rename = "lastName")]
    pub last_name: Option<LocalizedText>,
    pub name: Option<LocalizedText>,
}
