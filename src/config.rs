use std::env;
use std::time::Duration;

/// Which upstream produces the scoreboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FeedProvider {
    #[default]
    Olympic,
    Nhl,
}

/// Runtime configuration, read once at startup from the environment
/// (a `.env` file is honored via dotenvy before this runs).
#[derive(Debug, Clone)]
pub struct Config {
    pub provider: FeedProvider,
    /// Team abbreviation everything is filtered to ("CAN", "TOR", ...).
    pub focus_team: String,
    pub scoreboard_poll: Duration,
    /// Detail (stats + goal) poll, live games only.
    pub detail_poll: Duration,
    /// Age past which the last good fetch counts as stale on screen.
    pub staleness: Duration,
    pub olympic_base: Option<String>,
    pub nhl_base: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            provider: FeedProvider::Olympic,
            focus_team: "CAN".to_string(),
            scoreboard_poll: Duration::from_secs(15),
            detail_poll: Duration::from_secs(8),
            staleness: Duration::from_secs(60),
            olympic_base: None,
            nhl_base: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let defaults = Config::default();
        Self {
            provider: match env::var("RINKBOARD_PROVIDER").as_deref() {
                Ok("nhl") | Ok("NHL") => FeedProvider::Nhl,
                _ => FeedProvider::Olympic,
            },
            focus_team: env::var("RINKBOARD_FOCUS_TEAM")
                .ok()
                .map(|t| t.trim().to_uppercase())
                .filter(|t| !t.is_empty())
                .unwrap_or(defaults.focus_team),
            scoreboard_poll: secs_var("RINKBOARD_SCOREBOARD_POLL_SECS", defaults.scoreboard_poll),
            detail_poll: secs_var("RINKBOARD_DETAIL_POLL_SECS", defaults.detail_poll),
            staleness: secs_var("RINKBOARD_STALENESS_SECS", defaults.staleness),
            olympic_base: env::var("RINKBOARD_OLYMPIC_BASE").ok().filter(|s| !s.is_empty()),
            nhl_base: env::var("RINKBOARD_NHL_BASE").ok().filter(|s| !s.is_empty()),
        }
    }
}

fn secs_var(name: &str, default: Duration) -> Duration {
    env::var(name)
        .ok()
        .and_then(|v| v.trim().parse::<u64>().ok())
        .filter(|&v| v > 0)
        .map(Duration::from_secs)
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_device_cadence() {
        let cfg = Config::default();
        assert_eq!(cfg.provider, FeedProvider::Olympic);
        assert_eq!(cfg.focus_team, "CAN");
        assert_eq!(cfg.scoreboard_poll, Duration::from_secs(15));
        assert_eq!(cfg.detail_poll, Duration::from_secs(8));
        assert_eq!(cfg.staleness, Duration::from_secs(60));
    }
}
