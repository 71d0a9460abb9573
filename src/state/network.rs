use crate::config::{Config, FeedProvider};
use crate::state::messages::{NetworkRequest, NetworkResponse};
use rink_api::{
    ApiError, ApiResult, LastGameRecap, LiveStatsUpdate, ParsedEvent, PlayByPlayFacts, TeamLine,
};
use rink_api::{NhlApi, OlympicApi};
use tokio::sync::mpsc;
use tracing::{debug, error, warn};

/// One of the two upstream feeds, selected at startup.
pub enum FeedClient {
    Olympic(OlympicApi),
    Nhl(NhlApi),
}

impl FeedClient {
    pub fn from_config(config: &Config) -> Self {
        match config.provider {
            FeedProvider::Olympic => FeedClient::Olympic(match &config.olympic_base {
                Some(base) => OlympicApi::with_base(base),
                None => OlympicApi::new(),
            }),
            FeedProvider::Nhl => FeedClient::Nhl(match &config.nhl_base {
                Some(base) => NhlApi::with_base(base),
                None => NhlApi::new(),
            }),
        }
    }

    async fn fetch_events(&self, focus_abbr: &str) -> ApiResult<Vec<ParsedEvent>> {
        match self {
            FeedClient::Olympic(api) => api.fetch_events(focus_abbr).await,
            FeedClient::Nhl(api) => api.fetch_events(focus_abbr).await,
        }
    }

    async fn fetch_game_stats(&self, game_id: &str) -> ApiResult<LiveStatsUpdate> {
        match self {
            FeedClient::Olympic(api) => api.fetch_game_stats(game_id).await,
            FeedClient::Nhl(api) => api.fetch_game_stats(game_id).await,
        }
    }

    async fn fetch_latest_goal(
        &self,
        game_id: &str,
        home: &TeamLine,
        away: &TeamLine,
        focus_abbr: &str,
    ) -> ApiResult<PlayByPlayFacts> {
        match self {
            FeedClient::Olympic(api) => api.fetch_latest_goal(game_id, home, away, focus_abbr).await,
            FeedClient::Nhl(api) => api.fetch_latest_goal(game_id, home, away, focus_abbr).await,
        }
    }

    /// Scorer/period enrichment exists on the league feed only; the
    /// tournament recap stays with what the scoreboard already carries.
    async fn fetch_recap(&self, focus_abbr: &str) -> ApiResult<Option<LastGameRecap>> {
        match self {
            FeedClient::Olympic(_) => Ok(None),
            FeedClient::Nhl(api) => api.fetch_recap(focus_abbr).await,
        }
    }
}

/// Owns the feed client; requests come in over one channel, responses go
/// out over another. At most one fetch is in flight at a time.
pub struct NetworkWorker {
    client: FeedClient,
    focus_abbr: String,
    requests: mpsc::Receiver<NetworkRequest>,
    responses: mpsc::Sender<NetworkResponse>,
}

impl NetworkWorker {
    pub fn new(
        config: &Config,
        requests: mpsc::Receiver<NetworkRequest>,
        responses: mpsc::Sender<NetworkResponse>,
    ) -> Self {
        Self {
            client: FeedClient::from_config(config),
            focus_abbr: config.focus_team.clone(),
            requests,
            responses,
        }
    }

    pub async fn run(mut self) {
        while let Some(request) = self.requests.recv().await {
            let result = match request {
                NetworkRequest::RefreshScoreboard => self.handle_refresh_scoreboard().await,
                NetworkRequest::RefreshDetail { game_id, home, away } => {
                    self.handle_refresh_detail(game_id, home, away).await
                }
                NetworkRequest::LoadLastGameRecap => self.handle_load_recap().await,
            };
            debug!("network request complete");

            let response = result.unwrap_or_else(|err| NetworkResponse::Error {
                message: err.to_string(),
            });

            if let Err(e) = self.responses.send(response).await {
                error!("failed to send network response: {e}");
                break;
            }
        }
    }

    async fn handle_refresh_scoreboard(&self) -> Result<NetworkResponse, ApiError> {
        debug!("refreshing scoreboard");
        let events = self.client.fetch_events(&self.focus_abbr).await?;
        let now_epoch = chrono::Utc::now().timestamp();
        let state = rink_api::snapshot::build_game_state(&events, &self.focus_abbr, now_epoch);
        Ok(NetworkResponse::SnapshotReady { state, fetched_epoch: now_epoch })
    }

    /// The two detail endpoints fail independently; a miss on one must not
    /// discard the other's result.
    async fn handle_refresh_detail(
        &self,
        game_id: String,
        home: TeamLine,
        away: TeamLine,
    ) -> Result<NetworkResponse, ApiError> {
        debug!("refreshing detail for game {game_id}");
        let stats = match self.client.fetch_game_stats(&game_id).await {
            Ok(stats) => Some(stats),
            Err(err) => {
                warn!("stats fetch failed: {err}");
                None
            }
        };
        let facts = match self
            .client
            .fetch_latest_goal(&game_id, &home, &away, &self.focus_abbr)
            .await
        {
            Ok(facts) => Some(facts),
            Err(err) => {
                warn!("goal scan failed: {err}");
                None
            }
        };
        Ok(NetworkResponse::DetailReady { game_id, stats, facts })
    }

    async fn handle_load_recap(&self) -> Result<NetworkResponse, ApiError> {
        debug!("loading last-game recap");
        let recap = self.client.fetch_recap(&self.focus_abbr).await?;
        Ok(NetworkResponse::RecapReady { recap })
    }
}
