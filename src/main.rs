mod app;
mod config;
mod presenter;
mod state;

use crate::app::App;
use crate::config::Config;
use crate::state::messages::{NetworkRequest, NetworkResponse, UiEvent};
use crate::state::network::NetworkWorker;
use crate::state::refresher::PeriodicRefresher;
use crate::state::screen::ScreenMode;
use crossterm::event::{self as crossterm_event, Event, KeyCode, KeyEvent, KeyModifiers};
use crossterm::terminal;
use presenter::{LinePresenter, Presenter, View};
use std::time::Instant;
use tokio::sync::mpsc;
use tracing::error;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if handle_cli_args() {
        return Ok(());
    }

    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let config = Config::from_env();
    let app = App::new(config.clone());

    let (ui_event_tx, ui_event_rx) = mpsc::channel::<UiEvent>(100);
    let (network_req_tx, network_req_rx) = mpsc::channel::<NetworkRequest>(100);
    let (network_resp_tx, network_resp_rx) = mpsc::channel::<NetworkResponse>(100);

    // Input handler thread
    terminal::enable_raw_mode().ok();
    let input_handler = tokio::spawn(input_handler_task(ui_event_tx.clone()));

    // Network thread
    let network_worker = NetworkWorker::new(&config, network_req_rx, network_resp_tx);
    let network_task = tokio::spawn(network_worker.run());

    // Cadence ticks for polls and the goal banner
    let refresher = PeriodicRefresher::new(ui_event_tx.clone());
    let refresher_task = tokio::spawn(refresher.run());

    let _ = ui_event_tx.send(UiEvent::AppStarted).await;

    main_loop(app, ui_event_rx, network_req_tx, network_resp_rx).await;

    input_handler.abort();
    network_task.abort();
    refresher_task.abort();
    terminal::disable_raw_mode().ok();

    Ok(())
}

fn handle_cli_args() -> bool {
    let mut args = std::env::args().skip(1);
    let Some(arg) = args.next() else {
        return false;
    };

    match arg.as_str() {
        "-h" | "--help" => {
            println!("{}", usage_text());
            true
        }
        "-V" | "--version" => {
            println!("rinkboard {}", env!("CARGO_PKG_VERSION"));
            true
        }
        _ => {
            eprintln!("Unknown argument: {arg}\n\n{}", usage_text());
            std::process::exit(2);
        }
    }
}

fn usage_text() -> &'static str {
    "rinkboard - live hockey scoreboard for a focus team

Usage:
  rinkboard
  rinkboard --help
  rinkboard --version

Keys:
  space/enter   advance the manual screen cycle
  q / esc       quit

Environment:
  RINKBOARD_PROVIDER              olympic (default) or nhl
  RINKBOARD_FOCUS_TEAM            Team abbreviation (default CAN)
  RINKBOARD_SCOREBOARD_POLL_SECS  Scoreboard poll period (default 15)
  RINKBOARD_DETAIL_POLL_SECS      Live detail poll period (default 8)
  RINKBOARD_STALENESS_SECS        Stale-data threshold (default 60)
  RINKBOARD_OLYMPIC_BASE          Tournament feed base URL override
  RINKBOARD_NHL_BASE              League feed base URL override"
}

/// Single owner of `App`: every state mutation happens on this task.
async fn main_loop(
    mut app: App,
    mut ui_events: mpsc::Receiver<UiEvent>,
    network_requests: mpsc::Sender<NetworkRequest>,
    mut network_responses: mpsc::Receiver<NetworkResponse>,
) {
    let started = Instant::now();
    let mut out = LinePresenter::stdout();
    let mut last_presented: Option<(ScreenMode, i64)> = None;

    loop {
        let now_ms = started.elapsed().as_millis() as u64;
        tokio::select! {
            maybe_event = ui_events.recv() => {
                let Some(ui_event) = maybe_event else { break };
                match ui_event {
                    UiEvent::AppStarted => {
                        let _ = network_requests.send(NetworkRequest::RefreshScoreboard).await;
                    }
                    UiEvent::KeyPressed(key) => {
                        if is_quit_key(&key) {
                            break;
                        }
                        if is_advance_key(&key) {
                            app.on_advance();
                            present(&mut out, &app, &mut last_presented, true);
                        }
                    }
                    UiEvent::Tick => {
                        if app.scoreboard_poll_due(now_ms) {
                            let _ = network_requests.send(NetworkRequest::RefreshScoreboard).await;
                        }
                        if let Some(request) = app.detail_poll_due(now_ms) {
                            let _ = network_requests.send(request).await;
                        }
                        let banner_changed = app.tick_screen(now_ms);
                        present(&mut out, &app, &mut last_presented, banner_changed);
                    }
                }
            }

            maybe_response = network_responses.recv() => {
                let Some(response) = maybe_response else { break };
                match response {
                    NetworkResponse::SnapshotReady { state, fetched_epoch } => {
                        if app.on_snapshot(state, fetched_epoch, now_ms) {
                            let _ = network_requests.send(NetworkRequest::LoadLastGameRecap).await;
                        }
                        present(&mut out, &app, &mut last_presented, true);
                    }
                    NetworkResponse::DetailReady { game_id, stats, facts } => {
                        app.on_detail(&game_id, stats, facts, now_ms);
                        present(&mut out, &app, &mut last_presented, true);
                    }
                    NetworkResponse::RecapReady { recap } => {
                        app.on_recap(recap);
                        present(&mut out, &app, &mut last_presented, true);
                    }
                    NetworkResponse::Error { message } => {
                        // Non-fatal: the previous snapshot stays authoritative
                        // and staleness surfaces on screen.
                        error!("network error: {message}");
                    }
                }
            }
        }
    }
}

/// Present on real changes only; ticks that changed nothing (and did not
/// cross the staleness boundary) stay quiet.
fn present<P: Presenter>(
    out: &mut P,
    app: &App,
    last: &mut Option<(ScreenMode, i64)>,
    force: bool,
) {
    let now_epoch = chrono::Utc::now().timestamp();
    let stale = app.is_stale(now_epoch);
    let key = (app.mode(), stale as i64);
    if !force && *last == Some(key) {
        return;
    }
    *last = Some(key);

    let view = View {
        mode: app.mode(),
        state: &app.state,
        displayed_goal: app.displayed_goal.as_ref(),
        focus_abbr: &app.config.focus_team,
        stale,
    };
    if let Err(e) = out.present(&view) {
        error!("present failed: {e}");
    }
}

fn is_quit_key(key: &KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Esc)
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

fn is_advance_key(key: &KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char(' ') | KeyCode::Enter)
}

async fn input_handler_task(ui_events: mpsc::Sender<UiEvent>) {
    loop {
        if let Ok(event) = crossterm_event::read() {
            let ui_event = match event {
                Event::Key(key_event) => Some(UiEvent::KeyPressed(key_event)),
                _ => None,
            };

            if let Some(ui_event) = ui_event {
                if ui_events.send(ui_event).await.is_err() {
                    break;
                }
            }
        }
    }
}
