use crate::state::messages::UiEvent;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::interval;

/// Drives the main loop's cadence with plain ticks. The loop itself
/// decides what each tick means (scoreboard poll due, detail poll due,
/// banner expiry) so the poll gating stays on the single owner task.
pub struct PeriodicRefresher {
    ui_events: mpsc::Sender<UiEvent>,
    period: Duration,
}

impl PeriodicRefresher {
    pub fn new(ui_events: mpsc::Sender<UiEvent>) -> Self {
        Self { ui_events, period: Duration::from_millis(250) }
    }

    pub async fn run(self) {
        let mut ticker = interval(self.period);
        // Skip the immediate first tick so startup loading isn't double-triggered.
        ticker.tick().await;

        loop {
            ticker.tick().await;
            if self.ui_events.send(UiEvent::Tick).await.is_err() {
                break;
            }
        }
    }
}
