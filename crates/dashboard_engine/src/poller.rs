use std::sync::Arc;
use std::time::Duration;

use dashboard_logging::dashboard_debug;
use tokio::runtime::Handle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use crate::{EngineEvent, EventSink};

/// Repeating timer that emits [`EngineEvent::PollTick`] every period.
///
/// The timer carries no job state; consumers read the current outstanding
/// set when a tick arrives. Dropping the handle stops the timer.
pub struct Poller {
    token: CancellationToken,
    period: Duration,
}

impl Poller {
    /// Starts the timer on `runtime`. The first tick fires one full period
    /// after start.
    pub fn start(runtime: &Handle, period: Duration, sink: Arc<dyn EventSink>) -> Self {
        let token = CancellationToken::new();
        let cancelled = token.clone();
        runtime.spawn(async move {
            let mut ticker = interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                tokio::select! {
                    biased;
                    _ = cancelled.cancelled() => break,
                    _ = ticker.tick() => sink.emit(EngineEvent::PollTick),
                }
            }
            dashboard_debug!("Poll timer exited");
        });
        dashboard_debug!("Poll timer started with period {:?}", period);
        Self { token, period }
    }

    pub fn stop(&self) {
        self.token.cancel();
    }

    pub fn is_stopped(&self) -> bool {
        self.token.is_cancelled()
    }

    pub fn period(&self) -> Duration {
        self.period
    }
}

impl Drop for Poller {
    fn drop(&mut self) {
        self.token.cancel();
    }
}
