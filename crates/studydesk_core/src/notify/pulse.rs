use super::Notifier;
use crate::config::MAX_CHIME_INTERVAL_SECS;
use log::{info, warn};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

/// Recurring background chime bound to the application's active lifetime.
///
/// # Invariants
/// - At most one pulse task runs at a time.
/// - `start`/`stop` are idempotent.
/// - Dropping the pulse aborts the task.
/// - The period is clamped to `1ms..=MAX_CHIME_INTERVAL_SECS`.
#[derive(Debug)]
pub struct ChimePulse {
    notifier: Arc<dyn Notifier>,
    period: Duration,
    handle: Option<JoinHandle<()>>,
}

impl ChimePulse {
    pub fn new(notifier: Arc<dyn Notifier>, period: Duration) -> Self {
        Self {
            notifier,
            period: period.clamp(
                Duration::from_millis(1),
                Duration::from_secs(MAX_CHIME_INTERVAL_SECS),
            ),
            handle: None,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Spawns the pulse on the current tokio runtime.
    ///
    /// Returns `false` when no runtime is available or the first chime time
    /// is not representable; the pulse stays stopped.
    pub fn start(&mut self) -> bool {
        if self.is_running() {
            return true;
        }
        let runtime = match tokio::runtime::Handle::try_current() {
            Ok(runtime) => runtime,
            Err(err) => {
                warn!("event=pulse_start module=notify status=error error={err}");
                return false;
            }
        };

        let period = self.period;
        // First chime one full period after start.
        let Some(first_chime) = Instant::now().checked_add(period) else {
            warn!(
                "event=pulse_start module=notify status=error reason=instant_overflow period_ms={}",
                period.as_millis()
            );
            return false;
        };
        let notifier = Arc::clone(&self.notifier);
        self.handle = Some(runtime.spawn(async move {
            let mut ticker = interval_at(first_chime, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                notifier.play_chime();
            }
        }));
        info!(
            "event=pulse_start module=notify status=ok period_ms={}",
            self.period.as_millis()
        );
        true
    }

    pub fn stop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
            info!("event=pulse_stop module=notify status=ok");
        }
    }

    pub fn is_running(&self) -> bool {
        self.handle
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }
}

impl Drop for ChimePulse {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}
