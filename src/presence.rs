//! Presence simulator: cosmetic connection status and collaborator count.
//!
//! DESIGN
//! ======
//! Nothing here talks to a network. A background task ticks on a fixed
//! interval and nudges the displayed user count by -1, 0, or +1 and rolls the
//! "connected" flag. It is the only writer of [`PresenceState`]; readers get
//! snapshots through a `watch` channel, so there is no shared lock.
//!
//! LIFECYCLE
//! =========
//! Every session starts from [`PresenceState::default`]. The task runs until
//! [`PresenceSimulator::stop`] or drop, which aborts it so no periodic
//! callback outlives the session.

#[cfg(test)]
#[path = "presence_test.rs"]
mod presence_test;

use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, info};

use crate::consts::{DEFAULT_USER_COUNT, DISCONNECT_THRESHOLD, PRESENCE_INTERVAL};

/// Displayed connection status and collaborator count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresenceState {
    pub connected: bool,
    /// Always at least 1.
    pub user_count: u32,
}

impl Default for PresenceState {
    fn default() -> Self {
        Self { connected: true, user_count: DEFAULT_USER_COUNT }
    }
}

impl PresenceState {
    /// A connected state showing `user_count` users (at least 1).
    #[must_use]
    pub fn new(user_count: u32) -> Self {
        Self { connected: true, user_count: user_count.max(1) }
    }

    /// Advance one simulated step.
    pub fn tick<R: Rng>(&mut self, rng: &mut R) {
        let delta: i32 = rng.random_range(-1..=1);
        self.user_count = self.user_count.saturating_add_signed(delta).max(1);
        self.connected = rng.random::<f64>() > DISCONNECT_THRESHOLD;
    }
}

/// Tuning for a simulator instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PresenceConfig {
    pub interval: Duration,
    pub initial: PresenceState,
    /// Fixed RNG seed; `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl Default for PresenceConfig {
    fn default() -> Self {
        Self { interval: PRESENCE_INTERVAL, initial: PresenceState::default(), seed: None }
    }
}

/// Handle to a running presence task.
#[derive(Debug)]
pub struct PresenceSimulator {
    rx: watch::Receiver<PresenceState>,
    task: JoinHandle<()>,
    stopped: bool,
}

impl PresenceSimulator {
    /// Start ticking on `runtime`. The first tick lands one interval from now.
    #[must_use]
    pub fn spawn(runtime: &Handle, config: PresenceConfig) -> Self {
        let (tx, rx) = watch::channel(config.initial);
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        info!(interval = ?config.interval, seeded = config.seed.is_some(), "presence simulator started");

        // tokio rejects a zero period.
        let period = config.interval.max(Duration::from_millis(1));
        let task = runtime.spawn(async move {
            let mut ticker = tokio::time::interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        tx.send_modify(|state| state.tick(&mut rng));
                        let state = *tx.borrow();
                        debug!(connected = state.connected, user_count = state.user_count, "presence tick");
                    }
                    () = tx.closed() => break,
                }
            }
        });

        Self { rx, task, stopped: false }
    }

    /// Latest published state.
    #[must_use]
    pub fn snapshot(&self) -> PresenceState {
        *self.rx.borrow()
    }

    /// A receiver that wakes on every tick.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<PresenceState> {
        self.rx.clone()
    }

    /// Stop the timer. Idempotent.
    pub fn stop(&mut self) {
        if self.stopped {
            return;
        }
        self.task.abort();
        self.stopped = true;
        info!("presence simulator stopped");
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        !self.stopped && !self.task.is_finished()
    }
}

impl Drop for PresenceSimulator {
    fn drop(&mut self) {
        self.stop();
    }
}
