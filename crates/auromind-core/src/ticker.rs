//! One-second tick source for the timer and breathing views.
//!
//! A [`Ticker`] owns a tokio task that advances a [`Tickable`] state machine
//! once per period. The returned [`TickHandle`] is the only way to stop it
//! early, and dropping the handle stops it too, so a view that lets go of its
//! handle cannot leak a tick source.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{watch, Mutex};
use tokio::task::JoinHandle;
use tokio::time::{self, Instant};

pub const TICK_PERIOD: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickFlow {
    Continue,
    Stop,
}

/// A state machine advanced by an external tick.
pub trait Tickable: Send + 'static {
    fn on_tick(&mut self) -> TickFlow;
}

pub struct TickHandle {
    task: JoinHandle<()>,
    ticks: watch::Receiver<u64>,
}

impl TickHandle {
    pub fn cancel(&self) {
        self.task.abort();
    }

    pub fn is_active(&self) -> bool {
        !self.task.is_finished()
    }

    /// Waits for the next tick. Returns `false` once the source has stopped
    /// and every tick has been observed.
    pub async fn ticked(&mut self) -> bool {
        self.ticks.changed().await.is_ok()
    }

    pub fn tick_count(&self) -> u64 {
        *self.ticks.borrow()
    }
}

impl Drop for TickHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

pub struct Ticker;

impl Ticker {
    /// Starts ticking `machine` every `period`, first tick one period from now.
    pub fn spawn<T: Tickable>(period: Duration, machine: Arc<Mutex<T>>) -> TickHandle {
        let (tx, rx) = watch::channel(0u64);
        let task = tokio::spawn(async move {
            let mut interval = time::interval_at(Instant::now() + period, period);
            let mut count = 0u64;
            loop {
                interval.tick().await;
                let flow = machine.lock().await.on_tick();
                count += 1;
                tx.send_replace(count);
                if flow == TickFlow::Stop {
                    log::debug!("Tick source stopped after {} ticks", count);
                    break;
                }
            }
        });

        TickHandle { task, ticks: rx }
    }
}
