//! Meditation countdown.
//!
//! [`CountdownTimer`] is the pure state machine; [`MeditationTimer`] pairs it
//! with the tick source so that entering `Running` and arming the source happen
//! together, as do leaving it and cancelling.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;

use crate::errors::TimerError;
use crate::ticker::{TickFlow, TickHandle, Tickable, Ticker, TICK_PERIOD};

pub const PRESET_MINUTES: [u32; 4] = [1, 3, 5, 10];
pub const DEFAULT_MINUTES: u32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerStatus {
    Idle,
    Running,
    Expired,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountdownTimer {
    minutes: u32,
    seconds: u32,
    status: TimerStatus,
    default_minutes: u32,
}

impl Default for CountdownTimer {
    fn default() -> Self {
        Self::new(DEFAULT_MINUTES)
    }
}

impl CountdownTimer {
    /// An idle timer set to `default_minutes`, which is also what `reset` restores.
    pub fn new(default_minutes: u32) -> Self {
        Self {
            minutes: default_minutes,
            seconds: 0,
            status: TimerStatus::Idle,
            default_minutes,
        }
    }

    pub fn minutes(&self) -> u32 {
        self.minutes
    }

    pub fn seconds(&self) -> u32 {
        self.seconds
    }

    pub fn status(&self) -> TimerStatus {
        self.status
    }

    pub fn is_running(&self) -> bool {
        self.status == TimerStatus::Running
    }

    /// `MM:SS`
    pub fn display(&self) -> String {
        format!("{:02}:{:02}", self.minutes, self.seconds)
    }

    /// Returns `false` when already running; the caller must only arm a tick
    /// source on `true`.
    pub fn start(&mut self) -> bool {
        if self.is_running() {
            return false;
        }
        self.status = TimerStatus::Running;
        true
    }

    /// Leaves the remaining time as it is.
    pub fn stop(&mut self) {
        self.status = TimerStatus::Idle;
    }

    pub fn reset(&mut self) {
        self.stop();
        self.minutes = self.default_minutes;
        self.seconds = 0;
    }

    pub fn select_preset(&mut self, minutes: u32) -> Result<(), TimerError> {
        if self.is_running() {
            return Err(TimerError::Running);
        }
        if !PRESET_MINUTES.contains(&minutes) {
            return Err(TimerError::InvalidPreset(minutes));
        }
        self.minutes = minutes;
        self.seconds = 0;
        Ok(())
    }
}

impl Tickable for CountdownTimer {
    fn on_tick(&mut self) -> TickFlow {
        if !self.is_running() {
            return TickFlow::Stop;
        }

        if self.seconds > 0 {
            self.seconds -= 1;
        } else if self.minutes > 0 {
            self.minutes -= 1;
            self.seconds = 59;
        } else {
            self.status = TimerStatus::Expired;
            return TickFlow::Stop;
        }
        TickFlow::Continue
    }
}

/// Timer view state: the countdown plus the tick source that drives it.
pub struct MeditationTimer {
    countdown: Arc<Mutex<CountdownTimer>>,
    ticks: Option<TickHandle>,
    period: Duration,
}

impl Default for MeditationTimer {
    fn default() -> Self {
        Self::new(DEFAULT_MINUTES)
    }
}

impl MeditationTimer {
    pub fn new(default_minutes: u32) -> Self {
        Self::with_period(default_minutes, TICK_PERIOD)
    }

    pub fn with_period(default_minutes: u32, period: Duration) -> Self {
        Self {
            countdown: Arc::new(Mutex::new(CountdownTimer::new(default_minutes))),
            ticks: None,
            period,
        }
    }

    pub async fn snapshot(&self) -> CountdownTimer {
        self.countdown.lock().await.clone()
    }

    pub async fn start(&mut self) -> bool {
        if !self.countdown.lock().await.start() {
            return false;
        }
        self.ticks = Some(Ticker::spawn(self.period, self.countdown.clone()));
        true
    }

    pub async fn stop(&mut self) {
        if let Some(ticks) = self.ticks.take() {
            ticks.cancel();
        }
        self.countdown.lock().await.stop();
    }

    pub async fn reset(&mut self) {
        self.stop().await;
        self.countdown.lock().await.reset();
    }

    pub async fn select_preset(&mut self, minutes: u32) -> Result<(), TimerError> {
        self.countdown.lock().await.select_preset(minutes)
    }

    /// Waits for the next tick of a running timer. Returns `false` when the
    /// timer is not armed or has run out.
    pub async fn ticked(&mut self) -> bool {
        let Some(ticks) = self.ticks.as_mut() else {
            return false;
        };
        let ticked = ticks.ticked().await;
        if !ticked || !self.countdown.lock().await.is_running() {
            self.ticks = None;
        }
        ticked
    }

    /// True while a tick source is attached. Tracks `Running` once the
    /// expiring tick has been observed through [`MeditationTimer::ticked`].
    pub fn is_armed(&self) -> bool {
        self.ticks.is_some()
    }

    /// Closing the view stops a running countdown.
    pub async fn close(mut self) {
        if self.countdown.lock().await.is_running() {
            self.stop().await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time;

    fn running_at(minutes: u32, seconds: u32) -> CountdownTimer {
        let mut timer = CountdownTimer::new(DEFAULT_MINUTES);
        timer.minutes = minutes;
        timer.seconds = seconds;
        assert!(timer.start());
        timer
    }

    #[test]
    fn test_one_minute_expires_after_sixty_one_ticks() {
        let mut timer = running_at(1, 0);

        for _ in 0..60 {
            assert_eq!(timer.on_tick(), TickFlow::Continue);
        }
        assert_eq!(timer.display(), "00:00");
        assert!(timer.is_running());

        assert_eq!(timer.on_tick(), TickFlow::Stop);
        assert_eq!(timer.status(), TimerStatus::Expired);
        assert_eq!((timer.minutes(), timer.seconds()), (0, 0));

        let expired = timer.clone();
        assert_eq!(timer.on_tick(), TickFlow::Stop);
        assert_eq!(timer, expired);
    }

    #[test]
    fn test_borrows_from_minutes() {
        let mut timer = running_at(2, 0);
        timer.on_tick();
        assert_eq!(timer.display(), "01:59");
    }

    #[test]
    fn test_stop_keeps_remaining_time() {
        let mut timer = running_at(2, 30);
        timer.stop();
        assert_eq!(timer.status(), TimerStatus::Idle);
        assert_eq!(timer.display(), "02:30");

        assert!(timer.start());
        timer.on_tick();
        assert_eq!(timer.display(), "02:29");
    }

    #[test]
    fn test_start_is_noop_while_running() {
        let mut timer = running_at(1, 0);
        assert!(!timer.start());
    }

    #[test]
    fn test_reset_restores_default() {
        let mut timer = running_at(0, 12);
        timer.reset();
        assert_eq!(timer.status(), TimerStatus::Idle);
        assert_eq!(timer.display(), "05:00");
    }

    #[test]
    fn test_presets_only_when_not_running() {
        let mut timer = CountdownTimer::default();
        timer.select_preset(10).unwrap();
        assert_eq!(timer.display(), "10:00");

        assert_eq!(timer.select_preset(7), Err(TimerError::InvalidPreset(7)));

        timer.start();
        assert_eq!(timer.select_preset(1), Err(TimerError::Running));
        assert_eq!(timer.display(), "10:00");
    }

    #[test]
    fn test_idle_timer_ignores_ticks() {
        let mut timer = CountdownTimer::default();
        assert_eq!(timer.on_tick(), TickFlow::Stop);
        assert_eq!(timer.display(), "05:00");
    }

    #[tokio::test(start_paused = true)]
    async fn test_meditation_timer_runs_to_expiry() {
        let mut timer = MeditationTimer::new(DEFAULT_MINUTES);
        timer.select_preset(1).await.unwrap();
        assert!(timer.start().await);
        assert!(!timer.start().await);

        assert!(timer.is_armed());

        let started = time::Instant::now();
        while timer.ticked().await {}
        assert_eq!(started.elapsed(), Duration::from_secs(61));
        assert!(!timer.is_armed());

        let snapshot = timer.snapshot().await;
        assert_eq!(snapshot.status(), TimerStatus::Expired);
        assert_eq!(snapshot.display(), "00:00");

        time::sleep(Duration::from_secs(3)).await;
        assert_eq!(timer.snapshot().await, snapshot);
    }

    #[tokio::test(start_paused = true)]
    async fn test_meditation_timer_stop_and_resume() {
        let mut timer = MeditationTimer::new(3);
        timer.start().await;
        time::sleep(Duration::from_millis(30_500)).await;
        timer.stop().await;
        assert!(!timer.is_armed());
        assert_eq!(timer.snapshot().await.display(), "02:30");

        time::sleep(Duration::from_secs(10)).await;
        assert_eq!(timer.snapshot().await.display(), "02:30");

        timer.start().await;
        time::sleep(Duration::from_millis(1_500)).await;
        assert_eq!(timer.snapshot().await.display(), "02:29");

        timer.reset().await;
        let snapshot = timer.snapshot().await;
        assert_eq!(snapshot.display(), "03:00");
        assert_eq!(snapshot.status(), TimerStatus::Idle);
    }
}
