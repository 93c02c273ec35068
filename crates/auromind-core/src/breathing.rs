//! 4-4-4 breathing: four seconds each of inhale, hold and exhale, repeated
//! until the view closes.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::ticker::{TickFlow, TickHandle, Tickable, Ticker, TICK_PERIOD};

pub const CYCLE_TICKS: u8 = 12;
const PHASE_TICKS: u8 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BreathPhase {
    Inhale,
    Hold,
    Exhale,
}

impl BreathPhase {
    pub fn instruction(&self) -> &'static str {
        match self {
            BreathPhase::Inhale => "Breathe in slowly through your nose",
            BreathPhase::Hold => "Hold your breath",
            BreathPhase::Exhale => "Exhale slowly through your mouth",
        }
    }
}

impl fmt::Display for BreathPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BreathPhase::Inhale => "inhale",
            BreathPhase::Hold => "hold",
            BreathPhase::Exhale => "exhale",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreathingState {
    pub phase: BreathPhase,
    pub count_in_phase: u8,
}

impl BreathingState {
    /// State for position `count` (1..=12) in the cycle.
    pub fn at(count: u8) -> Self {
        let count = count.clamp(1, CYCLE_TICKS);
        let (phase, phase_end) = match count {
            1..=4 => (BreathPhase::Inhale, PHASE_TICKS),
            5..=8 => (BreathPhase::Hold, PHASE_TICKS * 2),
            _ => (BreathPhase::Exhale, CYCLE_TICKS),
        };
        Self {
            phase,
            count_in_phase: phase_end - count + 1,
        }
    }
}

impl Default for BreathingState {
    fn default() -> Self {
        Self {
            phase: BreathPhase::Inhale,
            count_in_phase: PHASE_TICKS,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BreathingCycle {
    count: u8,
    state: BreathingState,
}

impl BreathingCycle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> BreathingState {
        self.state
    }

    pub fn advance(&mut self) -> BreathingState {
        self.count = if self.count >= CYCLE_TICKS {
            1
        } else {
            self.count + 1
        };
        self.state = BreathingState::at(self.count);
        self.state
    }
}

impl Tickable for BreathingCycle {
    fn on_tick(&mut self) -> TickFlow {
        self.advance();
        TickFlow::Continue
    }
}

/// An open breathing view. The tick source lives exactly as long as this value.
pub struct BreathingExercise {
    cycle: Arc<Mutex<BreathingCycle>>,
    ticks: TickHandle,
}

impl BreathingExercise {
    pub fn open() -> Self {
        Self::open_with_period(TICK_PERIOD)
    }

    pub fn open_with_period(period: Duration) -> Self {
        let cycle = Arc::new(Mutex::new(BreathingCycle::new()));
        let ticks = Ticker::spawn(period, cycle.clone());
        Self { cycle, ticks }
    }

    pub async fn state(&self) -> BreathingState {
        self.cycle.lock().await.state()
    }

    pub async fn ticked(&mut self) -> bool {
        self.ticks.ticked().await
    }

    pub fn close(self) {
        self.ticks.cancel();
    }
}
