//! Timer collaborators: the one-second game clock and the inactivity watchdog.
//!
//! Both are driven by timestamps in milliseconds (`performance.now()` in the
//! browser) so they can be ticked from the animation-frame loop and tested
//! without a real clock.

use std::fmt;
use std::str::FromStr;

use crate::error::GameError;
use crate::stage::Stage;

/// GameClock counts whole intervals since it was started.
#[derive(Clone, Debug)]
pub struct GameClock {
    interval_ms: f64,
    last_tick_ms: Option<f64>, // None until started
}

impl GameClock {
    pub fn new(interval_ms: f64) -> Self {
        Self { interval_ms, last_tick_ms: None }
    }

    pub fn start(&mut self, now: f64) {
        self.last_tick_ms = Some(now);
    }

    pub fn is_running(&self) -> bool {
        self.last_tick_ms.is_some()
    }

    /// Whole intervals elapsed since the last accounted tick. The remainder
    /// carries over so long frames do not drop seconds.
    pub fn poll(&mut self, now: f64) -> u32 {
        let Some(last) = self.last_tick_ms else {
            return 0;
        };
        if now <= last {
            return 0;
        }
        let ticks = ((now - last) / self.interval_ms).floor();
        if ticks < 1.0 {
            return 0;
        }
        self.last_tick_ms = Some(last + ticks * self.interval_ms);
        ticks.min(u32::MAX as f64) as u32
    }
}

/// User-activity signals that push the inactivity deadline back.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ActivitySignal {
    MouseDown,
    MouseMove,
    KeyPress,
    Scroll,
    TouchStart,
    Click,
}

impl ActivitySignal {
    pub const ALL: [ActivitySignal; 6] = [
        ActivitySignal::MouseDown,
        ActivitySignal::MouseMove,
        ActivitySignal::KeyPress,
        ActivitySignal::Scroll,
        ActivitySignal::TouchStart,
        ActivitySignal::Click,
    ];

    /// DOM event name this signal is read from.
    pub fn event_name(self) -> &'static str {
        match self {
            ActivitySignal::MouseDown => "mousedown",
            ActivitySignal::MouseMove => "mousemove",
            ActivitySignal::KeyPress => "keypress",
            ActivitySignal::Scroll => "scroll",
            ActivitySignal::TouchStart => "touchstart",
            ActivitySignal::Click => "click",
        }
    }
}

impl fmt::Display for ActivitySignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.event_name())
    }
}

impl FromStr for ActivitySignal {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ActivitySignal::ALL
            .iter()
            .copied()
            .find(|a| a.event_name() == s)
            .ok_or_else(|| GameError::UnknownActivity(s.to_string()))
    }
}

/// Fires once after `timeout_ms` without activity or stage change, except on
/// idle-exempt stages (intro, character select) where it stays disarmed.
#[derive(Clone, Debug)]
pub struct InactivityWatchdog {
    timeout_ms: f64,
    stage: Stage,
    deadline_ms: Option<f64>,
}

impl InactivityWatchdog {
    pub fn new(timeout_ms: f64, stage: Stage, now: f64) -> Self {
        let mut dog = Self { timeout_ms, stage, deadline_ms: None };
        dog.rearm(now);
        dog
    }

    fn rearm(&mut self, now: f64) {
        self.deadline_ms = if self.stage.is_idle_exempt() {
            None
        } else {
            Some(now + self.timeout_ms)
        };
    }

    pub fn on_stage_change(&mut self, stage: Stage, now: f64) {
        self.stage = stage;
        self.rearm(now);
    }

    pub fn on_activity(&mut self, _signal: ActivitySignal, now: f64) {
        self.rearm(now);
    }

    pub fn is_armed(&self) -> bool {
        self.deadline_ms.is_some()
    }

    pub fn deadline_ms(&self) -> Option<f64> {
        self.deadline_ms
    }

    /// `true` exactly once when an armed deadline has passed.
    pub fn poll(&mut self, now: f64) -> bool {
        match self.deadline_ms {
            Some(deadline) if now >= deadline => {
                self.deadline_ms = None;
                if self.stage.is_idle_exempt() {
                    tracing::warn!(stage = %self.stage, "watchdog expired on an exempt stage");
                    return false;
                }
                true
            }
            _ => false,
        }
    }
}
