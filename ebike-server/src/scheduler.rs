//! Refresh countdown.
//!
//! The countdown is a pure state machine: the session loop feeds it one
//! `tick()` per second and obeys the result. Keeping the clock outside
//! means tick sequences are testable without waiting on real time.

/// What a tick asks the caller to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// Keep counting; only the countdown label changes.
    Idle,

    /// Run a full fetch cycle. The countdown has already reset.
    Refresh,
}

/// Counts down a fixed number of one-second ticks between fetch cycles.
///
/// After a refresh the displayed value is the full period; each tick
/// decrements it, and the tick that would reach zero fires [`Tick::Refresh`]
/// and resets. The displayed value therefore runs `period-1, ..., 1,
/// period` and never shows zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Countdown {
    period: u32,
    remaining: u32,
}

impl Countdown {
    /// A countdown that fires every `period` ticks. Periods below one
    /// tick are clamped to one.
    pub fn new(period: u32) -> Self {
        let period = period.max(1);
        Countdown {
            period,
            remaining: period,
        }
    }

    /// Advance one tick.
    pub fn tick(&mut self) -> Tick {
        self.remaining -= 1;
        if self.remaining == 0 {
            self.remaining = self.period;
            Tick::Refresh
        } else {
            Tick::Idle
        }
    }

    /// Seconds until the next refresh, as displayed on the page.
    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn period(&self) -> u32 {
        self.period
    }
}
