//! Calendar clock advanced by the periodic hardware tick.
//!
//! The tick source only ever bumps a single `AtomicU32` of elapsed
//! seconds.  The calendar fields are derived from that counter and the
//! boot-time seed on the **reader** side, so a reader can never observe a
//! half-applied carry (seconds wrapped but minutes not yet incremented).
//!
//! ```text
//!  timer ISR ──▶ sub-tick counter ──[== ticks_per_second]──▶ elapsed_secs
//!                                                                 │
//!  control loop ◀── ClockState::advanced_by(seed, elapsed) ◀──────┘
//! ```
//!
//! The calendar is deliberately simple: every month has 31 days and the
//! year has no number, it only wraps December back to January.

use core::fmt;
use core::sync::atomic::{AtomicU16, AtomicU32, Ordering};

use serde::{Deserialize, Serialize};

const SECS_PER_MINUTE: u32 = 60;
const SECS_PER_HOUR: u32 = 60 * SECS_PER_MINUTE;
const SECS_PER_DAY: u32 = 24 * SECS_PER_HOUR;
const DAYS_PER_MONTH: u32 = 31;
const MONTHS_PER_YEAR: u32 = 12;
/// One full turn of every field; advancing by this leaves the clock unchanged.
const SECS_PER_YEAR: u32 = SECS_PER_DAY * DAYS_PER_MONTH * MONTHS_PER_YEAR;

// ---------------------------------------------------------------------------
// ClockState
// ---------------------------------------------------------------------------

/// Wall-clock reading shown on the status display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClockState {
    pub seconds: u8,
    pub minutes: u8,
    pub hours: u8,
    /// 1–31.
    pub day: u8,
    /// 1–12.
    pub month: u8,
}

impl Default for ClockState {
    /// The controller boots at 09:45:00 on 07/05.
    fn default() -> Self {
        Self::new(0, 45, 9, 7, 5)
    }
}

impl ClockState {
    pub const fn new(seconds: u8, minutes: u8, hours: u8, day: u8, month: u8) -> Self {
        Self {
            seconds,
            minutes,
            hours,
            day,
            month,
        }
    }

    /// Every field within its bound.
    pub fn is_valid(&self) -> bool {
        self.seconds < 60
            && self.minutes < 60
            && self.hours < 24
            && (1..=DAYS_PER_MONTH as u8).contains(&self.day)
            && (1..=MONTHS_PER_YEAR as u8).contains(&self.month)
    }

    /// Advance by exactly one second, cascading the carry chain.
    pub fn tick(&mut self) {
        self.seconds += 1;
        if self.seconds < 60 {
            return;
        }
        self.seconds = 0;
        self.minutes += 1;
        if self.minutes < 60 {
            return;
        }
        self.minutes = 0;
        self.hours += 1;
        if self.hours < 24 {
            return;
        }
        self.hours = 0;
        self.day += 1;
        if self.day <= DAYS_PER_MONTH as u8 {
            return;
        }
        self.day = 1;
        self.month += 1;
        if self.month > MONTHS_PER_YEAR as u8 {
            self.month = 1;
        }
    }

    /// The reading `secs` seconds after `self`.
    ///
    /// Equivalent to calling [`tick`](Self::tick) `secs` times, in constant time.
    pub fn advanced_by(self, secs: u32) -> Self {
        let secs = secs % SECS_PER_YEAR;

        let time_of_day = u32::from(self.hours) * SECS_PER_HOUR
            + u32::from(self.minutes) * SECS_PER_MINUTE
            + u32::from(self.seconds)
            + secs;
        let in_day = time_of_day % SECS_PER_DAY;

        let day_index = u32::from(self.day - 1) + time_of_day / SECS_PER_DAY;
        let month_index = u32::from(self.month - 1) + day_index / DAYS_PER_MONTH;

        Self {
            seconds: (in_day % SECS_PER_MINUTE) as u8,
            minutes: (in_day / SECS_PER_MINUTE % 60) as u8,
            hours: (in_day / SECS_PER_HOUR) as u8,
            day: (day_index % DAYS_PER_MONTH + 1) as u8,
            month: (month_index % MONTHS_PER_YEAR + 1) as u8,
        }
    }
}

impl fmt::Display for ClockState {
    /// `HH:MM:SS DD/MM`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}:{:02}:{:02} {:02}/{:02}",
            self.hours, self.minutes, self.seconds, self.day, self.month
        )
    }
}

// ---------------------------------------------------------------------------
// ClockTicker
// ---------------------------------------------------------------------------

/// Interrupt-owned clock.
///
/// `tick()` is the only writer and runs on the timer interrupt (or the
/// ESP timer task).  `now()` may be called from anywhere at any time.
pub struct ClockTicker {
    seed: ClockState,
    ticks_per_second: u16,
    sub_ticks: AtomicU16,
    elapsed_secs: AtomicU32,
}

impl ClockTicker {
    pub fn new(seed: ClockState, ticks_per_second: u16) -> Self {
        Self {
            seed,
            ticks_per_second: ticks_per_second.max(1),
            sub_ticks: AtomicU16::new(0),
            elapsed_secs: AtomicU32::new(0),
        }
    }

    /// Hardware tick handler.  Returns `true` when the visible clock
    /// advanced by one second.
    pub fn tick(&self) -> bool {
        // Single writer: a plain load/store pair cannot race with itself.
        let sub = self.sub_ticks.load(Ordering::Relaxed) + 1;
        if sub < self.ticks_per_second {
            self.sub_ticks.store(sub, Ordering::Relaxed);
            return false;
        }
        self.sub_ticks.store(0, Ordering::Relaxed);
        self.elapsed_secs.fetch_add(1, Ordering::Release);
        true
    }

    /// Seconds the clock has advanced since boot.
    pub fn elapsed_secs(&self) -> u32 {
        self.elapsed_secs.load(Ordering::Acquire)
    }

    /// Consistent calendar reading, derived from one atomic load.
    pub fn now(&self) -> ClockState {
        self.seed.advanced_by(self.elapsed_secs())
    }

    pub fn ticks_per_second(&self) -> u16 {
        self.ticks_per_second
    }
}
