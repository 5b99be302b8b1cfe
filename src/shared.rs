//! State shared between the asynchronous producers and the control loop.
//!
//! ```text
//!  clock tick ISR ───▶ ┌──────────────────────────┐
//!                      │       SharedState        │ ───▶ control loop
//!  UART RX handler ──▶ │  clock · modes · latches │      (once per cycle)
//!                      │  published FSM state     │
//!  control loop ─────▶ └──────────────────────────┘
//! ```
//!
//! Built once at boot and handed out by shared reference.  Every cell is
//! a single atomic with exactly one writing context:
//!
//! | Cell            | Writer           | Readers              |
//! |-----------------|------------------|----------------------|
//! | `clock`         | tick ISR         | loop (display)       |
//! | light modes     | command handler  | loop                 |
//! | latches         | command handler  | loop                 |
//! | `last_command`  | command handler  | diagnostics          |
//! | `state`         | loop             | command handler      |
//!
//! No cell is composite, so no reader can observe a torn update.

use core::sync::atomic::{AtomicBool, AtomicU8, AtomicU16, Ordering};

use crate::clock::ClockTicker;
use crate::config::SystemConfig;
use crate::fsm::EmergencyState;

// ---------------------------------------------------------------------------
// Light mode
// ---------------------------------------------------------------------------

/// Mode flag of a light subsystem, together with the last manual level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightMode {
    /// Sensor / occupancy driven.
    Automatic,
    /// Operator override holding the last commanded level.
    Manual { on: bool },
}

impl LightMode {
    pub fn is_automatic(self) -> bool {
        matches!(self, Self::Automatic)
    }

    const fn encode(self) -> u8 {
        match self {
            Self::Automatic => 0,
            Self::Manual { on: false } => 1,
            Self::Manual { on: true } => 2,
        }
    }

    fn decode(raw: u8) -> Self {
        match raw {
            1 => Self::Manual { on: false },
            2 => Self::Manual { on: true },
            _ => Self::Automatic,
        }
    }
}

/// Flag and manual level packed into one byte so they change together.
struct LightModeCell(AtomicU8);

impl LightModeCell {
    const fn new(mode: LightMode) -> Self {
        Self(AtomicU8::new(mode.encode()))
    }

    fn load(&self) -> LightMode {
        LightMode::decode(self.0.load(Ordering::Acquire))
    }

    fn store(&self, mode: LightMode) {
        self.0.store(mode.encode(), Ordering::Release);
    }
}

/// Both light modes as sampled at the start of a cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModeSnapshot {
    pub outdoor: LightMode,
    pub indoor: LightMode,
}

impl Default for ModeSnapshot {
    fn default() -> Self {
        Self {
            outdoor: LightMode::Automatic,
            indoor: LightMode::Automatic,
        }
    }
}

/// Sticky emergency declarations made by the operator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Latches {
    pub fire: bool,
    pub gas: bool,
}

impl Latches {
    pub fn any(self) -> bool {
        self.fire || self.gas
    }
}

// ---------------------------------------------------------------------------
// SharedState
// ---------------------------------------------------------------------------

const NO_COMMAND: u16 = 0x100;

/// The process-wide context object.
pub struct SharedState {
    clock: ClockTicker,
    outdoor: LightModeCell,
    indoor: LightModeCell,
    fire_declared: AtomicBool,
    gas_declared: AtomicBool,
    last_command: AtomicU16,
    state: AtomicU8,
}

impl SharedState {
    pub fn new(config: &SystemConfig) -> Self {
        Self {
            clock: ClockTicker::new(config.clock_seed, config.ticks_per_second),
            outdoor: LightModeCell::new(LightMode::Automatic),
            indoor: LightModeCell::new(LightMode::Automatic),
            fire_declared: AtomicBool::new(false),
            gas_declared: AtomicBool::new(false),
            last_command: AtomicU16::new(NO_COMMAND),
            state: AtomicU8::new(EmergencyState::Normal as u8),
        }
    }

    // ── Clock ─────────────────────────────────────────────────

    pub fn clock(&self) -> &ClockTicker {
        &self.clock
    }

    // ── Modes ─────────────────────────────────────────────────

    pub fn set_outdoor_mode(&self, mode: LightMode) {
        self.outdoor.store(mode);
    }

    pub fn set_indoor_mode(&self, mode: LightMode) {
        self.indoor.store(mode);
    }

    pub fn modes(&self) -> ModeSnapshot {
        ModeSnapshot {
            outdoor: self.outdoor.load(),
            indoor: self.indoor.load(),
        }
    }

    // ── Latches ───────────────────────────────────────────────

    pub fn declare_fire(&self) {
        self.fire_declared.store(true, Ordering::Release);
    }

    pub fn declare_gas(&self) {
        self.gas_declared.store(true, Ordering::Release);
    }

    pub fn latches(&self) -> Latches {
        Latches {
            fire: self.fire_declared.load(Ordering::Acquire),
            gas: self.gas_declared.load(Ordering::Acquire),
        }
    }

    // ── Command history ───────────────────────────────────────

    pub fn record_command(&self, byte: u8) {
        self.last_command.store(u16::from(byte), Ordering::Relaxed);
    }

    /// Last byte received on the serial link, if any.
    pub fn last_command(&self) -> Option<u8> {
        let raw = self.last_command.load(Ordering::Relaxed);
        u8::try_from(raw).ok()
    }

    // ── Emergency state ───────────────────────────────────────

    /// Publish the control FSM state.  Control loop only.
    pub fn publish_state(&self, state: EmergencyState) {
        self.state.store(state as u8, Ordering::Release);
    }

    pub fn emergency_state(&self) -> EmergencyState {
        EmergencyState::from_index(self.state.load(Ordering::Acquire) as usize)
    }

    /// An emergency has been entered or declared and not yet picked up.
    pub fn emergency_active(&self) -> bool {
        self.emergency_state().is_terminal() || self.latches().any()
    }
}
