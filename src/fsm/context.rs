//! Shared mutable context threaded through every FSM handler.
//!
//! `FsmContext` is the single struct that state handlers read from and
//! write to.  It holds the sensor snapshot, the mode flags and latches
//! sampled for this cycle, the safety verdict, and the actuator commands
//! the service applies after the tick.  Think of it as the "blackboard"
//! in a blackboard architecture.

use crate::app::ports::Actuator;
use crate::config::SystemConfig;
use crate::safety::EmergencyKind;
use crate::shared::{Latches, ModeSnapshot};

// ---------------------------------------------------------------------------
// Sensor snapshot (read-only to state handlers; written by sensor hub)
// ---------------------------------------------------------------------------

/// One poll of every sensor.  Valid for exactly one cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SensorSnapshot {
    /// LM35 reading (°C).
    pub temperature_c: u8,
    /// Ambient light, 0 – 100 %.
    pub light_percent: u8,
    /// MQ-5 combustible gas level, 0 – 100 %.
    pub gas_percent: u8,
    /// Air purity, 0 – 100 %.
    pub air_purity_percent: u8,
}

// ---------------------------------------------------------------------------
// Actuator commands (written by state handlers; consumed by the service)
// ---------------------------------------------------------------------------

/// Requested output levels for one cycle.
///
/// `None` means "leave the pin as it is", which is how a rule expresses
/// that it makes no decision (e.g. cooling at critical temperature).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActuatorCommands {
    levels: [Option<bool>; Actuator::COUNT],
}

impl ActuatorCommands {
    pub fn set(&mut self, actuator: Actuator, on: bool) {
        self.levels[actuator.index()] = Some(on);
    }

    pub fn get(&self, actuator: Actuator) -> Option<bool> {
        self.levels[actuator.index()]
    }

    /// Both ventilation fans.
    pub fn set_cooling(&mut self, on: bool) {
        self.set(Actuator::IndoorFan, on);
        self.set(Actuator::ExhaustFan, on);
    }

    /// Overlay a fixed response table.
    pub fn apply(&mut self, response: &[(Actuator, bool)]) {
        for &(actuator, on) in response {
            self.set(actuator, on);
        }
    }

    pub fn clear(&mut self) {
        self.levels = [None; Actuator::COUNT];
    }

    /// Requested writes in application order.
    pub fn iter(&self) -> impl Iterator<Item = (Actuator, bool)> + '_ {
        Actuator::ALL
            .iter()
            .filter_map(|&a| self.get(a).map(|on| (a, on)))
    }
}

// ---------------------------------------------------------------------------
// FsmContext
// ---------------------------------------------------------------------------

/// The shared context passed to every state handler function.
pub struct FsmContext {
    // -- Timing --
    /// Cycles elapsed since the current state was entered.
    pub ticks_in_state: u64,
    /// Monotonic total cycle count.
    pub total_ticks: u64,

    // -- Inputs, refreshed before each tick --
    pub sensors: SensorSnapshot,
    pub modes: ModeSnapshot,
    pub latches: Latches,
    /// Safety verdict for this cycle.  Set by the supervisor.
    pub emergency: Option<EmergencyKind>,

    // -- Outputs --
    /// Writes to apply after the tick.  Cleared at the start of each cycle.
    pub commands: ActuatorCommands,

    pub config: SystemConfig,
}

impl FsmContext {
    pub fn new(config: SystemConfig) -> Self {
        Self {
            ticks_in_state: 0,
            total_ticks: 0,
            sensors: SensorSnapshot::default(),
            modes: ModeSnapshot::default(),
            latches: Latches::default(),
            emergency: None,
            commands: ActuatorCommands::default(),
            config,
        }
    }
}
