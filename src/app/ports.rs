//! Port traits: the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ ControlService / CommandChannel (domain)
//! ```
//!
//! Driven adapters (sensors, actuators, display, event sinks) implement
//! these traits.  The domain consumes them via generics, so the control
//! core never touches hardware directly.
//!
//! Every port is infallible and must return within microseconds: the
//! [`ActuatorPort`] is also driven from the receive-interrupt path.

use crate::clock::ClockState;
use crate::fsm::context::SensorSnapshot;

// ───────────────────────────────────────────────────────────────
// Actuator identity
// ───────────────────────────────────────────────────────────────

/// Every open-loop output the controller drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Actuator {
    /// Main power relay for the house circuits.
    MainPower = 0,
    OutdoorLight = 1,
    IndoorLight = 2,
    IndoorFan = 3,
    ExhaustFan = 4,
    /// `true` = valve closed (safe).
    GasValve = 5,
    Buzzer = 6,
    WaterPump = 7,
}

impl Actuator {
    pub const COUNT: usize = 8;

    /// Application order within one cycle (main power first).
    pub const ALL: [Actuator; Self::COUNT] = [
        Self::MainPower,
        Self::OutdoorLight,
        Self::IndoorLight,
        Self::IndoorFan,
        Self::ExhaustFan,
        Self::GasValve,
        Self::Buzzer,
        Self::WaterPump,
    ];

    pub const fn index(self) -> usize {
        self as usize
    }
}

// ───────────────────────────────────────────────────────────────
// Sensor port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port: the domain calls this once per control cycle.
pub trait SensorPort {
    /// Read temperature, light, gas and air purity, in that order, and
    /// return them as one snapshot.
    fn read_all(&mut self) -> SensorSnapshot;
}

// ───────────────────────────────────────────────────────────────
// Actuator port (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// Write-side port: set a single output high or low.
pub trait ActuatorPort {
    fn drive(&mut self, actuator: Actuator, on: bool);

    /// Switch both ventilation fans together.
    fn set_cooling(&mut self, on: bool) {
        self.drive(Actuator::IndoorFan, on);
        self.drive(Actuator::ExhaustFan, on);
    }
}

// ───────────────────────────────────────────────────────────────
// Status display port
// ───────────────────────────────────────────────────────────────

/// What the status display shows after each normal cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusFrame {
    pub clock: ClockState,
    pub sensors: SensorSnapshot,
}

/// Display collaborator.  Layout and formatting belong to the adapter.
pub trait StatusDisplay {
    fn show(&mut self, frame: &StatusFrame);
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging / telemetry)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}
