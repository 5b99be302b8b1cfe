//! Outbound application events.
//!
//! The [`ControlService`](super::service::ControlService) emits these
//! through the [`EventSink`](super::ports::EventSink) port.  Adapters on
//! the other side decide what to do with them.

use crate::fsm::EmergencyState;
use crate::fsm::context::SensorSnapshot;
use crate::safety::{EmergencyKind, Trigger};
use crate::shared::{Latches, ModeSnapshot};

/// Structured events emitted by the application core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// The service has started (carries initial state).
    Started(EmergencyState),

    /// The control FSM entered a terminal emergency state.
    EmergencyDeclared { kind: EmergencyKind, trigger: Trigger },

    /// Periodic status report.
    Status(StatusReport),
}

/// A point-in-time status report suitable for logging or transmission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusReport {
    pub cycle: u64,
    pub state: EmergencyState,
    pub sensors: SensorSnapshot,
    pub modes: ModeSnapshot,
    pub latches: Latches,
}
