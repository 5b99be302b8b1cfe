//! Safety supervisor.
//!
//! The supervisor runs **every cycle before the FSM** and decides whether
//! an emergency condition holds.  The verdict lands in
//! `FsmContext.emergency`; the `Normal` state handler turns it into a
//! transition after the regular arbitration rules have run.
//!
//! ## Conditions
//!
//! | Verdict   | Triggered by                                         |
//! |-----------|------------------------------------------------------|
//! | `Fire`    | temperature ≥ critical threshold, or fire latch      |
//! | `GasLeak` | gas level > leak threshold, or gas latch             |
//!
//! Fire wins when both hold.  The verdict is recomputed every cycle but
//! the FSM never leaves an emergency state, so a verdict that later
//! clears has no effect.

use crate::app::ports::Actuator;
use crate::config::SystemConfig;
use crate::fsm::EmergencyState;
use crate::fsm::context::SensorSnapshot;
use crate::shared::Latches;
use core::fmt;
use log::error;

// ---------------------------------------------------------------------------
// Fixed safety responses
// ---------------------------------------------------------------------------

/// Gas valve closed, ventilation on, house de-energised, siren on.
pub const GAS_LEAK_RESPONSE: &[(Actuator, bool)] = &[
    (Actuator::MainPower, false),
    (Actuator::OutdoorLight, false),
    (Actuator::IndoorFan, true),
    (Actuator::ExhaustFan, true),
    (Actuator::GasValve, true),
    (Actuator::Buzzer, true),
];

/// The gas-leak response plus the sprinkler pump.
pub const FIRE_RESPONSE: &[(Actuator, bool)] = &[
    (Actuator::MainPower, false),
    (Actuator::OutdoorLight, false),
    (Actuator::IndoorFan, true),
    (Actuator::ExhaustFan, true),
    (Actuator::GasValve, true),
    (Actuator::Buzzer, true),
    (Actuator::WaterPump, true),
];

/// Which emergency is in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EmergencyKind {
    Fire,
    GasLeak,
}

impl EmergencyKind {
    pub const fn response(self) -> &'static [(Actuator, bool)] {
        match self {
            Self::Fire => FIRE_RESPONSE,
            Self::GasLeak => GAS_LEAK_RESPONSE,
        }
    }

    /// Terminal FSM state for this emergency.
    pub const fn state(self) -> EmergencyState {
        match self {
            Self::Fire => EmergencyState::Fire,
            Self::GasLeak => EmergencyState::GasLeak,
        }
    }
}

impl fmt::Display for EmergencyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fire => write!(f, "fire"),
            Self::GasLeak => write!(f, "gas leak"),
        }
    }
}

/// What raised the emergency.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// Declared over the serial link.
    Operator,
    /// Temperature at or above the critical threshold.
    Temperature(u8),
    /// Gas level above the leak threshold.
    GasLevel(u8),
}

impl fmt::Display for Trigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Operator => write!(f, "operator"),
            Self::Temperature(t) => write!(f, "temperature {t} °C"),
            Self::GasLevel(g) => write!(f, "gas level {g} %"),
        }
    }
}

// ---------------------------------------------------------------------------
// Supervisor
// ---------------------------------------------------------------------------

/// Safety supervisor.
pub struct SafetySupervisor {
    critical_temp_c: u8,
    gas_leak_percent: u8,
    /// Last verdict, for edge-triggered logging.
    last: Option<EmergencyKind>,
}

impl SafetySupervisor {
    pub fn new(config: &SystemConfig) -> Self {
        Self {
            critical_temp_c: config.temp_critical_threshold_c,
            gas_leak_percent: config.gas_leak_threshold_percent,
            last: None,
        }
    }

    /// Evaluate the emergency conditions against this cycle's inputs.
    pub fn evaluate(&mut self, snap: &SensorSnapshot, latches: Latches) -> Option<EmergencyKind> {
        let classified = self.classify(snap, latches);
        let verdict = classified.map(|(kind, _)| kind);
        if let Some((kind, trigger)) = classified.filter(|_| verdict != self.last) {
            error!("SAFETY: {kind} condition ({trigger})");
        }
        self.last = verdict;
        verdict
    }

    /// Like [`evaluate`](Self::evaluate) but also reports the trigger.
    pub fn classify(&self, snap: &SensorSnapshot, latches: Latches) -> Option<(EmergencyKind, Trigger)> {
        if latches.fire {
            return Some((EmergencyKind::Fire, Trigger::Operator));
        }
        if snap.temperature_c >= self.critical_temp_c {
            return Some((EmergencyKind::Fire, Trigger::Temperature(snap.temperature_c)));
        }
        if latches.gas {
            return Some((EmergencyKind::GasLeak, Trigger::Operator));
        }
        if snap.gas_percent > self.gas_leak_percent {
            return Some((EmergencyKind::GasLeak, Trigger::GasLevel(snap.gas_percent)));
        }
        None
    }
}
