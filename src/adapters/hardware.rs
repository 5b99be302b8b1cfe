//! Hardware adapter: bridges real peripherals to domain port traits.
//!
//! Owns the [`SensorHub`] and the GPIO outputs, exposing them through
//! [`SensorPort`] and [`ActuatorPort`].  On non-espidf targets the
//! underlying drivers use cfg-gated simulation stubs.

use crate::app::ports::{Actuator, ActuatorPort, SensorPort};
use crate::drivers::outputs::GpioOutputs;
use crate::fsm::context::SensorSnapshot;
use crate::sensors::SensorHub;

/// Concrete adapter that combines all hardware behind port traits.
pub struct HardwareAdapter {
    sensor_hub: SensorHub,
    outputs: GpioOutputs,
}

impl HardwareAdapter {
    pub fn new(sensor_hub: SensorHub, outputs: GpioOutputs) -> Self {
        Self {
            sensor_hub,
            outputs,
        }
    }
}

// ── SensorPort implementation ─────────────────────────────────

impl SensorPort for HardwareAdapter {
    fn read_all(&mut self) -> SensorSnapshot {
        self.sensor_hub.read_all()
    }
}

// ── ActuatorPort implementation ───────────────────────────────

impl ActuatorPort for HardwareAdapter {
    fn drive(&mut self, actuator: Actuator, on: bool) {
        self.outputs.drive(actuator, on);
    }
}
