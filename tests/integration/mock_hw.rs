//! Mock hardware adapters for integration tests.
//!
//! [`MockHouse`] stands in for the whole board: a settable sensor snapshot
//! and a pin-level table shared with every [`MockOutputs`] handle, the
//! same way the real GPIO outputs are shared between the control loop and
//! the serial receive task.

use std::sync::{Arc, Mutex};

use ecohome::app::events::AppEvent;
use ecohome::app::ports::{
    Actuator, ActuatorPort, EventSink, SensorPort, StatusDisplay, StatusFrame,
};
use ecohome::fsm::context::SensorSnapshot;

// ── Pin table ─────────────────────────────────────────────────

#[derive(Debug, Default)]
struct Pins {
    levels: [Option<bool>; Actuator::COUNT],
    writes: Vec<(Actuator, bool)>,
}

/// Cheap clonable handle onto the shared pin table.
#[derive(Clone, Default)]
pub struct MockOutputs(Arc<Mutex<Pins>>);

#[allow(dead_code)]
impl MockOutputs {
    /// Last level written to `actuator`, `None` if never driven.
    pub fn level(&self, actuator: Actuator) -> Option<bool> {
        self.0.lock().unwrap().levels[actuator.index()]
    }

    pub fn is_on(&self, actuator: Actuator) -> bool {
        self.level(actuator) == Some(true)
    }

    pub fn writes(&self) -> Vec<(Actuator, bool)> {
        self.0.lock().unwrap().writes.clone()
    }

    pub fn clear_writes(&self) {
        self.0.lock().unwrap().writes.clear();
    }
}

impl ActuatorPort for MockOutputs {
    fn drive(&mut self, actuator: Actuator, on: bool) {
        let mut pins = self.0.lock().unwrap();
        pins.levels[actuator.index()] = Some(on);
        pins.writes.push((actuator, on));
    }
}

// ── MockHouse ─────────────────────────────────────────────────

pub struct MockHouse {
    pub sensors: SensorSnapshot,
    pub reads: u32,
    outputs: MockOutputs,
}

#[allow(dead_code)]
impl MockHouse {
    /// A calm, bright, occupied house.
    pub fn new() -> Self {
        Self {
            sensors: SensorSnapshot {
                temperature_c: 22,
                light_percent: 70,
                gas_percent: 0,
                air_purity_percent: 100,
            },
            reads: 0,
            outputs: MockOutputs::default(),
        }
    }

    /// Handle for a command channel driving the same pins.
    pub fn outputs(&self) -> MockOutputs {
        self.outputs.clone()
    }

    pub fn level(&self, actuator: Actuator) -> Option<bool> {
        self.outputs.level(actuator)
    }

    pub fn is_on(&self, actuator: Actuator) -> bool {
        self.outputs.is_on(actuator)
    }

    pub fn set_gas(&mut self, gas_percent: u8) {
        self.sensors.gas_percent = gas_percent;
        self.sensors.air_purity_percent = 100 - gas_percent;
    }
}

impl Default for MockHouse {
    fn default() -> Self {
        Self::new()
    }
}

impl SensorPort for MockHouse {
    fn read_all(&mut self) -> SensorSnapshot {
        self.reads += 1;
        self.sensors
    }
}

impl ActuatorPort for MockHouse {
    fn drive(&mut self, actuator: Actuator, on: bool) {
        self.outputs.drive(actuator, on);
    }
}

// ── Display and event sink ────────────────────────────────────

#[derive(Default)]
pub struct MockDisplay {
    pub frames: Vec<StatusFrame>,
}

impl StatusDisplay for MockDisplay {
    fn show(&mut self, frame: &StatusFrame) {
        self.frames.push(*frame);
    }
}

#[derive(Default)]
pub struct LogSink {
    pub events: Vec<AppEvent>,
}

impl EventSink for LogSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}
