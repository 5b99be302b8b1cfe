//! Sensor subsystem: individual drivers and the aggregating [`SensorHub`].
//!
//! The hub owns every sensor driver and produces a [`SensorSnapshot`] each
//! cycle that gets written into `FsmContext.sensors`.  Reads are single
//! one-shot ADC samples: no retries, no averaging, no staleness checks.

pub mod ldr;
pub mod lm35;
pub mod mq5;

use crate::drivers::hw_init::ADC_MAX;
use crate::fsm::context::SensorSnapshot;
use ldr::LightSensor;
use lm35::TemperatureSensor;
use mq5::GasSensor;

/// Scale a raw 12-bit sample to 0 – 100 %.
pub(crate) fn percent_of_full_scale(raw: u16) -> u8 {
    let pct = u32::from(raw.min(ADC_MAX)) * 100 / u32::from(ADC_MAX);
    pct as u8
}

/// Smallest raw sample that reads back as `percent`.
#[cfg(not(target_os = "espidf"))]
pub(crate) fn raw_for_percent(percent: u8) -> u16 {
    let pct = u32::from(percent.min(100));
    ((pct * u32::from(ADC_MAX)).div_ceil(100)) as u16
}

/// Aggregates all sensor drivers and produces a unified snapshot.
pub struct SensorHub {
    pub temperature: TemperatureSensor,
    pub light: LightSensor,
    pub gas: GasSensor,
}

impl SensorHub {
    pub fn new(temperature: TemperatureSensor, light: LightSensor, gas: GasSensor) -> Self {
        Self {
            temperature,
            light,
            gas,
        }
    }

    /// Board wiring from [`crate::pins`].
    pub fn on_board() -> Self {
        Self::new(
            TemperatureSensor::on_board(),
            LightSensor::on_board(),
            GasSensor::on_board(),
        )
    }

    /// Read temperature, light, gas and purity, in that order.
    pub fn read_all(&mut self) -> SensorSnapshot {
        let temperature_c = self.temperature.read_celsius();
        let light_percent = self.light.read_percent();
        let gas = self.gas.read();

        SensorSnapshot {
            temperature_c,
            light_percent,
            gas_percent: gas.gas_percent,
            air_purity_percent: gas.air_purity_percent,
        }
    }
}
