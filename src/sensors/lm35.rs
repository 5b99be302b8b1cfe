//! LM35 analog temperature sensor (10 mV / °C, 0 °C = 0 mV).
//!
//! ## Dual-target design
//!
//! On ESP-IDF: reads ADC1_CH3 via the oneshot API (initialised by hw_init).
//! On host/test: reads the simulated ADC channel, see [`sim_set_temperature_c`].

use crate::drivers::hw_init;
use crate::pins;

const MV_PER_DEGREE: u32 = 10;

#[cfg(not(target_os = "espidf"))]
pub fn sim_set_temperature_c(celsius: u8) {
    let mv = u32::from(celsius) * MV_PER_DEGREE;
    let raw = (mv * u32::from(hw_init::ADC_MAX)).div_ceil(hw_init::ADC_FULL_SCALE_MV);
    hw_init::sim_set_adc1_raw(hw_init::ADC1_CH_TEMP, raw.min(u32::from(hw_init::ADC_MAX)) as u16);
}

pub struct TemperatureSensor {
    channel: u32,
    _adc_gpio: i32,
}

impl TemperatureSensor {
    pub fn new(adc_gpio: i32, channel: u32) -> Self {
        Self {
            channel,
            _adc_gpio: adc_gpio,
        }
    }

    pub fn on_board() -> Self {
        Self::new(pins::TEMP_ADC_GPIO, hw_init::ADC1_CH_TEMP)
    }

    /// Whole degrees, saturating at 255.
    pub fn read_celsius(&self) -> u8 {
        raw_to_celsius(hw_init::adc1_read(self.channel))
    }
}

fn raw_to_celsius(raw: u16) -> u8 {
    let celsius = hw_init::raw_to_mv(raw) / MV_PER_DEGREE;
    celsius.min(u32::from(u8::MAX)) as u8
}
