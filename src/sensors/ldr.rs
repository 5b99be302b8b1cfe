//! Light-dependent resistor in a voltage divider, read via ADC1_CH4.
//!
//! Bright light pulls the divider up: 100 % = full daylight.

use crate::drivers::hw_init;
use crate::pins;

use super::percent_of_full_scale;

#[cfg(not(target_os = "espidf"))]
pub fn sim_set_light_percent(percent: u8) {
    hw_init::sim_set_adc1_raw(hw_init::ADC1_CH_LIGHT, super::raw_for_percent(percent));
}

pub struct LightSensor {
    channel: u32,
    _adc_gpio: i32,
}

impl LightSensor {
    pub fn new(adc_gpio: i32, channel: u32) -> Self {
        Self {
            channel,
            _adc_gpio: adc_gpio,
        }
    }

    pub fn on_board() -> Self {
        Self::new(pins::LIGHT_ADC_GPIO, hw_init::ADC1_CH_LIGHT)
    }

    pub fn read_percent(&self) -> u8 {
        percent_of_full_scale(hw_init::adc1_read(self.channel))
    }
}
