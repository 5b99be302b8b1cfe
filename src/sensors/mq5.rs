//! MQ-5 combustible gas sensor (LPG / natural gas), read via ADC1_CH5.
//!
//! The analog output rises with concentration.  Gas level is reported as
//! a percentage of full scale and air purity as its complement.

use crate::drivers::hw_init;
use crate::pins;

use super::percent_of_full_scale;

#[cfg(not(target_os = "espidf"))]
pub fn sim_set_gas_percent(percent: u8) {
    hw_init::sim_set_adc1_raw(hw_init::ADC1_CH_GAS, super::raw_for_percent(percent));
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GasReading {
    pub gas_percent: u8,
    pub air_purity_percent: u8,
}

impl GasReading {
    pub fn from_raw(raw: u16) -> Self {
        let gas_percent = percent_of_full_scale(raw);
        Self {
            gas_percent,
            air_purity_percent: 100 - gas_percent,
        }
    }
}

pub struct GasSensor {
    channel: u32,
    _adc_gpio: i32,
}

impl GasSensor {
    pub fn new(adc_gpio: i32, channel: u32) -> Self {
        Self {
            channel,
            _adc_gpio: adc_gpio,
        }
    }

    pub fn on_board() -> Self {
        Self::new(pins::GAS_ADC_GPIO, hw_init::ADC1_CH_GAS)
    }

    pub fn read(&self) -> GasReading {
        GasReading::from_raw(hw_init::adc1_read(self.channel))
    }
}
