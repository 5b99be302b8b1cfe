//! Digital actuator outputs.
//!
//! Every actuator is a relay or MOSFET on a push-pull GPIO, driven
//! open-loop and never read back.  [`GpioOutputs`] carries no state, so
//! the control loop and the serial receive task each hold their own copy
//! and write the same pins without locking: a GPIO level write is a
//! single register store.

use log::trace;

use crate::app::ports::{Actuator, ActuatorPort};
use crate::drivers::hw_init;
use crate::pins;

#[derive(Debug, Clone, Copy, Default)]
pub struct GpioOutputs;

impl GpioOutputs {
    pub fn new() -> Self {
        Self
    }
}

impl ActuatorPort for GpioOutputs {
    fn drive(&mut self, actuator: Actuator, on: bool) {
        trace!("GPIO {:?} <- {}", actuator, u8::from(on));
        hw_init::gpio_write(pins::actuator_gpio(actuator), on);
    }
}

#[cfg(all(test, not(target_os = "espidf")))]
mod tests {
    use super::*;

    #[test]
    fn drive_lands_on_mapped_pin() {
        let mut out = GpioOutputs::new();
        out.drive(Actuator::Buzzer, true);
        assert!(hw_init::sim_output_level(pins::BUZZER_GPIO));
        out.drive(Actuator::Buzzer, false);
        assert!(!hw_init::sim_output_level(pins::BUZZER_GPIO));
    }
}
