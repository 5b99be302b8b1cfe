//! GPIO / peripheral pin assignments for the Eco Home controller board.
//!
//! Single source of truth: every driver references this module rather than
//! hard-coding pin numbers.

use crate::app::ports::Actuator;

// ---------------------------------------------------------------------------
// Actuator outputs (relay / MOSFET drivers, active HIGH)
// ---------------------------------------------------------------------------

pub const OUTDOOR_LIGHT_GPIO: i32 = 8;
pub const INDOOR_LIGHT_GPIO: i32 = 9;
pub const INDOOR_FAN_GPIO: i32 = 10;
pub const EXHAUST_FAN_GPIO: i32 = 11;
/// Main power relay coil.
pub const MAIN_POWER_GPIO: i32 = 12;
/// Solenoid gas valve: HIGH = closed (safe), LOW = open (normal).
pub const GAS_VALVE_GPIO: i32 = 13;
pub const BUZZER_GPIO: i32 = 14;
/// Sprinkler water pump relay.
pub const WATER_PUMP_GPIO: i32 = 21;

/// Output pin driving `actuator`.
pub const fn actuator_gpio(actuator: Actuator) -> i32 {
    match actuator {
        Actuator::OutdoorLight => OUTDOOR_LIGHT_GPIO,
        Actuator::IndoorLight => INDOOR_LIGHT_GPIO,
        Actuator::IndoorFan => INDOOR_FAN_GPIO,
        Actuator::ExhaustFan => EXHAUST_FAN_GPIO,
        Actuator::MainPower => MAIN_POWER_GPIO,
        Actuator::GasValve => GAS_VALVE_GPIO,
        Actuator::Buzzer => BUZZER_GPIO,
        Actuator::WaterPump => WATER_PUMP_GPIO,
    }
}

// ---------------------------------------------------------------------------
// Sensors: analog (ADC1, 12-bit, 0 – 3.3 V)
// ---------------------------------------------------------------------------

/// LM35 temperature sensor.  ADC1 channel 3 (GPIO 4 on ESP32-S3).
pub const TEMP_ADC_GPIO: i32 = 4;
/// LDR light sensor divider.  ADC1 channel 4 (GPIO 5 on ESP32-S3).
pub const LIGHT_ADC_GPIO: i32 = 5;
/// MQ-5 gas sensor.  ADC1 channel 5 (GPIO 6 on ESP32-S3).
pub const GAS_ADC_GPIO: i32 = 6;

// ---------------------------------------------------------------------------
// Operator serial link (UART1)
// ---------------------------------------------------------------------------

pub const UART_TX_GPIO: i32 = 17;
pub const UART_RX_GPIO: i32 = 18;
pub const UART_BAUD: u32 = 9600;
