//! One-shot hardware peripheral initialization.
//!
//! Configures the ADC channels and GPIO output directions using raw
//! ESP-IDF sys calls, and exposes the register-level read/write helpers
//! the sensor and actuator adapters use.  Called once from `main()`
//! before the control loop starts.
//!
//! On host builds the same API is backed by atomics so the simulation
//! binary and tests can observe pin levels.

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;
#[cfg(target_os = "espidf")]
use log::info;

#[cfg(target_os = "espidf")]
use crate::app::ports::Actuator;
#[cfg(target_os = "espidf")]
use crate::error::HwInitError;
use crate::error::Result;
#[cfg(target_os = "espidf")]
use crate::pins;

pub const ADC1_CH_TEMP: u32 = 3;
pub const ADC1_CH_LIGHT: u32 = 4;
pub const ADC1_CH_GAS: u32 = 5;

/// 12-bit full scale.
pub const ADC_MAX: u16 = 4095;
/// Input range at 12 dB attenuation (mV).
pub const ADC_FULL_SCALE_MV: u32 = 3300;

#[cfg(target_os = "espidf")]
pub fn init_peripherals() -> Result<()> {
    // SAFETY: Called once from main() before the control loop; single-threaded.
    unsafe {
        init_adc()?;
        init_gpio_outputs()?;
    }
    info!("hw_init: all peripherals configured");
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn init_peripherals() -> Result<()> {
    log::info!("hw_init(sim): peripheral init skipped");
    Ok(())
}

// ── ADC (oneshot) ─────────────────────────────────────────────

#[cfg(target_os = "espidf")]
static mut ADC1_HANDLE: adc_oneshot_unit_handle_t = core::ptr::null_mut();

/// SAFETY: Must be called only after `init_adc()`; the handle is never
/// written again, and only the control loop reads the ADC.
#[cfg(target_os = "espidf")]
unsafe fn adc1_handle() -> adc_oneshot_unit_handle_t {
    unsafe { ADC1_HANDLE }
}

#[cfg(target_os = "espidf")]
unsafe fn init_adc() -> core::result::Result<(), HwInitError> {
    let init_cfg = adc_oneshot_unit_init_cfg_t {
        unit_id: adc_unit_t_ADC_UNIT_1,
        ulp_mode: adc_ulp_mode_t_ADC_ULP_MODE_DISABLE,
        ..Default::default()
    };
    // SAFETY: ADC1_HANDLE is only written here, once at boot.
    let ret = unsafe { adc_oneshot_new_unit(&init_cfg, &raw mut ADC1_HANDLE) };
    if ret != ESP_OK as i32 { return Err(HwInitError::AdcInitFailed(ret)); }

    let chan_cfg = adc_oneshot_chan_cfg_t {
        atten: adc_atten_t_ADC_ATTEN_DB_12,
        bitwidth: adc_bitwidth_t_ADC_BITWIDTH_12,
    };

    for channel in [ADC1_CH_TEMP, ADC1_CH_LIGHT, ADC1_CH_GAS] {
        let ret = unsafe { adc_oneshot_config_channel(adc1_handle(), channel, &chan_cfg) };
        if ret != ESP_OK as i32 { return Err(HwInitError::AdcInitFailed(ret)); }
    }

    info!("hw_init: ADC1 configured (CH3=temp, CH4=light, CH5=gas)");
    Ok(())
}

#[cfg(target_os = "espidf")]
pub fn adc1_read(channel: u32) -> u16 {
    let mut raw: i32 = 0;
    // SAFETY: adc1_handle() contract, control-loop access only.
    let ret = unsafe { adc_oneshot_read(adc1_handle(), channel, &mut raw) };
    if ret != ESP_OK as i32 {
        return 0;
    }
    raw.clamp(0, i32::from(ADC_MAX)) as u16
}

/// Convert a raw 12-bit sample to millivolts.
pub fn raw_to_mv(raw: u16) -> u32 {
    u32::from(raw.min(ADC_MAX)) * ADC_FULL_SCALE_MV / u32::from(ADC_MAX)
}

// ── GPIO Outputs ──────────────────────────────────────────────

#[cfg(target_os = "espidf")]
unsafe fn init_gpio_outputs() -> core::result::Result<(), HwInitError> {
    for actuator in Actuator::ALL {
        let pin = pins::actuator_gpio(actuator);
        let cfg = gpio_config_t {
            pin_bit_mask: 1u64 << pin,
            mode: gpio_mode_t_GPIO_MODE_OUTPUT,
            pull_up_en: gpio_pullup_t_GPIO_PULLUP_DISABLE,
            pull_down_en: gpio_pulldown_t_GPIO_PULLDOWN_DISABLE,
            intr_type: gpio_int_type_t_GPIO_INTR_DISABLE,
        };
        let ret = unsafe { gpio_config(&cfg) };
        if ret != ESP_OK as i32 { return Err(HwInitError::GpioConfigFailed(ret)); }
        unsafe { gpio_set_level(pin as gpio_num_t, 0) };
    }

    info!("hw_init: {} GPIO outputs configured, all LOW", Actuator::COUNT);
    Ok(())
}

#[cfg(target_os = "espidf")]
pub fn gpio_write(pin: i32, high: bool) {
    // SAFETY: gpio_set_level is a single register write to a pin that
    // init_gpio_outputs() configured as output; safe from any task.
    unsafe { gpio_set_level(pin as gpio_num_t, u32::from(high)); }
}

// ── Host simulation ───────────────────────────────────────────

#[cfg(not(target_os = "espidf"))]
mod sim {
    use core::sync::atomic::{AtomicU16, AtomicU32, Ordering};

    /// Bit `n` = level of GPIO `n`.
    static OUTPUT_LEVELS: AtomicU32 = AtomicU32::new(0);
    /// Injected raw samples for ADC1 channels 0 – 9.
    static ADC_RAW: [AtomicU16; 10] = [const { AtomicU16::new(0) }; 10];

    pub fn gpio_write(pin: i32, high: bool) {
        let bit = 1u32 << pin;
        if high {
            OUTPUT_LEVELS.fetch_or(bit, Ordering::Relaxed);
        } else {
            OUTPUT_LEVELS.fetch_and(!bit, Ordering::Relaxed);
        }
    }

    pub fn gpio_level(pin: i32) -> bool {
        OUTPUT_LEVELS.load(Ordering::Relaxed) & (1u32 << pin) != 0
    }

    pub fn adc1_read(channel: u32) -> u16 {
        ADC_RAW
            .get(channel as usize)
            .map_or(0, |c| c.load(Ordering::Relaxed))
    }

    pub fn set_adc1_raw(channel: u32, raw: u16) {
        if let Some(c) = ADC_RAW.get(channel as usize) {
            c.store(raw, Ordering::Relaxed);
        }
    }
}

#[cfg(not(target_os = "espidf"))]
pub use sim::{adc1_read, gpio_write};

/// Last level written to `pin` (host simulation only).
#[cfg(not(target_os = "espidf"))]
pub fn sim_output_level(pin: i32) -> bool {
    sim::gpio_level(pin)
}

/// Inject a raw ADC sample (host simulation only).
#[cfg(not(target_os = "espidf"))]
pub fn sim_set_adc1_raw(channel: u32, raw: u16) {
    sim::set_adc1_raw(channel, raw);
}
