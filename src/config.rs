//! System configuration parameters
//!
//! All tunable thresholds and timings for the Eco Home controller.
//! Nothing is persisted: the firmware boots with [`SystemConfig::default`],
//! the host simulation may load a JSON override.

use serde::{Deserialize, Serialize};

use crate::clock::ClockState;
use crate::error::{ConfigError, Result as StartupResult};

/// Core system configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SystemConfig {
    // --- Cooling ---
    /// At or below this temperature (°C) the fans are switched off.
    pub temp_normal_threshold_c: u8,
    /// At or above this temperature (°C) the fire response is declared.
    pub temp_critical_threshold_c: u8,

    // --- Lighting ---
    /// Outdoor light switches on below this light level (%).
    pub light_threshold_percent: u8,

    // --- Air quality ---
    /// Gas level (%) strictly above which a gas leak is declared.
    pub gas_leak_threshold_percent: u8,
    /// Exclusive gas band (%) that forces ventilation on.
    pub marginal_gas_band: (u8, u8),
    /// Exclusive air-purity band (%) that forces ventilation on.
    pub marginal_purity_band: (u8, u8),

    // --- Timing ---
    /// Pause between two control cycles (milliseconds).
    pub cycle_interval_ms: u32,
    /// Period of the hardware clock tick (microseconds).
    pub tick_interval_us: u32,
    /// Hardware ticks per displayed second.
    pub ticks_per_second: u16,
    /// Control cycles between two status reports.
    pub status_interval_cycles: u32,

    // --- Clock ---
    /// Calendar reading at boot.
    pub clock_seed: ClockState,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            // Cooling
            temp_normal_threshold_c: 25,
            temp_critical_threshold_c: 50,

            // Lighting
            light_threshold_percent: 50,

            // Air quality
            gas_leak_threshold_percent: 50,
            marginal_gas_band: (25, 50),
            marginal_purity_band: (75, 100),

            // Timing
            cycle_interval_ms: 100,     // 10 Hz control loop
            tick_interval_us: 20_000,   // 50 Hz hardware tick
            ticks_per_second: 50,
            status_interval_cycles: 10, // 1/s

            clock_seed: ClockState::default(),
        }
    }
}

impl SystemConfig {
    /// Boot configuration: the defaults, or `override_json` on top of them.
    pub fn load(override_json: Option<&str>) -> StartupResult<Self> {
        let config = match override_json {
            Some(json) => Self::from_json(json)?,
            None => Self::default(),
        };
        config.validate()?;
        Ok(config)
    }

    /// Parse a JSON override.  Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json).map_err(|_| ConfigError::Malformed)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject incoherent parameter sets instead of silently clamping them.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.temp_normal_threshold_c >= self.temp_critical_threshold_c {
            return Err(ConfigError::ValidationFailed(
                "temp_normal_threshold_c must be below temp_critical_threshold_c",
            ));
        }
        let percents = [
            self.light_threshold_percent,
            self.gas_leak_threshold_percent,
            self.marginal_gas_band.0,
            self.marginal_gas_band.1,
            self.marginal_purity_band.0,
            self.marginal_purity_band.1,
        ];
        if percents.iter().any(|&p| p > 100) {
            return Err(ConfigError::ValidationFailed("percentages must be 0-100"));
        }
        if self.marginal_gas_band.0 >= self.marginal_gas_band.1
            || self.marginal_purity_band.0 >= self.marginal_purity_band.1
        {
            return Err(ConfigError::ValidationFailed("marginal bands must be non-empty"));
        }
        if self.cycle_interval_ms == 0 || self.tick_interval_us == 0 || self.ticks_per_second == 0
        {
            return Err(ConfigError::ValidationFailed("intervals must be non-zero"));
        }
        if self.status_interval_cycles == 0 {
            return Err(ConfigError::ValidationFailed("status_interval_cycles must be non-zero"));
        }
        if !self.clock_seed.is_valid() {
            return Err(ConfigError::ValidationFailed("clock_seed out of range"));
        }
        Ok(())
    }
}
