//! Mode arbitration for the non-emergency outputs.
//!
//! Pure function of (snapshot, mode flags, config).  Rules are applied in
//! a fixed order and a later rule overwrites an earlier one for the same
//! output, so the marginal-air rule can force cooling on after the
//! temperature rule switched it off.
//!
//! ```text
//!  main power ── indoor Automatic ("occupied")
//!  indoor light ─ Manual level │ Automatic → ON
//!  cooling ────── ≤ normal OFF │ (normal, critical) ON │ ≥ critical untouched
//!  outdoor light  Manual level │ Automatic → light < threshold
//!  cooling ────── marginal air → ON
//! ```

use crate::app::ports::Actuator;
use crate::config::SystemConfig;
use crate::fsm::context::{ActuatorCommands, SensorSnapshot};
use crate::shared::{LightMode, ModeSnapshot};

/// Compute this cycle's regular actuator writes.
pub fn arbitrate(
    snap: &SensorSnapshot,
    modes: ModeSnapshot,
    config: &SystemConfig,
) -> ActuatorCommands {
    let mut cmds = ActuatorCommands::default();

    let occupied = modes.indoor.is_automatic();
    cmds.set(Actuator::MainPower, occupied);

    cmds.set(Actuator::IndoorLight, match modes.indoor {
        LightMode::Manual { on } => on,
        LightMode::Automatic => occupied,
    });

    if let Some(on) = cooling_for_temperature(snap.temperature_c, config) {
        cmds.set_cooling(on);
    }

    cmds.set(Actuator::OutdoorLight, match modes.outdoor {
        LightMode::Manual { on } => on,
        LightMode::Automatic => snap.light_percent < config.light_threshold_percent,
    });

    if air_is_marginal(snap, config) {
        cmds.set_cooling(true);
    }

    cmds
}

/// `None` at or above the critical threshold: escalation owns the fans.
pub fn cooling_for_temperature(temperature_c: u8, config: &SystemConfig) -> Option<bool> {
    if temperature_c <= config.temp_normal_threshold_c {
        Some(false)
    } else if temperature_c < config.temp_critical_threshold_c {
        Some(true)
    } else {
        None
    }
}

/// Purity or gas inside its marginal band (both bounds exclusive).
pub fn air_is_marginal(snap: &SensorSnapshot, config: &SystemConfig) -> bool {
    let within = |v: u8, (lo, hi): (u8, u8)| v > lo && v < hi;
    within(snap.air_purity_percent, config.marginal_purity_band)
        || within(snap.gas_percent, config.marginal_gas_band)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clean(temperature_c: u8, light_percent: u8) -> SensorSnapshot {
        SensorSnapshot {
            temperature_c,
            light_percent,
            gas_percent: 0,
            air_purity_percent: 100,
        }
    }

    fn auto() -> ModeSnapshot {
        ModeSnapshot::default()
    }

    fn run(snap: SensorSnapshot, modes: ModeSnapshot) -> ActuatorCommands {
        arbitrate(&snap, modes, &SystemConfig::default())
    }

    #[test]
    fn outdoor_light_threshold_is_strict() {
        assert_eq!(run(clean(20, 49), auto()).get(Actuator::OutdoorLight), Some(true));
        assert_eq!(run(clean(20, 50), auto()).get(Actuator::OutdoorLight), Some(false));
        assert_eq!(run(clean(20, 51), auto()).get(Actuator::OutdoorLight), Some(false));
    }

    #[test]
    fn outdoor_manual_ignores_darkness() {
        let modes = ModeSnapshot {
            outdoor: LightMode::Manual { on: false },
            ..auto()
        };
        assert_eq!(run(clean(20, 0), modes).get(Actuator::OutdoorLight), Some(false));
    }

    #[test]
    fn outdoor_manual_on_in_daylight() {
        let modes = ModeSnapshot {
            outdoor: LightMode::Manual { on: true },
            ..auto()
        };
        assert_eq!(run(clean(20, 100), modes).get(Actuator::OutdoorLight), Some(true));
    }

    #[test]
    fn occupied_house_powers_main_and_indoor_light() {
        let cmds = run(clean(20, 80), auto());
        assert_eq!(cmds.get(Actuator::MainPower), Some(true));
        assert_eq!(cmds.get(Actuator::IndoorLight), Some(true));
    }

    #[test]
    fn indoor_manual_cuts_main_power() {
        for on in [true, false] {
            let modes = ModeSnapshot {
                indoor: LightMode::Manual { on },
                ..auto()
            };
            let cmds = run(clean(20, 80), modes);
            assert_eq!(cmds.get(Actuator::MainPower), Some(false));
            assert_eq!(cmds.get(Actuator::IndoorLight), Some(on));
        }
    }

    #[test]
    fn cooling_follows_temperature_bands() {
        let cfg = SystemConfig::default();
        assert_eq!(cooling_for_temperature(25, &cfg), Some(false));
        assert_eq!(cooling_for_temperature(26, &cfg), Some(true));
        assert_eq!(cooling_for_temperature(49, &cfg), Some(true));
        assert_eq!(cooling_for_temperature(50, &cfg), None);
    }

    #[test]
    fn critical_temperature_leaves_fans_alone() {
        let cmds = run(clean(50, 80), auto());
        assert_eq!(cmds.get(Actuator::IndoorFan), None);
        assert_eq!(cmds.get(Actuator::ExhaustFan), None);
    }

    #[test]
    fn marginal_air_overrides_cool_temperature() {
        let snap = SensorSnapshot {
            temperature_c: 20,
            light_percent: 80,
            gas_percent: 30,
            air_purity_percent: 70,
        };
        let cmds = run(snap, auto());
        assert_eq!(cmds.get(Actuator::IndoorFan), Some(true));
        assert_eq!(cmds.get(Actuator::ExhaustFan), Some(true));
    }

    #[test]
    fn marginal_bands_are_exclusive() {
        let cfg = SystemConfig::default();
        let with = |gas: u8, purity: u8| SensorSnapshot {
            temperature_c: 20,
            light_percent: 80,
            gas_percent: gas,
            air_purity_percent: purity,
        };
        assert!(!air_is_marginal(&with(0, 100), &cfg));
        assert!(!air_is_marginal(&with(25, 75), &cfg));
        assert!(air_is_marginal(&with(10, 90), &cfg));
        assert!(air_is_marginal(&with(26, 74), &cfg));
        assert!(!air_is_marginal(&with(50, 50), &cfg));
    }

    #[test]
    fn never_touches_safety_outputs() {
        let cmds = run(clean(45, 10), auto());
        for a in [Actuator::GasValve, Actuator::Buzzer, Actuator::WaterPump] {
            assert_eq!(cmds.get(a), None);
        }
    }
}
