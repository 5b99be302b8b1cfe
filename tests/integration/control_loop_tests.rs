//! End-to-end control loop: sensors → arbitration → escalation → pins.

use ecohome::app::events::AppEvent;
use ecohome::app::ports::Actuator;
use ecohome::clock::ClockState;
use ecohome::config::SystemConfig;
use ecohome::fsm::EmergencyState;
use ecohome::safety::{EmergencyKind, Trigger};

use crate::Rig;

const SAFETY_OUTPUTS: [Actuator; 4] = [
    Actuator::GasValve,
    Actuator::MainPower,
    Actuator::Buzzer,
    Actuator::OutdoorLight,
];

fn assert_gas_response(rig: &Rig) {
    assert_eq!(rig.house.level(Actuator::GasValve), Some(true), "valve closed");
    assert_eq!(rig.house.level(Actuator::MainPower), Some(false), "power cut");
    assert_eq!(rig.house.level(Actuator::Buzzer), Some(true), "siren");
    assert_eq!(rig.house.level(Actuator::OutdoorLight), Some(false));
    assert!(rig.house.is_on(Actuator::IndoorFan));
    assert!(rig.house.is_on(Actuator::ExhaustFan));
}

// ── Normal operation ──────────────────────────────────────────

#[test]
fn start_powers_the_house() {
    let rig = Rig::new();
    assert!(rig.house.is_on(Actuator::MainPower));
    assert_eq!(rig.sink.events, [AppEvent::Started(EmergencyState::Normal)]);
}

#[test]
fn outdoor_light_follows_darkness() {
    let mut rig = Rig::new();
    for (light, expected) in [(49, true), (51, false), (50, false), (0, true)] {
        rig.house.sensors.light_percent = light;
        rig.cycle();
        assert_eq!(rig.house.level(Actuator::OutdoorLight), Some(expected), "light {light}");
    }
}

#[test]
fn cooling_follows_temperature() {
    let mut rig = Rig::new();
    rig.house.sensors.temperature_c = 25;
    rig.cycle();
    assert_eq!(rig.house.level(Actuator::IndoorFan), Some(false));
    assert_eq!(rig.house.level(Actuator::ExhaustFan), Some(false));

    rig.house.sensors.temperature_c = 26;
    rig.cycle();
    assert!(rig.house.is_on(Actuator::IndoorFan));
    assert!(rig.house.is_on(Actuator::ExhaustFan));
    assert_eq!(rig.service.state(), EmergencyState::Normal);
}

#[test]
fn marginal_air_forces_cooling_in_cool_room() {
    let mut rig = Rig::new();
    rig.house.sensors.temperature_c = 18;
    rig.house.set_gas(30);
    rig.cycle();
    assert!(rig.house.is_on(Actuator::IndoorFan));
    assert_eq!(rig.service.state(), EmergencyState::Normal);
}

#[test]
fn display_receives_clock_and_snapshot_each_normal_cycle() {
    let mut rig = Rig::new();
    rig.cycles(3);
    assert_eq!(rig.display.frames.len(), 3);
    let frame = rig.display.frames[2];
    assert_eq!(frame.sensors, rig.house.sensors);
    assert_eq!(frame.clock, ClockState::default());
}

#[test]
fn display_shows_ticked_clock() {
    let mut rig = Rig::new();
    let tps = rig.shared.clock().ticks_per_second();
    for _ in 0..u32::from(tps) * 75 {
        rig.shared.clock().tick();
    }
    rig.cycle();
    let clock = rig.display.frames[0].clock;
    assert_eq!((clock.hours, clock.minutes, clock.seconds), (9, 46, 15));
}

#[test]
fn status_reports_follow_configured_interval() {
    let config = SystemConfig {
        status_interval_cycles: 4,
        ..SystemConfig::default()
    };
    let mut rig = Rig::with_config(config);
    rig.cycles(8);
    let reports: Vec<_> = rig
        .sink
        .events
        .iter()
        .filter_map(|e| match e {
            AppEvent::Status(s) => Some(s.cycle),
            _ => None,
        })
        .collect();
    assert_eq!(reports, [4, 8]);
}

// ── Escalation ────────────────────────────────────────────────

#[test]
fn critical_temperature_escalates_to_fire() {
    let mut rig = Rig::new();
    rig.house.sensors.temperature_c = 50;
    assert_eq!(rig.cycle(), EmergencyState::Fire);
    assert_gas_response(&rig);
    assert!(rig.house.is_on(Actuator::WaterPump));
    assert_eq!(rig.shared.emergency_state(), EmergencyState::Fire);
    assert!(rig.sink.events.contains(&AppEvent::EmergencyDeclared {
        kind: EmergencyKind::Fire,
        trigger: Trigger::Temperature(50),
    }));
}

#[test]
fn gas_above_threshold_escalates_to_gas_leak() {
    let mut rig = Rig::new();
    rig.house.set_gas(50);
    assert_eq!(rig.cycle(), EmergencyState::Normal);
    rig.house.set_gas(51);
    assert_eq!(rig.cycle(), EmergencyState::GasLeak);
    assert_gas_response(&rig);
    assert_eq!(rig.house.level(Actuator::WaterPump), None);
}

#[test]
fn fire_wins_when_both_conditions_hold() {
    let mut rig = Rig::new();
    rig.house.sensors.temperature_c = 70;
    rig.house.set_gas(90);
    assert_eq!(rig.cycle(), EmergencyState::Fire);
}

#[test]
fn emergency_is_terminal_and_reasserted() {
    let mut rig = Rig::new();
    rig.house.set_gas(80);
    rig.cycle();

    // Everything returns to calm and the operator tries to undo it.
    rig.house.set_gas(0);
    rig.house.sensors.temperature_c = 20;
    rig.shared.set_indoor_mode(ecohome::shared::LightMode::Automatic);

    for _ in 0..20 {
        // Something outside the loop flips the pins back between cycles.
        let mut pins = rig.house.outputs();
        for a in SAFETY_OUTPUTS {
            ecohome::app::ports::ActuatorPort::drive(&mut pins, a, a == Actuator::MainPower);
        }
        assert_eq!(rig.cycle(), EmergencyState::GasLeak);
        assert_gas_response(&rig);
    }
}

#[test]
fn terminal_cycles_do_not_poll_sensors_or_display() {
    let mut rig = Rig::new();
    rig.shared.declare_gas();
    rig.cycle();
    let reads = rig.house.reads;
    let frames = rig.display.frames.len();
    rig.cycles(5);
    assert_eq!(rig.house.reads, reads);
    assert_eq!(rig.display.frames.len(), frames);
}

#[test]
fn escalation_cycle_still_arbitrates_first() {
    let mut rig = Rig::new();
    rig.house.sensors.light_percent = 70;
    rig.house.set_gas(60);
    rig.cycle();
    // Indoor light is not part of the response; it keeps the regular write.
    assert!(rig.house.is_on(Actuator::IndoorLight));
    assert_eq!(rig.house.level(Actuator::OutdoorLight), Some(false));
}
