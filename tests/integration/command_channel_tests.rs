//! Operator commands flowing through the shared context into the loop.

use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;

use ecohome::app::channel::CommandChannel;
use ecohome::app::ports::Actuator;
use ecohome::fsm::EmergencyState;
use ecohome::shared::LightMode;

use crate::Rig;

fn send(rig: &Rig, bytes: &[u8]) {
    let mut channel = CommandChannel::new(&rig.shared, rig.house.outputs());
    for &b in bytes {
        channel.on_byte(b);
    }
}

#[test]
fn outdoor_off_holds_through_darkness_until_reset() {
    let mut rig = Rig::new();
    rig.house.sensors.light_percent = 0;
    send(&rig, b"b");
    assert_eq!(rig.house.level(Actuator::OutdoorLight), Some(false));

    rig.cycles(5);
    assert_eq!(rig.house.level(Actuator::OutdoorLight), Some(false));

    send(&rig, b"x");
    rig.cycle();
    assert_eq!(rig.house.level(Actuator::OutdoorLight), Some(true));
}

#[test]
fn outdoor_on_holds_in_daylight() {
    let mut rig = Rig::new();
    rig.house.sensors.light_percent = 90;
    send(&rig, b"a");
    rig.cycles(3);
    assert!(rig.house.is_on(Actuator::OutdoorLight));
}

#[test]
fn indoor_manual_cuts_main_power_on_next_cycle() {
    let mut rig = Rig::new();
    send(&rig, b"c");
    assert!(rig.house.is_on(Actuator::IndoorLight));
    rig.cycle();
    assert_eq!(rig.house.level(Actuator::MainPower), Some(false));
    assert!(rig.house.is_on(Actuator::IndoorLight));

    send(&rig, b"?");
    rig.cycle();
    assert!(rig.house.is_on(Actuator::MainPower));
}

#[test]
fn unknown_byte_resets_both_manual_modes() {
    let rig = Rig::new();
    send(&rig, b"ad");
    assert_eq!(rig.shared.modes().outdoor, LightMode::Manual { on: true });
    assert_eq!(rig.shared.modes().indoor, LightMode::Manual { on: false });
    send(&rig, &[0x00]);
    assert!(rig.shared.modes().outdoor.is_automatic());
    assert!(rig.shared.modes().indoor.is_automatic());
}

#[test]
fn cooling_command_is_overridden_by_next_cycle() {
    let mut rig = Rig::new();
    rig.house.sensors.temperature_c = 20;
    send(&rig, b"g");
    assert!(rig.house.is_on(Actuator::IndoorFan));
    rig.cycle();
    assert_eq!(rig.house.level(Actuator::IndoorFan), Some(false));
}

#[test]
fn operator_fire_acts_before_the_loop_and_latches() {
    let mut rig = Rig::new();
    send(&rig, b"e");
    assert!(rig.house.is_on(Actuator::WaterPump));
    assert!(rig.house.is_on(Actuator::GasValve));
    assert_eq!(rig.service.state(), EmergencyState::Normal);

    assert_eq!(rig.cycle(), EmergencyState::Fire);
    assert_eq!(rig.shared.emergency_state(), EmergencyState::Fire);
}

#[test]
fn operator_gas_escalates_to_gas_leak() {
    let mut rig = Rig::new();
    send(&rig, b"f");
    assert_eq!(rig.cycle(), EmergencyState::GasLeak);
}

#[test]
fn no_command_restores_a_non_safety_state() {
    let mut rig = Rig::new();
    send(&rig, b"f");
    rig.cycle();

    for byte in 0..=u8::MAX {
        send(&rig, &[byte]);
        rig.cycle();
        assert_eq!(rig.service.state(), EmergencyState::GasLeak);
        assert_eq!(rig.house.level(Actuator::GasValve), Some(true));
        assert_eq!(rig.house.level(Actuator::MainPower), Some(false));
        assert_eq!(rig.house.level(Actuator::Buzzer), Some(true));
        assert_eq!(rig.house.level(Actuator::OutdoorLight), Some(false));
        assert!(rig.house.is_on(Actuator::ExhaustFan));
    }
}

#[test]
fn bytes_interleaved_with_cycles_from_another_thread() {
    let mut rig = Rig::new();
    rig.house.sensors.light_percent = 0;
    let done = AtomicBool::new(false);

    thread::scope(|s| {
        let shared = &rig.shared;
        let outputs = rig.house.outputs();
        let done = &done;
        s.spawn(move || {
            let mut channel = CommandChannel::new(shared, outputs);
            for _ in 0..500 {
                for &b in b"abcdghz" {
                    channel.on_byte(b);
                }
            }
            channel.on_byte(b'b');
            done.store(true, Ordering::Release);
        });

        while !done.load(Ordering::Acquire) {
            assert_eq!(
                rig.service
                    .cycle(&rig.shared, &mut rig.house, &mut rig.display, &mut rig.sink),
                EmergencyState::Normal
            );
        }
    });

    // Producer finished on outdoor-off: the loop must honour it.
    rig.cycle();
    assert_eq!(rig.shared.modes().outdoor, LightMode::Manual { on: false });
    assert_eq!(rig.house.level(Actuator::OutdoorLight), Some(false));
    assert_eq!(rig.shared.last_command(), Some(b'b'));
}
