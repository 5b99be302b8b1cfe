//! Concrete state handler functions and table builder.
//!
//! ```text
//!            ┌──[fire verdict]──▶ FIRE     (terminal)
//!  NORMAL ───┤
//!            └──[gas verdict]───▶ GAS LEAK (terminal)
//! ```
//!
//! `Normal` runs the regular arbitration every cycle and escalates
//! afterwards, so one cycle may actuate normally and then override the
//! outputs with the safety response.  The terminal states re-assert
//! their response every cycle for the rest of the run.

use super::context::FsmContext;
use super::{EmergencyState, StateDescriptor};
use crate::control::arbiter;
use crate::safety::EmergencyKind;
use log::{error, info};

// ═══════════════════════════════════════════════════════════════════════════
//  Table builder
// ═══════════════════════════════════════════════════════════════════════════

/// Build the static state table.  Called once at startup.
pub fn build_state_table() -> [StateDescriptor; EmergencyState::COUNT] {
    [
        // Index 0: Normal
        StateDescriptor {
            id: EmergencyState::Normal,
            name: "Normal",
            on_enter: None,
            on_exit: Some(normal_exit),
            on_update: normal_update,
        },
        // Index 1: Fire
        StateDescriptor {
            id: EmergencyState::Fire,
            name: "Fire",
            on_enter: Some(fire_enter),
            on_exit: None,
            on_update: fire_update,
        },
        // Index 2: GasLeak
        StateDescriptor {
            id: EmergencyState::GasLeak,
            name: "GasLeak",
            on_enter: Some(gas_leak_enter),
            on_exit: None,
            on_update: gas_leak_update,
        },
    ]
}

// ═══════════════════════════════════════════════════════════════════════════
//  NORMAL state
// ═══════════════════════════════════════════════════════════════════════════

fn normal_update(ctx: &mut FsmContext) -> Option<EmergencyState> {
    let regular = arbiter::arbitrate(&ctx.sensors, ctx.modes, &ctx.config);
    for (actuator, on) in regular.iter() {
        ctx.commands.set(actuator, on);
    }

    ctx.emergency.map(EmergencyKind::state)
}

fn normal_exit(ctx: &mut FsmContext) {
    info!(
        "NORMAL: leaving after {} cycles (t={} °C, gas={} %)",
        ctx.ticks_in_state, ctx.sensors.temperature_c, ctx.sensors.gas_percent
    );
}

// ═══════════════════════════════════════════════════════════════════════════
//  FIRE state (terminal)
// ═══════════════════════════════════════════════════════════════════════════

fn fire_enter(ctx: &mut FsmContext) {
    ctx.commands.apply(EmergencyKind::Fire.response());
    error!("FIRE: power cut, valve closed, sprinkler and siren on; restart required");
}

fn fire_update(ctx: &mut FsmContext) -> Option<EmergencyState> {
    ctx.commands.apply(EmergencyKind::Fire.response());
    None
}

// ═══════════════════════════════════════════════════════════════════════════
//  GAS LEAK state (terminal)
// ═══════════════════════════════════════════════════════════════════════════

fn gas_leak_enter(ctx: &mut FsmContext) {
    ctx.commands.apply(EmergencyKind::GasLeak.response());
    error!("GAS LEAK: power cut, valve closed, fans and siren on; restart required");
}

fn gas_leak_update(ctx: &mut FsmContext) -> Option<EmergencyState> {
    ctx.commands.apply(EmergencyKind::GasLeak.response());
    None
}
