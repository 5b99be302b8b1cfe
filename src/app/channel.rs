//! Operator command handler.
//!
//! Invoked once per received byte from the serial receive path, which may
//! interleave with the control loop at any point.  It only touches
//! [`SharedState`] atomics and the actuator port, so it never waits on
//! the sensor bus or the display.
//!
//! ```text
//!  UART byte ──▶ Command::decode ──▶ mode flags / latches  (SharedState)
//!                                 └─▶ immediate output     (ActuatorPort)
//! ```
//!
//! Once an emergency is active the handler keeps recording modes and
//! latches but stops driving the lights and fans, so a stray byte cannot
//! undo the safety response between two control cycles.

use log::{debug, error, warn};

use crate::shared::{LightMode, SharedState};

use super::commands::Command;
use super::ports::{Actuator, ActuatorPort};

/// Receive-side command handler bound to the shared context.
pub struct CommandChannel<'a, A> {
    shared: &'a SharedState,
    outputs: A,
}

impl<'a, A: ActuatorPort> CommandChannel<'a, A> {
    pub fn new(shared: &'a SharedState, outputs: A) -> Self {
        Self { shared, outputs }
    }

    /// Handle one received byte.  Returns the decoded command.
    pub fn on_byte(&mut self, byte: u8) -> Command {
        self.shared.record_command(byte);
        let cmd = Command::decode(byte);
        debug!("RX {byte:#04x} -> {cmd:?}");
        self.handle(cmd);
        cmd
    }

    pub fn handle(&mut self, cmd: Command) {
        let gated = self.shared.emergency_active();

        match cmd {
            Command::OutdoorLight(on) => {
                self.shared.set_outdoor_mode(LightMode::Manual { on });
                self.drive_unless(gated, cmd, |hw| hw.drive(Actuator::OutdoorLight, on));
            }
            Command::IndoorLight(on) => {
                self.shared.set_indoor_mode(LightMode::Manual { on });
                self.drive_unless(gated, cmd, |hw| hw.drive(Actuator::IndoorLight, on));
            }
            Command::Cooling(on) => {
                self.drive_unless(gated, cmd, |hw| hw.set_cooling(on));
            }
            Command::Fire => {
                self.shared.declare_fire();
                self.apply_response(crate::safety::FIRE_RESPONSE);
                error!("RX: fire declared by operator");
            }
            Command::Gas => {
                self.shared.declare_gas();
                self.apply_response(crate::safety::GAS_LEAK_RESPONSE);
                error!("RX: gas leak declared by operator");
            }
            Command::Reset => {
                self.shared.set_outdoor_mode(LightMode::Automatic);
                self.shared.set_indoor_mode(LightMode::Automatic);
            }
        }
    }

    pub fn outputs(&self) -> &A {
        &self.outputs
    }

    fn drive_unless(&mut self, gated: bool, cmd: Command, write: impl FnOnce(&mut A)) {
        if gated {
            warn!("RX: {cmd:?} not applied, emergency active");
        } else {
            write(&mut self.outputs);
        }
    }

    fn apply_response(&mut self, response: &[(Actuator, bool)]) {
        for &(actuator, on) in response {
            self.outputs.drive(actuator, on);
        }
    }
}
