//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the logger (ESP-IDF console on the board, `env_logger` on the host).

use log::{error, info};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;
use crate::shared::LightMode;

/// Adapter that logs every [`AppEvent`] to the serial console.
#[derive(Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

fn mode_label(mode: LightMode) -> &'static str {
    match mode {
        LightMode::Automatic => "auto",
        LightMode::Manual { on: true } => "manual-on",
        LightMode::Manual { on: false } => "manual-off",
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Status(s) => {
                info!(
                    "STATUS | cycle={} state={:?} | T={}\u{00b0}C light={}% gas={}% purity={}% | \
                     outdoor={} indoor={} | latches fire={} gas={}",
                    s.cycle,
                    s.state,
                    s.sensors.temperature_c,
                    s.sensors.light_percent,
                    s.sensors.gas_percent,
                    s.sensors.air_purity_percent,
                    mode_label(s.modes.outdoor),
                    mode_label(s.modes.indoor),
                    s.latches.fire,
                    s.latches.gas,
                );
            }
            AppEvent::EmergencyDeclared { kind, trigger } => {
                error!("EMERGENCY | {kind} | trigger={trigger}");
            }
            AppEvent::Started(state) => {
                info!("START | initial_state={state:?}");
            }
        }
    }
}
