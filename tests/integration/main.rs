//! Integration test driver for `tests/integration/` submodule.
//!
//! Each `mod` below maps to a file that exercises a specific subsystem
//! against mock adapters.  All tests run on the host (x86_64) with no
//! real hardware required.

mod command_channel_tests;
mod control_loop_tests;
mod mock_hw;

use ecohome::app::service::ControlService;
use ecohome::config::SystemConfig;
use ecohome::shared::SharedState;
use mock_hw::{LogSink, MockDisplay, MockHouse};

/// Everything one control loop needs, started and ready to cycle.
pub struct Rig {
    pub shared: SharedState,
    pub service: ControlService,
    pub house: MockHouse,
    pub display: MockDisplay,
    pub sink: LogSink,
}

impl Rig {
    pub fn new() -> Self {
        Self::with_config(SystemConfig::default())
    }

    pub fn with_config(config: SystemConfig) -> Self {
        let shared = SharedState::new(&config);
        let mut service = ControlService::new(config);
        let mut house = MockHouse::new();
        let display = MockDisplay::default();
        let mut sink = LogSink::default();
        service.start(&shared, &mut house, &mut sink);
        Self {
            shared,
            service,
            house,
            display,
            sink,
        }
    }

    pub fn cycle(&mut self) -> ecohome::fsm::EmergencyState {
        self.service
            .cycle(&self.shared, &mut self.house, &mut self.display, &mut self.sink)
    }

    pub fn cycles(&mut self, n: usize) {
        for _ in 0..n {
            self.cycle();
        }
    }
}
