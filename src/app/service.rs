//! Control service, the hexagonal core.
//!
//! [`ControlService`] owns the FSM, the safety supervisor and the
//! blackboard context.  All I/O flows through port traits injected at
//! call sites, making the entire loop testable with mock adapters.
//!
//! ```text
//!  SharedState ──▶ ┌────────────────────────┐ ──▶ EventSink
//!  SensorPort ───▶ │     ControlService     │ ──▶ StatusDisplay
//! ActuatorPort ◀── │  Safety · FSM · Rules  │
//!                  └────────────────────────┘
//! ```

use log::info;

use crate::config::SystemConfig;
use crate::fsm::context::FsmContext;
use crate::fsm::states::build_state_table;
use crate::fsm::{EmergencyState, Fsm};
use crate::safety::SafetySupervisor;
use crate::shared::SharedState;

use super::events::{AppEvent, StatusReport};
use super::ports::{Actuator, ActuatorPort, EventSink, SensorPort, StatusDisplay, StatusFrame};

// ───────────────────────────────────────────────────────────────
// ControlService
// ───────────────────────────────────────────────────────────────

/// The synchronous consumer loop body.
pub struct ControlService {
    fsm: Fsm,
    ctx: FsmContext,
    safety: SafetySupervisor,
    cycle_count: u64,
    status_interval: u64,
}

impl ControlService {
    /// Construct the service from configuration.
    ///
    /// Does **not** start the FSM; call [`start`](Self::start) next.
    pub fn new(config: SystemConfig) -> Self {
        let safety = SafetySupervisor::new(&config);
        let status_interval = u64::from(config.status_interval_cycles.max(1));
        let ctx = FsmContext::new(config);
        let fsm = Fsm::new(build_state_table(), EmergencyState::Normal);

        Self {
            fsm,
            ctx,
            safety,
            cycle_count: 0,
            status_interval,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Energise the house and start the FSM in `Normal`.
    pub fn start(
        &mut self,
        shared: &SharedState,
        hw: &mut impl ActuatorPort,
        sink: &mut impl EventSink,
    ) {
        hw.drive(Actuator::MainPower, true);
        self.fsm.start(&mut self.ctx);
        let state = self.fsm.current_state();
        shared.publish_state(state);
        sink.emit(&AppEvent::Started(state));
        info!("ControlService started in {state:?}");
    }

    // ── Per-cycle orchestration ───────────────────────────────

    /// Run one control cycle and return the resulting state.
    ///
    /// Normal: sensors → display → safety → FSM (rules, escalation) →
    /// actuators.  Terminal: FSM (re-assert) → actuators, nothing else.
    ///
    /// The `hw` parameter satisfies **both** [`SensorPort`] and
    /// [`ActuatorPort`], which avoids a double mutable borrow while
    /// keeping the port boundary explicit.
    pub fn cycle(
        &mut self,
        shared: &SharedState,
        hw: &mut (impl SensorPort + ActuatorPort),
        display: &mut impl StatusDisplay,
        sink: &mut impl EventSink,
    ) -> EmergencyState {
        self.cycle_count += 1;
        self.ctx.commands.clear();
        let prev = self.fsm.current_state();

        if prev.is_terminal() {
            self.fsm.tick(&mut self.ctx);
            self.apply_actuators(hw);
            self.maybe_report(sink);
            return prev;
        }

        // 1. Sample inputs
        let snapshot = hw.read_all();
        self.ctx.sensors = snapshot;
        self.ctx.modes = shared.modes();
        self.ctx.latches = shared.latches();

        display.show(&StatusFrame {
            clock: shared.clock().now(),
            sensors: snapshot,
        });

        // 2. Safety verdict, consumed by the Normal state after arbitration
        self.ctx.emergency = self.safety.evaluate(&snapshot, self.ctx.latches);

        // 3. FSM tick
        self.fsm.tick(&mut self.ctx);

        // 4. Actuators
        self.apply_actuators(hw);

        // 5. Publish escalation
        let state = self.fsm.current_state();
        if state != prev {
            shared.publish_state(state);
            if let Some((kind, trigger)) = self.safety.classify(&snapshot, self.ctx.latches) {
                sink.emit(&AppEvent::EmergencyDeclared { kind, trigger });
            }
        }

        self.maybe_report(sink);
        state
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn state(&self) -> EmergencyState {
        self.fsm.current_state()
    }

    /// Control cycles executed since startup.
    pub fn cycle_count(&self) -> u64 {
        self.cycle_count
    }

    pub fn config(&self) -> &SystemConfig {
        &self.ctx.config
    }

    pub fn build_status(&self) -> StatusReport {
        StatusReport {
            cycle: self.cycle_count,
            state: self.fsm.current_state(),
            sensors: self.ctx.sensors,
            modes: self.ctx.modes,
            latches: self.ctx.latches,
        }
    }

    // ── Internal ──────────────────────────────────────────────

    fn apply_actuators(&self, hw: &mut impl ActuatorPort) {
        for (actuator, on) in self.ctx.commands.iter() {
            hw.drive(actuator, on);
        }
    }

    fn maybe_report(&self, sink: &mut impl EventSink) {
        if self.cycle_count % self.status_interval == 0 {
            sink.emit(&AppEvent::Status(self.build_status()));
        }
    }
}
