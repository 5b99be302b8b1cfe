//! Eco Home firmware entry point
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  HardwareAdapter        LogDisplay        LogEventSink         │
//! │  (Sensor+Actuator)      (StatusDisplay)   (EventSink)          │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │            ControlService (pure logic)                 │    │
//! │  │  Safety · FSM · Mode arbitration                       │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! │                               ▲                                │
//! │                          SharedState                           │
//! │                  ▲                          ▲                  │
//! │          clock tick timer           UART receive task          │
//! │                                     (CommandChannel)           │
//! └────────────────────────────────────────────────────────────────┘
//! ```
//!
//! On the host the same wiring runs as a simulation: a thread ticks the
//! clock, stdin stands in for the serial link, and an optional JSON file
//! given as the first argument overrides the configuration.
#![deny(unused_must_use)]

use anyhow::Result;
use embedded_hal::delay::DelayNs;
use log::info;

use ecohome::adapters::hardware::HardwareAdapter;
use ecohome::adapters::log_display::LogDisplay;
use ecohome::adapters::log_sink::LogEventSink;
use ecohome::app::service::ControlService;
use ecohome::config::SystemConfig;
use ecohome::drivers::{delay, hw_init, hw_timer, outputs::GpioOutputs, uart_rx};
use ecohome::sensors::SensorHub;
use ecohome::shared::SharedState;

// ── Main ──────────────────────────────────────────────────────

#[cfg(target_os = "espidf")]
fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;
    banner();

    // ── 2. Configuration (compiled-in defaults) ───────────────
    let config = SystemConfig::load(None)?;

    // ── 3. Peripherals ────────────────────────────────────────
    hw_init::init_peripherals()?;
    let peripherals = esp_idf_hal::peripherals::Peripherals::take()?;

    // ── 4. Shared context, service, tick and receive sources ──
    let shared = boot(&config);
    let mut hw = HardwareAdapter::new(SensorHub::on_board(), GpioOutputs::new());
    let mut sink = LogEventSink::new();
    let mut service = ControlService::new(config.clone());
    service.start(shared, &mut hw, &mut sink);

    hw_timer::start_clock(shared, config.tick_interval_us)?;
    uart_rx::start_receiver(
        shared,
        peripherals.uart1,
        peripherals.pins.gpio17,
        peripherals.pins.gpio18,
    )?;

    // ── 5. Control loop ───────────────────────────────────────
    run(shared, service, hw, sink, config.cycle_interval_ms)
}

#[cfg(not(target_os = "espidf"))]
fn main() -> Result<()> {
    use anyhow::Context;
    use ecohome::sensors::{ldr, lm35, mq5};

    // ── 1. Logger ─────────────────────────────────────────────
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    banner();

    // ── 2. Configuration (defaults or JSON override) ──────────
    let path = std::env::args().nth(1);
    let json = match &path {
        Some(path) => Some(
            std::fs::read_to_string(path).with_context(|| format!("reading config {path}"))?,
        ),
        None => None,
    };
    let config = SystemConfig::load(json.as_deref())?;
    if let Some(path) = path {
        info!("Config loaded from {path}");
    }

    // ── 3. Simulated peripherals: a mild, occupied afternoon ──
    hw_init::init_peripherals()?;
    lm35::sim_set_temperature_c(24);
    ldr::sim_set_light_percent(60);
    mq5::sim_set_gas_percent(5);

    // ── 4. Shared context, service, tick and receive sources ──
    let shared = boot(&config);
    let mut hw = HardwareAdapter::new(SensorHub::on_board(), GpioOutputs::new());
    let mut sink = LogEventSink::new();
    let mut service = ControlService::new(config.clone());
    service.start(shared, &mut hw, &mut sink);

    hw_timer::start_clock(shared, config.tick_interval_us)?;
    uart_rx::start_receiver(shared)?;
    info!("Type a-h to send operator commands, anything else resets both modes");

    // ── 5. Control loop ───────────────────────────────────────
    run(shared, service, hw, sink, config.cycle_interval_ms)
}

// ── Helpers ───────────────────────────────────────────────────

fn banner() {
    info!("╔══════════════════════════════════════╗");
    info!("║  Eco Home v{}                     ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");
}

/// Build the shared context.  It lives for the rest of the process.
fn boot(config: &SystemConfig) -> &'static SharedState {
    let shared: &'static SharedState = Box::leak(Box::new(SharedState::new(config)));
    info!("Clock seeded at {}", shared.clock().now());
    shared
}

fn run(
    shared: &'static SharedState,
    mut service: ControlService,
    mut hw: HardwareAdapter,
    mut sink: LogEventSink,
    cycle_interval_ms: u32,
) -> ! {
    let mut display = LogDisplay::new();
    let mut pacing = delay::loop_delay();
    info!("System ready. Entering control loop ({cycle_interval_ms} ms).");

    loop {
        service.cycle(shared, &mut hw, &mut display, &mut sink);
        pacing.delay_ms(cycle_interval_ms);
    }
}
