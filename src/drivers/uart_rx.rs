//! Operator serial link (9600 8N1) receive task.
//!
//! A dedicated task blocks on the UART and hands every byte to a
//! [`CommandChannel`] bound to the shared context, so command handling
//! never waits for the control loop.  The host simulation reads stdin
//! instead and drops line terminators, which a terminal adds but the
//! command alphabet does not use.

use std::io::Read;

use log::{info, warn};

use crate::app::channel::CommandChannel;
use crate::app::ports::ActuatorPort;
use crate::drivers::outputs::GpioOutputs;
use crate::error::{HwInitError, Result};
use crate::shared::SharedState;

const RX_TASK_STACK: usize = 4096;

/// Feed every byte from `reader` into `channel` until EOF or error.
/// Returns the number of bytes delivered.
pub fn pump_bytes<A: ActuatorPort>(
    reader: impl Read,
    channel: &mut CommandChannel<'_, A>,
    skip_line_terminators: bool,
) -> usize {
    let mut delivered = 0;
    for byte in reader.bytes() {
        match byte {
            Ok(b'\r' | b'\n') if skip_line_terminators => {}
            Ok(b) => {
                channel.on_byte(b);
                delivered += 1;
            }
            Err(e) => {
                warn!("uart_rx: read failed: {e}");
                break;
            }
        }
    }
    delivered
}

#[cfg(target_os = "espidf")]
pub fn start_receiver(
    shared: &'static SharedState,
    uart: esp_idf_hal::uart::UART1,
    tx: esp_idf_hal::gpio::Gpio17,
    rx: esp_idf_hal::gpio::Gpio18,
) -> Result<()> {
    use esp_idf_hal::delay::BLOCK;
    use esp_idf_hal::gpio::AnyIOPin;
    use esp_idf_hal::uart::{UartDriver, config::Config};
    use esp_idf_hal::units::Hertz;

    let config = Config::new().baudrate(Hertz(crate::pins::UART_BAUD));
    let driver = UartDriver::new(
        uart,
        tx,
        rx,
        Option::<AnyIOPin>::None,
        Option::<AnyIOPin>::None,
        &config,
    )
    .map_err(|e| HwInitError::UartInitFailed(e.code()))?;

    std::thread::Builder::new()
        .name("uart_rx".into())
        .stack_size(RX_TASK_STACK)
        .spawn(move || {
            let mut channel = CommandChannel::new(shared, GpioOutputs::new());
            let mut buf = [0u8; 1];
            loop {
                match driver.read(&mut buf, BLOCK) {
                    Ok(1) => {
                        channel.on_byte(buf[0]);
                    }
                    Ok(_) => {}
                    Err(e) => warn!("uart_rx: read failed: {e}"),
                }
            }
        })
        .map_err(|_| HwInitError::UartInitFailed(-1))?;

    info!("uart_rx: listening at {} baud", crate::pins::UART_BAUD);
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn start_receiver(shared: &'static SharedState) -> Result<()> {
    std::thread::Builder::new()
        .name("uart_rx".into())
        .stack_size(RX_TASK_STACK)
        .spawn(move || {
            let mut channel = CommandChannel::new(shared, GpioOutputs::new());
            let n = pump_bytes(std::io::stdin().lock(), &mut channel, true);
            info!("uart_rx(sim): stdin closed after {n} bytes");
        })
        .map_err(|_| HwInitError::UartInitFailed(-1))?;

    info!("uart_rx(sim): reading commands from stdin");
    Ok(())
}
