//! Control-loop pacing.
//!
//! The loop idles through `embedded_hal::delay::DelayNs`: FreeRTOS task
//! delay on the board, thread sleep on the host.

use embedded_hal::delay::DelayNs;

#[cfg(target_os = "espidf")]
pub type LoopDelay = esp_idf_hal::delay::FreeRtos;

#[cfg(not(target_os = "espidf"))]
pub type LoopDelay = StdDelay;

/// `DelayNs` on top of `std::thread::sleep`.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdDelay;

impl DelayNs for StdDelay {
    fn delay_ns(&mut self, ns: u32) {
        std::thread::sleep(std::time::Duration::from_nanos(u64::from(ns)));
    }
}

pub fn loop_delay() -> LoopDelay {
    #[cfg(target_os = "espidf")]
    {
        esp_idf_hal::delay::FreeRtos
    }
    #[cfg(not(target_os = "espidf"))]
    {
        StdDelay
    }
}
