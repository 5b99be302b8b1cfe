//! Peripheral drivers: one-shot init, outputs, tick and receive tasks.

pub mod delay;
pub mod hw_init;
pub mod hw_timer;
pub mod outputs;
pub mod uart_rx;
