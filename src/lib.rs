//! Eco Home controller firmware library.
//!
//! Exposes the pure-logic modules for integration testing and the host
//! simulation. All ESP-IDF-specific code is guarded by
//! `#[cfg(target_os = "espidf")]` within each module.

#![deny(unused_must_use)]

#[cfg(all(target_os = "espidf", not(feature = "espidf")))]
compile_error!("ESP-IDF targets need the `espidf` feature: build with `--features espidf`");

pub mod app;
pub mod clock;
pub mod config;
pub mod control;
pub mod error;
pub mod fsm;
pub mod pins;
pub mod safety;
pub mod shared;

// Hardware-facing modules carry host simulation stubs behind cfg gates.
pub mod adapters;
pub mod drivers;
pub mod sensors;
