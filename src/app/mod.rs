//! Application core: pure domain logic, zero I/O.
//!
//! This module contains the business rules for the Eco Home controller:
//! command decoding and handling, and the control-loop orchestration.
//! All interaction with hardware happens through **port traits** defined
//! in [`ports`], keeping this layer fully testable without real peripherals.

pub mod channel;
pub mod commands;
pub mod events;
pub mod ports;
pub mod service;
