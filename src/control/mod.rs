//! Control rules evaluated by the `Normal` state.

pub mod arbiter;
