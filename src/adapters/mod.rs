//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter        | Implements         | Connects to              |
//! |----------------|--------------------|--------------------------|
//! | `hardware`     | SensorPort         | ESP32 ADC1 (oneshot)     |
//! |                | ActuatorPort       | ESP32 GPIO outputs       |
//! | `log_display`  | StatusDisplay      | 16×2 panel rows, logged  |
//! | `log_sink`     | EventSink          | Serial log output        |

pub mod hardware;
pub mod log_display;
pub mod log_sink;
