//! Status display rendered to the log.
//!
//! Mirrors the 16×2 character panel layout:
//!
//! ```text
//!  ┌────────────────┐
//!  │09:45:00   07/05│
//!  │T24 L61 P100    │
//!  └────────────────┘
//! ```
//!
//! Rows are built in fixed-capacity `heapless` strings, so rendering
//! never allocates.  A row that would overflow is truncated.

use core::fmt::Write;

use heapless::String;
use log::debug;

use crate::app::ports::{StatusDisplay, StatusFrame};

pub const COLUMNS: usize = 16;

pub type Row = String<COLUMNS>;

/// Render both rows for `frame`.
pub fn render(frame: &StatusFrame) -> (Row, Row) {
    let c = &frame.clock;
    let s = &frame.sensors;

    let mut top = Row::new();
    let _ = write!(
        top,
        "{:02}:{:02}:{:02}   {:02}/{:02}",
        c.hours, c.minutes, c.seconds, c.day, c.month
    );

    let mut bottom = Row::new();
    let _ = write!(
        bottom,
        "T{:02} L{:02} P{:02}",
        s.temperature_c, s.light_percent, s.air_purity_percent
    );

    (top, bottom)
}

/// [`StatusDisplay`] that writes only when the content changes.
#[derive(Default)]
pub struct LogDisplay {
    last: Option<(Row, Row)>,
}

impl LogDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rows(&self) -> Option<&(Row, Row)> {
        self.last.as_ref()
    }
}

impl StatusDisplay for LogDisplay {
    fn show(&mut self, frame: &StatusFrame) {
        let rows = render(frame);
        if self.last.as_ref() != Some(&rows) {
            debug!("LCD | {} | {}", rows.0, rows.1);
            self.last = Some(rows);
        }
    }
}
