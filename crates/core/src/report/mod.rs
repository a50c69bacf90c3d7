//! Report shaping: date windows, normalized rows, and the output sink.

mod sink;
mod types;
mod window;

pub use sink::{CsvReportSink, ReportSink, SinkError};
pub use types::*;
pub use window::{format_display, parse_event_date, ReportWindow, WindowError};
