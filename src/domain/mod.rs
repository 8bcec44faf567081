//! Storage-agnostic report types and logic.

pub mod progress;
pub mod trade;

pub use progress::{compute_progress, ProgressRow, ReportFilter};
pub use trade::{Timestamp, TradeRecord, TradeState};
