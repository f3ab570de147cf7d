//! Domain layer between `lowport-api` and the CLI.
//!
//! Turns raw Dashboard responses into the rows the report and the export
//! print. The two consumers apply different defaults to missing usage
//! counters; see [`usage`] for the exact rules.

pub mod error;
pub mod rows;
pub mod usage;

pub use error::CoreError;
pub use rows::{COLUMNS, ExportRow, ReportRow, low_usage_rows, report_rows, switch_title};

// Re-export the API surface the CLI needs so it only depends on this crate.
pub use lowport_api::{DashboardClient, Device, Error as ApiError, PortStatus, TransportConfig};
