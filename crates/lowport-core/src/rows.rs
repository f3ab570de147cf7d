//! Row projections shared by the console report and the CSV export.

use lowport_api::{Device, PortStatus};

use crate::error::CoreError;
use crate::usage::{DisplayUsage, NOT_AVAILABLE, ThresholdUsage};

/// Column headings, in order, for both the report table and the CSV file.
pub const COLUMNS: [&str; 7] = [
    "Network ID",
    "Switch Name",
    "Port ID",
    "Status",
    "Total Usage (KB)",
    "Sent (KB)",
    "Received (KB)",
];

/// Link status the report highlights as healthy.
pub const CONNECTED: &str = "Connected";

fn or_na(value: Option<&str>) -> String {
    value.unwrap_or(NOT_AVAILABLE).to_owned()
}

/// Title line for one switch's table.
pub fn switch_title(switch: &Device) -> String {
    format!(
        "Switch: {} (Serial: {})",
        switch.name.as_deref().unwrap_or(NOT_AVAILABLE),
        switch.serial
    )
}

// ── Report ───────────────────────────────────────────────────────────

/// One port line in the console report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRow {
    pub network_id: String,
    pub switch_name: String,
    pub port_id: String,
    pub status: String,
    pub usage: DisplayUsage,
}

impl ReportRow {
    pub fn new(switch: &Device, port: &PortStatus) -> Self {
        Self {
            network_id: or_na(switch.network_id.as_deref()),
            switch_name: or_na(switch.name.as_deref()),
            port_id: or_na(port.port_id.as_deref()),
            status: or_na(port.status.as_deref()),
            usage: DisplayUsage::from_usage(port.usage()),
        }
    }

    /// Whether the link status should be shown as connected.
    pub fn is_connected(&self) -> bool {
        self.status == CONNECTED
    }
}

/// Report rows for every port of one switch, in API order.
pub fn report_rows(switch: &Device, ports: &[PortStatus]) -> Vec<ReportRow> {
    ports.iter().map(|p| ReportRow::new(switch, p)).collect()
}

// ── Export ───────────────────────────────────────────────────────────

/// One CSV record for a low-usage port.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportRow {
    pub network_id: String,
    pub switch_name: String,
    pub port_id: String,
    pub status: String,
    pub total: String,
    pub sent: String,
    pub recv: String,
}

impl ExportRow {
    /// Fields in [`COLUMNS`] order.
    pub fn record(&self) -> [&str; 7] {
        [
            self.network_id.as_str(),
            self.switch_name.as_str(),
            self.port_id.as_str(),
            self.status.as_str(),
            self.total.as_str(),
            self.sent.as_str(),
            self.recv.as_str(),
        ]
    }
}

/// Rows for the ports of one switch whose total usage is strictly below
/// `threshold_kb`.
///
/// Ports without a total count as `0` and are always included when the
/// threshold is positive. A non-numeric total aborts with
/// [`CoreError::NonNumericUsage`].
pub fn low_usage_rows(
    switch: &Device,
    ports: &[PortStatus],
    threshold_kb: i64,
) -> Result<Vec<ExportRow>, CoreError> {
    let mut rows = Vec::new();
    for port in ports {
        let usage = ThresholdUsage::from_port(port);
        let below = usage
            .is_below(threshold_kb)
            .ok_or_else(|| CoreError::NonNumericUsage {
                serial: switch.serial.clone(),
                port_id: or_na(port.port_id.as_deref()),
                value: usage.total_display(),
            })?;
        if !below {
            continue;
        }

        rows.push(ExportRow {
            network_id: or_na(switch.network_id.as_deref()),
            switch_name: or_na(switch.name.as_deref()),
            port_id: or_na(port.port_id.as_deref()),
            status: or_na(port.status.as_deref()),
            total: usage.total_display(),
            sent: usage.sent,
            recv: usage.recv,
        });
    }
    Ok(rows)
}
