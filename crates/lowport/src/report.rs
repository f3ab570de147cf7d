//! Console report: one table per switch with link status and 30-day usage.

use tabled::Tabled;
use tracing::debug;

use lowport_core::{DashboardClient, Device, PortStatus, ReportRow, report_rows, switch_title};

use crate::error::CliError;
use crate::output;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct PortRow {
    #[tabled(rename = "Network ID")]
    network_id: String,
    #[tabled(rename = "Switch Name")]
    switch_name: String,
    #[tabled(rename = "Port ID")]
    port_id: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Total Usage (KB)")]
    total: String,
    #[tabled(rename = "Sent (KB)")]
    sent: String,
    #[tabled(rename = "Received (KB)")]
    recv: String,
}

/// Index of the first usage column; usage columns are right-aligned.
const FIRST_USAGE_COLUMN: usize = 4;

impl PortRow {
    fn new(row: ReportRow, color: bool) -> Self {
        let status = output::paint_status(&row.status, row.is_connected(), color);
        Self {
            network_id: row.network_id,
            switch_name: row.switch_name,
            port_id: row.port_id,
            status,
            total: row.usage.total,
            sent: row.usage.sent,
            recv: row.usage.recv,
        }
    }
}

/// Render the table for one switch.
pub fn render_switch(switch: &Device, ports: &[PortStatus], color: bool) -> String {
    let rows: Vec<PortRow> = report_rows(switch, ports)
        .into_iter()
        .map(|r| PortRow::new(r, color))
        .collect();
    output::render_titled_table(&switch_title(switch), &rows, FIRST_USAGE_COLUMN)
}

// ── Handler ─────────────────────────────────────────────────────────

/// Fetch port statuses for each switch in order and print its table.
pub async fn print_report(
    client: &DashboardClient,
    switches: &[Device],
    org_id: &str,
    color: bool,
) -> Result<(), CliError> {
    for switch in switches {
        let ports = client
            .get_port_statuses(&switch.serial)
            .await
            .map_err(|e| CliError::api(e, client.base_url(), org_id))?;
        debug!(serial = %switch.serial, ports = ports.len(), "rendering switch");
        output::print_output(&render_switch(switch, &ports, color), false);
    }
    Ok(())
}
