//! CSV export of low-usage ports.

use std::fs::File;
use std::path::Path;

use tracing::{debug, info};

use lowport_core::{COLUMNS, DashboardClient, Device, PortStatus, low_usage_rows};

use crate::error::CliError;

/// CSV writer for the low-usage export.
///
/// Creating it truncates the target and writes the header row, so even an
/// export with no qualifying ports leaves a valid file behind. Records end
/// in CRLF.
pub struct LowUsageCsv {
    path: String,
    writer: csv::Writer<File>,
    rows: usize,
}

impl LowUsageCsv {
    pub fn create(path: &Path) -> Result<Self, CliError> {
        let display = path.display().to_string();
        let export_err = |source| CliError::Export {
            path: path.display().to_string(),
            source,
        };

        let mut writer = csv::WriterBuilder::new()
            .terminator(csv::Terminator::CRLF)
            .from_path(path)
            .map_err(export_err)?;
        writer.write_record(COLUMNS).map_err(export_err)?;
        Ok(Self {
            path: display,
            writer,
            rows: 0,
        })
    }

    /// Append the ports of `switch` whose total usage is below `threshold_kb`.
    pub fn write_switch(
        &mut self,
        switch: &Device,
        ports: &[PortStatus],
        threshold_kb: i64,
    ) -> Result<usize, CliError> {
        let rows = low_usage_rows(switch, ports, threshold_kb)?;
        for row in &rows {
            self.writer
                .write_record(row.record())
                .map_err(|source| CliError::Export {
                    path: self.path.clone(),
                    source,
                })?;
        }
        self.rows += rows.len();
        Ok(rows.len())
    }

    /// Flush and close the file, returning the number of data rows written.
    pub fn finish(mut self) -> Result<usize, CliError> {
        self.writer.flush().map_err(|e| CliError::Export {
            path: self.path.clone(),
            source: e.into(),
        })?;
        Ok(self.rows)
    }
}

// ── Handler ─────────────────────────────────────────────────────────

/// Fetch port statuses for each switch again and write the low-usage ports.
pub async fn export_low_usage(
    client: &DashboardClient,
    switches: &[Device],
    org_id: &str,
    threshold_kb: i64,
    path: &Path,
) -> Result<usize, CliError> {
    let mut csv = LowUsageCsv::create(path)?;
    for switch in switches {
        let ports = client
            .get_port_statuses(&switch.serial)
            .await
            .map_err(|e| CliError::api(e, client.base_url(), org_id))?;
        let written = csv.write_switch(switch, &ports, threshold_kb)?;
        debug!(serial = %switch.serial, written, "exported low-usage ports");
    }
    let total = csv.finish()?;
    info!(rows = total, path = %path.display(), threshold_kb, "export complete");
    Ok(total)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    const HEADER: &str =
        "Network ID,Switch Name,Port ID,Status,Total Usage (KB),Sent (KB),Received (KB)\r\n";

    fn sw1() -> Device {
        serde_json::from_value(json!({
            "serial": "Q2SW-0000-0001",
            "name": "SW1",
            "model": "MS225-24",
            "networkId": "N_100"
        }))
        .unwrap()
    }

    fn ports() -> Vec<PortStatus> {
        serde_json::from_value(json!([
            {
                "portId": "1",
                "status": "Connected",
                "usageInKb": { "total": 100, "sent": 60, "recv": 40 }
            },
            { "portId": "2", "status": "Disconnected", "usageInKb": null },
            {
                "portId": "3",
                "status": "Connected",
                "usageInKb": { "total": 900_000, "sent": 450_000, "recv": 450_000 }
            }
        ]))
        .unwrap()
    }

    #[test]
    fn writes_header_and_low_usage_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("low_usage_ports.csv");

        let mut csv = LowUsageCsv::create(&path).unwrap();
        assert_eq!(csv.write_switch(&sw1(), &ports(), 300_000).unwrap(), 2);
        assert_eq!(csv.finish().unwrap(), 2);

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(
            contents,
            format!(
                "{HEADER}N_100,SW1,1,Connected,100,60,40\r\nN_100,SW1,2,Disconnected,0,N/A,N/A\r\n"
            )
        );
    }

    #[test]
    fn header_only_when_nothing_qualifies() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");

        let mut csv = LowUsageCsv::create(&path).unwrap();
        csv.write_switch(&sw1(), &[], 300_000).unwrap();
        assert_eq!(csv.finish().unwrap(), 0);

        assert_eq!(std::fs::read_to_string(&path).unwrap(), HEADER);
    }

    #[test]
    fn existing_file_is_overwritten() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        std::fs::write(&path, "stale\ncontent\nfrom\nlast\nrun\n").unwrap();

        LowUsageCsv::create(&path).unwrap().finish().unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), HEADER);
    }

    #[test]
    fn fields_with_commas_are_quoted() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        let switch: Device = serde_json::from_value(json!({
            "serial": "Q2SW-0000-0002",
            "name": "Closet 2, rack B",
            "model": "MS120-8",
            "networkId": "N_200"
        }))
        .unwrap();
        let ports: Vec<PortStatus> =
            serde_json::from_value(json!([{ "portId": "8", "status": "Disabled" }])).unwrap();

        let mut csv = LowUsageCsv::create(&path).unwrap();
        csv.write_switch(&switch, &ports, 1).unwrap();
        csv.finish().unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(
            contents.ends_with("N_200,\"Closet 2, rack B\",8,Disabled,0,0,0\r\n"),
            "{contents}"
        );
    }

    #[test]
    fn every_record_ends_in_crlf() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");

        let mut csv = LowUsageCsv::create(&path).unwrap();
        csv.write_switch(&sw1(), &ports(), 300_000).unwrap();
        csv.finish().unwrap();

        let bytes = std::fs::read(&path).unwrap();
        let newlines = bytes.iter().filter(|&&b| b == b'\n').count();
        let crlfs = bytes.windows(2).filter(|w| *w == b"\r\n").count();
        assert_eq!(newlines, 3);
        assert_eq!(crlfs, newlines);
    }

    #[test]
    fn missing_directory_is_an_export_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("out.csv");

        let result = LowUsageCsv::create(&path);
        assert!(matches!(result, Err(CliError::Export { .. })));
    }
}
