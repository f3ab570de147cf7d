//! Per-field defaults for `usageInKb`.
//!
//! The report and the export read the same counters with different
//! fallbacks, so each gets its own type:
//!
//! - [`DisplayUsage`] shows `"N/A"` for anything missing, whether the whole
//!   map is absent or just one counter.
//! - [`ThresholdUsage`] treats a missing total as `0`, which means a port
//!   without usage data always counts as low usage. When the port has no
//!   `usageInKb` key at all, sent and received are `0` as well; when the map
//!   is `null` or lacks a counter, that counter is `"N/A"`.

use lowport_api::{PortStatus, UsageInKb};
use serde_json::Value;

/// Placeholder for a missing field in the report and the export.
pub const NOT_AVAILABLE: &str = "N/A";

/// Render a raw counter the way the Dashboard sent it.
///
/// Strings are shown without quotes; numbers keep their JSON form.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn display_or_na(value: Option<&Value>) -> String {
    value.map_or_else(|| NOT_AVAILABLE.to_owned(), display_value)
}

// ── Report defaults ──────────────────────────────────────────────────

/// Usage counters as shown in the console report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayUsage {
    pub total: String,
    pub sent: String,
    pub recv: String,
}

impl DisplayUsage {
    pub fn from_usage(usage: Option<&UsageInKb>) -> Self {
        match usage {
            None => Self {
                total: NOT_AVAILABLE.into(),
                sent: NOT_AVAILABLE.into(),
                recv: NOT_AVAILABLE.into(),
            },
            Some(u) => Self {
                total: display_or_na(u.total.as_ref()),
                sent: display_or_na(u.sent.as_ref()),
                recv: display_or_na(u.recv.as_ref()),
            },
        }
    }
}

// ── Export defaults ──────────────────────────────────────────────────

/// Usage counters as compared against the threshold and written to CSV.
#[derive(Debug, Clone, PartialEq)]
pub struct ThresholdUsage {
    /// Raw total, or `0` when the Dashboard did not report one.
    pub total: Value,
    pub sent: String,
    pub recv: String,
}

impl ThresholdUsage {
    /// Defaults for a port, keeping a missing `usageInKb` key apart from a
    /// `null` one.
    pub fn from_port(port: &PortStatus) -> Self {
        match &port.usage_in_kb {
            None => Self::unreported(),
            Some(usage) => Self::from_usage(usage.as_ref()),
        }
    }

    /// All three counters zero, for a port without a `usageInKb` key.
    pub fn unreported() -> Self {
        Self {
            total: Value::from(0),
            sent: "0".into(),
            recv: "0".into(),
        }
    }

    /// Defaults for a `usageInKb` value that is present; `None` means `null`.
    pub fn from_usage(usage: Option<&UsageInKb>) -> Self {
        let zero = || Value::from(0);
        match usage {
            None => Self {
                total: zero(),
                sent: NOT_AVAILABLE.into(),
                recv: NOT_AVAILABLE.into(),
            },
            Some(u) => Self {
                total: u.total.clone().unwrap_or_else(zero),
                sent: display_or_na(u.sent.as_ref()),
                recv: display_or_na(u.recv.as_ref()),
            },
        }
    }

    /// Total as written to the CSV.
    pub fn total_display(&self) -> String {
        display_value(&self.total)
    }

    /// Whether the total is strictly below `threshold_kb`.
    ///
    /// `None` when the total is present but not a JSON number; the caller
    /// decides how to report that.
    #[allow(clippy::cast_precision_loss, clippy::as_conversions)]
    pub fn is_below(&self, threshold_kb: i64) -> Option<bool> {
        let Value::Number(n) = &self.total else {
            return None;
        };

        if let Some(total) = n.as_i64() {
            return Some(total < threshold_kb);
        }
        if n.as_u64().is_some() {
            // Larger than any i64 threshold.
            return Some(false);
        }
        n.as_f64().map(|total| total < threshold_kb as f64)
    }
}
