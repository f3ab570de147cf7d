// Dashboard API response types
//
// Only the fields the report and export read are modeled explicitly; the
// API returns many more and they land in `extra`. Everything except the
// serial is optional because field presence varies across device models.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Model prefix shared by every Meraki switch (MS120, MS225, MS390, ...).
pub const SWITCH_MODEL_PREFIX: &str = "MS";

// ── Device ───────────────────────────────────────────────────────────

/// Organization inventory entry from `GET /organizations/{orgId}/devices`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Device {
    #[serde(default)]
    pub serial: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub network_id: Option<String>,
    /// Catch-all for fields we don't read.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Device {
    /// Whether the model identifier marks this device as switch hardware.
    pub fn is_switch(&self) -> bool {
        self.model
            .as_deref()
            .is_some_and(|m| m.starts_with(SWITCH_MODEL_PREFIX))
    }
}

// ── Port status ──────────────────────────────────────────────────────

/// One physical port from `GET /devices/{serial}/switch/ports/statuses`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortStatus {
    #[serde(default)]
    pub port_id: Option<String>,
    /// Link state, e.g. `"Connected"` or `"Disconnected"`.
    #[serde(default)]
    pub status: Option<String>,
    /// `None` when the key is missing, `Some(None)` when it is `null`.
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub usage_in_kb: Option<Option<UsageInKb>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl PortStatus {
    /// Usage counters, if the Dashboard sent a map.
    pub fn usage(&self) -> Option<&UsageInKb> {
        self.usage_in_kb.as_ref().and_then(Option::as_ref)
    }
}

/// Runs only when the key is present, so `null` becomes `Some(None)`.
fn present<'de, D, T>(de: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(de).map(Some)
}

/// Traffic counters over the requested timespan, in kilobytes.
///
/// Values are kept as raw JSON so that a non-numeric counter is reported
/// by the consumer instead of failing the whole response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UsageInKb {
    #[serde(default)]
    pub total: Option<Value>,
    #[serde(default)]
    pub sent: Option<Value>,
    #[serde(default)]
    pub recv: Option<Value>,
}
