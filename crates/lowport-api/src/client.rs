// Async HTTP client for the Meraki Dashboard API (v1).
//
// Base path: {base}/ (usually https://api.meraki.com/api/v1)
// Auth: X-Cisco-Meraki-API-Key header

use reqwest::StatusCode;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use url::Url;

use crate::error::Error;
use crate::models::{Device, PortStatus};
use crate::transport::TransportConfig;

/// Header carrying the Dashboard API key on every request.
pub const API_KEY_HEADER: &str = "X-Cisco-Meraki-API-Key";

/// Lookback window for port statistics: 30 days, in seconds.
pub const PORT_STATUS_TIMESPAN_SECS: u32 = 2_592_000;

/// Async client for the two Dashboard endpoints the report needs.
///
/// Requests are issued one at a time by the caller; the client keeps no
/// state between them beyond the connection pool.
pub struct DashboardClient {
    http: reqwest::Client,
    base_url: String,
}

impl DashboardClient {
    // ── Constructors ─────────────────────────────────────────────────

    /// Build from an API key and transport config.
    ///
    /// Injects the API key and a JSON content type as default headers.
    /// The key is not checked for presence; an empty key is sent as-is
    /// and the Dashboard answers with 401.
    pub fn from_api_key(
        base_url: &str,
        api_key: &SecretString,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let mut headers = HeaderMap::new();
        let mut key_value =
            HeaderValue::from_str(api_key.expose_secret()).map_err(|e| Error::InvalidApiKey {
                message: e.to_string(),
            })?;
        key_value.set_sensitive(true);
        headers.insert(API_KEY_HEADER, key_value);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let http = transport.build_client_with_headers(headers)?;
        Ok(Self::from_reqwest(base_url, http))
    }

    /// Wrap an existing `reqwest::Client` (caller manages auth headers).
    pub fn from_reqwest(base_url: &str, http: reqwest::Client) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_owned(),
        }
    }

    /// The configured base URL, without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // ── URL builder ──────────────────────────────────────────────────

    /// Append `path` to the base URL.
    ///
    /// Plain concatenation rather than `Url::join`, so a base like
    /// `https://api.meraki.com/api/v1` keeps its `/api/v1` suffix.
    fn url(&self, path: &str) -> Result<Url, Error> {
        Ok(Url::parse(&format!("{}/{path}", self.base_url))?)
    }

    // ── Endpoints ────────────────────────────────────────────────────

    /// List every device in an organization.
    ///
    /// `GET /organizations/{orgId}/devices`
    pub async fn list_devices(&self, org_id: &str) -> Result<Vec<Device>, Error> {
        let url = self.url(&format!("organizations/{org_id}/devices"))?;
        debug!("GET {url}");

        let resp = self.http.get(url).send().await?;
        let status = resp.status();
        let body = resp.text().await?;

        if status == StatusCode::UNAUTHORIZED {
            return Err(Error::Authentication {
                message: preview(&body).to_owned(),
            });
        }
        if !status.is_success() {
            return Err(Error::Api {
                status: status.as_u16(),
                message: preview(&body).to_owned(),
            });
        }

        parse_body(body)
    }

    /// List the organization's switches, in inventory order.
    ///
    /// Same request as [`list_devices`](Self::list_devices), keeping only
    /// devices whose model starts with `MS`.
    pub async fn list_switches(&self, org_id: &str) -> Result<Vec<Device>, Error> {
        let devices = self.list_devices(org_id).await?;
        let total = devices.len();
        let switches: Vec<Device> = devices.into_iter().filter(Device::is_switch).collect();
        debug!(total, switches = switches.len(), "filtered organization devices");
        Ok(switches)
    }

    /// Fetch per-port status and usage for one switch over the last 30 days.
    ///
    /// `GET /devices/{serial}/switch/ports/statuses?timespan=2592000`
    ///
    /// Any status other than 200 is logged as a warning and yields an empty
    /// list, so callers see a failed device the same as one without ports.
    /// Transport failures still propagate.
    pub async fn get_port_statuses(&self, serial: &str) -> Result<Vec<PortStatus>, Error> {
        let url = self.url(&format!("devices/{serial}/switch/ports/statuses"))?;
        debug!("GET {url} timespan={PORT_STATUS_TIMESPAN_SECS}");

        let resp = self
            .http
            .get(url)
            .query(&[("timespan", PORT_STATUS_TIMESPAN_SECS)])
            .send()
            .await?;

        let status = resp.status();
        if status != StatusCode::OK {
            warn!(
                %status,
                "Failed to fetch port statuses for device {serial} with timespan of 30 days."
            );
            return Ok(Vec::new());
        }

        parse_body(resp.text().await?)
    }
}

// ── Response helpers ─────────────────────────────────────────────────

fn parse_body<T: DeserializeOwned>(body: String) -> Result<T, Error> {
    serde_json::from_str(&body).map_err(|e| Error::Deserialization {
        message: format!("{e} (body preview: {:?})", preview(&body)),
        body,
    })
}

/// First 200 bytes of a body, cut on a char boundary.
fn preview(body: &str) -> &str {
    let mut end = body.len().min(200);
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    &body[..end]
}
