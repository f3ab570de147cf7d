// lowport-api: Async client for the Meraki Dashboard switch endpoints

pub mod client;
pub mod error;
pub mod models;
pub mod transport;

pub use client::{API_KEY_HEADER, DashboardClient, PORT_STATUS_TIMESPAN_SECS};
pub use error::Error;
pub use models::{Device, PortStatus, SWITCH_MODEL_PREFIX, UsageInKb};
pub use transport::TransportConfig;
