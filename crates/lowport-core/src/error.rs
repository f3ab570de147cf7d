use thiserror::Error;

/// Errors raised while turning Dashboard responses into report/export rows.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A port reported a total usage that cannot be compared to the threshold.
    #[error("port {port_id} on switch {serial} reported non-numeric total usage: {value}")]
    NonNumericUsage {
        serial: String,
        port_id: String,
        value: String,
    },
}
