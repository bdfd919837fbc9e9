use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Body of the health endpoint.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct HealthReport {
    pub ok: bool,
    pub service: String,
    pub timestamp: String,
}

impl HealthReport {
    /// Report for `service` stamped with the current UTC time (RFC 3339, millis).
    pub fn now(service: impl Into<String>) -> Self {
        Self {
            ok: true,
            service: service.into(),
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}
