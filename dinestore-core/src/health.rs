//! Connection diagnostics for health checks.
//!
//! [`ConnectionReport`] is what [`DocumentStore::connection_check`](crate::store::DocumentStore::connection_check)
//! returns. It never carries an error value, only data a health endpoint can render.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::time::Duration;

/// Error code reported when the connection round trip fails.
pub const CONNECTION_ERROR_CODE: i32 = 99;

/// Round-trip time above which a connected store is reported as degraded.
pub const DEGRADED_THRESHOLD: Duration = Duration::from_secs(4);

/// Result of a connection round trip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ConnectionReport {
    pub connected: bool,
    /// Serialized as fractional seconds.
    #[serde(with = "seconds", skip_serializing_if = "Option::is_none", default)]
    pub test_duration: Option<Duration>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub error_code: Option<i32>,
}

mod seconds {
    use serde::{Deserialize, Deserializer, Serializer, de::Error};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(duration: &Option<Duration>, serializer: S) -> Result<S::Ok, S::Error> {
        match duration {
            Some(duration) => serializer.serialize_some(&duration.as_secs_f64()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Duration>, D::Error> {
        Option::<f64>::deserialize(deserializer)?
            .map(|secs| Duration::try_from_secs_f64(secs).map_err(D::Error::custom))
            .transpose()
    }
}

impl ConnectionReport {
    /// A successful round trip that took `duration`.
    pub fn connected(duration: Duration) -> Self {
        Self {
            connected: true,
            test_duration: Some(duration),
            error_code: None,
        }
    }

    /// A failed round trip.
    pub fn failed() -> Self {
        Self {
            connected: false,
            test_duration: None,
            error_code: Some(CONNECTION_ERROR_CODE),
        }
    }

    /// Renders the report as a string-keyed map.
    ///
    /// Keys are `Connected`, `TestDuration` (seconds) and `ErrorCode`; absent
    /// values are omitted.
    pub fn to_map(&self) -> Map<String, Value> {
        let mut map = Map::new();
        map.insert("Connected".into(), Value::Bool(self.connected));

        if let Some(duration) = self.test_duration {
            map.insert("TestDuration".into(), Value::from(duration.as_secs_f64()));
        }
        if let Some(code) = self.error_code {
            map.insert("ErrorCode".into(), Value::from(code));
        }

        map
    }
}

/// Health classification derived from a [`ConnectionReport`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HealthStatus {
    Healthy,
    Degraded,
    Unhealthy,
}

impl HealthStatus {
    pub fn classify(report: &ConnectionReport) -> Self {
        if !report.connected {
            return HealthStatus::Unhealthy;
        }

        match report.test_duration {
            Some(duration) if duration > DEGRADED_THRESHOLD => HealthStatus::Degraded,
            _ => HealthStatus::Healthy,
        }
    }
}
