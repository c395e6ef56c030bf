use serde_json::Value;

/// Backend liveness endpoint, resolved against the configured base URL.
pub const HEALTH_PATH: &str = "/health";

/// Shown when the health response does not name a status.
pub const DEFAULT_STATUS: &str = "OK";

/// Status string reported by the health endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HealthStatus(pub String);

impl HealthStatus {
    /// Extract `status` from any JSON body.
    pub fn from_body(body: &Value) -> Self {
        let status = match body.get("status") {
            None | Some(Value::Null) => DEFAULT_STATUS.to_string(),
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
        };
        Self(status)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}
