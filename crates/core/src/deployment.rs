//! Health and version payloads for blue-green deployment banners.
//!
//! These types are the JSON contract between the catalog service's
//! `/health` and `/version` endpoints and the clients that poll them. They
//! carry operational metadata only and never affect catalog or cart logic.

use chrono::{DateTime, Local, SecondsFormat, SubsecRound, Utc};
use serde::{Deserialize, Serialize, Serializer};

/// Body of `GET /health`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    /// Always written with milliseconds and a `Z` suffix.
    #[serde(serialize_with = "serialize_millis")]
    pub timestamp: DateTime<Utc>,
}

fn serialize_millis<S: Serializer>(ts: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&ts.to_rfc3339_opts(SecondsFormat::Millis, true))
}

impl HealthStatus {
    /// A healthy report stamped with the current time (millisecond precision).
    #[must_use]
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: Utc::now().trunc_subsecs(3),
        }
    }

    /// Status line, e.g. `✅ healthy (14:03:07)`, in local time.
    #[must_use]
    pub fn line(&self) -> String {
        format!(
            "✅ {} ({})",
            self.status,
            self.timestamp.with_timezone(&Local).format("%H:%M:%S")
        )
    }
}

/// Body of `GET /version`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionInfo {
    pub version: String,
    /// Blue-green slot, e.g. `blue` or `green`.
    pub color: String,
    #[serde(default)]
    pub hostname: Option<String>,
    pub build_number: String,
}

impl VersionInfo {
    /// Banner text, e.g. `🚀 Deployment: BLUE | Version: 1.2.0 | Host: web-1`.
    #[must_use]
    pub fn banner(&self) -> String {
        format!(
            "🚀 Deployment: {} | Version: {} | Host: {}",
            self.color.to_uppercase(),
            self.version,
            self.hostname.as_deref().unwrap_or("N/A")
        )
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_version_banner() {
        let info = VersionInfo {
            version: "1.2.0".to_string(),
            color: "green".to_string(),
            hostname: Some("web-2".to_string()),
            build_number: "57".to_string(),
        };
        assert_eq!(
            info.banner(),
            "🚀 Deployment: GREEN | Version: 1.2.0 | Host: web-2"
        );
    }

    #[test]
    fn test_version_without_hostname() {
        let info: VersionInfo =
            serde_json::from_str(r#"{"version":"1.0.0","color":"blue","buildNumber":"unknown"}"#)
                .unwrap();
        assert_eq!(info.hostname, None);
        assert!(info.banner().ends_with("Host: N/A"));
    }

    #[test]
    fn test_version_wire_names() {
        let info = VersionInfo {
            version: "1.0.0".to_string(),
            color: "blue".to_string(),
            hostname: Some("h".to_string()),
            build_number: "12".to_string(),
        };
        let json = serde_json::to_value(&info).unwrap();
        assert_eq!(json["buildNumber"], "12");
        assert_eq!(json["hostname"], "h");
    }

    #[test]
    fn test_health_timestamp_keeps_zero_millis() {
        let health = HealthStatus {
            status: "healthy".to_string(),
            timestamp: DateTime::parse_from_rfc3339("2026-01-02T03:04:05Z")
                .unwrap()
                .with_timezone(&Utc),
        };
        let json = serde_json::to_value(&health).unwrap();
        assert_eq!(json["timestamp"], "2026-01-02T03:04:05.000Z");
    }

    #[test]
    fn test_health_round_trip() {
        let health = HealthStatus::healthy();
        let json = serde_json::to_string(&health).unwrap();
        let back: HealthStatus = serde_json::from_str(&json).unwrap();
        assert_eq!(back, health);
        assert!(back.line().starts_with("✅ healthy ("));
    }
}
