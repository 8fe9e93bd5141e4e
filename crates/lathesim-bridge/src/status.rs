//! Actuator status updates
//!
//! The actuator side publishes periodic `status_update` messages with
//! the handle-wheel position read from the motor encoder. Parsing is
//! field-tolerant: a transport glitch that drops the position field
//! yields a status with `handle_wheel_position = None`, which the
//! session treats as "carry the previous tool state forward".

use lathesim_core::{SkillLevel, TrainingMode};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Periodic status published by the actuator side
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusUpdate {
    /// Handle-wheel position in degrees, if the encoder read succeeded
    #[serde(default)]
    pub handle_wheel_position: Option<f64>,
    /// Training mode echoed back by the bridge
    #[serde(default)]
    pub mode: Option<TrainingMode>,
    /// Skill level echoed back by the bridge
    #[serde(default)]
    pub skill_level: Option<SkillLevel>,
    /// Emergency-stop state on the actuator side
    #[serde(default)]
    pub emergency_stop: bool,
    /// Spindle speed echoed back by the bridge
    #[serde(default)]
    pub spindle_rpm: f64,
    /// Feed rate echoed back by the bridge
    #[serde(default)]
    pub feed_rate: f64,
    /// Unix timestamp of the update, seconds
    #[serde(default)]
    pub timestamp: f64,
}

impl StatusUpdate {
    /// Parse a `status_update` JSON message, tolerating partial input
    ///
    /// Returns `None` for non-status messages or undecodable JSON.
    pub fn parse(input: &str) -> Option<Self> {
        let value: serde_json::Value = match serde_json::from_str(input) {
            Ok(v) => v,
            Err(e) => {
                warn!(error = %e, "ignoring undecodable status message");
                return None;
            }
        };
        if value.get("type").and_then(|t| t.as_str()) != Some("status_update") {
            return None;
        }
        match serde_json::from_value(value) {
            Ok(status) => Some(status),
            Err(e) => {
                warn!(error = %e, "ignoring malformed status_update");
                None
            }
        }
    }

    /// Build an outbound status update stamped with the current time
    pub fn now(handle_wheel_position: f64, emergency_stop: bool) -> Self {
        Self {
            handle_wheel_position: Some(handle_wheel_position),
            mode: None,
            skill_level: None,
            emergency_stop,
            spindle_rpm: 0.0,
            feed_rate: 0.0,
            timestamp: chrono::Utc::now().timestamp_millis() as f64 / 1000.0,
        }
    }

    /// Serialize to the wire format with the `type` tag
    pub fn to_json(&self) -> String {
        let mut value = serde_json::to_value(self).unwrap_or_default();
        if let Some(map) = value.as_object_mut() {
            map.insert(
                "type".to_string(),
                serde_json::Value::String("status_update".to_string()),
            );
        }
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_status() {
        let json = r#"{
            "type": "status_update",
            "handle_wheel_position": 45.67,
            "mode": "turning",
            "skill_level": "beginner",
            "emergency_stop": false,
            "spindle_rpm": 500.0,
            "feed_rate": 2.0,
            "timestamp": 1700000000.0
        }"#;
        let status = StatusUpdate::parse(json).unwrap();
        assert_eq!(status.handle_wheel_position, Some(45.67));
        assert_eq!(status.mode, Some(TrainingMode::Turning));
        assert!(!status.emergency_stop);
    }

    #[test]
    fn test_partial_status_defaults() {
        // Encoder read failed upstream: no position field
        let json = r#"{"type": "status_update", "emergency_stop": true}"#;
        let status = StatusUpdate::parse(json).unwrap();
        assert_eq!(status.handle_wheel_position, None);
        assert!(status.emergency_stop);
        assert_eq!(status.spindle_rpm, 0.0);
    }

    #[test]
    fn test_wrong_type_is_none() {
        assert!(StatusUpdate::parse(r#"{"type": "mode_change", "mode": "manual"}"#).is_none());
        assert!(StatusUpdate::parse("garbage").is_none());
    }

    #[test]
    fn test_roundtrip_keeps_tag() {
        let status = StatusUpdate::now(30.0, false);
        let json = status.to_json();
        let back = StatusUpdate::parse(&json).unwrap();
        assert_eq!(back.handle_wheel_position, Some(30.0));
    }
}
