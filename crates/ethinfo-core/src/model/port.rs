// ── Port records ──

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::device::DeviceHandle;

/// Logical network role a port serves according to the board description.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum PortRole {
    Lan,
    Wan,
}

impl PortRole {
    /// Order in which board roles are scanned when reconstructing ports.
    pub const BOARD_ORDER: [Self; 2] = [Self::Lan, Self::Wan];

    /// Map a free-form role tag to a known role. Anything else (including
    /// the `"unknown"` tag emitted by port probing) has no role.
    pub fn from_tag(tag: &str) -> Option<Self> {
        tag.parse().ok()
    }
}

/// One entry of the structured (preferred) port list.
///
/// Producers may attach arbitrary extra keys; they are kept in `extra`
/// so the record round-trips through JSON output untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuiltinPort {
    pub device: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

impl BuiltinPort {
    pub fn new(device: impl Into<String>, role: Option<&str>) -> Self {
        Self {
            device: device.into(),
            role: role.map(str::to_owned),
            extra: serde_json::Map::new(),
        }
    }

    pub fn role(&self) -> Option<PortRole> {
        self.role.as_deref().and_then(PortRole::from_tag)
    }

    /// Extract a port list from loosely-shaped JSON.
    ///
    /// Accepts a bare array or the `{"result": [...]}` envelope returned by
    /// the RPC endpoint. Entries without a non-empty string `device` are
    /// dropped; anything that is not a list yields an empty list.
    pub fn list_from_value(value: &Value) -> Vec<Self> {
        let entries = match value {
            Value::Array(items) => items.as_slice(),
            Value::Object(map) => match map.get("result") {
                Some(Value::Array(items)) => items.as_slice(),
                _ => return Vec::new(),
            },
            _ => return Vec::new(),
        };

        entries
            .iter()
            .filter_map(|entry| {
                let Value::Object(map) = entry else {
                    return None;
                };
                let device = map.get("device").and_then(Value::as_str)?;
                if device.is_empty() {
                    return None;
                }
                let role = map.get("role").and_then(Value::as_str).map(str::to_owned);
                let extra = map
                    .iter()
                    .filter(|(k, _)| k.as_str() != "device" && k.as_str() != "role")
                    .map(|(k, v)| (k.clone(), v.clone()))
                    .collect();
                Some(Self {
                    device: device.to_owned(),
                    role,
                    extra,
                })
            })
            .collect()
    }
}

/// A resolved physical port.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PortInfo {
    pub role: Option<PortRole>,
    pub device: String,
    pub netdev: DeviceHandle,
}
