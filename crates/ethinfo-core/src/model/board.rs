// ── Board topology ──
//
// Typed view of `/etc/board.json`. The file is loosely structured and
// varies between targets, so conversion from JSON never fails: any value
// of the wrong shape simply becomes `None`.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use super::port::PortRole;

/// Static description of which physical ports serve which network role.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Value")]
pub struct BoardTopology {
    pub network: Option<BoardNetwork>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BoardNetwork {
    pub lan: Option<RoleSection>,
    pub wan: Option<RoleSection>,
}

/// One role entry under `network`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RoleSection {
    /// Member ports, present only when the JSON field is a list.
    pub ports: Option<Vec<String>>,
    /// Single device, present only when the JSON field is a non-empty string.
    pub device: Option<String>,
}

impl BoardTopology {
    /// Parse raw board JSON. Invalid JSON is logged and treated as empty.
    pub fn parse(raw: &str) -> Self {
        match serde_json::from_str::<Value>(raw) {
            Ok(value) => Self::from(value),
            Err(e) => {
                warn!(error = %e, "board description is not valid JSON, ignoring it");
                Self::default()
            }
        }
    }

    pub fn section(&self, role: PortRole) -> Option<&RoleSection> {
        self.network.as_ref().and_then(|n| n.section(role))
    }

    /// Ports named by each role, `lan` first, then `wan`.
    ///
    /// A role contributes its `ports` list when present (even if empty),
    /// otherwise its single `device`, otherwise nothing.
    pub fn role_ports(&self) -> Vec<(PortRole, &str)> {
        let mut out = Vec::new();
        for role in PortRole::BOARD_ORDER {
            let Some(section) = self.section(role) else {
                continue;
            };
            if let Some(ref ports) = section.ports {
                out.extend(ports.iter().map(|p| (role, p.as_str())));
            } else if let Some(ref device) = section.device {
                out.push((role, device.as_str()));
            }
        }
        out
    }
}

impl BoardNetwork {
    pub fn section(&self, role: PortRole) -> Option<&RoleSection> {
        match role {
            PortRole::Lan => self.lan.as_ref(),
            PortRole::Wan => self.wan.as_ref(),
        }
    }
}

impl From<Value> for BoardTopology {
    fn from(value: Value) -> Self {
        let network = match value.get("network") {
            Some(Value::Object(net)) => Some(BoardNetwork {
                lan: net.get("lan").and_then(RoleSection::from_value),
                wan: net.get("wan").and_then(RoleSection::from_value),
            }),
            _ => None,
        };
        Self { network }
    }
}

impl RoleSection {
    fn from_value(value: &Value) -> Option<Self> {
        let Value::Object(map) = value else {
            return None;
        };

        // Non-string members can't name a netdev; drop them rather than
        // fabricating names.
        let ports = match map.get("ports") {
            Some(Value::Array(items)) => Some(
                items
                    .iter()
                    .filter_map(Value::as_str)
                    .filter(|s| !s.is_empty())
                    .map(str::to_owned)
                    .collect(),
            ),
            _ => None,
        };

        let device = map
            .get("device")
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .map(str::to_owned);

        Some(Self { ports, device })
    }
}
