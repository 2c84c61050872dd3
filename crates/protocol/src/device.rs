use serde::{Deserialize, Serialize};

/// A device record from the source hub's catalog.
///
/// Deserialized leniently: unknown kinds and states fall back to
/// catch-all variants, and a missing `hubitatId` only makes the device
/// ineligible for dispatch, never the whole fetch invalid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Device {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: DeviceKind,
    #[serde(default)]
    pub state: DeviceState,
    #[serde(rename = "hubitatId", default, skip_serializing_if = "Option::is_none")]
    pub hubitat_id: Option<String>,
}

impl Device {
    /// Returns the mapped target device id, if present and non-empty.
    pub fn target_id(&self) -> Option<&str> {
        self.hubitat_id.as_deref().filter(|id| !id.is_empty())
    }
}

/// Kind of source device. Only lights are synchronized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceKind {
    Light,
    #[default]
    #[serde(other)]
    Other,
}

/// Reported on/off state of a source device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceState {
    On,
    Off,
    #[default]
    #[serde(other)]
    Unknown,
}
