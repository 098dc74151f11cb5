//! Device representation

use crate::handle::DeviceHandle;
use serde::{Deserialize, Serialize};

/// Device types reported by the runtime integrations
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String")]
pub enum DeviceType {
    Dummy,
    DoorSensor,
    Light,
    Sensor,
    PowerOutlet,
    MotionSensor,
    #[default]
    Unknown,
}

impl From<String> for DeviceType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "Dummy" => Self::Dummy,
            "DoorSensor" => Self::DoorSensor,
            "Light" => Self::Light,
            "Sensor" => Self::Sensor,
            "PowerOutlet" => Self::PowerOutlet,
            "MotionSensor" => Self::MotionSensor,
            _ => Self::Unknown,
        }
    }
}

impl DeviceType {
    /// Toolbox ordering weight; higher values are listed first
    #[must_use]
    pub fn priority(self) -> u8 {
        match self {
            Self::DoorSensor | Self::PowerOutlet | Self::MotionSensor => 3,
            Self::Light => 2,
            Self::Sensor => 1,
            Self::Dummy | Self::Unknown => 0,
        }
    }
}

/// A device known to the runtime
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Device {
    /// Integration that owns the device (e.g. "hass")
    pub integration: String,
    /// Integration-scoped device id (e.g. "light.kitchen")
    pub id: String,
    /// User-assigned friendly name
    #[serde(default)]
    pub name: Option<String>,
    /// Device type
    #[serde(default)]
    pub typ: DeviceType,
    /// Last known state, as reported by the integration
    #[serde(default)]
    pub state: Option<String>,
}

impl Device {
    /// Canonical handle used to reference this device from generated code
    #[must_use]
    pub fn handle(&self) -> DeviceHandle {
        DeviceHandle::new(&self.integration, &self.id)
    }

    /// Get a display name (friendly name, or the device id)
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.id)
    }
}

/// Sort devices for display: highest priority first, then by display name
pub fn sort_by_priority(devices: &mut [Device]) {
    devices.sort_by(|a, b| {
        b.typ
            .priority()
            .cmp(&a.typ.priority())
            .then_with(|| a.display_name().cmp(b.display_name()))
    });
}
