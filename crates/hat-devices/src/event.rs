//! Runtime event descriptors

use crate::device::{Device, DeviceType};
use serde::{Deserialize, Serialize};

/// An event the runtime can dispatch to automations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuntimeEvent {
    /// Event identifier as written in a trigger (e.g. "DoorOpenEvent")
    pub event: String,
    /// Human-readable description
    pub description: String,
    /// Device type that emits this event
    #[serde(default)]
    pub related_device_type: DeviceType,
}

/// Built-in event catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    DoorOpenEvent,
    DoorCloseEvent,
    LightOnEvent,
    LightOffEvent,
    PowerOutletOnEvent,
    PowerOutletOffEvent,
    MotionSensorOnEvent,
    MotionSensorOffEvent,
    SensorValueChangeEvent,
    /// Periodic clock event; time-based automations are gated on it
    ClockTickEvent,
}

impl EventKind {
    /// Every catalog entry, in toolbox order
    pub const ALL: [EventKind; 10] = [
        Self::DoorOpenEvent,
        Self::DoorCloseEvent,
        Self::LightOnEvent,
        Self::LightOffEvent,
        Self::PowerOutletOnEvent,
        Self::PowerOutletOffEvent,
        Self::MotionSensorOnEvent,
        Self::MotionSensorOffEvent,
        Self::SensorValueChangeEvent,
        Self::ClockTickEvent,
    ];

    /// Identifier used in generated code
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::DoorOpenEvent => "DoorOpenEvent",
            Self::DoorCloseEvent => "DoorCloseEvent",
            Self::LightOnEvent => "LightOnEvent",
            Self::LightOffEvent => "LightOffEvent",
            Self::PowerOutletOnEvent => "PowerOutletOnEvent",
            Self::PowerOutletOffEvent => "PowerOutletOffEvent",
            Self::MotionSensorOnEvent => "MotionSensorOnEvent",
            Self::MotionSensorOffEvent => "MotionSensorOffEvent",
            Self::SensorValueChangeEvent => "SensorValueChangeEvent",
            Self::ClockTickEvent => "ClockTickEvent",
        }
    }

    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            Self::DoorOpenEvent => "Triggered when a door is opened",
            Self::DoorCloseEvent => "Triggered when a door is closed",
            Self::LightOnEvent => "Triggered when a light is turned on",
            Self::LightOffEvent => "Triggered when a light is turned off",
            Self::PowerOutletOnEvent => "Triggered when a power outlet is turned on",
            Self::PowerOutletOffEvent => "Triggered when a power outlet is turned off",
            Self::MotionSensorOnEvent => "Triggered when a motion sensor is activated",
            Self::MotionSensorOffEvent => "Triggered when a motion sensor is deactivated",
            Self::SensorValueChangeEvent => "Triggered when a sensor value changes",
            Self::ClockTickEvent => "Triggered periodically by the runtime clock",
        }
    }

    #[must_use]
    pub fn related_device_type(self) -> DeviceType {
        match self {
            Self::DoorOpenEvent | Self::DoorCloseEvent => DeviceType::DoorSensor,
            Self::LightOnEvent | Self::LightOffEvent => DeviceType::Light,
            Self::PowerOutletOnEvent | Self::PowerOutletOffEvent => DeviceType::PowerOutlet,
            Self::MotionSensorOnEvent | Self::MotionSensorOffEvent => DeviceType::MotionSensor,
            Self::SensorValueChangeEvent => DeviceType::Sensor,
            Self::ClockTickEvent => DeviceType::Unknown,
        }
    }

    /// Events emitted by devices of the given type
    #[must_use]
    pub fn related_to(device_type: DeviceType) -> &'static [EventKind] {
        match device_type {
            DeviceType::DoorSensor => &[Self::DoorOpenEvent, Self::DoorCloseEvent],
            DeviceType::Light => &[Self::LightOnEvent, Self::LightOffEvent],
            DeviceType::PowerOutlet => &[Self::PowerOutletOnEvent, Self::PowerOutletOffEvent],
            DeviceType::MotionSensor => &[Self::MotionSensorOnEvent, Self::MotionSensorOffEvent],
            DeviceType::Sensor => &[Self::SensorValueChangeEvent],
            DeviceType::Dummy | DeviceType::Unknown => &[],
        }
    }
}

impl From<EventKind> for RuntimeEvent {
    fn from(kind: EventKind) -> Self {
        Self {
            event: kind.name().to_string(),
            description: kind.description().to_string(),
            related_device_type: kind.related_device_type(),
        }
    }
}

/// Events that can fire for the given set of devices, in catalog order
#[must_use]
pub fn possible_events(devices: &[Device]) -> Vec<RuntimeEvent> {
    EventKind::ALL
        .into_iter()
        .filter(|kind| {
            devices
                .iter()
                .any(|d| EventKind::related_to(d.typ).contains(kind))
        })
        .map(RuntimeEvent::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn device(typ: DeviceType) -> Device {
        Device {
            integration: "hass".to_string(),
            id: "x".to_string(),
            name: None,
            typ,
            state: None,
        }
    }

    #[test]
    fn test_possible_events_deduplicated_in_catalog_order() {
        let devices = vec![
            device(DeviceType::Light),
            device(DeviceType::DoorSensor),
            device(DeviceType::Light),
            device(DeviceType::Dummy),
        ];
        let events: Vec<String> = possible_events(&devices)
            .into_iter()
            .map(|e| e.event)
            .collect();
        assert_eq!(
            events,
            ["DoorOpenEvent", "DoorCloseEvent", "LightOnEvent", "LightOffEvent"]
        );
    }

    #[test]
    fn test_catalog_consistency() {
        for kind in EventKind::ALL {
            if kind != EventKind::ClockTickEvent {
                assert!(EventKind::related_to(kind.related_device_type()).contains(&kind));
            }
        }
    }

    #[test]
    fn test_runtime_event_wire_format() {
        let event = RuntimeEvent::from(EventKind::MotionSensorOnEvent);
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["event"], "MotionSensorOnEvent");
        assert_eq!(json["relatedDeviceType"], "MotionSensor");

        let parsed: RuntimeEvent =
            serde_json::from_str(r#"{"event":"Foo","description":"bar"}"#).unwrap();
        assert_eq!(parsed.related_device_type, DeviceType::Unknown);
    }
}
