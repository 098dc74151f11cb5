//! Canonical device handles

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors produced when parsing a device handle
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HandleError {
    /// The handle is not of the form `<integration>@<device id>`
    #[error("Malformed device handle: {0:?}")]
    Malformed(String),
}

/// Reference to a device instance, written as `<integration>@<device id>`
///
/// This is the single string form passed to every device-consuming call in
/// generated code; consumers split it on the first `@`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DeviceHandle {
    pub integration: String,
    pub device_id: String,
}

impl DeviceHandle {
    pub fn new(integration: impl Into<String>, device_id: impl Into<String>) -> Self {
        Self {
            integration: integration.into(),
            device_id: device_id.into(),
        }
    }

    /// Build a handle from its two halves, rejecting any that would not
    /// parse back from the string form
    pub fn try_new(
        integration: impl Into<String>,
        device_id: impl Into<String>,
    ) -> Result<Self, HandleError> {
        let handle = Self::new(integration, device_id);
        if handle.integration.is_empty()
            || handle.device_id.is_empty()
            || handle.integration.contains('@')
        {
            return Err(HandleError::Malformed(handle.to_string()));
        }
        Ok(handle)
    }
}

impl fmt::Display for DeviceHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.integration, self.device_id)
    }
}

impl FromStr for DeviceHandle {
    type Err = HandleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once('@') {
            Some((integration, device_id)) => Self::try_new(integration, device_id),
            None => Err(HandleError::Malformed(s.to_string())),
        }
    }
}

impl TryFrom<String> for DeviceHandle {
    type Error = HandleError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<DeviceHandle> for String {
    fn from(handle: DeviceHandle) -> Self {
        handle.to_string()
    }
}
