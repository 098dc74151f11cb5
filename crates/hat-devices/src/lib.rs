//! Device and event descriptors
//!
//! This crate provides the data shapes the Hat runtime exposes about
//! devices and the events they emit, along with the canonical device
//! handle format used by generated code.

pub mod device;
pub mod event;
pub mod handle;

pub use device::{sort_by_priority, Device, DeviceType};
pub use event::{possible_events, EventKind, RuntimeEvent};
pub use handle::{DeviceHandle, HandleError};
