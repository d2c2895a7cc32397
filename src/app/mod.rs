//! Application core: pure domain logic, zero I/O.
//!
//! Link and session supervision, motion debouncing, event publishing and
//! timestamping. All interaction with hardware and the network happens
//! through **port traits** defined in [`ports`], keeping this layer fully
//! testable without a running device.

pub mod context;
pub mod debounce;
pub mod events;
pub mod link;
pub mod payload;
pub mod ports;
pub mod publisher;
pub mod reconnect;
pub mod service;
pub mod session;
pub mod timestamp;
