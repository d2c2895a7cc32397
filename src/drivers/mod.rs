//! Peripheral drivers: PIR input, alarm relay, task watchdog.

pub mod pir;
pub mod relay;
pub mod watchdog;
