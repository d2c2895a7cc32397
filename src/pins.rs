//! GPIO pin assignments for the PIR node board.
//!
//! Single source of truth: drivers and `main` reference this module rather
//! than hard-coding pin numbers.

/// HC-SR501 PIR sensor output. HIGH = motion present.
pub const PIR_GPIO: i32 = 27;

/// Relay coil driver for the local alarm. HIGH = energised.
/// Mirrors the PIR input; driven LOW at boot.
pub const RELAY_GPIO: i32 = 26;
