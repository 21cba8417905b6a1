//! Shared build layout for the ha_switch firmware.

pub mod layout;

pub use layout::{BuildLayout, HA_SWITCH_LAYOUT};
