//! Application core: port traits, events, and the polling service.
//!
//! Everything here is hardware-agnostic. Hardware is reached only through
//! the traits in [`ports`], keeping this layer testable on the host.

pub mod events;
pub mod ports;
pub mod service;
