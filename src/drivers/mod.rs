//! Button drivers and digital input backends.

pub mod button;
pub mod gpio;
pub mod mcp23017;
