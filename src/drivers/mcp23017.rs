//! MCP23017 16-bit I2C I/O expander as a button input backend.
//!
//! Pins 0–7 map to port A, 8–15 to port B. The driver assumes the
//! power-on IOCON value (BANK = 0, sequential addressing enabled).
//!
//! | Register | A    | B    | Use                              |
//! |----------|------|------|----------------------------------|
//! | IODIR    | 0x00 | 0x01 | 1 = input                        |
//! | IPOL     | 0x02 | 0x03 | 1 = GPIO bit reads inverted      |
//! | GPPU     | 0x0C | 0x0D | 1 = 100 kΩ pull-up enabled       |
//! | GPIO     | 0x12 | 0x13 | port level (after IPOL)          |
//!
//! Inversion is pushed into IPOL, so levels read back are already
//! "pressed = true" and the debounce engine does no software inversion.
//!
//! One device usually serves several buttons: wrap it in a `RefCell` and
//! hand each engine a `&RefCell<Mcp23017<_>>`.

use embedded_hal::i2c::I2c;
use log::{debug, warn};

use crate::app::ports::{DigitalInputSource, PinId};
use crate::error::{Error, ExpanderError, Result};

/// Address with A2..A0 tied low.
pub const DEFAULT_ADDRESS: u8 = 0x20;

/// Number of pins on the device.
pub const PIN_COUNT: PinId = 16;

const IODIRA: u8 = 0x00;
const IPOLA: u8 = 0x02;
const GPPUA: u8 = 0x0C;
const GPIOA: u8 = 0x12;

pub struct Mcp23017<I2C> {
    i2c: I2C,
    address: u8,
    /// Last successfully read GPIO state, port B in the high byte.
    gpio: u16,
}

impl<I2C: I2c> Mcp23017<I2C> {
    pub fn new(i2c: I2C, address: u8) -> Self {
        Self {
            i2c,
            address,
            gpio: 0,
        }
    }

    pub fn address(&self) -> u8 {
        self.address
    }

    /// Make `pin` an input, set its pull-up and input polarity.
    pub fn pin_mode(&mut self, pin: PinId, pull_up: bool, invert: bool) -> Result<()> {
        let (port, bit) = split_pin(pin)?;
        self.update_bit(IODIRA + port, bit, true)?;
        self.update_bit(GPPUA + port, bit, pull_up)?;
        self.update_bit(IPOLA + port, bit, invert)?;
        Ok(())
    }

    /// Level of one pin, after IPOL.
    pub fn digital_read(&mut self, pin: PinId) -> Result<bool> {
        let (port, bit) = split_pin(pin)?;
        let value = self.read_register(GPIOA + port)?;
        let shift = 8 * u16::from(port);
        self.gpio = (self.gpio & !(0xFFu16 << shift)) | (u16::from(value) << shift);
        Ok(value & (1 << bit) != 0)
    }

    /// Both ports in one sequential read, port B in the high byte.
    pub fn read_gpio(&mut self) -> Result<u16> {
        let mut buf = [0u8; 2];
        self.i2c
            .write_read(self.address, &[GPIOA], &mut buf)
            .map_err(bus_error)?;
        self.gpio = u16::from_le_bytes(buf);
        Ok(self.gpio)
    }

    /// Last GPIO state read without error.
    pub fn cached_gpio(&self) -> u16 {
        self.gpio
    }

    pub fn release(self) -> I2C {
        self.i2c
    }

    fn read_register(&mut self, reg: u8) -> Result<u8> {
        let mut buf = [0u8; 1];
        self.i2c
            .write_read(self.address, &[reg], &mut buf)
            .map_err(bus_error)?;
        Ok(buf[0])
    }

    fn write_register(&mut self, reg: u8, value: u8) -> Result<()> {
        self.i2c
            .write(self.address, &[reg, value])
            .map_err(bus_error)
    }

    fn update_bit(&mut self, reg: u8, bit: u8, set: bool) -> Result<()> {
        let old = self.read_register(reg)?;
        let new = if set { old | (1 << bit) } else { old & !(1 << bit) };
        if new != old {
            self.write_register(reg, new)?;
        }
        Ok(())
    }
}

fn split_pin(pin: PinId) -> Result<(u8, u8)> {
    if pin >= PIN_COUNT {
        return Err(ExpanderError::InvalidPin(pin).into());
    }
    Ok((pin / 8, pin % 8))
}

fn bus_error<E: embedded_hal::i2c::Error>(e: E) -> Error {
    Error::Expander(e.kind().into())
}

impl<I2C: I2c> DigitalInputSource for Mcp23017<I2C> {
    fn configure(&mut self, pin: PinId, pull_up: bool, invert: bool) {
        match self.pin_mode(pin, pull_up, invert) {
            Ok(()) => debug!(
                "mcp23017@{:#04x} pin {}: input, pull_up={}, ipol={}",
                self.address, pin, pull_up, invert
            ),
            Err(e) => warn!("mcp23017@{:#04x} pin {}: {}", self.address, pin, e),
        }
    }

    fn read_raw(&mut self, pin: PinId) -> bool {
        match self.digital_read(pin) {
            Ok(level) => level,
            Err(e) => {
                warn!(
                    "mcp23017@{:#04x} pin {}: {}, using cached level",
                    self.address, pin, e
                );
                pin < PIN_COUNT && self.gpio & (1u16 << pin) != 0
            }
        }
    }

    fn hardware_invert(&self) -> bool {
        true
    }
}
