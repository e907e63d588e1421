//! Register access helpers for two-wire (I2C) peripherals
//!
//! This crate layers the operations every I2C sensor driver ends up
//! writing on top of the [`wirereg_hal::TwoWire`] bus contract:
//!
//! - Byte and big-endian word register reads/writes, single or in runs
//! - Single-bit and bit-field read-modify-write
//! - Bus scanning for attached devices
//!
//! ```ignore
//! let mut acc = RegisterAccessor::attach(&mut wire);
//! acc.write_bits(0x68, 0x1B, 4, 2, 0b11); // gyro full scale, bits 4..=3
//! let who_am_i = acc.read_byte(0x68, 0x75);
//! if !acc.write_byte(0x68, 0x6B, 0x00) {
//!     // inspect acc.status()
//! }
//! ```

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod accessor;
pub mod field;
pub mod scan;

#[cfg(test)]
mod mock;

pub use accessor::RegisterAccessor;
pub use field::{BitField, RegisterValue};
pub use scan::{ScanConfig, ScanReport};
pub use wirereg_hal::{HalWire, TransmissionStatus, TwoWire};

/// Register accessor driving an embedded-hal I2C bus
pub type HalAccessor<I2C> = RegisterAccessor<HalWire<I2C>>;
