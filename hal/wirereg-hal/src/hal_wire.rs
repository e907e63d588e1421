//! embedded-hal adapter
//!
//! Wraps any blocking [`embedded_hal::i2c::I2c`] bus so it can be driven
//! through the transmission-style [`TwoWire`] contract. Writes are queued
//! until `end_transmission` and sent as a single bus write; reads are
//! performed eagerly by `request_from` and drained from a receive buffer.

use embedded_hal::i2c::{Error as _, I2c};
use heapless::Vec;

use crate::i2c::{TransmissionStatus, TwoWire};

/// Size of the transmit and receive buffers, in bytes
pub const BUFFER_LENGTH: usize = 32;

/// [`TwoWire`] implementation on top of an embedded-hal I2C bus
pub struct HalWire<I2C> {
    i2c: I2C,
    address: u8,
    tx: Vec<u8, BUFFER_LENGTH>,
    tx_overflow: bool,
    rx: Vec<u8, BUFFER_LENGTH>,
    rx_pos: usize,
}

impl<I2C: I2c> HalWire<I2C> {
    /// Create a new adapter around an I2C bus
    pub fn new(i2c: I2C) -> Self {
        Self {
            i2c,
            address: 0,
            tx: Vec::new(),
            tx_overflow: false,
            rx: Vec::new(),
            rx_pos: 0,
        }
    }

    /// Get access to the underlying bus
    pub fn inner(&mut self) -> &mut I2C {
        &mut self.i2c
    }

    /// Consume the adapter and return the underlying bus
    pub fn release(self) -> I2C {
        self.i2c
    }
}

impl<I2C: I2c> TwoWire for HalWire<I2C> {
    fn begin_transmission(&mut self, address: u8) {
        self.address = address;
        self.tx.clear();
        self.tx_overflow = false;
    }

    fn write(&mut self, byte: u8) -> usize {
        match self.tx.push(byte) {
            Ok(()) => 1,
            Err(_) => {
                self.tx_overflow = true;
                0
            }
        }
    }

    fn end_transmission(&mut self) -> TransmissionStatus {
        if self.tx_overflow {
            self.tx.clear();
            self.tx_overflow = false;
            return TransmissionStatus::DataTooLong;
        }

        let status = match self.i2c.write(self.address, &self.tx) {
            Ok(()) => TransmissionStatus::Success,
            Err(e) => TransmissionStatus::from(e.kind()),
        };
        self.tx.clear();

        status
    }

    fn request_from(&mut self, address: u8, count: u8) -> u8 {
        self.rx.clear();
        self.rx_pos = 0;

        let len = (count as usize).min(BUFFER_LENGTH);
        if len == 0 || self.rx.resize(len, 0).is_err() {
            return 0;
        }

        match self.i2c.read(address, &mut self.rx) {
            Ok(()) => len as u8,
            Err(_e) => {
                #[cfg(feature = "defmt")]
                defmt::trace!(
                    "read from 0x{=u8:X} failed: {}",
                    address,
                    TransmissionStatus::from(_e.kind())
                );
                self.rx.clear();
                0
            }
        }
    }

    fn available(&self) -> usize {
        self.rx.len() - self.rx_pos
    }

    fn read(&mut self) -> Option<u8> {
        let byte = self.rx.get(self.rx_pos).copied()?;
        self.rx_pos += 1;
        Some(byte)
    }
}
