//! Two-wire bus abstractions
//!
//! Provides the transmission-oriented bus driver contract that the register
//! accessor is written against, the status codes a transmission can finish
//! with, and bus configuration.

use embedded_hal::i2c::{ErrorKind, NoAcknowledgeSource};

/// Two-wire bus master, transmission style
///
/// A transmission is opened with [`begin_transmission`](Self::begin_transmission),
/// filled with [`write`](Self::write) and sent by
/// [`end_transmission`](Self::end_transmission). Reads are requested with
/// [`request_from`](Self::request_from) and then drained byte by byte.
pub trait TwoWire {
    /// Start queueing a transmission to a device
    ///
    /// # Arguments
    /// * `address` - 7-bit I2C address
    fn begin_transmission(&mut self, address: u8);

    /// Queue one byte for the current transmission
    ///
    /// Returns the number of bytes queued (0 or 1).
    fn write(&mut self, byte: u8) -> usize;

    /// Queue several bytes for the current transmission
    ///
    /// Returns the number of bytes queued.
    fn write_bytes(&mut self, bytes: &[u8]) -> usize {
        bytes.iter().map(|&b| self.write(b)).sum()
    }

    /// Send the queued transmission and release the bus
    fn end_transmission(&mut self) -> TransmissionStatus;

    /// Read up to `count` bytes from a device into the receive buffer
    ///
    /// Returns the number of bytes actually received.
    fn request_from(&mut self, address: u8, count: u8) -> u8;

    /// Number of received bytes not yet consumed by [`read`](Self::read)
    fn available(&self) -> usize;

    /// Take the next received byte
    fn read(&mut self) -> Option<u8>;
}

impl<T: TwoWire + ?Sized> TwoWire for &mut T {
    fn begin_transmission(&mut self, address: u8) {
        T::begin_transmission(self, address)
    }

    fn write(&mut self, byte: u8) -> usize {
        T::write(self, byte)
    }

    fn write_bytes(&mut self, bytes: &[u8]) -> usize {
        T::write_bytes(self, bytes)
    }

    fn end_transmission(&mut self) -> TransmissionStatus {
        T::end_transmission(self)
    }

    fn request_from(&mut self, address: u8, count: u8) -> u8 {
        T::request_from(self, address, count)
    }

    fn available(&self) -> usize {
        T::available(self)
    }

    fn read(&mut self) -> Option<u8> {
        T::read(self)
    }
}

/// Result of a finished transmission
///
/// Mirrors the numeric convention of two-wire drivers, where 0 means the
/// transmission was acknowledged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TransmissionStatus {
    /// Acknowledged
    #[default]
    Success,
    /// Data too long to fit in the transmit buffer
    DataTooLong,
    /// NACK received on transmit of the address
    AddressNack,
    /// NACK received on transmit of data
    DataNack,
    /// Other bus error
    Other,
    /// Bus timeout
    Timeout,
    /// Driver-specific code outside the conventional range
    Unknown(u8),
}

impl TransmissionStatus {
    /// Raw status code (0 = success)
    pub const fn code(self) -> u8 {
        match self {
            Self::Success => 0,
            Self::DataTooLong => 1,
            Self::AddressNack => 2,
            Self::DataNack => 3,
            Self::Other => 4,
            Self::Timeout => 5,
            Self::Unknown(code) => code,
        }
    }

    /// Check whether the transmission was acknowledged
    pub const fn is_success(self) -> bool {
        matches!(self, Self::Success)
    }
}

impl From<u8> for TransmissionStatus {
    fn from(code: u8) -> Self {
        match code {
            0 => Self::Success,
            1 => Self::DataTooLong,
            2 => Self::AddressNack,
            3 => Self::DataNack,
            4 => Self::Other,
            5 => Self::Timeout,
            n => Self::Unknown(n),
        }
    }
}

impl From<TransmissionStatus> for u8 {
    fn from(status: TransmissionStatus) -> Self {
        status.code()
    }
}

impl From<ErrorKind> for TransmissionStatus {
    fn from(kind: ErrorKind) -> Self {
        match kind {
            ErrorKind::NoAcknowledge(NoAcknowledgeSource::Data) => Self::DataNack,
            // Unknown-source NACKs are almost always a missing device
            ErrorKind::NoAcknowledge(_) => Self::AddressNack,
            _ => Self::Other,
        }
    }
}

/// I2C configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct I2cConfig {
    /// Clock frequency in Hz
    pub frequency: u32,
}

impl Default for I2cConfig {
    fn default() -> Self {
        Self::STANDARD
    }
}

impl I2cConfig {
    /// Standard mode (100 kHz)
    pub const STANDARD: Self = Self { frequency: 100_000 };

    /// Fast mode (400 kHz)
    pub const FAST: Self = Self { frequency: 400_000 };

    /// Fast mode plus (1 MHz)
    pub const FAST_PLUS: Self = Self {
        frequency: 1_000_000,
    };
}
