//! Register accessor
//!
//! [`RegisterAccessor`] layers register-oriented reads and writes over a
//! [`TwoWire`] bus: whole bytes and big-endian words, runs of either, and
//! single bits or bit fields updated by read-modify-write.
//!
//! # Transactions
//!
//! Reads address the register with one transmission and then request the
//! data:
//!
//! ```text
//! [S] dev+W  reg  [P]   [S] dev+R  data...  [P]
//! ```
//!
//! Writes send the register and the data in a single transmission:
//!
//! ```text
//! [S] dev+W  reg  data...  [P]
//! ```
//!
//! Only writes record a [`TransmissionStatus`]; reads report how many units
//! arrived and leave the status untouched.

use wirereg_hal::{TransmissionStatus, TwoWire};

use crate::field::{bit_mask, set_bit, BitField};

/// Register read/write helper over a two-wire bus
///
/// The bus is typically borrowed (`&mut bus`), so the caller keeps
/// ownership of the driver and gets it back once the accessor is dropped.
pub struct RegisterAccessor<W> {
    wire: W,
    status: TransmissionStatus,
}

impl<W: TwoWire> RegisterAccessor<W> {
    /// Attach an accessor to a bus
    pub fn attach(wire: W) -> Self {
        Self {
            wire,
            status: TransmissionStatus::Success,
        }
    }

    /// Detach from the bus and hand it back
    pub fn release(self) -> W {
        self.wire
    }

    /// Get access to the underlying bus
    pub fn wire(&mut self) -> &mut W {
        &mut self.wire
    }

    /// Status of the most recent write transaction
    pub fn status(&self) -> TransmissionStatus {
        self.status
    }

    /// Read a register byte and keep only `bit` in place
    ///
    /// Returns zero if the bit is clear, non-zero otherwise.
    pub fn read_bit(&mut self, device: u8, register: u8, bit: u8) -> u8 {
        self.read_byte(device, register) & bit_mask::<u8>(bit)
    }

    /// Read a register word and keep only `bit` in place
    pub fn read_bit_word(&mut self, device: u8, register: u8, bit: u8) -> u16 {
        self.read_word(device, register) & bit_mask::<u16>(bit)
    }

    /// Read a bit field from a register byte
    ///
    /// `bit_begin` is the field's most-significant bit.
    pub fn read_bits(&mut self, device: u8, register: u8, bit_begin: u8, size: u8) -> u8 {
        BitField::new(bit_begin, size).extract(self.read_byte(device, register))
    }

    /// Read a bit field from a register word
    pub fn read_bits_word(&mut self, device: u8, register: u8, bit_begin: u8, size: u8) -> u16 {
        BitField::new(bit_begin, size).extract(self.read_word(device, register))
    }

    /// Read one register byte
    ///
    /// A failed read yields 0.
    pub fn read_byte(&mut self, device: u8, register: u8) -> u8 {
        let mut data = [0u8; 1];
        self.read_bytes(device, register, &mut data);
        data[0]
    }

    /// Read one big-endian register word
    pub fn read_word(&mut self, device: u8, register: u8) -> u16 {
        let mut data = [0u16; 1];
        self.read_words(device, register, &mut data);
        data[0]
    }

    /// Read consecutive register bytes into `data`
    ///
    /// Returns the number of bytes received, which is less than
    /// `data.len()` when the device sends short.
    pub fn read_bytes(&mut self, device: u8, register: u8, data: &mut [u8]) -> usize {
        self.select_register(device, register);
        self.wire.request_from(device, request_len(data.len()));

        let mut count = 0;
        while count < data.len() && self.wire.available() > 0 {
            match self.wire.read() {
                Some(byte) => {
                    data[count] = byte;
                    count += 1;
                }
                None => break,
            }
        }

        count
    }

    /// Read consecutive big-endian register words into `data`
    ///
    /// Returns the number of complete words received. A trailing high
    /// byte without its low byte is stored but not counted.
    pub fn read_words(&mut self, device: u8, register: u8, data: &mut [u16]) -> usize {
        self.select_register(device, register);
        self.wire
            .request_from(device, request_len(data.len().saturating_mul(2)));

        let mut count = 0;
        let mut msb = true;
        while count < data.len() && self.wire.available() > 0 {
            let Some(byte) = self.wire.read() else {
                break;
            };
            if msb {
                data[count] = (byte as u16) << 8;
            } else {
                data[count] |= byte as u16;
                count += 1;
            }
            msb = !msb;
        }

        count
    }

    /// Set (`data != 0`) or clear a single bit of a register byte
    pub fn write_bit(&mut self, device: u8, register: u8, bit: u8, data: u8) -> bool {
        let b = self.read_byte(device, register);
        self.write_byte(device, register, set_bit(b, bit, data != 0))
    }

    /// Set (`data != 0`) or clear a single bit of a register word
    pub fn write_bit_word(&mut self, device: u8, register: u8, bit: u8, data: u16) -> bool {
        let w = self.read_word(device, register);
        self.write_word(device, register, set_bit(w, bit, data != 0))
    }

    /// Replace a bit field of a register byte, leaving other bits as read
    pub fn write_bits(
        &mut self,
        device: u8,
        register: u8,
        bit_begin: u8,
        size: u8,
        data: u8,
    ) -> bool {
        let b = self.read_byte(device, register);
        let b = BitField::new(bit_begin, size).insert(b, data);
        self.write_byte(device, register, b)
    }

    /// Replace a bit field of a register word, leaving other bits as read
    pub fn write_bits_word(
        &mut self,
        device: u8,
        register: u8,
        bit_begin: u8,
        size: u8,
        data: u16,
    ) -> bool {
        let w = self.read_word(device, register);
        let w = BitField::new(bit_begin, size).insert(w, data);
        self.write_word(device, register, w)
    }

    /// Write one register byte
    pub fn write_byte(&mut self, device: u8, register: u8, data: u8) -> bool {
        self.write_bytes(device, register, &[data])
    }

    /// Write one big-endian register word
    pub fn write_word(&mut self, device: u8, register: u8, data: u16) -> bool {
        self.write_words(device, register, &[data])
    }

    /// Write consecutive register bytes in one transaction
    ///
    /// Returns `true` if the device acknowledged; the full result is
    /// available from [`status`](Self::status).
    pub fn write_bytes(&mut self, device: u8, register: u8, data: &[u8]) -> bool {
        self.wire.begin_transmission(device);
        self.wire.write(register);
        self.wire.write_bytes(data);
        self.finish_write(device)
    }

    /// Write consecutive big-endian register words in one transaction
    pub fn write_words(&mut self, device: u8, register: u8, data: &[u16]) -> bool {
        self.wire.begin_transmission(device);
        self.wire.write(register);
        for word in data {
            self.wire.write_bytes(&word.to_be_bytes());
        }
        self.finish_write(device)
    }

    /// Addressing phase of a register read
    fn select_register(&mut self, device: u8, register: u8) {
        self.wire.begin_transmission(device);
        self.wire.write(register);
        let _status = self.wire.end_transmission();

        #[cfg(feature = "defmt")]
        if !_status.is_success() {
            defmt::trace!(
                "select 0x{=u8:X}/0x{=u8:X}: {}",
                device,
                register,
                _status
            );
        }
    }

    fn finish_write(&mut self, _device: u8) -> bool {
        self.status = self.wire.end_transmission();

        #[cfg(feature = "defmt")]
        if !self.status.is_success() {
            defmt::debug!("write to 0x{=u8:X} failed: {}", _device, self.status);
        }

        self.status.is_success()
    }
}

/// Byte count for a bus request, saturated to what the contract can express
fn request_len(len: usize) -> u8 {
    u8::try_from(len).unwrap_or(u8::MAX)
}
