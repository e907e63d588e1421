//! Register bit-field arithmetic
//!
//! Fields are addressed by the index of their most-significant bit and
//! their width, so a 3-bit field occupying bits 4..=2 is `BitField::new(4, 3)`.
//! The shift that right-justifies a field is therefore
//! `high_bit - width + 1`.
//!
//! Descriptors are not validated. All arithmetic is done in 32-bit space and
//! truncated to the register width, so a field that does not fit its
//! register produces a wrong mask rather than a panic.

/// Register width a field can live in
pub trait RegisterValue: Copy + Default + PartialEq {
    /// Widen to 32 bits
    fn to_bits(self) -> u32;

    /// Truncate from 32 bits
    fn from_bits(bits: u32) -> Self;
}

impl RegisterValue for u8 {
    fn to_bits(self) -> u32 {
        self as u32
    }

    fn from_bits(bits: u32) -> Self {
        bits as u8
    }
}

impl RegisterValue for u16 {
    fn to_bits(self) -> u32 {
        self as u32
    }

    fn from_bits(bits: u32) -> Self {
        bits as u16
    }
}

/// Contiguous run of bits within a register
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BitField {
    /// Index of the field's most-significant bit
    pub high_bit: u8,
    /// Field width in bits
    pub width: u8,
}

impl BitField {
    /// Describe a field by its high bit and width
    pub const fn new(high_bit: u8, width: u8) -> Self {
        Self { high_bit, width }
    }

    /// Position of the field's least-significant bit
    pub const fn shift(self) -> u32 {
        (self.high_bit as u32 + 1).wrapping_sub(self.width as u32)
    }

    fn ones(self) -> u32 {
        match 1u32.checked_shl(self.width as u32) {
            Some(v) => v - 1,
            None => u32::MAX,
        }
    }

    fn mask_bits(self) -> u32 {
        self.ones().checked_shl(self.shift()).unwrap_or(0)
    }

    /// Mask selecting the field's bits in place
    pub fn mask<T: RegisterValue>(self) -> T {
        T::from_bits(self.mask_bits())
    }

    /// Extract the field from a register value, right-justified
    pub fn extract<T: RegisterValue>(self, value: T) -> T {
        let masked = value.to_bits() & self.mask::<T>().to_bits();
        T::from_bits(masked.checked_shr(self.shift()).unwrap_or(0))
    }

    /// Replace the field in `current` with `data`
    ///
    /// `data` is right-justified; bits that do not fit the field are dropped.
    pub fn insert<T: RegisterValue>(self, current: T, data: T) -> T {
        let mask = self.mask::<T>().to_bits();
        // Truncate after shifting, as a register-width shift would
        let shifted = T::from_bits(data.to_bits().checked_shl(self.shift()).unwrap_or(0));
        T::from_bits((current.to_bits() & !mask) | (shifted.to_bits() & mask))
    }
}

/// Mask with only `bit` set, or zero if `bit` is outside 32-bit space
pub fn bit_mask<T: RegisterValue>(bit: u8) -> T {
    T::from_bits(1u32.checked_shl(bit as u32).unwrap_or(0))
}

/// Set or clear a single bit
pub fn set_bit<T: RegisterValue>(value: T, bit: u8, on: bool) -> T {
    let mask = bit_mask::<T>(bit).to_bits();
    if on {
        T::from_bits(value.to_bits() | mask)
    } else {
        T::from_bits(value.to_bits() & !mask)
    }
}
