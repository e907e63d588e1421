//! wirereg Hardware Abstraction Layer
//!
//! This crate defines the two-wire bus driver contract that the register
//! accessor in `wirereg` is written against, so the same register code can
//! run over any bus binding (or a mock bus in tests).
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Application (wirereg-scanner, etc.)    │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  wirereg (register accessor, scan)      │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  wirereg-hal (this crate - TwoWire)     │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │   HalWire     │       │  custom bus   │
//! │ (embedded-hal)│       │   bindings    │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`i2c::TwoWire`] - Transmission-style I2C bus operations

#![no_std]
#![deny(unsafe_code)]

pub mod hal_wire;
pub mod i2c;

// Re-export key types at crate root for convenience
pub use hal_wire::{HalWire, BUFFER_LENGTH};
pub use i2c::{I2cConfig, TransmissionStatus, TwoWire};
