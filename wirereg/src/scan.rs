//! Bus scanner
//!
//! Probes each candidate 7-bit address with an empty transmission and
//! records the ones that acknowledge. Addresses 0x00-0x07 and 0x78-0x7F are
//! reserved by the I2C specification and are skipped by default.

use core::fmt;

use embedded_hal::delay::DelayNs;
use heapless::Vec;
use wirereg_hal::TwoWire;

use crate::accessor::RegisterAccessor;

/// First non-reserved 7-bit address
pub const FIRST_ADDRESS: u8 = 0x08;

/// Last non-reserved 7-bit address
pub const LAST_ADDRESS: u8 = 0x77;

/// Highest address expressible in 7 bits
const MAX_ADDRESS: u8 = 0x7F;

/// Bus scan configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScanConfig {
    /// First address probed
    pub first_address: u8,
    /// Last address probed (inclusive, capped at 0x7F)
    pub last_address: u8,
    /// Settle time after each responding device, in microseconds
    pub probe_delay_us: u32,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            first_address: FIRST_ADDRESS,
            last_address: LAST_ADDRESS,
            probe_delay_us: 1_000,
        }
    }
}

/// Addresses that acknowledged during a scan, in ascending order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanReport {
    addresses: Vec<u8, 128>,
}

impl ScanReport {
    /// Responding addresses
    pub fn addresses(&self) -> &[u8] {
        &self.addresses
    }

    /// Number of responding devices
    pub fn count(&self) -> usize {
        self.addresses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.addresses.is_empty()
    }

    /// Check whether a device answered at `address`
    pub fn contains(&self, address: u8) -> bool {
        self.addresses.contains(&address)
    }
}

impl fmt::Display for ScanReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for address in &self.addresses {
            writeln!(f, "addr : 0x{:X}", address)?;
        }
        write!(f, "found {} devices", self.count())
    }
}

impl<W: TwoWire> RegisterAccessor<W> {
    /// Scan the non-reserved address range with default settings
    pub fn scan<D: DelayNs>(&mut self, delay: &mut D) -> ScanReport {
        self.scan_with(&ScanConfig::default(), delay)
    }

    /// Scan the bus for acknowledging devices
    ///
    /// Each responding address is logged as it is found, followed by the
    /// total. The write status is left untouched.
    pub fn scan_with<D: DelayNs>(&mut self, config: &ScanConfig, delay: &mut D) -> ScanReport {
        let mut report = ScanReport::default();
        let last = config.last_address.min(MAX_ADDRESS);

        for address in config.first_address..=last {
            let wire = self.wire();
            wire.begin_transmission(address);
            if wire.end_transmission().is_success() {
                #[cfg(feature = "defmt")]
                defmt::info!("addr : 0x{=u8:X}", address);

                // Capacity covers the whole 7-bit space
                let _ = report.addresses.push(address);
                delay.delay_us(config.probe_delay_us);
            }
        }

        #[cfg(feature = "defmt")]
        defmt::info!("found {=usize} devices", report.count());

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockWire;

    /// Delay that only records how long it was asked to wait
    #[derive(Default)]
    struct MockDelay {
        calls: usize,
        total_ns: u64,
    }

    impl DelayNs for MockDelay {
        fn delay_ns(&mut self, ns: u32) {
            self.calls += 1;
            self.total_ns += ns as u64;
        }
    }

    #[test]
    fn test_scan_reports_known_devices() {
        let mut bus = MockWire::with_devices(&[0x68, 0x1E, 0x3C]);
        let mut acc = RegisterAccessor::attach(&mut bus);
        let mut delay = MockDelay::default();

        let report = acc.scan(&mut delay);

        assert_eq!(report.addresses(), &[0x1E, 0x3C, 0x68]);
        assert_eq!(report.count(), 3);
        assert!(report.contains(0x3C));
        assert!(!report.contains(0x3D));
        // One settle delay per responding device
        assert_eq!(delay.total_ns, 3 * 1_000_000);
    }

    #[test]
    fn test_scan_skips_reserved_addresses() {
        let mut bus = MockWire::with_devices(&[0x00, 0x07, 0x08, 0x77, 0x78, 0x7F]);
        let mut acc = RegisterAccessor::attach(&mut bus);

        let report = acc.scan(&mut MockDelay::default());
        assert_eq!(report.addresses(), &[0x08, 0x77]);
        drop(acc);

        assert_eq!(bus.transmissions.len(), 112);
        assert_eq!(bus.transmissions.first(), Some(&0x08));
        assert_eq!(bus.transmissions.last(), Some(&0x77));
    }

    #[test]
    fn test_empty_bus() {
        let mut bus = MockWire::with_devices(&[]);
        let mut acc = RegisterAccessor::attach(&mut bus);
        let mut delay = MockDelay::default();

        let report = acc.scan(&mut delay);
        assert!(report.is_empty());
        assert_eq!(delay.calls, 0);
        assert_eq!(report.to_string(), "found 0 devices");
    }

    #[test]
    fn test_scan_does_not_touch_status() {
        let mut bus = MockWire::with_devices(&[0x40]);
        let mut acc = RegisterAccessor::attach(&mut bus);

        acc.scan(&mut MockDelay::default());
        assert!(acc.status().is_success());
    }

    #[test]
    fn test_scan_with_custom_range() {
        let mut bus = MockWire::with_devices(&[0x03, 0x20, 0x50, 0x7E]);
        let mut acc = RegisterAccessor::attach(&mut bus);
        let config = ScanConfig {
            first_address: 0x00,
            last_address: 0xFF,
            probe_delay_us: 0,
        };

        let report = acc.scan_with(&config, &mut MockDelay::default());
        assert_eq!(report.addresses(), &[0x03, 0x20, 0x50, 0x7E]);
        drop(acc);

        // Never probes beyond 7 bits
        assert_eq!(bus.transmissions.len(), 128);
    }

    #[test]
    fn test_report_display() {
        let mut bus = MockWire::with_devices(&[0x3C, 0x68]);
        let mut acc = RegisterAccessor::attach(&mut bus);

        let report = acc.scan(&mut MockDelay::default());
        assert_eq!(
            report.to_string(),
            "addr : 0x3C\naddr : 0x68\nfound 2 devices"
        );
    }
}
