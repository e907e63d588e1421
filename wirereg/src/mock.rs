//! In-memory two-wire bus for tests

use std::collections::{BTreeMap, VecDeque};

use wirereg_hal::{TransmissionStatus, TwoWire};

/// Register-file device with an auto-incrementing register pointer
struct MockDevice {
    regs: [u8; 256],
    pointer: u8,
}

/// Bus with a set of register-file devices attached
///
/// Transmissions to an absent address are not acknowledged. Writes echo
/// into the device's registers, so a read after a write returns the data.
pub(crate) struct MockWire {
    devices: BTreeMap<u8, MockDevice>,
    address: u8,
    tx: Vec<u8>,
    rx: VecDeque<u8>,
    read_limit: Option<usize>,
    pub(crate) transmissions: Vec<u8>,
}

impl MockWire {
    pub(crate) fn with_devices(addresses: &[u8]) -> Self {
        let devices = addresses
            .iter()
            .map(|&a| {
                (
                    a,
                    MockDevice {
                        regs: [0; 256],
                        pointer: 0,
                    },
                )
            })
            .collect();

        Self {
            devices,
            address: 0,
            tx: Vec::new(),
            rx: VecDeque::new(),
            read_limit: None,
            transmissions: Vec::new(),
        }
    }

    /// Cap the number of bytes any single request returns
    pub(crate) fn set_read_limit(&mut self, limit: Option<usize>) {
        self.read_limit = limit;
    }

    pub(crate) fn set_register(&mut self, device: u8, register: u8, value: u8) {
        if let Some(dev) = self.devices.get_mut(&device) {
            dev.regs[register as usize] = value;
        }
    }

    pub(crate) fn register(&self, device: u8, register: u8) -> u8 {
        self.devices
            .get(&device)
            .map_or(0, |dev| dev.regs[register as usize])
    }
}

impl TwoWire for MockWire {
    fn begin_transmission(&mut self, address: u8) {
        self.address = address;
        self.tx.clear();
        self.transmissions.push(address);
    }

    fn write(&mut self, byte: u8) -> usize {
        self.tx.push(byte);
        1
    }

    fn end_transmission(&mut self) -> TransmissionStatus {
        let Some(dev) = self.devices.get_mut(&self.address) else {
            return TransmissionStatus::AddressNack;
        };

        if let Some((&reg, data)) = self.tx.split_first() {
            dev.pointer = reg;
            for &b in data {
                dev.regs[dev.pointer as usize] = b;
                dev.pointer = dev.pointer.wrapping_add(1);
            }
        }

        TransmissionStatus::Success
    }

    fn request_from(&mut self, address: u8, count: u8) -> u8 {
        self.rx.clear();

        let Some(dev) = self.devices.get_mut(&address) else {
            return 0;
        };

        let n = self
            .read_limit
            .map_or(count as usize, |limit| limit.min(count as usize));
        for _ in 0..n {
            self.rx.push_back(dev.regs[dev.pointer as usize]);
            dev.pointer = dev.pointer.wrapping_add(1);
        }

        n as u8
    }

    fn available(&self) -> usize {
        self.rx.len()
    }

    fn read(&mut self) -> Option<u8> {
        self.rx.pop_front()
    }
}
