//! wirereg bus scanner
//!
//! Firmware for RP2040 boards that periodically scans I2C0 for attached
//! devices and logs every responding address over defmt-RTT.
//!
//! # Wiring
//!
//! - **SDA:** GPIO4
//! - **SCL:** GPIO5

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::i2c::{self, Blocking, I2c};
use embassy_rp::peripherals::I2C0;
use embassy_time::{Delay, Duration, Timer};
use {defmt_rtt as _, panic_probe as _};

use wirereg::{HalAccessor, HalWire, RegisterAccessor, ScanConfig};
use wirereg_hal::I2cConfig;

/// Bus speed used for scanning
const BUS_CONFIG: I2cConfig = I2cConfig::STANDARD;

/// Pause between scans
const SCAN_INTERVAL: Duration = Duration::from_secs(5);

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("wirereg scanner starting...");

    let p = embassy_rp::init(Default::default());

    let mut config = i2c::Config::default();
    config.frequency = BUS_CONFIG.frequency;
    let i2c = I2c::new_blocking(p.I2C0, p.PIN_5, p.PIN_4, config);
    info!("I2C0 configured at {} Hz", BUS_CONFIG.frequency);

    let accessor = RegisterAccessor::attach(HalWire::new(i2c));
    spawner.spawn(scan_task(accessor)).unwrap();
}

/// Periodic bus scan task
#[embassy_executor::task]
async fn scan_task(mut accessor: HalAccessor<I2c<'static, I2C0, Blocking>>) {
    let scan_config = ScanConfig::default();
    let mut delay = Delay;

    loop {
        info!(
            "Scanning 0x{=u8:X}..=0x{=u8:X}",
            scan_config.first_address, scan_config.last_address
        );

        let report = accessor.scan_with(&scan_config, &mut delay);
        if report.is_empty() {
            warn!("No devices found, check wiring and pull-ups");
        }

        Timer::after(SCAN_INTERVAL).await;
    }
}
