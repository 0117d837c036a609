// demos/read_voltage.rs
//
// Walks through configuring the converter and reading engineering units.
// Runs against a simulated bus so it works without hardware; on a real
// board, implement `Transport` over the platform's I2C peripheral and
// `DelayNs` over its timer.

use std::collections::VecDeque;
use std::time::Duration;

use embedded_hal::delay::DelayNs;

use ads1110::{Ads1110, ConversionMode, Gain, Resolution, Transport, DEFAULT_ADDRESS};

/// Simulated bus: acknowledges every transmission and serves a fixed
/// conversion result of 19866 counts (1241.6 mV at gain x1, 16-bit).
struct SimulatedBus {
    rx: VecDeque<u8>,
}

impl Transport for SimulatedBus {
    fn begin_transmission(&mut self, _address: u8) {}

    fn write(&mut self, _byte: u8) {}

    fn end_transmission(&mut self) -> u8 {
        0
    }

    fn request_from(&mut self, _address: u8, count: u8) -> u8 {
        self.rx.clear();
        self.rx.extend([0x4D, 0x9A, 0x1C]);
        count
    }

    fn available(&mut self) -> u8 {
        self.rx.len() as u8
    }

    fn read(&mut self) -> u8 {
        self.rx.pop_front().unwrap_or(0)
    }
}

struct Sleep;

impl DelayNs for Sleep {
    fn delay_ns(&mut self, ns: u32) {
        std::thread::sleep(Duration::from_nanos(u64::from(ns)));
    }
}

fn main() {
    let bus = SimulatedBus { rx: VecDeque::new() };

    let mut adc = Ads1110::new(bus, Sleep, DEFAULT_ADDRESS);

    adc.set_gain(Gain::Gain1);
    adc.set_resolution(Resolution::Bits16);
    adc.set_conversion_mode(ConversionMode::SingleShot);
    if !adc.com_result().is_ok() {
        println!("configuration failed: {:?}", adc.com_result());
        return;
    }

    let raw = adc.read_data();
    println!("Raw code: {}", raw);
    println!("Voltage: {:.1} mV", adc.read_voltage());
    println!("Full scale: {}%", adc.read_percent());
}
