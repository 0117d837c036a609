use crate::constants::*;
use crate::error::Status;
use crate::transport::Transport;

use embedded_hal::delay::DelayNs;

/// ADS1110 driver
pub struct Ads1110<BUS, DELAY> {
    bus: BUS,
    delay: DELAY,
    address: u8,
    config: Config,
    com_result: Status,
    vref: VoltageReference,
}

impl<BUS, DELAY> Ads1110<BUS, DELAY>
where
    BUS: Transport,
    DELAY: DelayNs,
{
    /// Creates a new ADS1110 driver instance
    ///
    /// The mirrored configuration starts at the power-on default (gain x1,
    /// 15 SPS, continuous) and the voltage reference at
    /// [`VoltageReference::Internal`].
    pub fn new(bus: BUS, delay: DELAY, address: u8) -> Self {
        Ads1110 {
            bus,
            delay,
            address,
            config: Config::default(),
            com_result: Status::Success,
            vref: VoltageReference::Internal,
        }
    }

    /// Returns the mirrored PGA gain
    pub fn gain(&self) -> Gain {
        self.config.gain
    }

    /// Returns the mirrored sample rate
    pub fn sample_rate(&self) -> SampleRate {
        self.config.sample_rate
    }

    /// Returns the resolution implied by the mirrored sample rate
    pub fn resolution(&self) -> Resolution {
        self.config.sample_rate.resolution()
    }

    /// Returns the mirrored conversion mode
    pub fn conversion_mode(&self) -> ConversionMode {
        self.config.mode
    }

    /// Returns the mirrored configuration register
    ///
    /// The mirror is authoritative only if the last write was confirmed;
    /// check [`com_result`](Self::com_result) after any setter.
    pub fn config(&self) -> Config {
        self.config
    }

    /// Returns the configured voltage reference
    pub fn vref(&self) -> VoltageReference {
        self.vref
    }

    /// Returns the completion status of the last recorded bus transaction
    pub fn com_result(&self) -> Status {
        self.com_result
    }

    /// Sets the PGA gain
    pub fn set_gain(&mut self, gain: Gain) {
        self.write_config(self.config.with_gain(gain));
    }

    /// Sets the sample rate, which also selects resolution and min-code
    pub fn set_sample_rate(&mut self, sample_rate: SampleRate) {
        self.write_config(self.config.with_sample_rate(sample_rate));
    }

    /// Sets the conversion mode
    pub fn set_conversion_mode(&mut self, mode: ConversionMode) {
        self.write_config(self.config.with_mode(mode));
    }

    /// Sets the resolution by selecting the sample rate that produces it
    pub fn set_resolution(&mut self, resolution: Resolution) {
        self.set_sample_rate(resolution.sample_rate());
    }

    /// Sets the voltage reference used for unit conversion. Local state
    /// only; no bus traffic.
    pub fn set_vref(&mut self, vref: VoltageReference) {
        self.vref = vref;
    }

    /// Restores the power-on default configuration
    pub fn reset(&mut self) {
        self.write_config(Config::default());
    }

    /// Probes the device by transmitting the current config byte.
    ///
    /// Returns the transport's completion status without recording it in
    /// the mirror field, so a probe never masks the status of a prior
    /// transaction.
    pub fn ping(&mut self) -> Status {
        self.bus.begin_transmission(self.address);
        self.bus.write(self.config.encode());
        Status::from_code(self.bus.end_transmission())
    }

    /// Fetches one conversion result.
    ///
    /// In single-shot mode a new conversion is triggered first and the
    /// minimum conversion time is waited out. The device is then polled up
    /// to three times for a 3-byte response; a set busy flag in the echoed
    /// config byte earns one more base-unit wait per attempt.
    ///
    /// Returns 0 when the device cannot be reached or a malformed response
    /// forces resynchronization; check [`com_result`](Self::com_result) to
    /// tell a genuine zero sample apart. If the attempts are exhausted
    /// without a ready sample, continuous mode returns the last fetched
    /// value even though its readiness was never confirmed, while
    /// single-shot mode returns 0.
    pub fn read_data(&mut self) -> i16 {
        if self.config.mode == ConversionMode::SingleShot {
            self.begin_write(self.config.with_start().encode());
            self.end_write();
            let settle = MIN_CON_TIME_MS * u32::from(self.config.sample_rate.min_code());
            self.delay.delay_ms(settle);
        }
        if !self.ping().is_ok() {
            return 0;
        }
        let mut data: u16 = 0;
        let mut attempts = 0;
        while attempts < MAX_NUM_ATTEMPTS {
            self.bus.request_from(self.address, NUM_BYTES);
            if self.bus.available() == NUM_BYTES {
                data = u16::from(self.bus.read()) << 8 | u16::from(self.bus.read());
                let echoed = Config::decode(self.bus.read());
                log::debug!("raw sample: 0x{:04X}, echoed config: 0x{:02X}", data, echoed.encode());
                if echoed.busy() {
                    self.delay.delay_ms(MIN_CON_TIME_MS);
                    attempts += 1;
                } else {
                    return to_signed(data);
                }
            } else {
                log::error!("short read, resynchronizing");
                self.drain_receive_buffer();
                self.com_result = self.ping();
                attempts = MAX_NUM_ATTEMPTS;
                data = 0;
            }
        }
        if self.config.mode == ConversionMode::Continuous {
            self.com_result = self.ping();
            return to_signed(data);
        }
        0
    }

    /// Reads a conversion result and converts it to millivolts.
    ///
    /// May legitimately be negative for a bipolar input.
    pub fn read_voltage(&mut self) -> f64 {
        let data = self.read_data();
        let full_scale = i32::from(self.config.sample_rate.min_code()) << 11;
        let divisor = full_scale * i32::from(self.config.gain.value());
        f64::from(data) * f64::from(self.vref.millivolts()) / f64::from(divisor)
    }

    /// Reads a conversion result rescaled to 0-100% of the full-scale range
    pub fn read_percent(&mut self) -> u8 {
        let full_scale = i32::from(self.config.sample_rate.min_code()) << 11;
        let percent = mapf(
            f64::from(self.read_data()),
            f64::from(-full_scale),
            f64::from(full_scale - 1),
            0.0,
            100.0,
        );
        (percent + 0.5) as u8
    }

    /// Reads the configuration register back from the device.
    ///
    /// The two data bytes of the response are discarded. On a malformed
    /// response the receive buffer is drained and the ping-derived
    /// diagnostic code is recorded and returned as the error.
    pub fn read_device_config(&mut self) -> Result<Config, Status> {
        self.bus.request_from(self.address, NUM_BYTES);
        if self.bus.available() == NUM_BYTES {
            self.bus.read();
            self.bus.read();
            Ok(Config::decode(self.bus.read()))
        } else {
            self.drain_receive_buffer();
            let status = self.ping();
            self.com_result = status;
            Err(status)
        }
    }

    /// Submits a config byte; the mirror is updated only on confirmed
    /// transmission.
    fn write_config(&mut self, config: Config) {
        log::debug!("writing config register: 0x{:02X}", config.encode());
        self.begin_write(config.encode());
        if self.end_write().is_ok() {
            self.config = config;
        } else {
            log::error!("config write rejected: {:?}", self.com_result);
        }
    }

    fn begin_write(&mut self, byte: u8) {
        self.bus.begin_transmission(self.address);
        self.bus.write(byte);
    }

    fn end_write(&mut self) -> Status {
        let status = Status::from_code(self.bus.end_transmission());
        self.com_result = status;
        status
    }

    /// Discards unread bytes so the next transaction starts clean
    fn drain_receive_buffer(&mut self) {
        while self.bus.available() > 0 {
            self.bus.read();
        }
    }
}

/// Rebases a raw 16-bit unsigned pattern into the signed sample range.
///
/// Transport bytes are unsigned; values at or above 32768 wrap to the
/// negative half of the range.
fn to_signed(raw: u16) -> i16 {
    if raw >= 32768 {
        (i32::from(raw) - 65536) as i16
    } else {
        raw as i16
    }
}

/// Linearly rescales `val` from one range to another
pub fn mapf(val: f64, in_min: f64, in_max: f64, out_min: f64, out_max: f64) -> f64 {
    (val - in_min) * (out_max - out_min) / (in_max - in_min) + out_min
}
