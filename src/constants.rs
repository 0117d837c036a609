/// Factory-programmed I2C address of the ADS1110-A0 variant.
pub const DEFAULT_ADDRESS: u8 = 0x48;

/// Configuration register field masks
pub const GAIN_MASK: u8 = 0x03;
pub const SPS_MASK: u8 = 0x0C;
pub const CON_MODE_MASK: u8 = 0x10;
/// Bit 7 is written as the single-shot start trigger and read back as the
/// conversion-in-progress flag.
pub const ST_DRDY_MASK: u8 = 0x80;

/// A conversion response is two data bytes followed by the echoed config byte.
pub const NUM_BYTES: u8 = 3;
/// Poll attempts per acquisition before giving up.
pub const MAX_NUM_ATTEMPTS: u8 = 3;
/// Base conversion-time unit in milliseconds. Multiplied by the min-code of
/// the active sample rate it spans one conversion period at every rate
/// (64 ms at 15 SPS down to 4 ms at 240 SPS).
pub const MIN_CON_TIME_MS: u32 = 4;

/// Gain settings for the ADS1110 programmable gain amplifier (PGA)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum Gain {
    Gain1 = 0b00,
    Gain2 = 0b01,
    Gain4 = 0b10,
    Gain8 = 0b11,
}

impl Gain {
    /// Returns the PGA multiplier (1, 2, 4 or 8)
    pub fn value(self) -> u8 {
        1 << (self as u8)
    }

    pub(crate) fn from_bits(byte: u8) -> Self {
        match byte & GAIN_MASK {
            0b00 => Gain::Gain1,
            0b01 => Gain::Gain2,
            0b10 => Gain::Gain4,
            _ => Gain::Gain8,
        }
    }
}

/// Sample rates for the ADS1110
///
/// The rate fixes the conversion resolution and the min-code scale constant
/// used for unit conversion; the three always travel together.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum SampleRate {
    Sps240 = 0x00,
    Sps60 = 0x04,
    Sps30 = 0x08,
    Sps15 = 0x0C,
}

struct RateProps {
    sps: u16,
    resolution: Resolution,
    min_code: u8,
}

/// Properties linked to each sample-rate code, indexed by bits 2-3 of the
/// configuration register.
static RATE_TABLE: [RateProps; 4] = [
    RateProps {
        sps: 240,
        resolution: Resolution::Bits12,
        min_code: 1,
    },
    RateProps {
        sps: 60,
        resolution: Resolution::Bits14,
        min_code: 4,
    },
    RateProps {
        sps: 30,
        resolution: Resolution::Bits15,
        min_code: 8,
    },
    RateProps {
        sps: 15,
        resolution: Resolution::Bits16,
        min_code: 16,
    },
];

impl SampleRate {
    fn props(self) -> &'static RateProps {
        &RATE_TABLE[(self as u8 >> 2) as usize]
    }

    /// Returns the rate in samples per second
    pub fn sps(self) -> u16 {
        self.props().sps
    }

    /// Returns the conversion resolution produced at this rate
    pub fn resolution(self) -> Resolution {
        self.props().resolution
    }

    /// Returns the min-code scale constant relating raw codes to the
    /// full-scale range
    pub fn min_code(self) -> u8 {
        self.props().min_code
    }

    pub(crate) fn from_bits(byte: u8) -> Self {
        match byte & SPS_MASK {
            0x00 => SampleRate::Sps240,
            0x04 => SampleRate::Sps60,
            0x08 => SampleRate::Sps30,
            _ => SampleRate::Sps15,
        }
    }
}

/// Conversion resolutions for the ADS1110
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Resolution {
    Bits12,
    Bits14,
    Bits15,
    Bits16,
}

impl Resolution {
    /// Returns the resolution in bits
    pub fn bits(self) -> u8 {
        match self {
            Resolution::Bits12 => 12,
            Resolution::Bits14 => 14,
            Resolution::Bits15 => 15,
            Resolution::Bits16 => 16,
        }
    }

    /// Returns the sample rate that produces this resolution
    pub fn sample_rate(self) -> SampleRate {
        match self {
            Resolution::Bits12 => SampleRate::Sps240,
            Resolution::Bits14 => SampleRate::Sps60,
            Resolution::Bits15 => SampleRate::Sps30,
            Resolution::Bits16 => SampleRate::Sps15,
        }
    }
}

/// Conversion modes for the ADS1110
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum ConversionMode {
    /// The device free-runs, continuously producing fresh conversions
    Continuous = 0x00,
    /// One conversion per explicit trigger, then idle
    SingleShot = 0x10,
}

impl ConversionMode {
    pub(crate) fn from_bits(byte: u8) -> Self {
        if byte & CON_MODE_MASK == 0 {
            ConversionMode::Continuous
        } else {
            ConversionMode::SingleShot
        }
    }
}

/// Voltage reference applied to the Vin- pin, defining the full-scale range
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VoltageReference {
    /// Vin- tied to ground; conversions scale by the fixed ±2048 mV range
    Internal,
    /// Vin- driven by an external reference of the given millivolt value
    External(u16),
}

impl VoltageReference {
    /// Returns the scale value in millivolts used for unit conversion
    pub fn millivolts(self) -> u16 {
        match self {
            VoltageReference::Internal => 2048,
            VoltageReference::External(mv) => mv,
        }
    }
}

/// Logical view of the 8-bit configuration register
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    pub gain: Gain,
    pub sample_rate: SampleRate,
    pub mode: ConversionMode,
    st_drdy: bool,
}

impl Config {
    /// Packs the fields into the raw register byte
    pub fn encode(self) -> u8 {
        let mut byte = self.gain as u8 | self.sample_rate as u8 | self.mode as u8;
        if self.st_drdy {
            byte |= ST_DRDY_MASK;
        }
        byte
    }

    /// Unpacks a raw register byte
    pub fn decode(byte: u8) -> Self {
        Config {
            gain: Gain::from_bits(byte),
            sample_rate: SampleRate::from_bits(byte),
            mode: ConversionMode::from_bits(byte),
            st_drdy: byte & ST_DRDY_MASK != 0,
        }
    }

    /// True when a config byte read back from the device flags a conversion
    /// still in progress
    pub fn busy(self) -> bool {
        self.st_drdy
    }

    pub(crate) fn with_start(self) -> Self {
        Config {
            st_drdy: true,
            ..self
        }
    }

    pub(crate) fn with_gain(self, gain: Gain) -> Self {
        Config { gain, ..self }
    }

    pub(crate) fn with_sample_rate(self, sample_rate: SampleRate) -> Self {
        Config {
            sample_rate,
            ..self
        }
    }

    pub(crate) fn with_mode(self, mode: ConversionMode) -> Self {
        Config { mode, ..self }
    }
}

impl Default for Config {
    /// Power-on register value: gain x1, 15 SPS, continuous
    fn default() -> Self {
        Config {
            gain: Gain::Gain1,
            sample_rate: SampleRate::Sps15,
            mode: ConversionMode::Continuous,
            st_drdy: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rate_table_links_resolution_and_min_code() {
        let rows = [
            (SampleRate::Sps15, Resolution::Bits16, 16, 15),
            (SampleRate::Sps30, Resolution::Bits15, 8, 30),
            (SampleRate::Sps60, Resolution::Bits14, 4, 60),
            (SampleRate::Sps240, Resolution::Bits12, 1, 240),
        ];
        for (rate, resolution, min_code, sps) in rows {
            assert_eq!(rate.resolution(), resolution);
            assert_eq!(rate.min_code(), min_code);
            assert_eq!(rate.sps(), sps);
            assert_eq!(resolution.sample_rate(), rate);
        }
    }

    #[test]
    fn resolution_rate_round_trips() {
        for resolution in [
            Resolution::Bits12,
            Resolution::Bits14,
            Resolution::Bits15,
            Resolution::Bits16,
        ] {
            assert_eq!(resolution.sample_rate().resolution(), resolution);
        }
    }

    #[test]
    fn config_codec_keeps_fields_independent() {
        let gains = [Gain::Gain1, Gain::Gain2, Gain::Gain4, Gain::Gain8];
        let rates = [
            SampleRate::Sps15,
            SampleRate::Sps30,
            SampleRate::Sps60,
            SampleRate::Sps240,
        ];
        let modes = [ConversionMode::Continuous, ConversionMode::SingleShot];
        for gain in gains {
            for rate in rates {
                for mode in modes {
                    let config = Config::default()
                        .with_gain(gain)
                        .with_sample_rate(rate)
                        .with_mode(mode);
                    let decoded = Config::decode(config.encode());
                    assert_eq!(decoded.gain, gain);
                    assert_eq!(decoded.sample_rate, rate);
                    assert_eq!(decoded.mode, mode);
                    assert!(!decoded.busy());
                }
            }
        }
    }

    #[test]
    fn start_bit_only_touches_bit_seven() {
        let config = Config::default().with_gain(Gain::Gain4);
        let started = config.with_start();
        assert_eq!(started.encode(), config.encode() | ST_DRDY_MASK);
        assert!(Config::decode(started.encode()).busy());
    }

    #[test]
    fn default_matches_power_on_register() {
        assert_eq!(Config::default().encode(), 0x0C);
    }

    #[test]
    fn gain_values_are_powers_of_two() {
        assert_eq!(Gain::Gain1.value(), 1);
        assert_eq!(Gain::Gain2.value(), 2);
        assert_eq!(Gain::Gain4.value(), 4);
        assert_eq!(Gain::Gain8.value(), 8);
    }
}
