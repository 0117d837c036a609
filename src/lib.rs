#![cfg_attr(not(test), no_std)]

mod constants;
mod driver;
mod error;
mod transport;

pub use constants::{
    Config, ConversionMode, Gain, Resolution, SampleRate, VoltageReference, DEFAULT_ADDRESS,
};
pub use driver::{mapf, Ads1110};
pub use error::Status;
pub use transport::Transport;
