#![cfg_attr(not(test), no_std)]

mod error;

pub mod config;
pub mod device;
pub mod interface;
mod log;
pub mod params;
pub mod registers;
pub mod sample;

pub use crate::config::{ActivityConfig, Config, DataFormatConfig, InterruptFlags, PowerConfig};
pub use crate::device::Adxl345;
pub use crate::error::{Error, Result};
pub use crate::params::{ConfigError, Coupling, Range, WakeUpRate};
pub use crate::sample::Acceleration;
