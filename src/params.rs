//! Strongly typed parameter enumerations for the ADXL345 driver.
//!
//! These enums map directly to datasheet field encodings and are used across
//! [`Config`](crate::config::Config) and the high-level driver APIs. The numeric
//! lookup tables (range to code, wake-up frequency to code, range to scale factor)
//! live here as `const fn` matches.
//!
//! # Examples
//!
//! ```rust
//! use adxl345::params::{Range, WakeUpRate};
//!
//! let range = Range::try_from(16).unwrap();
//! assert_eq!(range, Range::G16);
//! assert_eq!(WakeUpRate::Hz8.hz(), 8);
//! ```

use modular_bitfield::prelude::Specifier;

/// Scale of the `THRESH_ACT` / `THRESH_INACT` registers in g per LSB.
pub const THRESHOLD_SCALE_G_PER_LSB: f32 = 0.0625;

/// Measurement range selection encoded in `DATA_FORMAT[1:0]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Specifier)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
#[bits = 2]
pub enum Range {
    /// ±2 g.
    G2 = 0b00,
    /// ±4 g.
    G4 = 0b01,
    /// ±8 g.
    G8 = 0b10,
    /// ±16 g.
    G16 = 0b11,
}

impl Range {
    /// Returns the full-scale value in g.
    pub const fn g(self) -> u8 {
        match self {
            Self::G2 => 2,
            Self::G4 => 4,
            Self::G8 => 8,
            Self::G16 => 16,
        }
    }

    /// Returns the 2-bit `DATA_FORMAT` range code.
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Returns the conversion factor from raw counts to g.
    pub const fn scale_factor(self) -> f32 {
        match self {
            Self::G2 => 0.0039,
            Self::G4 => 0.0078,
            Self::G8 => 0.0156,
            Self::G16 => 0.0312,
        }
    }
}

impl Default for Range {
    fn default() -> Self {
        Self::G2
    }
}

impl TryFrom<u8> for Range {
    type Error = ConfigError;

    /// Converts a full-scale value in g.
    fn try_from(g: u8) -> Result<Self, Self::Error> {
        match g {
            2 => Ok(Self::G2),
            4 => Ok(Self::G4),
            8 => Ok(Self::G8),
            16 => Ok(Self::G16),
            other => Err(ConfigError::UnsupportedRange(other)),
        }
    }
}

/// Reading frequency while asleep, encoded in `POWER_CTL[1:0]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Specifier)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
#[bits = 2]
pub enum WakeUpRate {
    /// 8 Hz.
    Hz8 = 0b00,
    /// 4 Hz.
    Hz4 = 0b01,
    /// 2 Hz.
    Hz2 = 0b10,
    /// 1 Hz.
    Hz1 = 0b11,
}

impl WakeUpRate {
    /// Returns the frequency in hertz.
    pub const fn hz(self) -> u8 {
        match self {
            Self::Hz8 => 8,
            Self::Hz4 => 4,
            Self::Hz2 => 2,
            Self::Hz1 => 1,
        }
    }

    /// Returns the 2-bit sleep-mode code.
    pub const fn code(self) -> u8 {
        self as u8
    }
}

impl Default for WakeUpRate {
    fn default() -> Self {
        Self::Hz8
    }
}

impl TryFrom<u8> for WakeUpRate {
    type Error = ConfigError;

    /// Converts a frequency in hertz.
    fn try_from(hz: u8) -> Result<Self, Self::Error> {
        match hz {
            1 => Ok(Self::Hz1),
            2 => Ok(Self::Hz2),
            4 => Ok(Self::Hz4),
            8 => Ok(Self::Hz8),
            other => Err(ConfigError::UnsupportedWakeUpRate(other)),
        }
    }
}

/// Activity/inactivity detector coupling (`ACT_INACT_CTL` AC/DC bits).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Specifier)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
#[bits = 1]
pub enum Coupling {
    /// Compare samples directly against the threshold.
    Dc = 0,
    /// Compare against the reference sample taken when detection starts.
    Ac = 1,
}

impl Default for Coupling {
    fn default() -> Self {
        Self::Dc
    }
}

/// Raw values rejected by the lookup tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Range in g is not one of 2, 4, 8 or 16.
    UnsupportedRange(u8),
    /// Wake-up frequency in Hz is not one of 1, 2, 4 or 8.
    UnsupportedWakeUpRate(u8),
}
