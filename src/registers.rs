//! Register map definitions for the ADXL345 accelerometer.
#![allow(unused_parens)]

use modular_bitfield::prelude::*;

use crate::params::{Coupling, Range, WakeUpRate};

/// I2C address with the ALT ADDRESS pin tied low.
pub const DEFAULT_ADDRESS: u8 = 0x53;
/// I2C address with the ALT ADDRESS pin tied high.
pub const ALT_ADDRESS: u8 = 0x1D;
/// Fixed content of the `DEVID` register.
pub const EXPECTED_DEVID: u8 = 0xE5;

/// Register address of `DEVID`.
pub const REG_DEVID: u8 = 0x00;
/// Register address of `OFSX`.
pub const REG_OFSX: u8 = 0x1E;
/// Register address of `OFSY`.
pub const REG_OFSY: u8 = 0x1F;
/// Register address of `OFSZ`.
pub const REG_OFSZ: u8 = 0x20;
/// Register address of `THRESH_ACT`.
pub const REG_THRESH_ACT: u8 = 0x24;
/// Register address of `THRESH_INACT`.
pub const REG_THRESH_INACT: u8 = 0x25;
/// Register address of `ACT_INACT_CTL`.
pub const REG_ACT_INACT_CTL: u8 = 0x27;
/// Register address of `POWER_CTL`.
pub const REG_POWER_CTL: u8 = 0x2D;
/// Register address of `INT_ENABLE`.
pub const REG_INT_ENABLE: u8 = 0x2E;
/// Register address of `INT_MAP`.
pub const REG_INT_MAP: u8 = 0x2F;
/// Register address of `INT_SOURCE`.
pub const REG_INT_SOURCE: u8 = 0x30;
/// Register address of `DATA_FORMAT`.
pub const REG_DATA_FORMAT: u8 = 0x31;
/// Register address of `DATAX0`.
pub const REG_DATAX0: u8 = 0x32;
/// Register address of `DATAX1`.
pub const REG_DATAX1: u8 = 0x33;
/// Register address of `DATAY0`.
pub const REG_DATAY0: u8 = 0x34;
/// Register address of `DATAY1`.
pub const REG_DATAY1: u8 = 0x35;
/// Register address of `DATAZ0`.
pub const REG_DATAZ0: u8 = 0x36;
/// Register address of `DATAZ1`.
pub const REG_DATAZ1: u8 = 0x37;

/// Bitfield representation of the `DATA_FORMAT` register (address `0x31`).
#[allow(unused_parens)]
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DataFormat {
    // g range selection (bits 1:0).
    pub range: Range,
    // Left-justified (MSB) output when set (bit 2).
    pub justify: bool,
    // Full resolution mode (bit 3).
    pub full_res: bool,
    #[skip]
    __: B1,
    // Interrupts active low when set (bit 5).
    pub int_invert: bool,
    // 3-wire SPI mode when set (bit 6).
    pub spi: bool,
    // Applies the self-test force (bit 7).
    pub self_test: bool,
}

impl From<u8> for DataFormat {
    fn from(value: u8) -> Self {
        Self::from_bytes([value])
    }
}

impl From<DataFormat> for u8 {
    fn from(value: DataFormat) -> Self {
        value.into_bytes()[0]
    }
}

/// Bitfield representation of the `POWER_CTL` register (address `0x2D`).
#[allow(unused_parens)]
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PowerControl {
    // Reading frequency in sleep mode (bits 1:0).
    pub wakeup: WakeUpRate,
    // Sleep mode (bit 2).
    pub sleep: bool,
    // Measurement mode, standby when clear (bit 3).
    pub measure: bool,
    // Automatic sleep on inactivity (bit 4).
    pub auto_sleep: bool,
    // Serial linking of activity and inactivity (bit 5).
    pub link: bool,
    #[skip]
    __: B2,
}

impl From<u8> for PowerControl {
    fn from(value: u8) -> Self {
        Self::from_bytes([value])
    }
}

impl From<PowerControl> for u8 {
    fn from(value: PowerControl) -> Self {
        value.into_bytes()[0]
    }
}

/// Shared bit layout of `INT_ENABLE` (`0x2E`), `INT_MAP` (`0x2F`) and `INT_SOURCE` (`0x30`).
#[allow(unused_parens)]
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interrupts {
    // FIFO overrun (bit 0).
    pub overrun: bool,
    // FIFO watermark (bit 1).
    pub watermark: bool,
    // Free fall (bit 2).
    pub free_fall: bool,
    // Inactivity (bit 3).
    pub inactivity: bool,
    // Activity (bit 4).
    pub activity: bool,
    // Double tap (bit 5).
    pub double_tap: bool,
    // Single tap (bit 6).
    pub single_tap: bool,
    // Data ready (bit 7).
    pub data_ready: bool,
}

impl From<u8> for Interrupts {
    fn from(value: u8) -> Self {
        Self::from_bytes([value])
    }
}

impl From<Interrupts> for u8 {
    fn from(value: Interrupts) -> Self {
        value.into_bytes()[0]
    }
}

/// Bitfield representation of the `ACT_INACT_CTL` register (address `0x27`).
#[allow(unused_parens)]
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActInactControl {
    // Inactivity Z axis enable (bit 0).
    pub inact_z: bool,
    // Inactivity Y axis enable (bit 1).
    pub inact_y: bool,
    // Inactivity X axis enable (bit 2).
    pub inact_x: bool,
    // Inactivity AC/DC coupling (bit 3).
    pub inact_coupling: Coupling,
    // Activity Z axis enable (bit 4).
    pub act_z: bool,
    // Activity Y axis enable (bit 5).
    pub act_y: bool,
    // Activity X axis enable (bit 6).
    pub act_x: bool,
    // Activity AC/DC coupling (bit 7).
    pub act_coupling: Coupling,
}

impl From<u8> for ActInactControl {
    fn from(value: u8) -> Self {
        Self::from_bytes([value])
    }
}

impl From<ActInactControl> for u8 {
    fn from(value: ActInactControl) -> Self {
        value.into_bytes()[0]
    }
}
