//! Bus interface abstraction for the ADXL345 driver.

pub mod i2c;
pub mod spi;

/// Abstraction over the low-level bus access required by the driver.
///
/// Implementations carry the device address (or chip select) themselves and report
/// bus failures through [`Self::Error`] without retrying.
pub trait Adxl345Interface {
    /// Error type produced by the concrete bus implementation.
    type Error;

    /// Writes a single register.
    fn write_register(&mut self, register: u8, value: u8) -> core::result::Result<(), Self::Error>;

    /// Reads a single register.
    fn read_register(&mut self, register: u8) -> core::result::Result<u8, Self::Error>;

    /// Reads multiple consecutive registers into the provided buffer.
    fn read_many(&mut self, register: u8, buf: &mut [u8]) -> core::result::Result<(), Self::Error>;

    /// Writes multiple consecutive registers from the provided buffer.
    fn write_many(&mut self, register: u8, data: &[u8]) -> core::result::Result<(), Self::Error>;
}
