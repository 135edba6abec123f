//! High-level ADXL345 device driver implementation.

use crate::config::{ActivityConfig, Config, DataFormatConfig, InterruptFlags, PowerConfig};
use crate::error::{Error, Result};
use crate::interface::i2c::I2cInterface;
use crate::interface::spi::SpiInterface;
use crate::interface::Adxl345Interface;
use crate::log::{log_debug, log_trace, log_warn};
use crate::params::{Range, WakeUpRate, THRESHOLD_SCALE_G_PER_LSB};
use crate::registers::{
    ActInactControl,
    DataFormat,
    Interrupts,
    PowerControl,
    REG_ACT_INACT_CTL,
    REG_DATAX0,
    REG_DATA_FORMAT,
    REG_DEVID,
    REG_INT_ENABLE,
    REG_INT_MAP,
    REG_INT_SOURCE,
    REG_OFSX,
    REG_POWER_CTL,
    REG_THRESH_ACT,
    REG_THRESH_INACT,
};
use crate::sample::{decode_axes, Acceleration, RAW_AXIS_BYTES};
use embedded_hal::i2c::I2c;
use embedded_hal::spi::SpiDevice;

/// High-level synchronous driver for the ADXL345 accelerometer.
///
/// The driver keeps an advisory copy of the last `DATA_FORMAT` and `POWER_CTL` values
/// it wrote, the last acceleration it read and the last `INT_SOURCE` it read. None of
/// these are re-checked against the device. All access goes through `&mut self`;
/// sharing one device between execution contexts needs an external lock.
pub struct Adxl345<IFACE> {
    interface: IFACE,
    data_format: DataFormatConfig,
    power: PowerConfig,
    last_acceleration: Acceleration,
    last_interrupt_source: InterruptFlags,
}

impl<IFACE> Adxl345<IFACE> {
    // ==================================================================
    // == Driver Construction & Ownership ===============================
    // ==================================================================
    /// Creates a new driver instance from the provided bus interface.
    ///
    /// No bus traffic happens here. Cached settings start at the datasheet reset
    /// values (±2 g, 8 Hz wake-up).
    pub fn new(interface: IFACE) -> Self {
        Self {
            interface,
            data_format: DataFormatConfig::default(),
            power: PowerConfig::default(),
            last_acceleration: Acceleration::default(),
            last_interrupt_source: InterruptFlags::default(),
        }
    }

    /// Consumes the driver and returns the owned interface.
    pub fn release(self) -> IFACE {
        self.interface
    }

    /// Provides mutable access to the underlying interface.
    pub fn interface_mut(&mut self) -> &mut IFACE {
        &mut self.interface
    }

    // ==================================================================
    // == Cached State ===================================================
    // ==================================================================
    /// Range of the last successfully written `DATA_FORMAT`.
    pub fn range(&self) -> Range {
        self.data_format.range
    }

    /// Conversion factor from raw counts to g for the current range.
    ///
    /// Depends on the range alone. The table assumes 10-bit, right-justified output;
    /// with `full_res` or `justify` set the device uses a different LSB weight and
    /// [`read_acceleration`](Self::read_acceleration) values will be off.
    pub fn scale_factor(&self) -> f32 {
        self.data_format.range.scale_factor()
    }

    /// Wake-up rate of the last successfully written `POWER_CTL`.
    pub fn wakeup_rate(&self) -> WakeUpRate {
        self.power.wakeup
    }

    /// Acceleration returned by the last [`read_acceleration`](Self::read_acceleration).
    pub fn last_acceleration(&self) -> Acceleration {
        self.last_acceleration
    }

    /// X axis of the last acceleration read, in g.
    pub fn accel_x(&self) -> f32 {
        self.last_acceleration.x
    }

    /// Y axis of the last acceleration read, in g.
    pub fn accel_y(&self) -> f32 {
        self.last_acceleration.y
    }

    /// Z axis of the last acceleration read, in g.
    pub fn accel_z(&self) -> f32 {
        self.last_acceleration.z
    }

    /// Flags returned by the last `INT_SOURCE` read.
    pub fn last_interrupt_source(&self) -> InterruptFlags {
        self.last_interrupt_source
    }
}

impl<I2C> Adxl345<I2cInterface<I2C>>
where
    I2C: I2c,
{
    // ==================================================================
    // == Transport Convenience Constructors ============================
    // ==================================================================
    /// Convenience constructor for I2C transports.
    pub fn new_i2c(i2c: I2C, address: u8) -> Self {
        Self::new(I2cInterface::new(i2c, address))
    }

    /// Releases the driver, returning the I2C bus.
    pub fn release_i2c(self) -> I2C {
        self.release().release()
    }
}

impl<SPI> Adxl345<SpiInterface<SPI>>
where
    SPI: SpiDevice,
{
    /// Convenience constructor for SPI transports.
    pub fn new_spi(spi: SPI) -> Self {
        Self::new(SpiInterface::new(spi))
    }

    /// Releases the driver, returning the SPI device.
    pub fn release_spi(self) -> SPI {
        self.release().release()
    }
}

impl<IFACE, CommE> Adxl345<IFACE>
where
    IFACE: Adxl345Interface<Error = CommE>,
{
    // ==================================================================
    // == Global Configuration ==========================================
    // ==================================================================
    /// Applies a full configuration.
    ///
    /// `POWER_CTL` is written last so the device only starts measuring once every
    /// other register holds its new value. Stops at the first bus error; registers
    /// written before it keep their new contents.
    pub fn configure(&mut self, config: &Config) -> Result<(), CommE> {
        log_debug!("adxl345: applying configuration");

        self.set_data_format(config.data_format)?;
        let [x, y, z] = config.offsets;
        self.set_offsets(x, y, z)?;
        self.set_activity_threshold(config.activity_threshold)?;
        self.set_inactivity_threshold(config.inactivity_threshold)?;
        self.set_activity_control(config.activity)?;
        self.set_interrupt_map(config.interrupt_map)?;
        self.set_interrupt_enable(config.interrupts)?;
        self.set_power_control(config.power)?;
        Ok(())
    }

    // ==================================================================
    // == Identification ================================================
    // ==================================================================
    /// Reads the `DEVID` register.
    ///
    /// A genuine ADXL345 answers [`EXPECTED_DEVID`](crate::registers::EXPECTED_DEVID).
    /// The comparison is left to the caller.
    pub fn device_id(&mut self) -> Result<u8, CommE> {
        let id = self.interface.read_register(REG_DEVID)?;
        log_trace!("adxl345: DEVID = {=u8:#x}", id);
        Ok(id)
    }

    // ==================================================================
    // == Data Format ===================================================
    // ==================================================================
    /// Writes `DATA_FORMAT` and, once the write succeeds, adopts its range for
    /// scaling subsequent samples.
    pub fn set_data_format(&mut self, format: DataFormatConfig) -> Result<(), CommE> {
        let raw = u8::from(DataFormat::from(format));
        self.interface.write_register(REG_DATA_FORMAT, raw)?;
        log_debug!("adxl345: DATA_FORMAT <- {=u8:#x}", raw);

        self.data_format = format;
        Ok(())
    }

    /// Changes only the range, given in g, keeping the other cached format flags.
    ///
    /// Values other than 2, 4, 8 and 16 are rejected without touching the bus. That
    /// includes even values such as 6 or 12, which older drivers quietly mapped to
    /// the ±2 g code.
    pub fn set_range(&mut self, g: u8) -> Result<(), CommE> {
        let range = Range::try_from(g).map_err(|err| {
            log_warn!("adxl345: rejected range {=u8} g", g);
            Error::InvalidConfig(err)
        })?;

        self.set_data_format(DataFormatConfig {
            range,
            ..self.data_format
        })
    }

    /// Reads `DATA_FORMAT` back from the device.
    ///
    /// Does not update the cached range.
    pub fn data_format(&mut self) -> Result<DataFormatConfig, CommE> {
        let raw = self.interface.read_register(REG_DATA_FORMAT)?;
        Ok(DataFormat::from(raw).into())
    }

    // ==================================================================
    // == Power Control =================================================
    // ==================================================================
    /// Writes `POWER_CTL`, caching the settings once the write succeeds.
    pub fn set_power_control(&mut self, power: PowerConfig) -> Result<(), CommE> {
        let raw = u8::from(PowerControl::from(power));
        self.interface.write_register(REG_POWER_CTL, raw)?;
        log_debug!("adxl345: POWER_CTL <- {=u8:#x}", raw);

        self.power = power;
        Ok(())
    }

    /// Changes only the sleep-mode reading frequency, given in Hz, keeping the other
    /// cached power flags.
    ///
    /// Values other than 1, 2, 4 and 8 are rejected without touching the bus. That
    /// includes 3, 5, 6 and 7, which older drivers quietly mapped to the 8 Hz code.
    pub fn set_wakeup_rate(&mut self, hz: u8) -> Result<(), CommE> {
        let wakeup = WakeUpRate::try_from(hz).map_err(|err| {
            log_warn!("adxl345: rejected wake-up rate {=u8} Hz", hz);
            Error::InvalidConfig(err)
        })?;

        self.set_power_control(PowerConfig {
            wakeup,
            ..self.power
        })
    }

    /// Reads `POWER_CTL` back from the device.
    pub fn power_control(&mut self) -> Result<PowerConfig, CommE> {
        let raw = self.interface.read_register(REG_POWER_CTL)?;
        Ok(PowerControl::from(raw).into())
    }

    // ==================================================================
    // == Interrupts ====================================================
    // ==================================================================
    /// Writes `INT_ENABLE`.
    pub fn set_interrupt_enable(&mut self, flags: InterruptFlags) -> Result<(), CommE> {
        self.write_interrupts(REG_INT_ENABLE, flags)
    }

    /// Reads `INT_ENABLE`.
    pub fn interrupt_enable(&mut self) -> Result<InterruptFlags, CommE> {
        self.read_interrupts(REG_INT_ENABLE)
    }

    /// Writes `INT_MAP`. Set flags go to INT2, clear flags to INT1.
    pub fn set_interrupt_map(&mut self, flags: InterruptFlags) -> Result<(), CommE> {
        self.write_interrupts(REG_INT_MAP, flags)
    }

    /// Reads `INT_MAP`.
    pub fn interrupt_map(&mut self) -> Result<InterruptFlags, CommE> {
        self.read_interrupts(REG_INT_MAP)
    }

    /// Reads `INT_SOURCE`.
    ///
    /// The device clears latched event flags (activity, inactivity, taps, free fall)
    /// as a side effect of this read. Test every bit of interest on the returned
    /// value, or on [`last_interrupt_source`](Self::last_interrupt_source), rather than
    /// reading again.
    pub fn interrupt_source(&mut self) -> Result<InterruptFlags, CommE> {
        let flags = self.read_interrupts(REG_INT_SOURCE)?;
        self.last_interrupt_source = flags;
        Ok(flags)
    }

    /// Reads `INT_SOURCE` and reports the DATA_READY bit (bit 7).
    ///
    /// Clears latched event flags, see [`interrupt_source`](Self::interrupt_source).
    pub fn data_ready_interrupt(&mut self) -> Result<bool, CommE> {
        Ok(self.interrupt_source()?.data_ready)
    }

    /// Reads `INT_SOURCE` and reports the ACTIVITY bit (bit 4).
    ///
    /// Clears latched event flags, see [`interrupt_source`](Self::interrupt_source).
    pub fn activity_interrupt(&mut self) -> Result<bool, CommE> {
        Ok(self.interrupt_source()?.activity)
    }

    // ==================================================================
    // == Activity / Inactivity Detection ===============================
    // ==================================================================
    /// Writes `ACT_INACT_CTL`.
    pub fn set_activity_control(&mut self, config: ActivityConfig) -> Result<(), CommE> {
        let raw = u8::from(ActInactControl::from(config));
        self.interface.write_register(REG_ACT_INACT_CTL, raw)?;
        Ok(())
    }

    /// Reads `ACT_INACT_CTL`.
    pub fn activity_control(&mut self) -> Result<ActivityConfig, CommE> {
        let raw = self.interface.read_register(REG_ACT_INACT_CTL)?;
        Ok(ActInactControl::from(raw).into())
    }

    /// Activity threshold in g.
    pub fn activity_threshold(&mut self) -> Result<f32, CommE> {
        let raw = self.interface.read_register(REG_THRESH_ACT)?;
        Ok(f32::from(raw) * THRESHOLD_SCALE_G_PER_LSB)
    }

    /// Writes the raw activity threshold (62.5 mg/LSB).
    pub fn set_activity_threshold(&mut self, raw: u8) -> Result<(), CommE> {
        self.interface.write_register(REG_THRESH_ACT, raw)?;
        Ok(())
    }

    /// Inactivity threshold in g.
    pub fn inactivity_threshold(&mut self) -> Result<f32, CommE> {
        let raw = self.interface.read_register(REG_THRESH_INACT)?;
        Ok(f32::from(raw) * THRESHOLD_SCALE_G_PER_LSB)
    }

    /// Writes the raw inactivity threshold (62.5 mg/LSB).
    pub fn set_inactivity_threshold(&mut self, raw: u8) -> Result<(), CommE> {
        self.interface.write_register(REG_THRESH_INACT, raw)?;
        Ok(())
    }

    // ==================================================================
    // == Offsets =======================================================
    // ==================================================================
    /// Reads the `OFSX`, `OFSY`, `OFSZ` trims (15.6 mg/LSB, two's complement).
    ///
    /// Each value is the raw register byte reinterpreted as signed: `0xC8` reads as
    /// `-56`. Use `as u8` for the unsigned byte.
    pub fn offsets(&mut self) -> Result<[i8; 3], CommE> {
        let mut raw = [0u8; 3];
        self.interface.read_many(REG_OFSX, &mut raw)?;
        Ok(raw.map(|b| b as i8))
    }

    /// Writes the `OFSX`, `OFSY`, `OFSZ` trims in one burst.
    ///
    /// Each value is stored as its two's-complement byte: `-56` writes `0xC8`.
    pub fn set_offsets(&mut self, x: i8, y: i8, z: i8) -> Result<(), CommE> {
        self.interface
            .write_many(REG_OFSX, &[x as u8, y as u8, z as u8])?;
        Ok(())
    }

    // ==================================================================
    // == Data Acquisition ==============================================
    // ==================================================================
    /// Reads a raw, sign-decoded acceleration triplet.
    pub fn read_raw(&mut self) -> Result<[i16; 3], CommE> {
        let mut raw = [0u8; RAW_AXIS_BYTES];
        self.interface.read_many(REG_DATAX0, &mut raw)?;
        Ok(decode_axes(&raw))
    }

    /// Reads acceleration in g, scaled for the cached range and rounded to four
    /// decimals. The result is also kept as the last acceleration.
    pub fn read_acceleration(&mut self) -> Result<Acceleration, CommE> {
        let raw = self.read_raw()?;
        let accel = Acceleration::from_raw(raw, self.scale_factor());
        self.last_acceleration = accel;
        Ok(accel)
    }

    // ==================================================================
    // == Internal Helpers ==============================================
    // ==================================================================
    fn write_interrupts(&mut self, register: u8, flags: InterruptFlags) -> Result<(), CommE> {
        let raw = u8::from(Interrupts::from(flags));
        self.interface.write_register(register, raw)?;
        log_debug!("adxl345: {=u8:#x} <- {=u8:#x}", register, raw);
        Ok(())
    }

    fn read_interrupts(&mut self, register: u8) -> Result<InterruptFlags, CommE> {
        let raw = self.interface.read_register(register)?;
        Ok(Interrupts::from(raw).into())
    }
}

#[cfg(test)]
mod tests {
    use super::Adxl345;
    use crate::config::{ActivityConfig, Config, DataFormatConfig, InterruptFlags, PowerConfig};
    use crate::error::Error;
    use crate::interface::Adxl345Interface;
    use crate::params::{ConfigError, Coupling, Range, WakeUpRate};
    use crate::registers::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    struct BusFault;

    /// Register file fake: writes land in `regs`, reads echo them back.
    struct RegisterFile {
        regs: [u8; 64],
        writes: Vec<(u8, u8)>,
        calls: usize,
        fail: bool,
    }

    impl RegisterFile {
        fn new() -> Self {
            Self {
                regs: [0; 64],
                writes: Vec::new(),
                calls: 0,
                fail: false,
            }
        }

        fn with(mut self, register: u8, bytes: &[u8]) -> Self {
            let start = register as usize;
            self.regs[start..start + bytes.len()].copy_from_slice(bytes);
            self
        }

        fn failing() -> Self {
            Self {
                fail: true,
                ..Self::new()
            }
        }

        fn check(&mut self) -> Result<(), BusFault> {
            self.calls += 1;
            if self.fail { Err(BusFault) } else { Ok(()) }
        }
    }

    impl Adxl345Interface for RegisterFile {
        type Error = BusFault;

        fn write_register(&mut self, register: u8, value: u8) -> Result<(), BusFault> {
            self.write_many(register, &[value])
        }

        fn read_register(&mut self, register: u8) -> Result<u8, BusFault> {
            let mut value = [0u8; 1];
            self.read_many(register, &mut value)?;
            Ok(value[0])
        }

        fn read_many(&mut self, register: u8, buf: &mut [u8]) -> Result<(), BusFault> {
            self.check()?;
            let start = register as usize;
            buf.copy_from_slice(&self.regs[start..start + buf.len()]);
            Ok(())
        }

        fn write_many(&mut self, register: u8, data: &[u8]) -> Result<(), BusFault> {
            self.check()?;
            for (i, byte) in data.iter().enumerate() {
                let reg = register + i as u8;
                self.regs[reg as usize] = *byte;
                self.writes.push((reg, *byte));
            }
            Ok(())
        }
    }

    fn assert_close(actual: f32, expected: f32) {
        assert!(
            (actual - expected).abs() < 1e-5,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn device_id_is_returned_verbatim() {
        let mut dev = Adxl345::new(RegisterFile::new().with(REG_DEVID, &[EXPECTED_DEVID]));
        assert_eq!(dev.device_id().unwrap(), 0xE5);

        let mut dev = Adxl345::new(RegisterFile::new().with(REG_DEVID, &[0x12]));
        assert_eq!(dev.device_id().unwrap(), 0x12);
    }

    #[test]
    fn read_acceleration_scales_and_caches() {
        let bus = RegisterFile::new().with(REG_DATAX0, &[0x00, 0x01, 0x00, 0x02, 0x00, 0x03]);
        let mut dev = Adxl345::new(bus);

        let accel = dev.read_acceleration().unwrap();
        assert_close(accel.x, 0.9984);
        assert_close(accel.y, 1.9968);
        assert_close(accel.z, 2.9952);
        assert_eq!(dev.last_acceleration(), accel);
        assert_eq!(dev.accel_x(), accel.x);
        assert_eq!(dev.accel_y(), accel.y);
        assert_eq!(dev.accel_z(), accel.z);
    }

    #[test]
    fn read_acceleration_handles_negative_counts() {
        // -256 counts on X at ±16 g.
        let bus = RegisterFile::new().with(REG_DATAX0, &[0x00, 0xFF, 0xFF, 0xFF, 0x00, 0x00]);
        let mut dev = Adxl345::new(bus);
        dev.set_range(16).unwrap();

        assert_eq!(dev.read_raw().unwrap(), [-256, -1, 0]);
        let accel = dev.read_acceleration().unwrap();
        assert_close(accel.x, -7.9872);
        assert_close(accel.y, -0.0312);
        assert_eq!(accel.z, 0.0);
    }

    #[test]
    fn data_format_byte_for_every_range() {
        for range in [Range::G2, Range::G4, Range::G8, Range::G16] {
            let mut dev = Adxl345::new(RegisterFile::new());
            dev.set_data_format(DataFormatConfig {
                self_test: false,
                spi: true,
                int_invert: false,
                full_res: true,
                justify: false,
                range,
            })
            .unwrap();

            let bus = dev.release();
            assert_eq!(bus.writes, vec![(REG_DATA_FORMAT, 0b0100_1000 | range.code())]);
        }
    }

    #[test]
    fn unsupported_range_touches_nothing() {
        for g in [3, 32] {
            let mut dev = Adxl345::new(RegisterFile::new());
            assert_eq!(
                dev.set_range(g),
                Err(Error::InvalidConfig(ConfigError::UnsupportedRange(g)))
            );
            assert_eq!(dev.range(), Range::G2);

            let bus = dev.release();
            assert_eq!(bus.calls, 0);
        }
    }

    #[test]
    fn set_range_keeps_other_format_flags() {
        let mut dev = Adxl345::new(RegisterFile::new());
        dev.set_data_format(DataFormatConfig {
            full_res: true,
            ..DataFormatConfig::default()
        })
        .unwrap();
        dev.set_range(8).unwrap();

        assert_eq!(dev.range(), Range::G8);
        assert_eq!(dev.scale_factor(), 0.0156);
        assert_eq!(
            dev.data_format().unwrap(),
            DataFormatConfig {
                full_res: true,
                range: Range::G8,
                ..DataFormatConfig::default()
            }
        );
    }

    #[test]
    fn scale_factor_only_follows_successful_writes() {
        let mut dev = Adxl345::new(RegisterFile::failing());
        assert_eq!(dev.set_range(16), Err(Error::Interface(BusFault)));
        assert_eq!(dev.range(), Range::G2);
        assert_eq!(dev.scale_factor(), 0.0039);
    }

    #[test]
    fn power_control_places_wakeup_code_low() {
        let mut dev = Adxl345::new(RegisterFile::new());
        dev.set_power_control(PowerConfig {
            measure: true,
            wakeup: WakeUpRate::try_from(8).unwrap(),
            ..PowerConfig::default()
        })
        .unwrap();
        assert_eq!(dev.wakeup_rate(), WakeUpRate::Hz8);

        dev.set_wakeup_rate(1).unwrap();
        assert_eq!(dev.wakeup_rate(), WakeUpRate::Hz1);
        assert!(dev.power_control().unwrap().measure);

        let bus = dev.release();
        assert_eq!(
            bus.writes,
            vec![(REG_POWER_CTL, 0b0000_1000), (REG_POWER_CTL, 0b0000_1011)]
        );
    }

    #[test]
    fn unsupported_wakeup_rate_touches_nothing() {
        let mut dev = Adxl345::new(RegisterFile::new());
        assert_eq!(
            dev.set_wakeup_rate(0),
            Err(Error::InvalidConfig(ConfigError::UnsupportedWakeUpRate(0)))
        );
        assert_eq!(
            dev.set_wakeup_rate(9),
            Err(Error::InvalidConfig(ConfigError::UnsupportedWakeUpRate(9)))
        );
        assert_eq!(dev.wakeup_rate(), WakeUpRate::Hz8);
        assert_eq!(dev.release().calls, 0);
    }

    #[test]
    fn scale_factor_ignores_full_res_and_justify() {
        for range in [Range::G2, Range::G4, Range::G8, Range::G16] {
            let mut dev = Adxl345::new(RegisterFile::new());
            dev.set_data_format(DataFormatConfig {
                range,
                ..DataFormatConfig::default()
            })
            .unwrap();
            let plain = dev.scale_factor();

            dev.set_data_format(DataFormatConfig {
                full_res: true,
                justify: true,
                range,
                ..DataFormatConfig::default()
            })
            .unwrap();
            assert_eq!(dev.scale_factor(), plain);
            assert_eq!(dev.scale_factor(), range.scale_factor());
        }
    }

    #[test]
    fn even_range_outside_table_is_rejected() {
        for g in [6, 10, 12, 14] {
            let mut dev = Adxl345::new(RegisterFile::new());
            assert_eq!(
                dev.set_range(g),
                Err(Error::InvalidConfig(ConfigError::UnsupportedRange(g)))
            );
            assert!(dev.release().writes.is_empty());
        }

        let mut dev = Adxl345::new(RegisterFile::new());
        assert_eq!(
            dev.set_wakeup_rate(5),
            Err(Error::InvalidConfig(ConfigError::UnsupportedWakeUpRate(5)))
        );
        assert!(dev.release().writes.is_empty());
    }

    #[test]
    fn offsets_are_signed_views_of_raw_bytes() {
        let mut dev = Adxl345::new(RegisterFile::new().with(REG_OFSX, &[0xC8, 0x7F, 0x80]));
        assert_eq!(dev.offsets().unwrap(), [-56, 127, -128]);
        assert_eq!(dev.offsets().unwrap().map(|b| b as u8), [200, 127, 128]);

        dev.set_offsets(-56, 0, 0).unwrap();
        assert_eq!(dev.release().writes[0], (REG_OFSX, 0xC8));
    }

    #[test]
    fn offsets_round_trip() {
        let mut dev = Adxl345::new(RegisterFile::new());
        dev.set_offsets(1, 2, 3).unwrap();
        assert_eq!(dev.offsets().unwrap(), [1, 2, 3]);

        dev.set_offsets(-1, 0, -128).unwrap();
        assert_eq!(dev.offsets().unwrap(), [-1, 0, -128]);

        let bus = dev.release();
        assert_eq!(bus.regs[REG_OFSX as usize..=REG_OFSZ as usize], [0xFF, 0x00, 0x80]);
    }

    #[test]
    fn thresholds_scale_by_62_5_mg() {
        let mut dev = Adxl345::new(RegisterFile::new());
        dev.set_activity_threshold(50).unwrap();
        dev.set_inactivity_threshold(16).unwrap();

        assert_eq!(dev.activity_threshold().unwrap(), 3.125);
        assert_eq!(dev.inactivity_threshold().unwrap(), 1.0);

        let bus = dev.release();
        assert_eq!(bus.writes, vec![(REG_THRESH_ACT, 50), (REG_THRESH_INACT, 16)]);
    }

    #[test]
    fn activity_interrupt_reads_bit_four() {
        let mut dev = Adxl345::new(RegisterFile::new().with(REG_INT_SOURCE, &[0b0001_0000]));
        assert!(dev.activity_interrupt().unwrap());
        assert!(dev.last_interrupt_source().activity);

        let mut dev = Adxl345::new(RegisterFile::new().with(REG_INT_SOURCE, &[0b0000_0000]));
        assert!(!dev.activity_interrupt().unwrap());
    }

    #[test]
    fn data_ready_interrupt_reads_bit_seven() {
        let mut dev = Adxl345::new(RegisterFile::new().with(REG_INT_SOURCE, &[0b1000_0000]));
        assert!(dev.data_ready_interrupt().unwrap());
        assert!(!dev.last_interrupt_source().activity);

        let mut dev = Adxl345::new(RegisterFile::new().with(REG_INT_SOURCE, &[0b0111_1111]));
        assert!(!dev.data_ready_interrupt().unwrap());
    }

    #[test]
    fn interrupt_enable_and_map_pack_flags() {
        let mut dev = Adxl345::new(RegisterFile::new());
        let enable = InterruptFlags {
            activity: true,
            ..InterruptFlags::default()
        };
        let map = InterruptFlags {
            data_ready: true,
            overrun: true,
            ..InterruptFlags::default()
        };
        dev.set_interrupt_enable(enable).unwrap();
        dev.set_interrupt_map(map).unwrap();

        assert_eq!(dev.interrupt_enable().unwrap(), enable);
        assert_eq!(dev.interrupt_map().unwrap(), map);

        let bus = dev.release();
        assert_eq!(
            bus.writes,
            vec![(REG_INT_ENABLE, 0b0001_0000), (REG_INT_MAP, 0b1000_0001)]
        );
    }

    #[test]
    fn activity_control_packs_flags() {
        let mut dev = Adxl345::new(RegisterFile::new());
        let config = ActivityConfig {
            act_coupling: Coupling::Dc,
            act_z: true,
            ..ActivityConfig::default()
        };
        dev.set_activity_control(config).unwrap();
        assert_eq!(dev.activity_control().unwrap(), config);

        let bus = dev.release();
        assert_eq!(bus.writes, vec![(REG_ACT_INACT_CTL, 0b0001_0000)]);
    }

    #[test]
    fn configure_writes_power_control_last() {
        let config = Config::new()
            .range(Range::G16)
            .full_resolution(true)
            .interrupts(InterruptFlags {
                activity: true,
                ..InterruptFlags::default()
            })
            .activity(ActivityConfig {
                act_z: true,
                ..ActivityConfig::default()
            })
            .activity_threshold(50)
            .offsets(1, 2, 3)
            .build();

        let mut dev = Adxl345::new(RegisterFile::new());
        dev.configure(&config).unwrap();
        assert_eq!(dev.range(), Range::G16);
        assert_eq!(dev.scale_factor(), 0.0312);

        let bus = dev.release();
        assert_eq!(
            bus.writes,
            vec![
                (REG_DATA_FORMAT, 0b0000_1011),
                (REG_OFSX, 1),
                (REG_OFSY, 2),
                (REG_OFSZ, 3),
                (REG_THRESH_ACT, 50),
                (REG_THRESH_INACT, 0),
                (REG_ACT_INACT_CTL, 0b0001_0000),
                (REG_INT_MAP, 0),
                (REG_INT_ENABLE, 0b0001_0000),
                (REG_POWER_CTL, 0b0000_1000),
            ]
        );
    }

    #[test]
    fn bus_errors_propagate_unchanged() {
        let mut dev = Adxl345::new(RegisterFile::failing());
        assert_eq!(dev.device_id(), Err(Error::Interface(BusFault)));
        assert_eq!(dev.read_acceleration(), Err(Error::Interface(BusFault)));
        assert_eq!(dev.set_offsets(1, 2, 3), Err(Error::Interface(BusFault)));
        assert_eq!(dev.interrupt_source(), Err(Error::Interface(BusFault)));
        assert_eq!(dev.configure(&Config::default()), Err(Error::Interface(BusFault)));

        // One attempt per call, no retries.
        assert_eq!(dev.release().calls, 5);
    }
}
