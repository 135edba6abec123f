//! Configuration primitives for the ADXL345 driver.
//!
//! Every register the driver programs as a whole has a plain named-field record here.
//! Field docs give the bit each field lands in.

use crate::params::{Coupling, Range, WakeUpRate};
use crate::registers::{ActInactControl, DataFormat, Interrupts, PowerControl};

/// Contents of the `DATA_FORMAT` register.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DataFormatConfig {
    /// DATA_FORMAT[7] SELF_TEST.
    pub self_test: bool,
    /// DATA_FORMAT[6] SPI (3-wire mode).
    pub spi: bool,
    /// DATA_FORMAT[5] INT_INVERT (interrupts active low).
    pub int_invert: bool,
    /// DATA_FORMAT[3] FULL_RES.
    ///
    /// Full resolution keeps 3.9 mg/LSB at every range. The driver's scale table
    /// assumes 10-bit output, so acceleration in g is only correct at ±2 g when set.
    pub full_res: bool,
    /// DATA_FORMAT[2] JUSTIFY (left-justified output).
    ///
    /// The driver decodes samples as right-justified; leave clear when reading g.
    pub justify: bool,
    /// DATA_FORMAT[1:0] RANGE.
    pub range: Range,
}

impl From<DataFormatConfig> for DataFormat {
    fn from(config: DataFormatConfig) -> Self {
        DataFormat::new()
            .with_self_test(config.self_test)
            .with_spi(config.spi)
            .with_int_invert(config.int_invert)
            .with_full_res(config.full_res)
            .with_justify(config.justify)
            .with_range(config.range)
    }
}

impl From<DataFormat> for DataFormatConfig {
    fn from(reg: DataFormat) -> Self {
        Self {
            self_test: reg.self_test(),
            spi: reg.spi(),
            int_invert: reg.int_invert(),
            full_res: reg.full_res(),
            justify: reg.justify(),
            range: reg.range(),
        }
    }
}

/// Contents of the `POWER_CTL` register.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PowerConfig {
    /// POWER_CTL[5] LINK.
    pub link: bool,
    /// POWER_CTL[4] AUTO_SLEEP.
    pub auto_sleep: bool,
    /// POWER_CTL[3] MEASURE.
    pub measure: bool,
    /// POWER_CTL[2] SLEEP.
    pub sleep: bool,
    /// POWER_CTL[1:0] WAKEUP.
    pub wakeup: WakeUpRate,
}

impl From<PowerConfig> for PowerControl {
    fn from(config: PowerConfig) -> Self {
        PowerControl::new()
            .with_link(config.link)
            .with_auto_sleep(config.auto_sleep)
            .with_measure(config.measure)
            .with_sleep(config.sleep)
            .with_wakeup(config.wakeup)
    }
}

impl From<PowerControl> for PowerConfig {
    fn from(reg: PowerControl) -> Self {
        Self {
            link: reg.link(),
            auto_sleep: reg.auto_sleep(),
            measure: reg.measure(),
            sleep: reg.sleep(),
            wakeup: reg.wakeup(),
        }
    }
}

/// Interrupt flag set used for `INT_ENABLE`, `INT_MAP` and `INT_SOURCE`.
///
/// For `INT_MAP` a set flag routes the interrupt to the INT2 pin, a clear flag to INT1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InterruptFlags {
    /// Bit 7 DATA_READY.
    pub data_ready: bool,
    /// Bit 6 SINGLE_TAP.
    pub single_tap: bool,
    /// Bit 5 DOUBLE_TAP.
    pub double_tap: bool,
    /// Bit 4 ACTIVITY.
    pub activity: bool,
    /// Bit 3 INACTIVITY.
    pub inactivity: bool,
    /// Bit 2 FREE_FALL.
    pub free_fall: bool,
    /// Bit 1 WATERMARK.
    pub watermark: bool,
    /// Bit 0 OVERRUN.
    pub overrun: bool,
}

impl From<InterruptFlags> for Interrupts {
    fn from(flags: InterruptFlags) -> Self {
        Interrupts::new()
            .with_data_ready(flags.data_ready)
            .with_single_tap(flags.single_tap)
            .with_double_tap(flags.double_tap)
            .with_activity(flags.activity)
            .with_inactivity(flags.inactivity)
            .with_free_fall(flags.free_fall)
            .with_watermark(flags.watermark)
            .with_overrun(flags.overrun)
    }
}

impl From<Interrupts> for InterruptFlags {
    fn from(reg: Interrupts) -> Self {
        Self {
            data_ready: reg.data_ready(),
            single_tap: reg.single_tap(),
            double_tap: reg.double_tap(),
            activity: reg.activity(),
            inactivity: reg.inactivity(),
            free_fall: reg.free_fall(),
            watermark: reg.watermark(),
            overrun: reg.overrun(),
        }
    }
}

/// Contents of the `ACT_INACT_CTL` register.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ActivityConfig {
    /// Bit 7 ACT_AC/DC.
    pub act_coupling: Coupling,
    /// Bit 6 ACT_X enable.
    pub act_x: bool,
    /// Bit 5 ACT_Y enable.
    pub act_y: bool,
    /// Bit 4 ACT_Z enable.
    pub act_z: bool,
    /// Bit 3 INACT_AC/DC.
    pub inact_coupling: Coupling,
    /// Bit 2 INACT_X enable.
    pub inact_x: bool,
    /// Bit 1 INACT_Y enable.
    pub inact_y: bool,
    /// Bit 0 INACT_Z enable.
    pub inact_z: bool,
}

impl From<ActivityConfig> for ActInactControl {
    fn from(config: ActivityConfig) -> Self {
        ActInactControl::new()
            .with_act_coupling(config.act_coupling)
            .with_act_x(config.act_x)
            .with_act_y(config.act_y)
            .with_act_z(config.act_z)
            .with_inact_coupling(config.inact_coupling)
            .with_inact_x(config.inact_x)
            .with_inact_y(config.inact_y)
            .with_inact_z(config.inact_z)
    }
}

impl From<ActInactControl> for ActivityConfig {
    fn from(reg: ActInactControl) -> Self {
        Self {
            act_coupling: reg.act_coupling(),
            act_x: reg.act_x(),
            act_y: reg.act_y(),
            act_z: reg.act_z(),
            inact_coupling: reg.inact_coupling(),
            inact_x: reg.inact_x(),
            inact_y: reg.inact_y(),
            inact_z: reg.inact_z(),
        }
    }
}

/// User-facing configuration for the ADXL345 sensor, applied by
/// [`Adxl345::configure`](crate::device::Adxl345::configure).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config {
    /// `DATA_FORMAT` contents.
    pub data_format: DataFormatConfig,
    /// `POWER_CTL` contents.
    pub power: PowerConfig,
    /// `INT_ENABLE` contents.
    pub interrupts: InterruptFlags,
    /// `INT_MAP` contents.
    pub interrupt_map: InterruptFlags,
    /// `ACT_INACT_CTL` contents.
    pub activity: ActivityConfig,
    /// Raw `THRESH_ACT` value, 62.5 mg/LSB.
    pub activity_threshold: u8,
    /// Raw `THRESH_INACT` value, 62.5 mg/LSB.
    pub inactivity_threshold: u8,
    /// Raw `OFSX`, `OFSY`, `OFSZ` trims, 15.6 mg/LSB.
    pub offsets: [i8; 3],
}

impl Config {
    /// Begins building a [`Config`] using the builder pattern.
    pub fn new() -> ConfigBuilder {
        ConfigBuilder::new()
    }
}

/// Builder for [`Config`] allowing piecemeal construction.
#[derive(Debug, Clone, Copy)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Creates a new builder seeded with [`Config::default()`].
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    /// Overrides the whole data format.
    pub fn data_format(mut self, data_format: DataFormatConfig) -> Self {
        self.config.data_format = data_format;
        self
    }

    /// Overrides only the measurement range.
    pub fn range(mut self, range: Range) -> Self {
        self.config.data_format.range = range;
        self
    }

    /// Enables or disables full resolution mode.
    ///
    /// See [`DataFormatConfig::full_res`] for its effect on scaling.
    pub fn full_resolution(mut self, enabled: bool) -> Self {
        self.config.data_format.full_res = enabled;
        self
    }

    /// Overrides the power control settings.
    pub fn power(mut self, power: PowerConfig) -> Self {
        self.config.power = power;
        self
    }

    /// Sets the interrupts to enable.
    pub fn interrupts(mut self, interrupts: InterruptFlags) -> Self {
        self.config.interrupts = interrupts;
        self
    }

    /// Sets which interrupts are routed to INT2.
    pub fn interrupt_map(mut self, map: InterruptFlags) -> Self {
        self.config.interrupt_map = map;
        self
    }

    /// Sets the activity/inactivity axis and coupling selection.
    pub fn activity(mut self, activity: ActivityConfig) -> Self {
        self.config.activity = activity;
        self
    }

    /// Sets the raw activity threshold.
    pub fn activity_threshold(mut self, raw: u8) -> Self {
        self.config.activity_threshold = raw;
        self
    }

    /// Sets the raw inactivity threshold.
    pub fn inactivity_threshold(mut self, raw: u8) -> Self {
        self.config.inactivity_threshold = raw;
        self
    }

    /// Sets the raw per-axis offset trims.
    pub fn offsets(mut self, x: i8, y: i8, z: i8) -> Self {
        self.config.offsets = [x, y, z];
        self
    }

    /// Finalizes the builder and returns the [`Config`].
    pub fn build(self) -> Config {
        self.config
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Default for Config {
    /// Datasheet reset values, except that measurement mode is switched on.
    fn default() -> Self {
        Self {
            data_format: DataFormatConfig::default(),
            power: PowerConfig {
                measure: true,
                ..PowerConfig::default()
            },
            interrupts: InterruptFlags::default(),
            interrupt_map: InterruptFlags::default(),
            activity: ActivityConfig::default(),
            activity_threshold: 0,
            inactivity_threshold: 0,
            offsets: [0; 3],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_format_packs_flags_in_datasheet_positions() {
        let config = DataFormatConfig {
            self_test: true,
            spi: false,
            int_invert: true,
            full_res: true,
            justify: false,
            range: Range::G16,
        };
        assert_eq!(u8::from(DataFormat::from(config)), 0b1010_1011);
    }

    #[test]
    fn data_format_low_bits_follow_range_table() {
        for range in [Range::G2, Range::G4, Range::G8, Range::G16] {
            let config = DataFormatConfig {
                justify: true,
                range,
                ..DataFormatConfig::default()
            };
            let raw = u8::from(DataFormat::from(config));
            assert_eq!(raw & 0b11, range.code());
            assert_eq!(raw & !0b11, 0b0000_0100);
        }
    }

    #[test]
    fn power_config_packs_wakeup_code_low() {
        let config = PowerConfig {
            measure: true,
            wakeup: WakeUpRate::Hz8,
            ..PowerConfig::default()
        };
        assert_eq!(u8::from(PowerControl::from(config)), 0b0000_1000);

        let config = PowerConfig {
            link: true,
            auto_sleep: true,
            sleep: true,
            wakeup: WakeUpRate::Hz2,
            ..PowerConfig::default()
        };
        assert_eq!(u8::from(PowerControl::from(config)), 0b0011_0110);
    }

    #[test]
    fn interrupt_flags_pack_in_fixed_order() {
        let flags = InterruptFlags {
            data_ready: true,
            activity: true,
            overrun: true,
            ..InterruptFlags::default()
        };
        assert_eq!(u8::from(Interrupts::from(flags)), 0b1001_0001);
        assert_eq!(InterruptFlags::from(Interrupts::from(0b1001_0001)), flags);
    }

    #[test]
    fn activity_config_packs_both_detectors() {
        let config = ActivityConfig {
            act_z: true,
            inact_coupling: Coupling::Ac,
            inact_x: true,
            inact_y: true,
            ..ActivityConfig::default()
        };
        assert_eq!(u8::from(ActInactControl::from(config)), 0b0001_1110);
    }

    #[test]
    fn builder_starts_from_defaults() {
        let config = Config::new()
            .range(Range::G16)
            .full_resolution(true)
            .activity_threshold(50)
            .build();

        assert_eq!(config.data_format.range, Range::G16);
        assert!(config.data_format.full_res);
        assert!(config.power.measure);
        assert_eq!(config.power.wakeup, WakeUpRate::Hz8);
        assert_eq!(config.activity_threshold, 50);
        assert_eq!(config.offsets, [0, 0, 0]);
    }
}
