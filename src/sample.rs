//! Acceleration sample decoding.

/// Scaled acceleration values keep four decimals.
const ROUNDING: f32 = 10_000.0;
/// Number of consecutive bytes spanning X, Y, Z axis samples.
pub const RAW_AXIS_BYTES: usize = 6;

/// Acceleration in g on each axis.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Acceleration {
    /// X-axis acceleration.
    pub x: f32,
    /// Y-axis acceleration.
    pub y: f32,
    /// Z-axis acceleration.
    pub z: f32,
}

impl Acceleration {
    /// Scales raw counts by `scale` g/LSB and rounds to four decimals.
    pub fn from_raw(raw: [i16; 3], scale: f32) -> Self {
        Self {
            x: scale_and_round(raw[0], scale),
            y: scale_and_round(raw[1], scale),
            z: scale_and_round(raw[2], scale),
        }
    }

    /// Returns the axes as an `[x, y, z]` array.
    pub fn as_array(&self) -> [f32; 3] {
        [self.x, self.y, self.z]
    }
}

/// Interprets a 16-bit register word as a signed two's-complement value.
#[inline]
pub const fn decode_twos_complement(raw: u16) -> i16 {
    raw as i16
}

/// Reassembles the little-endian `DATAX0..DATAZ1` bytes into signed counts.
pub fn decode_axes(raw: &[u8; RAW_AXIS_BYTES]) -> [i16; 3] {
    let word = |n: usize| decode_twos_complement(u16::from_le_bytes([raw[2 * n], raw[2 * n + 1]]));
    [word(0), word(1), word(2)]
}

fn scale_and_round(count: i16, scale: f32) -> f32 {
    libm::roundf(f32::from(count) * scale * ROUNDING) / ROUNDING
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f32, expected: f32) {
        assert!(
            (actual - expected).abs() < 1e-5,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn twos_complement_boundaries() {
        assert_eq!(decode_twos_complement(0x0000), 0);
        assert_eq!(decode_twos_complement(0x0001), 1);
        assert_eq!(decode_twos_complement(0x7FFF), 32_767);
        assert_eq!(decode_twos_complement(0x8000), -32_768);
        assert_eq!(decode_twos_complement(0xFFFF), -1);
        assert_eq!(decode_twos_complement(0xFF00), -256);
    }

    #[test]
    fn twos_complement_matches_subtraction_rule() {
        for v in (0..=u16::MAX).step_by(257) {
            let expected = if v < 32_768 {
                i32::from(v)
            } else {
                i32::from(v) - 65_536
            };
            assert_eq!(i32::from(decode_twos_complement(v)), expected);
        }
    }

    #[test]
    fn axes_are_little_endian() {
        let raw = [0x00, 0x01, 0x00, 0x02, 0x00, 0x03];
        assert_eq!(decode_axes(&raw), [256, 512, 768]);

        let raw = [0xFF, 0xFF, 0x00, 0x80, 0x34, 0x12];
        assert_eq!(decode_axes(&raw), [-1, -32_768, 0x1234]);
    }

    #[test]
    fn scaled_values_round_to_four_decimals() {
        let accel = Acceleration::from_raw([256, 512, 768], 0.0039);
        assert_close(accel.x, 0.9984);
        assert_close(accel.y, 1.9968);
        assert_close(accel.z, 2.9952);

        let accel = Acceleration::from_raw([-1, 1, 0], 0.0312);
        assert_close(accel.x, -0.0312);
        assert_close(accel.y, 0.0312);
        assert_eq!(accel.z, 0.0);
    }
}
