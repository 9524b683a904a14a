//! 24-bit signed fixed-point wire fields.
//!
//! Nearly every physical measurement in an NCOM packet is transmitted as a
//! 3-byte little-endian signed integer that counts units of a fixed scale
//! factor, e.g., acceleration in units of 1e-4 m/s².

/// Encode `value` as a 24-bit little-endian count of `scale` units.
///
/// The count is truncated toward zero. Values beyond the 24-bit signed
/// range [-8388608, 8388607] are not range-checked; only the low 24 bits
/// of the count are kept, wrapping silently, which matches what the
/// device-facing implementations do.
#[must_use]
pub fn encode(value: f32, scale: f32) -> [u8; 3] {
    let count = (value / scale) as i32;
    [count as u8, (count >> 8) as u8, (count >> 16) as u8]
}

/// Decode a 24-bit little-endian count of `scale` units.
#[must_use]
pub fn decode(dat: [u8; 3], scale: f32) -> f32 {
    let mut count = i32::from(dat[0]) | i32::from(dat[1]) << 8 | i32::from(dat[2]) << 16;
    // Sign-extend from bit 23
    if count & 0x0080_0000 != 0 {
        count |= !0x00ff_ffff;
    }
    count as f32 * scale
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_positive_counts_little_endian() {
        // 1.0 / 1e-4 is exactly 10000 in f32
        assert_eq!(encode(1.0, 1e-4), [0x10, 0x27, 0x00]);
    }

    #[test]
    fn encodes_negative_counts_twos_complement() {
        assert_eq!(encode(-1.0, 1.0), [0xff, 0xff, 0xff]);
        assert_eq!(encode(-2.0, 0.5), [0xfc, 0xff, 0xff]);
    }

    #[test]
    fn truncates_toward_zero() {
        assert_eq!(encode(1.9, 1.0), [0x01, 0x00, 0x00]);
        assert_eq!(encode(-1.9, 1.0), [0xff, 0xff, 0xff]);
    }

    #[test]
    fn decodes_with_sign_extension() {
        assert_eq!(decode([0xff, 0xff, 0xff], 1.0), -1.0);
        assert_eq!(decode([0x10, 0x27, 0x00], 1.0), 10000.0);
        assert_eq!(decode([0x00, 0x00, 0x80], 1.0), -8_388_608.0);
        assert_eq!(decode([0xff, 0xff, 0x7f], 1.0), 8_388_607.0);
    }

    #[test]
    fn wraps_silently_past_24_bits() {
        // 2^24 counts wraps to 0
        let dat = encode(16_777_216.0, 1.0);
        assert_eq!(dat, [0x00, 0x00, 0x00]);
        assert_eq!(decode(dat, 1.0), 0.0);
    }

    #[test]
    fn round_trips_within_one_scale_unit() {
        // (value, scale) pairs whose counts fit in 24 bits
        let cases = [
            (0.0f32, 1e-4f32),
            (9.81, 1e-4),
            (-9.81, 1e-4),
            (250.0, 1e-4),
            (0.5, 1e-5),
            (-0.25, 1e-5),
            (3.14159, 1e-6),
            (-3.14159, 1e-6),
        ];
        for (value, scale) in cases {
            let got = decode(encode(value, scale), scale);
            assert!(
                (got - value).abs() <= scale * 1.5,
                "value {value} scale {scale} decoded to {got}"
            );
        }
    }
}
