/// Integer division rounding toward negative infinity.
///
/// Rust's `/` truncates toward zero; the two differ whenever the operands
/// have opposite signs and the division is inexact.
pub fn floor_div(numerator: i128, denominator: i128) -> i128 {
    let quotient = numerator / denominator;
    if numerator % denominator != 0 && (numerator < 0) != (denominator < 0) {
        quotient - 1
    } else {
        quotient
    }
}

/// `(factor * value) >> shift` without forming the full product.
///
/// `value` is split into `hi << shift | lo`, so only `factor * hi` and
/// `factor * lo` have to fit in `i128`. Rounds toward negative infinity like
/// the plain shift.
pub fn mul_shr(factor: i128, value: i128, shift: u32) -> i128 {
    let hi = value >> shift;
    let lo = value & ((1 << shift) - 1);
    factor * hi + ((factor * lo) >> shift)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_division() {
        assert_eq!(floor_div(12, 4), 3);
        assert_eq!(floor_div(-12, 4), -3);
        assert_eq!(floor_div(12, -4), -3);
        assert_eq!(floor_div(0, -4), 0);
    }

    #[test]
    fn same_signs_truncate() {
        assert_eq!(floor_div(7, 2), 3);
        assert_eq!(floor_div(-7, -2), 3);
    }

    #[test]
    fn opposite_signs_round_down() {
        assert_eq!(floor_div(-7, 2), -4);
        assert_eq!(floor_div(7, -2), -4);
        assert_eq!(floor_div(-1, 3), -1);
    }

    #[test]
    fn pressure_scale_operands() {
        // numerator and divisor of the pressure step for an all-0xFF frame
        // against the sample calibration
        let numerator = -863_588_226_550_978_125;
        let denominator = 474_106_915;
        assert_eq!(floor_div(numerator, denominator), -1_821_505_233);
        assert_eq!(numerator / denominator, -1_821_505_232);
    }

    #[test]
    fn mul_shr_small_values() {
        assert_eq!(mul_shr(3, 5, 1), 7);
        assert_eq!(mul_shr(-3, 5, 1), -8);
        assert_eq!(mul_shr(3, -5, 1), -8);
        assert_eq!(mul_shr(0, 123_456, 25), 0);
    }

    #[test]
    fn mul_shr_past_i128_product() {
        assert_eq!(mul_shr(1 << 10, 1 << 120, 25), 1 << 105);
        // -32768 * (2^116 + 12345) would not fit in i128
        assert_eq!(
            mul_shr(-32_768, (1 << 116) + 12_345, 25),
            -(1 << 106) - 13
        );
    }
}
