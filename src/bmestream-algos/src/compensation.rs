use bmestream_codec::{AdcReading, CalibrationSet};

use crate::helpers::fixed_point::{floor_div, mul_shr};

/// One compensated sample.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    /// Degrees Celsius.
    pub temperature: f64,
    /// Hectopascal. `0.0` when the pressure divisor collapses to zero.
    pub pressure: f64,
    /// Relative humidity in percent, within `0.0..=100.0`.
    pub humidity: f64,
}

/// BME280 integer compensation as documented in the datasheet (64-bit
/// pressure variant), evaluated in `i128` so no intermediate can overflow
/// for any 20-bit/16-bit ADC input.
pub struct CompensationEngine;

impl CompensationEngine {
    /// Upper saturation bound of the humidity accumulator, 100 %RH in Q22.10
    /// shifted left by 12.
    pub const HUMIDITY_MAX: i128 = 419_430_400;

    pub fn compute(calibration: &CalibrationSet, reading: AdcReading) -> Measurement {
        let t_fine = Self::t_fine(calibration, reading.temperature);

        let temperature = Self::temperature_centi(t_fine) as f64 / 100.0;
        let pressure = match Self::pressure_q24_8(calibration, t_fine, reading.pressure) {
            Some(pressure) => pressure as f64 / 25600.0,
            None => 0.0,
        };
        let humidity = (Self::humidity_raw(calibration, t_fine, reading.humidity) >> 12) as f64
            / 1024.0;

        Measurement {
            temperature,
            pressure,
            humidity,
        }
    }

    /// Fine-resolution temperature carried into the pressure and humidity
    /// formulas.
    pub fn t_fine(calibration: &CalibrationSet, adc_t: u32) -> i128 {
        let adc_t = i128::from(adc_t);
        let t1 = i128::from(calibration.t1);
        let t2 = i128::from(calibration.t2);
        let t3 = i128::from(calibration.t3);

        let var1 = (((adc_t >> 3) - (t1 << 1)) * t2) >> 11;
        let x = (adc_t >> 4) - t1;
        let var2 = (((x * x) >> 12) * t3) >> 14;
        var1 + var2
    }

    /// Temperature in hundredths of a degree Celsius.
    pub fn temperature_centi(t_fine: i128) -> i128 {
        (t_fine * 5 + 128) >> 8
    }

    /// Pressure in Pa as Q24.8, or `None` when the divisor is zero.
    pub fn pressure_q24_8(calibration: &CalibrationSet, t_fine: i128, adc_p: u32) -> Option<i128> {
        let p1 = i128::from(calibration.p1);
        let p2 = i128::from(calibration.p2);
        let p3 = i128::from(calibration.p3);
        let p4 = i128::from(calibration.p4);
        let p5 = i128::from(calibration.p5);
        let p6 = i128::from(calibration.p6);
        let p7 = i128::from(calibration.p7);
        let p8 = i128::from(calibration.p8);
        let p9 = i128::from(calibration.p9);

        let var1 = t_fine - 128_000;
        let var2 = var1 * var1 * p6 + ((var1 * p5) << 17) + (p4 << 35);
        let var1 = ((var1 * var1 * p3) >> 8) + ((var1 * p2) << 12);
        let var1 = (((1_i128 << 47) + var1) * p1) >> 33;

        if var1 == 0 {
            return None;
        }

        let p = 1_048_576 - i128::from(adc_p);
        let p = floor_div(((p << 31) - var2) * 3125, var1);

        // p reaches about 2^71 when the divisor is 1, so p9 * p_13^2 only fits
        // once the square is split around the shift.
        let p_13 = p >> 13;
        let var1 = mul_shr(p9, p_13 * p_13, 25);
        let var2 = (p8 * p) >> 19;
        Some(((p + var1 + var2) >> 8) + (p7 << 4))
    }

    /// Humidity in %RH as Q22.10 shifted left by 12, clamped to
    /// `0..=HUMIDITY_MAX`.
    pub fn humidity_raw(calibration: &CalibrationSet, t_fine: i128, adc_h: u16) -> i128 {
        let adc_h = i128::from(adc_h);
        let h1 = i128::from(calibration.h1);
        let h2 = i128::from(calibration.h2);
        let h3 = i128::from(calibration.h3);
        let h4 = i128::from(calibration.h4);
        let h5 = i128::from(calibration.h5);
        let h6 = i128::from(calibration.h6);

        let v = t_fine - 76_800;
        let offset = (((adc_h << 14) - (h4 << 20) - (h5 * v)) + 16_384) >> 15;
        let scale = ((((((v * h6) >> 10) * (((v * h3) >> 11) + 32_768)) >> 10) + 2_097_152)
            * h2
            + 8_192)
            >> 14;
        let v = offset * scale;
        let v = v - (((((v >> 15) * (v >> 15)) >> 7) * h1) >> 4);
        v.clamp(0, Self::HUMIDITY_MAX)
    }
}
