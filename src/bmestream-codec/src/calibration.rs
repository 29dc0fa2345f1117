use std::fmt;

use crate::{
    constants::{CALIBRATION_MARKER, CAPTURE_HEADER_LEN},
    error::Bme280Error,
    helpers::BufferReader,
};

/// Factory compensation coefficients of a BME280, as laid out in the
/// 32-byte calibration block that opens every capture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalibrationSet {
    pub t1: u16,
    pub t2: i16,
    pub t3: i16,
    pub p1: u16,
    pub p2: i16,
    pub p3: i16,
    pub p4: i16,
    pub p5: i16,
    pub p6: i16,
    pub p7: i16,
    pub p8: i16,
    pub p9: i16,
    pub h1: u8,
    pub h2: i16,
    pub h3: u8,
    /// 12 bits packed across two bytes, see [`CalibrationSet::parse`].
    pub h4: i16,
    /// 12 bits packed across two bytes, see [`CalibrationSet::parse`].
    pub h5: i16,
    pub h6: i8,
}

impl CalibrationSet {
    /// Parses the calibration block at the start of `buffer`.
    ///
    /// `buffer[0]` must be [`CALIBRATION_MARKER`], followed by at least
    /// [`CALIBRATION_LEN`] bytes. Anything past those 33 bytes is ignored.
    ///
    /// H4 and H5 share the nibbles of one byte:
    /// `h4 = calib[28] << 4 | calib[29] & 0x0F` and
    /// `h5 = calib[30] << 4 | calib[29] >> 4`.
    pub fn parse(buffer: &[u8]) -> Result<Self, Bme280Error> {
        if buffer.first() != Some(&CALIBRATION_MARKER) {
            return Err(Bme280Error::MalformedInput(
                "calibration start marker missing",
            ));
        }

        if buffer.len() < CAPTURE_HEADER_LEN {
            return Err(Bme280Error::MalformedInput(
                "buffer shorter than calibration block",
            ));
        }

        Self::from_block(&buffer[1..CAPTURE_HEADER_LEN])
    }

    fn from_block(mut calib: &[u8]) -> Result<Self, Bme280Error> {
        let t1 = calib.read_u16_le()?;
        let t2 = calib.read_i16_le()?;
        let t3 = calib.read_i16_le()?;

        let p1 = calib.read_u16_le()?;
        let p2 = calib.read_i16_le()?;
        let p3 = calib.read_i16_le()?;
        let p4 = calib.read_i16_le()?;
        let p5 = calib.read_i16_le()?;
        let p6 = calib.read_i16_le()?;
        let p7 = calib.read_i16_le()?;
        let p8 = calib.read_i16_le()?;
        let p9 = calib.read_i16_le()?;

        let h1 = calib.pop_front()?;
        let h2 = calib.read_i16_le()?;
        let h3 = calib.pop_front()?;
        let [h4_msb, shared, h5_msb] = calib.read::<3>()?;
        let h6 = calib.read_i8()?;

        Ok(Self {
            t1,
            t2,
            t3,
            p1,
            p2,
            p3,
            p4,
            p5,
            p6,
            p7,
            p8,
            p9,
            h1,
            h2,
            h3,
            h4: (i16::from(h4_msb) << 4) | i16::from(shared & 0x0F),
            h5: (i16::from(h5_msb) << 4) | i16::from(shared >> 4),
            h6,
        })
    }
}

impl fmt::Display for CalibrationSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "T1: {}\nT2: {}\nT3: {}", self.t1, self.t2, self.t3)?;
        writeln!(
            f,
            "P1: {}\nP2: {}\nP3: {}\nP4: {}\nP5: {}\nP6: {}\nP7: {}\nP8: {}\nP9: {}",
            self.p1, self.p2, self.p3, self.p4, self.p5, self.p6, self.p7, self.p8, self.p9
        )?;
        write!(
            f,
            "H1: {}\nH2: {}\nH3: {}\nH4: {}\nH5: {}\nH6: {}",
            self.h1, self.h2, self.h3, self.h4, self.h5, self.h6
        )
    }
}
