use crate::{CalibrationSet, constants::CAPTURE_HEADER_LEN, error::Bme280Error};

/// Decodes a hex-encoded capture. ASCII whitespace between bytes (usually a
/// newline after the calibration block and after every frame) is ignored.
pub fn decode_hex_capture(text: &str) -> Result<Vec<u8>, Bme280Error> {
    let compact: String = text
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();
    Ok(hex::decode(compact)?)
}

/// Parses the calibration block and returns it together with the frame
/// region that follows it.
pub fn split_capture(buffer: &[u8]) -> Result<(CalibrationSet, &[u8]), Bme280Error> {
    let calibration = CalibrationSet::parse(buffer)?;
    Ok((calibration, &buffer[CAPTURE_HEADER_LEN..]))
}
