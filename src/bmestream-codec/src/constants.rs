/// First byte of every capture, directly followed by the calibration block.
pub const CALIBRATION_MARKER: u8 = 0xFE;

/// Size of the factory calibration block (without its marker).
pub const CALIBRATION_LEN: usize = 32;

/// Marker byte plus calibration block. Sample frames start right after it.
pub const CAPTURE_HEADER_LEN: usize = 1 + CALIBRATION_LEN;

/// First byte of every sample frame.
pub const FRAME_MARKER: u8 = 0xFF;

/// Marker byte plus 8 payload bytes.
pub const FRAME_LEN: usize = 9;
