#[macro_use]
extern crate serde;

mod error;
pub use error::Bme280Error;

pub mod constants;

mod helpers;

mod calibration;
pub use calibration::CalibrationSet;

mod frame;
pub use frame::{AdcReading, FrameDecoder, RawFrame};

mod capture;
pub use capture::{decode_hex_capture, split_capture};
