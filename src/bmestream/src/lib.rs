mod input;
pub use input::{CaptureFormat, load_capture, read_capture};

pub mod report;
