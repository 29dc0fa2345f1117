use std::{fs, path::Path};

use anyhow::Context;
use bmestream_codec::decode_hex_capture;
use clap::ValueEnum;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum CaptureFormat {
    /// Hex text, whitespace between bytes is ignored
    #[default]
    Hex,
    /// Raw bytes as read from the sensor
    Binary,
}

pub fn load_capture(path: &Path, format: CaptureFormat) -> anyhow::Result<Vec<u8>> {
    let contents =
        fs::read(path).with_context(|| format!("Failed to read capture `{}`", path.display()))?;
    read_capture(&contents, format)
        .with_context(|| format!("Failed to decode capture `{}`", path.display()))
}

pub fn read_capture(contents: &[u8], format: CaptureFormat) -> anyhow::Result<Vec<u8>> {
    match format {
        CaptureFormat::Hex => {
            let text = std::str::from_utf8(contents).context("Hex capture is not valid UTF-8")?;
            Ok(decode_hex_capture(text)?)
        }
        CaptureFormat::Binary => Ok(contents.to_vec()),
    }
}
