use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum Bme280Error {
    #[error("malformed input: {0}")]
    MalformedInput(&'static str),
    #[error("invalid hex capture: {0}")]
    InvalidHex(#[from] hex::FromHexError),
}

impl Bme280Error {
    pub fn is_malformed_input(&self) -> bool {
        matches!(self, Self::MalformedInput(_))
    }
}
