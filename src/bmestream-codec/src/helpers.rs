use crate::error::Bme280Error;

type Result<T> = std::result::Result<T, InvalidIndexError>;

#[derive(Debug)]
pub struct InvalidIndexError;

/// Forward-only reader over a borrowed byte slice. Every successful read
/// advances the slice past the consumed bytes.
pub trait BufferReader {
    fn read<const N: usize>(&mut self) -> Result<[u8; N]>;
    fn pop_front(&mut self) -> Result<u8>;

    fn read_u16_le(&mut self) -> Result<u16> {
        Ok(u16::from_le_bytes(self.read()?))
    }
    fn read_i16_le(&mut self) -> Result<i16> {
        Ok(i16::from_le_bytes(self.read()?))
    }
    fn read_i8(&mut self) -> Result<i8> {
        Ok(i8::from_le_bytes(self.read()?))
    }
}

impl<'a> BufferReader for &'a [u8] {
    fn read<const N: usize>(&mut self) -> Result<[u8; N]> {
        let buffer: &'a [u8] = *self;
        let (head, rest) = buffer.split_first_chunk::<N>().ok_or(InvalidIndexError)?;
        *self = rest;
        Ok(*head)
    }

    fn pop_front(&mut self) -> Result<u8> {
        let buffer: &'a [u8] = *self;
        let (first, rest) = buffer.split_first().ok_or(InvalidIndexError)?;
        *self = rest;
        Ok(*first)
    }
}

impl From<InvalidIndexError> for Bme280Error {
    fn from(_: InvalidIndexError) -> Self {
        Self::MalformedInput("unexpected end of buffer")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_extracts_from_front() {
        let data = [0x01, 0x02, 0x03, 0x04];
        let mut buf: &[u8] = &data;
        let result: [u8; 2] = buf.read().unwrap();
        assert_eq!(result, [0x01, 0x02]);
        assert_eq!(buf, &[0x03, 0x04]);
    }

    #[test]
    fn read_insufficient_data_errors() {
        let mut buf: &[u8] = &[0x01];
        let result: Result<[u8; 4]> = buf.read();
        assert!(result.is_err());
        assert_eq!(buf, &[0x01]);
    }

    #[test]
    fn pop_front_returns_first_byte() {
        let mut buf: &[u8] = &[0xAA, 0xBB];
        assert_eq!(buf.pop_front().unwrap(), 0xAA);
        assert_eq!(buf, &[0xBB]);
    }

    #[test]
    fn pop_front_empty_errors() {
        let mut buf: &[u8] = &[];
        assert!(buf.pop_front().is_err());
    }

    #[test]
    fn read_u16_le_is_low_byte_first() {
        let mut buf: &[u8] = &[0x34, 0x12, 0xFF];
        assert_eq!(buf.read_u16_le().unwrap(), 0x1234);
        assert_eq!(buf, &[0xFF]);
    }

    #[test]
    fn read_i16_le_reinterprets_top_bit() {
        // 0xD641 - 65536
        let mut buf: &[u8] = &[0x41, 0xD6];
        assert_eq!(buf.read_i16_le().unwrap(), -10687);
    }

    #[test]
    fn underrun_is_malformed_input() {
        let mut buf: &[u8] = &[0x01];
        let err: Bme280Error = buf.read_u16_le().unwrap_err().into();
        assert_eq!(err, Bme280Error::MalformedInput("unexpected end of buffer"));
    }

    #[test]
    fn read_i8_reinterprets_byte() {
        let mut buf: &[u8] = &[0xFF, 0x1E];
        assert_eq!(buf.read_i8().unwrap(), -1);
        assert_eq!(buf.read_i8().unwrap(), 30);
    }
}
