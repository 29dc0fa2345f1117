use crate::constants::{FRAME_LEN, FRAME_MARKER};

/// Uncompensated ADC output of one sample frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdcReading {
    /// 20-bit raw temperature.
    pub temperature: u32,
    /// 20-bit raw pressure.
    pub pressure: u32,
    /// 16-bit raw humidity.
    pub humidity: u16,
}

/// One marker-prefixed 9-byte frame borrowed from the capture buffer.
#[derive(Debug, Clone, Copy)]
pub struct RawFrame<'a>(&'a [u8; FRAME_LEN]);

impl<'a> RawFrame<'a> {
    /// Returns the frame starting at `offset`, if a marker sits there and the
    /// buffer holds the whole frame.
    pub fn at(buffer: &'a [u8], offset: usize) -> Option<Self> {
        let frame = buffer.get(offset..)?.first_chunk::<FRAME_LEN>()?;
        (frame[0] == FRAME_MARKER).then_some(Self(frame))
    }

    pub fn adc(&self) -> AdcReading {
        let b = self.0;
        AdcReading {
            temperature: Self::unpack_20bit(b[1], b[2], b[3]),
            pressure: Self::unpack_20bit(b[4], b[5], b[6]),
            humidity: u16::from_be_bytes([b[7], b[8]]),
        }
    }

    fn unpack_20bit(msb: u8, lsb: u8, xlsb: u8) -> u32 {
        (u32::from(msb) << 12) | (u32::from(lsb) << 4) | (u32::from(xlsb) >> 4)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    SeekingSentinel,
    ExtractingFrame,
    Exhausted,
}

/// Single forward pass over the frame region of a capture.
///
/// Bytes that are not a frame marker are skipped one at a time until the
/// next marker. A marker followed by fewer than 8 bytes ends the scan, the
/// fragment is dropped.
#[derive(Debug, Clone)]
pub struct FrameDecoder<'a> {
    buffer: &'a [u8],
    cursor: usize,
    state: ScanState,
    skipped: usize,
}

impl<'a> FrameDecoder<'a> {
    /// `frames` is the capture with its calibration prefix already removed.
    pub fn scan(frames: &'a [u8]) -> Self {
        Self {
            buffer: frames,
            cursor: 0,
            state: ScanState::SeekingSentinel,
            skipped: 0,
        }
    }

    /// Bytes skipped so far while looking for a frame marker.
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// Bytes left behind the cursor once the scan is over.
    pub fn remaining(&self) -> usize {
        self.buffer.len().saturating_sub(self.cursor)
    }

    pub fn is_exhausted(&self) -> bool {
        self.state == ScanState::Exhausted
    }

    pub fn next_frame(&mut self) -> Option<RawFrame<'a>> {
        loop {
            match self.state {
                ScanState::SeekingSentinel => match self.buffer.get(self.cursor) {
                    Some(&FRAME_MARKER) => self.state = ScanState::ExtractingFrame,
                    Some(_) => {
                        self.cursor += 1;
                        self.skipped += 1;
                    }
                    None => self.state = ScanState::Exhausted,
                },
                ScanState::ExtractingFrame => {
                    let Some(frame) = RawFrame::at(self.buffer, self.cursor) else {
                        self.state = ScanState::Exhausted;
                        continue;
                    };
                    self.cursor += FRAME_LEN;
                    self.state = ScanState::SeekingSentinel;
                    return Some(frame);
                }
                ScanState::Exhausted => return None,
            }
        }
    }
}

impl Iterator for FrameDecoder<'_> {
    type Item = AdcReading;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_frame().map(|frame| frame.adc())
    }
}

impl std::iter::FusedIterator for FrameDecoder<'_> {}
