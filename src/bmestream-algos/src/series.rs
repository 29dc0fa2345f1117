use std::{num::NonZeroUsize, thread};

use bmestream_codec::{AdcReading, Bme280Error, CalibrationSet, FrameDecoder, split_capture};

use crate::{CompensationEngine, Measurement};

/// Measurements in the order their frames appear in the capture.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SampleSeries {
    measurements: Vec<Measurement>,
}

impl SampleSeries {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, measurement: Measurement) {
        self.measurements.push(measurement);
    }

    /// Drives the decoder to exhaustion, compensating every frame.
    pub fn decode(calibration: &CalibrationSet, frames: &[u8]) -> Self {
        let mut decoder = FrameDecoder::scan(frames);
        let series = Self::from_readings(calibration, decoder.by_ref());
        Self::log_scan(&decoder, &series);
        series
    }

    /// Same result as [`SampleSeries::decode`], with compensation spread over
    /// `workers` threads. Frame extraction itself stays sequential.
    pub fn decode_parallel(
        calibration: &CalibrationSet,
        frames: &[u8],
        workers: NonZeroUsize,
    ) -> Self {
        let mut decoder = FrameDecoder::scan(frames);
        let readings: Vec<AdcReading> = decoder.by_ref().collect();
        let series = Self::from_readings_parallel(calibration, &readings, workers);
        Self::log_scan(&decoder, &series);
        series
    }

    /// Parses a whole capture: calibration block followed by sample frames.
    pub fn from_capture(buffer: &[u8]) -> Result<(CalibrationSet, Self), Bme280Error> {
        let (calibration, frames) = split_capture(buffer)?;
        let series = Self::decode(&calibration, frames);
        Ok((calibration, series))
    }

    pub fn from_readings(
        calibration: &CalibrationSet,
        readings: impl IntoIterator<Item = AdcReading>,
    ) -> Self {
        let mut series = Self::new();
        for reading in readings {
            series.push(CompensationEngine::compute(calibration, reading));
        }
        series
    }

    /// Every worker owns a contiguous run of output slots, so the result is
    /// in reading order no matter which worker finishes first.
    pub fn from_readings_parallel(
        calibration: &CalibrationSet,
        readings: &[AdcReading],
        workers: NonZeroUsize,
    ) -> Self {
        if workers.get() == 1 || readings.len() < 2 {
            return Self::from_readings(calibration, readings.iter().copied());
        }

        let mut measurements = vec![Measurement::default(); readings.len()];
        let chunk_size = readings.len().div_ceil(workers.get());

        thread::scope(|scope| {
            for (slots, chunk) in measurements
                .chunks_mut(chunk_size)
                .zip(readings.chunks(chunk_size))
            {
                scope.spawn(move || {
                    for (slot, reading) in slots.iter_mut().zip(chunk) {
                        *slot = CompensationEngine::compute(calibration, *reading);
                    }
                });
            }
        });

        Self { measurements }
    }

    fn log_scan(decoder: &FrameDecoder<'_>, series: &Self) {
        if decoder.skipped() > 0 {
            debug!("Skipped {} bytes while seeking frame markers", decoder.skipped());
        }
        if decoder.remaining() > 0 {
            debug!("Dropped truncated trailing fragment of {} bytes", decoder.remaining());
        }
        let degenerate = series.iter().filter(|m| m.pressure == 0.0).count();
        if degenerate > 0 {
            warn!("{} measurements hit the zero pressure divisor", degenerate);
        }
    }

    pub fn len(&self) -> usize {
        self.measurements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.measurements.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Measurement> {
        self.measurements.iter()
    }

    pub fn as_slice(&self) -> &[Measurement] {
        &self.measurements
    }

    pub fn temperatures(&self) -> Vec<f64> {
        self.iter().map(|m| m.temperature).collect()
    }

    pub fn pressures(&self) -> Vec<f64> {
        self.iter().map(|m| m.pressure).collect()
    }

    pub fn humidities(&self) -> Vec<f64> {
        self.iter().map(|m| m.humidity).collect()
    }
}

impl<'a> IntoIterator for &'a SampleSeries {
    type Item = &'a Measurement;
    type IntoIter = std::slice::Iter<'a, Measurement>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl FromIterator<Measurement> for SampleSeries {
    fn from_iter<I: IntoIterator<Item = Measurement>>(iter: I) -> Self {
        Self {
            measurements: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use bmestream_codec::decode_hex_capture;
    use rand::Rng;

    use super::*;

    const SAMPLE: &str = include_str!("../../../captures/sample.hex");

    fn sample_buffer() -> Vec<u8> {
        decode_hex_capture(SAMPLE).unwrap()
    }

    #[test]
    fn decodes_sample_capture() {
        let (_, series) = SampleSeries::from_capture(&sample_buffer()).unwrap();
        assert_eq!(series.len(), 41);
        assert_eq!(
            series.as_slice()[0],
            Measurement {
                temperature: 22.52,
                pressure: 916.855,
                humidity: 61.435546875,
            }
        );
        assert_eq!(series.as_slice()[1].temperature, 22.57);
        assert_eq!(series.as_slice()[2].temperature, 22.59);
        assert_eq!(series.as_slice()[2].pressure, 916.895859375);
        assert_eq!(series.as_slice()[2].humidity, 61.4443359375);
    }

    #[test]
    fn malformed_capture_propagates() {
        let mut buffer = sample_buffer();
        buffer[0] = 0x00;
        let err = SampleSeries::from_capture(&buffer).unwrap_err();
        assert!(err.is_malformed_input());
    }

    #[test]
    fn spurious_bytes_do_not_drop_frames() {
        let buffer = sample_buffer();
        let (calibration, frames) = split_capture(&buffer).unwrap();
        let expected = SampleSeries::decode(&calibration, frames);

        let mut noisy = Vec::new();
        for frame in frames.chunks(9) {
            noisy.extend_from_slice(frame);
            noisy.extend_from_slice(&[0x00, 0x42]);
        }
        assert_eq!(SampleSeries::decode(&calibration, &noisy), expected);
    }

    #[test]
    fn truncated_capture_loses_last_frame() {
        let buffer = sample_buffer();
        let (calibration, frames) = split_capture(&buffer).unwrap();
        let full = SampleSeries::decode(&calibration, frames);

        for cut in 1..9 {
            let truncated = SampleSeries::decode(&calibration, &frames[..frames.len() - cut]);
            assert_eq!(truncated.len(), full.len() - 1);
            assert_eq!(truncated.as_slice(), &full.as_slice()[..full.len() - 1]);
        }
    }

    #[test]
    fn header_only_capture_is_empty() {
        let buffer = sample_buffer();
        let (_, series) = SampleSeries::from_capture(&buffer[..33]).unwrap();
        assert!(series.is_empty());
    }

    #[test]
    fn parallel_matches_sequential_order() {
        let buffer = sample_buffer();
        let (calibration, frames) = split_capture(&buffer).unwrap();
        let sequential = SampleSeries::decode(&calibration, frames);

        for workers in [1, 2, 3, 8, 64] {
            let workers_nz = NonZeroUsize::new(workers).unwrap();
            let parallel = SampleSeries::decode_parallel(&calibration, frames, workers_nz);
            assert_eq!(parallel, sequential, "workers = {}", workers);
        }
    }

    #[test]
    fn parallel_preserves_order_for_random_readings() {
        let buffer = sample_buffer();
        let (calibration, _) = split_capture(&buffer).unwrap();
        let mut rng = rand::rng();
        let readings: Vec<AdcReading> = (0..1_000)
            .map(|_| AdcReading {
                temperature: rng.random_range(0..=0xFFFFF),
                pressure: rng.random_range(0..=0xFFFFF),
                humidity: rng.random(),
            })
            .collect();

        let sequential = SampleSeries::from_readings(&calibration, readings.iter().copied());
        let parallel = SampleSeries::from_readings_parallel(
            &calibration,
            &readings,
            NonZeroUsize::new(7).unwrap(),
        );
        assert_eq!(parallel, sequential);
    }

    #[test]
    fn channel_accessors_follow_series_order() {
        let (_, series) = SampleSeries::from_capture(&sample_buffer()).unwrap();
        let temperatures = series.temperatures();
        assert_eq!(temperatures.len(), series.len());
        assert_eq!(temperatures[0], 22.52);
        assert_eq!(series.pressures()[0], 916.855);
        assert_eq!(series.humidities()[0], 61.435546875);
    }

    #[test]
    fn serializes_as_array() {
        let series: SampleSeries = [Measurement {
            temperature: 21.5,
            pressure: 1013.25,
            humidity: 45.0,
        }]
        .into_iter()
        .collect();
        let json = serde_json::to_value(&series).unwrap();
        assert!(json.is_array());
        assert_eq!(json[0]["pressure"], 1013.25);
    }
}
