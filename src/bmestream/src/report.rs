use bmestream_algos::{Measurement, SampleSeries};

pub fn format_row(index: usize, measurement: &Measurement) -> String {
    format!(
        "{:03} | {:.2} °C | {:.2} hPa | {:.2} %RH",
        index, measurement.temperature, measurement.pressure, measurement.humidity
    )
}

pub fn render_table(series: &SampleSeries) -> String {
    series
        .iter()
        .enumerate()
        .map(|(index, measurement)| format_row(index, measurement))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_json(series: &SampleSeries) -> serde_json::Result<String> {
    serde_json::to_string_pretty(series)
}
