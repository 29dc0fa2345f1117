use std::fmt::{self, Display};

use crate::{
    SampleSeries,
    helpers::stats::{max, mean, min, round_float, std_dev},
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ChannelStats {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub std: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct SeriesSummary {
    pub count: usize,
    pub temperature: ChannelStats,
    pub pressure: ChannelStats,
    pub humidity: ChannelStats,
}

impl ChannelStats {
    pub fn new(values: &[f64]) -> Self {
        let mean = mean(values);
        Self {
            min: min(values),
            max: max(values),
            mean,
            std: std_dev(values, mean),
        }
    }
}

impl SeriesSummary {
    pub fn new(series: &SampleSeries) -> Self {
        Self {
            count: series.len(),
            temperature: ChannelStats::new(&series.temperatures()),
            pressure: ChannelStats::new(&series.pressures()),
            humidity: ChannelStats::new(&series.humidities()),
        }
    }
}

impl ChannelStats {
    fn fmt_with_unit(&self, f: &mut fmt::Formatter<'_>, name: &str, unit: &str) -> fmt::Result {
        f.write_fmt(format_args!(
            "{}: min {} {unit}, max {} {unit}, mean {} {unit}, std {}",
            name,
            round_float(self.min),
            round_float(self.max),
            round_float(self.mean),
            round_float(self.std),
        ))
    }
}

impl Display for SeriesSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Samples: {}", self.count)?;
        self.temperature.fmt_with_unit(f, "Temperature", "°C")?;
        writeln!(f)?;
        self.pressure.fmt_with_unit(f, "Pressure", "hPa")?;
        writeln!(f)?;
        self.humidity.fmt_with_unit(f, "Humidity", "%RH")
    }
}
