#[macro_use]
extern crate serde;

#[macro_use]
extern crate log;

pub(crate) mod compensation;
pub use compensation::{CompensationEngine, Measurement};

pub(crate) mod series;
pub use series::SampleSeries;

pub(crate) mod summary;
pub use summary::{ChannelStats, SeriesSummary};

pub mod helpers;
