#[macro_use]
extern crate log;

use std::{num::NonZeroUsize, path::PathBuf};

use bmestream::{CaptureFormat, load_capture, report};
use bmestream_algos::{SampleSeries, SeriesSummary};
use bmestream_codec::{CalibrationSet, split_capture};
use clap::{Parser, Subcommand};
use dotenv::dotenv;

#[derive(Parser)]
pub struct BmeStreamCli {
    #[arg(env, long)]
    pub capture_file: PathBuf,
    #[arg(env, long, value_enum, default_value_t = CaptureFormat::Hex)]
    pub capture_format: CaptureFormat,
    /// Threads used for compensation, 1 keeps everything on the main thread
    #[arg(env, long, default_value = "1")]
    pub workers: NonZeroUsize,
    #[clap(subcommand)]
    pub subcommand: BmeStreamCommand,
}

#[derive(Subcommand)]
pub enum BmeStreamCommand {
    ///
    /// Print one line per decoded sample frame
    ///
    Decode {
        #[arg(long)]
        json: bool,
    },
    ///
    /// Print the factory calibration coefficients
    ///
    Calibration {
        #[arg(long)]
        json: bool,
    },
    ///
    /// Print min, max, mean and standard deviation of every channel
    ///
    Stats,
}

fn main() -> anyhow::Result<()> {
    if let Err(error) = dotenv() {
        println!("{}", error);
    }

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = BmeStreamCli::parse();
    let buffer = load_capture(&cli.capture_file, cli.capture_format)?;
    let (calibration, frames) = split_capture(&buffer)?;
    info!("Calibration loaded");

    match cli.subcommand {
        BmeStreamCommand::Decode { json } => {
            let series = decode(&calibration, frames, cli.workers);
            if json {
                println!("{}", report::render_json(&series)?);
            } else {
                println!("{}", report::render_table(&series));
            }
        }
        BmeStreamCommand::Calibration { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(&calibration)?);
            } else {
                println!("{}", calibration);
            }
        }
        BmeStreamCommand::Stats => {
            let series = decode(&calibration, frames, cli.workers);
            println!("{}", SeriesSummary::new(&series));
        }
    }

    Ok(())
}

fn decode(calibration: &CalibrationSet, frames: &[u8], workers: NonZeroUsize) -> SampleSeries {
    let series = SampleSeries::decode_parallel(calibration, frames, workers);
    info!("Decoded {} measurements", series.len());
    series
}
