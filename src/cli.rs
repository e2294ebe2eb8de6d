//! Command line interface.

use clap::Parser;
use std::path::PathBuf;
use weather_trends::{State, WeatherVariable};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
/// Correlates weekly search interest in a keyword with a state's weather observations
pub struct Cli {
    /// Search term to fetch interest over time for
    #[arg(default_value = "depression")]
    pub keyword: String,

    /// Australian state or territory code (VIC, NSW, QLD, ACT, SA, WA, NT, TAS)
    #[arg(default_value = "VIC")]
    pub state: State,

    /// Weather variable (rain, maxTemp, minTemp, maxRH, minRH, wind, radiation)
    #[arg(default_value = "radiation")]
    pub weather_variable: WeatherVariable,

    /// Centered rolling-mean window in weeks
    #[arg(default_value_t = 4, value_parser = clap::value_parser!(u64).range(1..))]
    pub smooth: u64,

    /// Snapshot cache folder [default: platform cache directory]
    #[arg(long)]
    pub cache_dir: Option<PathBuf>,

    /// Folder the figures are written to
    #[arg(long, default_value = "figures")]
    pub figures_dir: PathBuf,

    /// Do not write downloaded data to the cache
    #[arg(long)]
    pub no_cache_write: bool,

    /// Do not write any figures
    #[arg(long)]
    pub no_save_plots: bool,
}
