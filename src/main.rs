mod cli;

use anyhow::Result;
use clap::Parser;
use cli::Cli;
use log::info;
use weather_trends::{Country, PlotRenderer, WeatherTrends};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    info!("Initialising.");
    let client = match cli.cache_dir {
        Some(folder) => WeatherTrends::with_cache_folder(folder)?,
        None => WeatherTrends::new()?,
    }
    .write_snapshots(!cli.no_cache_write);
    let country = Country::default();

    info!("Locating data.");
    let analysis = client
        .analyse()
        .keyword(&cli.keyword)
        .state(cli.state)
        .weather_variable(cli.weather_variable)
        .country(country)
        .smoothing_window(usize::try_from(cli.smooth)?)
        .call()?;

    println!(
        "Correlation between \"{}\" and {} in {}: {:.3}",
        analysis.keyword,
        analysis.weather_variable,
        country.geo_code(cli.state),
        analysis.correlation
    );

    info!("Plotting.");
    let written = PlotRenderer::new(&cli.figures_dir)
        .with_saving(!cli.no_save_plots)
        .render(&analysis, country, cli.state)?;
    for path in written {
        println!("Figure saved to `{}`", path.display());
    }
    Ok(())
}
