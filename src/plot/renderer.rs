use crate::analysis::engine::Analysis;
use crate::analysis::periodogram::Periodogram;
use crate::plot::error::PlotError;
use crate::types::country::Country;
use crate::types::state::State;
use crate::types::weather_variable::WeatherVariable;
use crate::utils::{ensure_dir_exists, file_name_component};
use chrono::{Duration, NaiveDate};
use log::{info, warn};
use plotters::coord::types::RangedDate;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::series::DashedLineSeries;
use std::ops::Range;
use std::path::{Path, PathBuf};

const DEFAULT_SIZE: (u32, u32) = (1200, 700);
const CAPTION_FONT: (&str, u32) = ("sans-serif", 24);

/// Draws the figures for one [`Analysis`] into an output directory.
#[derive(Debug, Clone)]
pub struct PlotRenderer {
    output_dir: PathBuf,
    size: (u32, u32),
    save: bool,
}

impl PlotRenderer {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            size: DEFAULT_SIZE,
            save: true,
        }
    }

    /// Image size in pixels.
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.size = (width, height);
        self
    }

    /// When disabled, [`PlotRenderer::render`] draws nothing and writes nothing.
    pub fn with_saving(mut self, save: bool) -> Self {
        self.save = save;
        self
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Writes the time series (SVG and PNG), the scatter plot and both periodograms.
    ///
    /// Returns the written paths in drawing order. Returns an empty list when saving is
    /// disabled or the two series share no dates.
    pub fn render(
        &self,
        analysis: &Analysis,
        country: Country,
        state: State,
    ) -> Result<Vec<PathBuf>, PlotError> {
        if !self.save {
            info!("Plot saving disabled, skipping figures.");
            return Ok(Vec::new());
        }
        if analysis.common_dates.is_empty() {
            warn!("No common dates for '{}', nothing to plot.", analysis.keyword);
            return Ok(Vec::new());
        }
        ensure_dir_exists(&self.output_dir)
            .map_err(|e| PlotError::OutputDirCreation(self.output_dir.clone(), e))?;

        let region = country.geo_code(state);
        let stem = figure_stem(analysis, country, state);
        let mut written = Vec::with_capacity(5);

        written.push(self.write_svg(&format!("{stem}.svg"), |root| {
            draw_time_series(root, analysis, &region)
        })?);
        written.push(self.write_png(&format!("{stem}.png"), |root| {
            draw_time_series(root, analysis, &region)
        })?);
        written.push(self.write_svg(&format!("scatter_{stem}.svg"), |root| {
            draw_scatter(root, analysis, &region)
        })?);
        written.push(
            self.write_svg(&format!("periodogram_trend_{stem}.svg"), |root| {
                draw_periodogram(
                    root,
                    &analysis.interest_spectrum,
                    &format!("\"{}\" search periodogram for {region}", analysis.keyword),
                    &interest_power_label(&analysis.keyword),
                )
            })?,
        );
        written.push(
            self.write_svg(&format!("periodogram_weather_{stem}.svg"), |root| {
                draw_periodogram(
                    root,
                    &analysis.weather_spectrum,
                    &format!(
                        "{} periodogram for {region}",
                        analysis.weather_variable.column_name()
                    ),
                    &weather_power_label(analysis.weather_variable),
                )
            })?,
        );
        Ok(written)
    }

    fn write_svg<F>(&self, file_name: &str, draw: F) -> Result<PathBuf, PlotError>
    where
        F: FnOnce(&DrawingArea<SVGBackend<'_>, Shift>) -> Result<(), PlotError>,
    {
        let path = self.output_dir.join(file_name);
        {
            let root = SVGBackend::new(&path, self.size).into_drawing_area();
            draw(&root)?;
            root.present()?;
        }
        info!("Saved figure {}", path.display());
        Ok(path)
    }

    fn write_png<F>(&self, file_name: &str, draw: F) -> Result<PathBuf, PlotError>
    where
        F: FnOnce(&DrawingArea<BitMapBackend<'_>, Shift>) -> Result<(), PlotError>,
    {
        let path = self.output_dir.join(file_name);
        {
            let root = BitMapBackend::new(&path, self.size).into_drawing_area();
            draw(&root)?;
            root.present()?;
        }
        info!("Saved figure {}", path.display());
        Ok(path)
    }
}

/// `{var}_{keyword}_{country}_{state}`, with the keyword made safe for a file name.
fn figure_stem(analysis: &Analysis, country: Country, state: State) -> String {
    format!(
        "{}_{}_{}_{}",
        analysis.weather_variable.column_name(),
        file_name_component(&analysis.keyword),
        country.code(),
        state.code()
    )
}

fn interest_label(keyword: &str) -> String {
    format!("{keyword} [search volume]")
}

fn weather_label(variable: WeatherVariable) -> String {
    format!("{} [{}]", variable.column_name(), variable.unit())
}

/// Power is in the squared unit of the series.
fn interest_power_label(keyword: &str) -> String {
    format!("{keyword} [(search volume)²]")
}

fn weather_power_label(variable: WeatherVariable) -> String {
    format!("{} [({})²]", variable.column_name(), variable.unit())
}

/// Padded bounds of the finite values, or `0..1` when there are none.
fn value_range(values: impl IntoIterator<Item = f64>) -> Range<f64> {
    let (lo, hi) = values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });
    if lo > hi {
        return 0.0..1.0;
    }
    let pad = if hi > lo {
        (hi - lo) * 0.05
    } else {
        lo.abs().max(1.0) * 0.05
    };
    lo - pad..hi + pad
}

/// Bounds for a log axis over the strictly positive finite values.
fn positive_range(values: impl IntoIterator<Item = f64>) -> Range<f64> {
    let (lo, hi) = values
        .into_iter()
        .filter(|v| v.is_finite() && *v > 0.0)
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });
    if lo > hi {
        return 1e-6..1.0;
    }
    lo / 2.0..hi * 2.0
}

/// Splits a series into runs of consecutive finite points so gaps stay visible.
fn finite_runs(dates: &[NaiveDate], values: &[Option<f64>]) -> Vec<Vec<(NaiveDate, f64)>> {
    let mut runs = Vec::new();
    let mut current = Vec::new();
    for (date, value) in dates.iter().zip(values) {
        match value {
            Some(v) if v.is_finite() => current.push((*date, *v)),
            _ => {
                if !current.is_empty() {
                    runs.push(std::mem::take(&mut current));
                }
            }
        }
    }
    if !current.is_empty() {
        runs.push(current);
    }
    runs
}

fn date_range(dates: &[NaiveDate]) -> Range<NaiveDate> {
    match (dates.first(), dates.last()) {
        (Some(first), Some(last)) if first < last => *first..*last,
        (Some(first), _) => *first..*first + Duration::weeks(1),
        _ => NaiveDate::default()..NaiveDate::default() + Duration::weeks(1),
    }
}

fn draw_time_series<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    analysis: &Analysis,
    region: &str,
) -> Result<(), PlotError> {
    root.fill(&WHITE)?;

    let dates = &analysis.common_dates;
    let interest = &analysis.smoothed_interest;
    let weather = &analysis.smoothed_weather;
    let variable = analysis.weather_variable;
    let x_range = date_range(dates);

    let mut chart = ChartBuilder::on(root)
        .caption(format!("Time series for {region}"), CAPTION_FONT)
        .margin(12)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .right_y_label_area_size(60)
        .build_cartesian_2d(
            RangedDate::from(x_range.clone()),
            value_range(interest.iter().flatten().copied()),
        )?
        .set_secondary_coord(
            RangedDate::from(x_range),
            value_range(weather.iter().flatten().copied()),
        );

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_desc("date")
        .y_desc(interest_label(&analysis.keyword))
        .x_label_formatter(&|d: &NaiveDate| d.format("%Y-%m").to_string())
        .draw()?;
    chart
        .configure_secondary_axes()
        .y_desc(weather_label(variable))
        .draw()?;

    for run in finite_runs(dates, interest) {
        chart.draw_series(LineSeries::new(run, BLUE.stroke_width(2)))?;
    }
    chart
        .draw_series(std::iter::empty::<PathElement<(NaiveDate, f64)>>())?
        .label(analysis.keyword.as_str())
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], BLUE.stroke_width(2)));

    for run in finite_runs(dates, weather) {
        chart.draw_secondary_series(DashedLineSeries::new(run, 6, 4, RED.stroke_width(2)))?;
    }
    chart
        .draw_secondary_series(std::iter::empty::<PathElement<(NaiveDate, f64)>>())?
        .label(variable.column_name())
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], RED.stroke_width(2)));

    chart
        .draw_series(std::iter::empty::<PathElement<(NaiveDate, f64)>>())?
        .label(format!("ρ = {:.2}", analysis.correlation))
        .legend(|(x, y)| EmptyElement::at((x, y)));

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;
    Ok(())
}

fn draw_scatter<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    analysis: &Analysis,
    region: &str,
) -> Result<(), PlotError> {
    root.fill(&WHITE)?;

    let points: Vec<(f64, f64)> = analysis
        .smoothed_weather
        .iter()
        .zip(&analysis.smoothed_interest)
        .filter_map(|pair| match pair {
            (Some(x), Some(y)) if x.is_finite() && y.is_finite() => Some((*x, *y)),
            _ => None,
        })
        .collect();
    let variable = analysis.weather_variable;

    let mut chart = ChartBuilder::on(root)
        .caption(format!("Scatterplot for {region}"), CAPTION_FONT)
        .margin(12)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(
            value_range(points.iter().map(|(x, _)| *x)),
            value_range(points.iter().map(|(_, y)| *y)),
        )?;

    chart
        .configure_mesh()
        .x_desc(weather_label(variable))
        .y_desc(interest_label(&analysis.keyword))
        .draw()?;
    chart.draw_series(
        points
            .iter()
            .map(|point| Circle::new(*point, 3, BLUE.mix(0.7).filled())),
    )?;
    Ok(())
}

fn draw_periodogram<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    spectrum: &Periodogram,
    title: &str,
    power_label: &str,
) -> Result<(), PlotError> {
    root.fill(&WHITE)?;

    let points: Vec<(f64, f64)> = spectrum
        .frequencies
        .iter()
        .zip(&spectrum.power)
        .filter(|(f, p)| f.is_finite() && p.is_finite() && **p > 0.0)
        .map(|(f, p)| (*f, *p))
        .collect();
    let max_frequency = spectrum
        .frequencies
        .last()
        .copied()
        .filter(|f| *f > 0.0)
        .unwrap_or(1.0);

    let mut chart = ChartBuilder::on(root)
        .caption(title, CAPTION_FONT)
        .margin(12)
        .x_label_area_size(40)
        .y_label_area_size(70)
        .build_cartesian_2d(
            0.0..max_frequency,
            positive_range(points.iter().map(|(_, p)| *p)).log_scale(),
        )?;

    chart
        .configure_mesh()
        .x_desc("frequency [cycles per year]")
        .y_desc(power_label)
        .y_label_formatter(&|v: &f64| format!("{v:.0e}"))
        .draw()?;
    chart.draw_series(LineSeries::new(points, BLACK.stroke_width(1)))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::engine::analyse;
    use crate::types::frames::trend_series::TrendSeries;
    use crate::types::frames::weather_table::WeatherTable;
    use polars::df;

    fn sample_analysis(keyword: &str) -> Analysis {
        let start = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
        let days: Vec<NaiveDate> = (0..364).map(|i| start + Duration::days(i)).collect();
        let temps: Vec<f64> = (0..364).map(|i| 15.0 + (i as f64 / 58.0).sin() * 6.0).collect();
        let weather = WeatherTable::new(
            df!(
                "date" => days,
                "rain" => vec![0.0; 364],
                "maxTemp" => temps,
                "minTemp" => vec![8.0; 364],
                "maxRH" => vec![80.0; 364],
                "minRH" => vec![40.0; 364],
                "wind" => vec![3.0; 364],
                "radiation" => vec![12.0; 364],
            )
            .unwrap(),
        );
        let sundays: Vec<NaiveDate> = (0..52)
            .map(|i| NaiveDate::from_ymd_opt(2020, 1, 5).unwrap() + Duration::weeks(i))
            .collect();
        let interest: Vec<i64> = (0..52).map(|i| 30 + (i * 7) % 50).collect();
        let trend = TrendSeries::new(keyword, df!("date" => sundays, "interest" => interest).unwrap());
        analyse(&weather, &trend, WeatherVariable::MaxTemp, 3).unwrap()
    }

    #[test]
    fn figure_names_follow_variable_keyword_and_region() {
        let analysis = sample_analysis("hot chocolate");
        assert_eq!(
            figure_stem(&analysis, Country::Australia, State::Qld),
            "maxTemp_hot_chocolate_AU_QLD"
        );
        assert_eq!(
            figure_stem(&sample_analysis("AC/DC"), Country::Australia, State::Qld),
            "maxTemp_AC%2FDC_AU_QLD"
        );
    }

    #[test]
    fn power_axes_carry_squared_units() {
        assert_eq!(interest_power_label("flu"), "flu [(search volume)²]");
        assert_eq!(weather_power_label(WeatherVariable::Radiation), "radiation [(MJ/m²)²]");
        assert_eq!(weather_power_label(WeatherVariable::MaxTemp), "maxTemp [(°C)²]");
        assert_eq!(weather_label(WeatherVariable::Wind), "wind [m/s]");
        assert_eq!(interest_label("flu"), "flu [search volume]");
    }

    #[test]
    fn gaps_split_runs() {
        let start = NaiveDate::from_ymd_opt(2020, 1, 5).unwrap();
        let dates: Vec<NaiveDate> = (0..6).map(|i| start + Duration::weeks(i)).collect();
        let values = vec![None, Some(1.0), Some(2.0), Some(f64::NAN), Some(4.0), None];

        let runs = finite_runs(&dates, &values);

        assert_eq!(runs.len(), 2);
        assert_eq!(runs[0], vec![(dates[1], 1.0), (dates[2], 2.0)]);
        assert_eq!(runs[1], vec![(dates[4], 4.0)]);
    }

    #[test]
    fn ranges_ignore_non_finite_values() {
        let range = value_range([1.0, f64::NAN, 3.0, f64::INFINITY]);
        assert!(range.start < 1.0 && range.end > 3.0);
        assert_eq!(value_range([f64::NAN]), 0.0..1.0);

        let range = positive_range([0.0, 1e-4, 10.0, -3.0]);
        assert_eq!(range, 5e-5..20.0);
    }

    #[test]
    fn disabled_saving_writes_nothing() -> Result<(), PlotError> {
        let dir = tempfile::tempdir().unwrap();
        let figures = dir.path().join("figures");
        let renderer = PlotRenderer::new(&figures).with_saving(false);

        let written = renderer.render(&sample_analysis("umbrella"), Country::Australia, State::Vic)?;

        assert!(written.is_empty());
        assert!(!figures.exists());
        Ok(())
    }

    #[test]
    #[ignore = "text layout needs a system sans-serif font"]
    fn renders_all_five_figures() -> Result<(), PlotError> {
        let dir = tempfile::tempdir().unwrap();
        let renderer = PlotRenderer::new(dir.path().join("figures")).with_size(640, 400);

        let written = renderer.render(&sample_analysis("umbrella"), Country::Australia, State::Vic)?;

        let names: Vec<String> = written
            .iter()
            .filter_map(|p| p.file_name()?.to_str().map(str::to_string))
            .collect();
        assert_eq!(
            names,
            vec![
                "maxTemp_umbrella_AU_VIC.svg",
                "maxTemp_umbrella_AU_VIC.png",
                "scatter_maxTemp_umbrella_AU_VIC.svg",
                "periodogram_trend_maxTemp_umbrella_AU_VIC.svg",
                "periodogram_weather_maxTemp_umbrella_AU_VIC.svg",
            ]
        );
        assert!(written.iter().all(|p| p.is_file()));
        Ok(())
    }
}
