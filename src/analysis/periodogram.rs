//! Welch power-spectrum estimate for weekly series.
//!
//! Segments use a periodic Hann window with 50% overlap and are linearly detrended before
//! the transform. Power is scaled as a spectrum (units of the input squared), one-sided.

use rustfft::num_complex::Complex;
use rustfft::FftPlanner;

/// Samples per segment: four years of weekly data.
pub const SEGMENT_LENGTH: usize = 208;

/// Weekly sampling rate expressed in samples per (365-day) year, so that frequencies come
/// out in cycles per year.
pub const WEEKLY_SAMPLES_PER_YEAR: f64 = 365.0 / 7.0;

/// One-sided power spectrum.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Periodogram {
    /// Bin frequencies, ascending from zero, in cycles per unit of the sample rate.
    pub frequencies: Vec<f64>,
    pub power: Vec<f64>,
}

impl Periodogram {
    pub fn is_empty(&self) -> bool {
        self.frequencies.is_empty()
    }

    /// Frequency of the strongest non-DC bin.
    pub fn peak_frequency(&self) -> Option<f64> {
        self.frequencies
            .iter()
            .zip(&self.power)
            .skip(1)
            .filter(|(_, power)| power.is_finite())
            .max_by(|a, b| a.1.total_cmp(b.1))
            .map(|(frequency, _)| *frequency)
    }
}

fn periodic_hann(length: usize) -> Vec<f64> {
    (0..length)
        .map(|i| 0.5 - 0.5 * (2.0 * std::f64::consts::PI * i as f64 / length as f64).cos())
        .collect()
}

/// Removes the least-squares straight line from `segment`.
fn detrend_linear(segment: &[f64]) -> Vec<f64> {
    let n = segment.len() as f64;
    let t_mean = (n - 1.0) / 2.0;
    let x_mean = segment.iter().sum::<f64>() / n;

    let (mut stx, mut stt) = (0.0, 0.0);
    for (t, x) in segment.iter().enumerate() {
        let dt = t as f64 - t_mean;
        stx += dt * (x - x_mean);
        stt += dt * dt;
    }
    let slope = if stt > 0.0 { stx / stt } else { 0.0 };

    segment
        .iter()
        .enumerate()
        .map(|(t, x)| x - (x_mean + slope * (t as f64 - t_mean)))
        .collect()
}

/// Welch estimate of the power spectrum of `samples`.
///
/// `segment_length` is clamped to the series length. NaN samples propagate to the power of
/// every bin of the segments containing them. Series shorter than two samples yield an
/// empty periodogram.
pub fn welch(samples: &[f64], segment_length: usize, sample_rate: f64) -> Periodogram {
    let n = samples.len();
    let segment_length = segment_length.min(n);
    if segment_length < 2 {
        return Periodogram::default();
    }
    let overlap = segment_length / 2;
    let step = segment_length - overlap;
    let segments = (n - overlap) / step;

    let window = periodic_hann(segment_length);
    let window_sum: f64 = window.iter().sum();
    let scale = 1.0 / (window_sum * window_sum);

    let fft = FftPlanner::<f64>::new().plan_fft_forward(segment_length);
    let bins = segment_length / 2 + 1;
    let mut power = vec![0.0; bins];

    for segment in 0..segments {
        let start = segment * step;
        let detrended = detrend_linear(&samples[start..start + segment_length]);
        let mut buffer: Vec<Complex<f64>> = detrended
            .iter()
            .zip(&window)
            .map(|(x, w)| Complex::new(x * w, 0.0))
            .collect();
        fft.process(&mut buffer);
        for (bin, value) in power.iter_mut().zip(&buffer) {
            *bin += value.norm_sqr() * scale;
        }
    }

    // Fold the negative frequencies in; DC and (for even lengths) Nyquist have no mirror.
    let has_nyquist = segment_length % 2 == 0;
    for (k, bin) in power.iter_mut().enumerate() {
        *bin /= segments as f64;
        if k > 0 && !(has_nyquist && k == bins - 1) {
            *bin *= 2.0;
        }
    }

    let frequencies = (0..bins)
        .map(|k| k as f64 * sample_rate / segment_length as f64)
        .collect();
    Periodogram { frequencies, power }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn annual_cycle_peaks_at_one_cycle_per_year() {
        // Five years of weekly samples of a yearly sinusoid on top of a trend.
        let samples: Vec<f64> = (0..261)
            .map(|i| {
                let years = i as f64 / WEEKLY_SAMPLES_PER_YEAR;
                10.0 * (2.0 * std::f64::consts::PI * years).sin() + 0.05 * i as f64
            })
            .collect();

        let spectrum = welch(&samples, SEGMENT_LENGTH, WEEKLY_SAMPLES_PER_YEAR);

        assert_eq!(spectrum.frequencies.len(), SEGMENT_LENGTH / 2 + 1);
        let peak = spectrum.peak_frequency().unwrap();
        let resolution = WEEKLY_SAMPLES_PER_YEAR / SEGMENT_LENGTH as f64;
        assert!((peak - 1.0).abs() <= resolution, "peak at {} cycles/year", peak);
    }

    #[test]
    fn frequencies_ascend_from_zero_to_nyquist() {
        let samples: Vec<f64> = (0..50).map(|i| (i as f64 * 0.3).cos()).collect();
        let spectrum = welch(&samples, SEGMENT_LENGTH, WEEKLY_SAMPLES_PER_YEAR);

        assert_eq!(spectrum.frequencies[0], 0.0);
        assert!(spectrum.frequencies.windows(2).all(|w| w[0] < w[1]));
        let nyquist = *spectrum.frequencies.last().unwrap();
        assert!((nyquist - WEEKLY_SAMPLES_PER_YEAR / 2.0).abs() < 1e-9);
        assert!(spectrum.power.iter().all(|p| *p >= 0.0));
    }

    #[test]
    fn linear_trend_is_removed() {
        let samples: Vec<f64> = (0..64).map(|i| 3.0 + 2.0 * i as f64).collect();
        let spectrum = welch(&samples, 32, 1.0);
        assert!(spectrum.power.iter().all(|p| *p < 1e-18));
    }

    #[test]
    fn short_series_give_empty_periodogram() {
        assert!(welch(&[], SEGMENT_LENGTH, 1.0).is_empty());
        assert!(welch(&[1.0], SEGMENT_LENGTH, 1.0).is_empty());
    }

    #[test]
    fn missing_samples_propagate() {
        let mut samples: Vec<f64> = (0..20).map(|i| i as f64).collect();
        samples[7] = f64::NAN;
        let spectrum = welch(&samples, 20, 1.0);
        assert!(spectrum.power.iter().all(|p| p.is_nan()));
    }
}
