/// Centered rolling mean over `window` samples.
///
/// For an even window the extra sample is taken from the past, so the mean at `i` covers
/// `i + (window - 1) / 2 + 1 - window ..= i + (window - 1) / 2`. A position whose window
/// runs past either end of the series, or contains a missing sample, is missing. Windows of
/// zero or one sample return the series unchanged.
pub fn centered_rolling_mean(values: &[Option<f64>], window: usize) -> Vec<Option<f64>> {
    if window <= 1 {
        return values.to_vec();
    }
    let offset = (window - 1) / 2;
    let n = values.len();

    (0..n)
        .map(|i| {
            let end = i + offset + 1;
            if end < window || end > n {
                return None;
            }
            values[end - window..end]
                .iter()
                .copied()
                .sum::<Option<f64>>()
                .map(|total| total / window as f64)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn some(values: &[f64]) -> Vec<Option<f64>> {
        values.iter().copied().map(Some).collect()
    }

    #[test]
    fn window_of_one_is_identity() {
        let values = vec![Some(3.0), None, Some(-1.5), Some(f64::MAX)];
        assert_eq!(centered_rolling_mean(&values, 1), values);
    }

    #[test]
    fn odd_window_is_symmetric() {
        let result = centered_rolling_mean(&some(&[1.0, 2.0, 3.0, 4.0, 5.0]), 3);
        assert_eq!(result, vec![None, Some(2.0), Some(3.0), Some(4.0), None]);
    }

    #[test]
    fn even_window_leans_to_the_past() {
        let result = centered_rolling_mean(&some(&[0.0, 1.0, 2.0, 3.0, 4.0, 5.0]), 4);
        assert_eq!(
            result,
            vec![None, None, Some(1.5), Some(2.5), Some(3.5), None]
        );
    }

    #[test]
    fn missing_sample_blanks_every_window_it_touches() {
        let values = vec![Some(1.0), Some(2.0), None, Some(4.0), Some(5.0), Some(6.0), Some(7.0)];
        let result = centered_rolling_mean(&values, 3);
        assert_eq!(
            result,
            vec![None, None, None, None, Some(5.0), Some(6.0), None]
        );
    }

    #[test]
    fn window_longer_than_series_is_all_missing() {
        let result = centered_rolling_mean(&some(&[1.0, 2.0, 3.0]), 4);
        assert_eq!(result, vec![None, None, None]);
    }
}
