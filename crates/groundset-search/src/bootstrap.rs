//! Non-parametric bootstrap confidence intervals for a success rate.

use rand::Rng;

use crate::error::SearchError;

/// Bootstrap interval for `successes` out of `trials` binary outcomes.
///
/// Resamples the outcome vector with replacement `resamples` times and
/// returns the `(1 - confidence) / 2` and `(1 + confidence) / 2` percentiles
/// of the resampled success rates, interpolating linearly between order
/// statistics.
pub fn bootstrap_interval<R: Rng + ?Sized>(
    successes: usize,
    trials: usize,
    resamples: usize,
    confidence: f64,
    rng: &mut R,
) -> Result<(f64, f64), SearchError> {
    if trials == 0 {
        return Err(SearchError::NoTrials);
    }
    if resamples == 0 {
        return Err(SearchError::NoResamples);
    }
    if !(confidence > 0.0 && confidence < 1.0) {
        return Err(SearchError::InvalidConfidence { confidence });
    }
    let successes = successes.min(trials);

    let mut rates = Vec::with_capacity(resamples);
    for _ in 0..resamples {
        let mut hits = 0usize;
        for _ in 0..trials {
            // Outcome vector is `successes` ones followed by zeros.
            if rng.gen_range(0..trials) < successes {
                hits += 1;
            }
        }
        rates.push(hits as f64 / trials as f64);
    }
    rates.sort_by(f64::total_cmp);

    let alpha = 1.0 - confidence;
    Ok((
        percentile(&rates, 100.0 * alpha / 2.0),
        percentile(&rates, 100.0 * (1.0 - alpha / 2.0)),
    ))
}

/// Linear-interpolation percentile of sorted, non-empty data.
fn percentile(sorted: &[f64], pct: f64) -> f64 {
    let rank = pct / 100.0 * (sorted.len() - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    let fraction = rank - lower as f64;
    sorted[lower] + (sorted[upper] - sorted[lower]) * fraction
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn percentile_interpolates() {
        let data = [0.0, 1.0, 2.0, 3.0, 4.0];
        assert_eq!(percentile(&data, 0.0), 0.0);
        assert_eq!(percentile(&data, 50.0), 2.0);
        assert_eq!(percentile(&data, 100.0), 4.0);
        assert!((percentile(&data, 12.5) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn certain_outcomes_collapse() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert_eq!(bootstrap_interval(10, 10, 1000, 0.95, &mut rng).unwrap(), (1.0, 1.0));
        assert_eq!(bootstrap_interval(0, 10, 1000, 0.95, &mut rng).unwrap(), (0.0, 0.0));
    }

    #[test]
    fn interval_brackets_the_rate() {
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let (lo, hi) = bootstrap_interval(50, 100, 1000, 0.95, &mut rng).unwrap();
        assert!(lo < 0.5 && 0.5 < hi, "({lo}, {hi})");
        assert!(lo > 0.3 && hi < 0.7, "({lo}, {hi})");
    }

    #[test]
    fn same_seed_same_interval() {
        let a = bootstrap_interval(3, 20, 500, 0.9, &mut ChaCha8Rng::seed_from_u64(9)).unwrap();
        let b = bootstrap_interval(3, 20, 500, 0.9, &mut ChaCha8Rng::seed_from_u64(9)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn invalid_parameters_are_rejected() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        assert!(matches!(
            bootstrap_interval(0, 0, 10, 0.95, &mut rng),
            Err(SearchError::NoTrials)
        ));
        assert!(matches!(
            bootstrap_interval(1, 2, 0, 0.95, &mut rng),
            Err(SearchError::NoResamples)
        ));
        assert!(matches!(
            bootstrap_interval(1, 2, 10, 1.0, &mut rng),
            Err(SearchError::InvalidConfidence { .. })
        ));
    }
}
