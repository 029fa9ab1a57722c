//! Unit tests for resampling.

use ridemetrics::metrics::resample;

#[test]
fn test_ramp_to_sparkline() {
    let ramp: Vec<f64> = (0..10_000).map(f64::from).collect();
    let out = resample(&ramp, 120).unwrap();

    assert_eq!(out.len(), 120);
    assert!(out[0] < 100.0);
    assert!(out[119] > 9_899.0);
    assert!(out.windows(2).all(|w| w[1] >= w[0]));
}

#[test]
fn test_exact_length_for_awkward_ratios() {
    let input: Vec<f64> = (0..997).map(|i| (f64::from(i) / 50.0).sin()).collect();
    for len in [1, 2, 3, 7, 119, 120, 121, 996, 998, 5_000, 150_000] {
        assert_eq!(resample(&input, len).unwrap().len(), len, "len {len}");
    }
}

#[test]
fn test_trend_preserved_for_descending_series() {
    let input: Vec<f64> = (0..2_000).map(|i| 500.0 - f64::from(i) * 0.2).collect();
    let out = resample(&input, 64).unwrap();
    assert!(out.windows(2).all(|w| w[1] <= w[0]));
}
