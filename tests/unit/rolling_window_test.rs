//! Unit tests for rolling windows and gap policy.

use ridemetrics::metrics::{
    DistanceWeightedWindow, GapPolicy, Ingest, RollingAggregator, TimeWeightedWindow, WindowValue,
};

fn seconds(n: u32) -> Vec<f64> {
    (0..n).map(f64::from).collect()
}

#[test]
fn test_constant_stream_any_subwindow() {
    let times = seconds(600);
    let watts = vec![180.0; 600];
    for period in [1.0, 5.0, 30.0, 120.0, 599.0] {
        let mut roll = TimeWeightedWindow::new(period, GapPolicy::new(1.0, 4.0));
        roll.import(&times, &watts).unwrap();
        assert_eq!(roll.avg(), Some(180.0), "period {period}");
    }
}

#[test]
fn test_half_hertz_constant_stream() {
    let times: Vec<f64> = (0..100).map(|i| f64::from(i) * 2.0).collect();
    let watts = vec![220.0; 100];
    let gaps = GapPolicy::from_times(&times).unwrap();
    assert_eq!(gaps, GapPolicy::new(2.0, 8.0));

    let mut roll = TimeWeightedWindow::new(30.0, gaps);
    roll.import(&times, &watts).unwrap();
    assert_eq!(roll.elapsed(), 30.0);
    assert_eq!(roll.avg(), Some(220.0));
}

#[test]
fn test_dropout_bridging_keeps_full_span() {
    let mut roll = TimeWeightedWindow::unbounded(GapPolicy::new(1.0, 5.0));
    roll.import(&[0.0, 1.0, 2.0, 100.0], &[250.0, 250.0, 250.0, 250.0])
        .unwrap();

    assert_eq!(roll.elapsed(), 100.0);
    let times = roll.window().times();
    for pair in times.windows(2) {
        assert!(pair[1] - pair[0] <= 1.0);
    }
    let pads: Vec<_> = roll
        .values()
        .iter()
        .zip(times)
        .filter(|(v, _)| v.is_pad())
        .map(|(_, ts)| *ts)
        .collect();
    assert_eq!(pads.first(), Some(&3.0));
    assert_eq!(pads.last(), Some(&99.0));
}

#[test]
fn test_add_reports_padding() {
    let mut roll = TimeWeightedWindow::unbounded(GapPolicy::new(1.0, 3.0));
    assert_eq!(roll.add(0.0, Some(100.0)), Ingest::Consumed);
    assert_eq!(roll.add(10.0, Some(100.0)), Ingest::Padded);
    assert_eq!(roll.last_timestamp(false), Some(1.0));
    assert_eq!(roll.values()[1], WindowValue::SyntheticZero);
    assert_eq!(roll.last_timestamp(true), Some(0.0));
}

#[test]
fn test_zero_period_keeps_one_sample() {
    for period in [0.0, -1.0] {
        let mut roll = TimeWeightedWindow::new(period, GapPolicy::new(1.0, 4.0));
        assert_eq!(roll.add(0.0, Some(1.0)), Ingest::Consumed);
        roll.import(&seconds(10), &vec![200.0; 10]).unwrap();

        assert_eq!(roll.size(), 1);
        assert_eq!(roll.last_timestamp(false), Some(9.0));
        assert_eq!(roll.elapsed(), 0.0);
    }

    let mut roll = DistanceWeightedWindow::new(0.0);
    roll.import(&seconds(10), &seconds(10)).unwrap();
    assert_eq!(roll.size(), 1);
}

#[test]
fn test_copy_renormalizes_offset() {
    let mut roll = TimeWeightedWindow::new(10.0, GapPolicy::new(1.0, 4.0));
    roll.import(&seconds(100), &vec![300.0; 100]).unwrap();
    assert!(roll.window().offset() > 1);

    let snap = roll.copy();
    assert_eq!(snap.window().offset(), 1);
    assert_eq!(snap.window().times().len(), roll.size() + 1);
    assert_eq!(snap.avg(), roll.avg());
    assert_eq!(snap.kj(), roll.kj());
}

#[test]
fn test_distance_window_pace() {
    let times = seconds(301);
    let dist: Vec<f64> = times.iter().map(|t| t * 3.0).collect();
    let mut roll = DistanceWeightedWindow::new(300.0);
    roll.import(&times, &dist).unwrap();

    assert_eq!(roll.distance(), Some(300.0));
    assert_eq!(roll.elapsed(), 100.0);
    assert!((roll.avg().unwrap() - 1.0 / 3.0).abs() < 1e-12);
}

#[test]
fn test_import_rejects_mismatched_lengths() {
    let mut roll = DistanceWeightedWindow::new(100.0);
    assert!(roll.import(&seconds(5), &[0.0, 1.0]).is_err());
    assert_eq!(roll.size(), 0);
}
