//! Unit tests for critical power and best pace search.

use ridemetrics::metrics::peaks::{STANDARD_PACE_DISTANCES, STANDARD_POWER_PERIODS};
use ridemetrics::metrics::{
    best_pace, crit_power, crit_power_with_gaps, AnalyticsError, GapPolicy, RollingAggregator,
};

fn seconds(n: u32) -> Vec<f64> {
    (0..n).map(f64::from).collect()
}

#[test]
fn test_constant_100w_five_seconds() {
    let watts = [100.0, 100.0, 100.0, 100.0, 100.0, 100.0];
    let peak = crit_power(5.0, &seconds(6), &watts).unwrap().unwrap();
    assert_eq!(peak.avg(), Some(100.0));
    assert_eq!(peak.period, 5.0);
}

#[test]
fn test_period_longer_than_activity() {
    let watts = vec![250.0; 300];
    assert!(crit_power(3600.0, &seconds(300), &watts).unwrap().is_none());
}

#[test]
fn test_peak_survives_later_mutation() {
    // Sprint early, then a long easy ride
    let mut watts = vec![900.0; 15];
    watts.extend(vec![120.0; 600]);
    let peak = crit_power(15.0, &seconds(615), &watts).unwrap().unwrap();

    assert!(peak.avg().unwrap() > 800.0);
    assert_eq!(peak.start_timestamp, Some(0.0));
    assert!(peak.window().last_timestamp(false).unwrap() <= 15.0);
}

#[test]
fn test_degenerate_periods_have_no_peak() {
    let times = seconds(10);
    let watts = vec![100.0; 10];
    let dist: Vec<f64> = times.iter().map(|t| t * 4.0).collect();

    for period in [0.0, -5.0, f64::NAN, f64::INFINITY] {
        assert!(crit_power(period, &times, &watts).unwrap().is_none(), "period {period}");
        assert!(
            crit_power_with_gaps(period, &times, &watts, GapPolicy::new(1.0, 4.0))
                .unwrap()
                .is_none(),
            "period {period}"
        );
        assert!(best_pace(period, &times, &dist).unwrap().is_none(), "distance {period}");
    }
}

#[test]
fn test_interval_session() {
    // 10 min easy, 5 min hard, 10 min easy
    let mut watts = vec![150.0; 600];
    watts.extend(vec![400.0; 300]);
    watts.extend(vec![150.0; 600]);
    let times = seconds(1500);
    let gaps = GapPolicy::new(1.0, 4.0);

    let avg_for = |period: u32| {
        crit_power_with_gaps(f64::from(period), &times, &watts, gaps)
            .unwrap()
            .unwrap()
            .avg()
            .unwrap()
    };
    assert_eq!(avg_for(60), 400.0);
    assert_eq!(avg_for(300), 400.0);
    assert_eq!(avg_for(1200), 212.5);

    let periods: Vec<u32> = STANDARD_POWER_PERIODS.iter().map(|&(_, p)| p).collect();
    let found = periods
        .iter()
        .filter(|&&p| {
            crit_power_with_gaps(f64::from(p), &times, &watts, gaps)
                .unwrap()
                .is_some()
        })
        .count();
    // Everything up to 20 min fits in a 25 min ride
    assert_eq!(found, 9);
}

#[test]
fn test_best_pace_constant_speed() {
    // 10 m/s over 1000 m
    let times = seconds(101);
    let dist: Vec<f64> = times.iter().map(|t| t * 10.0).collect();
    let peak = best_pace(1000.0, &times, &dist).unwrap().unwrap();
    assert_eq!(peak.avg(), Some(0.1));
}

#[test]
fn test_best_pace_distances_present_for_long_run() {
    // 5 m/s for 12 km
    let times = seconds(2401);
    let dist: Vec<f64> = times.iter().map(|t| t * 5.0).collect();

    let found: Vec<&str> = STANDARD_PACE_DISTANCES
        .iter()
        .filter(|(_, d)| best_pace(f64::from(*d), &times, &dist).unwrap().is_some())
        .map(|(label, _)| *label)
        .collect();
    assert_eq!(found.last(), Some(&"10 km"));
    assert!(!found.contains(&"13.1 mile"));
}

#[test]
fn test_mismatched_streams() {
    let err = best_pace(100.0, &seconds(4), &[0.0, 1.0, 2.0]).unwrap_err();
    assert_eq!(err, AnalyticsError::times_values(4, 3));
}
