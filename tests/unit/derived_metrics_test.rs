//! Unit tests for NP, TSS, ranking and series statistics.

use ridemetrics::metrics::power::{intensity_factor, RANK_LEVELS};
use ridemetrics::metrics::stats;
use ridemetrics::metrics::{calc_np, calc_tss, rank, rank_requirements, Gender};

#[test]
fn test_np_boundary() {
    let np = calc_np(&vec![100.0; 1000]).unwrap();
    assert!((np - 100.0).abs() < 1e-9);
    assert!(calc_np(&vec![100.0; 999]).is_none());
}

#[test]
fn test_np_of_surges_exceeds_average() {
    // 30s surges at 500W every 2 minutes, 150W otherwise
    let watts: Vec<f64> = (0..3600)
        .map(|i| if i % 120 < 30 { 500.0 } else { 150.0 })
        .collect();
    let avg = stats::avg(&watts).unwrap();
    let np = calc_np(&watts).unwrap();
    assert!(np > avg + 20.0, "np {np} avg {avg}");
}

#[test]
fn test_tss_reference_values() {
    // One hour at FTP is 100
    assert!((calc_tss(300.0, 3600.0, 300.0) - 100.0).abs() < 1e-9);
    // Two hours at IF 0.75
    assert!((calc_tss(225.0, 7200.0, 300.0) - 112.5).abs() < 1e-9);
    assert_eq!(intensity_factor(150.0, 300.0), 0.5);
}

#[test]
fn test_rank_five_minutes_male() {
    let rank = rank(300.0, 6.2, Gender::Male).unwrap();
    let tier = RANK_LEVELS
        .iter()
        .position(|t| t.label == rank.label)
        .unwrap();

    assert!(rank.level > RANK_LEVELS[tier].level_requirement);
    if tier > 0 {
        assert!(rank.level <= RANK_LEVELS[tier - 1].level_requirement);
    }
}

#[test]
fn test_rank_monotonic_in_wkg() {
    for gender in [Gender::Male, Gender::Female] {
        for duration in [5.0, 60.0, 300.0, 3600.0] {
            let levels: Vec<f64> = (10..80)
                .map(|x| rank(duration, f64::from(x) / 10.0, gender).unwrap().level)
                .collect();
            assert!(levels.windows(2).all(|w| w[1] > w[0]));
        }
    }
}

#[test]
fn test_requirements_shrink_with_duration() {
    let short = rank_requirements(60.0, Gender::Male);
    let long = rank_requirements(3600.0, Gender::Male);
    assert!(short.high > long.high);
    assert!(short.low > long.low);
}

#[test]
fn test_reference_average() {
    let data: Vec<f64> = (1..=99).map(f64::from).collect();
    assert_eq!(stats::avg(&data), Some(stats::sum(&data) / data.len() as f64));
    assert_eq!(stats::avg(&data), Some(50.0));
}
