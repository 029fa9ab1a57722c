//! Unit test modules.

mod derived_metrics_test;
mod peak_search_test;
mod resample_test;
mod rolling_window_test;
