//! Integration tests.

mod config_test;
