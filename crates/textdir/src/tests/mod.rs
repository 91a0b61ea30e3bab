//! Crate-level scenario and round-trip tests.

mod scenarios;
