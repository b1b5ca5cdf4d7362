pub mod report;
pub mod runner;

pub use report::{BenchReport, KindResult, TrialResult, WaitResult, percent_error};
pub use runner::{BenchRunner, run_trial, sleep_with};
