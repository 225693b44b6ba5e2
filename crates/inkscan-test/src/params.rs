//! Regression test bookkeeping
//!
//! A regression test makes many numbered checks.  Failed checks are
//! recorded rather than panicking, so one run reports every mismatch;
//! the test asserts on [`RegParams::cleanup`] at the end.

use std::fmt::{self, Debug};

/// How much a regression test reports while running
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RegTestMode {
    /// Only report failures
    #[default]
    Compare,
    /// Also print intermediate results
    Display,
}

impl RegTestMode {
    /// Read the mode from `REGTEST_MODE` ("display" or anything else)
    pub fn from_env() -> Self {
        match std::env::var("REGTEST_MODE") {
            Ok(v) if v.eq_ignore_ascii_case("display") => Self::Display,
            _ => Self::Compare,
        }
    }
}

/// One failed check
#[derive(Debug, Clone)]
pub struct Failure {
    /// 1-based number of the check within the test
    pub index: usize,
    /// What differed
    pub detail: String,
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "check #{}: {}", self.index, self.detail)
    }
}

/// State of one regression test
pub struct RegParams {
    /// Test name, printed as `<name>_reg`
    pub test_name: String,
    /// Reporting mode
    pub mode: RegTestMode,
    checks: usize,
    failures: Vec<Failure>,
}

impl RegParams {
    /// Start a regression test; the mode comes from `REGTEST_MODE`
    pub fn new(test_name: &str) -> Self {
        let mode = RegTestMode::from_env();
        eprintln!("\n---- {test_name}_reg ({mode:?}) ----");
        Self {
            test_name: test_name.to_string(),
            mode,
            checks: 0,
            failures: Vec::new(),
        }
    }

    /// Number of checks made so far
    pub fn index(&self) -> usize {
        self.checks
    }

    /// Whether intermediate results should be printed
    pub fn display(&self) -> bool {
        self.mode == RegTestMode::Display
    }

    /// Count a check and record it as failed when `passed` is false
    fn check(&mut self, passed: bool, detail: impl FnOnce() -> String) -> bool {
        self.checks += 1;
        if !passed {
            let failure = Failure {
                index: self.checks,
                detail: detail(),
            };
            eprintln!("{}_reg: {failure}", self.test_name);
            self.failures.push(failure);
        }
        passed
    }

    /// Check that `actual` is within `delta` of `expected`
    pub fn compare_values(&mut self, expected: f64, actual: f64, delta: f64) -> bool {
        let diff = (expected - actual).abs();
        self.check(diff <= delta, || {
            format!("expected {expected}, got {actual} (off by {diff}, allowed {delta})")
        })
    }

    /// Check that two byte strings are identical
    pub fn compare_strings(&mut self, expected: &[u8], actual: &[u8]) -> bool {
        let first_diff = expected.iter().zip(actual).position(|(a, b)| a != b);
        self.check(expected == actual, || match first_diff {
            Some(at) => format!(
                "bytes differ at offset {at}: expected {:#04x}, got {:#04x}",
                expected[at], actual[at]
            ),
            None => format!(
                "lengths differ: expected {} bytes, got {}",
                expected.len(),
                actual.len()
            ),
        })
    }

    /// Check that two sequences are equal element by element
    pub fn compare_slices<T: PartialEq + Debug>(&mut self, expected: &[T], actual: &[T]) -> bool {
        self.check(expected == actual, || {
            format!("expected {expected:?}, got {actual:?}")
        })
    }

    /// Whether every check so far passed
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    /// Failed checks so far
    pub fn failures(&self) -> &[Failure] {
        &self.failures
    }

    /// Finish the test and print a summary; returns whether it passed
    pub fn cleanup(self) -> bool {
        if self.is_success() {
            eprintln!("{}_reg: {} checks passed", self.test_name, self.checks);
        } else {
            eprintln!(
                "{}_reg: {} of {} checks failed",
                self.test_name,
                self.failures.len(),
                self.checks
            );
            for failure in &self.failures {
                eprintln!("  {failure}");
            }
        }
        self.is_success()
    }
}
