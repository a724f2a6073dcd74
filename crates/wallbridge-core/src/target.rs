//! Display/space targets and the outcome of applying a wallpaper to them.

use std::fmt;

/// One (display, space) pair as reported by the host shell.
///
/// `index` is meaningful only to the backend that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub index: usize,
    pub label: String,
}

impl Target {
    pub fn new(index: usize, label: impl Into<String>) -> Self {
        Self {
            index,
            label: label.into(),
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (#{})", self.label, self.index)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApplyReport {
    pub attempted: usize,
    pub failures: Vec<(Target, String)>,
}

impl ApplyReport {
    pub fn record(&mut self, target: &Target, outcome: Result<(), String>) {
        self.attempted += 1;
        if let Err(msg) = outcome {
            self.failures.push((target.clone(), msg));
        }
    }

    pub fn succeeded(&self) -> usize {
        self.attempted - self.failures.len()
    }

    pub fn is_success(&self) -> bool {
        self.attempted > 0 && self.failures.is_empty()
    }
}
