#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use std::path::{Path, PathBuf};

use bon::Builder;
use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_DATA_FILE, DEFAULT_GOOD_STANDING_GPA, DEFAULT_PASS_MARK};

/// Thresholds applied when computing a student's standing.
///
/// Each variant reads only its own field: non-college students compare their
/// overall mark against `pass_mark`, college students compare their GPA
/// against `good_standing_gpa`.
#[derive(Debug, Clone, Copy, PartialEq, Builder, Serialize, Deserialize)]
pub struct StandingPolicy {
    /// Overall mark needed to pass (high-school and generic students).
    #[builder(default = DEFAULT_PASS_MARK)]
    pass_mark:         f64,
    /// GPA needed for good standing (college students).
    #[builder(default = DEFAULT_GOOD_STANDING_GPA)]
    good_standing_gpa: f64,
}

impl StandingPolicy {
    /// Creates a policy from explicit thresholds.
    pub fn new(pass_mark: f64, good_standing_gpa: f64) -> Self {
        Self {
            pass_mark,
            good_standing_gpa,
        }
    }

    /// Returns the pass mark for non-college students.
    pub fn pass_mark(&self) -> f64 {
        self.pass_mark
    }

    /// Returns the good-standing GPA for college students.
    pub fn good_standing_gpa(&self) -> f64 {
        self.good_standing_gpa
    }
}

impl Default for StandingPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_PASS_MARK, DEFAULT_GOOD_STANDING_GPA)
    }
}

/// Runtime configuration for the records manager.
#[derive(Debug, Clone, Builder)]
pub struct Config {
    /// Path of the persisted JSON document.
    #[builder(into, default = PathBuf::from(DEFAULT_DATA_FILE))]
    data_file: PathBuf,
    /// Standing thresholds.
    #[builder(default)]
    policy:    StandingPolicy,
}

impl Config {
    /// Builds a configuration from `GRADEFORGE_*` environment variables,
    /// falling back to defaults for anything missing or unparseable.
    pub fn from_env() -> Self {
        let data_file = std::env::var("GRADEFORGE_DATA_FILE")
            .ok()
            .map(|value| value.trim().to_owned())
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| DEFAULT_DATA_FILE.to_string());

        let policy = StandingPolicy::new(
            read_threshold("GRADEFORGE_PASS_MARK", DEFAULT_PASS_MARK),
            read_threshold("GRADEFORGE_GOOD_STANDING_GPA", DEFAULT_GOOD_STANDING_GPA),
        );

        Self::builder().data_file(data_file).policy(policy).build()
    }

    /// Returns a copy of this configuration pointing at a different data file.
    pub fn with_data_file(mut self, data_file: impl Into<PathBuf>) -> Self {
        self.data_file = data_file.into();
        self
    }

    /// Returns the persisted data file path.
    pub fn data_file(&self) -> &Path {
        self.data_file.as_path()
    }

    /// Returns the standing policy.
    pub fn policy(&self) -> StandingPolicy {
        self.policy
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// Parses an environment variable into a finite threshold, falling back to
/// `default` when parsing fails or the variable is missing.
fn read_threshold(env: &str, default: f64) -> f64 {
    std::env::var(env)
        .ok()
        .and_then(|value| value.trim().parse::<f64>().ok())
        .filter(|value| value.is_finite())
        .unwrap_or(default)
}
