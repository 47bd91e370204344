//! # gradeforge
//!
//! A student records manager: students, the subjects they enroll in, and the
//! grades recorded per subject, with averages, GPA and standing derived from
//! them and the whole roster persisted as JSON between runs.

#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

/// Runtime configuration and standing thresholds
pub mod config;
/// A module defining a bunch of constant values to be used throughout
pub mod constants;
/// Validation errors raised by the model
pub mod error;
/// Flattened CSV export
pub mod export;
/// Grades, subjects and students
pub mod model;
/// Text reports and tables
pub mod report;
/// Students plus the catalog of subject templates
pub mod roster;
/// Loading and saving the roster
pub mod store;

pub use config::{Config, StandingPolicy};
pub use error::ValidationError;
pub use model::{Grade, GradeInput, Standing, Student, StudentKind, Subject};
pub use roster::Roster;
pub use store::{LoadOutcome, LoadWarning, Store};
