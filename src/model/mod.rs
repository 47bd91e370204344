#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

/// A single scored item.
pub mod grade;
/// Students, their variants, and aggregation.
pub mod student;
/// Subjects and per-subject averages.
pub mod subject;

pub use grade::Grade;
pub use student::{GradeInput, Standing, Student, StudentKind};
pub use subject::Subject;
