#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use itertools::Itertools;

/// Letter grade to grade point table used for college students.
///
/// `A+` and `A` both map to 4.0.
pub const GRADE_POINTS: &[(&str, f64)] = &[
    ("A+", 4.0),
    ("A", 4.0),
    ("A-", 3.75),
    ("B+", 3.5),
    ("B", 3.0),
    ("B-", 2.75),
    ("C+", 2.5),
    ("C", 2.0),
    ("C-", 1.75),
    ("D", 1.5),
    ("F", 0.0),
];

/// Letter label that marks a failed course.
pub const FAILING_LETTER: &str = "F";

/// Default data file, relative to the working directory.
pub const DEFAULT_DATA_FILE: &str = "gradeforge_data.json";

/// Default CSV export file name.
pub const DEFAULT_EXPORT_FILE: &str = "gradeforge_export.csv";

/// Overall mark at or above which a non-college student passes.
pub const DEFAULT_PASS_MARK: f64 = 50.0;

/// GPA at or above which a college student is in good standing.
pub const DEFAULT_GOOD_STANDING_GPA: f64 = 2.0;

/// Credit hours given to freshly created catalog templates.
pub const TEMPLATE_CREDIT_HOURS: u32 = 0;

/// Credit hours assumed when a persisted subject omits them.
pub const LOADED_CREDIT_HOURS: u32 = 3;

/// Major assumed when a persisted college student omits it.
pub const DEFAULT_MAJOR: &str = "Undeclared";

/// Inclusive range of valid numeric marks.
pub const MARK_RANGE: std::ops::RangeInclusive<f64> = 0.0..=100.0;

/// Separator line used by text reports.
pub const REPORT_RULE: &str = "------------------------------------";

/// Looks up the grade point value for an exact letter label.
pub fn grade_points(letter: &str) -> Option<f64> {
    GRADE_POINTS
        .iter()
        .find(|(label, _)| *label == letter)
        .map(|(_, points)| *points)
}

/// Accepted letter labels, in table order, joined for messages.
pub fn valid_letters() -> String {
    GRADE_POINTS.iter().map(|(label, _)| label).join(", ")
}
