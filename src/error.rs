#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

/// Errors raised when a constructor or mutator would break a model invariant.
///
/// These are always returned to the immediate caller; the model never
/// swallows them.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// A grade was given an empty description.
    #[error("Description must be a non-empty string.")]
    EmptyDescription,
    /// A grade was given a NaN or infinite score.
    #[error("Score/Grade Point must be a finite number, got `{0}`.")]
    NonFiniteScore(f64),
    /// A subject was given an empty name.
    #[error("Subject name must be a non-empty string.")]
    EmptySubjectName,
    /// A subject was given an empty code.
    #[error("Subject code must be a non-empty string.")]
    EmptySubjectCode,
    /// Credit hours were negative (or not a whole number).
    #[error("Credit hours must be a non-negative integer, got `{0}`.")]
    NegativeCreditHours(String),
    /// A college enrollment was requested without credit hours.
    #[error("College students need credit hours for {0}; pass a whole number, 0 or more.")]
    MissingCreditHours(String),
    /// A student was given an empty name.
    #[error("Student name must be a non-empty string.")]
    EmptyStudentName,
    /// A student was given an empty identifier.
    #[error("Student ID must be a non-empty string.")]
    EmptyStudentId,
    /// A grade with the same case-insensitive description already exists.
    #[error(
        "A grade with description '{0}' already exists for this subject. Update not implemented."
    )]
    DuplicateGrade(String),
    /// The student is already enrolled in a subject with this code.
    #[error("Student already enrolled in {name} ({code}).")]
    AlreadyEnrolled {
        /// Name of the subject already enrolled.
        name: String,
        /// Code of the subject already enrolled.
        code: String,
    },
    /// The student is not enrolled in a subject with this code.
    #[error("Subject with code {0} not found for this student.")]
    UnknownSubject(String),
    /// A student with this identifier already exists in the roster.
    #[error("Student with ID {0} already exists.")]
    DuplicateStudent(String),
    /// No student with this identifier exists in the roster.
    #[error("Student with ID {0} not found.")]
    UnknownStudent(String),
    /// A catalog template with this code already exists.
    #[error("Subject template with code {0} already exists.")]
    DuplicateTemplate(String),
    /// No catalog template with this code exists.
    #[error("Subject with code {0} not found in global templates.")]
    UnknownTemplate(String),
    /// The letter label is not in the grade point table.
    #[error("Invalid letter grade `{given}`. Please choose from: {valid}.")]
    InvalidLetter {
        /// The rejected label.
        given: String,
        /// Comma-separated list of accepted labels.
        valid: String,
    },
    /// A numeric mark fell outside 0-100.
    #[error("Score must be between 0 and 100, got {0}.")]
    MarkOutOfRange(f64),
    /// A letter grade was supplied for a student graded by numeric marks.
    #[error("{0} students are graded with numeric marks (0-100), not letter grades.")]
    LetterNotAccepted(String),
    /// A numeric mark was supplied for a student graded by letters.
    #[error("{0} students are graded with letter grades, not numeric marks.")]
    MarkNotAccepted(String),
}
