#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use std::fmt::Display;

use bon::builder;

use crate::error::ValidationError;

#[derive(Debug, Clone, PartialEq)]
/// A single scored item within a subject.
///
/// The meaning of `score` depends on who stored it: a 0-100 mark for
/// high-school students, a 0.0-4.0 grade point for college students. Range
/// checks belong to the caller.
pub struct Grade {
    /// What was graded, e.g. "Midterm Exam".
    description: String,
    /// Numeric mark or grade point.
    score:       f64,
    /// Letter label the score was derived from, if any.
    letter:      Option<String>,
}

impl Grade {
    /// Creates a new grade -
    /// * `description` - non-empty description of the graded item
    /// * `score` - a finite mark or grade point
    /// * `letter` - the letter label, for letter-graded students
    pub fn new(
        description: impl Into<String>,
        score: f64,
        letter: Option<String>,
    ) -> Result<Self, ValidationError> {
        let description = description.into();
        if description.is_empty() {
            return Err(ValidationError::EmptyDescription);
        }
        if !score.is_finite() {
            return Err(ValidationError::NonFiniteScore(score));
        }

        Ok(Self {
            description,
            score,
            letter,
        })
    }

    /// Returns the description.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the numeric score.
    pub fn score(&self) -> f64 {
        self.score
    }

    /// Returns the letter label, if any.
    pub fn letter(&self) -> Option<&str> {
        self.letter.as_deref()
    }
}

impl Display for Grade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.letter() {
            Some(letter) if !letter.is_empty() => {
                write!(f, "{}: {} ({:.2} points)", self.description, letter, self.score)
            }
            _ => write!(f, "{}: {:.2}", self.description, self.score),
        }
    }
}

/// Builder-friendly constructor for `Grade` with the same validation as
/// [`Grade::new`].
#[builder(finish_fn = build)]
pub fn grade(
    #[builder(into)] description: String,
    score: f64,
    #[builder(into)] letter: Option<String>,
) -> Result<Grade, ValidationError> {
    Grade::new(description, score, letter)
}
