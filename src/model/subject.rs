#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use std::fmt::Display;

use super::Grade;
use crate::error::ValidationError;

#[derive(Debug, Clone, PartialEq)]
/// A subject, either as a catalog template or as one student's enrollment.
pub struct Subject {
    /// Human readable name, e.g. "Mathematics".
    name:         String,
    /// Unique code within the owner, e.g. "MATH101".
    code:         String,
    /// Credit hours counted towards GPA.
    credit_hours: u32,
    /// Grades in insertion order.
    grades:       Vec<Grade>,
}

impl Subject {
    /// Creates a new subject with no grades.
    pub fn new(
        name: impl Into<String>,
        code: impl Into<String>,
        credit_hours: u32,
    ) -> Result<Self, ValidationError> {
        let name = name.into();
        let code = code.into();
        if name.is_empty() {
            return Err(ValidationError::EmptySubjectName);
        }
        if code.is_empty() {
            return Err(ValidationError::EmptySubjectCode);
        }

        Ok(Self {
            name,
            code,
            credit_hours,
            grades: Vec::new(),
        })
    }

    /// Makes a fresh enrollment instance from this subject. Grades are never
    /// carried over; credit hours are kept unless `credit_hours` overrides
    /// them.
    pub fn instantiate(&self, credit_hours: Option<u32>) -> Self {
        Self {
            name:         self.name.clone(),
            code:         self.code.clone(),
            credit_hours: credit_hours.unwrap_or(self.credit_hours),
            grades:       Vec::new(),
        }
    }

    /// Appends a grade, rejecting a case-insensitive duplicate description.
    pub fn add_grade(&mut self, grade: Grade) -> Result<(), ValidationError> {
        let wanted = grade.description().to_lowercase();
        if self
            .grades
            .iter()
            .any(|existing| existing.description().to_lowercase() == wanted)
        {
            return Err(ValidationError::DuplicateGrade(grade.description().to_string()));
        }

        self.grades.push(grade);
        Ok(())
    }

    /// Arithmetic mean of all scores, or 0.0 when there are none.
    pub fn average_grade(&self) -> f64 {
        if self.grades.is_empty() {
            return 0.0;
        }
        let total: f64 = self.grades.iter().map(Grade::score).sum();
        total / self.grades.len() as f64
    }

    /// Returns true if at least one grade was recorded.
    pub fn has_grades(&self) -> bool {
        !self.grades.is_empty()
    }

    /// Returns the name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the code.
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Returns the credit hours.
    pub fn credit_hours(&self) -> u32 {
        self.credit_hours
    }

    /// Sets the credit hours.
    pub fn set_credit_hours(&mut self, credit_hours: u32) {
        self.credit_hours = credit_hours;
    }

    /// Returns the grades in insertion order.
    pub fn grades(&self) -> &[Grade] {
        &self.grades
    }
}

impl Display for Subject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} ({}, {} credits) - Avg Score/Point: {:.2}",
            self.name,
            self.code,
            self.credit_hours,
            self.average_grade()
        )
    }
}
