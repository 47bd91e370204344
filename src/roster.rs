#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use indexmap::IndexMap;

use crate::{
    constants::TEMPLATE_CREDIT_HOURS,
    error::ValidationError,
    model::{GradeInput, Student, Subject},
};

/// All students plus the catalog of reusable subject templates.
///
/// The roster owns every student and template. Enrollment copies a template
/// into the student, so later edits to either side never leak across.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Roster {
    /// Students keyed by identifier, in insertion order.
    students: IndexMap<String, Student>,
    /// Subject templates keyed by code, in insertion order.
    catalog:  IndexMap<String, Subject>,
}

impl Roster {
    /// Creates an empty roster.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true when there are no students and no templates.
    pub fn is_empty(&self) -> bool {
        self.students.is_empty() && self.catalog.is_empty()
    }

    /// Returns all students in insertion order.
    pub fn students(&self) -> &IndexMap<String, Student> {
        &self.students
    }

    /// Returns all catalog templates in insertion order.
    pub fn templates(&self) -> &IndexMap<String, Subject> {
        &self.catalog
    }

    /// Adds a student, rejecting a duplicate identifier.
    pub fn add_student(&mut self, student: Student) -> Result<(), ValidationError> {
        if self.students.contains_key(student.student_id()) {
            return Err(ValidationError::DuplicateStudent(student.student_id().to_string()));
        }
        tracing::debug!("Adding student {} ({})", student.name(), student.student_id());
        self.students
            .insert(student.student_id().to_string(), student);
        Ok(())
    }

    /// Returns a student by identifier.
    pub fn student(&self, student_id: &str) -> Option<&Student> {
        self.students.get(student_id)
    }

    /// Returns a student by identifier, or an error naming it.
    pub fn try_student(&self, student_id: &str) -> Result<&Student, ValidationError> {
        self.student(student_id)
            .ok_or_else(|| ValidationError::UnknownStudent(student_id.to_string()))
    }

    /// Returns a mutable student by identifier, or an error naming it.
    pub fn student_mut(&mut self, student_id: &str) -> Result<&mut Student, ValidationError> {
        self.students
            .get_mut(student_id)
            .ok_or_else(|| ValidationError::UnknownStudent(student_id.to_string()))
    }

    /// Removes a student and everything they own, keeping the order of the
    /// remaining students.
    pub fn remove_student(&mut self, student_id: &str) -> Result<Student, ValidationError> {
        self.students
            .shift_remove(student_id)
            .ok_or_else(|| ValidationError::UnknownStudent(student_id.to_string()))
    }

    /// Adds a catalog template, rejecting a duplicate code.
    pub fn add_template(&mut self, subject: Subject) -> Result<(), ValidationError> {
        if self.catalog.contains_key(subject.code()) {
            return Err(ValidationError::DuplicateTemplate(subject.code().to_string()));
        }
        tracing::debug!("Adding subject template {} ({})", subject.name(), subject.code());
        self.catalog.insert(subject.code().to_string(), subject);
        Ok(())
    }

    /// Returns a catalog template by code.
    pub fn template(&self, code: &str) -> Option<&Subject> {
        self.catalog.get(code)
    }

    /// Returns the template for `code`, creating it with default credit hours
    /// when `name` is given and none exists yet.
    pub fn ensure_template(
        &mut self,
        code: &str,
        name: Option<&str>,
    ) -> Result<&Subject, ValidationError> {
        if !self.catalog.contains_key(code) {
            let name = name.ok_or_else(|| ValidationError::UnknownTemplate(code.to_string()))?;
            self.add_template(Subject::new(name, code, TEMPLATE_CREDIT_HOURS)?)?;
        }
        self.template(code)
            .ok_or_else(|| ValidationError::UnknownTemplate(code.to_string()))
    }

    /// Enrolls a student in a fresh copy of the `code` template.
    ///
    /// College students must supply `credit_hours`; everyone else keeps the
    /// template's value and any override is ignored.
    pub fn enroll(
        &mut self,
        student_id: &str,
        code: &str,
        credit_hours: Option<u32>,
    ) -> Result<&Subject, ValidationError> {
        let template = self
            .catalog
            .get(code)
            .ok_or_else(|| ValidationError::UnknownTemplate(code.to_string()))?;
        let student = self
            .students
            .get_mut(student_id)
            .ok_or_else(|| ValidationError::UnknownStudent(student_id.to_string()))?;

        let override_hours = if student.is_college() {
            Some(credit_hours.ok_or_else(|| ValidationError::MissingCreditHours(code.to_string()))?)
        } else {
            None
        };
        let instance = template.instantiate(override_hours);
        student.enroll_subject(instance)?;

        tracing::debug!("Enrolled {student_id} in {code}");
        student
            .subject(code)
            .ok_or_else(|| ValidationError::UnknownSubject(code.to_string()))
    }

    /// Validates `input` against the student's grading scheme and records it
    /// in the enrolled subject `code`.
    pub fn record_grade(
        &mut self,
        student_id: &str,
        code: &str,
        description: &str,
        input: GradeInput,
    ) -> Result<(), ValidationError> {
        let student = self.student_mut(student_id)?;
        if student.subject(code).is_none() {
            return Err(ValidationError::UnknownSubject(code.to_string()));
        }
        let grade = student.build_grade(description, input)?;
        tracing::debug!("Recording grade `{grade}` for {student_id} in {code}");
        student.add_grade_to_subject(code, grade)
    }
}
