#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use std::fmt::Display;

use indexmap::IndexMap;

use super::{Grade, Subject};
use crate::{
    config::StandingPolicy,
    constants::{DEFAULT_MAJOR, FAILING_LETTER, MARK_RANGE, grade_points, valid_letters},
    error::ValidationError,
};

/// Type tag persisted for generic students.
pub const GENERIC_TAG: &str = "Student";
/// Type tag persisted for high-school students.
pub const HIGH_SCHOOL_TAG: &str = "HighSchoolStudent";
/// Type tag persisted for college students.
pub const COLLEGE_TAG: &str = "CollegeStudent";

/// Which grading scheme a student follows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StudentKind {
    /// Numeric marks, graded like a high-school student.
    Generic,
    /// Numeric marks 0-100, pass/fail on the overall mean.
    HighSchool,
    /// Letter grades converted to points, credit-weighted GPA.
    College {
        /// Declared major.
        major: String,
    },
}

impl StudentKind {
    /// Picks the variant for a persisted type tag. Unknown tags fall back to
    /// [`StudentKind::Generic`]; a missing major becomes "Undeclared".
    pub fn from_tag(tag: &str, major: Option<String>) -> Self {
        match tag {
            HIGH_SCHOOL_TAG => Self::HighSchool,
            COLLEGE_TAG => Self::College {
                major: major.unwrap_or_else(|| DEFAULT_MAJOR.to_string()),
            },
            _ => Self::Generic,
        }
    }

    /// Creates a college kind, defaulting an empty major to "Undeclared".
    pub fn college(major: impl Into<String>) -> Self {
        let major = major.into();
        let major = if major.trim().is_empty() {
            DEFAULT_MAJOR.to_string()
        } else {
            major
        };
        Self::College { major }
    }

    /// Returns the persisted type tag.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Generic => GENERIC_TAG,
            Self::HighSchool => HIGH_SCHOOL_TAG,
            Self::College { .. } => COLLEGE_TAG,
        }
    }
}

/// Raw grade entry before it is validated for a particular student.
#[derive(Debug, Clone, PartialEq)]
pub enum GradeInput {
    /// A 0-100 mark.
    Mark(f64),
    /// A letter label from the grade point table.
    Letter(String),
}

/// Outcome of a standing check.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Standing {
    /// Overall mark at or above the pass mark.
    Pass,
    /// Overall mark below the pass mark.
    Fail,
    /// No failing grades and GPA at or above the threshold.
    GoodStanding,
    /// At least one course carries an `F`.
    AtRiskFailing,
    /// GPA below the carried threshold.
    AtRiskGpa(f64),
}

impl Standing {
    /// Returns true for the passing outcomes.
    pub fn is_passing(&self) -> bool {
        matches!(self, Self::Pass | Self::GoodStanding)
    }
}

impl Display for Standing {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pass => write!(f, "Pass"),
            Self::Fail => write!(f, "Fail"),
            Self::GoodStanding => write!(f, "Good Standing"),
            Self::AtRiskFailing => write!(f, "At Risk (Failing one or more courses)"),
            Self::AtRiskGpa(threshold) => write!(f, "At Risk (GPA below {threshold:.1})"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
/// A student and the subjects they are enrolled in.
pub struct Student {
    /// Full name.
    name:              String,
    /// Unique identifier within the roster.
    student_id:        String,
    /// Grading scheme.
    kind:              StudentKind,
    /// Enrollment instances keyed by subject code, in enrollment order.
    enrolled_subjects: IndexMap<String, Subject>,
}

impl Student {
    /// Creates a student with no enrollments.
    pub fn new(
        name: impl Into<String>,
        student_id: impl Into<String>,
        kind: StudentKind,
    ) -> Result<Self, ValidationError> {
        let name = name.into();
        let student_id = student_id.into();
        if name.is_empty() {
            return Err(ValidationError::EmptyStudentName);
        }
        if student_id.is_empty() {
            return Err(ValidationError::EmptyStudentId);
        }

        Ok(Self {
            name,
            student_id,
            kind,
            enrolled_subjects: IndexMap::new(),
        })
    }

    /// Returns the name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the identifier.
    pub fn student_id(&self) -> &str {
        &self.student_id
    }

    /// Returns the grading scheme.
    pub fn kind(&self) -> &StudentKind {
        &self.kind
    }

    /// Returns the persisted type tag.
    pub fn type_tag(&self) -> &'static str {
        self.kind.tag()
    }

    /// Returns the major for college students.
    pub fn major(&self) -> Option<&str> {
        match &self.kind {
            StudentKind::College { major } => Some(major),
            _ => None,
        }
    }

    /// Returns true for college students.
    pub fn is_college(&self) -> bool {
        matches!(self.kind, StudentKind::College { .. })
    }

    /// Returns the enrolled subjects in enrollment order.
    pub fn enrolled_subjects(&self) -> &IndexMap<String, Subject> {
        &self.enrolled_subjects
    }

    /// Returns an enrolled subject by code.
    pub fn subject(&self, code: &str) -> Option<&Subject> {
        self.enrolled_subjects.get(code)
    }

    /// Enrolls the student in `subject`, keyed by its code.
    pub fn enroll_subject(&mut self, subject: Subject) -> Result<(), ValidationError> {
        if self.enrolled_subjects.contains_key(subject.code()) {
            return Err(ValidationError::AlreadyEnrolled {
                name: subject.name().to_string(),
                code: subject.code().to_string(),
            });
        }

        self.enrolled_subjects
            .insert(subject.code().to_string(), subject);
        Ok(())
    }

    /// Adds an already built grade to an enrolled subject.
    pub fn add_grade_to_subject(&mut self, code: &str, grade: Grade) -> Result<(), ValidationError> {
        self.enrolled_subjects
            .get_mut(code)
            .ok_or_else(|| ValidationError::UnknownSubject(code.to_string()))?
            .add_grade(grade)
    }

    /// Average score for one enrolled subject, or `None` if not enrolled.
    pub fn subject_average(&self, code: &str) -> Option<f64> {
        self.subject(code).map(Subject::average_grade)
    }

    /// Validates a raw entry against this student's grading scheme and builds
    /// the grade to store.
    pub fn build_grade(
        &self,
        description: impl Into<String>,
        input: GradeInput,
    ) -> Result<Grade, ValidationError> {
        match (&self.kind, input) {
            (StudentKind::College { .. }, GradeInput::Letter(letter)) => {
                let points = grade_points(&letter).ok_or_else(|| {
                    ValidationError::InvalidLetter {
                        given: letter.clone(),
                        valid: valid_letters(),
                    }
                })?;
                Grade::new(description, points, Some(letter))
            }
            (StudentKind::College { .. }, GradeInput::Mark(_)) => {
                Err(ValidationError::MarkNotAccepted(self.type_tag().to_string()))
            }
            (_, GradeInput::Mark(mark)) => {
                if !MARK_RANGE.contains(&mark) {
                    return Err(ValidationError::MarkOutOfRange(mark));
                }
                Grade::new(description, mark, None)
            }
            (_, GradeInput::Letter(_)) => {
                Err(ValidationError::LetterNotAccepted(self.type_tag().to_string()))
            }
        }
    }

    /// Mean of per-subject means over subjects that have grades.
    fn mean_of_subject_averages(&self) -> f64 {
        let averages: Vec<f64> = self
            .enrolled_subjects
            .values()
            .filter(|subject| subject.has_grades())
            .map(Subject::average_grade)
            .collect();

        if averages.is_empty() {
            return 0.0;
        }
        averages.iter().sum::<f64>() / averages.len() as f64
    }

    /// Credit-hour weighted mean of per-subject grade points. Subjects with no
    /// grades count towards neither sum.
    pub fn gpa(&self) -> f64 {
        let (weighted, hours) = self
            .enrolled_subjects
            .values()
            .filter(|subject| subject.has_grades())
            .fold((0.0_f64, 0_u64), |(weighted, hours), subject| {
                (
                    weighted + subject.average_grade() * f64::from(subject.credit_hours()),
                    hours + u64::from(subject.credit_hours()),
                )
            });

        if hours == 0 {
            return 0.0;
        }
        weighted / hours as f64
    }

    /// Returns true if any grade in any subject carries an `F`.
    pub fn has_failing_grade(&self) -> bool {
        self.enrolled_subjects
            .values()
            .flat_map(Subject::grades)
            .any(|grade| grade.letter() == Some(FAILING_LETTER))
    }

    /// Overall average mark, or GPA for college students.
    pub fn overall_performance(&self) -> f64 {
        match self.kind {
            StudentKind::College { .. } => self.gpa(),
            _ => self.mean_of_subject_averages(),
        }
    }

    /// Standing under `policy`; each variant reads its own threshold.
    pub fn standing(&self, policy: &StandingPolicy) -> Standing {
        match self.kind {
            StudentKind::College { .. } => {
                if self.has_failing_grade() {
                    Standing::AtRiskFailing
                } else if self.gpa() < policy.good_standing_gpa() {
                    Standing::AtRiskGpa(policy.good_standing_gpa())
                } else {
                    Standing::GoodStanding
                }
            }
            _ => {
                if self.overall_performance() >= policy.pass_mark() {
                    Standing::Pass
                } else {
                    Standing::Fail
                }
            }
        }
    }

    /// Standing under the default policy, rendered as text.
    pub fn pass_fail_status(&self) -> String {
        self.standing(&StandingPolicy::default()).to_string()
    }

    /// Full multi-line report under `policy`.
    pub fn generate_report(&self, policy: &StandingPolicy) -> String {
        crate::report::generate_report(self, policy)
    }
}

impl Display for Student {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.kind {
            StudentKind::College { major } => write!(
                f,
                "College Student: {}, ID: {}, Major: {}, GPA: {:.2}",
                self.name,
                self.student_id,
                major,
                self.gpa()
            ),
            _ => write!(
                f,
                "Student Name: {}, ID: {}, Overall Avg: {:.2}",
                self.name,
                self.student_id,
                self.overall_performance()
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn subject(code: &str, credit_hours: u32, scores: &[f64]) -> Subject {
        let mut s = Subject::new(format!("Subject {code}"), code, credit_hours).unwrap();
        for (i, score) in scores.iter().enumerate() {
            s.add_grade(Grade::new(format!("item {i}"), *score, None).unwrap())
                .unwrap();
        }
        s
    }

    fn college() -> Student {
        Student::new("Ada", "C1", StudentKind::college("CS")).unwrap()
    }

    #[test]
    fn rejects_empty_identity() {
        assert_eq!(
            Student::new("", "1", StudentKind::Generic),
            Err(ValidationError::EmptyStudentName)
        );
        assert_eq!(
            Student::new("Bo", "", StudentKind::HighSchool),
            Err(ValidationError::EmptyStudentId)
        );
    }

    #[test]
    fn high_school_overall_skips_empty_subjects() {
        let mut s = Student::new("Bo", "H1", StudentKind::HighSchool).unwrap();
        s.enroll_subject(subject("A", 0, &[60.0, 80.0])).unwrap();
        s.enroll_subject(subject("B", 0, &[])).unwrap();
        s.enroll_subject(subject("C", 0, &[100.0])).unwrap();
        assert_eq!(s.overall_performance(), 85.0);
    }

    #[test]
    fn overall_is_zero_without_graded_subjects() {
        let mut s = Student::new("Bo", "H1", StudentKind::HighSchool).unwrap();
        assert_eq!(s.overall_performance(), 0.0);
        s.enroll_subject(subject("A", 0, &[])).unwrap();
        assert_eq!(s.overall_performance(), 0.0);
        assert_eq!(s.pass_fail_status(), "Fail");
    }

    #[test]
    fn pass_is_inclusive_of_threshold() {
        let mut s = Student::new("Bo", "H1", StudentKind::HighSchool).unwrap();
        s.enroll_subject(subject("A", 0, &[50.0])).unwrap();
        assert_eq!(s.standing(&StandingPolicy::default()), Standing::Pass);
        assert_eq!(s.pass_fail_status(), "Pass");

        let strict = StandingPolicy::new(50.5, 2.0);
        assert_eq!(s.standing(&strict), Standing::Fail);
    }

    #[test]
    fn generic_students_grade_like_high_school() {
        let mut s = Student::new("Cy", "G1", StudentKind::Generic).unwrap();
        s.enroll_subject(subject("A", 0, &[40.0])).unwrap();
        assert_eq!(s.overall_performance(), 40.0);
        assert_eq!(s.pass_fail_status(), "Fail");
        assert_eq!(s.type_tag(), "Student");
        assert_eq!(s.major(), None);
    }

    #[test]
    fn gpa_excludes_ungraded_subjects_from_both_sums() {
        let mut s = college();
        let mut x = Subject::new("X", "X", 3).unwrap();
        x.add_grade(Grade::new("a", 4.0, Some("A".into())).unwrap())
            .unwrap();
        x.add_grade(Grade::new("b", 3.0, Some("B".into())).unwrap())
            .unwrap();
        s.enroll_subject(x).unwrap();
        s.enroll_subject(Subject::new("Y", "Y", 4).unwrap()).unwrap();

        assert_eq!(s.gpa(), 3.5);
        assert_eq!(s.overall_performance(), 3.5);
        assert_eq!(s.pass_fail_status(), "Good Standing");
    }

    #[test]
    fn gpa_weights_by_credit_hours() {
        let mut s = college();
        s.enroll_subject(subject("X", 3, &[4.0])).unwrap();
        s.enroll_subject(subject("Y", 1, &[2.0])).unwrap();
        assert_eq!(s.gpa(), 3.5);
    }

    #[test]
    fn gpa_is_zero_when_graded_subjects_carry_no_hours() {
        let mut s = college();
        s.enroll_subject(subject("X", 0, &[4.0])).unwrap();
        assert_eq!(s.gpa(), 0.0);
    }

    #[test]
    fn failing_grade_overrides_gpa() {
        let mut s = college();
        s.enroll_subject(subject("X", 10, &[4.0, 4.0, 4.0])).unwrap();
        s.enroll_subject(Subject::new("Y", "Y", 1).unwrap()).unwrap();
        let f = s.build_grade("final", GradeInput::Letter("F".into())).unwrap();
        s.add_grade_to_subject("Y", f).unwrap();

        assert!(s.gpa() > 3.0);
        assert!(s.has_failing_grade());
        assert_eq!(s.pass_fail_status(), "At Risk (Failing one or more courses)");
    }

    #[test]
    fn low_gpa_reports_threshold() {
        let mut s = college();
        s.enroll_subject(Subject::new("X", "X", 3).unwrap()).unwrap();
        let d = s.build_grade("exam", GradeInput::Letter("D".into())).unwrap();
        s.add_grade_to_subject("X", d).unwrap();

        assert_eq!(s.pass_fail_status(), "At Risk (GPA below 2.0)");
        let lenient = StandingPolicy::new(50.0, 1.5);
        assert_eq!(s.standing(&lenient), Standing::GoodStanding);
    }

    #[test]
    fn duplicate_enrollment_leaves_first_untouched() {
        let mut s = Student::new("Bo", "H1", StudentKind::HighSchool).unwrap();
        s.enroll_subject(subject("A", 0, &[70.0])).unwrap();
        let err = s.enroll_subject(subject("A", 5, &[])).unwrap_err();
        assert!(matches!(err, ValidationError::AlreadyEnrolled { .. }));
        assert_eq!(s.enrolled_subjects().len(), 1);
        assert_eq!(s.subject("A").unwrap().grades().len(), 1);
        assert_eq!(s.subject("A").unwrap().credit_hours(), 0);
    }

    #[test]
    fn grade_to_unknown_subject_fails() {
        let mut s = Student::new("Bo", "H1", StudentKind::HighSchool).unwrap();
        let g = Grade::new("quiz", 10.0, None).unwrap();
        assert_eq!(
            s.add_grade_to_subject("NOPE", g),
            Err(ValidationError::UnknownSubject("NOPE".into()))
        );
        assert_eq!(s.subject_average("NOPE"), None);
    }

    #[test]
    fn high_school_grade_entry_is_range_checked() {
        let s = Student::new("Bo", "H1", StudentKind::HighSchool).unwrap();
        assert!(s.build_grade("q", GradeInput::Mark(100.0)).is_ok());
        assert!(s.build_grade("q", GradeInput::Mark(0.0)).is_ok());
        assert_eq!(
            s.build_grade("q", GradeInput::Mark(101.0)),
            Err(ValidationError::MarkOutOfRange(101.0))
        );
        assert!(matches!(
            s.build_grade("q", GradeInput::Letter("A".into())),
            Err(ValidationError::LetterNotAccepted(_))
        ));
    }

    #[test]
    fn college_grade_entry_maps_letters_to_points() {
        let s = college();
        let g = s.build_grade("essay", GradeInput::Letter("B-".into())).unwrap();
        assert_eq!(g.score(), 2.75);
        assert_eq!(g.letter(), Some("B-"));

        assert!(matches!(
            s.build_grade("essay", GradeInput::Letter("E".into())),
            Err(ValidationError::InvalidLetter { .. })
        ));
        assert!(matches!(
            s.build_grade("essay", GradeInput::Mark(90.0)),
            Err(ValidationError::MarkNotAccepted(_))
        ));
    }

    #[test]
    fn kind_factory_reads_tags() {
        assert_eq!(StudentKind::from_tag("HighSchoolStudent", None), StudentKind::HighSchool);
        assert_eq!(
            StudentKind::from_tag("CollegeStudent", None),
            StudentKind::College {
                major: "Undeclared".into()
            }
        );
        assert_eq!(StudentKind::from_tag("Alien", Some("x".into())), StudentKind::Generic);
        assert_eq!(StudentKind::college("  "), StudentKind::college("Undeclared"));
    }

    #[test]
    fn display_differs_by_variant() {
        let hs = Student::new("Bo", "H1", StudentKind::HighSchool).unwrap();
        assert_eq!(hs.to_string(), "Student Name: Bo, ID: H1, Overall Avg: 0.00");
        assert_eq!(
            college().to_string(),
            "College Student: Ada, ID: C1, Major: CS, GPA: 0.00"
        );
    }
}
