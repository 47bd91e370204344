#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use std::fmt::{self, Display, Formatter};

use tabled::{
    Table, Tabled,
    settings::{Alignment, Modify, Panel, Style, object::Rows},
};

use crate::{
    config::StandingPolicy,
    constants::REPORT_RULE,
    model::{Student, StudentKind},
    roster::Roster,
};

/// Full multi-line report for one student.
///
/// College students get credit hours, per-subject points, GPA and academic
/// status; everyone else gets per-subject marks and the overall average.
pub fn generate_report(student: &Student, policy: &StandingPolicy) -> String {
    FullReport { student, policy }.to_string()
}

/// Borrowed view rendered by [`generate_report`].
struct FullReport<'a> {
    /// Student being reported on.
    student: &'a Student,
    /// Thresholds for the status line.
    policy:  &'a StandingPolicy,
}

impl Display for FullReport<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.student.kind() {
            StudentKind::College { major } => college_report(f, self.student, major, self.policy),
            _ => mark_report(f, self.student, self.policy),
        }
    }
}

/// Writes the identity block shared by both layouts.
fn header(out: &mut Formatter<'_>, student: &Student) -> fmt::Result {
    writeln!(out, "Student Report")?;
    writeln!(out, "{REPORT_RULE}")?;
    writeln!(out, "Name: {}", student.name())?;
    writeln!(out, "ID: {}", student.student_id())?;
    writeln!(out, "Type: {}", student.type_tag())
}

/// Report layout for mark-graded students.
fn mark_report(out: &mut Formatter<'_>, student: &Student, policy: &StandingPolicy) -> fmt::Result {
    header(out, student)?;
    writeln!(out, "{REPORT_RULE}")?;
    writeln!(out, "Subjects Enrolled:")?;
    if student.enrolled_subjects().is_empty() {
        writeln!(out, "  No subjects enrolled.")?;
    }
    for subject in student.enrolled_subjects().values() {
        writeln!(
            out,
            "  - {} ({}): Average = {:.2}",
            subject.name(),
            subject.code(),
            subject.average_grade()
        )?;
        if subject.has_grades() {
            for grade in subject.grades() {
                writeln!(out, "    - {grade}")?;
            }
        } else {
            writeln!(out, "    - No grades recorded.")?;
        }
    }
    writeln!(out, "{REPORT_RULE}")?;
    writeln!(out, "Overall Average: {:.2}", student.overall_performance())?;
    writeln!(out, "Status: {}", student.standing(policy))?;
    writeln!(out, "{REPORT_RULE}")
}

/// Report layout for letter-graded college students.
fn college_report(
    out: &mut Formatter<'_>,
    student: &Student,
    major: &str,
    policy: &StandingPolicy,
) -> fmt::Result {
    header(out, student)?;
    writeln!(out, "Major: {major}")?;
    writeln!(out, "{REPORT_RULE}")?;
    writeln!(out, "Subjects Enrolled:")?;
    if student.enrolled_subjects().is_empty() {
        writeln!(out, "  No subjects enrolled.")?;
    }
    for subject in student.enrolled_subjects().values() {
        writeln!(
            out,
            "  - {} ({}) - {} Credit Hours",
            subject.name(),
            subject.code(),
            subject.credit_hours()
        )?;
        if subject.has_grades() {
            for grade in subject.grades() {
                writeln!(out, "    - {grade}")?;
            }
            writeln!(out, "    Subject Average Points: {:.2}", subject.average_grade())?;
        } else {
            writeln!(out, "    - No grades recorded for this subject.")?;
        }
    }
    writeln!(out, "{REPORT_RULE}")?;
    writeln!(out, "Overall GPA: {:.2}", student.gpa())?;
    writeln!(out, "Academic Status: {}", student.standing(policy))?;
    if student.has_failing_grade() {
        writeln!(out, "Note: Student has received an 'F' in one or more courses.")?;
    }
    writeln!(out, "{REPORT_RULE}")
}

/// Shorter performance view: GPA and status for college students, per-subject
/// averages and overall mark for everyone else.
pub fn performance_summary(student: &Student, policy: &StandingPolicy) -> String {
    Summary { student, policy }.to_string()
}

/// Borrowed view rendered by [`performance_summary`].
struct Summary<'a> {
    /// Student being summarized.
    student: &'a Student,
    /// Thresholds for the status line.
    policy:  &'a StandingPolicy,
}

impl Display for Summary<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        summary_into(f, self.student, self.policy)
    }
}

/// Writes the performance summary into `out`.
fn summary_into(out: &mut Formatter<'_>, student: &Student, policy: &StandingPolicy) -> fmt::Result {
    writeln!(
        out,
        "Performance Summary for {} ({} - {}):",
        student.name(),
        student.student_id(),
        student.type_tag()
    )?;
    if student.enrolled_subjects().is_empty() {
        return writeln!(out, "No subjects enrolled.");
    }

    if student.is_college() {
        writeln!(out, "  Overall GPA: {:.2}", student.gpa())?;
        writeln!(out, "  Academic Status: {}", student.standing(policy))?;
        if student.has_failing_grade() {
            writeln!(out, "  Alert: Student has one or more 'F' grades.")?;
        }
        return writeln!(
            out,
            "  For detailed subject grades, please use the 'report' command."
        );
    }

    for (code, subject) in student.enrolled_subjects() {
        writeln!(
            out,
            "  Subject: {} ({code}) - Average Mark: {:.2}",
            subject.name(),
            subject.average_grade()
        )?;
        if subject.has_grades() {
            for grade in subject.grades() {
                writeln!(out, "      - {grade}")?;
            }
        } else {
            writeln!(out, "    No grades recorded for this subject.")?;
        }
    }
    writeln!(out)?;
    writeln!(out, "  Overall Average Mark: {:.2}", student.overall_performance())?;
    writeln!(out, "  Status: {}", student.standing(policy))
}

#[derive(Tabled)]
/// One row of the student listing.
struct StudentRow {
    #[tabled(rename = "ID")]
    /// Student identifier.
    id:       String,
    #[tabled(rename = "Name")]
    /// Student name.
    name:     String,
    #[tabled(rename = "Type")]
    /// Variant tag.
    kind:     String,
    #[tabled(rename = "Major")]
    /// Major, blank for non-college students.
    major:    String,
    #[tabled(rename = "Subjects")]
    /// Number of enrollments.
    subjects: usize,
    #[tabled(rename = "Overall")]
    /// Overall mark or GPA.
    overall:  String,
    #[tabled(rename = "Status")]
    /// Standing.
    status:   String,
}

#[derive(Tabled)]
/// One row of the catalog listing.
struct TemplateRow {
    #[tabled(rename = "Code")]
    /// Subject code.
    code:         String,
    #[tabled(rename = "Name")]
    /// Subject name.
    name:         String,
    #[tabled(rename = "Credit Hours")]
    /// Template credit hours.
    credit_hours: u32,
}

/// Table of every student with overall performance and standing.
pub fn student_table(roster: &Roster, policy: &StandingPolicy) -> String {
    if roster.students().is_empty() {
        return "No students in the system.".to_string();
    }

    let rows = roster.students().values().map(|student| StudentRow {
        id:       student.student_id().to_string(),
        name:     student.name().to_string(),
        kind:     student.type_tag().to_string(),
        major:    student.major().unwrap_or_default().to_string(),
        subjects: student.enrolled_subjects().len(),
        overall:  format!("{:.2}", student.overall_performance()),
        status:   student.standing(policy).to_string(),
    });

    Table::new(rows)
        .with(Panel::header("All Students"))
        .with(Style::modern())
        .with(Modify::new(Rows::first()).with(Alignment::center()))
        .to_string()
}

/// Table of catalog templates.
pub fn catalog_table(roster: &Roster) -> String {
    if roster.templates().is_empty() {
        return "No subjects defined in the system yet.".to_string();
    }

    let rows = roster.templates().values().map(|subject| TemplateRow {
        code:         subject.code().to_string(),
        name:         subject.name().to_string(),
        credit_hours: subject.credit_hours(),
    });

    Table::new(rows)
        .with(Panel::header("Available Subjects (Templates)"))
        .with(Style::modern())
        .with(Modify::new(Rows::first()).with(Alignment::center()))
        .to_string()
}
