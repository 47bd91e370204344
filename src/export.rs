#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use std::{fs::File, io, path::Path};

use anyhow::{Context, Result};
use serde::Serialize;

use crate::{
    config::StandingPolicy,
    model::{Grade, Student, Subject},
    roster::Roster,
};

/// One flattened (student, subject, grade) record.
///
/// Subject and grade columns are empty on the summary rows emitted for a
/// student without subjects or a subject without grades.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ExportRow {
    /// Student identifier.
    pub student_id:                    String,
    /// Student name.
    pub student_name:                  String,
    /// Variant tag.
    pub student_type:                  String,
    /// Major, college students only.
    pub major:                         Option<String>,
    /// Subject code.
    pub subject_code:                  Option<String>,
    /// Subject name.
    pub subject_name:                  Option<String>,
    /// Subject credit hours.
    pub subject_credit_hours:          Option<u32>,
    /// Grade description.
    pub grade_description:             Option<String>,
    /// Mark or grade point, two decimals.
    pub grade_score_or_point:          Option<String>,
    /// Letter label.
    pub letter_grade:                  Option<String>,
    /// Subject average, two decimals.
    pub subject_average_or_gpa_points: Option<String>,
    /// Overall mark or GPA, two decimals.
    pub overall_average_mark_or_gpa:   String,
    /// Standing.
    pub status:                        String,
}

impl ExportRow {
    /// Summary row carrying only the student columns.
    fn for_student(student: &Student, policy: &StandingPolicy) -> Self {
        Self {
            student_id: student.student_id().to_string(),
            student_name: student.name().to_string(),
            student_type: student.type_tag().to_string(),
            major: student.major().map(str::to_string),
            overall_average_mark_or_gpa: format!("{:.2}", student.overall_performance()),
            status: student.standing(policy).to_string(),
            ..Self::default()
        }
    }

    /// Adds the subject columns.
    fn with_subject(mut self, subject: &Subject) -> Self {
        self.subject_code = Some(subject.code().to_string());
        self.subject_name = Some(subject.name().to_string());
        self.subject_credit_hours = Some(subject.credit_hours());
        self.subject_average_or_gpa_points = Some(format!("{:.2}", subject.average_grade()));
        self
    }

    /// Adds the grade columns.
    fn with_grade(mut self, grade: &Grade) -> Self {
        self.grade_description = Some(grade.description().to_string());
        self.grade_score_or_point = Some(format!("{:.2}", grade.score()));
        self.letter_grade = grade.letter().map(str::to_string);
        self
    }
}

/// Flattens the roster into export rows, in roster order.
pub fn export_rows(roster: &Roster, policy: &StandingPolicy) -> Vec<ExportRow> {
    let mut rows = Vec::new();
    for student in roster.students().values() {
        let base = ExportRow::for_student(student, policy);
        if student.enrolled_subjects().is_empty() {
            rows.push(base);
            continue;
        }

        for subject in student.enrolled_subjects().values() {
            let with_subject = base.clone().with_subject(subject);
            if subject.has_grades() {
                rows.extend(
                    subject
                        .grades()
                        .iter()
                        .map(|grade| with_subject.clone().with_grade(grade)),
                );
            } else {
                rows.push(with_subject);
            }
        }
    }
    rows
}

/// Writes rows as CSV with a header line.
pub fn write_csv<W: io::Write>(rows: &[ExportRow], writer: W) -> Result<()> {
    let mut out = csv::Writer::from_writer(writer);
    for row in rows {
        out.serialize(row).context("Failed to write CSV row")?;
    }
    out.flush().context("Failed to flush CSV output")?;
    Ok(())
}

/// Exports the whole roster to a CSV file at `path`, returning the number of
/// rows written.
pub fn export_csv(roster: &Roster, policy: &StandingPolicy, path: &Path) -> Result<usize> {
    let rows = export_rows(roster, policy);
    let file =
        File::create(path).with_context(|| format!("Could not create {}", path.display()))?;
    write_csv(&rows, file).with_context(|| format!("Error exporting to {}", path.display()))?;
    tracing::info!("Data exported successfully to {}", path.display());
    Ok(rows.len())
}

/// Normalizes a user-supplied export name: blank becomes the default, and a
/// missing `.csv` extension is appended.
pub fn export_file_name(name: Option<&str>) -> String {
    let name = name.map(str::trim).unwrap_or_default();
    if name.is_empty() {
        return crate::constants::DEFAULT_EXPORT_FILE.to_string();
    }
    if name.to_lowercase().ends_with(".csv") {
        name.to_string()
    } else {
        format!("{name}.csv")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{GradeInput, StudentKind};

    fn roster() -> Roster {
        let mut r = Roster::new();
        r.add_template(Subject::new("Maths", "MATH101", 3).unwrap())
            .unwrap();
        r.add_template(Subject::new("Art", "ART1", 0).unwrap())
            .unwrap();
        r.add_student(Student::new("Bo", "H1", StudentKind::HighSchool).unwrap())
            .unwrap();
        r.add_student(Student::new("Ada", "C1", StudentKind::college("CS")).unwrap())
            .unwrap();
        r.add_student(Student::new("Cy", "G1", StudentKind::Generic).unwrap())
            .unwrap();

        r.enroll("H1", "MATH101", None).unwrap();
        r.enroll("H1", "ART1", None).unwrap();
        r.record_grade("H1", "MATH101", "Quiz 1", GradeInput::Mark(60.0))
            .unwrap();
        r.record_grade("H1", "MATH101", "Quiz 2", GradeInput::Mark(70.0))
            .unwrap();
        r.enroll("C1", "MATH101", Some(4)).unwrap();
        r.record_grade("C1", "MATH101", "Final", GradeInput::Letter("B+".into()))
            .unwrap();
        r
    }

    #[test]
    fn one_row_per_grade_plus_summaries() {
        let rows = export_rows(&roster(), &StandingPolicy::default());
        // H1: two grades + one empty subject; C1: one grade; G1: no subjects.
        assert_eq!(rows.len(), 5);

        assert_eq!(rows[0].grade_description.as_deref(), Some("Quiz 1"));
        assert_eq!(rows[0].subject_average_or_gpa_points.as_deref(), Some("65.00"));
        assert_eq!(rows[0].overall_average_mark_or_gpa, "65.00");
        assert_eq!(rows[0].status, "Pass");

        assert_eq!(rows[2].subject_code.as_deref(), Some("ART1"));
        assert_eq!(rows[2].grade_description, None);

        assert_eq!(rows[3].major.as_deref(), Some("CS"));
        assert_eq!(rows[3].letter_grade.as_deref(), Some("B+"));
        assert_eq!(rows[3].grade_score_or_point.as_deref(), Some("3.50"));
        assert_eq!(rows[3].subject_credit_hours, Some(4));

        assert_eq!(rows[4].student_id, "G1");
        assert_eq!(rows[4].subject_code, None);
        assert_eq!(rows[4].status, "Fail");
    }

    #[test]
    fn csv_has_header_and_rows() {
        let rows = export_rows(&roster(), &StandingPolicy::default());
        let mut buf = Vec::new();
        write_csv(&rows, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let mut lines = text.lines();

        assert_eq!(
            lines.next().unwrap(),
            "student_id,student_name,student_type,major,subject_code,subject_name,\
             subject_credit_hours,grade_description,grade_score_or_point,letter_grade,\
             subject_average_or_gpa_points,overall_average_mark_or_gpa,status"
        );
        assert_eq!(
            lines.next().unwrap(),
            "H1,Bo,HighSchoolStudent,,MATH101,Maths,3,Quiz 1,60.00,,65.00,65.00,Pass"
        );
        assert_eq!(lines.count(), 4);
    }

    #[test]
    fn file_names_are_normalized() {
        assert_eq!(export_file_name(None), "gradeforge_export.csv");
        assert_eq!(export_file_name(Some("  ")), "gradeforge_export.csv");
        assert_eq!(export_file_name(Some("term1")), "term1.csv");
        assert_eq!(export_file_name(Some("Term1.CSV")), "Term1.CSV");
    }
}
