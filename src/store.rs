#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

//! JSON persistence for a [`Roster`].
//!
//! Saving writes the whole roster. Loading is lenient: a malformed student,
//! subject, template or grade record is skipped with a [`LoadWarning`], and
//! everything else still loads.

use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Value, ser::PrettyFormatter};

use crate::{
    config::Config,
    constants::LOADED_CREDIT_HOURS,
    error::ValidationError,
    model::{Grade, Student, StudentKind, Subject, grade::grade},
    roster::Roster,
};

/// Something that was skipped while loading.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum LoadWarning {
    /// The document as a whole could not be used.
    #[error("Could not read persisted data: {0}. Starting with an empty system.")]
    Document(String),
    /// A catalog template record was skipped.
    #[error("Could not load available subject {code}: {reason}")]
    Template {
        /// Map key of the template.
        code:   String,
        /// Why it was skipped.
        reason: String,
    },
    /// A student record was skipped.
    #[error("Could not load student {student_id}: {reason}")]
    Student {
        /// Map key of the student.
        student_id: String,
        /// Why it was skipped.
        reason:     String,
    },
    /// A student's `student_id` field disagreed with its map key.
    #[error("Student record keyed {key} claims ID {recorded}; using {key}")]
    MismatchedId {
        /// Map key of the student.
        key:      String,
        /// ID found inside the record.
        recorded: String,
    },
    /// A template's `code` field disagreed with its map key.
    #[error("Subject template keyed {key} claims code {recorded}; using {key}")]
    MismatchedCode {
        /// Map key of the template.
        key:      String,
        /// Code found inside the record.
        recorded: String,
    },
    /// An enrolled subject record was skipped.
    #[error("Could not load enrolled subject {code} for student {student_id}: {reason}")]
    Subject {
        /// Student the subject belonged to.
        student_id: String,
        /// Map key of the subject.
        code:       String,
        /// Why it was skipped.
        reason:     String,
    },
    /// A grade record was skipped.
    #[error("Could not load grade #{index} for {student_id} in {code}: {reason}")]
    Grade {
        /// Student the grade belonged to.
        student_id: String,
        /// Subject the grade belonged to.
        code:       String,
        /// Position of the grade in the persisted list.
        index:      usize,
        /// Why it was skipped.
        reason:     String,
    },
}

/// Result of loading persisted data.
#[derive(Debug, Default)]
pub struct LoadOutcome {
    /// Everything that loaded successfully.
    pub roster:   Roster,
    /// Records that were skipped, in the order they were met.
    pub warnings: Vec<LoadWarning>,
}

/// Persistence component bound to one data file.
#[derive(Debug, Clone)]
pub struct Store {
    /// Path of the JSON document.
    path: PathBuf,
}

impl Store {
    /// Creates a store for `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Creates a store for the configured data file.
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.data_file())
    }

    /// Returns the data file path.
    pub fn path(&self) -> &Path {
        self.path.as_path()
    }

    /// Loads the roster; see [`load`].
    pub fn load(&self) -> LoadOutcome {
        load(&self.path)
    }

    /// Saves the roster; see [`save`].
    pub fn save(&self, roster: &Roster) -> Result<()> {
        save(roster, &self.path)
    }
}

/// Serialized grade.
#[derive(Serialize)]
struct GradeRecord<'a> {
    /// Grade description.
    description:  &'a str,
    /// Mark or grade point.
    score:        f64,
    /// Letter label, written as `null` when absent.
    letter_grade: Option<&'a str>,
}

/// Serialized catalog template.
#[derive(Serialize)]
struct TemplateRecord<'a> {
    /// Subject name.
    name:         &'a str,
    /// Subject code.
    code:         &'a str,
    /// Credit hours.
    credit_hours: u32,
}

/// Serialized enrollment instance.
#[derive(Serialize)]
struct SubjectRecord<'a> {
    /// Subject name.
    name:         &'a str,
    /// Subject code.
    code:         &'a str,
    /// Credit hours.
    credit_hours: u32,
    /// Grades in insertion order.
    grades:       Vec<GradeRecord<'a>>,
}

/// Serialized student.
#[derive(Serialize)]
struct StudentRecord<'a> {
    /// Student name.
    name:              &'a str,
    /// Student identifier.
    student_id:        &'a str,
    /// Variant tag.
    #[serde(rename = "type")]
    kind:              &'a str,
    /// Major, college students only.
    #[serde(skip_serializing_if = "Option::is_none")]
    major:             Option<&'a str>,
    /// Enrollments keyed by code.
    enrolled_subjects: IndexMap<&'a str, SubjectRecord<'a>>,
}

/// Top-level persisted document.
#[derive(Serialize)]
struct RosterRecord<'a> {
    /// Students keyed by identifier.
    students:           IndexMap<&'a str, StudentRecord<'a>>,
    /// Catalog templates keyed by code.
    available_subjects: IndexMap<&'a str, TemplateRecord<'a>>,
}

impl<'a> From<&'a Grade> for GradeRecord<'a> {
    fn from(grade: &'a Grade) -> Self {
        Self {
            description:  grade.description(),
            score:        grade.score(),
            letter_grade: grade.letter(),
        }
    }
}

impl<'a> From<&'a Subject> for SubjectRecord<'a> {
    fn from(subject: &'a Subject) -> Self {
        Self {
            name:         subject.name(),
            code:         subject.code(),
            credit_hours: subject.credit_hours(),
            grades:       subject.grades().iter().map(GradeRecord::from).collect(),
        }
    }
}

impl<'a> From<&'a Student> for StudentRecord<'a> {
    fn from(student: &'a Student) -> Self {
        Self {
            name:              student.name(),
            student_id:        student.student_id(),
            kind:              student.type_tag(),
            major:             student.major(),
            enrolled_subjects: student
                .enrolled_subjects()
                .iter()
                .map(|(code, subject)| (code.as_str(), SubjectRecord::from(subject)))
                .collect(),
        }
    }
}

impl<'a> From<&'a Roster> for RosterRecord<'a> {
    fn from(roster: &'a Roster) -> Self {
        Self {
            students:           roster
                .students()
                .iter()
                .map(|(id, student)| (id.as_str(), StudentRecord::from(student)))
                .collect(),
            available_subjects: roster
                .templates()
                .iter()
                .map(|(code, subject)| {
                    (code.as_str(), TemplateRecord {
                        name:         subject.name(),
                        code:         subject.code(),
                        credit_hours: subject.credit_hours(),
                    })
                })
                .collect(),
        }
    }
}

/// Renders the roster as the persisted JSON document (4-space indent).
pub fn to_json_string(roster: &Roster) -> Result<String> {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    RosterRecord::from(roster)
        .serialize(&mut ser)
        .context("Failed to serialize roster")?;
    String::from_utf8(buf).context("Serialized roster was not valid UTF-8")
}

/// Writes the roster to `path`. Failures are reported, not retried.
pub fn save(roster: &Roster, path: &Path) -> Result<()> {
    let json = to_json_string(roster)?;
    fs::write(path, json).with_context(|| format!("Could not save data to {}", path.display()))?;
    tracing::info!("Data saved successfully to {}", path.display());
    Ok(())
}

/// Reads the roster from `path`.
///
/// A missing or blank file is an empty roster with no warnings. An unreadable
/// or unparseable file is an empty roster with one warning.
pub fn load(path: &Path) -> LoadOutcome {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::debug!("No data file at {}; starting empty", path.display());
            return LoadOutcome::default();
        }
        Err(e) => {
            return document_failure(format!("{}: {e}", path.display()));
        }
    };

    let outcome = from_json_str(&text);
    if !outcome.roster.is_empty() {
        tracing::info!("Data loaded successfully from {}", path.display());
    }
    outcome
}

/// Rebuilds a roster from the persisted JSON text.
pub fn from_json_str(text: &str) -> LoadOutcome {
    if text.trim().is_empty() {
        return LoadOutcome::default();
    }

    let document: Value = match serde_json::from_str(text) {
        Ok(value) => value,
        Err(e) => return document_failure(format!("invalid JSON ({e})")),
    };
    let Value::Object(mut document) = document else {
        return document_failure("top level is not a JSON object".to_string());
    };

    let mut loader = Loader::default();
    match document.remove("available_subjects") {
        Some(Value::Object(templates)) => {
            for (code, value) in templates {
                loader.template(code, value);
            }
        }
        Some(Value::Null) | None => {}
        Some(_) => {
            loader.warn(LoadWarning::Document("`available_subjects` is not an object".into()))
        }
    }
    match document.remove("students") {
        Some(Value::Object(students)) => {
            for (student_id, value) in students {
                loader.student(student_id, value);
            }
        }
        Some(Value::Null) | None => {}
        Some(_) => loader.warn(LoadWarning::Document("`students` is not an object".into())),
    }

    loader.outcome
}

/// Empty roster plus a single document-level warning.
fn document_failure(reason: String) -> LoadOutcome {
    let warning = LoadWarning::Document(reason);
    tracing::warn!("{warning}");
    LoadOutcome {
        roster:   Roster::default(),
        warnings: vec![warning],
    }
}

/// Persisted credit hours; negative values are rejected after parsing.
#[derive(Deserialize)]
#[serde(transparent)]
struct CreditHours(i64);

impl CreditHours {
    /// Resolves an optional persisted value, defaulting when absent.
    fn resolve(value: Option<Self>) -> Result<u32, ValidationError> {
        match value {
            None => Ok(LOADED_CREDIT_HOURS),
            Some(Self(hours)) => {
                u32::try_from(hours).map_err(|_| ValidationError::NegativeCreditHours(hours.to_string()))
            }
        }
    }
}

/// Persisted score: a number, or a numeric string from hand-edited files.
#[derive(Deserialize)]
#[serde(untagged)]
enum ScoreEntry {
    /// Plain JSON number.
    Number(f64),
    /// Number written as text.
    Text(String),
}

impl ScoreEntry {
    /// Converts to a number.
    fn value(&self) -> Result<f64, String> {
        match self {
            Self::Number(n) => Ok(*n),
            Self::Text(text) => text
                .trim()
                .parse::<f64>()
                .map_err(|e| format!("score `{text}` is not a number ({e})")),
        }
    }
}

/// Persisted template, as read back.
#[derive(Deserialize)]
struct TemplateEntry {
    /// Subject name.
    name:         String,
    /// Subject code.
    code:         String,
    /// Credit hours, defaulted when absent.
    credit_hours: Option<CreditHours>,
}

/// Persisted enrollment, as read back. Grades stay raw so that one bad grade
/// does not take the subject with it.
#[derive(Deserialize)]
struct SubjectEntry {
    /// Subject name.
    name:         String,
    /// Subject code.
    code:         String,
    /// Credit hours, defaulted when absent.
    credit_hours: Option<CreditHours>,
    /// Raw grade records.
    #[serde(default)]
    grades:       Vec<Value>,
}

/// Persisted grade, as read back.
#[derive(Deserialize)]
struct GradeEntry {
    /// Grade description.
    description:  String,
    /// Mark or grade point.
    score:        ScoreEntry,
    /// Letter label.
    #[serde(default)]
    letter_grade: Option<String>,
}

/// Persisted student, as read back. Subjects stay raw for the same reason as
/// grades.
#[derive(Deserialize)]
struct StudentEntry {
    /// Student name.
    name:              String,
    /// Identifier recorded inside the entry.
    #[serde(default)]
    student_id:        Option<String>,
    /// Variant tag.
    #[serde(rename = "type", default)]
    kind:              Option<String>,
    /// Major, college students only.
    #[serde(default)]
    major:             Option<String>,
    /// Raw enrollment records keyed by code.
    #[serde(default)]
    enrolled_subjects: IndexMap<String, Value>,
}

/// Accumulates the roster and warnings while walking the document.
#[derive(Default)]
struct Loader {
    /// What has been loaded so far.
    outcome: LoadOutcome,
}

impl Loader {
    /// Records and traces a warning.
    fn warn(&mut self, warning: LoadWarning) {
        tracing::warn!("{warning}");
        self.outcome.warnings.push(warning);
    }

    /// Loads one catalog template, keyed by its map key.
    fn template(&mut self, code: String, value: Value) {
        let entry = match serde_json::from_value::<TemplateEntry>(value) {
            Ok(entry) => entry,
            Err(e) => {
                return self.warn(LoadWarning::Template {
                    code,
                    reason: e.to_string(),
                });
            }
        };

        if entry.code != code {
            self.warn(LoadWarning::MismatchedCode {
                key:      code.clone(),
                recorded: entry.code,
            });
        }

        let result = CreditHours::resolve(entry.credit_hours)
            .and_then(|hours| Subject::new(entry.name, code.clone(), hours))
            .and_then(|subject| self.outcome.roster.add_template(subject));
        if let Err(e) = result {
            self.warn(LoadWarning::Template {
                code,
                reason: e.to_string(),
            });
        }
    }

    /// Loads one student and everything they own.
    fn student(&mut self, key: String, value: Value) {
        let entry = match serde_json::from_value::<StudentEntry>(value) {
            Ok(entry) => entry,
            Err(e) => {
                return self.warn(LoadWarning::Student {
                    student_id: key,
                    reason:     e.to_string(),
                });
            }
        };

        if let Some(recorded) = entry.student_id.as_ref().filter(|id| **id != key) {
            self.warn(LoadWarning::MismatchedId {
                key:      key.clone(),
                recorded: recorded.clone(),
            });
        }

        let kind = StudentKind::from_tag(entry.kind.as_deref().unwrap_or_default(), entry.major);
        let mut student = match Student::new(entry.name, key.clone(), kind) {
            Ok(student) => student,
            Err(e) => {
                return self.warn(LoadWarning::Student {
                    student_id: key,
                    reason:     e.to_string(),
                });
            }
        };

        for (code, value) in entry.enrolled_subjects {
            if let Err(reason) = self.subject(&mut student, &code, value) {
                self.warn(LoadWarning::Subject {
                    student_id: key.clone(),
                    code,
                    reason,
                });
            }
        }

        if let Err(e) = self.outcome.roster.add_student(student) {
            self.warn(LoadWarning::Student {
                student_id: key,
                reason:     e.to_string(),
            });
        }
    }

    /// Loads one enrollment into `student`; grade failures are warned about
    /// individually.
    fn subject(&mut self, student: &mut Student, code: &str, value: Value) -> Result<(), String> {
        let entry = serde_json::from_value::<SubjectEntry>(value).map_err(|e| e.to_string())?;
        let hours = CreditHours::resolve(entry.credit_hours).map_err(|e| e.to_string())?;
        let mut subject = Subject::new(entry.name, entry.code, hours).map_err(|e| e.to_string())?;

        for (index, value) in entry.grades.into_iter().enumerate() {
            let added = Self::parse_grade(value).and_then(|g| subject.add_grade(g).map_err(|e| e.to_string()));
            if let Err(reason) = added {
                self.warn(LoadWarning::Grade {
                    student_id: student.student_id().to_string(),
                    code: code.to_string(),
                    index,
                    reason,
                });
            }
        }

        student.enroll_subject(subject).map_err(|e| e.to_string())
    }

    /// Parses and validates one grade record.
    fn parse_grade(value: Value) -> Result<Grade, String> {
        let entry = serde_json::from_value::<GradeEntry>(value).map_err(|e| e.to_string())?;
        grade()
            .description(entry.description)
            .score(entry.score.value()?)
            .maybe_letter(entry.letter_grade)
            .build()
            .map_err(|e| e.to_string())
    }
}
