#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

//! # gradeforge
//! ## Introduction
//!
//! A student records manager for the command line. Every command loads the
//! roster from the data file, does one thing, and saves the roster back if it
//! changed.
//!
//! The data file defaults to `gradeforge_data.json` in the working directory;
//! set `GRADEFORGE_DATA_FILE` (a `.env` file works too) or pass `--data` to
//! use another one.

use std::path::{Path, PathBuf};

use anyhow::Result;
use bpaf::*;
use colored::Colorize;
use dotenvy::dotenv;
use gradeforge::{
    Config, GradeInput, Roster, StandingPolicy, Store, Student, StudentKind, Subject,
    ValidationError, constants::TEMPLATE_CREDIT_HOURS, export, report,
};
use tracing::{Level, metadata::LevelFilter};
use tracing_subscriber::{fmt, prelude::*, util::SubscriberInitExt};

/// Which variant a new student is created as.
#[derive(Debug, Clone, Copy)]
enum KindArg {
    /// Generic student, numeric marks.
    Generic,
    /// High-school student, numeric marks.
    HighSchool,
    /// College student, letter grades.
    College,
}

/// Student subcommands.
#[derive(Debug, Clone)]
enum StudentCmd {
    /// Add a student
    Add {
        /// Student name
        name:  String,
        /// Student identifier
        id:    String,
        /// Variant
        kind:  KindArg,
        /// Major, college students only
        major: Option<String>,
    },
    /// List all students
    List,
    /// Delete a student
    Delete(String),
}

/// Catalog subcommands.
#[derive(Debug, Clone)]
enum SubjectCmd {
    /// Add a template
    Add {
        /// Subject code
        code:    String,
        /// Subject name
        name:    String,
        /// Template credit hours
        credits: Option<u32>,
    },
    /// List all templates
    List,
}

/// Top-level CLI commands.
#[derive(Debug, Clone)]
enum Cmd {
    /// Student operations
    Student(StudentCmd),
    /// Catalog operations
    Subject(SubjectCmd),
    /// Enroll a student in a subject
    Enroll {
        /// Student identifier
        student: String,
        /// Subject code
        code:    String,
        /// Name for a template created on the fly
        name:    Option<String>,
        /// Credit hours for college students
        credits: Option<u32>,
    },
    /// Record a grade
    Grade {
        /// Student identifier
        student:     String,
        /// Subject code
        code:        String,
        /// Grade description
        description: String,
        /// Mark or letter
        input:       GradeInput,
    },
    /// Print a performance summary
    Summary(String),
    /// Print a full report
    Report(String),
    /// Export everything to CSV
    Export(Option<String>),
}

/// Parsed command line.
#[derive(Debug, Clone)]
struct Opts {
    /// Data file override
    data:    Option<PathBuf>,
    /// Enable debug logging
    verbose: bool,
    /// Command to run
    cmd:     Cmd,
}

/// parses a student identifier given with `--student`
fn student_flag() -> impl Parser<String> {
    long("student")
        .short('s')
        .help("Student ID")
        .argument::<String>("ID")
        .map(|s| s.trim().to_string())
}

/// parses a subject code given with `--code`, upper-cased
fn code_flag() -> impl Parser<String> {
    long("code")
        .short('c')
        .help("Subject code, e.g. MATH101")
        .argument::<String>("CODE")
        .map(|c| c.trim().to_uppercase())
}

/// parses optional non-negative credit hours
fn credits_flag() -> impl Parser<Option<u32>> {
    long("credits")
        .help("Credit hours (whole number, 0 or more)")
        .argument::<i64>("HOURS")
        .parse(|h| u32::try_from(h).map_err(|_| ValidationError::NegativeCreditHours(h.to_string())))
        .optional()
}

/// parses a student ID given positionally
fn id_positional() -> impl Parser<String> {
    positional::<String>("ID").help("Student ID")
}

/// rejects a major given to a student that is not a college student
fn major_needs_college(cmd: &StudentCmd) -> bool {
    !matches!(
        cmd,
        StudentCmd::Add {
            kind: KindArg::Generic | KindArg::HighSchool,
            major: Some(_),
            ..
        }
    )
}

/// `student ...` subcommands
fn student_cmd() -> impl Parser<Cmd> {
    let name = long("name").help("Student name").argument::<String>("NAME");
    let id = long("id").help("Student ID").argument::<String>("ID");
    let high_school = long("high-school")
        .help("Create a high-school student (marks 0-100)")
        .req_flag(KindArg::HighSchool);
    let college = long("college")
        .help("Create a college student (letter grades, GPA)")
        .req_flag(KindArg::College);
    let kind = construct!([high_school, college]).fallback(KindArg::Generic);
    let major = long("major")
        .help("College student's major")
        .argument::<String>("MAJOR")
        .optional();
    let add = construct!(StudentCmd::Add {
        name,
        id,
        kind,
        major
    })
    .guard(major_needs_college, "--major can only be used with --college")
    .to_options()
    .command("add")
    .help("Add a new student");

    let list = pure(StudentCmd::List)
        .to_options()
        .command("list")
        .help("List all students");

    let delete = construct!(StudentCmd::Delete(id_positional()))
        .to_options()
        .command("delete")
        .help("Delete a student and all their grades");

    construct!([add, list, delete])
        .to_options()
        .command("student")
        .help("Student commands")
        .map(Cmd::Student)
}

/// `subject ...` subcommands
fn subject_cmd() -> impl Parser<Cmd> {
    let code = code_flag();
    let name = long("name").help("Subject name").argument::<String>("NAME");
    let credits = credits_flag();
    let add = construct!(SubjectCmd::Add {
        code,
        name,
        credits
    })
    .to_options()
    .command("add")
    .help("Add a subject template to the catalog");

    let list = pure(SubjectCmd::List)
        .to_options()
        .command("list")
        .help("List subject templates");

    construct!([add, list])
        .to_options()
        .command("subject")
        .help("Subject catalog commands")
        .map(Cmd::Subject)
}

/// `enroll` command
fn enroll_cmd() -> impl Parser<Cmd> {
    let student = student_flag();
    let code = code_flag();
    let name = long("name")
        .help("Create the template with this name if the code is new")
        .argument::<String>("NAME")
        .optional();
    let credits = credits_flag();

    construct!(Cmd::Enroll {
        student,
        code,
        name,
        credits
    })
    .to_options()
    .command("enroll")
    .help("Enroll a student in a subject")
}

/// `grade` command
fn grade_cmd() -> impl Parser<Cmd> {
    let student = student_flag();
    let code = code_flag();
    let description = long("description")
        .short('d')
        .help("What was graded, e.g. Midterm")
        .argument::<String>("TEXT")
        .map(|d| d.trim().to_string());
    let mark = long("mark")
        .help("Numeric mark 0-100 (high-school and generic students)")
        .argument::<f64>("MARK")
        .map(GradeInput::Mark);
    let letter = long("letter")
        .help("Letter grade A+..F (college students)")
        .argument::<String>("LETTER")
        .map(|l| GradeInput::Letter(l.trim().to_uppercase()));
    let input = construct!([mark, letter]);

    construct!(Cmd::Grade {
        student,
        code,
        description,
        input
    })
    .to_options()
    .command("grade")
    .help("Record a grade")
}

/// Parse the command line arguments and return the options
fn options() -> Opts {
    parser().run()
}

/// Builds the full command line parser
fn parser() -> OptionParser<Opts> {
    let summary = construct!(Cmd::Summary(id_positional()))
        .to_options()
        .command("summary")
        .help("Print a performance summary");

    let report = construct!(Cmd::Report(id_positional()))
        .to_options()
        .command("report")
        .help("Print a full student report");

    let file = positional::<String>("FILE")
        .help("CSV file name (default gradeforge_export.csv)")
        .optional();
    let export = construct!(Cmd::Export(file))
        .to_options()
        .command("export")
        .help("Export all data to CSV");

    let student = student_cmd();
    let subject = subject_cmd();
    let enroll = enroll_cmd();
    let grade = grade_cmd();
    let cmd = construct!([student, subject, enroll, grade, summary, report, export]);

    let data = long("data")
        .help("Path to the JSON data file")
        .argument::<PathBuf>("PATH")
        .optional();
    let verbose = short('v').long("verbose").help("Enable debug logging").switch();

    construct!(Opts { data, verbose, cmd })
        .to_options()
        .descr("Student grade management")
}

/// Runs one command against the roster; returns true when it changed.
fn run(cmd: Cmd, roster: &mut Roster, policy: &StandingPolicy) -> Result<bool> {
    match cmd {
        Cmd::Student(StudentCmd::Add {
            name,
            id,
            kind,
            major,
        }) => {
            let kind = match kind {
                KindArg::Generic => StudentKind::Generic,
                KindArg::HighSchool => StudentKind::HighSchool,
                KindArg::College => StudentKind::college(major.unwrap_or_default()),
            };
            let student = Student::new(name.trim(), id.trim(), kind)?;
            let line = format!(
                "Student {} ({}) added successfully as {}.",
                student.name(),
                student.student_id(),
                student.type_tag()
            );
            roster.add_student(student)?;
            println!("{}", line.green());
            Ok(true)
        }
        Cmd::Student(StudentCmd::List) => {
            println!("{}", report::student_table(roster, policy));
            Ok(false)
        }
        Cmd::Student(StudentCmd::Delete(id)) => {
            let removed = roster.remove_student(id.trim())?;
            println!(
                "{}",
                format!(
                    "Student {} (ID: {}) has been deleted.",
                    removed.name(),
                    removed.student_id()
                )
                .green()
            );
            Ok(true)
        }
        Cmd::Subject(SubjectCmd::Add {
            code,
            name,
            credits,
        }) => {
            let subject =
                Subject::new(name.trim(), code, credits.unwrap_or(TEMPLATE_CREDIT_HOURS))?;
            let line = format!("Subject template {} ({}) created.", subject.name(), subject.code());
            roster.add_template(subject)?;
            println!("{}", line.green());
            Ok(true)
        }
        Cmd::Subject(SubjectCmd::List) => {
            println!("{}", report::catalog_table(roster));
            Ok(false)
        }
        Cmd::Enroll {
            student,
            code,
            name,
            credits,
        } => {
            if roster.try_student(&student)?.is_college() && credits.is_none() {
                return Err(ValidationError::MissingCreditHours(code).into());
            }
            roster.ensure_template(&code, name.as_deref().map(str::trim))?;
            let subject = roster.enroll(&student, &code, credits)?;
            println!(
                "{}",
                format!(
                    "Subject {} ({} credits) assigned to {student}.",
                    subject.name(),
                    subject.credit_hours()
                )
                .green()
            );
            Ok(true)
        }
        Cmd::Grade {
            student,
            code,
            description,
            input,
        } => {
            roster.record_grade(&student, &code, &description, input)?;
            let recorded = roster
                .try_student(&student)?
                .subject(&code)
                .and_then(|subject| subject.grades().last())
                .map(ToString::to_string)
                .unwrap_or(description);
            println!("{}", format!("Grade '{recorded}' added to {code}.").green());
            Ok(true)
        }
        Cmd::Summary(id) => {
            let student = roster.try_student(id.trim())?;
            println!("{}", report::performance_summary(student, policy));
            Ok(false)
        }
        Cmd::Report(id) => {
            let student = roster.try_student(id.trim())?;
            println!("{}", report::generate_report(student, policy));
            Ok(false)
        }
        Cmd::Export(file) => {
            if roster.students().is_empty() {
                println!("No student data to export.");
                return Ok(false);
            }
            let file = export::export_file_name(file.as_deref());
            let rows = export::export_csv(roster, policy, Path::new(&file))?;
            println!("{}", format!("Exported {rows} rows to {file}").green());
            Ok(false)
        }
    }
}

fn main() -> Result<()> {
    dotenv().ok();

    let opts = options();

    let fmt = fmt::layer()
        .without_time()
        .with_file(false)
        .with_line_number(false);
    let level = if opts.verbose { Level::DEBUG } else { Level::INFO };
    let filter_layer = LevelFilter::from_level(level);
    tracing_subscriber::registry()
        .with(fmt)
        .with(filter_layer)
        .init();

    let mut config = Config::from_env();
    if let Some(path) = opts.data {
        config = config.with_data_file(path);
    }
    let policy = config.policy();
    let store = Store::from_config(&config);

    let mut roster = store.load().roster;

    if run(opts.cmd, &mut roster, &policy)? {
        store.save(&roster)?;
    }

    Ok(())
}
