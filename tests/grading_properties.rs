use gradeforge::{
    Grade, GradeInput, Roster, Standing, StandingPolicy, Student, StudentKind, Subject,
    ValidationError,
};

fn subject_with(code: &str, credit_hours: u32, scores: &[f64]) -> Subject {
    let mut subject = Subject::new(format!("{code} name"), code, credit_hours).unwrap();
    for (i, score) in scores.iter().enumerate() {
        subject
            .add_grade(Grade::new(format!("Item {i}"), *score, None).unwrap())
            .unwrap();
    }
    subject
}

#[test]
fn grade_fields_survive_construction() {
    for (description, score) in [("Midterm", 0.0), ("Lab 3", 99.75), ("x", -1.5)] {
        let grade = Grade::new(description, score, None).unwrap();
        assert_eq!(grade.description(), description);
        assert_eq!(grade.score(), score);
        assert_eq!(grade.letter(), None);
    }
}

#[test]
fn case_only_duplicate_is_rejected() {
    let mut subject = Subject::new("Chemistry", "CHEM1", 0).unwrap();
    subject
        .add_grade(Grade::new("Lab Report", 70.0, None).unwrap())
        .unwrap();
    let err = subject
        .add_grade(Grade::new("lab report", 75.0, None).unwrap())
        .unwrap_err();
    assert!(matches!(err, ValidationError::DuplicateGrade(_)));
}

#[test]
fn subject_average_cases() {
    assert_eq!(subject_with("A", 0, &[]).average_grade(), 0.0);
    assert_eq!(subject_with("A", 0, &[70.0, 80.0, 90.0]).average_grade(), 80.0);
}

#[test]
fn high_school_overall_excludes_ungraded_subjects() {
    let mut student = Student::new("Bo", "H1", StudentKind::HighSchool).unwrap();
    student.enroll_subject(subject_with("A", 0, &[60.0, 80.0])).unwrap();
    student.enroll_subject(subject_with("B", 0, &[])).unwrap();
    student.enroll_subject(subject_with("C", 0, &[100.0])).unwrap();
    assert_eq!(student.overall_performance(), 85.0);
    assert_eq!(student.standing(&StandingPolicy::default()), Standing::Pass);
}

#[test]
fn exactly_at_threshold_passes() {
    let mut student = Student::new("Bo", "H1", StudentKind::HighSchool).unwrap();
    student.enroll_subject(subject_with("A", 0, &[40.0, 60.0])).unwrap();
    assert_eq!(student.overall_performance(), 50.0);
    assert_eq!(student.pass_fail_status(), "Pass");
}

#[test]
fn college_gpa_ignores_ungraded_credit_hours() {
    let mut roster = Roster::new();
    roster
        .add_student(Student::new("Ada", "C1", StudentKind::college("Maths")).unwrap())
        .unwrap();
    roster.add_template(Subject::new("X", "X", 0).unwrap()).unwrap();
    roster.add_template(Subject::new("Y", "Y", 0).unwrap()).unwrap();
    roster.enroll("C1", "X", Some(3)).unwrap();
    roster.enroll("C1", "Y", Some(4)).unwrap();
    roster
        .record_grade("C1", "X", "Exam 1", GradeInput::Letter("A".into()))
        .unwrap();
    roster
        .record_grade("C1", "X", "Exam 2", GradeInput::Letter("B".into()))
        .unwrap();

    let ada = roster.student("C1").unwrap();
    assert_eq!(ada.gpa(), 3.5);
    assert_eq!(ada.overall_performance(), 3.5);
    assert_eq!(ada.pass_fail_status(), "Good Standing");
}

#[test]
fn any_f_puts_college_student_at_risk() {
    let mut roster = Roster::new();
    roster
        .add_student(Student::new("Ada", "C1", StudentKind::college("Maths")).unwrap())
        .unwrap();
    roster.add_template(Subject::new("X", "X", 0).unwrap()).unwrap();
    roster.add_template(Subject::new("Y", "Y", 0).unwrap()).unwrap();
    roster.enroll("C1", "X", Some(12)).unwrap();
    roster.enroll("C1", "Y", Some(1)).unwrap();
    for exam in ["E1", "E2", "E3"] {
        roster
            .record_grade("C1", "X", exam, GradeInput::Letter("A+".into()))
            .unwrap();
    }
    roster
        .record_grade("C1", "Y", "Final", GradeInput::Letter("F".into()))
        .unwrap();

    let ada = roster.student("C1").unwrap();
    assert!(ada.gpa() > 3.5);
    for policy in [StandingPolicy::default(), StandingPolicy::new(0.0, 0.0)] {
        assert_eq!(ada.standing(&policy), Standing::AtRiskFailing);
    }
    assert_eq!(ada.pass_fail_status(), "At Risk (Failing one or more courses)");
}

#[test]
fn second_enrollment_of_same_code_fails() {
    let mut student = Student::new("Bo", "H1", StudentKind::Generic).unwrap();
    student.enroll_subject(subject_with("A", 2, &[55.0])).unwrap();
    let err = student
        .enroll_subject(subject_with("A", 9, &[1.0, 2.0]))
        .unwrap_err();
    assert_eq!(
        err,
        ValidationError::AlreadyEnrolled {
            name: "A name".into(),
            code: "A".into(),
        }
    );
    let kept = student.subject("A").unwrap();
    assert_eq!(kept.credit_hours(), 2);
    assert_eq!(kept.average_grade(), 55.0);
}

#[test]
fn template_edits_never_reach_enrollments() {
    let mut roster = Roster::new();
    roster
        .add_student(Student::new("Bo", "H1", StudentKind::HighSchool).unwrap())
        .unwrap();
    roster
        .ensure_template("BIO1", Some("Biology"))
        .unwrap();
    roster.enroll("H1", "BIO1", None).unwrap();
    roster
        .record_grade("H1", "BIO1", "Dissection", GradeInput::Mark(77.0))
        .unwrap();

    assert!(roster.template("BIO1").unwrap().grades().is_empty());
    assert_eq!(roster.student("H1").unwrap().subject_average("BIO1"), Some(77.0));
}

#[test]
fn deleting_students() {
    let mut roster = Roster::new();
    roster
        .add_student(Student::new("Bo", "H1", StudentKind::HighSchool).unwrap())
        .unwrap();
    assert_eq!(
        roster.remove_student("nobody"),
        Err(ValidationError::UnknownStudent("nobody".into()))
    );
    assert_eq!(roster.remove_student("H1").unwrap().name(), "Bo");
    assert!(roster.students().is_empty());
}

#[test]
fn grade_entry_is_validated_per_variant() {
    let mut roster = Roster::new();
    roster
        .add_student(Student::new("Bo", "H1", StudentKind::HighSchool).unwrap())
        .unwrap();
    roster
        .add_student(Student::new("Ada", "C1", StudentKind::college("")).unwrap())
        .unwrap();
    roster.add_template(Subject::new("X", "X", 3).unwrap()).unwrap();
    roster.enroll("H1", "X", None).unwrap();
    roster.enroll("C1", "X", Some(3)).unwrap();

    assert!(matches!(
        roster.record_grade("C1", "X", "q", GradeInput::Letter("E".into())),
        Err(ValidationError::InvalidLetter { .. })
    ));
    assert!(matches!(
        roster.record_grade("C1", "X", "q", GradeInput::Mark(3.0)),
        Err(ValidationError::MarkNotAccepted(_))
    ));
    assert_eq!(
        roster.record_grade("H1", "X", "q", GradeInput::Mark(101.0)),
        Err(ValidationError::MarkOutOfRange(101.0))
    );
    assert!(matches!(
        roster.record_grade("H1", "X", "q", GradeInput::Letter("A".into())),
        Err(ValidationError::LetterNotAccepted(_))
    ));
    assert_eq!(roster.student("C1").unwrap().major(), Some("Undeclared"));
}
