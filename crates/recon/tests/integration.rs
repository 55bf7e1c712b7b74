use dbcompare_recon::model::{Field, KeyKind, RawRow, RawValue};
use dbcompare_recon::{run, RunLabels};

fn labels() -> RunLabels {
    RunLabels {
        name: "person".into(),
        left: "DB1".into(),
        right: "DB2".into(),
    }
}

fn person(id: &str, first: &str, last: &str, age: &str, salary: &str, email: &str, city: &str) -> RawRow {
    RawRow::new()
        .with("ID", id)
        .with("FIRST_NAME", first)
        .with("LAST_NAME", last)
        .with("AGE", age)
        .with("SALARY", salary)
        .with("EMAIL", email)
        .with("CITY", city)
}

// -------------------------------------------------------------------------
// Worked examples
// -------------------------------------------------------------------------

#[test]
fn age_change_is_the_only_difference() {
    let left = vec![person("1", "Jo", "Doe", "30", "1000", "a@x.com", "NY")];
    let right = vec![person("1", "Jo", "Doe", "31", "1000", "a@x.com", "NY")];
    let result = run(&labels(), &left, &right).unwrap();

    let rec = &result.reconciliation;
    assert_eq!(rec.differing.len(), 1);
    assert_eq!(rec.differing[0].diff.iter().collect::<Vec<_>>(), vec![Field::Age]);
    assert_eq!(rec.differing[0].diff.to_string(), "age");
    assert!(rec.identical.is_empty());
    assert!(rec.unmatched_left.is_empty());
    assert!(rec.unmatched_right.is_empty());
}

#[test]
fn left_only_record() {
    let left = vec![person("9", "Zoe", "Zed", "20", "0", "z@z.com", "Rome")];
    let result = run(&labels(), &left, &[]).unwrap();
    let rec = &result.reconciliation;
    assert_eq!(rec.unmatched_left.len(), 1);
    assert_eq!(rec.unmatched_left[0].email.display, "z@z.com");
    assert!(rec.differing.is_empty());
    assert!(rec.identical.is_empty());
    assert!(rec.unmatched_right.is_empty());
}

#[test]
fn email_match_preferred_over_name_match() {
    let left = vec![person("1", "John", "Doe", "40", "10", "a@x.com", "NY")];
    let right = vec![
        person("2", "John", "Doe", "40", "10", "john@elsewhere.com", "NY"), // name only
        person("3", "Johnny", "D", "40", "10", "a@x.com", "NY"),           // email only
    ];
    let result = run(&labels(), &left, &right).unwrap();
    let rec = &result.reconciliation;

    assert_eq!(rec.differing.len(), 1);
    let pair = &rec.differing[0];
    assert_eq!(pair.right.id.display, "3");
    assert_eq!(pair.matched_by, KeyKind::Email);
    assert!(pair.diff.contains(Field::FirstName));
    assert!(pair.diff.contains(Field::LastName));
    assert!(pair.diff.contains(Field::Id));
    assert_eq!(rec.unmatched_right.len(), 1);
    assert_eq!(rec.unmatched_right[0].id.display, "2");
}

#[test]
fn blank_emails_never_pair_up() {
    let left = vec![RawRow::new().with("email", "").with("id", "1")];
    let right = vec![RawRow::new().with("email", "").with("id", "2")];
    let result = run(&labels(), &left, &right).unwrap();
    let rec = &result.reconciliation;
    assert_eq!(rec.unmatched_left.len(), 1);
    assert_eq!(rec.unmatched_right.len(), 1);
    assert!(rec.identical.is_empty());
    assert!(rec.differing.is_empty());
}

#[test]
fn identical_across_case_and_typed_values() {
    let left = vec![person("7", "ANA", "Ruiz", "33", "5000", "Ana@Mail.com", "Lima")];
    let right = vec![RawRow::new()
        .with("id", 7i64)
        .with("first_name", "ana")
        .with("last_name", "RUIZ")
        .with("age", 33i64)
        .with("salary", RawValue::Int(5000))
        .with("email", "ana@mail.com")
        .with("city", "LIMA")];
    let result = run(&labels(), &left, &right).unwrap();
    let rec = &result.reconciliation;
    assert_eq!(rec.identical.len(), 1);
    assert!(rec.is_clean());
    // Display forms keep the source casing.
    assert_eq!(rec.identical[0].left.first_name.display, "ANA");
    assert_eq!(rec.identical[0].right.first_name.display, "ana");
}

#[test]
fn integer_and_float_salaries_differ() {
    let left = vec![person("1", "A", "B", "30", "1000", "a@x.com", "NY")];
    let right = vec![RawRow::new()
        .with("id", "1")
        .with("first_name", "A")
        .with("last_name", "B")
        .with("age", "30")
        .with("salary", 1000.0f64)
        .with("email", "a@x.com")
        .with("city", "NY")];
    let result = run(&labels(), &left, &right).unwrap();
    let rec = &result.reconciliation;
    assert_eq!(rec.differing.len(), 1);
    assert_eq!(rec.differing[0].diff.iter().collect::<Vec<_>>(), vec![Field::Salary]);
    assert_eq!(rec.differing[0].right.salary.text, "1000.0");
}

#[test]
fn unparseable_numbers_compare_as_zero() {
    let left = vec![person("1", "A", "B", "n/a", "1000", "a@x.com", "NY")];
    let right = vec![person("1", "A", "B", "0", "1000", "a@x.com", "NY")];
    let result = run(&labels(), &left, &right).unwrap();
    assert_eq!(result.reconciliation.identical.len(), 1);
    assert_eq!(result.summary.left_numeric_fallbacks, 1);
    assert_eq!(result.summary.right_numeric_fallbacks, 0);
}

// -------------------------------------------------------------------------
// Mixed scenario
// -------------------------------------------------------------------------

#[test]
fn mixed_batch_partitions_every_record() {
    let left = vec![
        person("1", "Ann", "Lee", "30", "100", "ann@x.com", "NY"),   // identical
        person("2", "Bob", "Kim", "41", "200", "bob@x.com", "LA"),   // differs in age
        person("3", "Cy", "Orr", "50", "300", "", "SF"),             // matches by name
        person("4", "Di", "Pan", "60", "400", "", "TX"),             // matches by id
        person("5", "Ed", "Ng", "70", "500", "ed@x.com", "WA"),      // left only
    ];
    let right = vec![
        person("10", "Zed", "Q", "1", "1", "zed@x.com", "ZZ"),       // right only
        person("4", "Dee", "Pann", "60", "400", "", "TX"),
        person("3", "Cy", "Orr", "50", "300", "cy@x.com", "SF"),
        person("2", "Bob", "Kim", "40", "200", "bob@x.com", "LA"),
        person("1", "Ann", "Lee", "30", "100", "ANN@X.COM", "ny"),
    ];

    let result = run(&labels(), &left, &right).unwrap();
    let rec = &result.reconciliation;
    let s = &result.summary;

    assert_eq!(s.left_records, 5);
    assert_eq!(s.right_records, 5);
    assert_eq!(s.identical, 1);
    assert_eq!(s.differing, 3);
    assert_eq!(s.unmatched_left, 1);
    assert_eq!(s.unmatched_right, 1);
    assert_eq!(s.matched_by.get(&KeyKind::Email), Some(&2));
    assert_eq!(s.matched_by.get(&KeyKind::Name), Some(&1));
    assert_eq!(s.matched_by.get(&KeyKind::Id), Some(&1));

    // Differing pairs follow left order.
    let ids: Vec<&str> = rec.differing.iter().map(|p| p.left.id.display.as_str()).collect();
    assert_eq!(ids, vec!["2", "3", "4"]);
    assert_eq!(rec.differing[1].diff.iter().collect::<Vec<_>>(), vec![Field::Email]);
    assert_eq!(
        rec.differing[2].diff.iter().collect::<Vec<_>>(),
        vec![Field::FirstName, Field::LastName]
    );
    assert_eq!(rec.unmatched_left[0].id.display, "5");
    assert_eq!(rec.unmatched_right[0].id.display, "10");
}

#[test]
fn result_serializes_to_json() {
    let left = vec![person("1", "Jo", "Doe", "30", "1000", "a@x.com", "NY")];
    let right = vec![person("1", "Jo", "Doe", "31", "1000", "a@x.com", "NY")];
    let result = run(&labels(), &left, &right).unwrap();
    let json = serde_json::to_value(&result).unwrap();

    assert_eq!(json["meta"]["left_label"], "DB1");
    assert_eq!(json["summary"]["differing"], 1);
    assert_eq!(json["summary"]["matched_by"]["email"], 1);
    assert_eq!(json["summary"]["field_diffs"]["age"], 1);
    assert_eq!(json["reconciliation"]["differing"][0]["diff"], serde_json::json!(["age"]));
    assert_eq!(json["reconciliation"]["differing"][0]["matched_by"], "email");
    assert_eq!(json["reconciliation"]["differing"][0]["right"]["age"]["text"], "31");
}
