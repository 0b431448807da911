use std::collections::BTreeSet;
use std::io::Write;

use strata_split::{SplitError, SplitOptions, Value, load_and_split};
use tempfile::NamedTempFile;

fn csv_fixture(contents: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".csv")
        .tempfile()
        .unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

/// 10 rows: `id`, `x`, and a binary `label` with 6 × A and 4 × B.
fn ten_row_fixture() -> NamedTempFile {
    let mut text = String::from("id,x,label\n");
    for i in 0..10 {
        let label = if i < 6 { "A" } else { "B" };
        text.push_str(&format!("{i},{}.5,{label}\n", i * 2));
    }
    csv_fixture(&text)
}

/// `n` rows whose label is a pure function of `id`, so every row can be checked.
fn derived_label_fixture(n: usize) -> NamedTempFile {
    let mut text = String::from("id,feature,label\n");
    for i in 0..n {
        text.push_str(&format!("{i},{},{}\n", i as f64 / 10.0, label_for(i)));
    }
    csv_fixture(&text)
}

fn label_for(id: usize) -> &'static str {
    match id % 10 {
        0..=4 => "low",
        5..=7 => "mid",
        _ => "high",
    }
}

fn id_of(row: &[Value]) -> usize {
    match row[0] {
        Value::Integer(i) => i as usize,
        ref other => panic!("unexpected id cell {other:?}"),
    }
}

#[test]
fn ten_row_example_draws_one_test_row_per_class() {
    let file = ten_row_fixture();
    let (x_train, x_test, y_train, y_test) =
        load_and_split(file.path(), "label", &SplitOptions::default()).unwrap();

    assert_eq!(x_test.shape(), (2, 2));
    assert_eq!(x_train.shape(), (8, 2));
    assert_eq!(x_train.columns, vec!["id", "x"]);

    let test_counts = y_test.value_counts();
    assert_eq!(test_counts.get(&Value::String("A".into())), Some(&1));
    assert_eq!(test_counts.get(&Value::String("B".into())), Some(&1));

    let train_counts = y_train.value_counts();
    assert_eq!(train_counts.get(&Value::String("A".into())), Some(&5));
    assert_eq!(train_counts.get(&Value::String("B".into())), Some(&3));
}

#[test]
fn same_seed_gives_same_partition() {
    let file = ten_row_fixture();
    let options = SplitOptions::default();

    let (train_a, test_a, _, _) = load_and_split(file.path(), "label", &options).unwrap();
    let (train_b, test_b, _, _) = load_and_split(file.path(), "label", &options).unwrap();

    assert_eq!(test_a, test_b);
    assert_eq!(train_a, train_b);
}

#[test]
fn seed_changes_membership_but_not_sizes() {
    let file = derived_label_fixture(200);
    let mut test_sets = BTreeSet::new();

    for seed in 0..5 {
        let options = SplitOptions::default().with_random_state(seed);
        let (x_train, x_test, _, _) = load_and_split(file.path(), "label", &options).unwrap();
        assert_eq!(x_test.len(), 40);
        assert_eq!(x_train.len(), 160);

        let members: BTreeSet<usize> = x_test.index.iter().copied().collect();
        test_sets.insert(members);
    }

    assert!(test_sets.len() > 1);
}

#[test]
fn features_and_targets_stay_aligned() {
    let file = derived_label_fixture(137);
    let options = SplitOptions::default().with_test_size(0.3).with_random_state(11);
    let (x_train, x_test, y_train, y_test) = load_and_split(file.path(), "label", &options).unwrap();

    assert_eq!(x_train.len() + x_test.len(), 137);
    assert_eq!(x_train.len(), y_train.len());
    assert_eq!(x_test.len(), y_test.len());

    for (x, y) in [(&x_train, &y_train), (&x_test, &y_test)] {
        assert_eq!(x.index, y.index);
        for (row, label) in x.rows.iter().zip(&y.values) {
            let id = id_of(row);
            assert_eq!(*label, Value::String(label_for(id).into()));
        }
    }
}

#[test]
fn class_proportions_survive_the_split() {
    let file = derived_label_fixture(1000);
    let (_, x_test, y_train, y_test) =
        load_and_split(file.path(), "label", &SplitOptions::default()).unwrap();

    assert_eq!(x_test.len(), 200);

    // low 50%, mid 30%, high 20%
    let test_counts = y_test.value_counts();
    assert_eq!(test_counts[&Value::String("low".into())], 100);
    assert_eq!(test_counts[&Value::String("mid".into())], 60);
    assert_eq!(test_counts[&Value::String("high".into())], 40);

    let train_counts = y_train.value_counts();
    assert_eq!(train_counts[&Value::String("low".into())], 400);
    assert_eq!(train_counts[&Value::String("mid".into())], 240);
    assert_eq!(train_counts[&Value::String("high".into())], 160);
}

#[test]
fn missing_source_is_reported_with_its_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("wine_quality_preprocessed.csv");

    let err = load_and_split(&path, "quality", &SplitOptions::default()).unwrap_err();

    assert!(matches!(err, SplitError::SourceNotFound { .. }));
    assert!(err.to_string().contains("wine_quality_preprocessed.csv"));
}

#[test]
fn missing_target_column_is_named() {
    let file = ten_row_fixture();
    let err = load_and_split(file.path(), "quality", &SplitOptions::default()).unwrap_err();

    assert!(matches!(err, SplitError::MissingColumn(ref c) if c == "quality"));
    assert!(err.to_string().contains("quality"));
}

#[test]
fn singleton_class_cannot_be_stratified() {
    let file = csv_fixture("x,label\n1,a\n2,a\n3,a\n4,a\n5,a\n6,b\n");
    let err = load_and_split(file.path(), "label", &SplitOptions::default()).unwrap_err();

    assert!(matches!(err, SplitError::CannotStratify { count: 1, .. }));
}

#[test]
fn integer_and_float_spellings_are_one_class() {
    let file = csv_fixture("x,q\n1,5\n2,5.0\n3,6\n4,6.0\n5,5\n6,6\n");
    let options = SplitOptions::default().with_test_size(0.34);
    let (x_train, x_test, y_train, y_test) = load_and_split(file.path(), "q", &options).unwrap();

    assert_eq!(x_train.len(), 3);
    assert_eq!(x_test.len(), 3);
    for y in [&y_train, &y_test] {
        let counts = y.value_counts();
        assert_eq!(counts.len(), 2);
        assert!(counts.contains_key(&Value::Float(5.0)));
        assert!(counts.contains_key(&Value::Float(6.0)));
    }
}

#[test]
fn padded_header_does_not_match_target() {
    let file = csv_fixture("x, quality\n1,5\n2,5\n3,6\n4,6\n");
    let err = load_and_split(file.path(), "quality", &SplitOptions::default()).unwrap_err();

    assert!(matches!(err, SplitError::MissingColumn(ref c) if c == "quality"));
}

#[test]
fn malformed_source_surfaces_load_error() {
    let file = csv_fixture("x,label\n1,a\n2\n");
    let err = load_and_split(file.path(), "label", &SplitOptions::default()).unwrap_err();

    assert!(matches!(err, SplitError::Load(_)));
}
