use ordo::{
    ErrorKind,
    core::{
        config::{self, Config},
        obs::{metrics_report, metrics_reset_all},
    },
    prelude::*,
};
use proptest::prelude::*;

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
struct Employee {
    dept: String,
    name: String,
    salary: u32,
}

fn employee(dept: &str, name: &str, salary: u32) -> Employee {
    Employee {
        dept: dept.to_string(),
        name: name.to_string(),
        salary,
    }
}

fn staff() -> Vec<Employee> {
    vec![
        employee("ops", "kim", 70),
        employee("eng", "ada", 90),
        employee("ops", "lee", 70),
        employee("eng", "bob", 120),
        employee("eng", "cy", 90),
    ]
}

fn names(rows: &[Employee]) -> Vec<&str> {
    rows.iter().map(|row| row.name.as_str()).collect()
}

#[test]
fn typed_multi_key_order() {
    let ordered = enumerate(staff())
        .order_by(|e| e.dept.clone())
        .then_by_descending(|e| e.salary)
        .to_vec();

    assert_eq!(names(&ordered), vec!["bob", "ada", "cy", "kim", "lee"]);
}

#[test]
fn ordered_results_feed_containers() {
    let by_name = enumerate(staff())
        .filter(|e| e.salary >= 90)
        .to_dictionary(|e| e.name.clone(), |e| e.salary)
        .expect("names are unique");

    assert_eq!(by_name.len(), 3);
    assert_eq!(by_name.try_get(&"bob".to_string()), Ok(&120));

    let depts = enumerate(staff()).to_dictionary(|e| e.dept.clone(), |e| e.name);
    assert_eq!(depts.map_err(|err| err.kind), Err(ErrorKind::DuplicateKey));
}

#[test]
fn dynamic_rows_order_like_typed_rows() {
    let rows = dynamic_staff();
    let ordered = query(rows)
        .and_then(|q| {
            q.order_by_fields(&[
                ("dept", OrderDirection::Asc),
                ("salary", OrderDirection::Desc),
            ])
        })
        .expect("valid query");

    let names: Vec<Value> = ordered
        .iter()
        .map(|row| row.field("name").cloned().unwrap_or_default())
        .collect();

    assert_eq!(
        names,
        vec![
            Value::from("bob"),
            Value::from("ada"),
            Value::from("cy"),
            Value::from("kim"),
            Value::from("lee"),
        ]
    );
}

fn dynamic_staff() -> Value {
    Value::list(staff().into_iter().map(|e| {
        Value::map([
            ("dept", Value::from(e.dept)),
            ("name", Value::from(e.name)),
            ("salary", Value::from(u64::from(e.salary))),
        ])
    }))
}

#[test]
fn scalar_query_source_is_rejected() {
    let err = query(Value::Float(1.0)).expect_err("scalar source");

    assert_eq!(err.kind, ErrorKind::InvalidType);
    assert!(err.is_argument_error());
}

#[test]
fn metrics_follow_config() {
    metrics_reset_all();
    let ordered = enumerate(staff()).order_by(|e| e.dept.clone());

    let _ = ordered.to_vec();
    let enabled = metrics_report();

    let quiet = Config {
        metrics: false,
        ..Config::default()
    };
    config::with_config(quiet, || {
        let _ = ordered.to_vec();
    });
    let after = metrics_report();

    assert_eq!(enabled.ordered_iterations, 1);
    assert_eq!(enabled.partitions_emitted, 2);
    assert_eq!(after, enabled);
}

#[test]
fn config_loads_from_toml() {
    let config = Config::from_toml_str("metrics = false\ntext_mode = \"ci\"").expect("valid toml");

    assert!(!config.metrics);
    assert_eq!(config.text_mode, ordo::core::config::TextMode::Ci);
    assert!(!ordo::VERSION.is_empty());
}

proptest! {
    #[test]
    fn list_order_by_matches_stable_sort(values in prop::collection::vec(0_u16..50, 0..40)) {
        let list: List<u16> = values.iter().copied().collect();

        let ordered = list.order_by(|n| n / 10).to_vec();

        let mut expected = values;
        expected.sort_by_key(|n| n / 10);
        prop_assert_eq!(ordered, expected);
    }
}
