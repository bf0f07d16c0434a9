//! Building scrapers from definitions.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use json_exporter_core::{JsonScraper, MetricKind};

use recording_sink::metric;

#[test]
fn bad_target_path_is_rejected() {
    let err = JsonScraper::build(&metric("name: bad\npath: \"$.[\"\n")).expect_err("must fail");
    assert_eq!(err.code().as_str(), "PATH_SYNTAX");
    assert!(err.to_string().contains("$.["));
}

#[test]
fn bad_label_or_value_path_is_rejected() {
    let bad_label = r#"
name: obj
type: object
path: $.items[*]
labels:
  id: "$$id"
values:
  a: $.a
"#;
    let bad_value = r#"
name: obj
type: object
path: $.items[*]
values:
  a: "$.a["
"#;
    for yaml in [bad_label, bad_value] {
        let err = JsonScraper::build(&metric(yaml)).expect_err("must fail");
        assert_eq!(err.code().as_str(), "PATH_SYNTAX");
    }
}

#[test]
fn value_metric_label_paths_are_compiled() {
    let yaml = r#"
name: v
path: $.counter
labels:
  id: "$.["
"#;
    assert!(JsonScraper::build(&metric(yaml)).is_err());
}

#[test]
fn one_bad_definition_does_not_affect_others() {
    let defs = [
        metric("name: good\npath: $.counter\n"),
        metric("name: bad\npath: \"$[\"\n"),
        metric("name: also_good\npath: $.ratio\n"),
    ];

    let built: Vec<_> = defs.iter().map(JsonScraper::build).collect();
    assert!(built[0].is_ok());
    assert!(built[1].is_err());
    assert!(built[2].is_ok());
}

#[test]
fn series_lists_composite_names() {
    let scraper = JsonScraper::build(&metric(
        r#"
name: example_value
type: object
help: per-instance values
path: $.values[*]
values:
  count: $.count
  active: 1
"#,
    ))
    .unwrap();

    assert_eq!(scraper.kind(), MetricKind::Object);
    assert_eq!(scraper.name(), "example_value");
    assert_eq!(
        scraper.series(),
        vec![
            ("example_value_active".to_string(), "per-instance values".to_string()),
            ("example_value_count".to_string(), "per-instance values".to_string()),
        ]
    );
}

#[test]
fn help_defaults_to_name() {
    let scraper = JsonScraper::build(&metric("name: counter\npath: $.counter\n")).unwrap();
    assert_eq!(scraper.kind(), MetricKind::Value);
    assert_eq!(
        scraper.series(),
        vec![("counter".to_string(), "counter".to_string())]
    );
}

#[test]
fn unknown_definition_fields_are_rejected() {
    let res: Result<json_exporter_core::MetricConfig, _> =
        serde_yaml::from_str("name: x\npath: $.x\nlables: {}\n");
    assert!(res.is_err());
}
