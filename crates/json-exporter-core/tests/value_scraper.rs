//! Scalar (value) metric tests.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use json_exporter_core::JsonScraper;

use recording_sink::{labels, load, metric, RecordingSink};

fn scrape(yaml: &str, doc: &[u8]) -> RecordingSink {
    let scraper = JsonScraper::build(&metric(yaml)).unwrap();
    let sink = RecordingSink::new();
    scraper.scrape(doc, &sink).unwrap();
    sink
}

#[test]
fn number_match_carries_static_labels() {
    let sink = scrape(
        r#"
name: example_global_value
path: $.counter
labels:
  environment: beta
"#,
        &load("example.json"),
    );

    let obs = sink.observations();
    assert_eq!(obs.len(), 1);
    assert_eq!(obs[0].name, "example_global_value");
    assert_eq!(obs[0].labels, labels(&[("environment", "beta")]));
    assert_eq!(obs[0].value, 1234.0);
}

#[test]
fn numeric_string_coerces_like_number() {
    let cfg = "name: ratio\npath: $.ratio\n";
    let from_string = scrape(cfg, br#"{"ratio": "3.5"}"#);
    let from_number = scrape(cfg, br#"{"ratio": 3.5}"#);

    assert_eq!(from_string.observations()[0].value, 3.5);
    assert_eq!(
        from_string.observations()[0].value,
        from_number.observations()[0].value
    );
}

#[test]
fn null_yields_nan_observation() {
    let sink = scrape("name: missing\npath: $.missing_value\n", &load("example.json"));

    let obs = sink.observations();
    assert_eq!(obs.len(), 1, "null is an observation, not a skip");
    assert!(obs[0].value.is_nan());
}

#[test]
fn zero_matches_is_silent() {
    let scraper = JsonScraper::build(&metric("name: absent\npath: $.not_there\n")).unwrap();
    let sink = RecordingSink::new();

    scraper.scrape(&load("example.json"), &sink).expect("absent is not an error");
    assert!(sink.observations().is_empty());
}

#[test]
fn first_match_wins() {
    let sink = scrape("name: first_count\npath: $.values[*].count\n", &load("example.json"));

    let obs = sink.observations();
    assert_eq!(obs.len(), 1);
    assert_eq!(obs[0].value, 1.0);
}

#[test]
fn non_scalar_results_are_skipped() {
    let doc = load("example.json");
    for path in ["$.nested", "$.values", "$.flag", "$.location", "$.empty"] {
        let sink = scrape(&format!("name: skipped\npath: \"{path}\"\n"), &doc);
        assert!(sink.observations().is_empty(), "path={path}");
    }
}

#[test]
fn dynamic_labels_are_ignored() {
    let sink = scrape(
        r#"
name: counter
path: $.counter
labels:
  environment: beta
  where: $.location
"#,
        &load("example.json"),
    );

    assert_eq!(sink.observations()[0].labels, labels(&[("environment", "beta")]));
}

#[test]
fn malformed_document_is_an_error() {
    let scraper = JsonScraper::build(&metric("name: counter\npath: $.counter\n")).unwrap();
    let sink = RecordingSink::new();

    let err = scraper.scrape(b"{\"counter\": ", &sink).expect_err("must fail");
    assert_eq!(err.code().as_str(), "INVALID_DOCUMENT");
    assert!(sink.observations().is_empty());
}

#[test]
fn scraping_twice_is_idempotent() {
    let scraper = JsonScraper::build(&metric("name: counter\npath: $.counter\n")).unwrap();
    let doc = load("example.json");

    let a = RecordingSink::new();
    let b = RecordingSink::new();
    scraper.scrape(&doc, &a).unwrap();
    scraper.scrape(&doc, &b).unwrap();

    let (a, b) = (a.observations(), b.observations());
    assert_eq!(a.len(), b.len());
    for (x, y) in a.iter().zip(b.iter()) {
        assert_eq!(x.name, y.name);
        assert_eq!(x.labels, y.labels);
        assert_eq!(x.value, y.value);
    }
}

#[test]
fn first_match_follows_document_order() {
    let sink = scrape("name: first_member\npath: $.*\n", br#"{"b": 1, "a": 2}"#);

    let obs = sink.observations();
    assert_eq!(obs.len(), 1);
    assert_eq!(obs[0].value, 1.0, "first member in the document wins");
}

#[test]
fn out_of_range_number_only_drops_its_own_field() {
    let doc = br#"{"counter": 1, "other": 1e400}"#;

    let counter = scrape("name: counter\npath: $.counter\n", doc);
    assert_eq!(counter.observations().len(), 1);
    assert_eq!(counter.observations()[0].value, 1.0);

    let other = scrape("name: other\npath: $.other\n", doc);
    assert!(other.observations().is_empty());
}

#[test]
fn out_of_range_numeric_string_is_skipped() {
    let sink = scrape("name: big\npath: $.big\n", br#"{"big": "1e400"}"#);
    assert!(sink.observations().is_empty());
}
