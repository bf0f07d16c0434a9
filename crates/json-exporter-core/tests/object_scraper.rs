//! Structured (object) metric tests.

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
fn one_observation_per_instance() {
    let sink = scrape(
        r#"
name: item
type: object
path: $[*]
labels:
  id: $.id
values:
  a: $.a
"#,
        &load("instances.json"),
    );

    let obs = sink.by_name("item_a");
    assert_eq!(obs.len(), 2);
    assert_eq!(obs[0].labels, labels(&[("id", "x")]));
    assert_eq!(obs[0].value, 1.0);
    assert_eq!(obs[1].labels, labels(&[("id", "y")]));
    assert_eq!(obs[1].value, 2.0);
}

#[test]
fn static_and_dynamic_fields_mix() {
    let sink = scrape(
        r#"
name: example_value
type: object
path: $.values[*]
labels:
  environment: beta
  id: $.id
values:
  active: 1
  count: $.count
"#,
        &load("example.json"),
    );

    let active = sink.by_name("example_value_active");
    let count = sink.by_name("example_value_count");
    assert_eq!(active.len(), 3);
    assert_eq!(count.len(), 3);
    assert!(active.iter().all(|o| o.value == 1.0));

    let ids: Vec<_> = count.iter().map(|o| o.labels["id"].clone()).collect();
    assert_eq!(ids, ["id-A", "id-B", "id-C"]);
    assert_eq!(count[2].labels, labels(&[("environment", "beta"), ("id", "id-C")]));
    assert_eq!(count[2].value, 3.0);
}

#[test]
fn filter_selects_instances() {
    let sink = scrape(
        r#"
name: active
type: object
path: "$.values[?@.state == 'ACTIVE']"
labels:
  id: $.id
values:
  count: $.count
"#,
        &load("example.json"),
    );

    let obs = sink.by_name("active_count");
    let ids = obs
        .iter()
        .map(|o| o.labels["id"].as_str())
        .collect::<Vec<_>>()
        .join(",");
    assert_eq!(ids, "id-A,id-C");
}

#[test]
fn failures_stay_local_to_instance() {
    let sink = scrape(
        r#"
name: item
type: object
path: $.items[*]
labels:
  id: $.id
values:
  a: $.a
"#,
        &load("partial.json"),
    );

    let obs = sink.by_name("item_a");
    // x: ok; y: missing value; 5: not structural; "7.5": ok without id;
    // z: structural value; w: null
    assert_eq!(obs.len(), 3);

    assert_eq!(obs[0].labels, labels(&[("id", "x")]));
    assert_eq!(obs[0].value, 1.0);

    assert!(obs[1].labels.is_empty(), "partial label sets are kept");
    assert_eq!(obs[1].value, 7.5);

    assert_eq!(obs[2].labels, labels(&[("id", "w")]));
    assert!(obs[2].value.is_nan());
}

#[test]
fn bad_static_value_skips_only_itself() {
    let sink = scrape(
        r#"
name: item
type: object
path: $[*]
values:
  bogus: not-a-number
  a: $.a
"#,
        &load("instances.json"),
    );

    assert!(sink.by_name("item_bogus").is_empty());
    assert_eq!(sink.by_name("item_a").len(), 2);
}

#[test]
fn array_instances_and_non_string_labels() {
    let sink = scrape(
        r#"
name: row
type: object
path: $.rows[*]
labels:
  name: $[1]
  pos: $[0]
values:
  v: $[0]
"#,
        &load("partial.json"),
    );

    let obs = sink.by_name("row_v");
    assert_eq!(obs.len(), 2);
    assert_eq!(obs[0].labels, labels(&[("name", "first"), ("pos", "10")]));
    assert_eq!(obs[1].value, 20.0);
}

#[test]
fn no_instances_no_observations() {
    let sink = scrape(
        r#"
name: item
type: object
path: $.nothing[*]
values:
  a: $.a
"#,
        &load("partial.json"),
    );
    assert!(sink.observations().is_empty());
}

#[test]
fn numeric_labels_keep_document_text() {
    let sink = scrape(
        r#"
name: item
type: object
path: $[*]
labels:
  v: $.v
values:
  n: $.n
"#,
        br#"[{"v": 1.50, "n": 1}, {"v": 1e2, "n": 2}]"#,
    );

    let obs = sink.by_name("item_n");
    assert_eq!(obs.len(), 2);
    assert_eq!(obs[0].labels, labels(&[("v", "1.50")]));
    assert_eq!(obs[1].labels, labels(&[("v", "1e2")]));
}

#[test]
fn relative_lookups_follow_document_order() {
    let sink = scrape(
        r#"
name: item
type: object
path: $.items[*]
labels:
  first: $.tags.*
values:
  n: $.nums.*
"#,
        br#"{"items": [{"tags": {"z": "zz", "a": "aa"}, "nums": {"y": 9, "b": 3}}]}"#,
    );

    let obs = sink.by_name("item_n");
    assert_eq!(obs.len(), 1);
    assert_eq!(obs[0].labels, labels(&[("first", "zz")]));
    assert_eq!(obs[0].value, 9.0);
}

#[test]
fn out_of_range_value_skips_only_that_instance() {
    let sink = scrape(
        r#"
name: item
type: object
path: $[*]
values:
  a: $.a
"#,
        br#"[{"a": 1e400}, {"a": 4}]"#,
    );

    let obs = sink.by_name("item_a");
    assert_eq!(obs.len(), 1);
    assert_eq!(obs[0].value, 4.0);
}
