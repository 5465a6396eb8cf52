mod common;

use common::{loader_in, sample_store, store_on_disk, SAMPLE_CONFIG};
use jsonconf::config::{ConfigStore, Document};
use serde::Deserialize;
use serde_json::{json, Value};
use tempfile::TempDir;

#[test]
fn reads_existing_root_string() {
    let (_dir, store) = store_on_disk(SAMPLE_CONFIG);

    assert_eq!(store.string("host"), Some("google.com".to_string()));
    assert!(store.source_path().unwrap().ends_with("config.json"));
}

#[test]
fn missing_key_is_not_found_with_zero_default() {
    let store = sample_store();

    assert_eq!(store.string("missing"), None);
    assert_eq!(store.string("missing").unwrap_or_default(), "");
    assert_eq!(store.int("missing").unwrap_or_default(), 0);
    assert!(!store.bool("missing").unwrap_or_default());
}

#[test]
fn int_truncates_and_float_keeps_fraction() {
    let store = sample_store();

    assert_eq!(store.int("ratio"), Some(3));
    assert_eq!(store.float("ratio"), Some(3.7));
    assert_eq!(store.float("port"), Some(8080.0));
    assert_eq!(store.int("port"), Some(8080));
}

#[test]
fn wrong_type_reads_as_not_found() {
    let store = sample_store();

    assert_eq!(store.bool("host"), None);
    assert_eq!(store.string("port"), None);
    assert_eq!(store.int("debug"), None);
    assert_eq!(store.float("host"), None);
    assert_eq!(store.string("nothing"), None);
}

#[test]
fn raw_value_returns_anything_present() {
    let store = sample_store();

    assert_eq!(store.value("tags"), Some(json!(["a", "b"])));
    assert_eq!(store.value("nothing"), Some(Value::Null));
    assert!(store.value("links").unwrap().is_object());
    assert_eq!(store.value("missing"), None);
}

#[test]
fn group_accessors_read_one_level_down() {
    let store = sample_store();

    assert_eq!(
        store.group_string("links", "google"),
        Some("https://google.com".to_string())
    );
    assert_eq!(store.group_int("links", "retries"), Some(3));
    assert_eq!(store.group_float("links", "weight"), Some(0.5));
    assert_eq!(store.group_int("links", "weight"), Some(0));
    assert_eq!(store.group_bool("links", "enabled"), Some(false));
    assert_eq!(store.group_value("links", "retries"), Some(json!(3)));
}

#[test]
fn group_that_is_not_a_map_reports_not_found() {
    let store = ConfigStore::from_bytes(br#"{"links": "notAMap"}"#).unwrap();

    assert_eq!(store.group_string("links", "google"), None);
    assert_eq!(store.group_string("links", "google").unwrap_or_default(), "");
    assert!(store.group_keys("links").is_empty());
}

#[test]
fn group_accessors_report_missing_group_and_key() {
    let store = sample_store();

    assert_eq!(store.group_string("absent", "google"), None);
    assert_eq!(store.group_string("links", "bing"), None);
    assert_eq!(store.group_bool("links", "google"), None);
}

#[test]
fn keys_list_root_and_group() {
    let store = sample_store();

    let mut keys = store.keys();
    keys.sort();
    assert_eq!(
        keys,
        vec!["debug", "flat", "host", "links", "nothing", "port", "ratio", "tags"]
    );

    let mut group_keys = store.group_keys("links");
    group_keys.sort();
    assert_eq!(group_keys, vec!["enabled", "google", "retries", "weight"]);

    assert!(store.group_keys("absent").is_empty());
    assert!(store.group_keys("flat").is_empty());
}

#[test]
fn decode_deserializes_a_group() {
    #[derive(Debug, Deserialize, PartialEq)]
    struct Links {
        google: String,
        retries: u32,
    }

    let store = sample_store();

    assert_eq!(
        store.decode::<Links>("links"),
        Some(Links {
            google: "https://google.com".to_string(),
            retries: 3,
        })
    );
    assert_eq!(store.decode::<Links>("host"), None);
    assert_eq!(store.decode::<Vec<String>>("tags"), Some(vec!["a".into(), "b".into()]));
}

#[test]
fn empty_store_reports_everything_missing() {
    let store = ConfigStore::new(jsonconf::Loader::new("config.json"));

    assert!(store.keys().is_empty());
    assert_eq!(store.string("host"), None);
    assert_eq!(store.value("host"), None);
    assert!(store.source_path().is_none());
}

#[test]
fn load_or_empty_tolerates_missing_file() {
    let dir = TempDir::new().unwrap();
    let store = ConfigStore::load_or_empty(loader_in(&dir));

    assert!(store.keys().is_empty());
    assert_eq!(store.string("host"), None);
}

#[test]
fn load_fails_on_missing_file() {
    let dir = TempDir::new().unwrap();
    assert!(ConfigStore::load(loader_in(&dir)).is_err());
}

#[test]
fn stores_are_independent() {
    let a = ConfigStore::from_bytes(br#"{"name": "a"}"#).unwrap();
    let b = ConfigStore::from_bytes(br#"{"name": "b"}"#).unwrap();

    a.set_string("name", "changed");

    assert_eq!(a.string("name"), Some("changed".to_string()));
    assert_eq!(b.string("name"), Some("b".to_string()));
}

#[test]
fn clones_share_the_document() {
    let store = sample_store();
    let handle = store.clone();

    let mut replacement = Document::new();
    replacement.insert("host".to_string(), json!("example.org"));
    handle.set_config(replacement);

    assert_eq!(store.string("host"), Some("example.org".to_string()));
}

#[test]
fn required_accessors_return_present_values() {
    let store = sample_store();
    let required = store.required();

    assert_eq!(required.string("host"), "google.com");
    assert_eq!(required.int("ratio"), 3);
    assert_eq!(required.float("ratio"), 3.7);
    assert!(required.bool("debug"));
    assert_eq!(required.value("tags"), json!(["a", "b"]));
    assert_eq!(required.value("nothing"), Value::Null);

    assert_eq!(required.group_string("links", "google"), "https://google.com");
    assert_eq!(required.group_int("links", "retries"), 3);
    assert_eq!(required.group_float("links", "weight"), 0.5);
    assert!(!required.group_bool("links", "enabled"));
    assert_eq!(required.group_value("links", "retries"), json!(3));
}
