use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use super::{InputError, InputPaths, load_inputs, read_json};
use crate::input::competitors::ComparisonModeError;

static DIR_COUNTER: AtomicUsize = AtomicUsize::new(0);

fn make_temp_dir() -> PathBuf {
    let mut dir = std::env::temp_dir();
    let id = DIR_COUNTER.fetch_add(1, Ordering::SeqCst);
    dir.push(format!("kira_dealgrade_input_{}_{}", std::process::id(), id));
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn write_file(path: &Path, contents: &str) {
    let mut f = BufWriter::new(File::create(path).unwrap());
    f.write_all(contents.as_bytes()).unwrap();
}

#[test]
fn test_load_inputs_signals_only() {
    let dir = make_temp_dir();
    let signals = dir.join("signals.json");
    write_file(&signals, r#"{"profile": {"name": "Acme"}}"#);

    let bundle = load_inputs(&InputPaths {
        signals,
        criteria: None,
        competitors: None,
    })
    .unwrap();
    assert_eq!(bundle.payload["profile"]["name"], "Acme");
    assert!(bundle.competitors.competitors.is_empty());
}

#[test]
fn test_load_inputs_with_competitors() {
    let dir = make_temp_dir();
    let signals = dir.join("signals.json");
    let competitors = dir.join("competitors.json");
    write_file(&signals, "{}");
    write_file(
        &competitors,
        r#"{"competitors": [{"name": "Rival"}, {"name": "  "}], "comparison_mode": "relative"}"#,
    );

    let bundle = load_inputs(&InputPaths {
        signals,
        criteria: None,
        competitors: Some(competitors),
    })
    .unwrap();
    assert_eq!(bundle.competitors.competitors.len(), 1);
    assert_eq!(bundle.competitors.rejected, 1);
    assert_eq!(bundle.competitors.declared_mode.as_deref(), Some("relative"));
}

#[test]
fn test_missing_signals_file() {
    let dir = make_temp_dir();
    let err = read_json(&dir.join("absent.json")).unwrap_err();
    assert!(matches!(err, InputError::MissingInput(_)));
}

#[test]
fn test_invalid_json_reports_path() {
    let dir = make_temp_dir();
    let path = dir.join("broken.json");
    write_file(&path, "{\"space\": ");
    match read_json(&path).unwrap_err() {
        InputError::Parse(msg) => assert!(msg.contains("broken.json")),
        other => panic!("expected parse error, got {other:?}"),
    }
}

#[test]
fn test_competitor_outcome_must_be_object() {
    let dir = make_temp_dir();
    let signals = dir.join("signals.json");
    let competitors = dir.join("competitors.json");
    write_file(&signals, "{}");
    write_file(&competitors, "[1, 2]");

    let err = load_inputs(&InputPaths {
        signals,
        criteria: None,
        competitors: Some(competitors),
    })
    .unwrap_err();
    assert!(matches!(
        err,
        InputError::Competitors(ComparisonModeError::Malformed("array"))
    ));
}
