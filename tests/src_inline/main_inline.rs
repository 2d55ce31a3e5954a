use super::*;

fn args(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_parse_args_default_run_mode_standalone() {
    let parsed = parse_args(&args(&["run", "--signals", "signals.json", "--out", "out"])).unwrap();
    assert_eq!(parsed.run_mode, RunMode::Standalone);
    assert_eq!(parsed.inputs.signals, PathBuf::from("signals.json"));
    assert!(parsed.inputs.criteria.is_none());
    assert!(parsed.inputs.competitors.is_none());
}

#[test]
fn test_parse_args_pipeline_run_mode() {
    let parsed = parse_args(&args(&[
        "run",
        "--signals",
        "signals.json",
        "--criteria",
        "criteria.json",
        "--competitors",
        "competitors.json",
        "--out",
        "out",
        "--run-mode",
        "pipeline",
    ]))
    .unwrap();
    assert_eq!(parsed.run_mode, RunMode::Pipeline);
    assert_eq!(parsed.inputs.criteria, Some(PathBuf::from("criteria.json")));
    assert_eq!(parsed.out_dir, PathBuf::from("out"));
}

#[test]
fn test_parse_args_requires_signals() {
    assert!(parse_args(&args(&["run", "--out", "out"])).is_err());
    assert!(parse_args(&args(&["run", "--signals", "s.json", "--out", "o", "--run-mode", "batch"])).is_err());
}

#[test]
fn test_resolve_output_dir_pipeline() {
    let out = resolve_output_dir(Path::new("/tmp/out"), RunMode::Pipeline);
    assert_eq!(out, PathBuf::from("/tmp/out/kira-dealgrade"));
}

#[test]
fn test_resolve_output_dir_standalone() {
    let out = resolve_output_dir(Path::new("/tmp/out"), RunMode::Standalone);
    assert_eq!(out, PathBuf::from("/tmp/out"));
}

#[test]
fn test_read_git_hash_missing_repo() {
    let dir = std::env::temp_dir().join(format!("kira_dealgrade_nogit_{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    assert_eq!(read_git_hash(&dir), None);
}
