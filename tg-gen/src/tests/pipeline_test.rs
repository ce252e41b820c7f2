use std::fs;
use std::path::Path;

use super::*;
use crate::export::ExportOutcome;
use crate::output::OutputFormat;
use crate::pipeline::*;

fn run_config(config: ForestConfig, dir: &Path, format: OutputFormat, csv: bool) -> RunConfig {
    RunConfig {
        forest: config,
        seed: Some(TEST_SEED),
        format,
        out: dir.join("nodes.out"),
        csv_out: csv.then(|| dir.join("nodes.csv")),
    }
}

#[rstest]
#[case::jsonl(OutputFormat::Jsonl)]
#[case::json(OutputFormat::Json)]
fn test_run_seeded_is_reproducible(config: ForestConfig, #[case] format: OutputFormat) {
    let (a, b) = (tempfile::tempdir().unwrap(), tempfile::tempdir().unwrap());

    run(&run_config(config.clone(), a.path(), format, false)).unwrap();
    run(&run_config(config, b.path(), format, false)).unwrap();

    assert_eq!(fs::read(a.path().join("nodes.out")).unwrap(), fs::read(b.path().join("nodes.out")).unwrap());
}

#[rstest]
fn test_run_with_export(mut config: ForestConfig) {
    config.rows = 300;
    let dir = tempfile::tempdir().unwrap();

    let summary = run(&run_config(config, dir.path(), OutputFormat::Jsonl, true)).unwrap();

    assert_eq!(summary.rows, 300);
    assert_eq!(summary.format, OutputFormat::Jsonl);
    let Some(ExportOutcome::Written { rows, columns, .. }) = summary.export else {
        panic!("expected a CSV export, got {:?}", summary.export);
    };
    assert_eq!(rows, 300);
    assert!(!columns.iter().any(|c| c == "level"));

    let lines = fs::read_to_string(dir.path().join("nodes.out")).unwrap().lines().count();
    assert_eq!(lines, 300);
    let csv_lines = fs::read_to_string(dir.path().join("nodes.csv")).unwrap().lines().count();
    assert_eq!(csv_lines, 301);
}

#[rstest]
fn test_run_without_export(config: ForestConfig) {
    let dir = tempfile::tempdir().unwrap();

    let summary = run(&run_config(config, dir.path(), OutputFormat::Json, false)).unwrap();

    assert!(summary.export.is_none());
    assert!(!dir.path().join("nodes.csv").exists());
}

#[rstest]
fn test_run_rejects_bad_config_before_writing(mut config: ForestConfig) {
    config.root_share = 2.0;
    let dir = tempfile::tempdir().unwrap();

    assert!(run(&run_config(config, dir.path(), OutputFormat::Jsonl, true)).is_err());
    assert!(!dir.path().join("nodes.out").exists());
}

#[rstest]
fn test_rng_for_seeded() {
    use rand::Rng;

    let (mut a, mut b) = (rng_for(Some(3)), rng_for(Some(3)));
    assert_eq!(a.gen::<u64>(), b.gen::<u64>());
}
