use std::fs;
use std::path::Path;

use checkers_tutor::{
    run, Dataset, Error, ExportPaths, ModelArtifact, PipelineOptions, TrainConfig, CHECKERS_TOPOLOGY,
};

/// Writes `n` samples the way the sample generator does: space-separated,
/// comma decimals, kings as ±2, target tanh(material / 10).
fn write_samples(path: &Path, n: usize) {
    let mut text = String::new();
    for line in 0..n {
        let values: Vec<f64> = (0..32)
            .map(|i| match (i * 5 + line * 7) % 9 {
                0 => 2.0,
                1 | 2 => 1.0,
                3 | 4 => -1.0,
                5 => -2.0,
                _ => 0.0,
            })
            .collect();
        let target = (values.iter().sum::<f64>() / 10.0).tanh();
        let mut tokens: Vec<String> = values.iter().map(|v| v.to_string()).collect();
        tokens.push(target.to_string().replace('.', ","));
        text.push_str(&tokens.join(" "));
        text.push('\n');
    }
    fs::write(path, text).unwrap();
}

fn options(dir: &Path, samples: usize) -> PipelineOptions {
    let samples_path = dir.join("samples.txt");
    write_samples(&samples_path, samples);
    PipelineOptions {
        samples: samples_path,
        train: TrainConfig { seed: Some(42), ..TrainConfig::default() },
        export: ExportPaths {
            model: dir.join("model.json"),
            snapshot_dir: dir.join("current"),
            ..ExportPaths::default()
        },
        ..PipelineOptions::default()
    }
}

#[test]
fn full_run_exports_identical_artifacts() {
    let dir = tempfile::tempdir().unwrap();
    let report = run(&options(dir.path(), 300)).unwrap();

    assert_eq!(report.train_size, 240);
    assert_eq!(report.test_size, 60);
    assert_eq!(report.history.len(), 10);
    assert_eq!(report.evaluation.samples, 60);
    assert!(report.evaluation.loss.is_finite());
    assert!((0.0..=1.0).contains(&report.evaluation.accuracy));

    assert_eq!(report.written.len(), 301);
    let canonical = fs::read(dir.path().join("model.json")).unwrap();
    for i in 0..300 {
        let copy = fs::read(dir.path().join("current").join(format!("{i}.json"))).unwrap();
        assert_eq!(copy, canonical, "snapshot {i} differs");
    }
    assert!(!dir.path().join("current").join("300.json").exists());
}

#[test]
fn exported_artifact_matches_layer_shapes() {
    let dir = tempfile::tempdir().unwrap();
    let mut opts = options(dir.path(), 20);
    opts.export.snapshots = 1;
    let report = run(&opts).unwrap();

    let json = fs::read_to_string(dir.path().join("model.json")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["K"], serde_json::json!(2));

    let artifact = ModelArtifact::load(dir.path().join("model.json")).unwrap();
    assert_eq!(artifact.weights.len(), 3);
    let bias_lengths: Vec<usize> = artifact.weights.iter().map(|layer| layer.last().unwrap().len()).collect();
    assert_eq!(bias_lengths, vec![60, 10, 1]);

    let restored = artifact.to_network(&CHECKERS_TOPOLOGY).unwrap();
    assert_eq!(restored.shapes(), vec![((32, 60), 60), ((60, 10), 10), ((10, 1), 1)]);

    let input = vec![1.0; 32];
    assert_eq!(restored.predict(&input), report.network.predict(&input));
}

#[test]
fn seeded_runs_are_reproducible() {
    let a = tempfile::tempdir().unwrap();
    let b = tempfile::tempdir().unwrap();
    let mut opts_a = options(a.path(), 30);
    let mut opts_b = options(b.path(), 30);
    opts_a.export.snapshots = 0;
    opts_b.export.snapshots = 0;
    run(&opts_a).unwrap();
    run(&opts_b).unwrap();

    assert_eq!(
        fs::read(a.path().join("model.json")).unwrap(),
        fs::read(b.path().join("model.json")).unwrap()
    );
}

#[test]
fn malformed_samples_are_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let opts = options(dir.path(), 10);
    let mut text = fs::read_to_string(&opts.samples).unwrap();
    text.push_str("1 0 oops\n");
    fs::write(&opts.samples, text).unwrap();

    let err = run(&opts).unwrap_err();
    assert!(matches!(err, Error::ParseNumber { line: 11, .. }), "{err}");
    assert!(!dir.path().join("model.json").exists());
}

#[test]
fn non_finite_sample_values_are_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let opts = options(dir.path(), 10);
    let text = fs::read_to_string(&opts.samples).unwrap();
    let poisoned = text.replacen(' ', " nan ", 1);
    fs::write(&opts.samples, poisoned).unwrap();

    let err = run(&opts).unwrap_err();
    assert!(matches!(&err, Error::ParseNumber { line: 1, token } if token == "nan"), "{err}");
    assert!(!dir.path().join("model.json").exists());
}

#[test]
fn non_finite_artifact_is_never_written() {
    let dir = tempfile::tempdir().unwrap();
    let mut opts = options(dir.path(), 10);
    opts.king_value = f64::NAN;

    let err = run(&opts).unwrap_err();
    assert!(matches!(err, Error::NonFinite { layer: None }), "{err}");
    assert!(!dir.path().join("model.json").exists());
    assert!(!dir.path().join("current").exists());
}

#[test]
fn blank_line_in_samples_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let opts = options(dir.path(), 10);
    let text = fs::read_to_string(&opts.samples).unwrap();
    fs::write(&opts.samples, text.replacen('\n', "\n\n", 1)).unwrap();

    let err = run(&opts).unwrap_err();
    assert!(matches!(err, Error::TokenCount { line: 2, found: 0, .. }), "{err}");
}

#[test]
fn missing_samples_file_is_reported_with_path() {
    let dir = tempfile::tempdir().unwrap();
    let err = Dataset::load(dir.path().join("absent.txt")).unwrap_err();
    assert!(matches!(err, Error::Io { .. }));
    assert!(err.to_string().contains("absent.txt"));
}

#[test]
fn single_sample_has_no_training_split() {
    let dir = tempfile::tempdir().unwrap();
    let err = run(&options(dir.path(), 1)).unwrap_err();
    assert!(matches!(err, Error::EmptySplit("train")));
}
