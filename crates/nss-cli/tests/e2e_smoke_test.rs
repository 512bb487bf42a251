use std::{fs, path::PathBuf};

use tempfile::tempdir;

use nss_cli::{Args, Emit, run};

/// Collects all .nss files from a directory
fn collect_nss_files(dir: PathBuf) -> Vec<PathBuf> {
    let mut files = if let Ok(entries) = fs::read_dir(&dir) {
        entries
            .flatten()
            .map(|entry| entry.path())
            .filter(|path| {
                path.is_file() && path.extension().and_then(|s| s.to_str()) == Some("nss")
            })
            .collect()
    } else {
        Vec::new()
    };

    // Sort for consistent test output
    files.sort();
    files
}

/// Samples live at the workspace root, not in the crate.
fn samples_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
        .join("samples")
}

fn args(input: &PathBuf, output: PathBuf, emit: Emit) -> Args {
    Args {
        input: input.to_string_lossy().to_string(),
        output: Some(output.to_string_lossy().to_string()),
        emit,
        config: None,
        log_level: "off".to_string(),
    }
}

#[test]
fn e2e_smoke_test_valid_samples() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let samples = collect_nss_files(samples_path());

    assert!(!samples.is_empty(), "No samples found in samples/");

    let mut failed = Vec::new();

    for sample in &samples {
        for emit in [Emit::Diagnostics, Emit::Tokens, Emit::Tree, Emit::Source] {
            let output_path = temp_dir.path().join(format!(
                "{}.{emit:?}.txt",
                sample.file_stem().expect("file name").to_string_lossy()
            ));

            match run(&args(sample, output_path.clone(), emit)) {
                Ok(()) => {
                    let output = fs::read_to_string(&output_path).expect("output written");
                    assert!(!output.is_empty(), "{emit:?} output for {sample:?} is empty");
                }
                Err(err) => failed.push((sample.clone(), emit, err)),
            }
        }
    }

    if !failed.is_empty() {
        eprintln!("\nValid samples that failed:");
        for (path, emit, err) in &failed {
            eprintln!("  - {} ({emit:?}): {}", path.display(), err);
        }
        panic!("{} valid sample run(s) failed unexpectedly", failed.len());
    }
}

#[test]
fn e2e_smoke_test_error_samples() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let samples = collect_nss_files(samples_path().join("errors"));

    assert!(!samples.is_empty(), "No error samples found in samples/errors/");

    let mut unexpectedly_succeeded = Vec::new();

    for sample in &samples {
        let output_path = temp_dir.path().join("error.txt");
        if run(&args(sample, output_path, Emit::Diagnostics)).is_ok() {
            unexpectedly_succeeded.push(sample.clone());
        }
    }

    assert!(
        unexpectedly_succeeded.is_empty(),
        "Error samples parsed without errors: {unexpectedly_succeeded:?}"
    );
}

#[test]
fn e2e_source_output_reparses_to_itself() {
    let temp_dir = tempdir().expect("Failed to create temp directory");

    for sample in collect_nss_files(samples_path()) {
        let first = temp_dir.path().join("first.nss");
        let second = temp_dir.path().join("second.nss");

        run(&args(&sample, first.clone(), Emit::Source)).expect("sample should write");
        run(&args(&first, second.clone(), Emit::Source)).expect("output should write");

        assert_eq!(
            fs::read_to_string(&first).expect("first output"),
            fs::read_to_string(&second).expect("second output"),
            "Writing {sample:?} is not stable"
        );
    }
}

#[test]
fn e2e_dumps_are_written_for_broken_scripts() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let input = temp_dir.path().join("broken.nss");
    fs::write(&input, "chapter main { Wait(1 }").expect("write input");

    let output = temp_dir.path().join("tree.txt");
    let result = run(&args(&input, output.clone(), Emit::Tree));

    assert!(result.is_err());
    let tree = fs::read_to_string(&output).expect("tree should be written");
    assert!(tree.starts_with("SourceFileRoot @ 0..23"));
    assert!(tree.contains("FunctionCallExpression"));
}

#[test]
fn e2e_missing_input_is_an_io_error() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let input = temp_dir.path().join("missing.nss");

    let result = run(&args(&input, temp_dir.path().join("out.txt"), Emit::Diagnostics));
    assert!(matches!(result, Err(nss::NssError::Io(_))));
}
