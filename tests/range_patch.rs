use std::fs;
use std::io::Write;
use std::path::Path;
use std::process::{Command, Output, Stdio};

use linepatch::{
    apply_range_replacement, apply_range_replacement_sync, decompose, recompose, replace,
    PatchError, PatchOptions, PatchOutcome, Replacement,
};
use tempfile::tempdir;

fn owned(lines: &[&str]) -> Vec<String> {
    lines.iter().map(|l| l.to_string()).collect()
}

fn write_config(dir: &Path) -> std::path::PathBuf {
    let config = dir.join("linepatch.toml");
    fs::write(&config, "encoding = \"utf-8\"\n").unwrap();
    config
}

fn run_cli(args: &[&str], stdin: Option<&str>) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_linepatch"))
        .args(args)
        .env_remove("RUST_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();

    {
        let mut pipe = child.stdin.take().unwrap();
        if let Some(input) = stdin {
            pipe.write_all(input.as_bytes()).unwrap();
        }
    }

    child.wait_with_output().unwrap()
}

#[test]
fn test_split_replace_join_pipeline() {
    let split = decompose("a\r\nb\r\nc\r\n");
    let lines = replace(&split.lines, 2, 2, &["x", "y"]).unwrap();
    assert_eq!(lines, owned(&["a", "x", "y", "c"]));
    assert_eq!(
        recompose(&lines, split.style, split.trailing_newline),
        "a\r\nx\r\ny\r\nc\r\n"
    );
}

#[test]
fn test_empty_file_gets_hello() {
    let split = decompose("");
    assert_eq!(split.lines, owned(&[""]));
    let lines = replace(&split.lines, 1, 1, &["hello"]).unwrap();
    assert_eq!(recompose(&lines, split.style, false), "hello");
}

#[tokio::test]
async fn test_crlf_file_round_trips_byte_for_byte() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("dos.txt");
    let original = "REM header\r\nset X=1\r\nset Y=2\r\n";
    fs::write(&path, original).unwrap();

    for (from, to) in [(1, 1), (2, 3), (1, 3)] {
        let current = decompose(original).lines[from - 1..to].to_vec();
        let outcome = apply_range_replacement(
            &path,
            from,
            to,
            &Replacement::Lines(current),
            &PatchOptions::default(),
        )
        .await
        .unwrap();

        assert_eq!(outcome, PatchOutcome::Unchanged);
        assert_eq!(fs::read(&path).unwrap(), original.as_bytes());
    }
}

#[tokio::test]
async fn test_mixed_newlines_normalize_to_crlf_on_write() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("mixed.txt");
    fs::write(&path, "a\r\nb\nc\n").unwrap();

    let outcome =
        apply_range_replacement(&path, 3, 3, &"C".into(), &PatchOptions::default())
            .await
            .unwrap();

    assert_eq!(outcome, PatchOutcome::Written);
    assert_eq!(fs::read_to_string(&path).unwrap(), "a\r\nb\r\nC\r\n");
}

#[test]
fn test_sync_and_async_agree() {
    let dir = tempdir().unwrap();
    let sync_path = dir.path().join("sync.txt");
    let async_path = dir.path().join("async.txt");
    fs::write(&sync_path, "1\n2\n3\n4").unwrap();
    fs::write(&async_path, "1\n2\n3\n4").unwrap();

    let replacement = Replacement::Text("two\nthree\n".to_string());
    apply_range_replacement_sync(&sync_path, 2, 3, &replacement, &PatchOptions::default())
        .unwrap();

    let rt = tokio::runtime::Runtime::new().unwrap();
    rt.block_on(async {
        apply_range_replacement(&async_path, 2, 3, &replacement, &PatchOptions::default())
            .await
            .unwrap();
    });

    assert_eq!(fs::read_to_string(&sync_path).unwrap(), "1\ntwo\nthree\n4");
    assert_eq!(
        fs::read_to_string(&sync_path).unwrap(),
        fs::read_to_string(&async_path).unwrap()
    );
}

#[test]
fn test_error_kinds_are_distinct() {
    let lines = owned(&["a", "b"]);
    let cases = [
        (replace(&lines, 0, 1, &["x"]).unwrap_err(), "invalid_range_bounds"),
        (replace(&lines, 2, 1, &["x"]).unwrap_err(), "invalid_range_order"),
        (replace(&lines, 1, 9, &["x"]).unwrap_err(), "range_out_of_bounds"),
    ];

    for (err, kind) in cases {
        assert_eq!(err.kind(), kind);
        assert!(err.is_range_error());
    }

    let err = apply_range_replacement_sync(
        "/definitely/not/here.txt",
        1,
        1,
        &"x".into(),
        &PatchOptions::default(),
    )
    .unwrap_err();
    assert!(matches!(err, PatchError::IoReadFailure { .. }));
}

#[test]
fn test_cli_replaces_with_text_flag() {
    let dir = tempdir().unwrap();
    let config = write_config(dir.path());
    let path = dir.path().join("target.txt");
    fs::write(&path, "first\nsecond\nthird\n").unwrap();

    let output = run_cli(
        &[
            path.to_str().unwrap(),
            "2",
            "2",
            "--text",
            "SECOND",
            "--config",
            config.to_str().unwrap(),
        ],
        None,
    );

    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    assert_eq!(fs::read_to_string(&path).unwrap(), "first\nSECOND\nthird\n");
}

#[test]
fn test_cli_reads_replacement_from_stdin() {
    let dir = tempdir().unwrap();
    let config = write_config(dir.path());
    let path = dir.path().join("target.txt");
    fs::write(&path, "a\r\nb\r\n").unwrap();

    let output = run_cli(
        &[path.to_str().unwrap(), "1", "1", "--config", config.to_str().unwrap()],
        Some("x\ny\n"),
    );

    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    assert_eq!(fs::read_to_string(&path).unwrap(), "x\r\ny\r\nb\r\n");
}

#[test]
fn test_cli_dry_run_prints_diff_without_writing() {
    let dir = tempdir().unwrap();
    let config = write_config(dir.path());
    let path = dir.path().join("target.txt");
    fs::write(&path, "keep\nold\n").unwrap();

    let output = run_cli(
        &[
            path.to_str().unwrap(),
            "2",
            "2",
            "--text",
            "new",
            "--dry-run",
            "--config",
            config.to_str().unwrap(),
        ],
        None,
    );

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("-old"));
    assert!(stdout.contains("+new"));
    assert_eq!(fs::read_to_string(&path).unwrap(), "keep\nold\n");
}

#[test]
fn test_cli_rejects_non_positive_line_numbers() {
    let dir = tempdir().unwrap();
    let config = write_config(dir.path());
    let path = dir.path().join("target.txt");
    fs::write(&path, "only\n").unwrap();

    for bad in ["0", "-3", "one"] {
        let output = run_cli(
            &[
                path.to_str().unwrap(),
                bad,
                "1",
                "--delete",
                "--config",
                config.to_str().unwrap(),
            ],
            None,
        );
        assert!(!output.status.success(), "accepted {bad}");
    }
    assert_eq!(fs::read_to_string(&path).unwrap(), "only\n");
}

#[test]
fn test_cli_from_file_uses_target_encoding() {
    let dir = tempdir().unwrap();
    let config = write_config(dir.path());
    let path = dir.path().join("latin.txt");
    let replacement = dir.path().join("replacement.txt");
    fs::write(&path, b"caf\xE9\nold\n").unwrap();
    fs::write(&replacement, b"na\xEFve\n").unwrap();

    let output = run_cli(
        &[
            path.to_str().unwrap(),
            "2",
            "2",
            "--from-file",
            replacement.to_str().unwrap(),
            "--encoding",
            "windows-1252",
            "--config",
            config.to_str().unwrap(),
        ],
        None,
    );

    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    assert_eq!(fs::read(&path).unwrap(), b"caf\xE9\nna\xEFve\n");
}

#[test]
fn test_cli_from_file_rejects_bytes_invalid_in_encoding() {
    let dir = tempdir().unwrap();
    let config = write_config(dir.path());
    let path = dir.path().join("target.txt");
    let replacement = dir.path().join("replacement.txt");
    fs::write(&path, "a\nb\n").unwrap();
    fs::write(&replacement, b"na\xEFve\n").unwrap();

    let output = run_cli(
        &[
            path.to_str().unwrap(),
            "1",
            "1",
            "-f",
            replacement.to_str().unwrap(),
            "--config",
            config.to_str().unwrap(),
        ],
        None,
    );

    assert!(!output.status.success());
    assert_eq!(fs::read_to_string(&path).unwrap(), "a\nb\n");
}

#[test]
fn test_cli_delete_removes_range() {
    let dir = tempdir().unwrap();
    let config = write_config(dir.path());
    let path = dir.path().join("target.txt");
    fs::write(&path, "keep\ndrop 1\ndrop 2\nkeep too\n").unwrap();

    let output = run_cli(
        &[
            path.to_str().unwrap(),
            "2",
            "3",
            "--delete",
            "--config",
            config.to_str().unwrap(),
        ],
        None,
    );

    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    assert_eq!(fs::read_to_string(&path).unwrap(), "keep\nkeep too\n");
}

#[test]
fn test_cli_delete_conflicts_with_text() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("target.txt");
    fs::write(&path, "a\n").unwrap();

    let output = run_cli(&[path.to_str().unwrap(), "1", "1", "-d", "-t", "x"], None);

    assert!(!output.status.success());
    assert_eq!(fs::read_to_string(&path).unwrap(), "a\n");
}
