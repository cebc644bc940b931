// Integration tests for `detgrid eval` and `detgrid random`.
// Run with: cargo test -p detgrid-cli --test eval_tests -- --nocapture
//
// Manual smoke test (cannot be automated, requires a real TTY):
//   detgrid grid --size 3 --seed 1
//   Verify: grid renders, r/c/[/] work, Enter shows "Determinant: ...", q restores the terminal.

use std::io::Write;
use std::process::{Command, Output, Stdio};

fn detgrid() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_detgrid"));
    cmd.current_dir(env!("CARGO_MANIFEST_DIR"));
    cmd.env_remove("DETGRID_SEED");
    cmd
}

fn run_with_stdin(args: &[&str], stdin: &str) -> Output {
    let mut child = detgrid()
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("spawn detgrid");
    child
        .stdin
        .take()
        .expect("stdin")
        .write_all(stdin.as_bytes())
        .expect("write stdin");
    child.wait_with_output().expect("wait for detgrid")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

// ---------------------------------------------------------------------------
// eval: happy paths
// ---------------------------------------------------------------------------

#[test]
fn eval_two_by_two_from_stdin() {
    let output = run_with_stdin(&["eval"], "1,2\n3,4\n");
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output).trim(), "Determinant: -2");
}

#[test]
fn eval_identity_three() {
    let output = run_with_stdin(&["eval"], "1,0,0\n0,1,0\n0,0,1\n");
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output).trim(), "Determinant: 1");
}

#[test]
fn eval_blank_and_garbage_fields_read_as_zero() {
    let output = run_with_stdin(&["eval"], "5,\nabc,2\n");
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output).trim(), "Determinant: 10");
}

#[test]
fn eval_json_output() {
    let output = run_with_stdin(&["eval", "--json"], "2,1\n1,3\n");
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let v: serde_json::Value = serde_json::from_str(&stdout(&output)).expect("valid JSON");
    assert_eq!(v["size"], 2);
    assert_eq!(v["determinant"], 5);
}

#[test]
fn eval_from_file_with_tab_delimiter() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("m.tsv");
    std::fs::write(&path, "2\t0\t0\n0\t3\t0\n0\t0\t-4\n").expect("write tsv");

    let output = detgrid()
        .args(["eval", path.to_str().unwrap(), "--delimiter", "\t"])
        .output()
        .expect("detgrid eval file");
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output).trim(), "Determinant: -24");
}

// ---------------------------------------------------------------------------
// eval: errors and exit codes
// ---------------------------------------------------------------------------

#[test]
fn eval_empty_stdin_is_parse_error() {
    let output = run_with_stdin(&["eval"], "");
    assert_eq!(output.status.code(), Some(4));
    assert!(stderr(&output).contains("no input"), "stderr: {}", stderr(&output));
}

#[test]
fn eval_ragged_rows_is_shape_error() {
    let output = run_with_stdin(&["eval"], "1,2\n3\n");
    assert_eq!(output.status.code(), Some(5));
    assert!(stderr(&output).contains("row 2"), "stderr: {}", stderr(&output));
}

#[test]
fn eval_oversized_is_shape_error() {
    let row = vec!["1"; 11].join(",");
    let input = format!("{}\n", vec![row; 11].join("\n"));
    let output = run_with_stdin(&["eval"], &input);
    assert_eq!(output.status.code(), Some(5));
    assert!(stderr(&output).contains("exceeds"), "stderr: {}", stderr(&output));
}

#[test]
fn eval_values_wider_than_a_cell_are_parse_errors() {
    let big = "9000000000000000000";
    let input = format!("{b},{b},{b}\n{b},{b},{b}\n{b},{b},{b}\n", b = big);
    let output = run_with_stdin(&["eval"], &input);
    assert_eq!(output.status.code(), Some(4), "stderr: {}", stderr(&output));
    assert!(stderr(&output).contains("outside -99..99"), "stderr: {}", stderr(&output));
    assert!(stdout(&output).is_empty());
}

#[test]
fn eval_extreme_cell_values_ten_by_ten() {
    // Upper-triangular, 99 on and above the diagonal: det = 99^10
    let rows: Vec<String> = (0..10)
        .map(|r| {
            (0..10)
                .map(|c| if c >= r { "99" } else { "0" })
                .collect::<Vec<_>>()
                .join(",")
        })
        .collect();
    let output = run_with_stdin(&["eval"], &format!("{}\n", rows.join("\n")));
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output).trim(), format!("Determinant: {}", 99i128.pow(10)));
}

#[test]
fn eval_missing_file_is_io_error() {
    let output = detgrid()
        .args(["eval", "does/not/exist.csv"])
        .output()
        .expect("detgrid eval missing");
    assert_eq!(output.status.code(), Some(3));
}

// ---------------------------------------------------------------------------
// random
// ---------------------------------------------------------------------------

#[test]
fn random_prints_square_in_range() {
    let output = detgrid()
        .args(["random", "--size", "4"])
        .output()
        .expect("detgrid random");
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let text = stdout(&output);
    let rows: Vec<&str> = text.lines().collect();
    assert_eq!(rows.len(), 4);
    for row in rows {
        let values: Vec<i64> = row.split(',').map(|v| v.parse().unwrap()).collect();
        assert_eq!(values.len(), 4);
        assert!(values.iter().all(|v| (-10..=10).contains(v)), "row: {}", row);
    }
}

#[test]
fn random_with_seed_is_reproducible() {
    let a = detgrid().args(["random", "--size", "5", "--seed", "9"]).output().expect("first");
    let b = detgrid().args(["random", "--size", "5", "--seed", "9"]).output().expect("second");
    assert!(a.status.success() && b.status.success());
    assert_eq!(a.stdout, b.stdout);
}

#[test]
fn random_pipes_into_eval() {
    let random = detgrid()
        .args(["random", "--size", "3", "--seed", "7"])
        .output()
        .expect("detgrid random");
    let output = run_with_stdin(&["eval"], &stdout(&random));
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).starts_with("Determinant: "));
}

#[test]
fn random_rejects_out_of_range_size() {
    for size in ["0", "11"] {
        let output = detgrid()
            .args(["random", "--size", size])
            .output()
            .expect("detgrid random bad size");
        assert_eq!(output.status.code(), Some(2), "size {}", size);
        assert!(stderr(&output).contains("out of range"));
    }
}
