use std::fs;
use std::path::Path;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

const SMALL_PROBLEM: [&str; 8] = [
    "--common-sizes", "1,2",
    "--out-channels", "1..=3",
    "--spatial", "4..=9",
    "--kernel", "2..=3",
];

fn run_to_file(binary: &str, seed: u64, path: &Path) {
    let mut cmd = match binary {
        "direct_convolution" => cargo_bin_cmd!("direct_convolution"),
        _ => cargo_bin_cmd!("im2col_gemm"),
    };
    cmd.args(SMALL_PROBLEM).args(["--seed", &seed.to_string()]).env_remove("RUST_LOG");

    let out = cmd.assert().success().get_output().stdout.clone();
    fs::write(path, out).unwrap();
}

#[test]
fn direct_stdout_is_status_and_values() {
    let mut cmd = cargo_bin_cmd!("direct_convolution");
    cmd.args(SMALL_PROBLEM).args(["--seed", "7"]).env_remove("RUST_LOG");

    let assert = cmd.assert().success().stderr(predicate::str::contains("execution time"));
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let lines: Vec<_> = stdout.lines().collect();

    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("batchsize="));
    assert!(lines[1].split(' ').all(|token| token.parse::<f64>().is_ok()));
}

#[test]
fn gemm_output_matches_direct() {
    let dir = tempfile::tempdir().unwrap();
    let direct = dir.path().join("direct.txt");
    let gemm = dir.path().join("gemm.txt");

    run_to_file("direct_convolution", 11, &direct);
    run_to_file("im2col_gemm", 11, &gemm);

    cargo_bin_cmd!("compare_outputs")
        .args([&direct, &gemm])
        .assert()
        .success()
        .stdout(predicate::str::contains("Files match."));
}

#[test]
fn perturbed_output_exits_one() {
    let dir = tempfile::tempdir().unwrap();
    let direct = dir.path().join("direct.txt");
    let gemm = dir.path().join("gemm.txt");

    run_to_file("direct_convolution", 12, &direct);
    run_to_file("im2col_gemm", 12, &gemm);

    let text = fs::read_to_string(&gemm).unwrap();
    let (status, values) = text.split_once('\n').unwrap();
    let rest = values.split_once(' ').map_or("\n", |(_, rest)| rest);
    fs::write(&gemm, format!("{status}\n1000.00000000 {rest}")).unwrap();

    cargo_bin_cmd!("compare_outputs")
        .args([&direct, &gemm])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("mismatch on line 2"));
}

#[test]
fn compare_with_one_argument_exits_one() {
    let dir = tempfile::tempdir().unwrap();
    let only = dir.path().join("only.txt");
    fs::write(&only, "1.0\n").unwrap();

    cargo_bin_cmd!("compare_outputs").arg(&only).assert().failure().code(1);
}

#[test]
fn compare_missing_file_exits_one() {
    let dir = tempfile::tempdir().unwrap();
    let present = dir.path().join("present.txt");
    fs::write(&present, "1.0\n").unwrap();

    cargo_bin_cmd!("compare_outputs")
        .args([present, dir.path().join("absent.txt")])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("absent.txt"));
}

#[test]
fn bad_flags_exit_one() {
    cargo_bin_cmd!("direct_convolution").arg("--bogus").assert().failure().code(1);
    cargo_bin_cmd!("im2col_gemm").args(["--spatial", "x"]).assert().failure().code(1);
    cargo_bin_cmd!("seed_generator").arg("--nope").assert().failure().code(1);
    cargo_bin_cmd!("compare_outputs").arg("--nope").assert().failure().code(1);
}

#[test]
fn help_exits_zero() {
    cargo_bin_cmd!("compare_outputs").arg("--help").assert().success();
}

#[test]
fn seed_generator_writes_seed_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("random_seed.txt");

    cargo_bin_cmd!("seed_generator")
        .args(["--output", path.to_str().unwrap(), "--seed", "4242"])
        .assert()
        .success();

    assert_eq!(fs::read_to_string(&path).unwrap(), "4242");

    let mut cmd = cargo_bin_cmd!("direct_convolution");
    cmd.args(SMALL_PROBLEM).args(["--seed-file", path.to_str().unwrap()]);
    let from_file = cmd.assert().success().get_output().stdout.clone();

    let mut cmd = cargo_bin_cmd!("direct_convolution");
    cmd.args(SMALL_PROBLEM).args(["--seed", "4242"]);
    let from_flag = cmd.assert().success().get_output().stdout.clone();

    assert_eq!(from_file, from_flag);
}
