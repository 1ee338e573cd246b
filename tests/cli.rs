//! End-to-end tests for the `chordtree` binary.

use std::io::Write;

use assert_cmd::Command;
use predicates::prelude::*;

fn chordtree() -> Command {
    let mut cmd = Command::cargo_bin("chordtree").unwrap();
    // Keep a developer's ~/.chordtree/config.yaml out of the picture.
    cmd.env("HOME", std::env::temp_dir().join("chordtree-test-home"));
    cmd
}

#[test]
fn parses_argument_as_sexp() {
    chordtree()
        .arg("G7")
        .assert()
        .success()
        .stdout("(source_file (chord root: (root note: (note)) quality: (quality)))\n");
}

#[test]
fn joins_arguments_into_one_progression() {
    chordtree()
        .args(["C", "-", "Am"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("(source_file (chord_progression"));
}

#[test]
fn syntax_error_exits_nonzero_with_diagnostic() {
    chordtree()
        .arg("Am7")
        .assert()
        .failure()
        .stderr(predicate::str::contains("syntax error"));
}

#[test]
fn lexical_error_exits_nonzero() {
    chordtree()
        .arg("H")
        .assert()
        .failure()
        .stderr(predicate::str::contains("lexical error"));
}

#[test]
fn reads_stdin_lines_and_skips_blanks() {
    chordtree()
        .write_stdin("C\n\nDm\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("(source_file").count(2));
}

#[test]
fn stdin_failure_still_processes_later_lines() {
    chordtree()
        .write_stdin("H\nC\n")
        .assert()
        .failure()
        .stdout(predicate::str::contains("(source_file"));
}

#[test]
fn json_format() {
    chordtree()
        .args(["--format", "json", "F#m"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"accidental\": \"sharp\""));
}

#[test]
fn tokens_format() {
    chordtree()
        .args(["--format", "tokens", "Bb"])
        .assert()
        .success()
        .stdout("note 0..1 \"B\"\nflat 1..2 \"b\"\nend 2..2 \"\"\n");
}

#[test]
fn chord_grammar_rejects_dash() {
    chordtree()
        .args(["--grammar", "chord", "C-G"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("lexical error"));
}

#[test]
fn lenient_reports_each_bad_chord() {
    chordtree()
        .args(["--lenient", "C - Am7 - G"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("(source_file").count(2))
        .stderr(predicate::str::contains("syntax error"));
}

#[test]
fn lenient_honours_json_format() {
    chordtree()
        .args(["--lenient", "--format", "json", "C - G"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"chords\"").count(2))
        .stdout(predicate::str::contains("(source_file").not());
}

#[test]
fn lenient_honours_tokens_format() {
    chordtree()
        .args(["--lenient", "--format", "tokens", "C - G"])
        .assert()
        .success()
        .stdout("note 0..1 \"C\"\nend 1..1 \"\"\nnote 4..5 \"G\"\nend 5..5 \"\"\n");
}

#[test]
fn max_len_flag() {
    chordtree()
        .args(["--max-len", "2", "C - G"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("input too long"));
}

#[test]
fn config_file_sets_format() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "format: tokens").unwrap();

    chordtree()
        .arg("--config")
        .arg(file.path())
        .arg("C")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("note 0..1"));
}

#[test]
fn flags_override_config_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "format: tokens\ngrammar: chord").unwrap();

    chordtree()
        .arg("--config")
        .arg(file.path())
        .args(["--format", "sexp", "--grammar", "progression", "C - G"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("(source_file"));
}

#[test]
fn bad_config_file_is_an_error() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "format: [not, a, format]").unwrap();

    chordtree()
        .arg("--config")
        .arg(file.path())
        .arg("C")
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid config file"));
}
