mod common;

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;

#[test]
fn list_casts_prints_sorted_cast_names() {
    let dir = tempfile::tempdir().unwrap();
    let converted = dir.path().join("CTD").join("1_converted");
    common::write_casts(&converted, &["cast_002", "cast_001"]);
    fs::write(converted.join("notes.txt"), "not a cast").unwrap();

    Command::cargo_bin("castplot")
        .unwrap()
        .arg(dir.path())
        .args(["--deployed", "--list-casts"])
        .assert()
        .success()
        .stdout("cast_001\ncast_002\n");
}

#[test]
fn list_casts_follows_survey_layout() {
    let dir = tempfile::tempdir().unwrap();
    let converted = dir
        .path()
        .join("2019 Survey")
        .join("Data_Excalibur")
        .join("Ocean & Env")
        .join("UCTD")
        .join("1_converted");
    common::write_casts(&converted, &["uctd_007"]);

    Command::cargo_bin("castplot")
        .unwrap()
        .arg(dir.path())
        .args([
            "--instrument",
            "UCTD",
            "--survey",
            "2019 Survey",
            "--vessel",
            "Excalibur",
            "--list-casts",
        ])
        .assert()
        .success()
        .stdout("uctd_007\n");
}

#[test]
fn settings_file_supplies_defaults() {
    let dir = tempfile::tempdir().unwrap();
    common::write_casts(&dir.path().join("CTD").join("1_converted"), &["c1"]);
    let config = dir.path().join("castplot.toml");
    fs::write(
        &config,
        format!("data_path = {:?}\ndeployed = true\n", dir.path().display().to_string()),
    )
    .unwrap();

    Command::cargo_bin("castplot")
        .unwrap()
        .arg("--config")
        .arg(&config)
        .arg("--list-casts")
        .assert()
        .success()
        .stdout("c1\n");
}

#[test]
fn converted_override_wins() {
    let dir = tempfile::tempdir().unwrap();
    common::write_casts(dir.path(), &["only"]);

    Command::cargo_bin("castplot")
        .unwrap()
        .arg("--converted")
        .arg(dir.path())
        .arg("--list-casts")
        .assert()
        .success()
        .stdout("only\n");
}

#[test]
fn missing_cast_directory_fails() {
    let dir = tempfile::tempdir().unwrap();

    Command::cargo_bin("castplot")
        .unwrap()
        .arg(dir.path().join("nowhere"))
        .args(["--deployed", "--list-casts"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Cast directory not found"));
}

#[test]
fn unknown_instrument_is_rejected() {
    Command::cargo_bin("castplot")
        .unwrap()
        .args(["--instrument", "ADCP", "--list-casts"])
        .assert()
        .failure();
}
