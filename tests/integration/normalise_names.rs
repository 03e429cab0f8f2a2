// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::fs::{read_dir, read_to_string, write};

use tempfile::TempDir;

use crate::{cstbeam, get_cmd_output, make_new_style_files};

#[test]
fn test_normalise_names() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let files = make_new_style_files(tmp_dir.path(), &[150, 160]);

    #[rustfmt::skip]
    let cmd = cstbeam()
        .args([
            "normalise-names",
            "--no-progress-bars",
            "--files", &files[0].display().to_string(), &files[1].display().to_string(),
        ])
        .ok();
    assert!(cmd.is_ok(), "normalise-names failed: {}", cmd.err().unwrap());
    let (stdout, _) = get_cmd_output(cmd);
    assert!(stdout.contains("Wrote 2 normalised CST files"), "{stdout}");

    let new = tmp_dir.path().join("HERA_pattern_150.00MHz.txt");
    assert_eq!(
        read_to_string(new).unwrap(),
        "Theta [deg.]  Phi   [deg.]  Abs(V)[V/m]  V pattern\n0 0 1\n"
    );
    assert!(tmp_dir.path().join("HERA_pattern_160.00MHz.txt").exists());
    // The originals are still there.
    assert!(files.iter().all(|f| f.exists()));
}

#[test]
fn test_normalise_names_dry_run() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let files = make_new_style_files(tmp_dir.path(), &[150]);

    #[rustfmt::skip]
    let cmd = cstbeam()
        .args([
            "normalise-names",
            "--dry-run",
            "--files", &files[0].display().to_string(),
        ])
        .ok();
    assert!(cmd.is_ok(), "{}", cmd.err().unwrap());
    let (stdout, _) = get_cmd_output(cmd);
    assert!(stdout.contains("HERA_pattern_150.00MHz.txt"), "{stdout}");
    assert_eq!(read_dir(tmp_dir.path()).unwrap().count(), 1);
}

#[test]
fn test_malformed_name_fails_with_a_hint() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let bad = tmp_dir.path().join("HERA_farfield_150MHz.txt");
    write(&bad, "E-field\n").unwrap();

    #[rustfmt::skip]
    let cmd = cstbeam()
        .args([
            "normalise-names",
            "--files", &bad.display().to_string(),
        ])
        .ok();
    assert!(cmd.is_err());
    let (_, stderr) = get_cmd_output(cmd);
    assert!(stderr.starts_with("Error: "), "{stderr}");
    assert!(stderr.contains("HERA_farfield_150MHz.txt"), "{stderr}");
    assert!(stderr.contains("--marker"), "{stderr}");
    assert_eq!(read_dir(tmp_dir.path()).unwrap().count(), 1);
}

#[test]
fn test_glob_and_save_toml() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let data_dir = tmp_dir.path().join("data");
    std::fs::create_dir(&data_dir).unwrap();
    make_new_style_files(&data_dir, &[100, 110, 120]);
    let toml = tmp_dir.path().join("args.toml");

    #[rustfmt::skip]
    let cmd = cstbeam()
        .args([
            "normalise-names",
            "--dry-run",
            "--save-toml", &toml.display().to_string(),
            "--files", &format!("{}/HERA_farfield__*.txt", data_dir.display()),
            "--on-error", "continue",
        ])
        .ok();
    assert!(cmd.is_ok(), "{}", cmd.err().unwrap());
    let saved = read_to_string(&toml).unwrap();
    assert!(saved.contains("on_error = \"continue\""), "{saved}");

    // Use the saved arguments for a real run.
    #[rustfmt::skip]
    let cmd = cstbeam()
        .args([
            "normalise-names",
            "--no-progress-bars",
            &toml.display().to_string(),
        ])
        .ok();
    assert!(cmd.is_ok(), "{}", cmd.err().unwrap());
    assert_eq!(read_dir(&data_dir).unwrap().count(), 6);
}
