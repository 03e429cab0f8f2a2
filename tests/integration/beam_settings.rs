// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::fs::read_to_string;

use tempfile::TempDir;

use crate::{cstbeam, get_cmd_output, make_data_dir};

#[test]
fn test_beam_settings() {
    let data_dir = TempDir::new().expect("couldn't make tmp dir");
    make_data_dir(data_dir.path(), &[120, 100, 110]);
    let out_dir = TempDir::new().expect("couldn't make tmp dir");

    #[rustfmt::skip]
    let cmd = cstbeam()
        .args([
            "beam-settings",
            "--data-dir", &data_dir.path().display().to_string(),
            "--output-dir", &out_dir.path().display().to_string(),
            "--no-provenance",
        ])
        .ok();
    assert!(cmd.is_ok(), "beam-settings failed: {}", cmd.err().unwrap());
    let (stdout, _) = get_cmd_output(cmd);
    assert!(stdout.contains("NF_HERA_power_beam_healpix.fits"), "{stdout}");

    let yaml = read_to_string(out_dir.path().join("NF_HERA_cst_settings.yaml")).unwrap();
    assert!(yaml.contains("telescope_name: HERA\n"), "{yaml}");
    assert!(
        yaml.contains("history: CST simulations by Nicolas Fagnoni.  Git provenance unavailable.\n"),
        "{yaml}"
    );
    assert!(
        yaml.contains("frequencies:\n- 100000000.0\n- 110000000.0\n- 120000000.0\n"),
        "{yaml}"
    );
    assert!(yaml.contains("HERA_4.9m_E-pattern_100MHz.txt"), "{yaml}");
    assert!(yaml.contains("preset: original\n"), "{yaml}");
    assert!(yaml.contains("_power_beam_healpix.fits\n"), "{yaml}");
}

#[test]
fn test_beam_settings_dry_run() {
    let data_dir = TempDir::new().expect("couldn't make tmp dir");
    make_data_dir(data_dir.path(), &[100]);
    let out_dir = TempDir::new().expect("couldn't make tmp dir");

    #[rustfmt::skip]
    let cmd = cstbeam()
        .args([
            "beam-settings",
            "--dry-run",
            "--data-dir", &data_dir.path().display().to_string(),
            "--output-dir", &out_dir.path().display().to_string(),
            "--preset", "efield-power",
            "--no-provenance",
        ])
        .ok();
    assert!(cmd.is_ok(), "{}", cmd.err().unwrap());
    let (stdout, _) = get_cmd_output(cmd);
    assert!(stdout.contains("NF_HERA_power_beam.fits"), "{stdout}");
    assert!(!stdout.contains("healpix"), "{stdout}");
    assert_eq!(std::fs::read_dir(out_dir.path()).unwrap().count(), 0);
}

#[test]
fn test_beam_settings_missing_data_dir() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");

    #[rustfmt::skip]
    let cmd = cstbeam()
        .args([
            "beam-settings",
            "--data-dir", &tmp_dir.path().join("nope").display().to_string(),
        ])
        .ok();
    assert!(cmd.is_err());
    let (_, stderr) = get_cmd_output(cmd);
    assert!(stderr.contains("isn't a directory"), "{stderr}");
}

#[test]
fn test_beam_settings_frequency_range() {
    let data_dir = TempDir::new().expect("couldn't make tmp dir");
    make_data_dir(data_dir.path(), &[100, 110]);

    #[rustfmt::skip]
    let cmd = cstbeam()
        .args([
            "beam-settings",
            "--dry-run",
            "--data-dir", &data_dir.path().display().to_string(),
            "--min-freq", "150MHz",
            "--no-provenance",
        ])
        .ok();
    assert!(cmd.is_err());
    let (_, stderr) = get_cmd_output(cmd);
    assert!(stderr.contains("No CST files were in the frequency range"), "{stderr}");
}
