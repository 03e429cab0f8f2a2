// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::fs::{read_to_string, write};

use clap::Parser;
use indoc::formatdoc;
use tempfile::TempDir;

use super::*;

fn make_cst_files(dir: &std::path::Path) -> Vec<PathBuf> {
    let files = vec![
        dir.join("HERA_farfield__(f=150)[1].txt"),
        dir.join("HERA_farfield__(f=160)[1].txt"),
    ];
    for f in &files {
        write(f, "E-field pattern data\n0 0 1\n").unwrap();
    }
    files
}

#[test]
fn test_no_files_is_an_error() {
    let args = NormaliseNamesArgs::parse_from(["normalise-names"]);
    assert!(matches!(args.parse(), Err(NormaliseNamesArgsError::NoFiles)));
}

#[test]
fn test_glob_without_matches_is_an_error() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let glob = format!("{}/*f=*.txt", tmp_dir.path().display());
    let args = NormaliseNamesArgs::parse_from(["normalise-names", "--files", &glob]);
    assert!(matches!(
        args.parse(),
        Err(NormaliseNamesArgsError::Glob(GlobError::NoMatches { .. }))
    ));
}

#[test]
fn test_glob_is_expanded() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let files = make_cst_files(tmp_dir.path());
    // Escape the directory; tempfile names don't have glob characters, but the
    // file names do.
    let glob = format!(
        "{}/HERA_farfield__*.txt",
        glob::Pattern::escape(&tmp_dir.path().display().to_string())
    );
    let args = NormaliseNamesArgs::parse_from(["normalise-names", "--files", &glob]);
    let result = args.parse();
    assert!(result.is_ok(), "{}", result.err().unwrap());
    assert_eq!(result.unwrap().files, files);
}

#[test]
fn test_bad_error_policy() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let files = make_cst_files(tmp_dir.path());
    let file = files[0].display().to_string();
    #[rustfmt::skip]
    let args = NormaliseNamesArgs::parse_from([
        "normalise-names",
        "--files", &file,
        "--on-error", "panic",
    ]);
    match args.parse() {
        Err(NormaliseNamesArgsError::ErrorPolicy(msg)) => {
            assert!(msg.contains("'panic'"));
            assert!(msg.contains("stop, continue"));
        }
        Err(e) => panic!("Unexpected error: {e}"),
        Ok(_) => panic!("Expected an error"),
    }

    // Case doesn't matter.
    let args = NormaliseNamesArgs::parse_from([
        "normalise-names",
        "--files",
        &file,
        "--on-error",
        "Continue",
    ]);
    let params = args.parse().unwrap();
    assert_eq!(params.normaliser.policy, ErrorPolicy::Continue);
}

#[test]
fn test_empty_marker_is_an_error() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let files = make_cst_files(tmp_dir.path());
    let file = files[0].display().to_string();
    #[rustfmt::skip]
    let args = NormaliseNamesArgs::parse_from([
        "normalise-names",
        "--files", &file,
        "--marker", "",
    ]);
    assert!(matches!(
        args.parse(),
        Err(NormaliseNamesArgsError::Convention(_))
    ));
}

#[test]
fn test_convention_overrides() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let files = make_cst_files(tmp_dir.path());
    let file = files[0].display().to_string();
    #[rustfmt::skip]
    let args = NormaliseNamesArgs::parse_from([
        "normalise-names",
        "--files", &file,
        "--prefix-trim", "2",
        "--freq-width", "7",
        "--replace-from", "",
        "--header-to", "Abs",
    ]);
    let params = args.parse().unwrap();
    let convention = &params.normaliser.convention;
    assert_eq!(convention.prefix_trim, 2);
    assert_eq!(convention.freq_width, 7);
    assert_eq!(convention.marker, "f=");
    assert!(convention.replace_from.is_empty());
    assert_eq!(params.normaliser.header.from, "E-field");
    assert_eq!(params.normaliser.header.to, "Abs");
    assert_eq!(
        convention.derive_output_name("HERA_farfield__(f=150)[1].txt").unwrap(),
        "HERA_farfield__0150.00MHz.txt"
    );
}

#[test]
fn test_args_file_is_merged() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let files = make_cst_files(tmp_dir.path());
    let args_file = tmp_dir.path().join("args.toml");
    write(
        &args_file,
        formatdoc! {r#"
            files = ["{}"]
            on_error = "continue"
            suffix = "MHz.dat"
        "#, files[0].display()},
    )
    .unwrap();

    // The CLI suffix wins over the file's.
    let args_file = args_file.display().to_string();
    let args =
        NormaliseNamesArgs::parse_from(["normalise-names", &args_file, "--suffix", "MHz.csv"]);
    let result = args.merge();
    assert!(result.is_ok(), "{}", result.err().unwrap());
    let args = result.unwrap();
    assert!(args.args_file.is_none());
    assert_eq!(args.files, Some(vec![files[0].display().to_string()]));
    assert_eq!(args.on_error.as_deref(), Some("continue"));
    assert_eq!(args.suffix.as_deref(), Some("MHz.csv"));
    assert!(args.marker.is_none());
}

#[test]
fn test_args_file_with_bad_extension() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let args_file = tmp_dir.path().join("args.yaml");
    write(&args_file, "files: []\n").unwrap();
    let args_file = args_file.display().to_string();
    let args = NormaliseNamesArgs::parse_from(["normalise-names", &args_file]);
    assert!(matches!(args.merge(), Err(CstBeamError::ArgFile(_))));
}

#[test]
fn test_dry_run_writes_nothing() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let files = make_cst_files(tmp_dir.path());
    let file_strings: Vec<String> = files.iter().map(|f| f.display().to_string()).collect();
    let mut cli = vec!["normalise-names", "--files"];
    cli.extend(file_strings.iter().map(|s| s.as_str()));
    let args = NormaliseNamesArgs::parse_from(cli);

    let result = args.clone().run(true);
    assert!(result.is_ok(), "{}", result.err().unwrap());
    assert_eq!(std::fs::read_dir(tmp_dir.path()).unwrap().count(), 2);

    let result = args.run(false);
    assert!(result.is_ok(), "{}", result.err().unwrap());
    assert_eq!(std::fs::read_dir(tmp_dir.path()).unwrap().count(), 4);
    assert_eq!(
        read_to_string(tmp_dir.path().join("HERA_pattern_160.00MHz.txt")).unwrap(),
        "V pattern data\n0 0 1\n"
    );
}

#[test]
fn test_overlapping_globs_write_each_file_once() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let files = make_cst_files(tmp_dir.path());
    let dir = tmp_dir.path().display().to_string();
    let by_marker = format!("{dir}/*f=*.txt");
    let by_name = format!("{dir}/*farfield*.txt");
    let literal = files[1].display().to_string();

    #[rustfmt::skip]
    let args = NormaliseNamesArgs::parse_from([
        "normalise-names",
        "--files", &by_marker, &by_name, &literal,
    ]);
    let params = args.clone().parse().unwrap();
    assert_eq!(params.files, files);

    let result = args.run(false);
    assert!(result.is_ok(), "{}", result.err().unwrap());
    assert!(tmp_dir.path().join("HERA_pattern_150.00MHz.txt").exists());
    assert!(tmp_dir.path().join("HERA_pattern_160.00MHz.txt").exists());
}

#[test]
fn test_continue_fails_if_any_file_failed() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let files = make_cst_files(tmp_dir.path());
    let bad = tmp_dir.path().join("HERA_farfield.txt");
    write(&bad, "E-field\n").unwrap();

    #[rustfmt::skip]
    let args = NormaliseNamesArgs::parse_from([
        "normalise-names",
        "--files", &files[0].display().to_string(), &bad.display().to_string(),
        "--on-error", "continue",
    ]);
    let result = args.run(false);
    assert!(matches!(result, Err(CstBeamError::Generic(_))));
    // The good file was still written.
    assert!(tmp_dir.path().join("HERA_pattern_150.00MHz.txt").exists());
}

#[test]
fn test_stop_reports_naming_errors() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let bad = tmp_dir.path().join("HERA_farfield.txt");
    write(&bad, "E-field\n").unwrap();

    let bad = bad.display().to_string();
    let args = NormaliseNamesArgs::parse_from(["normalise-names", "--files", &bad]);
    match args.run(false) {
        Err(CstBeamError::Normalise(msg)) => assert!(msg.contains("HERA_farfield.txt")),
        Err(e) => panic!("Unexpected error: {e}"),
        Ok(()) => panic!("Expected an error"),
    }
}
