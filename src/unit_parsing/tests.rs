// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use super::*;

use approx::assert_abs_diff_eq;

#[test]
fn test_parse_freq_str_without_units() {
    for s in ["150", "150.0", " 150.0 "] {
        let result = parse_freq(s);
        assert!(result.is_ok(), "{:?}", result.unwrap_err());
        let (number, unit) = result.unwrap();
        assert_abs_diff_eq!(number, 150.0);
        assert_eq!(unit, FreqFormat::NoUnit);
    }
}

#[test]
fn test_parse_freq_str_with_units() {
    // Iterate over all possible units.
    for freq_format in FreqFormat::iter().filter(|&ff| ff != FreqFormat::NoUnit) {
        let freq_format_str: &'static str = freq_format.into();
        for freq_format_str in [
            freq_format_str.to_lowercase(),
            freq_format_str.to_uppercase(),
            freq_format_str.to_string(),
        ] {
            for s in [
                format!("1{freq_format_str}"),
                format!("1.0{freq_format_str}"),
                format!(" 1.0 {freq_format_str} "),
            ] {
                let result = parse_freq(&s);
                assert!(result.is_ok(), "{:?}", result.unwrap_err());
                let (number, unit) = result.unwrap();
                assert_abs_diff_eq!(number, 1.0);
                assert_eq!(unit, freq_format);
            }
        }
    }
}

#[test]
fn test_parse_freq_hz() {
    assert_abs_diff_eq!(parse_freq_hz("150").unwrap(), 150e6);
    assert_abs_diff_eq!(parse_freq_hz("150MHz").unwrap(), 150e6);
    assert_abs_diff_eq!(parse_freq_hz("120000 kHz").unwrap(), 120e6);
    assert_abs_diff_eq!(parse_freq_hz("1.5e8").unwrap(), 150e6);
    assert_abs_diff_eq!(parse_freq_hz("0.2GHz").unwrap(), 200e6);
    assert_abs_diff_eq!(parse_freq_hz("100Hz").unwrap(), 100.0);
}

#[test]
fn test_parse_freq_bad_strings() {
    let result = parse_freq("MHz");
    assert!(matches!(
        result,
        Err(UnitParseError::GotFreqUnitButCantParse { unit: "MHz", .. })
    ));

    let result = parse_freq("150 furlongs");
    assert!(matches!(result, Err(UnitParseError::Unknown { .. })));
}
