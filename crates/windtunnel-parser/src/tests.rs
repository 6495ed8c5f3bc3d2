use std::fs;
use std::path::PathBuf;

use polars::prelude::*;

use crate::errors::ParserError;
use crate::formats::schema::BALANCE_COLUMNS;
use crate::model::Resistance;
use crate::{parse_balance_run, parse_oscilloscope_channel, parse_run_name};

fn fixture(path: &str) -> String {
    let base = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    let full_path = base.join("tests/data").join(path);
    fs::read_to_string(&full_path)
        .unwrap_or_else(|err| panic!("failed to read fixture {}: {}", full_path.display(), err))
}

fn column_names(df: &DataFrame) -> Vec<&str> {
    df.get_column_names()
        .into_iter()
        .map(|name| name.as_str())
        .collect()
}

fn preamble(header: &str) -> String {
    let mut lines = vec!["stray".to_string(), header.to_string()];
    lines.extend((2..12).map(|idx| format!("meta{idx},value")));
    lines.join("\n")
}

#[test]
fn parses_oscilloscope_channel_after_preamble() {
    let channel = parse_oscilloscope_channel(&fixture("oscope_0.csv")).expect("channel parse failed");

    assert_eq!(channel.sample_count(), 5);
    assert_eq!(column_names(&channel.df), ["second", "Volt"]);

    let time = channel.time().unwrap();
    assert_eq!(time.get(0), Some(-0.02));
    let volts = channel.volts().unwrap();
    assert_eq!(volts.get(1), Some(1.25));
    assert!((volts.mean().unwrap() - 1.4).abs() < 1e-12);
}

#[test]
fn oscilloscope_columns_are_located_by_name() {
    let content = format!("{}\n0.5,0.1,7.0\n0.6,0.1,8.0\n", preamble("Volt,Label,second"));
    let channel = parse_oscilloscope_channel(&content).unwrap();

    let time = channel.time().unwrap();
    let volts = channel.volts().unwrap();
    assert_eq!(time.get(0), Some(7.0));
    assert_eq!(volts.get(1), Some(0.6));
}

#[test]
fn oscilloscope_requires_volt_column() {
    let content = format!("{}\n0.5,0.1\n", preamble("second,Amp"));
    let err = parse_oscilloscope_channel(&content).unwrap_err();

    assert!(matches!(
        err,
        ParserError::MissingColumn {
            column: "Volt",
            row_index: 1,
            ..
        }
    ));
}

#[test]
fn oscilloscope_rejects_truncated_preamble() {
    let err = parse_oscilloscope_channel("stray\n").unwrap_err();
    assert!(matches!(err, ParserError::MissingHeader { .. }));
}

#[test]
fn oscilloscope_without_samples_is_empty() {
    let err = parse_oscilloscope_channel(&preamble("second,Volt")).unwrap_err();
    assert!(matches!(err, ParserError::EmptyData { .. }));
}

#[test]
fn oscilloscope_rejects_non_numeric_sample() {
    let content = format!("{}\n0.1,1.0\n0.2,abc\n", preamble("second,Volt"));
    let err = parse_oscilloscope_channel(&content).unwrap_err();

    match err {
        ParserError::DataRow { line_index, .. } => assert_eq!(line_index, 13),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn parses_balance_run_with_positional_channels() {
    let name = "B2_4_70_14.7_10 psf.csv";
    let run = parse_balance_run(name, &fixture(name)).expect("balance parse failed");

    assert_eq!(run.file_name, name);
    assert_eq!(run.df.height(), 5);
    assert_eq!(column_names(&run.df), BALANCE_COLUMNS);

    let rpm: Vec<Option<f64>> = run.rpm().unwrap().into_iter().collect();
    assert_eq!(
        rpm,
        vec![Some(0.0), Some(-5.0), Some(1200.0), Some(0.0), Some(1300.0)]
    );
}

#[test]
fn balance_blank_cells_become_null() {
    let content = "1,2,3,4,5,6,,8,9,nan\n1,2,3,4,5,6,7,8,9,900\n";
    let run = parse_balance_run("run.csv", content).unwrap();

    let rpm = run.rpm().unwrap();
    assert_eq!(rpm.get(0), None);
    assert_eq!(rpm.get(1), Some(900.0));
    assert_eq!(run.df.column("null").unwrap().null_count(), 1);
}

#[test]
fn balance_rejects_wrong_field_count() {
    let err = parse_balance_run("run.csv", "1,2,3\n").unwrap_err();
    assert!(matches!(
        err,
        ParserError::FieldCount {
            expected: 10,
            found: 3,
            ..
        }
    ));
}

#[test]
fn balance_rejects_empty_file() {
    let err = parse_balance_run("run.csv", "").unwrap_err();
    assert!(matches!(err, ParserError::EmptyData { .. }));
}

#[test]
fn run_name_decomposes_into_fields() {
    let meta = parse_run_name("B2_4_70_14.7_10 psf.csv").unwrap();

    assert_eq!(meta.blade_id, "2");
    assert_eq!(meta.resistance, Resistance::new(4.0).unwrap());
    assert_eq!(meta.temperature_f, 70.0);
    assert_eq!(meta.atm_pressure_psi, 14.7);
    assert_eq!(meta.dynamic_pressure_psf, 10.0);
    assert_eq!(meta.dynamic_pressure_unit.as_deref(), Some("psf"));
}

#[test]
fn run_name_accepts_fractional_and_short_circuit_resistors() {
    let fractional = parse_run_name("B1_.8_68.5_14.62_0.32 psf.csv").unwrap();
    assert_eq!(fractional.resistance.ohms(), 0.8);
    assert_eq!(fractional.dynamic_pressure_psf, 0.32);

    let shorted = parse_run_name("B3_0_68_14.6_0.32 psf.csv").unwrap();
    assert!(shorted.resistance.is_short_circuit());
}

#[test]
fn run_name_without_unit_suffix() {
    let meta = parse_run_name("B4_10_70_14.7_12.5.csv").unwrap();
    assert_eq!(meta.dynamic_pressure_psf, 12.5);
    assert_eq!(meta.dynamic_pressure_unit, None);
}

#[test]
fn run_name_reports_offending_field() {
    let cases = [
        ("B2_4_70_10 psf.csv", "file_name"),
        ("B_4_70_14.7_10 psf.csv", "blade"),
        ("B2_four_70_14.7_10 psf.csv", "resistor"),
        ("B2_-4_70_14.7_10 psf.csv", "resistor"),
        ("B2_4_warm_14.7_10 psf.csv", "temperature"),
        ("B2_4_70_high_10 psf.csv", "pressure"),
        ("B2_4_70_14.7_ten psf.csv", "dynamic_pressure"),
    ];

    for (name, expected) in cases {
        match parse_run_name(name) {
            Err(ParserError::FileName { field, .. }) => {
                assert_eq!(field, expected, "wrong field reported for {name}")
            }
            other => panic!("expected file name error for {name}, got {other:?}"),
        }
    }
}

#[test]
fn resistance_labels_and_short_circuit_substitution() {
    assert_eq!(Resistance::new(50.0).unwrap().to_string(), "50");
    assert_eq!(Resistance::new(0.8).unwrap().to_string(), "0.8");
    assert_eq!(Resistance::new(0.0).unwrap().to_string(), "0");

    let shorted = Resistance::new(0.0).unwrap();
    assert_eq!(shorted.effective_ohms(), 0.03);
    assert_eq!(Resistance::new(6.0).unwrap().effective_ohms(), 6.0);

    assert!(Resistance::new(f64::NAN).is_err());
    assert!(Resistance::try_from("").is_err());
}
