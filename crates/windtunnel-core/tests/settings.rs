use std::path::PathBuf;

use windtunnel_core::settings::Settings;
use windtunnel_core::{BladeDesign, Configuration, PipelineError, SkewAngle};

const SAMPLE: &str = r#"
oscilloscope_root = "/data/scope"
balance_root = "/data/balance"
output_dir = "/data/out"
plot_path = "performance.png"

[[test_matrix]]
blade_design = "QBlade"
skew_angle = 0
resistances = [50, 25, 10]
"#;

#[test]
fn parses_settings_with_defaults() {
    let settings = Settings::from_toml_str(SAMPLE).expect("settings parse");

    assert_eq!(settings.output_dir, PathBuf::from("/data/out"));
    assert_eq!(settings.plot_path, Some(PathBuf::from("performance.png")));
    assert_eq!(settings.oscilloscope_dir_template, "MAE{blade}{skew}Degree(pt32psf)");
    assert_eq!(settings.balance_dir_template, "20 Deg {blade} {skew} skew 0.32PSF");
}

#[test]
fn expands_directory_templates_per_configuration() {
    let settings = Settings::from_toml_str(SAMPLE).unwrap();
    let configuration = Configuration::new(BladeDesign::That, SkewAngle::Twenty);

    assert_eq!(
        settings.oscilloscope_dir(configuration),
        PathBuf::from("/data/scope/MAETHAT20Degree(pt32psf)")
    );
    assert_eq!(
        settings.balance_dir(configuration),
        PathBuf::from("/data/balance/20 Deg THAT 20 skew 0.32PSF")
    );
    assert_eq!(
        settings.output_path(configuration),
        PathBuf::from("/data/out/THAT20Output.csv")
    );
}

#[test]
fn overrides_replace_standard_sweeps() {
    let settings = Settings::from_toml_str(SAMPLE).unwrap();
    let matrix = settings.test_matrix().unwrap();

    let overridden = matrix
        .lookup(Configuration::new(BladeDesign::QBlade, SkewAngle::Zero))
        .unwrap();
    assert_eq!(overridden.label_count(), 4);

    let untouched = matrix
        .lookup(Configuration::new(BladeDesign::QBlade, SkewAngle::Twenty))
        .unwrap();
    assert_eq!(untouched.label_count(), 20);
}

#[test]
fn invalid_override_is_a_settings_error() {
    let content = r#"
oscilloscope_root = "a"
balance_root = "b"
output_dir = "c"

[[test_matrix]]
blade_design = "THAT"
skew_angle = 10
resistances = [4, 4]
"#;
    let err = Settings::from_toml_str(content).unwrap_err();
    assert!(matches!(err, PipelineError::Settings(_)));
}

#[test]
fn unknown_keys_and_skews_are_rejected() {
    let unknown_key = "oscilloscope_root = \"a\"\nbalance_root = \"b\"\noutput_dir = \"c\"\nextra = 1\n";
    assert!(matches!(
        Settings::from_toml_str(unknown_key).unwrap_err(),
        PipelineError::Toml(_)
    ));

    let bad_skew = r#"
oscilloscope_root = "a"
balance_root = "b"
output_dir = "c"

[[test_matrix]]
blade_design = "THAT"
skew_angle = 15
resistances = [4]
"#;
    assert!(Settings::from_toml_str(bad_skew).is_err());
}

#[test]
fn missing_settings_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = Settings::load(&dir.path().join("absent.toml")).unwrap_err();
    assert!(err.is_file_read());
    assert!(matches!(err, PipelineError::Io { .. }));
}
