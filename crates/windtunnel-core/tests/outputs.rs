use std::fs;

use windtunnel_core::outputs::{
    combine_output_tables, export_output_table, project_performance, read_output_table,
    write_combined, OutputRow, OutputTable,
};
use windtunnel_core::plot::{render_performance_plot, PerformanceFacets};
use windtunnel_core::{BladeDesign, Configuration, PipelineError, Resistance, SkewAngle};

fn row(blade_id: &str, ohms: f64, tsr: f64, cp: f64) -> OutputRow {
    OutputRow {
        blade_id: blade_id.to_string(),
        resistance: Resistance::new(ohms).unwrap(),
        dynamic_pressure_psf: 10.0,
        velocity_m_s: 28.252_064_269_882_08,
        radians_per_second: 130.899_693_75,
        tip_speed_ratio: tsr,
        coefficient_power: cp,
    }
}

fn table(blade: BladeDesign, skew: SkewAngle, rows: Vec<OutputRow>) -> OutputTable {
    OutputTable::new(Configuration::new(blade, skew), rows)
}

#[test]
fn exported_table_reads_back_unchanged() {
    let dir = tempfile::tempdir().unwrap();
    let original = table(
        BladeDesign::That,
        SkewAngle::Ten,
        vec![
            row("2", 4.0, 0.753_834_479_834_060_2, 0.005_555_852_553_474_436),
            row("2", 0.8, 0.61, 0.021),
            row("3", 0.0, 0.12, 0.3),
        ],
    );

    let path = export_output_table(&original, &dir.path().join("out")).unwrap();
    assert!(path.ends_with("THAT10Output.csv"));

    let header = fs::read_to_string(&path).unwrap();
    assert!(header.starts_with(
        "index,blade#,resistor_type,dynamic_pressure(lb/sqft),velocity(m/s),radians/sec,tip_speed_ratio,coefficient_power"
    ));

    let lines: Vec<&str> = header.lines().collect();
    assert!(lines[1].starts_with("0,2,4,"));
    assert!(lines[2].starts_with("1,2,0.8,"));
    assert!(lines[3].starts_with("2,3,0,"));

    let rows = read_output_table(&path).unwrap();
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0].blade_id, "2");
    assert_eq!(rows[1].resistance, Resistance::new(0.8).unwrap());
    assert_eq!(rows[2].resistance, Resistance::new(0.0).unwrap());
    for (read, written) in rows.iter().zip(original.rows()) {
        assert!((read.tip_speed_ratio - written.tip_speed_ratio).abs() < 1e-12);
        assert!((read.coefficient_power - written.coefficient_power).abs() < 1e-12);
        assert!((read.velocity_m_s - written.velocity_m_s).abs() < 1e-12);
    }
}

#[test]
fn empty_table_exports_header_only() {
    let dir = tempfile::tempdir().unwrap();
    let empty = table(BladeDesign::QBlade, SkewAngle::Zero, Vec::new());

    let path = export_output_table(&empty, dir.path()).unwrap();
    assert!(read_output_table(&path).unwrap().is_empty());
}

#[test]
fn combined_frame_is_tagged_by_configuration() {
    let tables = [
        table(
            BladeDesign::QBlade,
            SkewAngle::Zero,
            vec![row("1", 4.0, 0.8, 0.02), row("1", 2.0, 0.6, 0.03)],
        ),
        table(BladeDesign::That, SkewAngle::Twenty, vec![row("2", 4.0, 0.7, 0.01)]),
    ];

    let combined = combine_output_tables(&tables).unwrap();
    assert_eq!(combined.height(), 3);

    let blades = combined.column("blade_design").unwrap().str().unwrap();
    assert_eq!(blades.get(0), Some("QBlade"));
    assert_eq!(blades.get(2), Some("THAT"));
    let skews = combined.column("skew_angle").unwrap().u32().unwrap();
    assert_eq!(skews.get(1), Some(0));
    assert_eq!(skews.get(2), Some(20));

    let projected = project_performance(&combined).unwrap();
    assert_eq!(projected.width(), 4);
    let tsr = projected.column("tip_speed_ratio").unwrap().f64().unwrap();
    assert_eq!(tsr.get(2), Some(0.7));

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("combined.csv");
    write_combined(&combined, &path).unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap().lines().count(), 4);
}

#[test]
fn facets_group_by_skew_then_blade_sorted_by_tsr() {
    let tables = [
        table(
            BladeDesign::That,
            SkewAngle::Ten,
            vec![row("2", 4.0, 0.9, 0.02), row("2", 2.0, 0.3, 0.05)],
        ),
        table(BladeDesign::QBlade, SkewAngle::Zero, vec![row("1", 4.0, 0.8, 0.02)]),
        table(
            BladeDesign::QBlade,
            SkewAngle::Ten,
            vec![row("1", 4.0, 0.5, 0.04), row("1", 0.0, 0.1, 0.06)],
        ),
    ];
    let combined = combine_output_tables(&tables).unwrap();
    let facets = PerformanceFacets::from_frame(&project_performance(&combined).unwrap()).unwrap();

    let skews: Vec<u32> = facets.facets.iter().map(|facet| facet.skew_angle).collect();
    assert_eq!(skews, [0, 10]);

    let ten = &facets.facets[1];
    let designs: Vec<&str> = ten
        .series
        .iter()
        .map(|series| series.blade_design.as_str())
        .collect();
    assert_eq!(designs, ["QBlade", "THAT"]);
    assert_eq!(ten.series[1].points, [(0.3, 0.05), (0.9, 0.02)]);
    assert_eq!(ten.series[0].points, [(0.1, 0.06), (0.5, 0.04)]);
}

#[test]
fn plotting_nothing_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = render_performance_plot(&PerformanceFacets::default(), &dir.path().join("p.png"))
        .unwrap_err();
    assert!(matches!(err, PipelineError::Plot(_)));
}

#[test]
fn renders_one_panel_per_skew_angle() {
    let tables = [
        table(
            BladeDesign::QBlade,
            SkewAngle::Zero,
            vec![row("1", 4.0, 0.8, 0.02), row("1", 2.0, 0.6, 0.03)],
        ),
        table(BladeDesign::That, SkewAngle::Zero, vec![row("2", 4.0, 0.7, 0.01)]),
        table(
            BladeDesign::That,
            SkewAngle::Twenty,
            vec![row("2", 4.0, 0.5, 0.04), row("2", 0.0, 0.1, 0.06)],
        ),
    ];
    let combined = combine_output_tables(&tables).unwrap();
    let facets = PerformanceFacets::from_frame(&project_performance(&combined).unwrap()).unwrap();
    assert_eq!(facets.facets.len(), 2);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("performance.png");
    render_performance_plot(&facets, &path).expect("plot rendered");

    let written = fs::metadata(&path).unwrap();
    assert!(written.len() > 0);
}
