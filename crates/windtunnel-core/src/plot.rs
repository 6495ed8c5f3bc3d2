use std::collections::BTreeMap;
use std::fmt;
use std::ops::Range;
use std::path::Path;

use plotters::prelude::*;
use polars::prelude::DataFrame;
use tracing::info;

use crate::error::{PipelineError, Result};
use crate::outputs::{
    BLADE_DESIGN_COLUMN, COEFFICIENT_POWER_COLUMN, SKEW_ANGLE_COLUMN, TIP_SPEED_RATIO_COLUMN,
};

const PANEL_WIDTH: u32 = 640;
const PLOT_HEIGHT: u32 = 520;
const FONT_SIZE_CHART_TITLE: i32 = 22;
const FONT_SIZE_AXIS_LABEL: i32 = 14;
const FONT_SIZE_LEGEND: i32 = 14;
const LINE_WIDTH: u32 = 2;
const MARKER_SIZE: u32 = 4;

// seaborn "deep"
const PALETTE: [RGBColor; 6] = [
    RGBColor(76, 114, 176),
    RGBColor(221, 132, 82),
    RGBColor(85, 168, 104),
    RGBColor(196, 78, 82),
    RGBColor(129, 114, 179),
    RGBColor(147, 120, 96),
];

/// Tip-speed ratio against coefficient of power for one blade design.
#[derive(Debug, Clone, PartialEq)]
pub struct PerformanceSeries {
    pub blade_design: String,
    pub points: Vec<(f64, f64)>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PerformanceFacet {
    pub skew_angle: u32,
    pub series: Vec<PerformanceSeries>,
}

/// Performance curves grouped by skew angle, then blade design.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PerformanceFacets {
    pub facets: Vec<PerformanceFacet>,
}

impl PerformanceFacets {
    /// Groups a frame carrying `blade_design`, `skew_angle`, `tip_speed_ratio`
    /// and `coefficient_power`. Rows with a null in any of them are skipped.
    pub fn from_frame(df: &DataFrame) -> Result<Self> {
        let blades = df.column(BLADE_DESIGN_COLUMN)?.str()?;
        let skews = df.column(SKEW_ANGLE_COLUMN)?.u32()?;
        let tsr = df.column(TIP_SPEED_RATIO_COLUMN)?.f64()?;
        let cp = df.column(COEFFICIENT_POWER_COLUMN)?.f64()?;

        let mut grouped: BTreeMap<u32, BTreeMap<String, Vec<(f64, f64)>>> = BTreeMap::new();
        let rows = blades
            .into_iter()
            .zip(skews)
            .zip(tsr)
            .zip(cp)
            .map(|(((blade, skew), tsr), cp)| (blade, skew, tsr, cp));

        for row in rows {
            if let (Some(blade), Some(skew), Some(tsr), Some(cp)) = row {
                grouped
                    .entry(skew)
                    .or_default()
                    .entry(blade.to_string())
                    .or_default()
                    .push((tsr, cp));
            }
        }

        let facets = grouped
            .into_iter()
            .map(|(skew_angle, by_blade)| PerformanceFacet {
                skew_angle,
                series: by_blade
                    .into_iter()
                    .map(|(blade_design, mut points)| {
                        points.sort_by(|a, b| a.0.total_cmp(&b.0));
                        PerformanceSeries {
                            blade_design,
                            points,
                        }
                    })
                    .collect(),
            })
            .collect();

        Ok(Self { facets })
    }

    pub fn is_empty(&self) -> bool {
        self.facets.is_empty()
    }

    /// Blade designs in first-seen order, so colours stay stable across panels.
    fn blade_designs(&self) -> Vec<&str> {
        let mut designs: Vec<&str> = Vec::new();
        for series in self.facets.iter().flat_map(|facet| &facet.series) {
            if !designs.contains(&series.blade_design.as_str()) {
                designs.push(&series.blade_design);
            }
        }
        designs
    }
}

/// Pads a data range by 15%, or by a fixed amount when it is degenerate.
fn padded_range(values: impl Iterator<Item = f64>) -> Range<f64> {
    let (min, max) = values
        .filter(|value| value.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), value| {
            (min.min(value), max.max(value))
        });
    if !min.is_finite() || !max.is_finite() {
        return 0.0..1.0;
    }
    let span = max - min;
    let padding = if span < 1e-6 { 0.5 } else { span * 0.15 };
    (min - padding)..(max + padding)
}

fn plot_error(err: impl fmt::Display) -> PipelineError {
    PipelineError::Plot(err.to_string())
}

/// Draws one panel per skew angle side by side into a PNG at `path`.
pub fn render_performance_plot(facets: &PerformanceFacets, path: &Path) -> Result<()> {
    if facets.is_empty() {
        return Err(PipelineError::Plot("no performance data to plot".to_string()));
    }

    let designs = facets.blade_designs();
    let color_of = |design: &str| {
        let idx = designs.iter().position(|d| *d == design).unwrap_or(0);
        PALETTE[idx % PALETTE.len()]
    };

    let points = || facets.facets.iter().flat_map(|f| &f.series).flat_map(|s| &s.points);
    let x_range = padded_range(points().map(|p| p.0));
    let y_range = padded_range(points().map(|p| p.1));

    let panels = facets.facets.len();
    let root = BitMapBackend::new(path, (PANEL_WIDTH * panels as u32, PLOT_HEIGHT))
        .into_drawing_area();
    root.fill(&WHITE).map_err(plot_error)?;
    let areas = root.margin(10, 10, 10, 10).split_evenly((1, panels));

    for (area, facet) in areas.iter().zip(&facets.facets) {
        let mut chart = ChartBuilder::on(area)
            .caption(
                format!("Skew Angle: {}", facet.skew_angle),
                ("sans-serif", FONT_SIZE_CHART_TITLE),
            )
            .margin(5)
            .x_label_area_size(50)
            .y_label_area_size(60)
            .build_cartesian_2d(x_range.clone(), y_range.clone())
            .map_err(plot_error)?;

        chart
            .configure_mesh()
            .x_desc("Tip Speed Ratio")
            .y_desc("Coefficient of Power")
            .light_line_style(WHITE.mix(0.7))
            .label_style(("sans-serif", FONT_SIZE_AXIS_LABEL))
            .draw()
            .map_err(plot_error)?;

        for series in &facet.series {
            let color = color_of(&series.blade_design);
            chart
                .draw_series(LineSeries::new(
                    series.points.iter().copied(),
                    color.stroke_width(LINE_WIDTH),
                ))
                .map_err(plot_error)?
                .label(series.blade_design.as_str())
                .legend(move |(x, y)| {
                    PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(LINE_WIDTH))
                });
            chart
                .draw_series(
                    series
                        .points
                        .iter()
                        .map(|point| Circle::new(*point, MARKER_SIZE, color.filled())),
                )
                .map_err(plot_error)?;
        }

        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .label_font(("sans-serif", FONT_SIZE_LEGEND))
            .draw()
            .map_err(plot_error)?;
    }

    root.present().map_err(plot_error)?;
    info!(path = %path.display(), panels, "performance plot written");
    Ok(())
}
