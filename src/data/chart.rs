//! Chart model: point series, axis scales and the builders that turn
//! matched log files into grid panels or the single-chart view.
//!
//! Everything here is plain data; the egui rendering lives in
//! `panels::chart_ui`.

use std::collections::HashSet;
use std::path::Path;

use egui::Color32;
use log::{debug, info};

use crate::data::csv_log::{parse_cell, LogTable};
use crate::data::graph_spec::{
    drives_secondary_axis, secondary_axis_title, single_view_color, GraphSpec, Scaling,
    GRAPH_SPECS, GRID_X_AXIS_TITLE, SINGLE_X_AXIS_TITLE,
};
use crate::error::LogPlotError;

/// Legend label of the placeholder drawn in panels without data.
pub const NO_DATA_LABEL: &str = "No Data";
/// Line width of every plotted series, in points.
pub const LINE_WIDTH: f32 = 2.0;
/// Fixed minor step of the grid X axis.
pub const GRID_X_MINOR_STEP: f64 = 5.0;

/// Bounds and tick spacing of one axis.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct AxisScale {
    pub min: f64,
    pub max: f64,
    pub major_step: f64,
    pub minor_step: f64,
}

impl AxisScale {
    pub fn new(min: f64, max: f64, major_step: f64, minor_step: f64) -> Self {
        Self {
            min,
            max,
            major_step,
            minor_step,
        }
    }

    /// Scale spanning `min..=max` with the log10 step rule and minor = major / 5.
    pub fn fitted(min: f64, max: f64) -> Self {
        let major = calculate_major_step(max - min);
        Self::new(min, max, major, major / 5.0)
    }

    /// Scale fitted to `values`; an empty or flat set is widened by one unit
    /// on each side so the axis keeps a non-zero span.
    pub fn fit_values<I: IntoIterator<Item = f64>>(values: I) -> Self {
        let (min, max) = values
            .into_iter()
            .filter(|v| v.is_finite())
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
                (lo.min(v), hi.max(v))
            });
        if !min.is_finite() || !max.is_finite() {
            return Self::fitted(-1.0, 1.0);
        }
        if max - min <= 0.0 {
            return Self::fitted(min - 1.0, max + 1.0);
        }
        Self::fitted(min, max)
    }

    pub fn range(&self) -> f64 {
        self.max - self.min
    }
}

/// X and Y scales of one rendered panel.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ChartState {
    pub x: AxisScale,
    pub y: AxisScale,
}

/// Tick step for an axis spanning `range`: the power of ten at or below the
/// range, divided by 5 when fewer than 2 steps fit and by 2 when fewer than 5 fit.
/// Non-positive or non-finite ranges yield 0.
pub fn calculate_major_step(range: f64) -> f64 {
    if !(range.is_finite() && range > 0.0) {
        return 0.0;
    }
    let mut step = 10f64.powi(range.log10().floor() as i32);
    if range / step < 2.0 {
        step /= 5.0;
    } else if range / step < 5.0 {
        step /= 2.0;
    }
    step
}

/// Grid X axis for a largest row offset `max_row`: `[0, ceil(max_row / 10) * 10]`,
/// a tenth of the span per major tick and a fixed minor step.
pub fn rounded_x_axis(max_row: f64) -> AxisScale {
    let max = (max_row / 10.0).ceil() * 10.0;
    AxisScale::new(0.0, max, max / 10.0, GRID_X_MINOR_STEP)
}

/// One plotted line.
#[derive(Clone, Debug, PartialEq)]
pub struct Series {
    /// Source column name; also the legend label.
    pub name: String,
    pub color: Color32,
    pub points: Vec<[f64; 2]>,
    /// `false` for repeats of a column already shown in the legend.
    pub legend_visible: bool,
    pub width: f32,
}

impl Series {
    fn new(name: &str, color: Color32, points: Vec<[f64; 2]>) -> Self {
        Self {
            name: name.to_string(),
            color,
            points,
            legend_visible: true,
            width: LINE_WIDTH,
        }
    }

    /// Invisible single point at the origin, keeping an empty panel drawable.
    pub fn no_data() -> Self {
        Self::new(NO_DATA_LABEL, Color32::TRANSPARENT, vec![[0.0, 0.0]])
    }

    pub fn is_placeholder(&self) -> bool {
        self.name == NO_DATA_LABEL && self.color == Color32::TRANSPARENT
    }
}

/// Tracks which legend labels have already been shown in one panel.
#[derive(Debug, Default)]
struct LegendDedup {
    seen: HashSet<String>,
}

impl LegendDedup {
    /// Marks `series` visible on the first occurrence of its name only.
    fn admit(&mut self, series: &mut Series) {
        series.legend_visible = self.seen.insert(series.name.clone());
    }
}

/// Right-hand axis labelled in the unit of an `APS_lsb` sensor column.
#[derive(Clone, Debug, PartialEq)]
pub struct SecondaryAxis {
    pub title: String,
    /// Observed min/max of the driving column; `None` until a value is seen.
    pub scale: Option<AxisScale>,
}

/// A fully built chart, ready to render.
#[derive(Clone, Debug)]
pub struct ChartPanel {
    pub title: String,
    pub x_title: String,
    pub y_title: String,
    pub series: Vec<Series>,
    pub secondary: Option<SecondaryAxis>,
    /// Current view, mutated by zoom interaction and synchronization.
    pub state: ChartState,
    /// View the panel was built with; restored by "Reset Zoom".
    pub initial: ChartState,
    pub has_data: bool,
}

impl ChartPanel {
    fn empty(title: &str, x_title: &str, y_title: &str) -> Self {
        Self {
            title: title.to_string(),
            x_title: x_title.to_string(),
            y_title: y_title.to_string(),
            series: Vec::new(),
            secondary: None,
            state: ChartState::default(),
            initial: ChartState::default(),
            has_data: false,
        }
    }

    /// Fix the current state as the initial one.
    fn settle(&mut self, state: ChartState) {
        self.state = state;
        self.initial = state;
    }

    pub fn reset_zoom(&mut self) {
        self.state = self.initial;
    }

    fn fitted_y(&self) -> AxisScale {
        AxisScale::fit_values(
            self.series
                .iter()
                .filter(|s| !s.is_placeholder())
                .flat_map(|s| s.points.iter().map(|p| p[1])),
        )
    }
}

/// Build one grid panel from the already-read `tables`.
///
/// Rows `1..line_count - 1` are plotted, so the final text line of each file
/// is never drawn. Unparseable cells plot as 0. Columns absent from a
/// file's header add nothing.
pub fn build_grid_panel(spec: &GraphSpec, tables: &[LogTable]) -> ChartPanel {
    let mut panel = ChartPanel::empty(spec.title, GRID_X_AXIS_TITLE, spec.y_axis_title);
    let mut legend = LegendDedup::default();
    let mut max_x = 0.0f64;
    let mut secondary_range: Option<(f64, f64)> = None;

    for table in tables {
        let mut file_max = 0.0f64;
        if table.line_count() > 1 {
            for column in spec.columns {
                let Some(index) = table.column_index(column.name) else {
                    debug!(
                        "{}: no column {} in {}",
                        spec.title,
                        column.name,
                        table.path.display()
                    );
                    continue;
                };
                let scaling = Scaling::for_column(column.name);
                let drives = drives_secondary_axis(column.name);
                let mut points = Vec::with_capacity(table.line_count());
                for line in 1..table.line_count() - 1 {
                    let raw = table
                        .cell(line, index)
                        .and_then(parse_cell)
                        .unwrap_or(0.0);
                    let value = scaling.apply(raw);
                    if drives {
                        secondary_range = Some(match secondary_range {
                            Some((lo, hi)) => (lo.min(value), hi.max(value)),
                            None => (value, value),
                        });
                    }
                    let x = (line - 1) as f64;
                    file_max = file_max.max(x);
                    points.push([x, value]);
                }
                if drives && panel.secondary.is_none() {
                    panel.secondary = secondary_axis_title(column.name).map(|t| SecondaryAxis {
                        title: t.to_string(),
                        scale: None,
                    });
                }
                let mut series = Series::new(column.name, column.color, points);
                legend.admit(&mut series);
                panel.series.push(series);
            }
        }
        panel.has_data |= file_max > 0.0;
        max_x = max_x.max(file_max);
    }

    if let (Some(axis), Some((lo, hi))) = (panel.secondary.as_mut(), secondary_range) {
        axis.scale = Some(AxisScale::fitted(lo, hi));
    }
    if !panel.has_data {
        panel.series.push(Series::no_data());
    }
    let state = ChartState {
        x: rounded_x_axis(max_x),
        y: panel.fitted_y(),
    };
    panel.settle(state);
    panel
}

/// Read every matched file once and build the twelve grid panels from them.
pub fn build_grid<P: AsRef<Path>>(files: &[P]) -> Result<Vec<ChartPanel>, LogPlotError> {
    let tables = files
        .iter()
        .map(|p| LogTable::read(p.as_ref()))
        .collect::<Result<Vec<_>, _>>()?;
    let panels: Vec<ChartPanel> = GRAPH_SPECS
        .iter()
        .map(|spec| build_grid_panel(spec, &tables))
        .collect();
    info!(
        "built {} panels from {} files ({} with data)",
        panels.len(),
        tables.len(),
        panels.iter().filter(|p| p.has_data).count()
    );
    Ok(panels)
}

/// Build the single-chart view for the `checked` columns.
///
/// Unlike the grid, rows `1..line_count` are plotted (the final line is
/// included) and unparseable cells are skipped instead of zeroed. A series
/// with no parsed points is dropped. The X axis follows the last file read
/// whenever at least one column is checked.
pub fn build_single_chart(tables: &[LogTable], checked: &[String], title: &str) -> ChartPanel {
    let mut panel = ChartPanel::empty(title, SINGLE_X_AXIS_TITLE, "");
    let mut legend = LegendDedup::default();
    let mut x_axis: Option<AxisScale> = None;

    for table in tables {
        for column in checked {
            if let Some(index) = table.column_index(column) {
                let scaling = Scaling::for_column(column);
                let points: Vec<[f64; 2]> = (1..table.line_count())
                    .filter_map(|line| {
                        let v = table.cell(line, index).and_then(parse_cell)?;
                        Some([(line - 1) as f64, scaling.apply(v)])
                    })
                    .collect();
                if !points.is_empty() {
                    let mut series = Series::new(column, single_view_color(column), points);
                    legend.admit(&mut series);
                    panel.series.push(series);
                }
            }
            let rows = table.line_count().saturating_sub(1) as f64;
            let max = (rows / 10.0).ceil() * 10.0;
            let major = max / 10.0;
            x_axis = Some(AxisScale::new(0.0, max, major, major / 5.0));
        }
    }

    panel.has_data = !panel.series.is_empty();
    let state = ChartState {
        x: x_axis.unwrap_or_else(|| rounded_x_axis(0.0)),
        y: panel.fitted_y(),
    };
    panel.settle(state);
    panel
}
