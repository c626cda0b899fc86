//! Fixed chart panel definitions and per-column rules.

use std::collections::HashMap;

use egui::Color32;
use once_cell::sync::Lazy;

/// X axis title of every grid panel.
pub const GRID_X_AXIS_TITLE: &str = "time (msec)";
/// X axis title of the single-chart view.
pub const SINGLE_X_AXIS_TITLE: &str = "Time (ms)";

/// .NET named colors used by the panel definitions.
pub mod colors {
    use egui::Color32;

    pub const ORANGE: Color32 = Color32::from_rgb(255, 165, 0);
    pub const BLUE: Color32 = Color32::from_rgb(0, 0, 255);
    pub const RED: Color32 = Color32::from_rgb(255, 0, 0);
    pub const GREEN: Color32 = Color32::from_rgb(0, 128, 0);
    pub const BLACK: Color32 = Color32::from_rgb(0, 0, 0);
    pub const DODGER_BLUE: Color32 = Color32::from_rgb(30, 144, 255);
    pub const BROWN: Color32 = Color32::from_rgb(165, 42, 42);
    pub const PINK: Color32 = Color32::from_rgb(255, 192, 203);
    pub const CYAN: Color32 = Color32::from_rgb(0, 255, 255);
    pub const PURPLE: Color32 = Color32::from_rgb(128, 0, 128);
    pub const LIME_GREEN: Color32 = Color32::from_rgb(50, 205, 50);
    pub const POWDER_BLUE: Color32 = Color32::from_rgb(176, 224, 230);
    pub const TEAL: Color32 = Color32::from_rgb(0, 128, 128);
    pub const MAROON: Color32 = Color32::from_rgb(128, 0, 0);
    pub const NAVY: Color32 = Color32::from_rgb(0, 0, 128);
    pub const DARK_ORANGE: Color32 = Color32::from_rgb(255, 140, 0);
    pub const DARK_BLUE: Color32 = Color32::from_rgb(0, 0, 139);
    pub const DEEP_PINK: Color32 = Color32::from_rgb(255, 20, 147);
}

use colors::*;

/// Value transform applied to a column before plotting.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Scaling {
    Raw,
    /// Raw 10-bit DAC code to driving current, 200 mA full scale.
    DacToMilliamp,
}

impl Scaling {
    /// Rule for a column, decided by substring of its name.
    pub fn for_column(name: &str) -> Self {
        if name.contains("current_DAC") {
            Scaling::DacToMilliamp
        } else {
            Scaling::Raw
        }
    }

    pub fn apply(self, value: f64) -> f64 {
        match self {
            Scaling::Raw => value,
            Scaling::DacToMilliamp => value * 200.0 / 1023.0,
        }
    }
}

/// Columns whose observed range drives a panel's secondary Y axis.
pub fn drives_secondary_axis(column: &str) -> bool {
    column.contains("APS_lsb")
}

/// Title of the secondary axis driven by `column`, by actuator.
pub fn secondary_axis_title(column: &str) -> Option<&'static str> {
    if column.contains("OISX") {
        Some("OISX Laser pos (um)")
    } else if column.contains("OISY") {
        Some("OISY Laser pos (um)")
    } else if column.contains("AF") {
        Some("AF Laser pos (um)")
    } else {
        None
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColumnSpec {
    /// Exact CSV header name.
    pub name: &'static str,
    pub color: Color32,
}

const fn col(name: &'static str, color: Color32) -> ColumnSpec {
    ColumnSpec { name, color }
}

/// One grid panel: title, Y axis title and source columns in legend order.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GraphSpec {
    pub title: &'static str,
    pub y_axis_title: &'static str,
    pub columns: &'static [ColumnSpec],
}

impl GraphSpec {
    pub fn has_secondary_axis(&self) -> bool {
        self.columns.iter().any(|c| drives_secondary_axis(c.name))
    }

    pub fn by_title(title: &str) -> Option<&'static GraphSpec> {
        GRAPH_SPECS.iter().find(|s| s.title == title)
    }
}

/// Number of panels in the grid.
pub const GRID_PANELS: usize = 12;
pub const GRID_ROWS: usize = 4;
pub const GRID_COLUMNS: usize = 3;

/// The grid panels in row-major order.
pub static GRAPH_SPECS: [GraphSpec; GRID_PANELS] = [
    GraphSpec {
        title: "OISX current",
        y_axis_title: "OISX driving current (mA)",
        columns: &[col("OISX_current_DAC", ORANGE)],
    },
    GraphSpec {
        title: "OISY Current",
        y_axis_title: "OISY driving current (mA)",
        columns: &[col("OISY_current_DAC", ORANGE)],
    },
    GraphSpec {
        title: "AF Current",
        y_axis_title: "AF driving current (mA)",
        columns: &[col("AF_current_DAC", ORANGE)],
    },
    GraphSpec {
        title: "OISX Cmd, FW Pos, LaserPos",
        y_axis_title: "OISX positions",
        columns: &[
            col("OISX_command_um", BLUE),
            col("OIS_X", RED),
            col("Laser_OIS_X_um", GREEN),
        ],
    },
    GraphSpec {
        title: "OISY Cmd, FW Pos, LaserPos",
        y_axis_title: "OISY positions",
        columns: &[
            col("OISY_command_um", BLUE),
            col("OIS_Y", RED),
            col("Laser_OIS_Y_um", GREEN),
        ],
    },
    GraphSpec {
        title: "AF Cmd, FW Pos, LaserPos",
        y_axis_title: "AF positions",
        columns: &[
            col("AF_command_um", BLUE),
            col("AF_Z", RED),
            col("Laser_AF_Z_um", GREEN),
        ],
    },
    GraphSpec {
        title: "OISX Sensors",
        y_axis_title: "OISX sensor (LSB)",
        columns: &[col("OISX_APS_lsb", BLUE), col("Laser_OIS_X_um", GREEN)],
    },
    GraphSpec {
        title: "OISY Sensors",
        y_axis_title: "OISY sensor (LSB)",
        columns: &[col("OISY_APS_lsb", BLUE), col("Laser_OIS_Y_um", GREEN)],
    },
    GraphSpec {
        title: "AF Sensors",
        y_axis_title: "AF sensor (LSB)",
        columns: &[col("AF_APS_lsb", BLUE), col("Laser_AF_Z_um", GREEN)],
    },
    GraphSpec {
        title: "FW Positions",
        y_axis_title: "Linear FW Pos (um)",
        columns: &[col("OIS_X", RED), col("OIS_Y", RED), col("AF_Z", RED)],
    },
    GraphSpec {
        title: "Temp NTC vs Temp INT",
        y_axis_title: "Temperature (degC)",
        columns: &[col("NTC_Temp", BLUE), col("INT_Temp", RED)],
    },
    GraphSpec {
        title: "AF Laser TiltX vs AF Laser TiltY",
        y_axis_title: "",
        columns: &[
            col("Laser_AF_TiltX_min", GREEN),
            col("Laser_AF_TiltY_min", RED),
        ],
    },
];

/// Columns offered by the single-chart view, in checklist order.
pub const SINGLE_VIEW_COLUMNS: [&str; 22] = [
    "AF_current_DAC",
    "OISX_current_DAC",
    "OISY_current_DAC",
    "Laser_AF_Z_um",
    "Laser_OIS_X_um",
    "Laser_OIS_Y_um",
    "Laser_AF_TiltX_min",
    "Laser_AF_TiltY_min",
    "AF_command_um",
    "OISX_command_um",
    "OISY_command_um",
    "AF_APS_lsb",
    "OISX_APS_lsb",
    "OISY_APS_lsb",
    "NTC_Temp",
    "INT_Temp",
    "b1_coil_res",
    "b2_coil_res",
    "b3_coil_res",
    "OIS_X",
    "OIS_Y",
    "AF_Z",
];

static SINGLE_VIEW_COLORS: Lazy<HashMap<&'static str, Color32>> = Lazy::new(|| {
    HashMap::from([
        ("AF_current_DAC", BLUE),
        ("OISX_current_DAC", RED),
        ("OISY_current_DAC", GREEN),
        ("Laser_AF_Z_um", ORANGE),
        ("Laser_OIS_X_um", DODGER_BLUE),
        ("Laser_OIS_Y_um", BROWN),
        ("Laser_AF_TiltX_min", PINK),
        ("Laser_AF_TiltY_min", CYAN),
        ("AF_command_um", PURPLE),
        ("OISX_command_um", LIME_GREEN),
        ("OISY_command_um", POWDER_BLUE),
        ("AF_APS_lsb", TEAL),
        ("OISX_APS_lsb", MAROON),
        ("OISY_APS_lsb", NAVY),
        ("NTC_Temp", BLUE),
        ("INT_Temp", RED),
        ("b1_coil_res", GREEN),
        ("b2_coil_res", ORANGE),
        ("b3_coil_res", PURPLE),
        ("OIS_X", DARK_ORANGE),
        ("OIS_Y", DARK_BLUE),
        ("AF_Z", DEEP_PINK),
    ])
});

/// Line color of `column` in the single-chart view (black if unknown).
pub fn single_view_color(column: &str) -> Color32 {
    SINGLE_VIEW_COLORS.get(column).copied().unwrap_or(BLACK)
}
