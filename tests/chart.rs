use egui::Color32;

use logplot::data::chart::{
    build_grid, build_grid_panel, build_single_chart, calculate_major_step, rounded_x_axis,
    NO_DATA_LABEL,
};
use logplot::data::csv_log::LogTable;
use logplot::data::graph_spec::{colors, GraphSpec, Scaling, GRAPH_SPECS, GRID_PANELS};
use logplot::LogPlotError;

fn spec(title: &str) -> &'static GraphSpec {
    GraphSpec::by_title(title).unwrap()
}

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn twelve_fixed_panels() {
    assert_eq!(GRAPH_SPECS.len(), GRID_PANELS);
    assert!(GRAPH_SPECS.iter().all(|s| (1..=3).contains(&s.columns.len())));
    let secondary: Vec<_> = GRAPH_SPECS
        .iter()
        .filter(|s| s.has_secondary_axis())
        .map(|s| s.title)
        .collect();
    assert_eq!(secondary, vec!["OISX Sensors", "OISY Sensors", "AF Sensors"]);
}

#[test]
fn dac_columns_scale_to_milliamps() {
    let s = Scaling::for_column("OISX_current_DAC");
    assert_eq!(s, Scaling::DacToMilliamp);
    assert_eq!(s.apply(1023.0), 200.0);
    assert_eq!(s.apply(0.0), 0.0);
    assert_eq!(Scaling::for_column("OIS_X").apply(1023.0), 1023.0);
}

#[test]
fn x_axis_rounds_up_to_tens() {
    let x = rounded_x_axis(96.0);
    assert_eq!((x.min, x.max, x.major_step, x.minor_step), (0.0, 100.0, 10.0, 5.0));
    let exact = rounded_x_axis(100.0);
    assert_eq!(exact.max, 100.0);
}

#[test]
fn major_step_follows_log10_rule() {
    assert!(approx(calculate_major_step(30.0), 5.0));
    assert!(approx(calculate_major_step(1.0), 0.2));
    assert!(approx(calculate_major_step(4.5), 0.5));
    assert!(approx(calculate_major_step(800.0), 100.0));
}

#[test]
fn grid_excludes_last_line_and_zeroes_bad_cells() {
    let t = LogTable::from_text("OISX_current_DAC\n1023\n0\nabc\n511\n");
    let p = build_grid_panel(spec("OISX current"), &[t]);
    assert_eq!(p.series.len(), 1);
    let s = &p.series[0];
    assert_eq!(s.name, "OISX_current_DAC");
    assert_eq!(s.color, colors::ORANGE);
    assert_eq!(s.points, vec![[0.0, 200.0], [1.0, 0.0], [2.0, 0.0]]);
    assert!(p.has_data);
    assert_eq!(p.state.x.max, 10.0);
    assert_eq!(p.state.x.major_step, 1.0);
    assert_eq!(p.state.x.minor_step, 5.0);
    assert_eq!(p.x_title, "time (msec)");
    assert_eq!(p.y_title, "OISX driving current (mA)");
}

#[test]
fn grid_x_axis_for_ninety_seven_offsets() {
    let mut text = String::from("OIS_X\n");
    for i in 0..98 {
        text.push_str(&format!("{i}\n"));
    }
    let p = build_grid_panel(spec("FW Positions"), &[LogTable::from_text(&text)]);
    assert_eq!(p.series[0].points.len(), 97);
    assert_eq!(p.series[0].points.last(), Some(&[96.0, 96.0]));
    assert_eq!(p.state.x.max, 100.0);
    assert_eq!(p.state.x.major_step, 10.0);
}

#[test]
fn secondary_axis_tracks_sensor_range() {
    let t = LogTable::from_text("OISX_APS_lsb,Laser_OIS_X_um\n10,1\n40,2\n25,3\n99,4\n");
    let p = build_grid_panel(spec("OISX Sensors"), &[t]);
    let axis = p.secondary.expect("secondary axis");
    assert_eq!(axis.title, "OISX Laser pos (um)");
    let scale = axis.scale.expect("observed range");
    assert_eq!((scale.min, scale.max), (10.0, 40.0));
    assert!(approx(scale.major_step, 5.0));
    assert!(approx(scale.minor_step, 1.0));
}

#[test]
fn repeated_columns_are_hidden_from_legend() {
    let text = "OIS_X,OIS_Y,AF_Z\n1,2,3\n4,5,6\n7,8,9\n";
    let tables = [LogTable::from_text(text), LogTable::from_text(text)];
    let p = build_grid_panel(spec("FW Positions"), &tables);
    let visible: Vec<bool> = p.series.iter().map(|s| s.legend_visible).collect();
    assert_eq!(visible, vec![true, true, true, false, false, false]);
}

#[test]
fn empty_panel_gets_transparent_placeholder() {
    let header_only = LogTable::from_text("OIS_X\n");
    let p = build_grid_panel(spec("OISX current"), &[header_only]);
    assert!(!p.has_data);
    assert_eq!(p.series.len(), 1);
    assert_eq!(p.series[0].name, NO_DATA_LABEL);
    assert_eq!(p.series[0].color, Color32::TRANSPARENT);
    assert_eq!(p.title, "OISX current");

    let none = build_grid_panel(spec("AF Current"), &[]);
    assert!(none.series[0].is_placeholder());
}

#[test]
fn missing_columns_contribute_nothing() {
    let t = LogTable::from_text("Other\n1\n2\n3\n4\n");
    let p = build_grid_panel(spec("Temp NTC vs Temp INT"), &[t]);
    assert!(!p.has_data);
    assert_eq!(p.series.len(), 1);
    assert!(p.series[0].is_placeholder());

    let partial = LogTable::from_text("INT_Temp\n20\n21\n22\n23\n");
    let q = build_grid_panel(spec("Temp NTC vs Temp INT"), &[partial]);
    assert_eq!(q.series.len(), 1);
    assert_eq!(q.series[0].name, "INT_Temp");
    assert_eq!(q.series[0].color, colors::RED);
}

#[test]
fn grid_y_axis_fits_data_and_initial_state_is_kept() {
    let t = LogTable::from_text("NTC_Temp,INT_Temp\n20,30\n25,35\n40,22\nx,x\n");
    let mut p = build_grid_panel(spec("Temp NTC vs Temp INT"), &[t]);
    assert_eq!((p.state.y.min, p.state.y.max), (20.0, 40.0));
    assert!(approx(p.state.y.major_step, 5.0));
    assert_eq!(p.state, p.initial);

    p.state.x.max = 3.0;
    p.reset_zoom();
    assert_eq!(p.state, p.initial);
}

#[test]
fn build_grid_reads_files_and_reports_unreadable_ones() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("L_1_2_T1_B1_run.csv");
    std::fs::write(&file, "AF_current_DAC,AF_Z\n1023,1\n1023,2\n1023,3\n0,4\n").unwrap();

    let panels = build_grid(&[&file]).unwrap();
    assert_eq!(panels.len(), GRID_PANELS);
    assert!(panels[2].has_data);
    assert_eq!(panels[2].series[0].points[0], [0.0, 200.0]);
    assert!(!panels[0].has_data);

    let missing = dir.path().join("gone.csv");
    let err = build_grid(&[&file, &missing]).unwrap_err();
    assert!(matches!(err, LogPlotError::ReadLog { ref path, .. } if path == &missing));
}

#[test]
fn single_view_includes_last_line_and_skips_bad_cells() {
    let t = LogTable::from_text("AF_Z,OIS_X,OISY_current_DAC\n1,a,1023\n2,5,0\n3,6,1023\n");
    let checked = vec!["AF_Z".to_string(), "OIS_X".to_string(), "OISY_current_DAC".to_string()];
    let p = build_single_chart(&[t], &checked, "B1 / run");

    assert_eq!(p.title, "B1 / run");
    assert_eq!(p.x_title, "Time (ms)");
    assert_eq!(p.y_title, "");
    assert_eq!(p.series.len(), 3);
    assert_eq!(p.series[0].points, vec![[0.0, 1.0], [1.0, 2.0], [2.0, 3.0]]);
    assert_eq!(p.series[0].color, colors::DEEP_PINK);
    assert_eq!(p.series[1].points, vec![[1.0, 5.0], [2.0, 6.0]]);
    assert_eq!(p.series[1].color, colors::DARK_ORANGE);
    assert_eq!(p.series[2].points[0], [0.0, 200.0]);
    assert_eq!(p.state.x.max, 10.0);
    assert_eq!(p.state.x.major_step, 1.0);
    assert!(approx(p.state.x.minor_step, 0.2));
}

#[test]
fn single_view_x_axis_follows_last_file() {
    let short = LogTable::from_text("AF_Z\n1\n2\n");
    let mut long_text = String::from("AF_Z\n");
    for i in 0..25 {
        long_text.push_str(&format!("{i}\n"));
    }
    let long = LogTable::from_text(&long_text);
    let checked = vec!["AF_Z".to_string()];

    let p = build_single_chart(&[short.clone(), long.clone()], &checked, "t");
    assert_eq!(p.state.x.max, 30.0);
    assert!(approx(p.state.x.major_step, 3.0));
    assert_eq!(
        p.series.iter().map(|s| s.legend_visible).collect::<Vec<_>>(),
        vec![true, false]
    );

    let q = build_single_chart(&[long, short], &checked, "t");
    assert_eq!(q.state.x.max, 10.0);
}

#[test]
fn single_view_with_nothing_checked_is_empty() {
    let t = LogTable::from_text("AF_Z\n1\n2\n");
    let p = build_single_chart(&[t], &[], "t");
    assert!(p.series.is_empty());
    assert!(!p.has_data);

    let missing = LogTable::from_text("AF_Z\n1\n2\n");
    let q = build_single_chart(&[missing], &["b1_coil_res".to_string()], "t");
    assert!(q.series.is_empty());
    assert_eq!(q.state.x.max, 10.0);
}
