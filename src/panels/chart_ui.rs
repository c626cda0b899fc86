use std::hash::Hash;

use egui::{PointerButton, RichText, Ui};
use egui_plot::{
    log_grid_spacer, uniform_grid_spacer, AxisHints, GridInput, GridMark, HPlacement, Legend,
    Line, Plot,
};

use crate::config::FeatureFlags;
use crate::data::chart::{AxisScale, ChartPanel, SecondaryAxis};
use crate::data::zoom::ZoomState;

/// A user zoom or pan on one chart: bounds before and after.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ZoomEvent {
    pub old: ZoomState,
    pub new: ZoomState,
}

/// Draw `panel` with its current [`ChartState`](crate::data::chart::ChartState)
/// as the view. Returns the resulting bounds when the user zoomed or panned
/// this frame; the caller decides how to apply them.
pub fn show_chart(
    ui: &mut Ui,
    id: impl Hash,
    panel: &ChartPanel,
    features: &FeatureFlags,
) -> Option<ZoomEvent> {
    ui.vertical_centered(|ui| {
        ui.label(RichText::new(&panel.title).strong());
    });

    let state = panel.state;
    let (x_lo, x_hi) = drawable(state.x);
    let (y_lo, y_hi) = drawable(state.y);

    let mut plot = Plot::new(id)
        .allow_scroll(false)
        .allow_zoom(false)
        .allow_boxed_zoom(true)
        .allow_double_click_reset(false)
        .show_grid(features.grid)
        .show_x(features.point_values)
        .show_y(features.point_values)
        .x_axis_label(panel.x_title.clone())
        .x_grid_spacer(tick_spacer(state.x))
        .x_axis_formatter(|x, _range| format!("{:.0}", x.value));

    plot = match &panel.secondary {
        Some(secondary) => plot.custom_y_axes(vec![
            AxisHints::new_y().label(panel.y_title.clone()),
            secondary_axis(secondary),
        ]),
        None => plot.y_axis_label(panel.y_title.clone()),
    };
    if features.legend {
        plot = plot.legend(Legend::default());
    }

    let plot_resp = plot.show(ui, |plot_ui| {
        let resp = plot_ui.response();
        let is_zooming_rect = resp.drag_stopped_by(PointerButton::Secondary);
        let is_panning = resp.dragged_by(PointerButton::Primary) && resp.is_pointer_button_down_on();
        let scroll = resp.ctx.input(|i| i.raw_scroll_delta);
        let is_zooming_with_wheel = scroll.y != 0.0 && resp.hovered();

        let bounds_changed = is_zooming_rect || is_panning || is_zooming_with_wheel;

        if is_zooming_with_wheel {
            let factor = 1.0 + scroll.y * 0.001;
            plot_ui.zoom_bounds_around_hovered(egui::Vec2::splat(factor));
        }
        if !bounds_changed {
            plot_ui.set_plot_bounds_x(x_lo..=x_hi);
            plot_ui.set_plot_bounds_y(y_lo..=y_hi);
        }

        for series in &panel.series {
            // an empty name keeps repeated columns out of the legend
            let name = if series.legend_visible {
                series.name.as_str()
            } else {
                ""
            };
            plot_ui.line(
                Line::new(name, series.points.clone())
                    .color(series.color)
                    .width(series.width),
            );
        }

        bounds_changed
    });

    if !plot_resp.inner {
        return None;
    }
    let b = plot_resp.transform.bounds();
    let new = ZoomState::new(b.min()[0], b.max()[0], b.min()[1], b.max()[1]);
    let finite = [new.x_min, new.x_max, new.y_min, new.y_max]
        .iter()
        .all(|v| v.is_finite());
    if !finite || new.x_max <= new.x_min || new.y_max <= new.y_min {
        return None;
    }
    Some(ZoomEvent {
        old: state.zoom_state(),
        new,
    })
}

/// Bounds safe to hand to the plot: a degenerate axis gets a unit span.
fn drawable(scale: AxisScale) -> (f64, f64) {
    if scale.max > scale.min {
        (scale.min, scale.max)
    } else {
        (scale.min, scale.min + 1.0)
    }
}

/// Ticks at the axis' minor and major steps, or automatic ones if unset.
fn tick_spacer(scale: AxisScale) -> Box<dyn Fn(GridInput) -> Vec<GridMark>> {
    let major = scale.major_step;
    if !(major.is_finite() && major > 0.0) {
        return Box::new(log_grid_spacer(10));
    }
    let minor = if scale.minor_step > 0.0 && scale.minor_step < major {
        scale.minor_step
    } else {
        major / 5.0
    };
    Box::new(uniform_grid_spacer(move |_| [minor, major, major * 10.0]))
}

/// Right-hand axis that maps the visible primary range onto the sensor's
/// observed range.
fn secondary_axis(secondary: &SecondaryAxis) -> AxisHints<'static> {
    let scale = secondary.scale;
    AxisHints::new_y()
        .label(secondary.title.clone())
        .placement(HPlacement::Right)
        .formatter(move |mark, range| {
            let Some(s) = scale else {
                return String::new();
            };
            let span = range.end() - range.start();
            if span <= 0.0 {
                return String::new();
            }
            let t = (mark.value - range.start()) / span;
            format!("{:.1}", s.min + t * s.range())
        })
}
