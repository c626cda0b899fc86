//! X-axis zoom synchronization across the panels of one chart window.

use crate::data::chart::{AxisScale, ChartPanel, ChartState};

/// Tolerance for treating two axis bounds as equal.
pub const ZOOM_EPSILON: f64 = 1e-10;

/// Visible bounds of a panel before or after an interaction.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ZoomState {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl ZoomState {
    pub fn new(x_min: f64, x_max: f64, y_min: f64, y_max: f64) -> Self {
        Self {
            x_min,
            x_max,
            y_min,
            y_max,
        }
    }

    /// True if either axis moved by more than [`ZOOM_EPSILON`] at either end.
    pub fn differs_from(&self, other: &ZoomState) -> bool {
        !scales_equal(self.x_min, self.x_max, other.x_min, other.x_max)
            || !scales_equal(self.y_min, self.y_max, other.y_min, other.y_max)
    }
}

pub fn scales_equal(old_min: f64, old_max: f64, new_min: f64, new_max: f64) -> bool {
    (old_min - new_min).abs() < ZOOM_EPSILON && (old_max - new_max).abs() < ZOOM_EPSILON
}

impl ChartState {
    pub fn zoom_state(&self) -> ZoomState {
        ZoomState::new(self.x.min, self.x.max, self.y.min, self.y.max)
    }

    /// Move both axes to `zoom`, keeping the current tick steps.
    pub fn apply_zoom(&mut self, zoom: &ZoomState) {
        self.x.min = zoom.x_min;
        self.x.max = zoom.x_max;
        self.y.min = zoom.y_min;
        self.y.max = zoom.y_max;
    }
}

/// Apply a zoom on panel `source` and propagate its X axis to every other panel.
///
/// When `new` equals `old` within tolerance nothing is touched and an empty
/// list is returned. Otherwise the source takes `new`, its X major step becomes
/// a tenth of the new span, and X bounds and steps are copied to the siblings.
/// Y axes of siblings are left alone. Returns the indices of panels whose
/// state changed, source first.
pub fn synchronize(
    states: &mut [ChartState],
    source: usize,
    old: &ZoomState,
    new: &ZoomState,
) -> Vec<usize> {
    if source >= states.len() || !new.differs_from(old) {
        return Vec::new();
    }
    let src = &mut states[source];
    src.apply_zoom(new);
    src.x.major_step = src.x.range() / 10.0;
    let x: AxisScale = src.x;

    let mut touched = vec![source];
    for (i, state) in states.iter_mut().enumerate() {
        if i == source {
            continue;
        }
        state.x = x;
        touched.push(i);
    }
    touched
}

/// [`synchronize`] over the states of whole panels.
pub fn synchronize_panels(
    panels: &mut [ChartPanel],
    source: usize,
    old: &ZoomState,
    new: &ZoomState,
) -> Vec<usize> {
    let mut states: Vec<ChartState> = panels.iter().map(|p| p.state).collect();
    let touched = synchronize(&mut states, source, old, new);
    for &i in &touched {
        panels[i].state = states[i];
    }
    touched
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sub_epsilon_moves_are_ignored() {
        let a = ZoomState::new(0.0, 100.0, -1.0, 1.0);
        let b = ZoomState::new(1e-12, 100.0, -1.0, 1.0 + 1e-12);
        assert!(!a.differs_from(&b));
        let c = ZoomState::new(0.0, 100.0, -1.0, 2.0);
        assert!(a.differs_from(&c));
    }
}
