pub mod chart_ui;
pub mod grid_ui;
pub mod selection_ui;
pub mod single_ui;

pub use chart_ui::{show_chart, ZoomEvent};
pub use grid_ui::GridWindow;
pub use selection_ui::{selection_list, ListPress};
pub use single_ui::SingleChartWindow;
