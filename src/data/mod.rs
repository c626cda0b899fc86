pub mod catalog;
pub mod chart;
pub mod csv_log;
pub mod export;
pub mod filename;
pub mod graph_spec;
pub mod matcher;
pub mod selection;
pub mod task;
pub mod zoom;
