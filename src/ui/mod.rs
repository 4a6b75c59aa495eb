pub mod dependency_panel;
pub mod gantt_chart;
pub mod link_layer;
pub mod task_table;
pub mod theme;
pub mod toolbar;
