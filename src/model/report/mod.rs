pub mod bar_chart_spec;
pub mod report_definition;
