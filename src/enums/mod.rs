pub mod report_kind;
