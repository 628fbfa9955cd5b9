pub mod chart_service;
pub mod display_service;
