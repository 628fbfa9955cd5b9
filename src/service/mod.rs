pub mod chart_service_impl;
pub mod display_service_impl;
