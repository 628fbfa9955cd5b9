pub mod repository_traits;
pub mod service_traits;
