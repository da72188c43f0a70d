pub mod host_traits;
pub mod repository_traits;
