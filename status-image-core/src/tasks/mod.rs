pub mod analytics_recorder;
pub mod cpu_sampler;
pub mod login_listener;
