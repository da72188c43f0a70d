// src/lib.rs

pub mod cache;
pub mod config;
pub mod db;
pub mod eventbus;
pub mod metrics;
pub mod plugin;
pub mod repositories;
pub mod services;
pub mod tasks;
pub mod template;
pub mod utils;

pub use db::Database;
pub use plugin::StatusImagePlugin;
pub use status_image_common::error::Error;
