//! HTML for the status card. The document is handed to the host renderer;
//! this module never rasterizes anything itself.

pub mod card;
pub mod descriptors;
pub mod format;

pub use card::{generate, TemplateOptions};
pub use descriptors::{platform_label, status_descriptor, StatusDescriptor};
pub use format::{escape_html, format_bytes, format_duration, percent};
