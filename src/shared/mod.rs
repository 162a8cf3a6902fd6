pub mod constants;
pub mod format;
pub mod templates;
pub mod types;
pub mod validation;
