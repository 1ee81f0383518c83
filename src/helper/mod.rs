pub mod anyhow_panic;
pub mod from_enum_macro;
pub mod logger;
pub mod more_errors;
