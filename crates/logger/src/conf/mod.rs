//! Conf module: logger configuration model and loading.

pub mod model;
pub mod load;

pub use model::LoggerConfig;
