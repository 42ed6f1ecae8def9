pub mod aggregate;
pub mod commands;
pub mod error;
pub mod logging;
pub mod manifest;
pub mod materialize;
pub mod plan;
pub mod render;
pub mod report;
pub mod templates;

pub use error::{Result, ScaffoldError};
pub use report::Report;
