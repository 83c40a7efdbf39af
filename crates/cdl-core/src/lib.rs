pub mod config;
pub mod logging;

pub mod assets;
pub mod catalog;
pub mod detail;
pub mod error;
pub mod fetch;
pub mod model;
pub mod pipeline;
pub mod report;
pub mod snapshot;
pub mod url_model;
