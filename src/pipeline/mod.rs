//! Pipeline module - load, filter and summarize listing datasets

pub mod domain;
pub mod error;
pub mod filter;
pub mod loader;
pub mod metrics;
pub mod schema;

pub use domain::*;
pub use error::DashboardError;
pub use filter::*;
pub use loader::*;
pub use metrics::*;
pub use schema::*;
