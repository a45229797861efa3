//! cardash: Vehicle Listings Dashboard Library
//!
//! Loads a listings dataset under a fixed column schema, filters it with
//! inclusive ranges and set-membership predicates, and summarizes the result
//! as metrics, chart series and a CSV download.

pub mod cli;
pub mod pipeline;
pub mod report;
pub mod utils;
