#![doc = include_str!("../README.md")]
mod catalogue;
pub mod dataset;
mod report;
pub mod run;
mod usd;

pub use catalogue::{Catalogue, CatalogueEntry};
pub use dataset::{LoadError, SaleRecord};
pub use report::{Aggregation, ProductAggregate, Rendered};
pub use run::{run, Options, Summary, RESULTS_FILE};
pub use usd::Usd;
