//! Exploratory analysis of passenger survival records.
//!
//! Load a CSV with [`loader::load_passengers`], then hand the records to
//! [`pipeline::analyze`], which imputes gaps, derives `Title`, `FamilySize`
//! and `IsAlone`, and returns every summary in one [`pipeline::Analysis`].

pub mod breakdowns;
pub mod decision;
pub mod error;
pub mod importance;
pub mod loader;
pub mod pipeline;
pub mod preprocess;
pub mod summary;
pub mod types;
pub mod util;

pub use error::{EdaError, Result};
pub use pipeline::{analyze, Analysis, AnalysisConfig};
pub use preprocess::ImputationPolicy;
pub use types::{Feature, Passenger, Port, Title};
