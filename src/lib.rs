//! Branch Atlas: location enrichment for retail branch lists.
//!
//! Given branch records (name, Thai address, coordinates) this crate derives
//! the province and reporting region, the class of road the branch sits on,
//! and a short description of what surrounds it, using Google geocoding and
//! nearby-search results behind a coordinate-keyed file cache.

pub mod analyzer;
pub mod branch;
pub mod config;
pub mod error;
pub mod location;
pub mod pipeline;
pub mod poi;
pub mod province;
pub mod report;
pub mod road;

pub use error::{AtlasError, Result};
pub use pipeline::{EnrichedBranch, Pipeline, PipelineOptions};
pub use province::{region_of, resolve_province, Region};
