// Season statistics pipeline: fetch, derive, filter.

pub mod cache;
pub mod csv_source;
pub mod derive;
pub mod fangraphs;
pub mod fetch;
pub mod filter;
pub mod model;
pub mod provider;
