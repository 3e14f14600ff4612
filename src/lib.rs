pub mod analyzers;
pub mod catalog;
pub mod error;
pub mod filter;
pub mod loader;
pub mod output;
pub mod pager;
pub mod schema;
pub mod source;
pub mod trips;

pub use error::{Result, StatsError};
