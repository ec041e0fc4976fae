//! Aggregation helpers.
//!
//! Turns the flat log records returned by the host into the rows the
//! charts and tables are built from.

pub mod aggregator;
pub mod time;

pub use aggregator::*;
pub use time::*;
