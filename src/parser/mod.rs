//! Declaration parsers
//!
//! This module turns raw manifest declarations into classified ranges.

mod range;

pub use range::parse_range;
