//! Converters between representations of the same quantity.

pub mod color;
pub mod currency;
pub mod number_base;
pub mod roman;
pub mod timestamp;
pub mod units;
