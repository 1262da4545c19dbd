//! Small shared helpers.

mod rounding;

pub use rounding::round_to;
