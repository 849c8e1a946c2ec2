//! Double-precision direction math and high/low float encoding for the viewshed crates.

mod rotation;
mod split;

pub use rotation::{angle_between, rotate_about, sweep_toward};
pub use split::{SPLIT_CELL, SplitCoordinate, split_f64};
