//! Utility helpers shared by configuration code

pub mod duration;

pub use duration::{parse_bool, parse_duration};
