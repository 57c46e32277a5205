pub mod exercise;

pub use crate::exercise::*;
