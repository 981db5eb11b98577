pub mod constants;
pub mod string_utils;

pub use constants::*;
pub use string_utils::{clean_text, join_values};
