pub mod pattern_assignment;
pub mod utils;
