//! # types
//!
//! `types` is the module containing all the public data structs of the crate

pub mod abs_time;
pub mod canframe;
pub mod errors;
pub mod log_entry;
pub mod unique;
