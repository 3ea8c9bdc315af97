//! Configuration components for the bridge
//!
//! One section per concern, each with its own defaults.

pub mod chatkit;
pub mod web;

pub use chatkit::*;
pub use web::*;
