//! Command-line entry points for the Woori Mohae backend

pub mod cli;
pub mod commands;
