pub mod options;
pub mod serve;
pub mod session;
