pub mod range;
pub mod service;
pub mod target;
