pub mod dns;
pub mod trace;
