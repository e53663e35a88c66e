//! Live adapters for real external interactions.

pub mod filesystem;
pub mod log;
pub mod notify;
pub mod shell;
