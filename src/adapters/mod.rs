//! Adapter implementations of the port traits.
//!
//! `live` talks to the real disk, process table and terminal. `memory`
//! keeps everything in process so the store and runner can be exercised
//! deterministically.

pub mod live;
pub mod memory;
