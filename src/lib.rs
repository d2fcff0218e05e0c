//! Rules engine core for 18xx-style railway games
//!
//! Map topology, tile tracks, stop access rules and hex distances, plus the
//! loader for map definition files.

pub mod config;
pub mod map;
