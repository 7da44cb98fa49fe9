// LogAnalyzer - platform/mod.rs
//
// Platform abstraction layer: config locations and filesystem access.
// Dependencies: standard library, directories crate, util.
// Must NOT depend on: app.

pub mod config;
pub mod fs;
