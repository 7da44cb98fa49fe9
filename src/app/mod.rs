// LogAnalyzer - app/mod.rs
//
// Application layer: run orchestration and the streaming pass over the file.
// Dependencies: core, platform, util.

pub mod invocation;
pub mod scan;
