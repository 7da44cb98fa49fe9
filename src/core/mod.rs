// LogAnalyzer - core/mod.rs
//
// Core business logic layer: extraction, filtering, aggregation, rendering
// and export serialisation.
// Must NOT depend on: app or platform. Never opens files itself.

pub mod aggregate;
pub mod export;
pub mod extract;
pub mod filter;
pub mod model;
pub mod report;
