// McProd - core/mod.rs
//
// Core business logic layer.
// Must NOT depend on: platform or app, and never reads the filesystem
// (discovery lists directory metadata only).

pub mod discovery;
pub mod export;
pub mod manifest;
pub mod model;
pub mod parser;
pub mod report;
