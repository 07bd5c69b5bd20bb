// McProd - app/mod.rs
//
// Application layer: orchestration shared by the two binaries.
// Dependencies: core and platform layers.

pub mod aggregate;
pub mod prepare;
