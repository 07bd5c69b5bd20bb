// McProd - lib.rs
//
// Library entry point, exposing every layer to the two binaries and to the
// integration tests.

pub mod app;
pub mod core;
pub mod platform;
pub mod util;
