pub mod analysis;
pub mod charts;
pub mod cli;
pub mod config;
pub mod data;
pub mod defaults;
pub mod figures;
pub mod latex;
pub mod loader;
pub mod pipeline;
pub mod speedup;
pub mod stats;

// Test helpers module - made public for use in unit tests, integration tests, and benchmarks
// This is conditionally compiled to avoid including test code in release builds
#[doc(hidden)]
#[cfg(any(test, doctest, feature = "test-helpers"))]
pub mod test_helpers;
