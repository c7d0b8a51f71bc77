pub mod orchestrator;
pub mod result;

#[cfg(feature = "batch")]
pub mod batch;
