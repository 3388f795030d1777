pub mod executor;
pub mod tracker;

pub use executor::GenerationExecutor;
pub use tracker::GenerationTracker;
