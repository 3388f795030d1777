pub mod progress;
pub mod request;

pub use progress::{GenerationProgress, GenerationStatus, JobId};
pub use request::GenerateRequest;
