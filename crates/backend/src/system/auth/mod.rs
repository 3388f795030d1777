pub mod extractor;
pub mod middleware;
pub mod session_store;

pub use session_store::SessionStore;
