pub mod aggregate;
pub mod selection;

pub use aggregate::{filter_hazards, unique_by_name, HazardRef};
pub use selection::HazardSet;
