pub mod aggregate;
pub mod draft;
pub mod dto;
pub mod entry;

pub use aggregate::{Workspace, WorkspaceId};
pub use draft::AuthoringDraft;
pub use dto::{SelectProfessionRequest, ToggleHazardRequest, ToggleHazardResponse, WorkspaceResponse};
pub use entry::{CommitOutcome, Entry, EntryList};
