pub mod aggregate;
pub mod dto;

pub use aggregate::{AppendOutcome, DedupKey, HistoryLedger, HistoryRecord, HistoryRecordId};
pub use dto::{HistoryChangeResponse, HistoryListResponse, HistoryRecordView};
