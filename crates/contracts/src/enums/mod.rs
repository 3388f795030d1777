pub mod document_kind;
