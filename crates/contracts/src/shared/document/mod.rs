pub mod payload;
pub mod renderer;

pub use payload::{
    build_list_payload, build_single_card_payload, single_card_file_name, DocumentPayload,
    TEXT_MIME_TYPE,
};
pub use renderer::render;
