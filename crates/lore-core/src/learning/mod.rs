mod record;
mod source_type;

pub use record::{compute_content_hash, Learning};
pub use source_type::SourceType;
