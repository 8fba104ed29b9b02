// Utility functions
// Citation rendering, stream folding

pub mod citations;
pub mod stream_parser;

pub use citations::{cited_indices, format_citation, link_citation_markers};
pub use stream_parser::process_stream_line;
