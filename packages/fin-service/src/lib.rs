pub mod citation;
pub mod context;
pub mod retrieve;

mod error;

pub use citation::Citation;
pub use context::render_prompt_context;
pub use error::{Error, Result};
pub use retrieve::{RetrievalSettings, Retriever, TieredRetrieval};

pub(crate) fn prefix_chars(text: &str, max_chars: usize) -> &str {
	match text.char_indices().nth(max_chars) {
		Some((end, _)) => &text[..end],
		None => text,
	}
}
