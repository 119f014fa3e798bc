use fin_domain::{RetrievedRecord, label::format_label};

/// Renders numbered context blocks for a language-model prompt.
///
/// Each block is `[n] <label>` followed by up to `max_chars` characters of the record text.
pub fn render_prompt_context(
	records: &[RetrievedRecord],
	max_items: usize,
	max_chars: usize,
) -> String {
	records
		.iter()
		.take(max_items)
		.enumerate()
		.map(|(idx, record)| {
			format!(
				"[{}] {}\n{}",
				idx + 1,
				format_label(record),
				crate::prefix_chars(record.text().unwrap_or_default(), max_chars)
			)
		})
		.collect::<Vec<_>>()
		.join("\n\n")
}
