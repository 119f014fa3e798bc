use crate::RetrievedRecord;

pub const UNKNOWN_SOURCE: &str = "Unknown source";
pub const LABEL_SEPARATOR: &str = " | ";

/// Human-readable provenance for a retrieved record, safe to embed in prompts and UI rows.
///
/// Document name and period (`2024Q1`, or `2024` without a quarter) are joined with `" | "`.
/// Without either, the source locator is used, then [`UNKNOWN_SOURCE`].
pub fn format_label(record: &RetrievedRecord) -> String {
	let mut parts = Vec::with_capacity(2);

	if let Some(doc_name) = record.doc_name() {
		parts.push(doc_name.to_string());
	}

	match (record.year(), record.quarter()) {
		(Some(year), Some(quarter)) => parts.push(format!("{year}Q{quarter}")),
		(Some(year), None) => parts.push(year.to_string()),
		_ => {},
	}

	if !parts.is_empty() {
		return parts.join(LABEL_SEPARATOR);
	}

	record.source_uri().unwrap_or(UNKNOWN_SOURCE).to_string()
}
