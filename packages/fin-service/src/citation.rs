use serde::Serialize;

use fin_domain::RetrievedRecord;

pub const QUOTE_MAX_CHARS: usize = 200;

/// Citation row written next to generated answers.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Citation {
	pub doc_name: Option<String>,
	pub source_uri: Option<String>,
	pub doc_type: Option<String>,
	pub statement_type: Option<String>,
	pub year: Option<i64>,
	pub quarter: Option<i64>,
	pub page: Option<i64>,
	pub line_start: Option<i64>,
	pub line_end: Option<i64>,
	pub sheet: Option<String>,
	pub cell_range: Option<String>,
	pub quote: String,
	pub chunk_id: Option<String>,
	pub score: Option<f64>,
}
impl Citation {
	pub fn from_record(record: &RetrievedRecord) -> Self {
		Self {
			doc_name: record.doc_name.clone(),
			source_uri: record.source_uri.clone(),
			doc_type: record.doc_type.clone(),
			statement_type: record.statement_type.clone(),
			year: record.period_year,
			quarter: record.period_quarter,
			page: record.page,
			line_start: record.line_start,
			line_end: record.line_end,
			sheet: record.sheet.clone(),
			cell_range: record.cell_range.clone(),
			quote: crate::prefix_chars(record.text().unwrap_or_default(), QUOTE_MAX_CHARS)
				.to_string(),
			chunk_id: record.meta.id.clone(),
			score: record.meta.score,
		}
	}
}
