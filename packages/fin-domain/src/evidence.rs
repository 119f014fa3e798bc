use regex::Regex;

use crate::RetrievedRecord;

pub const NO_TEXT: &str = "No text available";
pub const SNIPPET_MAX_CHARS: usize = 80;

const SUMMARY_LINES: usize = 2;
const CURRENCIES: [&str; 5] = ["USD", "KRW", "CNY", "AUD", "EUR"];
const FINANCIAL_TERM_PATTERN: &str =
	r"(Revenue|Assets|Liabilities|Income|Equity|Cash|Investment)[A-Za-z]*";

/// Short readable evidence for a record followed by its location in the source.
///
/// Tab-separated statement rows (`code\tconcept\t...\tvalue\tcurrency`) in the first two lines
/// are summarized as `concept: value currency`. Text without such rows falls back to the first
/// financial term, then to a truncated snippet. Text chunks are located by page and line range,
/// table cells by sheet and cell range.
pub fn format_evidence(record: &RetrievedRecord) -> String {
	let Some(text) = record.text() else {
		return NO_TEXT.to_string();
	};
	let location = format_location(record);
	let rows = summarize_rows(text);

	if !rows.is_empty() {
		return format!("{}{location}", rows.join(" | "));
	}
	if let Some(term) = first_financial_term(text) {
		return format!("Financial data: {term}{location}");
	}

	let snippet: String = text.chars().take(SNIPPET_MAX_CHARS).collect();

	format!("{snippet}...{location}")
}

fn summarize_rows(text: &str) -> Vec<String> {
	let mut rows = Vec::new();

	for line in text.replace('\t', " | ").split('\n').take(SUMMARY_LINES) {
		if line.trim().is_empty() {
			continue;
		}

		let parts: Vec<&str> = line.split(" | ").collect();

		if parts.len() < 3 {
			continue;
		}

		let concept = parts[1].trim();

		if concept.is_empty() {
			continue;
		}

		let value = parts.iter().rev().map(|part| part.trim()).find(|part| is_value(part));
		let currency = parts.iter().map(|part| part.trim()).find(|part| CURRENCIES.contains(part));

		match (value, currency) {
			(Some(value), Some(currency)) => rows.push(format!("{concept}: {value} {currency}")),
			(Some(value), None) => rows.push(format!("{concept}: {value}")),
			(None, _) => rows.push(concept.to_string()),
		}
	}

	rows
}

// Bare integers are row codes or years, not amounts.
fn is_value(part: &str) -> bool {
	let has_digit = part.chars().any(|ch| ch.is_ascii_digit());
	let all_digits = !part.is_empty() && part.chars().all(|ch| ch.is_ascii_digit());

	(has_digit && !all_digits) || part.contains('.')
}

fn first_financial_term(text: &str) -> Option<String> {
	let re = Regex::new(FINANCIAL_TERM_PATTERN).ok()?;

	re.captures(text).and_then(|captures| captures.get(1)).map(|term| term.as_str().to_string())
}

fn format_location(record: &RetrievedRecord) -> String {
	let mut parts = Vec::new();

	if let Some(doc_name) = record.doc_name() {
		parts.push(format!("Doc: {doc_name}"));
	}

	if record.is_table_cell() {
		if let Some(sheet) = record.sheet.as_deref() {
			parts.push(format!("Sheet {sheet}"));
		}
		if let Some(cell_range) = record.cell_range.as_deref() {
			parts.push(format!("Cells {cell_range}"));
		}
	} else {
		if let Some(page) = record.page.filter(|page| *page != 0) {
			parts.push(format!("Page {page}"));
		}
		if let (Some(start), Some(end)) = (
			record.line_start.filter(|line| *line != 0),
			record.line_end.filter(|line| *line != 0),
		) {
			parts.push(format!("Lines {start}-{end}"));
		}
	}

	if parts.is_empty() { String::new() } else { format!(" ({})", parts.join(", ")) }
}
