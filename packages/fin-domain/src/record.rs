use serde::Serialize;
use serde_json::{Map, Value};

/// Payload keys written by ingestion and read back at retrieval time.
pub mod fields {
	pub const DOC_NAME: &str = "docName";
	pub const SOURCE_URI: &str = "sourceUri";
	pub const DOC_TYPE: &str = "docType";
	pub const TENANT_ID: &str = "tenantId";
	pub const COMPANY_ID: &str = "companyId";
	pub const PERIOD_YEAR: &str = "periodYear";
	pub const PERIOD_QUARTER: &str = "periodQuarter";
	pub const STATEMENT_TYPE: &str = "statementType";
	pub const PAGE: &str = "page";
	pub const LINE_START: &str = "lineStart";
	pub const LINE_END: &str = "lineEnd";
	pub const SECTION: &str = "section";
	pub const SHEET: &str = "sheet";
	pub const CELL_RANGE: &str = "cellRange";
	pub const GAAP_KEY: &str = "gaapKey";
	pub const LABEL: &str = "label";
	pub const AMOUNT: &str = "amount";
	pub const TEXT: &str = "text";
	/// Reserved key carrying store-side metadata (`id`, `score`).
	pub const ADDITIONAL: &str = "_additional";
}

/// One text chunk or table cell returned by the document store.
///
/// Every field is optional. Building a record from raw store fields never fails: missing keys,
/// blank strings and values of the wrong type all read back as `None`.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RetrievedRecord {
	#[serde(skip_serializing_if = "Option::is_none")]
	pub doc_name: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub source_uri: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub doc_type: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub tenant_id: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub company_id: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub period_year: Option<i64>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub period_quarter: Option<i64>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub statement_type: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub page: Option<i64>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub line_start: Option<i64>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub line_end: Option<i64>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub section: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub sheet: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub cell_range: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub gaap_key: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub label: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub amount: Option<f64>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub text: Option<String>,
	#[serde(rename = "_additional")]
	pub meta: RecordMeta,
}
impl RetrievedRecord {
	pub fn from_fields(raw: &Map<String, Value>) -> Self {
		let meta = raw
			.get(fields::ADDITIONAL)
			.and_then(Value::as_object)
			.map(|additional| RecordMeta {
				id: field_string(additional, "id"),
				score: field_f64(additional, "score"),
			})
			.unwrap_or_default();

		Self {
			doc_name: field_string(raw, fields::DOC_NAME),
			source_uri: field_string(raw, fields::SOURCE_URI),
			doc_type: field_string(raw, fields::DOC_TYPE),
			tenant_id: field_string(raw, fields::TENANT_ID),
			company_id: field_string(raw, fields::COMPANY_ID),
			period_year: field_i64(raw, fields::PERIOD_YEAR),
			period_quarter: field_i64(raw, fields::PERIOD_QUARTER),
			statement_type: field_string(raw, fields::STATEMENT_TYPE),
			page: field_i64(raw, fields::PAGE),
			line_start: field_i64(raw, fields::LINE_START),
			line_end: field_i64(raw, fields::LINE_END),
			section: field_string(raw, fields::SECTION),
			sheet: field_string(raw, fields::SHEET),
			cell_range: field_string(raw, fields::CELL_RANGE),
			gaap_key: field_string(raw, fields::GAAP_KEY),
			label: field_string(raw, fields::LABEL),
			amount: field_f64(raw, fields::AMOUNT),
			text: field_string(raw, fields::TEXT),
			meta,
		}
	}

	pub fn doc_name(&self) -> Option<&str> {
		self.doc_name.as_deref()
	}

	pub fn source_uri(&self) -> Option<&str> {
		self.source_uri.as_deref()
	}

	pub fn text(&self) -> Option<&str> {
		self.text.as_deref()
	}

	/// Fiscal year, treating zero as unset.
	pub fn year(&self) -> Option<i64> {
		self.period_year.filter(|year| *year != 0)
	}

	/// Fiscal quarter, treating zero as unset.
	pub fn quarter(&self) -> Option<i64> {
		self.period_quarter.filter(|quarter| *quarter != 0)
	}

	/// True for records produced from spreadsheet cells rather than text.
	pub fn is_table_cell(&self) -> bool {
		self.sheet.is_some() || self.cell_range.is_some()
	}
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct RecordMeta {
	#[serde(skip_serializing_if = "Option::is_none")]
	pub id: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub score: Option<f64>,
}

pub fn field_string(raw: &Map<String, Value>, key: &str) -> Option<String> {
	match raw.get(key)? {
		Value::String(text) if !text.trim().is_empty() => Some(text.to_string()),
		_ => None,
	}
}

pub fn field_i64(raw: &Map<String, Value>, key: &str) -> Option<i64> {
	match raw.get(key)? {
		Value::Number(number) => number.as_i64().or_else(|| {
			number.as_f64().filter(|value| value.fract() == 0.0).map(|value| value as i64)
		}),
		Value::String(text) => text.trim().parse().ok(),
		_ => None,
	}
}

pub fn field_f64(raw: &Map<String, Value>, key: &str) -> Option<f64> {
	match raw.get(key)? {
		Value::Number(number) => number.as_f64(),
		Value::String(text) => text.trim().parse::<f64>().ok().filter(|value| value.is_finite()),
		_ => None,
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn as_map(value: Value) -> Map<String, Value> {
		value.as_object().cloned().expect("object")
	}

	#[test]
	fn reads_known_fields_and_metadata() {
		let raw = as_map(serde_json::json!({
			"docName": "Acme10K",
			"periodYear": 2024,
			"periodQuarter": 1.0,
			"page": "7",
			"text": "Revenue grew.",
			"_additional": { "id": "abc", "score": "0.75" }
		}));
		let record = RetrievedRecord::from_fields(&raw);

		assert_eq!(record.doc_name(), Some("Acme10K"));
		assert_eq!(record.period_year, Some(2024));
		assert_eq!(record.period_quarter, Some(1));
		assert_eq!(record.page, Some(7));
		assert_eq!(record.meta.id.as_deref(), Some("abc"));
		assert_eq!(record.meta.score, Some(0.75));
	}

	#[test]
	fn wrong_types_and_blanks_read_as_absent() {
		let raw = as_map(serde_json::json!({
			"docName": "",
			"sourceUri": 42,
			"periodYear": "twenty",
			"periodQuarter": 1.5,
			"amount": [1, 2],
			"_additional": "oops"
		}));
		let record = RetrievedRecord::from_fields(&raw);

		assert_eq!(record, RetrievedRecord::default());
	}

	#[test]
	fn zero_period_is_unset() {
		let record = RetrievedRecord {
			period_year: Some(0),
			period_quarter: Some(0),
			..Default::default()
		};

		assert_eq!(record.year(), None);
		assert_eq!(record.quarter(), None);
	}
}
