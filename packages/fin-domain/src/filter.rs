use std::fmt::{Display, Formatter};

use serde::Serialize;
use serde_json::{Map, Value};

use crate::{QueryParams, record::fields};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueKind {
	Text,
	Number,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum PredicateValue {
	Text(String),
	Number(i64),
}
impl PredicateValue {
	pub fn kind(&self) -> ValueKind {
		match self {
			Self::Text(_) => ValueKind::Text,
			Self::Number(_) => ValueKind::Number,
		}
	}
}

/// Equality between a payload field and an expected value.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Predicate {
	pub field: &'static str,
	pub value: PredicateValue,
}
impl Predicate {
	pub fn text(field: &'static str, value: impl Into<String>) -> Self {
		Self { field, value: PredicateValue::Text(value.into()) }
	}

	pub fn number(field: &'static str, value: i64) -> Self {
		Self { field, value: PredicateValue::Number(value) }
	}

	pub fn kind(&self) -> ValueKind {
		self.value.kind()
	}

	/// Evaluates the predicate against raw store fields. Missing fields never match.
	pub fn matches(&self, raw: &Map<String, Value>) -> bool {
		match (&self.value, raw.get(self.field)) {
			(PredicateValue::Text(expected), Some(Value::String(actual))) => expected == actual,
			(PredicateValue::Number(expected), Some(Value::Number(actual))) =>
				match actual.as_i64() {
					Some(actual) => actual == *expected,
					None => actual.as_f64().map(|actual| actual == *expected as f64).unwrap_or(false),
				},
			_ => false,
		}
	}
}
impl Display for Predicate {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match &self.value {
			PredicateValue::Text(value) => write!(f, "{} = {value:?}", self.field),
			PredicateValue::Number(value) => write!(f, "{} = {value}", self.field),
		}
	}
}

/// Conjunction of equality predicates.
///
/// Predicate order carries no meaning for matching; it is kept stable (tenant, company, year,
/// quarter, statement) so logged filters read the same way every time.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct FilterExpr {
	predicates: Vec<Predicate>,
}
impl FilterExpr {
	pub fn and(predicates: Vec<Predicate>) -> Self {
		Self { predicates }
	}

	pub fn predicates(&self) -> &[Predicate] {
		&self.predicates
	}

	pub fn len(&self) -> usize {
		self.predicates.len()
	}

	pub fn is_empty(&self) -> bool {
		self.predicates.is_empty()
	}

	pub fn find(&self, field: &str) -> Option<&PredicateValue> {
		self.predicates.iter().find(|predicate| predicate.field == field).map(|p| &p.value)
	}

	pub fn matches(&self, raw: &Map<String, Value>) -> bool {
		self.predicates.iter().all(|predicate| predicate.matches(raw))
	}
}
impl Display for FilterExpr {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		for (idx, predicate) in self.predicates.iter().enumerate() {
			if idx > 0 {
				f.write_str(" AND ")?;
			}

			write!(f, "{predicate}")?;
		}

		Ok(())
	}
}

/// Builds the metadata filter for one retrieval tier.
///
/// The tenant predicate is always present. Company, year, quarter and statement predicates are
/// added only when the corresponding argument is supplied.
pub fn build_filter(
	tenant_id: &str,
	company_id: Option<&str>,
	year: Option<i32>,
	quarter: Option<u8>,
	statement_type: Option<&str>,
) -> FilterExpr {
	let mut predicates = vec![Predicate::text(fields::TENANT_ID, tenant_id)];

	if let Some(company_id) = company_id {
		predicates.push(Predicate::text(fields::COMPANY_ID, company_id));
	}
	if let Some(year) = year {
		predicates.push(Predicate::number(fields::PERIOD_YEAR, i64::from(year)));
	}
	if let Some(quarter) = quarter {
		predicates.push(Predicate::number(fields::PERIOD_QUARTER, i64::from(quarter)));
	}
	if let Some(statement_type) = statement_type {
		predicates.push(Predicate::text(fields::STATEMENT_TYPE, statement_type));
	}

	FilterExpr::and(predicates)
}

/// Tenant, company, and whichever of period and statement type the caller supplied.
pub fn strict_filter(params: &QueryParams) -> FilterExpr {
	build_filter(
		params.tenant_id(),
		Some(params.company_id()),
		params.year(),
		params.quarter(),
		params.statement_type(),
	)
}

/// Tenant plus optional period. Drops the company constraint to tolerate mis-tagged documents.
pub fn relaxed_filter(params: &QueryParams) -> FilterExpr {
	build_filter(params.tenant_id(), None, params.year(), params.quarter(), None)
}
