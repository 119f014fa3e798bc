use serde::Serialize;

use crate::{Error, Result};

pub const DEFAULT_K: u32 = 12;

/// Per-request retrieval parameters.
///
/// Tenant and company are required; period and statement type narrow the strict tier only when
/// present.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct QueryParams {
	query: String,
	tenant_id: String,
	company_id: String,
	year: Option<i32>,
	quarter: Option<u8>,
	statement_type: Option<String>,
	k: u32,
}
impl QueryParams {
	pub fn new(
		query: impl Into<String>,
		tenant_id: impl Into<String>,
		company_id: impl Into<String>,
	) -> Result<Self> {
		let tenant_id = tenant_id.into();
		let company_id = company_id.into();

		if tenant_id.trim().is_empty() {
			return Err(Error::InvalidQuery { message: "tenant_id must be non-empty.".to_string() });
		}
		if company_id.trim().is_empty() {
			return Err(Error::InvalidQuery {
				message: "company_id must be non-empty.".to_string(),
			});
		}

		Ok(Self {
			query: query.into(),
			tenant_id,
			company_id,
			year: None,
			quarter: None,
			statement_type: None,
			k: DEFAULT_K,
		})
	}

	pub fn with_year(mut self, year: Option<i32>) -> Result<Self> {
		if let Some(year) = year
			&& year <= 0
		{
			return Err(Error::InvalidQuery {
				message: format!("year must be a positive integer, got {year}."),
			});
		}

		self.year = year;

		Ok(self)
	}

	pub fn with_quarter(mut self, quarter: Option<u8>) -> Result<Self> {
		if let Some(quarter) = quarter
			&& !(1..=4).contains(&quarter)
		{
			return Err(Error::InvalidQuery {
				message: format!("quarter must be in the range 1-4, got {quarter}."),
			});
		}

		self.quarter = quarter;

		Ok(self)
	}

	pub fn with_statement_type(mut self, statement_type: Option<String>) -> Self {
		self.statement_type = statement_type.filter(|tag| !tag.trim().is_empty());

		self
	}

	pub fn with_k(mut self, k: u32) -> Result<Self> {
		if k == 0 {
			return Err(Error::InvalidQuery { message: "k must be greater than zero.".to_string() });
		}

		self.k = k;

		Ok(self)
	}

	pub fn query(&self) -> &str {
		&self.query
	}

	pub fn tenant_id(&self) -> &str {
		&self.tenant_id
	}

	pub fn company_id(&self) -> &str {
		&self.company_id
	}

	pub fn year(&self) -> Option<i32> {
		self.year
	}

	pub fn quarter(&self) -> Option<u8> {
		self.quarter
	}

	pub fn statement_type(&self) -> Option<&str> {
		self.statement_type.as_deref()
	}

	pub fn k(&self) -> u32 {
		self.k
	}
}
