use std::fmt::{Display, Formatter};

use serde::Serialize;

/// Fallback level that produced a batch of results, from most to least constrained.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
	/// Tenant, company and requested period.
	Strict,
	/// Tenant and requested period, any company.
	Relaxed,
	/// No metadata constraint; results may belong to other tenants.
	Global,
}
impl Tier {
	pub const ALL: [Tier; 3] = [Tier::Strict, Tier::Relaxed, Tier::Global];

	pub fn as_str(self) -> &'static str {
		match self {
			Self::Strict => "strict",
			Self::Relaxed => "relaxed",
			Self::Global => "global",
		}
	}

	/// Whether results from this tier are guaranteed to belong to the requested tenant.
	pub fn is_tenant_scoped(self) -> bool {
		!matches!(self, Self::Global)
	}
}
impl Display for Tier {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.as_str())
	}
}
