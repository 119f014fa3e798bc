use std::sync::Arc;

use serde::Serialize;

use crate::Result;
use fin_domain::{
	FilterExpr, QueryParams, RetrievedRecord, Tier,
	filter::{relaxed_filter, strict_filter},
	label::format_label,
};
use fin_storage::DocumentGateway;

pub const DEFAULT_MIN_LIMIT: u32 = 12;

#[derive(Clone, Debug)]
pub struct RetrievalSettings {
	/// Floor applied to the caller's `k` so downstream ranking always has a usable pool.
	pub min_limit: u32,
}
impl Default for RetrievalSettings {
	fn default() -> Self {
		Self { min_limit: DEFAULT_MIN_LIMIT }
	}
}
impl From<&fin_config::Retrieval> for RetrievalSettings {
	fn from(cfg: &fin_config::Retrieval) -> Self {
		Self { min_limit: cfg.min_limit }
	}
}

/// Records from the first tier that produced any, tagged with that tier.
#[derive(Clone, Debug, Default, Serialize)]
pub struct TieredRetrieval {
	pub tier: Option<Tier>,
	pub records: Vec<RetrievedRecord>,
}
impl TieredRetrieval {
	pub fn is_empty(&self) -> bool {
		self.records.is_empty()
	}

	pub fn labels(&self) -> Vec<String> {
		self.records.iter().map(format_label).collect()
	}
}

/// Searches strict, then tenant-relaxed, then unfiltered, stopping at the first non-empty tier.
pub struct Retriever {
	gateway: Arc<dyn DocumentGateway>,
	settings: RetrievalSettings,
}
impl Retriever {
	pub fn new(gateway: Arc<dyn DocumentGateway>, settings: RetrievalSettings) -> Self {
		Self { gateway, settings }
	}

	pub fn effective_limit(&self, k: u32) -> u32 {
		k.max(self.settings.min_limit)
	}

	/// Issues at most one gateway search per tier. Gateway errors end the walk immediately; an
	/// empty result after every tier is a normal outcome.
	pub async fn retrieve(&self, params: &QueryParams) -> Result<TieredRetrieval> {
		let limit = self.effective_limit(params.k());

		for tier in Tier::ALL {
			let filter = tier_filter(tier, params);
			let records = self.gateway.search(params.query(), filter.as_ref(), limit).await?;

			tracing::debug!(
				tier = %tier,
				limit,
				hits = records.len(),
				filter = %filter.as_ref().map(ToString::to_string).unwrap_or_default(),
				"Retrieval tier finished."
			);

			if records.is_empty() {
				continue;
			}
			if tier == Tier::Global {
				tracing::warn!(
					tenant_id = params.tenant_id(),
					company_id = params.company_id(),
					hits = records.len(),
					"Serving unfiltered results; records may belong to other tenants."
				);
			}

			return Ok(TieredRetrieval { tier: Some(tier), records });
		}

		Ok(TieredRetrieval::default())
	}

	/// Same as [`Retriever::retrieve`] without the tier tag.
	pub async fn retrieve_context(&self, params: &QueryParams) -> Result<Vec<RetrievedRecord>> {
		Ok(self.retrieve(params).await?.records)
	}
}

fn tier_filter(tier: Tier, params: &QueryParams) -> Option<FilterExpr> {
	match tier {
		Tier::Strict => Some(strict_filter(params)),
		Tier::Relaxed => Some(relaxed_filter(params)),
		Tier::Global => None,
	}
}
