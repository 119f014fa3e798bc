use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Config {
	pub service: Service,
	pub tenant: Tenant,
	pub storage: Storage,
	#[serde(default)]
	pub retrieval: Retrieval,
}

#[derive(Debug, Deserialize)]
pub struct Service {
	pub log_level: String,
}

#[derive(Debug, Deserialize)]
pub struct Tenant {
	/// Tenant used by tools that are not given one explicitly.
	pub default_tenant_id: String,
}

#[derive(Debug, Deserialize)]
pub struct Storage {
	pub qdrant: Qdrant,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Qdrant {
	pub url: String,
	/// Optional. Blank values are treated as absent.
	pub api_key: Option<String>,
	/// Collection of text chunks and table cells searched for context.
	pub chunk_collection: String,
	pub timeout_ms: u64,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Retrieval {
	/// Lower bound applied to every per-tier search limit.
	#[serde(default = "default_min_limit")]
	pub min_limit: u32,
	#[serde(default = "default_k")]
	pub default_k: u32,
}
impl Default for Retrieval {
	fn default() -> Self {
		Self { min_limit: default_min_limit(), default_k: default_k() }
	}
}

fn default_min_limit() -> u32 {
	12
}

fn default_k() -> u32 {
	12
}
