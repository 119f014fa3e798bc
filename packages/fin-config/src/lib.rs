mod error;
mod types;

pub use error::{Error, Result};
pub use types::{Config, Qdrant, Retrieval, Service, Storage, Tenant};

use std::{fs, path::Path};

pub fn load(path: &Path) -> Result<Config> {
	let raw = fs::read_to_string(path)
		.map_err(|err| Error::ReadConfig { path: path.to_path_buf(), source: err })?;

	let mut cfg: Config = toml::from_str(&raw)
		.map_err(|err| Error::ParseConfig { path: path.to_path_buf(), source: err })?;

	normalize(&mut cfg);

	validate(&cfg)?;

	Ok(cfg)
}

pub fn validate(cfg: &Config) -> Result<()> {
	for (label, value) in [
		("service.log_level", &cfg.service.log_level),
		("tenant.default_tenant_id", &cfg.tenant.default_tenant_id),
		("storage.qdrant.url", &cfg.storage.qdrant.url),
		("storage.qdrant.chunk_collection", &cfg.storage.qdrant.chunk_collection),
	] {
		if value.trim().is_empty() {
			return Err(Error::Validation { message: format!("{label} must be non-empty.") });
		}
	}

	if cfg.storage.qdrant.timeout_ms == 0 {
		return Err(Error::Validation {
			message: "storage.qdrant.timeout_ms must be greater than zero.".to_string(),
		});
	}
	if cfg.retrieval.min_limit == 0 {
		return Err(Error::Validation {
			message: "retrieval.min_limit must be greater than zero.".to_string(),
		});
	}
	if cfg.retrieval.default_k == 0 {
		return Err(Error::Validation {
			message: "retrieval.default_k must be greater than zero.".to_string(),
		});
	}

	Ok(())
}

fn normalize(cfg: &mut Config) {
	if cfg.storage.qdrant.api_key.as_deref().map(|key| key.trim().is_empty()).unwrap_or(false) {
		cfg.storage.qdrant.api_key = None;
	}
}
