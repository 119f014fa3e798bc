use std::{path::PathBuf, sync::Arc};

use clap::Parser;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use fin_config::Config;
use fin_domain::{QueryParams, Tier, evidence::format_evidence, label::format_label};
use fin_service::{Citation, RetrievalSettings, Retriever, render_prompt_context};
use fin_storage::qdrant::QdrantGateway;

const PROMPT_CONTEXT_CHARS: usize = 480;

#[derive(Debug, Parser)]
#[command(
	version = fin_cli::VERSION,
	rename_all = "kebab",
	styles = fin_cli::styles(),
)]
pub struct Args {
	#[arg(long, short = 'c', value_name = "FILE")]
	pub config: PathBuf,
	#[arg(long, short = 'q', value_name = "TEXT")]
	pub query: String,
	/// Defaults to `tenant.default_tenant_id`.
	#[arg(long, value_name = "ID")]
	pub tenant: Option<String>,
	#[arg(long, value_name = "ID")]
	pub company: String,
	#[arg(long, value_name = "YEAR")]
	pub year: Option<i32>,
	#[arg(long, value_name = "N")]
	pub quarter: Option<u8>,
	#[arg(long, value_name = "TAG")]
	pub statement: Option<String>,
	/// Defaults to `retrieval.default_k`.
	#[arg(long, value_name = "N")]
	pub k: Option<u32>,
	/// Also render the first N records as prompt context.
	#[arg(long, value_name = "N")]
	pub prompt_items: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct RetrieveOutput {
	pub tier: Option<Tier>,
	pub tenant_scoped: bool,
	pub items: Vec<RetrieveItem>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub prompt_context: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct RetrieveItem {
	pub label: String,
	pub evidence: String,
	pub citation: Citation,
}

pub async fn run(args: Args) -> color_eyre::Result<()> {
	let config = fin_config::load(&args.config)?;
	let filter = EnvFilter::new(config.service.log_level.clone());

	tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();

	let params = build_params(&args, &config)?;
	let gateway = QdrantGateway::new(&config.storage.qdrant)?;
	let retriever = Retriever::new(Arc::new(gateway), RetrievalSettings::from(&config.retrieval));
	let output = execute(&retriever, &params, args.prompt_items).await?;

	tracing::info!(
		tier = ?output.tier,
		items = output.items.len(),
		company_id = params.company_id(),
		"Retrieval finished."
	);

	let json = serde_json::to_string_pretty(&output)?;

	println!("{json}");

	Ok(())
}

pub fn build_params(args: &Args, config: &Config) -> fin_domain::Result<QueryParams> {
	let tenant = args.tenant.clone().unwrap_or_else(|| config.tenant.default_tenant_id.clone());

	QueryParams::new(args.query.clone(), tenant, args.company.clone())?
		.with_year(args.year)?
		.with_quarter(args.quarter)?
		.with_statement_type(args.statement.clone())
		.with_k(args.k.unwrap_or(config.retrieval.default_k))
}

pub async fn execute(
	retriever: &Retriever,
	params: &QueryParams,
	prompt_items: Option<usize>,
) -> fin_service::Result<RetrieveOutput> {
	let retrieval = retriever.retrieve(params).await?;
	let prompt_context = prompt_items
		.map(|max_items| render_prompt_context(&retrieval.records, max_items, PROMPT_CONTEXT_CHARS));
	let items = retrieval
		.records
		.iter()
		.map(|record| RetrieveItem {
			label: format_label(record),
			evidence: format_evidence(record),
			citation: Citation::from_record(record),
		})
		.collect();

	Ok(RetrieveOutput {
		tier: retrieval.tier,
		tenant_scoped: retrieval.tier.map(Tier::is_tenant_scoped).unwrap_or(true),
		items,
		prompt_context,
	})
}
