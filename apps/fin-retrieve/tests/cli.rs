use std::sync::Arc;

use clap::Parser;

use fin_config::{Config, Qdrant, Retrieval, Service, Storage, Tenant};
use fin_domain::Tier;
use fin_retrieve::{Args, build_params, execute};
use fin_service::{RetrievalSettings, Retriever};
use fin_testkit::MemoryGateway;

fn test_config() -> Config {
	Config {
		service: Service { log_level: "info".to_string() },
		tenant: Tenant { default_tenant_id: "tenant-dev".to_string() },
		storage: Storage {
			qdrant: Qdrant {
				url: "http://127.0.0.1:6334".to_string(),
				api_key: None,
				chunk_collection: "Chunk".to_string(),
				timeout_ms: 1_000,
			},
		},
		retrieval: Retrieval { min_limit: 12, default_k: 6 },
	}
}

fn parse(extra: &[&str]) -> Args {
	let mut argv =
		vec!["fin-retrieve", "--config", "fin.toml", "--query", "revenue", "--company", "c1"];

	argv.extend_from_slice(extra);

	Args::try_parse_from(argv).expect("Arguments must parse.")
}

#[test]
fn tenant_and_k_fall_back_to_config() {
	let params = build_params(&parse(&[]), &test_config()).expect("Params must build.");

	assert_eq!(params.tenant_id(), "tenant-dev");
	assert_eq!(params.k(), 6);
}

#[test]
fn explicit_arguments_win() {
	let args = parse(&[
		"--tenant",
		"t1",
		"--year",
		"2024",
		"--quarter",
		"2",
		"--statement",
		"BS",
		"--k",
		"30",
	]);
	let params = build_params(&args, &test_config()).expect("Params must build.");

	assert_eq!(params.tenant_id(), "t1");
	assert_eq!(params.year(), Some(2024));
	assert_eq!(params.quarter(), Some(2));
	assert_eq!(params.statement_type(), Some("BS"));
	assert_eq!(params.k(), 30);
}

#[test]
fn invalid_quarter_is_rejected() {
	assert!(build_params(&parse(&["--quarter", "7"]), &test_config()).is_err());
}

#[tokio::test]
async fn execute_reports_tier_labels_and_prompt_context() {
	let mut gateway = MemoryGateway::new();

	gateway
		.insert_json(serde_json::json!({
			"docName": "Acme10Q",
			"tenantId": "t9",
			"companyId": "c9",
			"periodYear": 2024,
			"periodQuarter": 2,
			"page": 4,
			"text": "Revenue rose on pricing."
		}))
		.expect("Fixture must be an object.");

	let retriever = Retriever::new(Arc::new(gateway), RetrievalSettings::default());
	let params =
		build_params(&parse(&["--tenant", "t1"]), &test_config()).expect("Params must build.");
	let output = execute(&retriever, &params, Some(1)).await.expect("Execution must succeed.");

	assert_eq!(output.tier, Some(Tier::Global));
	assert!(!output.tenant_scoped);
	assert_eq!(output.items.len(), 1);
	assert_eq!(output.items[0].label, "Acme10Q | 2024Q2");
	assert_eq!(output.items[0].evidence, "Financial data: Revenue (Doc: Acme10Q, Page 4)");
	assert_eq!(output.items[0].citation.quarter, Some(2));
	assert_eq!(
		output.prompt_context.as_deref(),
		Some("[1] Acme10Q | 2024Q2\nRevenue rose on pricing.")
	);
}
