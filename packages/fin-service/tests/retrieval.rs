use std::sync::Arc;

use fin_domain::{PredicateValue, QueryParams, Tier, record::fields};
use fin_service::{Citation, Error, RetrievalSettings, Retriever, render_prompt_context};
use fin_testkit::{FailingGateway, FailureKind, MemoryGateway, ScriptedGateway, record};

fn params(query: &str, tenant: &str, company: &str, year: Option<i32>) -> QueryParams {
	QueryParams::new(query, tenant, company)
		.and_then(|params| params.with_year(year))
		.expect("Test params must be valid.")
}

fn acme_record() -> serde_json::Value {
	serde_json::json!({
		"docName": "Acme10K",
		"sourceUri": "s3://bucket/acme-10k.pdf",
		"docType": "10-K",
		"tenantId": "t1",
		"companyId": "c1",
		"periodYear": 2024,
		"page": 12,
		"lineStart": 3,
		"lineEnd": 9,
		"text": "Revenue grew 10% year over year on higher subscription volume."
	})
}

fn memory_store() -> Arc<MemoryGateway> {
	let mut gateway = MemoryGateway::new();

	gateway.insert_json(acme_record()).expect("Fixture must be an object.");

	Arc::new(gateway)
}

#[tokio::test]
async fn strict_hit_stops_after_first_tier() {
	let gateway = Arc::new(ScriptedGateway::new([vec![record(acme_record())]]));
	let retriever = Retriever::new(gateway.clone(), RetrievalSettings::default());
	let result = retriever
		.retrieve(&params("revenue", "t1", "c1", Some(2024)))
		.await
		.expect("Retrieval must succeed.");

	assert_eq!(result.tier, Some(Tier::Strict));
	assert_eq!(result.records.len(), 1);
	assert_eq!(gateway.search_count(), 1);
}

#[tokio::test]
async fn falls_through_tiers_in_order() {
	let gateway =
		Arc::new(ScriptedGateway::new([Vec::new(), Vec::new(), vec![record(acme_record())]]));
	let retriever = Retriever::new(gateway.clone(), RetrievalSettings::default());
	let result = retriever
		.retrieve(&params("revenue", "t1", "c1", Some(2024)))
		.await
		.expect("Retrieval must succeed.");
	let searches = gateway.searches();

	assert_eq!(result.tier, Some(Tier::Global));
	assert_eq!(searches.len(), 3);

	let strict = searches[0].filter.as_ref().expect("Strict tier must be filtered.");
	let relaxed = searches[1].filter.as_ref().expect("Relaxed tier must be filtered.");

	assert_eq!(strict.find(fields::COMPANY_ID), Some(&PredicateValue::Text("c1".to_string())));
	assert_eq!(relaxed.find(fields::COMPANY_ID), None);
	assert_eq!(relaxed.find(fields::PERIOD_YEAR), Some(&PredicateValue::Number(2024)));
	assert!(searches[2].filter.is_none());
}

#[tokio::test]
async fn all_tiers_empty_returns_empty_without_error() {
	let gateway = Arc::new(ScriptedGateway::default());
	let retriever = Retriever::new(gateway.clone(), RetrievalSettings::default());
	let result = retriever
		.retrieve(&params("revenue", "t1", "c1", None))
		.await
		.expect("Empty retrieval is not an error.");

	assert!(result.is_empty());
	assert_eq!(result.tier, None);
	assert_eq!(gateway.search_count(), 3);
}

#[tokio::test]
async fn gateway_error_propagates_without_further_tiers() {
	let gateway = Arc::new(FailingGateway::new(FailureKind::Unreachable));
	let retriever = Retriever::new(gateway.clone(), RetrievalSettings::default());
	let err = retriever
		.retrieve(&params("revenue", "t1", "c1", None))
		.await
		.expect_err("Gateway failure must propagate.");

	assert!(matches!(err, Error::Gateway(fin_storage::Error::Unreachable { .. })));
	assert_eq!(gateway.count(), 1);
}

#[tokio::test]
async fn auth_error_is_distinct_from_no_results() {
	let gateway = Arc::new(FailingGateway::new(FailureKind::Auth));
	let retriever = Retriever::new(gateway, RetrievalSettings::default());
	let err = retriever
		.retrieve_context(&params("revenue", "t1", "c1", None))
		.await
		.expect_err("Gateway failure must propagate.");

	assert!(matches!(err, Error::Gateway(fin_storage::Error::Auth { .. })));
}

#[tokio::test]
async fn limit_has_a_floor_of_twelve() {
	let gateway = Arc::new(ScriptedGateway::default());
	let retriever = Retriever::new(gateway.clone(), RetrievalSettings::default());
	let small = params("revenue", "t1", "c1", None).with_k(3).expect("k must be valid.");
	let large = params("revenue", "t1", "c1", None).with_k(40).expect("k must be valid.");

	retriever.retrieve(&small).await.expect("Retrieval must succeed.");
	retriever.retrieve(&large).await.expect("Retrieval must succeed.");

	let limits: Vec<u32> = gateway.searches().iter().map(|search| search.limit).collect();

	assert_eq!(limits, vec![12, 12, 12, 40, 40, 40]);
}

#[tokio::test]
async fn configured_floor_replaces_default() {
	let gateway = Arc::new(ScriptedGateway::default());
	let cfg = fin_config::Retrieval { min_limit: 20, default_k: 12 };
	let retriever = Retriever::new(gateway.clone(), RetrievalSettings::from(&cfg));

	retriever.retrieve(&params("revenue", "t1", "c1", None)).await.expect("Retrieval must succeed.");

	assert!(gateway.searches().iter().all(|search| search.limit == 20));
}

#[tokio::test]
async fn end_to_end_strict_match() {
	let gateway = memory_store();
	let retriever = Retriever::new(gateway.clone(), RetrievalSettings::default());
	let result = retriever
		.retrieve(&params("liquidity outlook", "t1", "c1", Some(2024)))
		.await
		.expect("Retrieval must succeed.");

	assert_eq!(result.tier, Some(Tier::Strict));
	assert_eq!(result.records.len(), 1);
	assert_eq!(result.records[0].company_id.as_deref(), Some("c1"));
	assert_eq!(gateway.search_count(), 1);
}

#[tokio::test]
async fn end_to_end_wrong_company_uses_relaxed_tier() {
	let gateway = memory_store();
	let retriever = Retriever::new(gateway.clone(), RetrievalSettings::default());
	let result = retriever
		.retrieve(&params("liquidity outlook", "t1", "c2", Some(2024)))
		.await
		.expect("Retrieval must succeed.");

	assert_eq!(result.tier, Some(Tier::Relaxed));
	assert_eq!(result.records.len(), 1);
	assert_eq!(result.labels(), vec!["Acme10K | 2024".to_string()]);
	assert_eq!(gateway.search_count(), 2);
}

#[tokio::test]
async fn end_to_end_wrong_tenant_is_empty() {
	let gateway = memory_store();
	let retriever = Retriever::new(gateway.clone(), RetrievalSettings::default());
	let result = retriever
		.retrieve(&params("liquidity outlook", "t2", "c1", None))
		.await
		.expect("Retrieval must succeed.");

	assert!(result.is_empty());
	assert_eq!(gateway.search_count(), 3);
}

#[tokio::test]
async fn end_to_end_keyword_hit_is_ranked() {
	let gateway = memory_store();
	let retriever = Retriever::new(gateway, RetrievalSettings::default());
	let records = retriever
		.retrieve_context(&params("revenue growth", "t1", "c1", Some(2024)))
		.await
		.expect("Retrieval must succeed.");

	assert_eq!(records.len(), 1);
	assert!(records[0].meta.score.is_some(), "Ranked hits carry a score.");
}

#[test]
fn citation_projects_provenance_and_truncates_quote() {
	let mut raw = acme_record();

	raw["text"] = serde_json::Value::String("x".repeat(500));
	raw["_additional"] = serde_json::json!({ "id": "chunk-1", "score": 0.42 });

	let citation = Citation::from_record(&record(raw));

	assert_eq!(citation.doc_name.as_deref(), Some("Acme10K"));
	assert_eq!(citation.year, Some(2024));
	assert_eq!(citation.page, Some(12));
	assert_eq!(citation.quote.chars().count(), fin_service::citation::QUOTE_MAX_CHARS);
	assert_eq!(citation.chunk_id.as_deref(), Some("chunk-1"));
	assert_eq!(citation.score, Some(0.42));
}

#[test]
fn prompt_context_numbers_blocks_with_labels() {
	let records = vec![
		record(acme_record()),
		record(serde_json::json!({ "sourceUri": "s3://bucket/notes.pdf", "text": "Cash was flat." })),
		record(serde_json::json!({ "text": "ignored" })),
	];
	let rendered = render_prompt_context(&records, 2, 7);

	assert_eq!(rendered, "[1] Acme10K | 2024\nRevenue\n\n[2] s3://bucket/notes.pdf\nCash wa");
}
