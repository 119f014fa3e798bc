pub const BM25_VECTOR_NAME: &str = "bm25";
pub const BM25_MODEL: &str = "qdrant/bm25";

use std::{collections::HashMap, time::Duration};

use qdrant_client::{
	Qdrant,
	qdrant::{
		Condition, Document, Filter, PointId, Query, QueryPointsBuilder, ScrollPointsBuilder,
		Value, point_id::PointIdOptions, value::Kind,
	},
};
use serde_json::{Map, Number, Value as JsonValue};

use crate::{BoxFuture, DocumentGateway, Result};
use fin_domain::{FilterExpr, Predicate, PredicateValue, RetrievedRecord, record::fields};

/// Document store gateway backed by a Qdrant collection with a server-side BM25 sparse vector.
pub struct QdrantGateway {
	pub client: Qdrant,
	pub collection: String,
}
impl QdrantGateway {
	pub fn new(cfg: &fin_config::Qdrant) -> Result<Self> {
		let client = Qdrant::from_url(&cfg.url)
			.api_key(cfg.api_key.clone())
			.timeout(Duration::from_millis(cfg.timeout_ms))
			.build()?;

		Ok(Self { client, collection: cfg.chunk_collection.clone() })
	}

	async fn ranked_then_scan(
		&self,
		query: &str,
		filter: Option<&FilterExpr>,
		limit: u32,
	) -> Result<Vec<RetrievedRecord>> {
		let qdrant_filter = filter.map(to_qdrant_filter);
		let mut ranked = QueryPointsBuilder::new(self.collection.clone())
			.query(Query::new_nearest(Document::new(query, BM25_MODEL)))
			.using(BM25_VECTOR_NAME)
			.limit(u64::from(limit))
			.with_payload(true);

		if let Some(qdrant_filter) = qdrant_filter.clone() {
			ranked = ranked.filter(qdrant_filter);
		}

		let response = self.client.query(ranked).await?;

		if !response.result.is_empty() {
			return Ok(response
				.result
				.iter()
				.map(|point| record_from_payload(point.id.as_ref(), &point.payload, Some(point.score)))
				.collect());
		}

		let Some(qdrant_filter) = qdrant_filter else {
			return Ok(Vec::new());
		};

		tracing::debug!(
			collection = %self.collection,
			filter = %filter.map(ToString::to_string).unwrap_or_default(),
			"Keyword search returned no hits, scanning filtered points."
		);

		let scan = ScrollPointsBuilder::new(self.collection.clone())
			.filter(qdrant_filter)
			.limit(limit)
			.with_payload(true);
		let response = self.client.scroll(scan).await?;

		Ok(response
			.result
			.iter()
			.map(|point| record_from_payload(point.id.as_ref(), &point.payload, None))
			.collect())
	}
}
impl DocumentGateway for QdrantGateway {
	fn search<'a>(
		&'a self,
		query: &'a str,
		filter: Option<&'a FilterExpr>,
		limit: u32,
	) -> BoxFuture<'a, Result<Vec<RetrievedRecord>>> {
		Box::pin(self.ranked_then_scan(query, filter, limit))
	}
}

pub fn to_qdrant_filter(filter: &FilterExpr) -> Filter {
	Filter::all(filter.predicates().iter().map(to_condition))
}

fn to_condition(predicate: &Predicate) -> Condition {
	match &predicate.value {
		PredicateValue::Text(value) => Condition::matches(predicate.field, value.clone()),
		PredicateValue::Number(value) => Condition::matches(predicate.field, *value),
	}
}

fn record_from_payload(
	id: Option<&PointId>,
	payload: &HashMap<String, Value>,
	score: Option<f32>,
) -> RetrievedRecord {
	let mut raw: Map<String, JsonValue> =
		payload.iter().map(|(key, value)| (key.clone(), to_json(value))).collect();
	let mut additional = Map::new();

	if let Some(id) = id.and_then(point_id_string) {
		additional.insert("id".to_string(), JsonValue::String(id));
	}
	if let Some(score) = score.and_then(|score| Number::from_f64(f64::from(score))) {
		additional.insert("score".to_string(), JsonValue::Number(score));
	}

	raw.insert(fields::ADDITIONAL.to_string(), JsonValue::Object(additional));

	RetrievedRecord::from_fields(&raw)
}

fn point_id_string(point_id: &PointId) -> Option<String> {
	match &point_id.point_id_options {
		Some(PointIdOptions::Uuid(id)) => Some(id.clone()),
		Some(PointIdOptions::Num(id)) => Some(id.to_string()),
		None => None,
	}
}

fn to_json(value: &Value) -> JsonValue {
	match &value.kind {
		Some(Kind::BoolValue(value)) => JsonValue::Bool(*value),
		Some(Kind::IntegerValue(value)) => JsonValue::Number((*value).into()),
		Some(Kind::DoubleValue(value)) =>
			Number::from_f64(*value).map(JsonValue::Number).unwrap_or(JsonValue::Null),
		Some(Kind::StringValue(value)) => JsonValue::String(value.clone()),
		Some(Kind::ListValue(list)) => JsonValue::Array(list.values.iter().map(to_json).collect()),
		Some(Kind::StructValue(object)) => JsonValue::Object(
			object.fields.iter().map(|(key, value)| (key.clone(), to_json(value))).collect(),
		),
		Some(Kind::NullValue(_)) | None => JsonValue::Null,
	}
}
