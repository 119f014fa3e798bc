mod error;

pub use error::{Error, Result};

use std::{
	collections::VecDeque,
	sync::{
		Mutex,
		atomic::{AtomicUsize, Ordering},
	},
};

use serde_json::{Map, Value};

use fin_domain::{FilterExpr, RetrievedRecord, record::fields};
use fin_storage::{BoxFuture, DocumentGateway};

const SEARCHABLE_FIELDS: [&str; 4] =
	[fields::TEXT, fields::DOC_NAME, fields::LABEL, fields::SECTION];

#[derive(Clone, Debug, PartialEq)]
pub struct RecordedSearch {
	pub query: String,
	pub filter: Option<FilterExpr>,
	pub limit: u32,
}

/// In-process document store honoring the gateway contract.
///
/// Ranking counts query-term occurrences in the searchable fields. A filtered search with no
/// keyword hits falls back to the filtered documents in insertion order; an unfiltered search
/// never does.
#[derive(Default)]
pub struct MemoryGateway {
	documents: Vec<Map<String, Value>>,
	searches: Mutex<Vec<RecordedSearch>>,
}
impl MemoryGateway {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn insert(&mut self, document: Map<String, Value>) {
		self.documents.push(document);
	}

	pub fn insert_json(&mut self, document: Value) -> Result<()> {
		let Value::Object(document) = document else {
			return Err(Error::Message("Documents must be JSON objects.".to_string()));
		};

		self.insert(document);

		Ok(())
	}

	pub fn searches(&self) -> Vec<RecordedSearch> {
		self.searches.lock().unwrap_or_else(|err| err.into_inner()).clone()
	}

	pub fn search_count(&self) -> usize {
		self.searches.lock().unwrap_or_else(|err| err.into_inner()).len()
	}

	fn run(&self, query: &str, filter: Option<&FilterExpr>, limit: u32) -> Vec<RetrievedRecord> {
		let limit = limit as usize;
		let terms = tokenize(query);
		let candidates: Vec<&Map<String, Value>> = self
			.documents
			.iter()
			.filter(|document| filter.map(|filter| filter.matches(document)).unwrap_or(true))
			.collect();
		let mut ranked: Vec<(usize, &Map<String, Value>)> = candidates
			.iter()
			.map(|document| (keyword_score(document, &terms), *document))
			.filter(|(score, _)| *score > 0)
			.collect();

		ranked.sort_by(|a, b| b.0.cmp(&a.0));

		if !ranked.is_empty() {
			return ranked
				.into_iter()
				.take(limit)
				.map(|(score, document)| to_record(document, Some(score)))
				.collect();
		}
		if filter.is_none() {
			return Vec::new();
		}

		candidates.into_iter().take(limit).map(|document| to_record(document, None)).collect()
	}
}
impl DocumentGateway for MemoryGateway {
	fn search<'a>(
		&'a self,
		query: &'a str,
		filter: Option<&'a FilterExpr>,
		limit: u32,
	) -> BoxFuture<'a, fin_storage::Result<Vec<RetrievedRecord>>> {
		self.searches.lock().unwrap_or_else(|err| err.into_inner()).push(RecordedSearch {
			query: query.to_string(),
			filter: filter.cloned(),
			limit,
		});

		let records = self.run(query, filter, limit);

		Box::pin(async move { Ok(records) })
	}
}

/// Replays canned batches in order, one per search, and counts calls.
#[derive(Default)]
pub struct ScriptedGateway {
	batches: Mutex<VecDeque<Vec<RetrievedRecord>>>,
	searches: Mutex<Vec<RecordedSearch>>,
}
impl ScriptedGateway {
	pub fn new(batches: impl IntoIterator<Item = Vec<RetrievedRecord>>) -> Self {
		Self { batches: Mutex::new(batches.into_iter().collect()), searches: Mutex::default() }
	}

	pub fn searches(&self) -> Vec<RecordedSearch> {
		self.searches.lock().unwrap_or_else(|err| err.into_inner()).clone()
	}

	pub fn search_count(&self) -> usize {
		self.searches.lock().unwrap_or_else(|err| err.into_inner()).len()
	}
}
impl DocumentGateway for ScriptedGateway {
	fn search<'a>(
		&'a self,
		query: &'a str,
		filter: Option<&'a FilterExpr>,
		limit: u32,
	) -> BoxFuture<'a, fin_storage::Result<Vec<RetrievedRecord>>> {
		self.searches.lock().unwrap_or_else(|err| err.into_inner()).push(RecordedSearch {
			query: query.to_string(),
			filter: filter.cloned(),
			limit,
		});

		let batch = self
			.batches
			.lock()
			.unwrap_or_else(|err| err.into_inner())
			.pop_front()
			.unwrap_or_default();

		Box::pin(async move { Ok(batch) })
	}
}

#[derive(Clone, Copy, Debug)]
pub enum FailureKind {
	Unreachable,
	Auth,
}

/// Fails every search with the configured error kind.
pub struct FailingGateway {
	kind: FailureKind,
	calls: AtomicUsize,
}
impl FailingGateway {
	pub fn new(kind: FailureKind) -> Self {
		Self { kind, calls: AtomicUsize::new(0) }
	}

	pub fn count(&self) -> usize {
		self.calls.load(Ordering::SeqCst)
	}
}
impl DocumentGateway for FailingGateway {
	fn search<'a>(
		&'a self,
		_query: &'a str,
		_filter: Option<&'a FilterExpr>,
		_limit: u32,
	) -> BoxFuture<'a, fin_storage::Result<Vec<RetrievedRecord>>> {
		self.calls.fetch_add(1, Ordering::SeqCst);

		let err = match self.kind {
			FailureKind::Unreachable => fin_storage::Error::Unreachable {
				message: "connection refused".to_string(),
			},
			FailureKind::Auth => fin_storage::Error::Auth { message: "invalid api key".to_string() },
		};

		Box::pin(async move { Err(err) })
	}
}

/// Builds a record the way the store would return it.
pub fn record(document: Value) -> RetrievedRecord {
	match document {
		Value::Object(document) => RetrievedRecord::from_fields(&document),
		_ => RetrievedRecord::default(),
	}
}

fn to_record(document: &Map<String, Value>, score: Option<usize>) -> RetrievedRecord {
	let mut document = document.clone();

	if let Some(score) = score {
		document.insert(fields::ADDITIONAL.to_string(), serde_json::json!({ "score": score }));
	}

	RetrievedRecord::from_fields(&document)
}

fn keyword_score(document: &Map<String, Value>, terms: &[String]) -> usize {
	SEARCHABLE_FIELDS
		.iter()
		.filter_map(|key| document.get(*key).and_then(Value::as_str))
		.flat_map(tokenize)
		.filter(|token| terms.contains(token))
		.count()
}

fn tokenize(text: &str) -> Vec<String> {
	text.split(|ch: char| !ch.is_alphanumeric())
		.filter(|token| !token.is_empty())
		.map(str::to_lowercase)
		.collect()
}
