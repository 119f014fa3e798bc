pub mod qdrant;

mod error;

pub use error::{Error, Result};

use std::{future::Future, pin::Pin};

use fin_domain::{FilterExpr, RetrievedRecord};

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Keyword search over the indexed document store.
///
/// Implementations rank by keyword relevance under `filter`. When that yields nothing and a filter
/// was given, they fall back to an unranked scan under the same filter. Without a filter only the
/// ranked search runs; widening beyond one filter level is the caller's job. An empty result is a
/// successful outcome; errors are reserved for connectivity and authorization failures.
pub trait DocumentGateway
where
	Self: Send + Sync,
{
	fn search<'a>(
		&'a self,
		query: &'a str,
		filter: Option<&'a FilterExpr>,
		limit: u32,
	) -> BoxFuture<'a, Result<Vec<RetrievedRecord>>>;
}
