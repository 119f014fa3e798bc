pub mod amount;
pub mod evidence;
pub mod filter;
pub mod gaap;
pub mod label;
pub mod query;
pub mod record;
pub mod tier;

mod error;

pub use error::{Error, Result};
pub use filter::{FilterExpr, Predicate, PredicateValue, ValueKind};
pub use query::QueryParams;
pub use record::{RecordMeta, RetrievedRecord};
pub use tier::Tier;
