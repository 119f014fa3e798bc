pub type Result<T, E = Error> = std::result::Result<T, E>;

// Lowercased fragments hyper and tonic use for failed connections.
const TRANSPORT_FAILURES: [&str; 5] = [
	"transport error",
	"error trying to connect",
	"connection refused",
	"connection reset",
	"dns error",
];

/// Failures talking to the document store. "No matches" is never an error.
#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Document store unreachable: {message}")]
	Unreachable { message: String },
	#[error("Document store rejected credentials: {message}")]
	Auth { message: String },
	#[error("Document store error: {message}")]
	Backend { message: String },
}
impl Error {
	/// Maps a gRPC status code name onto the gateway taxonomy.
	pub(crate) fn from_status_code(code: &str, message: String) -> Self {
		match code {
			"Unauthenticated" | "PermissionDenied" => Self::Auth { message },
			"Unavailable" | "DeadlineExceeded" | "Cancelled" => Self::Unreachable { message },
			"Unknown" if is_transport_failure(&message) => Self::Unreachable { message },
			_ => Self::Backend { message },
		}
	}
}
impl From<qdrant_client::QdrantError> for Error {
	fn from(err: qdrant_client::QdrantError) -> Self {
		let message = err.to_string();

		match &err {
			qdrant_client::QdrantError::ResponseError { status } =>
				Self::from_status_code(&format!("{:?}", status.code()), message),
			_ if is_transport_failure(&message) => Self::Unreachable { message },
			_ => Self::Backend { message },
		}
	}
}

fn is_transport_failure(message: &str) -> bool {
	let message = message.to_lowercase();

	TRANSPORT_FAILURES.iter().any(|fragment| message.contains(fragment))
}
