pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Invalid request: {message}")]
	InvalidRequest { message: String },
	#[error(transparent)]
	Gateway(#[from] fin_storage::Error),
}
impl From<fin_domain::Error> for Error {
	fn from(err: fin_domain::Error) -> Self {
		match err {
			fin_domain::Error::InvalidQuery { message } => Self::InvalidRequest { message },
		}
	}
}
