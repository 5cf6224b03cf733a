//! Client-level error types shared across the transport, stores, and session flows.

// self
use crate::_prelude::*;

/// Client-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical client error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Credential-store failure.
	#[error("{0}")]
	Storage(
		#[from]
		#[source]
		crate::store::StoreError,
	),
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Transport failure (DNS, TCP, TLS, timeout).
	#[error(transparent)]
	Transport(#[from] TransportError),
	/// The refresh exchange failed; the session has been cleared.
	#[error(transparent)]
	Refresh(#[from] RefreshError),

	/// Backend rejected the request with a non-authorization error status.
	#[error("Backend rejected the request with status {status}: {message}.")]
	Api {
		/// HTTP status code returned by the backend.
		status: u16,
		/// Backend-supplied detail string, or the raw body when none was given.
		message: String,
	},
	/// An authorization failure that is not eligible for (another) refresh retry.
	#[error("Request was not authorized and is not eligible for another retry: {detail}.")]
	Unauthorized {
		/// Backend-supplied detail string for the rejected request.
		detail: String,
	},
	/// Backend returned a payload that could not be decoded into the expected shape.
	#[error("Backend returned a payload that could not be decoded.")]
	Decode {
		/// Structured parsing failure with the offending JSON path.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
		/// HTTP status code of the response, when available.
		status: Option<u16>,
	},
}

/// Configuration and validation failures raised by the client.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// Backend base URL cannot be parsed.
	#[error("Backend base URL is invalid.")]
	InvalidBaseUrl {
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Backend base URL uses a scheme other than http/https.
	#[error("Backend base URL must use the http or https scheme, not `{scheme}`.")]
	UnsupportedScheme {
		/// Offending scheme string.
		scheme: String,
	},
	/// Endpoint path cannot be joined onto the base URL.
	#[error("Endpoint path `{path}` cannot be joined onto the base URL.")]
	InvalidPath {
		/// Offending path string.
		path: String,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Login/registration called with a blank username or password.
	#[error("Username and password must not be empty.")]
	EmptyCredentials,
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}

/// Transport-level failures (network, IO).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the backend.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Underlying IO failure surfaced during transport.
	#[error("I/O error occurred while calling the backend.")]
	Io(#[from] std::io::Error),
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}
}
impl From<ReqwestError> for TransportError {
	fn from(e: ReqwestError) -> Self {
		Self::network(e)
	}
}

/// Failure of one refresh cycle.
///
/// Cloneable so the coordinator can broadcast a single outcome to every queued waiter; the
/// underlying causes are flattened into messages for that reason.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum RefreshError {
	/// No refresh token is present in the credential store.
	#[error("No refresh token is available in the credential store.")]
	MissingRefreshToken,
	/// Credential store failed while reading or persisting tokens mid-cycle.
	#[error("Credential store failed during refresh: {message}.")]
	Store {
		/// Flattened store error payload.
		message: String,
	},
	/// The exchange request could not be built or sent.
	#[error("Token refresh could not be delivered: {message}.")]
	Request {
		/// Flattened build/transport error payload.
		message: String,
	},
	/// Backend refused to exchange the refresh token.
	#[error("Token refresh was rejected by the backend with status {status}: {message}.")]
	Rejected {
		/// HTTP status code of the rejection.
		status: u16,
		/// Backend-supplied detail string.
		message: String,
	},
	/// Exchange succeeded at the HTTP level but the payload carried no usable access token.
	#[error("Token refresh response did not contain a usable access token: {message}.")]
	Payload {
		/// Flattened parsing error payload.
		message: String,
	},
	/// The lead refresh future was dropped before the exchange settled.
	#[error("Token refresh was interrupted before it settled.")]
	Interrupted,
}
impl RefreshError {
	pub(crate) fn store(err: crate::store::StoreError) -> Self {
		Self::Store { message: err.to_string() }
	}
}
