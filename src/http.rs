//! Thin reqwest wrapper shared by the guarded transport and the refresh exchange.
//!
//! Shared HTTP behavior lives in one place: the configured timeout applies to every call
//! (the refresh exchange included) and redirects are not followed, since the backend returns
//! results directly instead of delegating to another URI.

// std
use std::ops::Deref;
// crates.io
use serde::de::DeserializeOwned;
// self
use crate::{
	_prelude::*,
	config::ClientConfig,
	error::{ConfigError, TransportError},
};

/// Wrapper around [`ReqwestClient`] carrying the client-wide transport policy.
#[derive(Clone, Debug)]
pub struct HttpClient(ReqwestClient);
impl HttpClient {
	/// Builds a client honoring the configured timeout and redirect policy.
	pub fn new(config: &ClientConfig) -> Result<Self, ConfigError> {
		let client = ReqwestClient::builder()
			.timeout(config.timeout())
			.redirect(reqwest::redirect::Policy::none())
			.build()?;

		Ok(Self(client))
	}

	/// Wraps an existing reqwest [`ReqwestClient`]; the caller owns its policy choices.
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}

	/// Issues one HTTP call and buffers the full response.
	///
	/// Statuses are not classified here; callers inspect [`ApiResponse::status`] so the
	/// transport layer can tell authorization failures apart from other errors.
	pub(crate) async fn send(
		&self,
		method: Method,
		url: Url,
		bearer: Option<&str>,
		body: Option<&serde_json::Value>,
	) -> Result<ApiResponse, TransportError> {
		let mut builder = self.0.request(method, url);

		if let Some(token) = bearer {
			builder = builder.bearer_auth(token);
		}
		if let Some(body) = body {
			builder = builder.json(body);
		}

		let response = builder.send().await?;
		let status = response.status();
		let body = response.bytes().await?.to_vec();

		Ok(ApiResponse { status, body })
	}
}
impl AsRef<ReqwestClient> for HttpClient {
	fn as_ref(&self) -> &ReqwestClient {
		&self.0
	}
}
impl Deref for HttpClient {
	type Target = ReqwestClient;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}

/// Buffered response from one completed HTTP exchange.
#[derive(Clone, Debug)]
pub struct ApiResponse {
	pub(crate) status: StatusCode,
	pub(crate) body: Vec<u8>,
}
impl ApiResponse {
	/// HTTP status returned by the backend.
	pub fn status(&self) -> StatusCode {
		self.status
	}

	/// Raw response body bytes.
	pub fn body(&self) -> &[u8] {
		&self.body
	}

	/// Decodes the body into the expected shape, reporting the offending JSON path on failure.
	pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
		let mut deserializer = serde_json::Deserializer::from_slice(&self.body);

		serde_path_to_error::deserialize(&mut deserializer).map_err(|source| Error::Decode {
			source,
			status: Some(self.status.as_u16()),
		})
	}

	/// Extracts the backend's `{"detail": …}` error payload, falling back to the raw body text.
	pub fn detail(&self) -> String {
		#[derive(Deserialize)]
		struct Detail {
			detail: String,
		}

		serde_json::from_slice::<Detail>(&self.body)
			.map(|payload| payload.detail)
			.unwrap_or_else(|_| String::from_utf8_lossy(&self.body).trim().to_string())
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	fn response(status: StatusCode, body: &str) -> ApiResponse {
		ApiResponse { status, body: body.as_bytes().to_vec() }
	}

	#[test]
	fn detail_prefers_structured_payload() {
		let structured = response(StatusCode::FORBIDDEN, r#"{"detail":"Not allowed"}"#);

		assert_eq!(structured.detail(), "Not allowed");

		let raw = response(StatusCode::BAD_GATEWAY, "upstream exploded\n");

		assert_eq!(raw.detail(), "upstream exploded");
	}

	#[test]
	fn json_decode_reports_offending_path() {
		#[derive(Debug, Deserialize)]
		struct Payload {
			#[allow(dead_code)]
			access: String,
		}

		let body = response(StatusCode::OK, r#"{"access":42}"#);
		let err = body.json::<Payload>().expect_err("Type mismatch should fail decoding.");

		match err {
			Error::Decode { source, status } => {
				assert_eq!(status, Some(200));
				assert_eq!(source.path().to_string(), "access");
			},
			other => panic!("Expected a decode error, got {other:?}."),
		}
	}
}
