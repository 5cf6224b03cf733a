//! Authenticated transport core: bearer injection, 401 classification, and replay wiring.

// self
use crate::{
	_prelude::*,
	api::endpoints,
	auth::{SessionWatch, TokenSecret},
	config::ClientConfig,
	error::RefreshError,
	http::{ApiResponse, HttpClient},
	obs::{self, CallKind, CallOutcome, CallSpan},
	refresh::{RefreshCoordinator, RefreshMetrics, RefreshTicket},
	store::{CredentialKey, CredentialStore},
};

/// Guarded API client.
///
/// Every request waits for the credential store to finish initializing, goes out with the
/// current access token as a bearer credential, and funnels qualifying authorization failures
/// through the shared [`RefreshCoordinator`]. The store and coordinator are constructed
/// dependencies rather than ambient singletons, so both can be exercised in isolation.
#[derive(Clone)]
pub struct Client {
	pub(crate) http: HttpClient,
	pub(crate) config: ClientConfig,
	pub(crate) store: Arc<dyn CredentialStore>,
	pub(crate) coordinator: Arc<RefreshCoordinator>,
	pub(crate) session: SessionWatch,
}
impl Client {
	/// Creates a client with its own coordinator and session watch.
	pub fn new(config: ClientConfig, store: Arc<dyn CredentialStore>) -> Result<Self> {
		Self::with_coordinator(config, store, Arc::new(RefreshCoordinator::default()))
	}

	/// Creates a client around an externally constructed coordinator.
	pub fn with_coordinator(
		config: ClientConfig,
		store: Arc<dyn CredentialStore>,
		coordinator: Arc<RefreshCoordinator>,
	) -> Result<Self> {
		let http = HttpClient::new(&config)?;

		Ok(Self { http, config, store, coordinator, session: SessionWatch::new() })
	}

	/// Session flag handle shared with UI layers.
	pub fn session(&self) -> &SessionWatch {
		&self.session
	}

	/// Counters for refresh cycles driven by this client's coordinator.
	pub fn refresh_metrics(&self) -> &RefreshMetrics {
		self.coordinator.metrics()
	}

	/// Active configuration.
	pub fn config(&self) -> &ClientConfig {
		&self.config
	}

	/// Executes a guarded request, transparently retrying once after a successful refresh.
	///
	/// Callers see either the eventual response or the eventual refresh failure; the
	/// intermediate 401 never surfaces for a request that qualified for coordination.
	pub async fn execute(&self, request: ApiRequest) -> Result<ApiResponse> {
		let kind = CallKind::for_path(request.path());
		let span = CallSpan::new(kind, "execute");

		obs::record_call_outcome(kind, CallOutcome::Attempt);

		let result = span.instrument(self.execute_inner(request)).await;

		match &result {
			Ok(_) => obs::record_call_outcome(kind, CallOutcome::Success),
			Err(_) => obs::record_call_outcome(kind, CallOutcome::Failure),
		}

		result
	}

	async fn execute_inner(&self, mut request: ApiRequest) -> Result<ApiResponse> {
		let response = self.dispatch(&request).await?;

		if response.status() != StatusCode::UNAUTHORIZED {
			return Self::classify(response);
		}
		// The refresh call must never try to refresh itself, and a replay that fails again
		// propagates instead of looping.
		if request.path() == endpoints::TOKEN_REFRESH || request.retried {
			return Err(Error::Unauthorized { detail: response.detail() });
		}

		request.retried = true;

		match self.coordinator.begin() {
			RefreshTicket::Lead => {
				self.refresh_access_token().await?;
			},
			RefreshTicket::Wait(receiver) => match receiver.await {
				Ok(Ok(_token)) => {},
				Ok(Err(failure)) => return Err(failure.into()),
				Err(_) => return Err(RefreshError::Interrupted.into()),
			},
		}

		let replay = self.dispatch(&request).await?;

		if replay.status() == StatusCode::UNAUTHORIZED {
			return Err(Error::Unauthorized { detail: replay.detail() });
		}

		Self::classify(replay)
	}

	/// Request preparation + dispatch: await store init, attach the current bearer credential
	/// when present, and issue the call.
	pub(crate) async fn dispatch(&self, request: &ApiRequest) -> Result<ApiResponse> {
		self.store.wait_for_init().await?;

		let token = self.store.get(CredentialKey::Access).await?;
		let url = self.config.endpoint(request.path())?;
		let response = self
			.http
			.send(
				request.method.clone(),
				url,
				token.as_ref().map(TokenSecret::expose),
				request.body.as_ref(),
			)
			.await?;

		Ok(response)
	}

	fn classify(response: ApiResponse) -> Result<ApiResponse> {
		if response.status().is_success() {
			Ok(response)
		} else {
			Err(Error::Api { status: response.status().as_u16(), message: response.detail() })
		}
	}
}
impl Debug for Client {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Client")
			.field("base_url", &self.config.base_url().as_str())
			.field("authenticated", &self.session.is_authenticated())
			.finish()
	}
}

/// Replayable description of one guarded HTTP call.
///
/// Requests carry their own retry marker, so a second 401 after a replay propagates instead of
/// re-entering the coordinator.
#[derive(Clone, Debug)]
pub struct ApiRequest {
	pub(crate) method: Method,
	pub(crate) path: String,
	pub(crate) body: Option<serde_json::Value>,
	pub(crate) retried: bool,
}
impl ApiRequest {
	/// Describes a GET request for the provided endpoint path.
	pub fn get(path: impl Into<String>) -> Self {
		Self { method: Method::GET, path: path.into(), body: None, retried: false }
	}

	/// Describes a POST request for the provided endpoint path.
	pub fn post(path: impl Into<String>) -> Self {
		Self { method: Method::POST, path: path.into(), body: None, retried: false }
	}

	/// Attaches a JSON body.
	pub fn with_json(mut self, body: serde_json::Value) -> Self {
		self.body = Some(body);

		self
	}

	/// Endpoint path relative to the configured base URL.
	pub fn path(&self) -> &str {
		&self.path
	}

	/// HTTP method of the call.
	pub fn method(&self) -> &Method {
		&self.method
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn request_builders_start_unretried() {
		let get = ApiRequest::get("/api/products/list/");

		assert_eq!(get.method(), &Method::GET);
		assert_eq!(get.path(), "/api/products/list/");
		assert!(!get.retried);

		let post = ApiRequest::post("/api/token/").with_json(serde_json::json!({"a": 1}));

		assert_eq!(post.method(), &Method::POST);
		assert!(post.body.is_some());
	}
}
