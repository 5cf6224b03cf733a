//! Single-flight refresh coordination for expired bearer credentials.
//!
//! The coordinator exclusively owns the in-flight flag and the pending-request queue. The first
//! qualifying 401 becomes the lead and performs the `POST /api/token/refresh/` exchange; 401s
//! that arrive while the exchange is outstanding park on a oneshot receiver instead of issuing
//! a second call. Settling broadcasts one outcome to every waiter in enqueue order and resets
//! the flag on every path, cancellation of the lead future included, so a failed cycle can
//! never deadlock later refresh attempts.

mod metrics;

pub use metrics::RefreshMetrics;

// crates.io
use tokio::sync::oneshot;
// self
use crate::{
	_prelude::*,
	api::endpoints,
	auth::TokenSecret,
	client::Client,
	error::RefreshError,
	obs::{self, CallKind, CallOutcome, CallSpan},
	store::CredentialKey,
};

type CycleOutcome = Result<TokenSecret, RefreshError>;

/// Outcome of asking the coordinator how to handle a qualifying 401.
#[derive(Debug)]
pub enum RefreshTicket {
	/// Caller claimed the cycle: it must run the exchange and settle the coordinator.
	Lead,
	/// An exchange is already outstanding; await the receiver for its outcome.
	Wait(oneshot::Receiver<CycleOutcome>),
}

#[derive(Debug, Default)]
struct CoordinatorState {
	refreshing: bool,
	waiters: Vec<oneshot::Sender<CycleOutcome>>,
}

/// Process-wide single-flight guard for token refreshes.
#[derive(Debug, Default)]
pub struct RefreshCoordinator {
	state: Mutex<CoordinatorState>,
	metrics: RefreshMetrics,
}
impl RefreshCoordinator {
	/// Claims the lead slot or enqueues the caller.
	///
	/// The flag read and write happen under one synchronous lock with no suspension point in
	/// between, so two tasks can never both observe `Idle` and race a second exchange.
	pub fn begin(&self) -> RefreshTicket {
		let mut state = self.state.lock();

		if state.refreshing {
			let (tx, rx) = oneshot::channel();

			state.waiters.push(tx);

			RefreshTicket::Wait(rx)
		} else {
			state.refreshing = true;

			RefreshTicket::Lead
		}
	}

	/// Broadcasts the cycle outcome to every queued waiter in enqueue order, clears the queue,
	/// and returns the coordinator to idle.
	pub fn settle(&self, outcome: CycleOutcome) {
		let waiters = {
			let mut state = self.state.lock();

			state.refreshing = false;

			std::mem::take(&mut state.waiters)
		};

		for waiter in waiters {
			// A waiter that dropped its receiver was cancelled; nothing left to deliver.
			let _ = waiter.send(outcome.clone());
		}
	}

	/// Whether an exchange is currently outstanding.
	pub fn is_refreshing(&self) -> bool {
		self.state.lock().refreshing
	}

	/// Counters for cycles driven through this coordinator.
	pub fn metrics(&self) -> &RefreshMetrics {
		&self.metrics
	}
}

/// Settles with an interruption error if the lead future is dropped before the exchange
/// concludes, so queued requests never hang on a cancelled refresh.
struct SettleOnDrop<'a> {
	coordinator: &'a RefreshCoordinator,
	armed: bool,
}
impl<'a> SettleOnDrop<'a> {
	fn new(coordinator: &'a RefreshCoordinator) -> Self {
		Self { coordinator, armed: true }
	}

	fn settle(mut self, outcome: CycleOutcome) {
		self.armed = false;
		self.coordinator.settle(outcome);
	}
}
impl Drop for SettleOnDrop<'_> {
	fn drop(&mut self) {
		if self.armed {
			self.coordinator.settle(Err(RefreshError::Interrupted));
		}
	}
}

#[derive(Deserialize)]
struct RefreshPayload {
	access: String,
}

impl Client {
	/// Runs one refresh cycle as the lead caller.
	///
	/// On success the new access token is persisted before any waiter is released, so replays
	/// read the current credential from the store. On any failure the session flips to
	/// unauthenticated and both stored credentials are wiped before the failure is broadcast.
	/// The coordinator settles on every path.
	pub(crate) async fn refresh_access_token(&self) -> Result<TokenSecret, RefreshError> {
		let span = CallSpan::new(CallKind::Refresh, "refresh_access_token");

		obs::record_call_outcome(CallKind::Refresh, CallOutcome::Attempt);
		self.coordinator.metrics().record_attempt();

		let guard = SettleOnDrop::new(&self.coordinator);
		let outcome = span.instrument(self.exchange_refresh_token()).await;

		match &outcome {
			Ok(_) => {
				self.coordinator.metrics().record_success();
				obs::record_call_outcome(CallKind::Refresh, CallOutcome::Success);
			},
			Err(_) => {
				self.session.set_authenticated(false);
				// The cycle must still settle if the wipe fails; the next login rewrites the
				// store anyway.
				let _ = self.store.clear().await;
				self.coordinator.metrics().record_failure();
				obs::record_call_outcome(CallKind::Refresh, CallOutcome::Failure);
			},
		}

		guard.settle(outcome.clone());

		outcome
	}

	async fn exchange_refresh_token(&self) -> Result<TokenSecret, RefreshError> {
		self.store.wait_for_init().await.map_err(RefreshError::store)?;

		let refresh = self
			.store
			.get(CredentialKey::Refresh)
			.await
			.map_err(RefreshError::store)?
			.ok_or(RefreshError::MissingRefreshToken)?;
		let url = self
			.config
			.endpoint(endpoints::TOKEN_REFRESH)
			.map_err(|e| RefreshError::Request { message: e.to_string() })?;
		let body = serde_json::json!({ "refresh": refresh.expose() });
		let response = self
			.http
			.send(Method::POST, url, None, Some(&body))
			.await
			.map_err(|e| RefreshError::Request { message: e.to_string() })?;

		if !response.status().is_success() {
			return Err(RefreshError::Rejected {
				status: response.status().as_u16(),
				message: response.detail(),
			});
		}

		let payload: RefreshPayload = serde_json::from_slice(response.body())
			.map_err(|e| RefreshError::Payload { message: e.to_string() })?;
		let token = TokenSecret::new(payload.access);

		self.store
			.set(CredentialKey::Access, token.clone())
			.await
			.map_err(RefreshError::store)?;

		Ok(token)
	}
}
