//! Optional observability helpers for client calls.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to emit structured spans named `mangawelt_client.call` with the `call`
//!   (surface) and `stage` (call site) fields.
//! - Enable `metrics` to increment the `mangawelt_client_call_total` counter for every
//!   attempt/success/failure, labeled by `call` + `outcome`.

mod metrics;
mod tracing;

pub use metrics::*;
pub use tracing::*;

// self
use crate::_prelude::*;

/// Call surfaces observed by the client.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CallKind {
	/// Guarded resource requests (catalog, user data, logs).
	Resource,
	/// Session lifecycle calls (login, register, verify).
	Session,
	/// Refresh-token exchange.
	Refresh,
}
impl CallKind {
	/// Classifies an endpoint path into a call surface.
	pub fn for_path(path: &str) -> Self {
		if path == crate::api::endpoints::TOKEN_REFRESH {
			Self::Refresh
		} else if path.starts_with("/api/token/") || path.starts_with("/api/user/register") {
			Self::Session
		} else {
			Self::Resource
		}
	}

	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			CallKind::Resource => "resource",
			CallKind::Session => "session",
			CallKind::Refresh => "refresh",
		}
	}
}
impl Display for CallKind {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Outcome labels recorded for each attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CallOutcome {
	/// Entry to a client helper.
	Attempt,
	/// Successful completion.
	Success,
	/// Failure propagated back to the caller.
	Failure,
}
impl CallOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			CallOutcome::Attempt => "attempt",
			CallOutcome::Success => "success",
			CallOutcome::Failure => "failure",
		}
	}
}
impl Display for CallOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
