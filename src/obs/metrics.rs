// self
use crate::obs::{CallKind, CallOutcome};

/// Records one attempt/success/failure event for the provided call surface.
///
/// No-op unless the `metrics` feature is enabled.
pub fn record_call_outcome(kind: CallKind, outcome: CallOutcome) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!(
			"mangawelt_client_call_total",
			"call" => kind.as_str(),
			"outcome" => outcome.as_str(),
		)
		.increment(1);
	}
	#[cfg(not(feature = "metrics"))]
	{
		let _ = (kind, outcome);
	}
}
