//! Process-wide "is authenticated" flag.

// crates.io
use tokio::sync::watch;
// self
use crate::_prelude::*;

/// Cloneable handle onto the session flag.
///
/// Only the refresh coordinator's failure path and explicit login/logout operations write the
/// flag; UI layers observe it through [`SessionWatch::subscribe`] to react to forced logouts.
#[derive(Clone, Debug)]
pub struct SessionWatch(Arc<watch::Sender<bool>>);
impl SessionWatch {
	/// Creates a watch starting in the unauthenticated state.
	pub fn new() -> Self {
		let (tx, _) = watch::channel(false);

		Self(Arc::new(tx))
	}

	/// Current value of the flag.
	pub fn is_authenticated(&self) -> bool {
		*self.0.borrow()
	}

	/// Subscribes to flag changes; the receiver resolves on every transition.
	pub fn subscribe(&self) -> watch::Receiver<bool> {
		self.0.subscribe()
	}

	pub(crate) fn set_authenticated(&self, value: bool) {
		self.0.send_replace(value);
	}
}
impl Default for SessionWatch {
	fn default() -> Self {
		Self::new()
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[tokio::test]
	async fn subscribers_observe_forced_logout() {
		let session = SessionWatch::new();
		let mut receiver = session.subscribe();

		session.set_authenticated(true);
		receiver.changed().await.expect("Watch sender should still be alive.");

		assert!(session.is_authenticated());

		session.set_authenticated(false);
		receiver.changed().await.expect("Watch sender should still be alive.");

		assert!(!session.is_authenticated());
	}
}
