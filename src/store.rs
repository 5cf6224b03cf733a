//! Credential persistence contracts and built-in store backends.

pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

// self
use crate::{_prelude::*, auth::TokenSecret};

/// Boxed future returned by [`CredentialStore`] operations.
pub type StoreFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, StoreError>> + 'a + Send>>;

/// Persistence contract for the two bearer credentials.
///
/// Implementations own the persisted token bytes exclusively; the transport and coordinator go
/// through this trait and never cache secrets anywhere else. `wait_for_init` must be idempotent
/// and safe to await repeatedly (later calls resolve immediately once initialized). The raw
/// accessors fail fast with [`StoreError::Uninitialized`] when called before initialization has
/// completed; that is a programming-contract violation, not a "logged out" state.
pub trait CredentialStore: Send + Sync {
	/// Resolves once the backend's one-time setup has completed.
	fn wait_for_init(&self) -> StoreFuture<'_, ()>;

	/// Reads one credential entry; `None` is a valid logged-out state.
	fn get(&self, key: CredentialKey) -> StoreFuture<'_, Option<TokenSecret>>;

	/// Persists or replaces one credential entry.
	fn set(&self, key: CredentialKey, value: TokenSecret) -> StoreFuture<'_, ()>;

	/// Removes both credential entries.
	fn clear(&self) -> StoreFuture<'_, ()>;
}

/// Stable keys for persisted credential entries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CredentialKey {
	/// Short-lived bearer credential attached to guarded requests.
	Access,
	/// Longer-lived credential exchanged for new access tokens.
	Refresh,
}
impl CredentialKey {
	/// Returns the stable storage key string.
	pub const fn as_str(self) -> &'static str {
		match self {
			CredentialKey::Access => "access_token",
			CredentialKey::Refresh => "refresh_token",
		}
	}
}
impl Display for CredentialKey {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Error type produced by [`CredentialStore`] implementations.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum StoreError {
	/// Raw accessor called before `wait_for_init` resolved.
	#[error("Credential store was accessed before wait_for_init resolved.")]
	Uninitialized,
	/// Serialization failures surfaced by the backend.
	#[error("Serialization error: {message}.")]
	Serialization {
		/// Human-readable error payload.
		message: String,
	},
	/// Backend-level failure for the storage engine.
	#[error("Backend failure: {message}.")]
	Backend {
		/// Human-readable error payload.
		message: String,
	},
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn credential_keys_are_stable() {
		assert_eq!(CredentialKey::Access.as_str(), "access_token");
		assert_eq!(CredentialKey::Refresh.as_str(), "refresh_token");
		assert_eq!(CredentialKey::Access.to_string(), "access_token");
	}

	#[tokio::test]
	async fn accessors_fail_fast_before_init() {
		let store = MemoryStore::default();
		let err = store
			.get(CredentialKey::Access)
			.await
			.expect_err("Raw access before init should fail fast.");

		assert_eq!(err, StoreError::Uninitialized);

		store.wait_for_init().await.expect("Memory store init should not fail.");
		store
			.get(CredentialKey::Access)
			.await
			.expect("Access after init should succeed.");
	}
}
