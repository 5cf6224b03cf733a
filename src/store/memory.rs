//! In-memory [`CredentialStore`] for tests and demos.

// std
use std::sync::atomic::{AtomicBool, Ordering};
// self
use crate::{
	_prelude::*,
	auth::TokenSecret,
	store::{CredentialKey, CredentialStore, StoreError, StoreFuture},
};

/// Keeps credentials in-process. Initialization is trivial but the fail-fast contract still
/// applies, so tests exercise the same init sequencing as persistent backends.
#[derive(Debug, Default)]
pub struct MemoryStore {
	init: AsyncMutex<bool>,
	ready: AtomicBool,
	entries: RwLock<HashMap<CredentialKey, TokenSecret>>,
}
impl MemoryStore {
	fn guard_initialized(&self) -> Result<(), StoreError> {
		if self.ready.load(Ordering::Acquire) { Ok(()) } else { Err(StoreError::Uninitialized) }
	}
}
impl CredentialStore for MemoryStore {
	fn wait_for_init(&self) -> StoreFuture<'_, ()> {
		Box::pin(async move {
			let mut done = self.init.lock().await;

			if !*done {
				*done = true;

				self.ready.store(true, Ordering::Release);
			}

			Ok(())
		})
	}

	fn get(&self, key: CredentialKey) -> StoreFuture<'_, Option<TokenSecret>> {
		Box::pin(async move {
			self.guard_initialized()?;

			Ok(self.entries.read().get(&key).cloned())
		})
	}

	fn set(&self, key: CredentialKey, value: TokenSecret) -> StoreFuture<'_, ()> {
		Box::pin(async move {
			self.guard_initialized()?;
			self.entries.write().insert(key, value);

			Ok(())
		})
	}

	fn clear(&self) -> StoreFuture<'_, ()> {
		Box::pin(async move {
			self.guard_initialized()?;
			self.entries.write().clear();

			Ok(())
		})
	}
}
