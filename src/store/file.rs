//! File-backed [`CredentialStore`] persisting a small JSON snapshot.

// std
use std::{
	collections::BTreeMap,
	fs::{self, File},
	io::Write,
	path::{Path, PathBuf},
	sync::atomic::{AtomicBool, Ordering},
};
// self
use crate::{
	_prelude::*,
	auth::TokenSecret,
	store::{CredentialKey, CredentialStore, StoreError, StoreFuture},
};

/// Persists both credential entries to one JSON file, rewriting it atomically (tmp file +
/// rename) after every mutation. The snapshot is loaded lazily by `wait_for_init`, not by the
/// constructor, so building a store never touches the disk.
#[derive(Debug)]
pub struct FileStore {
	path: PathBuf,
	init: AsyncMutex<bool>,
	ready: AtomicBool,
	entries: RwLock<HashMap<CredentialKey, TokenSecret>>,
}
impl FileStore {
	/// Creates a store bound to the provided snapshot path.
	pub fn new(path: impl Into<PathBuf>) -> Self {
		Self {
			path: path.into(),
			init: AsyncMutex::new(false),
			ready: AtomicBool::new(false),
			entries: RwLock::new(HashMap::new()),
		}
	}

	fn guard_initialized(&self) -> Result<(), StoreError> {
		if self.ready.load(Ordering::Acquire) { Ok(()) } else { Err(StoreError::Uninitialized) }
	}

	fn load_snapshot(path: &Path) -> Result<HashMap<CredentialKey, TokenSecret>, StoreError> {
		if !path.exists() {
			return Ok(HashMap::new());
		}

		let metadata = path.metadata().map_err(|e| StoreError::Backend {
			message: format!("Failed to inspect {}: {e}", path.display()),
		})?;

		if metadata.len() == 0 {
			return Ok(HashMap::new());
		}

		let bytes = fs::read(path).map_err(|e| StoreError::Backend {
			message: format!("Failed to read {}: {e}", path.display()),
		})?;
		let raw: BTreeMap<String, String> =
			serde_json::from_slice(&bytes).map_err(|e| StoreError::Serialization {
				message: format!("Failed to parse {}: {e}", path.display()),
			})?;
		let mut entries = HashMap::new();

		for (key, value) in raw {
			// Unknown keys from older snapshots are dropped rather than carried forward.
			let key = match key.as_str() {
				"access_token" => CredentialKey::Access,
				"refresh_token" => CredentialKey::Refresh,
				_ => continue,
			};

			entries.insert(key, TokenSecret::new(value));
		}

		Ok(entries)
	}

	fn ensure_parent_exists(path: &Path) -> Result<(), StoreError> {
		if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
			fs::create_dir_all(parent).map_err(|e| StoreError::Backend {
				message: format!("Failed to create store directory {}: {e}", parent.display()),
			})?;
		}
		Ok(())
	}

	fn persist_locked(&self, entries: &HashMap<CredentialKey, TokenSecret>) -> Result<(), StoreError> {
		Self::ensure_parent_exists(&self.path)?;

		let snapshot: BTreeMap<&str, &str> =
			entries.iter().map(|(key, value)| (key.as_str(), value.expose())).collect();
		let serialized =
			serde_json::to_vec_pretty(&snapshot).map_err(|e| StoreError::Serialization {
				message: format!("Failed to serialize credential snapshot: {e}"),
			})?;
		let mut tmp_path = self.path.clone();

		tmp_path.set_extension("tmp");

		{
			let mut file = File::create(&tmp_path).map_err(|e| StoreError::Backend {
				message: format!("Failed to create {}: {e}", tmp_path.display()),
			})?;

			file.write_all(&serialized).map_err(|e| StoreError::Backend {
				message: format!("Failed to write {}: {e}", tmp_path.display()),
			})?;
			file.sync_all().map_err(|e| StoreError::Backend {
				message: format!("Failed to sync {}: {e}", tmp_path.display()),
			})?;
		}

		fs::rename(&tmp_path, &self.path).map_err(|e| StoreError::Backend {
			message: format!("Failed to replace {}: {e}", self.path.display()),
		})
	}
}
impl CredentialStore for FileStore {
	fn wait_for_init(&self) -> StoreFuture<'_, ()> {
		Box::pin(async move {
			let mut done = self.init.lock().await;

			if !*done {
				let snapshot = Self::load_snapshot(&self.path)?;

				*self.entries.write() = snapshot;
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

			let mut entries = self.entries.write();

			entries.insert(key, value);
			self.persist_locked(&entries)?;

			Ok(())
		})
	}

	fn clear(&self) -> StoreFuture<'_, ()> {
		Box::pin(async move {
			self.guard_initialized()?;

			let mut entries = self.entries.write();

			entries.clear();
			self.persist_locked(&entries)?;

			Ok(())
		})
	}
}

#[cfg(test)]
mod tests {
	// std
	use std::{env, process};
	// self
	use super::*;

	fn temp_path() -> PathBuf {
		let unique = format!(
			"mangawelt_credentials_{}_{}.json",
			process::id(),
			OffsetDateTime::now_utc().unix_timestamp_nanos(),
		);

		env::temp_dir().join(unique)
	}

	#[tokio::test]
	async fn set_and_reload_round_trip() {
		let path = temp_path();
		let store = FileStore::new(&path);

		store.wait_for_init().await.expect("File store init should succeed.");
		store
			.set(CredentialKey::Access, TokenSecret::new("access-1"))
			.await
			.expect("Failed to persist access token.");
		store
			.set(CredentialKey::Refresh, TokenSecret::new("refresh-1"))
			.await
			.expect("Failed to persist refresh token.");
		drop(store);

		let reopened = FileStore::new(&path);

		reopened.wait_for_init().await.expect("File store reopen should succeed.");

		let access = reopened
			.get(CredentialKey::Access)
			.await
			.expect("Fetch after reopen should succeed.")
			.expect("Access token should survive reopen.");

		assert_eq!(access.expose(), "access-1");

		reopened.clear().await.expect("Clear should succeed.");

		assert!(
			reopened
				.get(CredentialKey::Refresh)
				.await
				.expect("Fetch after clear should succeed.")
				.is_none()
		);

		fs::remove_file(&path).unwrap_or_else(|e| {
			panic!("Failed to remove temporary credential snapshot {}: {e}", path.display())
		});
	}

	#[tokio::test]
	async fn missing_snapshot_initializes_empty() {
		let store = FileStore::new(temp_path());

		store.wait_for_init().await.expect("Init without a snapshot should succeed.");

		assert!(
			store
				.get(CredentialKey::Access)
				.await
				.expect("Fetch from empty store should succeed.")
				.is_none()
		);
	}
}
