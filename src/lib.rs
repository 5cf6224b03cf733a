//! Async client for the MangaWelt collection tracker: typed catalog resources, JWT bearer
//! transport, and single-flight token refresh under concurrent failures.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod api;
pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod model;
pub mod obs;
pub mod refresh;
pub mod store;
#[cfg(any(test, feature = "test"))]
pub mod _preludet {
	//! Convenience re-exports and helpers for integration tests; enabled via `cfg(test)` or the
	//! `test` crate feature.

	pub use crate::_prelude::*;

	// crates.io
	use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
	// self
	use crate::{
		auth::TokenSecret,
		client::Client,
		config::ClientConfig,
		store::{CredentialKey, CredentialStore, MemoryStore},
	};

	/// Builds a client against the provided mock backend, backed by an in-memory credential
	/// store that tests can seed and inspect directly.
	pub fn build_test_client(base_url: &str) -> (Client, Arc<MemoryStore>) {
		let config = ClientConfig::new(base_url).expect("Test backend URL should be valid.");
		let store_backend = Arc::new(MemoryStore::default());
		let store: Arc<dyn CredentialStore> = store_backend.clone();
		let client = Client::new(config, store).expect("Test client should build.");

		(client, store_backend)
	}

	/// Seeds both credential entries so guarded requests start from a signed-in state.
	pub async fn seed_tokens(store: &MemoryStore, access: &str, refresh: &str) {
		store.wait_for_init().await.expect("Memory store init should not fail.");
		store
			.set(CredentialKey::Access, TokenSecret::new(access))
			.await
			.expect("Failed to seed access token into the test store.");
		store
			.set(CredentialKey::Refresh, TokenSecret::new(refresh))
			.await
			.expect("Failed to seed refresh token into the test store.");
	}

	/// Builds an unsigned JWT whose payload carries the provided `exp` claim (Unix seconds).
	pub fn unsigned_jwt(exp: i64) -> String {
		let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"none","typ":"JWT"}"#);
		let payload = URL_SAFE_NO_PAD.encode(format!(r#"{{"exp":{exp}}}"#));

		format!("{header}.{payload}.sig")
	}

	/// Builds an unsigned JWT with no `exp` claim at all.
	pub fn unsigned_jwt_without_exp() -> String {
		let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"none","typ":"JWT"}"#);
		let payload = URL_SAFE_NO_PAD.encode(br#"{"sub":"mangawelt"}"#);

		format!("{header}.{payload}.sig")
	}
}

mod _prelude {
	pub use std::{
		collections::{HashMap, HashSet},
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		sync::Arc,
	};

	pub use async_lock::Mutex as AsyncMutex;
	pub use parking_lot::{Mutex, RwLock};
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError, Method, StatusCode};
	pub use serde::{Deserialize, Serialize};
	pub use thiserror::Error as ThisError;
	pub use time::{Duration, OffsetDateTime};
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

pub use reqwest;
pub use url;
#[cfg(test)] use {httpmock as _, mangawelt_client as _};
