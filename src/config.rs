//! Client configuration: validated backend base URL, request timeout, and sync preference.

// std
use std::time::Duration as StdDuration;
// self
use crate::{_prelude::*, error::ConfigError};

/// Validated configuration shared by the transport and refresh paths.
#[derive(Clone, Debug)]
pub struct ClientConfig {
	base_url: Url,
	timeout: StdDuration,
	sync_enabled: bool,
}
impl ClientConfig {
	/// Backend used when nothing has been configured yet.
	pub const DEFAULT_BASE_URL: &'static str = "http://localhost:8000";
	/// Applied to every call, the refresh exchange included, which bounds how long queued
	/// requests can wait on a hung exchange.
	pub const DEFAULT_TIMEOUT: StdDuration = StdDuration::from_secs(10);

	/// Validates and adopts an absolute http/https base URL.
	pub fn new(base_url: impl AsRef<str>) -> Result<Self, ConfigError> {
		let base_url = Url::parse(base_url.as_ref())
			.map_err(|source| ConfigError::InvalidBaseUrl { source })?;

		match base_url.scheme() {
			"http" | "https" => {},
			other => return Err(ConfigError::UnsupportedScheme { scheme: other.into() }),
		}

		Ok(Self { base_url, timeout: Self::DEFAULT_TIMEOUT, sync_enabled: true })
	}

	/// Builds a configuration from a bare host + port pair (legacy settings migration).
	pub fn from_host_port(host: &str, port: u16) -> Result<Self, ConfigError> {
		Self::new(format!("http://{host}:{port}"))
	}

	/// Overrides the per-request timeout.
	pub fn with_timeout(mut self, timeout: StdDuration) -> Self {
		self.timeout = timeout;

		self
	}

	/// Overrides whether ownership/bookmark changes sync to the backend.
	pub fn with_sync_enabled(mut self, enabled: bool) -> Self {
		self.sync_enabled = enabled;

		self
	}

	/// Configured backend base URL.
	pub fn base_url(&self) -> &Url {
		&self.base_url
	}

	/// Configured per-request timeout.
	pub fn timeout(&self) -> StdDuration {
		self.timeout
	}

	/// Whether ownership/bookmark changes sync to the backend (defaults to true).
	pub fn sync_enabled(&self) -> bool {
		self.sync_enabled
	}

	/// Joins an endpoint path onto the base URL.
	pub fn endpoint(&self, path: &str) -> Result<Url, ConfigError> {
		self.base_url
			.join(path)
			.map_err(|source| ConfigError::InvalidPath { path: path.into(), source })
	}
}
impl Default for ClientConfig {
	fn default() -> Self {
		let base_url =
			Url::parse(Self::DEFAULT_BASE_URL).expect("Default backend URL constant is valid.");

		Self { base_url, timeout: Self::DEFAULT_TIMEOUT, sync_enabled: true }
	}
}
