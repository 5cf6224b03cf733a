//! Session lifecycle: login, registration, logout, and startup restoration.
//!
//! Lifecycle calls go straight to the transport instead of through the guarded path; a 401 on a
//! bad password is a terminal answer, not a signal to start a refresh cycle.

// self
use crate::{
	_prelude::*,
	api::endpoints,
	auth::{self, TokenSecret},
	client::{ApiRequest, Client},
	error::ConfigError,
	model::UserData,
	obs::{self, CallKind, CallOutcome, CallSpan},
	store::CredentialKey,
};

/// Access/refresh token pair issued by a successful login.
#[derive(Clone, Debug)]
pub struct TokenPair {
	access: TokenSecret,
	refresh: TokenSecret,
}
impl TokenPair {
	/// Short-lived bearer credential.
	pub fn access(&self) -> &TokenSecret {
		&self.access
	}

	/// Long-lived credential accepted by the refresh exchange.
	pub fn refresh(&self) -> &TokenSecret {
		&self.refresh
	}
}

#[derive(Deserialize)]
struct LoginPayload {
	access: String,
	refresh: String,
}

impl Client {
	/// Exchanges credentials for a token pair, persists both entries, and marks the session
	/// authenticated.
	///
	/// Whitespace-only credentials are rejected locally before any request goes out.
	pub async fn login(&self, username: &str, password: &str) -> Result<TokenPair> {
		let span = CallSpan::new(CallKind::Session, "login");

		obs::record_call_outcome(CallKind::Session, CallOutcome::Attempt);

		let result = span.instrument(self.login_inner(username, password)).await;

		match &result {
			Ok(_) => obs::record_call_outcome(CallKind::Session, CallOutcome::Success),
			Err(_) => obs::record_call_outcome(CallKind::Session, CallOutcome::Failure),
		}

		result
	}

	async fn login_inner(&self, username: &str, password: &str) -> Result<TokenPair> {
		let (username, password) = trimmed_credentials(username, password)?;
		let url = self.config.endpoint(endpoints::TOKEN)?;
		let body = serde_json::json!({ "username": username, "password": password });
		let response = self.http.send(Method::POST, url, None, Some(&body)).await?;

		if response.status() == StatusCode::UNAUTHORIZED {
			return Err(Error::Unauthorized { detail: response.detail() });
		}
		if !response.status().is_success() {
			return Err(Error::Api {
				status: response.status().as_u16(),
				message: response.detail(),
			});
		}

		let payload: LoginPayload = response.json()?;
		let pair = TokenPair {
			access: TokenSecret::new(payload.access),
			refresh: TokenSecret::new(payload.refresh),
		};

		self.store.wait_for_init().await?;
		self.store.set(CredentialKey::Access, pair.access.clone()).await?;
		self.store.set(CredentialKey::Refresh, pair.refresh.clone()).await?;
		self.session.set_authenticated(true);

		Ok(pair)
	}

	/// Creates a new account. The caller still has to log in afterwards; registration issues no
	/// tokens.
	pub async fn register(&self, username: &str, password: &str) -> Result<()> {
		let (username, password) = trimmed_credentials(username, password)?;
		let url = self.config.endpoint(endpoints::USER_REGISTER)?;
		let body = serde_json::json!({ "username": username, "password": password });
		let response = self.http.send(Method::POST, url, None, Some(&body)).await?;

		if !response.status().is_success() {
			return Err(Error::Api {
				status: response.status().as_u16(),
				message: response.detail(),
			});
		}

		Ok(())
	}

	/// Clears both stored credentials and flips the session to unauthenticated.
	pub async fn logout(&self) -> Result<()> {
		self.store.wait_for_init().await?;
		self.store.clear().await?;
		self.session.set_authenticated(false);

		Ok(())
	}

	/// Asks the backend whether a token is still valid.
	///
	/// Any failure (network included) reads as "not valid"; callers use this as a boolean probe,
	/// never as an error source.
	pub async fn verify_token(&self, token: &TokenSecret) -> bool {
		let Ok(url) = self.config.endpoint(endpoints::TOKEN_VERIFY) else {
			return false;
		};
		let body = serde_json::json!({ "token": token.expose() });

		match self.http.send(Method::POST, url, None, Some(&body)).await {
			Ok(response) => response.status().is_success(),
			Err(_) => false,
		}
	}

	/// Restores the session from persisted credentials at startup.
	///
	/// A stored access token counts only when its `exp` claim is still in the future and the
	/// backend confirms it; anything else (missing, expired, undecodable, rejected) clears the
	/// store and reports signed-out. An absent session is the expected cold-start state, never
	/// an error.
	pub async fn restore_session(&self) -> Result<bool> {
		self.store.wait_for_init().await?;

		let Some(access) = self.store.get(CredentialKey::Access).await? else {
			self.session.set_authenticated(false);

			return Ok(false);
		};

		if !auth::is_expired(access.expose()) && self.verify_token(&access).await {
			self.session.set_authenticated(true);

			return Ok(true);
		}

		self.store.clear().await?;
		self.session.set_authenticated(false);

		Ok(false)
	}

	/// Fetches the signed-in user's profile and ownership sets over the guarded transport.
	pub async fn user_data(&self) -> Result<UserData> {
		self.execute(ApiRequest::get(endpoints::USER_DATA)).await?.json()
	}
}

fn trimmed_credentials<'a>(
	username: &'a str,
	password: &'a str,
) -> Result<(&'a str, &'a str), ConfigError> {
	let username = username.trim();
	let password = password.trim();

	if username.is_empty() || password.is_empty() {
		return Err(ConfigError::EmptyCredentials);
	}

	Ok((username, password))
}
