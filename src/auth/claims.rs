//! Offline JWT claim decoding for expiry checks.
//!
//! No signature validation and no network: the backend remains the authority on token
//! validity, this module only answers "is it worth sending this token at all". Every decode
//! failure degrades to "expired" so callers never branch on malformed input.

// crates.io
use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
// self
use crate::_prelude::*;

/// Registered claims the client inspects.
#[derive(Clone, Debug, Deserialize)]
pub struct TokenClaims {
	/// Expiry instant as Unix seconds, when the backend stamped one.
	#[serde(default)]
	pub exp: Option<i64>,
}

/// Decodes the payload segment of a JWT without verifying its signature.
pub fn decode_claims(token: &str) -> Option<TokenClaims> {
	let payload = token.split('.').nth(1)?;
	let bytes = URL_SAFE_NO_PAD.decode(payload).ok()?;

	serde_json::from_slice(&bytes).ok()
}

/// Returns `true` when the token's expiry claim is at or before `instant`.
///
/// Malformed tokens, undecodable payloads, and tokens without an `exp` claim all read as
/// expired.
pub fn is_expired_at(token: &str, instant: OffsetDateTime) -> bool {
	match decode_claims(token).and_then(|claims| claims.exp) {
		Some(exp) => exp <= instant.unix_timestamp(),
		None => true,
	}
}

/// Convenience helper comparing against the current UTC clock.
pub fn is_expired(token: &str) -> bool {
	is_expired_at(token, OffsetDateTime::now_utc())
}
