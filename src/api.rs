//! Typed operations over the collection-tracker backend.

pub mod catalog;
pub mod logs;
pub mod session;

pub use catalog::*;
pub use logs::*;
pub use session::*;

/// Endpoint paths relative to the configured base URL.
///
/// Paths keep the backend's trailing slashes; dropping one triggers a redirect that the
/// transport refuses to follow.
pub mod endpoints {
	/// Credential login; returns an access/refresh token pair.
	pub const TOKEN: &str = "/api/token/";
	/// Refresh-token exchange; returns a new access token.
	pub const TOKEN_REFRESH: &str = "/api/token/refresh/";
	/// Server-side validation of a token.
	pub const TOKEN_VERIFY: &str = "/api/token/verify/";
	/// Account creation.
	pub const USER_REGISTER: &str = "/api/user/register/";
	/// Profile and ownership sets for the signed-in user.
	pub const USER_DATA: &str = "/api/user/data/";
	/// Full product catalog.
	pub const PRODUCT_LIST: &str = "/api/products/list/";
	/// Full franchise catalog.
	pub const FRANCHISE_LIST: &str = "/api/franchises/list/";
	/// Full publisher catalog.
	pub const PUBLISHER_LIST: &str = "/api/publishers/list/";
	/// Remote log submission.
	pub const LOGS: &str = "/api/logs/";

	/// Path toggling ownership of the product with the provided ISBN.
	pub fn product_toggle_owned(isbn: &str) -> String {
		format!("/api/products/{isbn}/toggle-owned/")
	}

	/// Path toggling the follow state of the franchise with the provided identifier.
	pub fn franchise_follow(id: &str) -> String {
		format!("/api/franchises/{id}/follow/")
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn parameterized_paths_keep_trailing_slashes() {
		assert_eq!(endpoints::product_toggle_owned("978-3-111"), "/api/products/978-3-111/toggle-owned/");
		assert_eq!(
			endpoints::franchise_follow("2b1c0a7e-1111-4222-8333-944444444444"),
			"/api/franchises/2b1c0a7e-1111-4222-8333-944444444444/follow/"
		);
	}
}
