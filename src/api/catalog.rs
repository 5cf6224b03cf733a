//! Catalog listings and ownership/follow toggles over the guarded transport.

// self
use crate::{
	_prelude::*,
	api::endpoints,
	client::{ApiRequest, Client},
	model::{Franchise, Product, Publisher},
};

/// Backend acknowledgement of an ownership or follow toggle.
///
/// The backend reports the post-toggle state, so callers update local state from the response
/// instead of guessing the flip themselves.
#[derive(Clone, Debug, Deserialize)]
pub struct ToggleOutcome {
	/// Human-readable acknowledgement.
	pub detail: String,
	/// Post-toggle ownership state; only present for product toggles.
	#[serde(default)]
	pub is_owned: Option<bool>,
	/// Post-toggle follow state; only present for franchise toggles.
	#[serde(default)]
	pub is_followed: Option<bool>,
}

impl Client {
	/// Fetches the full product catalog.
	pub async fn list_products(&self) -> Result<Vec<Product>> {
		self.execute(ApiRequest::get(endpoints::PRODUCT_LIST)).await?.json()
	}

	/// Fetches the full franchise catalog.
	pub async fn list_franchises(&self) -> Result<Vec<Franchise>> {
		self.execute(ApiRequest::get(endpoints::FRANCHISE_LIST)).await?.json()
	}

	/// Fetches the full publisher catalog.
	pub async fn list_publishers(&self) -> Result<Vec<Publisher>> {
		self.execute(ApiRequest::get(endpoints::PUBLISHER_LIST)).await?.json()
	}

	/// Toggles ownership of the product with the provided ISBN.
	pub async fn toggle_product_owned(&self, isbn: &str) -> Result<ToggleOutcome> {
		self.execute(ApiRequest::post(endpoints::product_toggle_owned(isbn))).await?.json()
	}

	/// Toggles the follow state of the franchise with the provided identifier.
	pub async fn toggle_franchise_follow(&self, id: &str) -> Result<ToggleOutcome> {
		self.execute(ApiRequest::post(endpoints::franchise_follow(id))).await?.json()
	}
}
