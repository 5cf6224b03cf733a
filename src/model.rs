//! Typed backend resources and release-listing queries.

pub mod release;

pub use release::*;

// self
use crate::_prelude::*;

/// One purchasable catalog volume, keyed by ISBN.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
	/// Backend identifier; doubles as the toggle-owned path parameter.
	pub isbn: String,
	/// Display title.
	pub title: String,
	/// Short blurb shown on cards.
	#[serde(default)]
	pub description: String,
	/// Cover image URL.
	#[serde(default)]
	pub image: String,
	/// Release date in `dd.mm.yyyy`; absent for unscheduled items.
	#[serde(default)]
	pub release_date: Option<String>,
	/// Content kind label (manga, light novel, …).
	#[serde(rename = "type")]
	pub kind: String,
	/// Shop page for the volume.
	#[serde(default)]
	pub link_to_provider: String,
	/// Owning franchise identifier, when assigned.
	#[serde(default)]
	pub franchise: Option<String>,
	/// Publisher identifier, when assigned.
	#[serde(default)]
	pub publisher: Option<String>,
	/// Whether the signed-in user owns this volume.
	#[serde(default)]
	pub is_owned: bool,
}

/// Franchise grouping a set of products.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Franchise {
	/// Backend identifier (UUID string).
	pub id: String,
	/// Display title.
	pub title: String,
	/// Short blurb shown on cards.
	#[serde(default)]
	pub description: String,
	/// Cover image URL.
	#[serde(default)]
	pub image: String,
	/// ISBNs of the franchise's products.
	#[serde(default)]
	pub products: Vec<String>,
	/// Whether the signed-in user bookmarked this franchise.
	#[serde(default)]
	pub is_followed: bool,
}

/// Publisher entry from the public catalog.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Publisher {
	/// Backend identifier (UUID string).
	pub id: String,
	/// Display name.
	pub name: String,
	/// Publisher homepage.
	#[serde(default)]
	pub website: String,
	/// Logo image URL.
	#[serde(default)]
	pub image: String,
	/// ISBNs published under this imprint.
	#[serde(default)]
	pub products: Vec<String>,
}

/// Profile and ownership sets for the signed-in user.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserData {
	/// Backend user identifier.
	pub id: u64,
	/// Account name.
	pub username: String,
	/// ISBNs the user marked as owned.
	#[serde(default)]
	pub owned_products: Vec<String>,
	/// Franchise identifiers the user bookmarked.
	#[serde(default)]
	pub followed_franchises: Vec<String>,
}
