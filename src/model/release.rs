//! Pure filtering and ordering for release listings.

// crates.io
use time::{Date, format_description::BorrowedFormatItem, macros::format_description};
// self
use crate::{_prelude::*, model::Product};

const RELEASE_DATE_FORMAT: &[BorrowedFormatItem<'static>] =
	format_description!("[day].[month].[year]");

/// Parses the backend's `dd.mm.yyyy` release stamp.
pub fn parse_release_date(raw: &str) -> Option<Date> {
	Date::parse(raw.trim(), RELEASE_DATE_FORMAT).ok()
}

/// Sort orders supported by release listings.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ReleaseSort {
	/// Newest release first.
	#[default]
	DateDescending,
	/// Oldest release first.
	DateAscending,
	/// Case-insensitive title order.
	TitleAscending,
}

/// Ownership filter applied against the signed-in user's owned set.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OwnedFilter {
	/// Keep everything.
	#[default]
	All,
	/// Keep only owned volumes.
	OwnedOnly,
	/// Keep only unowned volumes.
	UnownedOnly,
}

/// Declarative query over a product listing. Purely in-memory; the transport is not involved.
#[derive(Clone, Debug, Default)]
pub struct ReleaseQuery {
	search: Option<String>,
	owned: OwnedFilter,
	sort: ReleaseSort,
}
impl ReleaseQuery {
	/// Creates an unfiltered query sorted newest-first.
	pub fn new() -> Self {
		Self::default()
	}

	/// Keeps only titles containing the provided text (case-insensitive).
	pub fn with_search(mut self, text: impl Into<String>) -> Self {
		self.search = Some(text.into());

		self
	}

	/// Overrides the ownership filter.
	pub fn with_owned(mut self, filter: OwnedFilter) -> Self {
		self.owned = filter;

		self
	}

	/// Overrides the sort order.
	pub fn with_sort(mut self, sort: ReleaseSort) -> Self {
		self.sort = sort;

		self
	}

	/// Applies the query to a product listing.
	///
	/// Products without a release date are dropped (the release surface only shows dated
	/// items); dates that fail to parse inside comparisons order as the epoch.
	pub fn apply(&self, products: &[Product], owned: &HashSet<String>) -> Vec<Product> {
		let needle = self.search.as_deref().map(str::to_lowercase);
		let mut rows: Vec<Product> = products
			.iter()
			.filter(|product| product.release_date.as_deref().is_some_and(|d| !d.is_empty()))
			.filter(|product| match &needle {
				Some(needle) => product.title.to_lowercase().contains(needle),
				None => true,
			})
			.filter(|product| match self.owned {
				OwnedFilter::All => true,
				OwnedFilter::OwnedOnly => owned.contains(&product.isbn),
				OwnedFilter::UnownedOnly => !owned.contains(&product.isbn),
			})
			.cloned()
			.collect();

		match self.sort {
			ReleaseSort::DateDescending =>
				rows.sort_by_key(|product| std::cmp::Reverse(release_ordinal(product))),
			ReleaseSort::DateAscending => rows.sort_by_key(release_ordinal),
			ReleaseSort::TitleAscending =>
				rows.sort_by(|a, b| a.title.to_lowercase().cmp(&b.title.to_lowercase())),
		}

		rows
	}
}

fn release_ordinal(product: &Product) -> i32 {
	product
		.release_date
		.as_deref()
		.and_then(parse_release_date)
		.map(|date| date.to_julian_day())
		.unwrap_or(0)
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	fn product(isbn: &str, title: &str, release_date: Option<&str>) -> Product {
		Product {
			isbn: isbn.into(),
			title: title.into(),
			description: String::new(),
			image: String::new(),
			release_date: release_date.map(Into::into),
			kind: "MANGA".into(),
			link_to_provider: String::new(),
			franchise: None,
			publisher: None,
			is_owned: false,
		}
	}

	fn listing() -> Vec<Product> {
		vec![
			product("1", "Alpha Chronicle", Some("01.02.2024")),
			product("2", "Beta Saga", Some("15.01.2024")),
			product("3", "Gamma Tales", None),
			product("4", "alpha extra", Some("20.03.2024")),
		]
	}

	#[test]
	fn parses_backend_date_format() {
		let date = parse_release_date("04.03.2024").expect("dd.mm.yyyy should parse.");

		assert_eq!((date.day(), u8::from(date.month()), date.year()), (4, 3, 2024));
		assert!(parse_release_date("2024-03-04").is_none());
		assert!(parse_release_date("").is_none());
	}

	#[test]
	fn undated_products_are_dropped() {
		let rows = ReleaseQuery::new().apply(&listing(), &HashSet::new());

		assert_eq!(rows.len(), 3);
		assert!(rows.iter().all(|product| product.release_date.is_some()));
	}

	#[test]
	fn default_sort_is_newest_first() {
		let rows = ReleaseQuery::new().apply(&listing(), &HashSet::new());
		let isbns: Vec<&str> = rows.iter().map(|product| product.isbn.as_str()).collect();

		assert_eq!(isbns, ["4", "1", "2"]);
	}

	#[test]
	fn search_is_case_insensitive() {
		let rows = ReleaseQuery::new().with_search("ALPHA").apply(&listing(), &HashSet::new());

		assert_eq!(rows.len(), 2);
	}

	#[test]
	fn owned_filter_splits_on_the_owned_set() {
		let owned: HashSet<String> = ["1".to_string()].into();
		let kept = ReleaseQuery::new()
			.with_owned(OwnedFilter::OwnedOnly)
			.apply(&listing(), &owned);

		assert_eq!(kept.len(), 1);
		assert_eq!(kept[0].isbn, "1");

		let missing = ReleaseQuery::new()
			.with_owned(OwnedFilter::UnownedOnly)
			.apply(&listing(), &owned);

		assert!(missing.iter().all(|product| product.isbn != "1"));
	}

	#[test]
	fn title_sort_ignores_case() {
		let rows = ReleaseQuery::new()
			.with_sort(ReleaseSort::TitleAscending)
			.apply(&listing(), &HashSet::new());
		let titles: Vec<&str> = rows.iter().map(|product| product.title.as_str()).collect();

		assert_eq!(titles, ["Alpha Chronicle", "alpha extra", "Beta Saga"]);
	}
}
