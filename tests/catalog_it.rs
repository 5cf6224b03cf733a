// crates.io
use httpmock::prelude::*;
// self
use mangawelt_client::{
	_preludet::*,
	api::{DeviceInfo, LogEntry, LogLevel},
};

const PRODUCTS_BODY: &str = r#"[
	{
		"isbn": "978-3-111",
		"title": "Volume 1",
		"description": "First volume",
		"image": "https://cdn.example.com/v1.jpg",
		"release_date": "04.03.2024",
		"type": "MANGA",
		"link_to_provider": "https://shop.example.com/v1",
		"franchise": "f-1",
		"publisher": "p-1",
		"is_owned": false
	},
	{
		"isbn": "978-3-222",
		"title": "Volume 2",
		"type": "MANGA"
	}
]"#;

#[tokio::test]
async fn product_listing_decodes_full_and_sparse_entries() {
	let server = MockServer::start_async().await;
	let (client, store) = build_test_client(&server.base_url());

	seed_tokens(&store, "live", "refresh-1").await;

	let mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/api/products/list/").header("authorization", "Bearer live");
			then.status(200).header("content-type", "application/json").body(PRODUCTS_BODY);
		})
		.await;
	let products = client.list_products().await.expect("Product listing should succeed.");

	mock.assert_async().await;

	assert_eq!(products.len(), 2);
	assert_eq!(products[0].isbn, "978-3-111");
	assert_eq!(products[0].release_date.as_deref(), Some("04.03.2024"));
	assert_eq!(products[1].release_date, None);
	assert!(!products[1].is_owned);
}

#[tokio::test]
async fn franchise_listing_decodes_membership() {
	let server = MockServer::start_async().await;
	let (client, store) = build_test_client(&server.base_url());

	seed_tokens(&store, "live", "refresh-1").await;

	let _mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/api/franchises/list/");
			then.status(200).header("content-type", "application/json").body(
				r#"[{"id":"f-1","title":"Alpha Chronicle","products":["978-3-111"],"is_followed":true}]"#,
			);
		})
		.await;
	let franchises = client.list_franchises().await.expect("Franchise listing should succeed.");

	assert_eq!(franchises.len(), 1);
	assert_eq!(franchises[0].products, ["978-3-111"]);
	assert!(franchises[0].is_followed);
}

#[tokio::test]
async fn publisher_listing_decodes_catalog_entries() {
	let server = MockServer::start_async().await;
	let (client, store) = build_test_client(&server.base_url());

	seed_tokens(&store, "live", "refresh-1").await;

	let _mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/api/publishers/list/");
			then.status(200).header("content-type", "application/json").body(
				r#"[{"id":"p-1","name":"Example Press","website":"https://press.example.com"}]"#,
			);
		})
		.await;
	let publishers = client.list_publishers().await.expect("Publisher listing should succeed.");

	assert_eq!(publishers.len(), 1);
	assert_eq!(publishers[0].name, "Example Press");
	assert!(publishers[0].products.is_empty());
}

#[tokio::test]
async fn ownership_toggle_reports_the_post_toggle_state() {
	let server = MockServer::start_async().await;
	let (client, store) = build_test_client(&server.base_url());

	seed_tokens(&store, "live", "refresh-1").await;

	let mock = server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/api/products/978-3-111/toggle-owned/")
				.header("authorization", "Bearer live");
			then.status(200)
				.header("content-type", "application/json")
				.body(r#"{"detail":"Product marked as owned.","is_owned":true}"#);
		})
		.await;
	let outcome = client
		.toggle_product_owned("978-3-111")
		.await
		.expect("Ownership toggle should succeed.");

	mock.assert_async().await;

	assert_eq!(outcome.is_owned, Some(true));
	assert_eq!(outcome.is_followed, None);
}

#[tokio::test]
async fn follow_toggle_reports_the_post_toggle_state() {
	let server = MockServer::start_async().await;
	let (client, store) = build_test_client(&server.base_url());

	seed_tokens(&store, "live", "refresh-1").await;

	let mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/api/franchises/f-1/follow/");
			then.status(200)
				.header("content-type", "application/json")
				.body(r#"{"detail":"Franchise unfollowed.","is_followed":false}"#);
		})
		.await;
	let outcome = client
		.toggle_franchise_follow("f-1")
		.await
		.expect("Follow toggle should succeed.");

	mock.assert_async().await;

	assert_eq!(outcome.is_followed, Some(false));
	assert_eq!(outcome.is_owned, None);
}

#[tokio::test]
async fn log_submission_ships_level_tag_and_device_context() {
	let server = MockServer::start_async().await;
	let (client, store) = build_test_client(&server.base_url());

	seed_tokens(&store, "live", "refresh-1").await;

	let mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/api/logs/").json_body(serde_json::json!({
				"level": "ERROR",
				"tag": "catalog",
				"message": "listing failed to decode",
				"device_info": {
					"platform": "android",
					"model": "Pixel 8",
					"os_version": "15"
				}
			}));
			then.status(201)
				.header("content-type", "application/json")
				.body(r#"{"detail":"Log entry created"}"#);
		})
		.await;
	let entry = LogEntry::new(LogLevel::Error, "catalog", "listing failed to decode")
		.with_device_info(DeviceInfo {
			platform: "android".into(),
			model: "Pixel 8".into(),
			os_version: "15".into(),
		});

	client.submit_log(&entry).await.expect("Log submission should succeed.");

	mock.assert_async().await;
}

#[tokio::test]
async fn malformed_listing_payload_reports_the_offending_path() {
	let server = MockServer::start_async().await;
	let (client, store) = build_test_client(&server.base_url());

	seed_tokens(&store, "live", "refresh-1").await;

	let _mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/api/products/list/");
			then.status(200)
				.header("content-type", "application/json")
				.body(r#"[{"isbn":42,"title":"Broken","type":"MANGA"}]"#);
		})
		.await;
	let err = client
		.list_products()
		.await
		.expect_err("A type mismatch in the payload should fail decoding.");

	match err {
		Error::Decode { source, status } => {
			assert_eq!(status, Some(200));
			assert_eq!(source.path().to_string(), "[0].isbn");
		},
		other => panic!("Expected a decode error, got {other:?}."),
	}
}
