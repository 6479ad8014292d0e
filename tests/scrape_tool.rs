mod common;

use common::{RecordingClient, Reply, catalog_with};
use firecrawl_mcp::ScrapeFormat;
use firecrawl_mcp::tools::SCRAPE_TOOL;
use serde_json::json;

#[tokio::test]
async fn test_scrape_returns_pretty_json_of_result() {
    let client = RecordingClient::scraping(Reply::Ok(Some(json!({ "markdown": "# Test" }))));
    let catalog = catalog_with(client.clone());
    let tool = catalog.get(SCRAPE_TOOL).expect("scrape tool registered");

    let response = tool.invoke(json!({ "url": "https://example.com" })).await;

    assert!(!response.is_error);
    assert_eq!(response.content.len(), 1);
    assert_eq!(response.text_content(), Some("{\n  \"markdown\": \"# Test\"\n}"));

    let calls = client.scrapes();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].url, "https://example.com");
    assert_eq!(calls[0].formats, vec![ScrapeFormat::Markdown]);
    assert_eq!(calls[0].wait_for, None);
    assert_eq!(calls[0].timeout, 30000);
    assert_eq!(calls[0].include_tags, None);
    assert_eq!(calls[0].exclude_tags, None);
    assert_eq!(calls[0].headers, None);
}

#[tokio::test]
async fn test_scrape_forwards_every_option() {
    let client = RecordingClient::scraping(Reply::Ok(Some(json!({ "rawHtml": "<p>hi</p>" }))));
    let catalog = catalog_with(client.clone());

    let response = catalog
        .get(SCRAPE_TOOL)
        .expect("scrape tool registered")
        .invoke(json!({
            "url": "https://example.com/docs",
            "formats": ["rawHtml", "screenshot"],
            "includeTags": ["main"],
            "excludeTags": ["nav", "footer"],
            "headers": { "Accept-Language": "en" },
            "waitFor": 1000,
            "timeout": 5000,
        }))
        .await;

    assert!(!response.is_error);

    let calls = client.scrapes();
    assert_eq!(calls.len(), 1);
    let call = &calls[0];
    assert_eq!(call.formats, vec![ScrapeFormat::RawHtml, ScrapeFormat::Screenshot]);
    assert_eq!(call.include_tags, Some(vec!["main".to_string()]));
    assert_eq!(
        call.exclude_tags,
        Some(vec!["nav".to_string(), "footer".to_string()])
    );
    assert_eq!(
        call.headers.as_ref().and_then(|h| h.get("Accept-Language")).map(String::as_str),
        Some("en")
    );
    assert_eq!(call.wait_for, Some(1000));
    assert_eq!(call.timeout, 5000);
}

#[tokio::test]
async fn test_missing_url_never_reaches_the_client() {
    let client = RecordingClient::scraping(Reply::Ok(Some(json!({ "markdown": "unused" }))));
    let catalog = catalog_with(client.clone());

    let response = catalog
        .get(SCRAPE_TOOL)
        .expect("scrape tool registered")
        .invoke(json!({}))
        .await;

    assert!(response.is_error);
    let text = response.text_content().expect("one text block");
    assert!(text.starts_with("Validation Error: "), "{text}");
    assert!(text.contains("url: Required"), "{text}");
    assert!(client.scrapes().is_empty());
}

#[tokio::test]
async fn test_invalid_values_are_rejected() {
    let client = RecordingClient::scraping(Reply::Ok(Some(json!({ "markdown": "unused" }))));
    let catalog = catalog_with(client.clone());
    let tool = catalog.get(SCRAPE_TOOL).expect("scrape tool registered");

    for input in [
        json!({ "url": "not a url" }),
        json!({ "url": "https://example.com", "formats": [] }),
        json!({ "url": "https://example.com", "formats": ["pdf"] }),
        json!({ "url": "https://example.com", "timeout": 0 }),
        json!({ "url": "https://example.com", "waitFor": -1 }),
        json!("https://example.com"),
    ] {
        let response = tool.invoke(input.clone()).await;
        assert!(response.is_error, "{input}");
        assert!(
            response
                .text_content()
                .is_some_and(|text| text.starts_with("Validation Error: ")),
            "{input}"
        );
    }

    assert!(client.scrapes().is_empty());
}

#[tokio::test]
async fn test_empty_result_is_an_error() {
    let client = RecordingClient::scraping(Reply::Ok(None));
    let catalog = catalog_with(client.clone());

    let response = catalog
        .get(SCRAPE_TOOL)
        .expect("scrape tool registered")
        .invoke(json!({ "url": "https://example.com" }))
        .await;

    assert!(response.is_error);
    assert_eq!(
        response.text_content(),
        Some("Error: Failed to scrape webpage: No result returned")
    );
    assert_eq!(client.scrapes().len(), 1);
}

#[tokio::test]
async fn test_scrape_keeps_remote_key_order() {
    let data: serde_json::Value = serde_json::from_str(
        r#"{"markdown":"T","metadata":{"title":"x","description":"y"},"html":"<p/>"}"#,
    )
    .expect("valid json");
    let client = RecordingClient::scraping(Reply::Ok(Some(data)));
    let catalog = catalog_with(client);

    let response = catalog
        .get(SCRAPE_TOOL)
        .expect("scrape tool registered")
        .invoke(json!({ "url": "https://example.com" }))
        .await;

    assert!(!response.is_error);
    assert_eq!(
        response.text_content(),
        Some(
            "{\n  \"markdown\": \"T\",\n  \"metadata\": {\n    \"title\": \"x\",\n    \"description\": \"y\"\n  },\n  \"html\": \"<p/>\"\n}"
        )
    );
}

#[tokio::test]
async fn test_whole_float_timeout_is_forwarded_as_integer() {
    let client = RecordingClient::scraping(Reply::Ok(Some(json!({ "markdown": "# Test" }))));
    let catalog = catalog_with(client.clone());

    let response = catalog
        .get(SCRAPE_TOOL)
        .expect("scrape tool registered")
        .invoke(json!({ "url": "https://example.com", "timeout": 1000.0, "waitFor": 250.0 }))
        .await;

    assert!(!response.is_error);
    let calls = client.scrapes();
    assert_eq!(calls[0].timeout, 1000);
    assert_eq!(calls[0].wait_for, Some(250));
}
