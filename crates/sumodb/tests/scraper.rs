use std::fs;

use chrono::NaiveDate;
use sumodb::parser::ParseError;
use sumodb::{ScraperError, WebScraper};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn fixture() -> String {
    fs::read_to_string("fixtures/rikishi_12370.html").expect("Failed to read fixture")
}

async fn mount_rikishi(server: &MockServer, id: u32, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path("/Rikishi.aspx"))
        .and(query_param("r", id.to_string()))
        .respond_with(response)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_fetch_rikishi_stamps_requested_id() {
    let server = MockServer::start().await;
    mount_rikishi(
        &server,
        12370,
        ResponseTemplate::new(200).set_body_string(fixture()),
    )
    .await;

    let scraper = WebScraper::with_base_url(server.uri()).expect("Failed to build scraper");
    let rikishi = scraper
        .fetch_rikishi(12370)
        .await
        .expect("Failed to fetch rikishi");

    assert_eq!(rikishi.id, 12370);
    assert_eq!(rikishi.shikona, "wakatakakage atsushi");
    assert_eq!(rikishi.highest_rank, "sekiwake");
    assert_eq!(
        rikishi.birth_date,
        Some(NaiveDate::from_ymd_opt(1994, 12, 6).unwrap())
    );
    assert_eq!((rikishi.height_cm, rikishi.weight_kg), (182, 140));
    assert_eq!(rikishi.first_basho, "2017.03");
}

#[tokio::test]
async fn test_fetch_rikishi_http_error_status() {
    let server = MockServer::start().await;
    mount_rikishi(&server, 1, ResponseTemplate::new(500)).await;

    let scraper = WebScraper::with_base_url(server.uri()).unwrap();
    let err = scraper.fetch_rikishi(1).await.unwrap_err();

    assert!(matches!(err, ScraperError::HttpError(_)), "got {err:?}");
}

#[tokio::test]
async fn test_fetch_rikishi_rejects_zero_id() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string(fixture()))
        .expect(0)
        .mount(&server)
        .await;

    let scraper = WebScraper::with_base_url(server.uri()).unwrap();
    let err = scraper.fetch_rikishi(0).await.unwrap_err();

    assert!(matches!(err, ScraperError::InvalidId(0)), "got {err:?}");
}

#[tokio::test]
async fn test_fetch_rikishi_empty_body() {
    let server = MockServer::start().await;
    mount_rikishi(&server, 2, ResponseTemplate::new(200).set_body_string("")).await;

    let scraper = WebScraper::with_base_url(server.uri()).unwrap();
    let err = scraper.fetch_rikishi(2).await.unwrap_err();

    assert!(
        matches!(err, ScraperError::ParseError(ParseError::EmptyDocument(_))),
        "got {err:?}"
    );
}

#[tokio::test]
async fn test_fetch_rikishi_page_without_profile_table() {
    let server = MockServer::start().await;
    mount_rikishi(
        &server,
        3,
        ResponseTemplate::new(200)
            .set_body_string("<html><body><p>Rikishi not found</p></body></html>"),
    )
    .await;

    let scraper = WebScraper::with_base_url(server.uri()).unwrap();
    let err = scraper.fetch_rikishi(3).await.unwrap_err();

    assert!(
        matches!(err, ScraperError::ParseError(ParseError::TableNotFound)),
        "got {err:?}"
    );
}

#[tokio::test]
async fn test_fetch_rikishi_batch_keeps_order_and_isolates_failures() {
    let server = MockServer::start().await;
    mount_rikishi(
        &server,
        12370,
        ResponseTemplate::new(200).set_body_string(fixture()),
    )
    .await;
    mount_rikishi(&server, 404, ResponseTemplate::new(404)).await;

    let scraper = WebScraper::with_base_url(server.uri()).unwrap();
    let results = scraper.fetch_rikishi_batch(&[404, 12370]).await;

    assert_eq!(results.len(), 2);
    assert_eq!(results[0].0, 404);
    assert!(results[0].1.is_err());
    assert_eq!(results[1].0, 12370);
    let rikishi = results[1].1.as_ref().expect("Second fetch should succeed");
    assert_eq!(rikishi.heya, "arashio");
}

#[test]
fn test_rikishi_url() {
    let scraper = WebScraper::with_base_url("http://localhost:8080/").unwrap();
    assert_eq!(
        scraper.rikishi_url(12370),
        "http://localhost:8080/Rikishi.aspx?r=12370"
    );
}

#[test]
fn test_rikishi_serializes_to_json() {
    let rikishi = sumodb::parse_rikishi_page(&fixture(), 12370).unwrap();

    let json = serde_json::to_value(&rikishi).unwrap();
    assert_eq!(json["id"], 12370);
    assert_eq!(json["birth_date"], "1994-12-06");
    assert_eq!(json["first_basho"], "2017.03");

    let back: sumodb::Rikishi = serde_json::from_value(json).unwrap();
    assert_eq!(back, rikishi);
}
