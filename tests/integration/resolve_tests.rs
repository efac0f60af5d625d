//! Integration tests for comic resolution over HTTP
//!
//! These tests use wiremock to stand in for the comic site and drive the
//! real `HttpFetcher` through the resolver and dispatcher.

use std::sync::Arc;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};
use xkcd_bot::bot::{CommandSet, Dispatcher};
use xkcd_bot::comic::{fetch_url, ComicRequest, HttpFetcher, LatestComicId, Resolution, Resolver};
use xkcd_bot::config::{Config, HttpConfig, ReplyFormat};
use xkcd_bot::FetchError;

/// Creates a config pointing every site URL at the mock server
fn create_test_config(base_url: &str) -> Config {
    let host = url::Url::parse(base_url).expect("Failed to parse base URL");
    let image_host = format!(
        "{}:{}",
        host.host_str().expect("Failed to extract host"),
        host.port().expect("Mock server has a port")
    );

    let mut config = Config::default();
    config.site.comic_prefix = format!("{}/", base_url);
    config.site.random_url = format!("{}/random/comic/", base_url);
    config.site.image_host = image_host;
    config.http.timeout_secs = 5;
    config.http.connect_timeout_secs = 2;
    xkcd_bot::config::validate(&config).expect("Test config is valid");
    config
}

fn create_resolver(config: &Config) -> Resolver<HttpFetcher> {
    let fetcher = HttpFetcher::new(&config.http).expect("Failed to build fetcher");
    Resolver::new(fetcher, config)
}

/// A page shaped like a real comic page
fn comic_page(permalink: &str, title: &str, image_url: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html><head><title>xkcd: {title}</title></head>
<body>
<div id="ctitle">{title}</div>
<div id="comic"><img src="{image_url}" title="alt text" /></div>
<br />
Permanent link to this comic: <a href="{permalink}">{permalink}</a><br />
Image URL (for hotlinking/embedding): <a href= "{image_url}">{image_url}</a>
</body></html>"#
    )
}

async fn mount_page(server: &MockServer, page_path: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(page_path))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body)
                .insert_header("content-type", "text/html"),
        )
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_latest_over_http() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();
    let permalink = format!("{}/3000/", base_url);
    let image = format!("{}/comics/latest.png", base_url);

    mount_page(&mock_server, "/", comic_page(&permalink, "Latest", &image)).await;
    mount_page(&mock_server, "/3000", comic_page(&permalink, "Latest", &image)).await;

    let resolver = create_resolver(&create_test_config(&base_url));

    assert_eq!(resolver.latest_id().await, LatestComicId::live(3000));
    assert_eq!(resolver.reply(&ComicRequest::Latest).await, permalink);
}

#[tokio::test]
async fn test_by_id_past_latest_never_fetches_comic() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();
    let latest = format!("{}/3000/", base_url);

    mount_page(&mock_server, "/", comic_page(&latest, "Latest", "")).await;

    // Verified when the server is dropped
    Mock::given(method("GET"))
        .and(path("/5000"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let config = create_test_config(&base_url);
    let resolver = create_resolver(&config);

    let resolution = resolver.resolve(&ComicRequest::ById(5000)).await;
    assert!(matches!(
        resolution,
        Resolution::NotYetWritten {
            requested: 5000,
            latest: 3000
        }
    ));
    assert_eq!(
        resolution.render(&config.replies),
        config.replies.not_yet_written
    );
}

#[tokio::test]
async fn test_random_follows_redirect() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();
    let permalink = format!("{}/1234/", base_url);

    Mock::given(method("GET"))
        .and(path("/random/comic/"))
        .respond_with(
            ResponseTemplate::new(302).insert_header("location", permalink.as_str()),
        )
        .expect(1)
        .mount(&mock_server)
        .await;
    mount_page(&mock_server, "/1234/", comic_page(&permalink, "Random", "")).await;

    let resolver = create_resolver(&create_test_config(&base_url));

    assert_eq!(resolver.reply(&ComicRequest::Random).await, permalink);
}

#[tokio::test]
async fn test_front_page_error_uses_fallback() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();
    let permalink = format!("{}/2976/", base_url);

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;
    mount_page(&mock_server, "/2976", comic_page(&permalink, "Fallback", "")).await;

    let resolver = create_resolver(&create_test_config(&base_url));

    let latest = resolver.latest_id().await;
    assert_eq!(latest.id, 2976);
    assert!(latest.is_fallback());
    assert_eq!(resolver.reply(&ComicRequest::Latest).await, permalink);
}

#[tokio::test]
async fn test_comic_error_replies_unavailable() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/",
        comic_page(&format!("{}/3000/", base_url), "Latest", ""),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/42"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock_server)
        .await;

    let config = create_test_config(&base_url);
    let resolver = create_resolver(&config);

    let resolution = resolver.resolve(&ComicRequest::ById(42)).await;
    assert!(matches!(
        resolution,
        Resolution::Unavailable(FetchError::Status { status: 503, .. })
    ));
    assert_eq!(resolution.render(&config.replies), config.replies.unavailable);
}

#[tokio::test]
async fn test_fetch_url_reports_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/gone"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let client = xkcd_bot::comic::build_http_client(&HttpConfig::default()).unwrap();
    let url = format!("{}/gone", mock_server.uri());

    match fetch_url(&client, &url).await {
        Err(FetchError::Status { url: failed, status }) => {
            assert_eq!(status, 404);
            assert_eq!(failed, url);
        }
        other => panic!("expected a status error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_title_and_image_over_http() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();
    let mut config = create_test_config(&base_url);
    let image = format!("https://{}/comics/standards.png", config.site.image_host);

    mount_page(
        &mock_server,
        "/",
        comic_page(&format!("{}/3000/", base_url), "Latest", ""),
    )
    .await;
    mount_page(
        &mock_server,
        "/927",
        comic_page(&format!("{}/927/", base_url), "Standards", &image),
    )
    .await;

    config.replies.format = ReplyFormat::TitleAndImage;
    let resolver = create_resolver(&config);

    assert_eq!(
        resolver
            .reply(&ComicRequest::Alias("standards".to_string()))
            .await,
        format!("**Standards**\n{}", image)
    );
}

#[tokio::test]
async fn test_dispatch_standards_end_to_end() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();
    let permalink = format!("{}/927/", base_url);

    mount_page(
        &mock_server,
        "/",
        comic_page(&format!("{}/3000/", base_url), "Latest", ""),
    )
    .await;
    mount_page(&mock_server, "/927", comic_page(&permalink, "Standards", "")).await;

    let config = create_test_config(&base_url);
    let resolver = Arc::new(create_resolver(&config));
    let commands = CommandSet::new(&config.bot.command_prefix, resolver.aliases());
    let dispatcher = Dispatcher::new(resolver, commands);

    assert_eq!(dispatcher.dispatch("xkcd-standards", None).await, permalink);
    assert_eq!(dispatcher.dispatch("xkcd", Some(927)).await, permalink);
}
