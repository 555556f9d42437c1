use tokio::runtime::Runtime;
use webtoon_core::EpisodeSource;
use webtoon_engine::{FetchSettings, NaverClient, ThumbnailSource};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const SERIES: u32 = 696_617;

const LISTING_PAGE: &str = r#"<html><body>
<table class="viewList">
    <tr>
        <td><a href="/webtoon/detail?titleId=696617&amp;no=42"><img src="/thumb/42.jpg"></a></td>
        <td class="title"><a href="/webtoon/detail?titleId=696617&amp;no=42">42화</a></td>
        <td><strong>9.88</strong></td>
        <td>2016.03.02</td>
    </tr>
</table>
</body></html>"#;

// The client owns its own runtime, so these tests drive wiremock from a
// separate one instead of using #[tokio::test].

#[test]
fn episode_page_sends_series_and_page_parameters() {
    let rt = Runtime::new().unwrap();
    let server = rt.block_on(MockServer::start());
    rt.block_on(
        Mock::given(method("GET"))
            .and(path("/webtoon/list"))
            .and(query_param("titleId", "696617"))
            .and(query_param("page", "3"))
            .respond_with(
                ResponseTemplate::new(200).set_body_raw(LISTING_PAGE, "text/html; charset=utf-8"),
            )
            .mount(&server),
    );

    let client = NaverClient::with_base_url(&server.uri(), FetchSettings::default()).unwrap();
    let episodes = client.episode_page(SERIES, 3).expect("listing fetch");

    assert_eq!(episodes.len(), 1);
    assert_eq!(episodes[0].no, 42);
    assert_eq!(episodes[0].title, "42화");
    assert!(episodes[0].thumbnail_url.ends_with("/thumb/42.jpg"));
}

#[test]
fn full_listing_requests_one_oversized_page() {
    let rt = Runtime::new().unwrap();
    let server = rt.block_on(MockServer::start());
    rt.block_on(
        Mock::given(method("GET"))
            .and(path("/webtoon/list"))
            .and(query_param("titleId", "696617"))
            .and(query_param("page", "1"))
            .and(query_param("rows", "99999"))
            .respond_with(
                ResponseTemplate::new(200).set_body_raw(LISTING_PAGE, "text/html; charset=utf-8"),
            )
            .mount(&server),
    );

    let client = NaverClient::with_base_url(&server.uri(), FetchSettings::default()).unwrap();
    let episodes = client.full_listing(SERIES).expect("listing fetch");

    assert_eq!(episodes.len(), 1);
}

#[test]
fn http_error_surfaces_as_remote_unavailable() {
    let rt = Runtime::new().unwrap();
    let server = rt.block_on(MockServer::start());
    rt.block_on(
        Mock::given(method("GET"))
            .and(path("/webtoon/list"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server),
    );

    let client = NaverClient::with_base_url(&server.uri(), FetchSettings::default()).unwrap();
    let err = client.episode_page(SERIES, 1).unwrap_err();

    assert!(err.reason.contains("http status 500"), "reason: {}", err.reason);
}

#[test]
fn page_without_listing_table_surfaces_as_remote_unavailable() {
    let rt = Runtime::new().unwrap();
    let server = rt.block_on(MockServer::start());
    rt.block_on(
        Mock::given(method("GET"))
            .and(path("/webtoon/list"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_raw("<html><body>점검 중</body></html>", "text/html; charset=utf-8"),
            )
            .mount(&server),
    );

    let client = NaverClient::with_base_url(&server.uri(), FetchSettings::default()).unwrap();
    let err = client.episode_page(SERIES, 1).unwrap_err();

    assert!(err.reason.contains("listing table"), "reason: {}", err.reason);
}

#[test]
fn thumbnail_fetch_returns_image_bytes() {
    let rt = Runtime::new().unwrap();
    let server = rt.block_on(MockServer::start());
    let body = vec![0xFFu8, 0xD8, 0xFF, 0xE0];
    rt.block_on(
        Mock::given(method("GET"))
            .and(path("/thumb/42.jpg"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(body.clone(), "image/jpeg"))
            .mount(&server),
    );

    let client = NaverClient::with_base_url(&server.uri(), FetchSettings::default()).unwrap();
    let url = format!("{}/thumb/42.jpg", server.uri());

    assert_eq!(client.thumbnail(&url).expect("image fetch"), body);
}
