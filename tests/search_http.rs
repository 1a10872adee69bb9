use meme_stream_lib::config::ClassifierConfig;
use meme_stream_lib::{MemeSearch, MemeStreamConfig, SearchOutcome, SourceKind};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config_for(server: &MockServer) -> MemeStreamConfig {
    let mut config = MemeStreamConfig::default();
    config.timeout_secs = 5;
    config.primary.origin = server.uri();
    config.primary.search_url = format!("{}/search?q={{query}}", server.uri());
    config.fallback.search_url = format!("{}/images/search?q={{query}}&form=HDRSC2", server.uri());
    config
}

// The blocking client must live outside the async test runtime.
async fn run_search(config: MemeStreamConfig, query: &str) -> SearchOutcome {
    let query = query.to_string();
    tokio::task::spawn_blocking(move || {
        let search = MemeSearch::from_config(&config).unwrap();
        search.search(&query)
    })
    .await
    .unwrap()
}

#[tokio::test(flavor = "multi_thread")]
async fn primary_results_skip_fallback() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", "cat meme"))
        .and(header("user-agent", "Mozilla/5.0"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"<html><body><img src="//imgur.com/meme1.jpg"><img src="//imgur.com/cat.png"></body></html>"#,
        ))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/images/search"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let mut config = config_for(&server);
    config.classifier = ClassifierConfig {
        hosts: Vec::new(),
        keywords: vec!["meme".to_string()],
    };

    let outcome = run_search(config, "cat").await;
    assert_eq!(outcome.urls, vec!["https://imgur.com/meme1.jpg"]);
    assert_eq!(outcome.source, Some(SourceKind::Primary));
    assert!(outcome.warnings.is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn root_relative_sources_use_primary_origin() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(r#"<img src="/memes/a.png">"#),
        )
        .mount(&server)
        .await;

    let outcome = run_search(config_for(&server), "dog").await;
    assert_eq!(outcome.urls, vec![format!("{}/memes/a.png", server.uri())]);
}

#[tokio::test(flavor = "multi_thread")]
async fn empty_primary_falls_back() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html><body></body></html>"))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/images/search"))
        .and(query_param("q", "cat meme"))
        .and(query_param("form", "HDRSC2"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(r#"<script>{murl":"https://x.com/funny.png"}</script>"#),
        )
        .expect(1)
        .mount(&server)
        .await;

    let outcome = run_search(config_for(&server), "cat").await;
    assert_eq!(outcome.urls, vec!["https://x.com/funny.png"]);
    assert_eq!(outcome.source, Some(SourceKind::Fallback));
}

#[tokio::test(flavor = "multi_thread")]
async fn both_sources_failing_returns_empty_with_two_warnings() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .expect(2)
        .mount(&server)
        .await;

    let outcome = run_search(config_for(&server), "cat").await;
    assert!(outcome.urls.is_empty());
    assert_eq!(outcome.source, None);
    assert_eq!(outcome.warnings.len(), 2);
    assert_eq!(outcome.warnings[0].to_string(), "Imgur error: HTTP 500");
    assert_eq!(outcome.warnings[1].to_string(), "Bing error: HTTP 500");
}

#[tokio::test(flavor = "multi_thread")]
async fn unreachable_primary_warns_and_falls_back() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/images/search"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("murl&quot;:&quot;https://i.imgflip.com/9.jpg&quot;"),
        )
        .mount(&server)
        .await;

    let mut config = config_for(&server);
    // Port 9 on localhost (discard) is expected to refuse connections.
    config.primary.search_url = "http://127.0.0.1:9/search?q={query}".to_string();

    let outcome = run_search(config, "cat").await;
    assert_eq!(outcome.urls, vec!["https://i.imgflip.com/9.jpg"]);
    assert_eq!(outcome.warnings.len(), 1);
    assert_eq!(outcome.warnings[0].source, SourceKind::Primary);
}

#[tokio::test(flavor = "multi_thread")]
async fn result_list_respects_limit() {
    let server = MockServer::start().await;
    let body: String = (0..300)
        .map(|i| format!(r#"<img src="//i.imgur.com/meme{}.jpg">"#, i))
        .collect();
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(&server)
        .await;

    let mut config = config_for(&server);
    config.result_limit = 56;
    let outcome = run_search(config, "cat").await;
    assert_eq!(outcome.urls.len(), 56);
    assert!(outcome
        .urls
        .iter()
        .all(|u| u.starts_with("https://") && u.ends_with(".jpg")));
}
