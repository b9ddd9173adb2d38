use previewfm::{
    config::Credentials,
    error::Error,
    spotify::{
        self, AccessToken, CatalogClient, EmbedPreviewLookup, PreviewLookup, resolve_previews,
    },
};
use serde_json::{Value, json};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_string, header, method, path, query_param},
};

fn credentials() -> Credentials {
    Credentials {
        client_id: "id".to_string(),
        client_secret: "secret".to_string(),
    }
}

fn catalog(server: &MockServer) -> CatalogClient {
    CatalogClient::new(
        reqwest::Client::new(),
        format!("{}/v1", server.uri()),
        AccessToken::new("test-token"),
    )
}

fn artist_json(id: &str, name: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "genres": ["jazz", "bebop"],
        "popularity": 61,
        "images": [{ "url": format!("https://i.scdn.co/image/{id}"), "height": 640, "width": 640 }]
    })
}

fn track_json(id: &str, name: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "duration_ms": 215000,
        "popularity": 70,
        "artists": [{ "id": "A1", "name": "Someone" }],
        "album": { "name": "Record", "images": [], "release_date": "1999-01-01" }
    })
}

fn artist_page(items: Vec<Value>) -> Value {
    json!({ "artists": { "items": items, "total": 0 } })
}

fn query_value(request: &wiremock::Request, key: &str) -> Option<String> {
    request
        .url
        .query_pairs()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.into_owned())
}

async fn search_requests(server: &MockServer) -> Vec<wiremock::Request> {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .into_iter()
        .filter(|r| r.url.path() == "/v1/search")
        .collect()
}

// Token provider

#[tokio::test]
async fn test_token_is_returned_on_success() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/token"))
        .and(header("authorization", "Basic aWQ6c2VjcmV0"))
        .and(header("content-type", "application/x-www-form-urlencoded"))
        .and(body_string("grant_type=client_credentials"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "BQC-token",
            "token_type": "Bearer",
            "expires_in": 3600
        })))
        .expect(1)
        .mount(&server)
        .await;

    let token = spotify::client_credentials_token(
        &reqwest::Client::new(),
        &format!("{}/api/token", server.uri()),
        &credentials(),
    )
    .await
    .unwrap();

    assert_eq!(token.as_str(), "BQC-token");
}

#[tokio::test]
async fn test_token_rejection_is_auth_error() {
    for status in [400u16, 401] {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/token"))
            .respond_with(ResponseTemplate::new(status).set_body_json(json!({
                "error": "invalid_client",
                "error_description": "Invalid client"
            })))
            .mount(&server)
            .await;

        let result = spotify::client_credentials_token(
            &reqwest::Client::new(),
            &format!("{}/api/token", server.uri()),
            &credentials(),
        )
        .await;

        match result {
            Err(Error::Auth(msg)) => {
                assert!(msg.contains("Invalid client"), "{msg}");
                assert!(msg.contains(&status.to_string()), "{msg}");
            }
            other => panic!("expected auth error for {status}, got {:?}", other),
        }
    }
}

#[tokio::test]
async fn test_unreachable_token_endpoint_is_auth_error() {
    // Reserve a free port, then release it so nothing is listening there
    let port = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port();

    let result = spotify::client_credentials_token(
        &reqwest::Client::new(),
        &format!("http://127.0.0.1:{port}/api/token"),
        &credentials(),
    )
    .await;

    assert!(
        matches!(result, Err(Error::Auth(_))),
        "expected auth error, got {:?}",
        result
    );
}

#[tokio::test]
async fn test_token_body_without_usable_token_is_auth_error() {
    for body in [json!({ "access_token": "" }), json!({})] {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body.clone()))
            .expect(1)
            .mount(&server)
            .await;

        let result = spotify::client_credentials_token(
            &reqwest::Client::new(),
            &format!("{}/api/token", server.uri()),
            &credentials(),
        )
        .await;

        assert!(
            matches!(result, Err(Error::Auth(_))),
            "expected auth error for {body}, got {:?}",
            result
        );
    }
}

// Catalog client

#[tokio::test]
async fn test_list_genres_sends_bearer_token() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/recommendations/available-genre-seeds"))
        .and(header("authorization", "Bearer test-token"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "genres": ["acoustic", "rock"] })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let genres = catalog(&server).list_genres().await.unwrap();
    assert_eq!(genres, vec!["acoustic", "rock"]);
}

#[tokio::test]
async fn test_genre_search_falls_back_once_to_plain_text() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .and(query_param("q", "genre:\"jazz\""))
        .and(query_param("type", "artist"))
        .and(query_param("limit", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(artist_page(vec![])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .and(query_param("q", "jazz"))
        .and(query_param("type", "artist"))
        .and(query_param("limit", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(artist_page(vec![])))
        .expect(1)
        .mount(&server)
        .await;

    let artists = catalog(&server).search_artists(Some("jazz")).await.unwrap();
    assert!(artists.is_empty());

    let requests = search_requests(&server).await;
    assert_eq!(requests.len(), 2);
    for request in &requests {
        assert_eq!(query_value(request, "limit").as_deref(), Some("1"));
        let offset: u32 = query_value(request, "offset").unwrap().parse().unwrap();
        assert!(offset < 50, "genre offset {offset} out of range");
    }
}

#[tokio::test]
async fn test_genre_search_fallback_results_are_returned() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .and(query_param("q", "genre:\"city pop\""))
        .respond_with(ResponseTemplate::new(200).set_body_json(artist_page(vec![])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .and(query_param("q", "city pop"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(artist_page(vec![artist_json("A9", "Mariya")])),
        )
        .mount(&server)
        .await;

    let artists = catalog(&server)
        .search_artists(Some("city pop"))
        .await
        .unwrap();
    assert_eq!(artists.len(), 1);
    assert_eq!(artists[0].id, "A9");
}

#[tokio::test]
async fn test_exact_genre_match_skips_fallback() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .and(query_param("q", "genre:\"jazz\""))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(artist_page(vec![artist_json("A1", "Miles")])),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .and(query_param("q", "jazz"))
        .respond_with(ResponseTemplate::new(200).set_body_json(artist_page(vec![])))
        .expect(0)
        .mount(&server)
        .await;

    let artists = catalog(&server).search_artists(Some("jazz")).await.unwrap();
    assert_eq!(artists[0].name, "Miles");
    assert_eq!(artists[0].image_url().as_deref(), Some("https://i.scdn.co/image/A1"));
}

#[tokio::test]
async fn test_random_search_uses_single_letter_probe() {
    for _ in 0..5 {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(artist_page(vec![])))
            .mount(&server)
            .await;

        let artists = catalog(&server).search_artists(None).await.unwrap();
        assert!(artists.is_empty());

        let requests = search_requests(&server).await;
        assert_eq!(requests.len(), 1, "random probe must issue exactly one search");

        let q = query_value(&requests[0], "q").unwrap();
        assert_eq!(q.len(), 1);
        assert!(q.chars().all(|c| c.is_ascii_lowercase()), "probe {q:?}");
        assert_eq!(query_value(&requests[0], "limit").as_deref(), Some("1"));
        assert_eq!(query_value(&requests[0], "type").as_deref(), Some("artist"));
        let offset: u32 = query_value(&requests[0], "offset").unwrap().parse().unwrap();
        assert!(offset < 1000);
    }
}

#[tokio::test]
async fn test_top_tracks_are_truncated_to_five_in_order() {
    let server = MockServer::start().await;
    let tracks: Vec<Value> = (0..8)
        .map(|i| track_json(&format!("T{i}"), &format!("Song {i}")))
        .collect();
    Mock::given(method("GET"))
        .and(path("/v1/artists/A1/top-tracks"))
        .and(query_param("market", "US"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "tracks": tracks })))
        .expect(1)
        .mount(&server)
        .await;

    let tracks = catalog(&server).get_top_tracks("A1").await.unwrap();
    let ids: Vec<&str> = tracks.iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids, vec!["T0", "T1", "T2", "T3", "T4"]);
}

#[tokio::test]
async fn test_short_top_track_lists_are_untouched() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/artists/A1/top-tracks"))
        .and(query_param("market", "SE"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "tracks": [track_json("T0", "Only One"), track_json("T1", "Second")]
        })))
        .mount(&server)
        .await;

    let tracks = catalog(&server)
        .with_market("SE")
        .get_top_tracks("A1")
        .await
        .unwrap();
    assert_eq!(tracks.len(), 2);
    assert_eq!(tracks[0].duration_ms, 215000);
}

#[tokio::test]
async fn test_upstream_failure_carries_api_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .respond_with(ResponseTemplate::new(502).set_body_json(json!({
            "error": { "status": 502, "message": "Bad gateway" }
        })))
        .mount(&server)
        .await;

    match catalog(&server).search_artists(Some("rock")).await {
        Err(Error::Upstream(msg)) => {
            assert!(msg.contains("502"), "{msg}");
            assert!(msg.contains("Bad gateway"), "{msg}");
        }
        other => panic!("expected upstream error, got {:?}", other),
    }
}

// Preview resolver

#[tokio::test]
async fn test_embed_lookup_collects_previews_of_every_hit() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .and(query_param("q", "Blue in Green"))
        .and(query_param("type", "track"))
        .and(query_param("limit", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "tracks": { "items": [track_json("T1", "Blue in Green"), track_json("T2", "Blue in Green")] }
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/embed/track/T1"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"<html><script>{"audioPreview":{"url":"https://p.scdn.co/mp3-preview/one"}}</script></html>"#,
        ))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/embed/track/T2"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let lookup = EmbedPreviewLookup::new(reqwest::Client::new(), format!("{}/embed", server.uri()));
    let urls = lookup
        .lookup(&catalog(&server), "Blue in Green")
        .await
        .unwrap();

    assert_eq!(urls, vec!["https://p.scdn.co/mp3-preview/one".to_string()]);
}

#[tokio::test]
async fn test_failed_lookup_resolves_to_empty_list() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let lookup = EmbedPreviewLookup::new(reqwest::Client::new(), format!("{}/embed", server.uri()));
    let urls = resolve_previews(&lookup, &catalog(&server), "Anything").await;

    assert!(urls.is_empty());
}
