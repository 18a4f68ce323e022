//! End-to-end integration tests

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use std::sync::Arc;
use tower::util::ServiceExt;
use wiremock::matchers::{header as header_is, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::config::ServerConfig;
use crate::http::create_router;
use crate::state::AppState;
use crate::target::encode_component;

/// `admin:camera` in Basic form.
const AUTH: &str = "Basic YWRtaW46Y2FtZXJh";

async fn origin() -> MockServer {
    let server = MockServer::start().await;

    let manifest = format!(
        "#EXTM3U\n\
         #EXT-X-VERSION:3\n\
         #EXT-X-TARGETDURATION:2\n\
         #EXT-X-MEDIA-SEQUENCE:7\n\
         #EXTINF:2.000000,\n\
         index7.ts\n\
         #EXTINF:2.000000,\n\
         /hls/front/index8.ts\n\
         #EXTINF:2.000000,\n\
         {}/hls/front/index9.ts\n",
        server.uri()
    );
    Mock::given(method("GET"))
        .and(path("/hls/front/index.m3u8"))
        .and(header_is("authorization", AUTH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(manifest.into_bytes(), "application/vnd.apple.mpegurl"),
        )
        .mount(&server)
        .await;

    for seq in 7..=9u8 {
        let segment = vec![seq; 376];
        Mock::given(method("GET"))
            .and(path(format!("/hls/front/index{}.ts", seq)))
            .and(header_is("authorization", AUTH))
            .respond_with(ResponseTemplate::new(200).set_body_raw(segment, "video/mp2t"))
            .mount(&server)
            .await;
    }

    // Anything without credentials is refused.
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    server
}

fn app() -> Router {
    create_router(Arc::new(AppState::new(ServerConfig::default()).unwrap()))
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Option<String>, bytes::Bytes) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .map(|v| v.to_str().unwrap().to_string());
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (status, content_type, body)
}

#[tokio::test]
async fn test_player_flow_with_credentials() {
    let server = origin().await;
    let app = app();

    let manifest_url = format!("{}/hls/front/index.m3u8", server.uri());
    let (status, content_type, body) = get(
        &app,
        &format!(
            "/api/stream/playlist?target={}&u=admin&p=camera",
            encode_component(&manifest_url)
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(content_type.as_deref(), Some("application/vnd.apple.mpegurl"));

    let playlist = String::from_utf8(body.to_vec()).unwrap();
    let references: Vec<&str> = playlist
        .lines()
        .filter(|l| !l.starts_with('#') && !l.trim().is_empty())
        .collect();
    assert_eq!(references.len(), 3);

    // The player follows each reference as a same-origin URL.
    for (reference, seq) in references.iter().zip(7..=9u8) {
        assert!(reference.starts_with("/api/stream/segment?target="));
        let (status, content_type, body) = get(&app, reference).await;
        assert_eq!(status, StatusCode::OK, "{}", reference);
        assert_eq!(content_type.as_deref(), Some("video/mp2t"));
        assert_eq!(body.len(), 376);
        assert!(body.iter().all(|b| *b == seq));
    }

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 4);
    for request in &requests {
        assert_eq!(request.headers.get("authorization").unwrap(), AUTH);
    }
}

#[tokio::test]
async fn test_player_flow_without_credentials() {
    let server = origin().await;
    let app = app();

    let manifest_url = format!("{}/hls/front/index.m3u8", server.uri());
    let (status, _, body) = get(
        &app,
        &format!("/api/stream/playlist?target={}", encode_component(&manifest_url)),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["error"], "Failed to fetch playlist: Unauthorized");
}

#[tokio::test]
async fn test_rewritten_segments_keep_query_strings() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/live/playlist.m3u8"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            "#EXTM3U\n#EXTINF:1.0,\nchunk.ts?session=abc&n=1\n",
        ))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/live/chunk.ts"))
        .and(wiremock::matchers::query_param("session", "abc"))
        .and(wiremock::matchers::query_param("n", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![1u8, 2, 3]))
        .expect(1)
        .mount(&server)
        .await;

    let app = app();
    let target = encode_component(&format!("{}/live/playlist.m3u8", server.uri()));
    let (_, _, body) = get(&app, &format!("/api/stream/playlist?target={}", target)).await;
    let playlist = String::from_utf8(body.to_vec()).unwrap();
    let reference = playlist.lines().last().unwrap();

    let (status, _, body) = get(&app, reference).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(&body[..], &[1u8, 2, 3]);
}
