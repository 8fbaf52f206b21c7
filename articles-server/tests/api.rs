//! End-to-end router tests against the in-memory store

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use chrono::{Duration, TimeZone, Utc};
use serde_json::{json, Value};
use tower::ServiceExt;

use articles_core::{Article, Environment, ObjectId};
use articles_server::{build_router, AppState, MemoryArticleStore};

/// 25 articles one hour apart; `article-24` is the newest.
/// Categories alternate between "Rust" and "Artificial Intelligence".
fn seeded_articles() -> Vec<Article> {
    let base = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
    (0..25)
        .map(|i| {
            let category = if i % 2 == 0 { "Rust" } else { "Artificial Intelligence" };
            Article::new(
                ObjectId::new(),
                format!("Article {}", i),
                format!("article-{}", i),
                category,
                base + Duration::hours(i),
            )
            .with_extra("author", json!("alwari"))
        })
        .collect()
}

fn app_with(store: Arc<MemoryArticleStore>, environment: Environment) -> Router {
    build_router(AppState::new(store, environment).with_uri("mongodb://reader:secret@db:27017"))
}

fn app() -> (Router, Vec<Article>) {
    let articles = seeded_articles();
    let store = Arc::new(MemoryArticleStore::new(articles.clone()));
    (app_with(store, Environment::Development), articles)
}

async fn send(app: &Router, method: Method, uri: &str) -> (StatusCode, axum::http::HeaderMap, Value) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .header(header::ORIGIN, "https://blog.example.com")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let headers = response.headers().clone();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, headers, body)
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    let (status, _, body) = send(app, Method::GET, uri).await;
    (status, body)
}

fn titles(body: &Value) -> Vec<String> {
    body.as_array()
        .unwrap()
        .iter()
        .map(|a| a["formattedTitle"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn list_defaults_to_newest_first() {
    let (app, _) = app();
    let (status, body) = get(&app, "/api/articles").await;

    assert_eq!(status, StatusCode::OK);
    let titles = titles(&body);
    assert_eq!(titles.len(), 25);
    assert_eq!(titles[0], "article-24");
    assert_eq!(titles[24], "article-0");
    assert_eq!(body[0]["author"], "alwari");
}

#[tokio::test]
async fn second_page_of_ten_is_ranks_eleven_to_twenty() {
    let (app, _) = app();
    let (status, body) = get(&app, "/api/articles?page=2&limit=10").await;

    assert_eq!(status, StatusCode::OK);
    let expected: Vec<String> = (5..=14).rev().map(|i| format!("article-{}", i)).collect();
    assert_eq!(titles(&body), expected);
}

#[tokio::test]
async fn consecutive_pages_do_not_overlap() {
    let (app, _) = app();
    let (_, first) = get(&app, "/api/articles?page=1&limit=7").await;
    let (_, second) = get(&app, "/api/articles?page=2&limit=7").await;

    let first = titles(&first);
    let second = titles(&second);
    assert_eq!(first.len(), 7);
    assert_eq!(second.len(), 7);
    assert!(first.iter().all(|t| !second.contains(t)));
}

#[tokio::test]
async fn junk_pagination_falls_back_to_defaults() {
    let (app, _) = app();
    let (status, body) = get(&app, "/api/articles?page=abc&limit=-5").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(titles(&body).len(), 25);
}

#[tokio::test]
async fn limit_is_capped() {
    let articles: Vec<Article> = (0..120)
        .map(|i| Article::new(ObjectId::new(), "t", format!("t-{}", i), "c", Utc::now()))
        .collect();
    let app = app_with(Arc::new(MemoryArticleStore::new(articles)), Environment::Development);

    let (status, body) = get(&app, "/api/articles?limit=500").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 100);
}

#[tokio::test]
async fn category_filters_exactly() {
    let (app, _) = app();
    let (status, body) = get(&app, "/api/articles/category/Artificial%20Intelligence?limit=5").await;

    assert_eq!(status, StatusCode::OK);
    let items = body.as_array().unwrap();
    assert_eq!(items.len(), 5);
    assert!(items.iter().all(|a| a["category"] == "Artificial Intelligence"));
    assert_eq!(items[0]["formattedTitle"], "article-23");

    let (status, body) = get(&app, "/api/articles/category/rust").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn missing_category_is_400() {
    let (app, _) = app();
    for uri in [
        "/api/articles/category",
        "/api/articles/category/",
        "/api/articles/category/%20",
    ] {
        let (status, body) = get(&app, uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", uri);
        assert_eq!(body, json!({ "error": "Category is required" }));
    }
}

#[tokio::test]
async fn fetch_by_formatted_title() {
    let (app, articles) = app();
    let (status, body) = get(&app, "/api/articles/title/article-3").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["_id"], articles[3].id.to_hex());
    assert_eq!(body["title"], "Article 3");

    // Case-sensitive
    let (status, body) = get(&app, "/api/articles/title/ARTICLE-3").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "error": "Article not found" }));
}

#[tokio::test]
async fn id_and_title_resolve_to_same_document() {
    let (app, articles) = app();
    let target = &articles[7];

    let (status, by_id) = get(&app, &format!("/api/articles/{}", target.id.to_hex())).await;
    assert_eq!(status, StatusCode::OK);

    let (_, by_slug) = get(&app, "/api/articles/article-7").await;
    let (_, by_title_route) = get(&app, "/api/articles/title/article-7").await;

    assert_eq!(by_id, by_slug);
    assert_eq!(by_id, by_title_route);
}

#[tokio::test]
async fn hex_shaped_slug_falls_back_to_title() {
    let slug = "cafebabecafebabecafebabe";
    let store = Arc::new(MemoryArticleStore::new(seeded_articles()));
    store
        .insert(Article::new(ObjectId::new(), "Cafe Babe", slug, "Misc", Utc::now()))
        .await;
    let app = app_with(store, Environment::Development);

    let (status, body) = get(&app, &format!("/api/articles/{}", slug)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["formattedTitle"], slug);
}

#[tokio::test]
async fn unknown_reference_is_404() {
    let (app, _) = app();
    for uri in [
        "/api/articles/000000000000000000000000",
        "/api/articles/no-such-article",
    ] {
        let (status, body) = get(&app, uri).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{}", uri);
        assert_eq!(body, json!({ "error": "Article not found" }));
    }
}

#[tokio::test]
async fn non_get_verbs_are_405() {
    let (app, articles) = app();
    let by_id = format!("/api/articles/{}", articles[0].id.to_hex());
    for (method, uri) in [
        (Method::POST, "/api/articles"),
        (Method::DELETE, by_id.as_str()),
        (Method::PUT, "/api/articles/category/Rust"),
        (Method::PATCH, "/api/articles/title/article-1"),
    ] {
        let (status, _, body) = send(&app, method, uri).await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED, "{}", uri);
        assert_eq!(body, json!({ "error": "Method not allowed" }));
    }
}

#[tokio::test]
async fn responses_carry_cors_headers() {
    let (app, _) = app();
    for uri in ["/api/articles", "/api/articles/title/nope", "/api"] {
        let (_, headers, _) = send(&app, Method::GET, uri).await;
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*", "{}", uri);
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_METHODS], "GET", "{}", uri);
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_HEADERS], "Content-Type", "{}", uri);
    }
}

#[tokio::test]
async fn backend_failure_is_500_with_details() {
    let store = Arc::new(MemoryArticleStore::new(seeded_articles()));
    store.set_outage(Some("connection refused".into())).await;
    let app = app_with(store, Environment::Development);

    let (status, body) = get(&app, "/api/articles").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Failed to fetch articles");
    assert_eq!(body["details"], "store unavailable: connection refused");

    let (_, body) = get(&app, "/api/articles/category/Rust").await;
    assert_eq!(body["error"], "Failed to fetch articles by category");

    let (_, body) = get(&app, "/api/articles/anything").await;
    assert_eq!(body["error"], "Failed to fetch article");
}

#[tokio::test]
async fn production_hides_backend_details() {
    let store = Arc::new(MemoryArticleStore::new(vec![]));
    store.set_outage(Some("auth failed for user admin".into())).await;
    let app = app_with(store, Environment::Production);

    let (status, body) = get(&app, "/api/articles/title/x").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "error": "Failed to fetch article" }));
}

#[tokio::test]
async fn description_document_on_root_and_api() {
    let (app, _) = app();
    for uri in ["/", "/api"] {
        let (status, body) = get(&app, uri).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Articles API");
        assert!(body["endpoints"].as_array().unwrap().len() >= 4);
    }
}

#[tokio::test]
async fn unknown_path_is_json_404() {
    let (app, _) = app();
    let (status, body) = get(&app, "/api/authors").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "error": "Not found" }));
}

#[tokio::test]
async fn debug_db_reports_store_state() {
    let (app, articles) = app();
    let (status, body) = get(&app, "/api/debug-db").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["articlesCount"], 25);
    assert_eq!(body["environment"], "development");
    assert_eq!(body["mongoUriMasked"], "mongodb://reader:***@db:27017");
    assert_eq!(body["sampleArticle"]["_id"], articles[0].id.to_hex());
    assert!(body["sampleArticle"]["fields"]
        .as_array()
        .unwrap()
        .contains(&json!("author")));

    let empty = app_with(Arc::new(MemoryArticleStore::default()), Environment::Development);
    let (_, body) = get(&empty, "/api/debug-db").await;
    assert_eq!(body["sampleArticle"], "No articles found");
}

#[tokio::test]
async fn health_does_not_need_the_store() {
    let store = Arc::new(MemoryArticleStore::default());
    store.set_outage(Some("down".into())).await;
    let app = app_with(store, Environment::Development);

    let (status, body) = get(&app, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn repeated_query_keys_keep_the_first_value() {
    let (app, _) = app();

    let (status, body) = get(&app, "/api/articles?page=1&page=2&limit=5&limit=10").await;
    assert_eq!(status, StatusCode::OK);
    let expected: Vec<String> = (20..=24).rev().map(|i| format!("article-{}", i)).collect();
    assert_eq!(titles(&body), expected);

    let (status, body) = get(&app, "/api/articles/category/Rust?limit=2&limit=x").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(titles(&body), vec!["article-24", "article-22"]);
}

#[tokio::test]
async fn undecodable_query_falls_back_to_defaults() {
    let (app, _) = app();
    let (status, body) = get(&app, "/api/articles?page=%FF&limit=%C3").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(titles(&body).len(), 25);
}

#[tokio::test]
async fn undecodable_path_segments_stay_json() {
    let (app, _) = app();
    for uri in ["/api/articles/%FF", "/api/articles/title/%FF"] {
        let (status, headers, body) = send(&app, Method::GET, uri).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{}", uri);
        assert_eq!(headers[header::CONTENT_TYPE], "application/json", "{}", uri);
        assert_eq!(body, json!({ "error": "Article not found" }));
    }

    let (status, headers, body) = send(&app, Method::GET, "/api/articles/category/%FF").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(headers[header::CONTENT_TYPE], "application/json");
    assert_eq!(body, json!({ "error": "Category is required" }));
}

#[tokio::test]
async fn head_is_405() {
    let (app, _) = app();
    for uri in ["/api/articles", "/api/articles/title/article-1", "/api"] {
        let (status, _, _) = send(&app, Method::HEAD, uri).await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED, "{}", uri);
    }
}
