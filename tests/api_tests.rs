use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use hypeforge::{app::build_app, auth::jwt::JwtKeys, state::AppState};
use serde_json::{json, Value};
use tower::ServiceExt;

fn spawn_app() -> (Router, AppState) {
    let state = AppState::fake();
    (build_app(state.clone()), state)
}

fn post_json(uri: &str, body: Value, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header("Content-Type", "application/json");
    if let Some(t) = token {
        builder = builder.header("Authorization", format!("Bearer {}", t));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

fn get_authed(uri: &str, token: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header("Authorization", format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap()
}

async fn body_json(response: axum::http::Response<axum::body::Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn register(app: &Router, email: &str, password: &str) -> String {
    let response = app
        .clone()
        .oneshot(post_json(
            "/api/v1/auth/register",
            json!({ "email": email, "password": password }),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    body["token"].as_str().expect("token in body").to_string()
}

#[tokio::test]
async fn health_is_open() {
    let (app, _) = spawn_app();
    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/v1/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn register_issues_token_whose_subject_resolves() {
    let (app, _) = spawn_app();
    let token = register(&app, "alice@example.com", "pw123456").await;

    let response = app
        .oneshot(get_authed("/api/v1/me", &token))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["email"], "alice@example.com");
}

#[tokio::test]
async fn register_duplicate_email_conflicts_and_keeps_first_record() {
    let (app, _) = spawn_app();
    register(&app, "alice@example.com", "pw123456").await;

    let response = app
        .clone()
        .oneshot(post_json(
            "/api/v1/auth/register",
            json!({ "email": "alice@example.com", "password": "different-pw" }),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body = body_json(response).await;
    assert!(body["error"].is_string());

    // First registration is unaffected: original password still logs in.
    let response = app
        .oneshot(post_json(
            "/api/v1/auth/login",
            json!({ "email": "alice@example.com", "password": "pw123456" }),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn register_rejects_bad_input() {
    let (app, _) = spawn_app();
    let cases = [
        json!({}),
        json!({ "email": "alice@example.com" }),
        json!({ "password": "pw123456" }),
        json!({ "email": "not-an-email", "password": "pw123456" }),
        json!({ "email": "alice@example.com", "password": "short" }),
    ];
    for body in cases {
        let response = app
            .clone()
            .oneshot(post_json("/api/v1/auth/register", body.clone(), None))
            .await
            .unwrap();
        assert_eq!(
            response.status(),
            StatusCode::BAD_REQUEST,
            "expected 400 for {}",
            body
        );
    }
}

#[tokio::test]
async fn login_failures_are_indistinguishable() {
    let (app, _) = spawn_app();
    register(&app, "alice@example.com", "pw123456").await;

    let wrong_password = app
        .clone()
        .oneshot(post_json(
            "/api/v1/auth/login",
            json!({ "email": "alice@example.com", "password": "pw1234567" }),
            None,
        ))
        .await
        .unwrap();
    let unknown_email = app
        .oneshot(post_json(
            "/api/v1/auth/login",
            json!({ "email": "nobody@example.com", "password": "pw123456" }),
            None,
        ))
        .await
        .unwrap();

    assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_email.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        body_json(wrong_password).await,
        body_json(unknown_email).await
    );
}

#[tokio::test]
async fn login_normalizes_email_case() {
    let (app, _) = spawn_app();
    register(&app, "alice@example.com", "pw123456").await;

    let response = app
        .oneshot(post_json(
            "/api/v1/auth/login",
            json!({ "email": "  Alice@Example.COM ", "password": "pw123456" }),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn protected_routes_reject_bad_authorization() {
    let (app, _) = spawn_app();

    // No header at all.
    let response = app
        .clone()
        .oneshot(post_json("/api/v1/posts", json!({ "text": "hi" }), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // Wrong scheme, empty token, garbage token.
    for header in ["Token abc", "Bearer ", "Bearer not.a.jwt", "bogus"] {
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/api/v1/posts")
                    .header("Authorization", header)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(
            response.status(),
            StatusCode::UNAUTHORIZED,
            "expected 401 for header {:?}",
            header
        );
    }
}

#[tokio::test]
async fn tokens_signed_with_foreign_secret_are_rejected() {
    let (app, _) = spawn_app();
    let token = register(&app, "alice@example.com", "pw123456").await;

    let foreign = JwtKeys::new("some-other-secret", std::time::Duration::from_secs(3600))
        .sign(uuid::Uuid::new_v4())
        .expect("sign with foreign secret");

    let good = app
        .clone()
        .oneshot(get_authed("/api/v1/posts", &token))
        .await
        .unwrap();
    let bad = app
        .oneshot(get_authed("/api/v1/posts", &foreign))
        .await
        .unwrap();

    assert_eq!(good.status(), StatusCode::OK);
    assert_eq!(bad.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn transform_then_history_round_trip() {
    let (app, _) = spawn_app();
    let token = register(&app, "alice@example.com", "pw123456").await;

    let response = app
        .clone()
        .oneshot(post_json(
            "/api/v1/posts",
            json!({ "text": "I shipped a feature" }),
            Some(&token),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await;
    let post = created["post"].as_str().expect("post in body");
    assert!(!post.is_empty());

    let response = app
        .oneshot(get_authed("/api/v1/posts?page=1&pageSize=10", &token))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let history = body_json(response).await;
    let items = history.as_array().expect("history array");
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["input"], "I shipped a feature");
    assert_eq!(items[0]["post"], post);
    assert!(items[0]["id"].is_string());
}

#[tokio::test]
async fn transform_rejects_missing_or_empty_text() {
    let (app, _) = spawn_app();
    let token = register(&app, "alice@example.com", "pw123456").await;

    for body in [json!({}), json!({ "text": "" }), json!({ "text": "   " })] {
        let response = app
            .clone()
            .oneshot(post_json("/api/v1/posts", body.clone(), Some(&token)))
            .await
            .unwrap();
        assert_eq!(
            response.status(),
            StatusCode::BAD_REQUEST,
            "expected 400 for {}",
            body
        );
    }
}

#[tokio::test]
async fn transform_archives_sanitized_input() {
    let (app, _) = spawn_app();
    let token = register(&app, "alice@example.com", "pw123456").await;

    let response = app
        .clone()
        .oneshot(post_json(
            "/api/v1/posts",
            json!({ "text": "hello <script>alert('x')</script>world" }),
            Some(&token),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app
        .oneshot(get_authed("/api/v1/posts", &token))
        .await
        .unwrap();
    let history = body_json(response).await;
    let input = history[0]["input"].as_str().unwrap();
    assert!(!input.contains("script"));
    assert!(!input.contains("alert"));
    assert!(input.contains("hello"));
}

#[tokio::test]
async fn history_paginates_newest_first() {
    let (app, _) = spawn_app();
    let token = register(&app, "alice@example.com", "pw123456").await;

    for text in ["one", "two", "three"] {
        let response = app
            .clone()
            .oneshot(post_json(
                "/api/v1/posts",
                json!({ "text": text }),
                Some(&token),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let page1 = body_json(
        app.clone()
            .oneshot(get_authed("/api/v1/posts?page=1&pageSize=2", &token))
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(page1.as_array().unwrap().len(), 2);
    assert_eq!(page1[0]["input"], "three");
    assert_eq!(page1[1]["input"], "two");

    let page2 = body_json(
        app.clone()
            .oneshot(get_authed("/api/v1/posts?page=2&pageSize=2", &token))
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(page2.as_array().unwrap().len(), 1);
    assert_eq!(page2[0]["input"], "one");

    let page3 = body_json(
        app.oneshot(get_authed("/api/v1/posts?page=3&pageSize=2", &token))
            .await
            .unwrap(),
    )
    .await;
    assert!(page3.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn history_tolerates_bogus_pagination_params() {
    let (app, _) = spawn_app();
    let token = register(&app, "alice@example.com", "pw123456").await;

    for uri in [
        "/api/v1/posts?page=abc&pageSize=xyz",
        "/api/v1/posts?page=0&pageSize=0",
        "/api/v1/posts?page=-1&pageSize=1000",
        "/api/v1/posts",
    ] {
        let response = app.clone().oneshot(get_authed(uri, &token)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK, "expected 200 for {uri}");
    }
}

#[tokio::test]
async fn errors_render_json_payloads() {
    let (app, _) = spawn_app();
    let response = app
        .oneshot(post_json("/api/v1/auth/login", json!({}), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert!(body["error"].is_string());
}
