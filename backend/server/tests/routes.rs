use std::sync::Arc;

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{
        Method, Request, Response, StatusCode,
        header::{CONTENT_TYPE, COOKIE, LOCATION, SET_COOKIE},
    },
};
use server::{
    account::{CHECKOUT_NOT_IMPLEMENTED, LOGIN_NOT_IMPLEMENTED},
    app,
    config::Config,
    routes::ADDED_TO_CART,
    state::AppState,
};
use tower::ServiceExt;

fn test_state() -> Arc<AppState> {
    AppState::new(Config {
        host: "127.0.0.1".to_string(),
        port: 0,
        session_secret: "integration-test-secret-long-enough-to-pass".to_string(),
        catalog_path: None,
    })
    .expect("state")
}

fn test_app() -> Router {
    app(test_state())
}

async fn get(app: &Router, uri: &str, cookie: Option<&str>) -> Response<Body> {
    let mut request = Request::builder().uri(uri);
    if let Some(cookie) = cookie {
        request = request.header(COOKIE, cookie);
    }

    app.clone()
        .oneshot(request.body(Body::empty()).expect("request"))
        .await
        .expect("response")
}

/// `session=...` part of the response's Set-Cookie header.
fn session_cookie(response: &Response<Body>) -> String {
    response
        .headers()
        .get(SET_COOKIE)
        .expect("set-cookie header")
        .to_str()
        .expect("ascii cookie")
        .split(';')
        .next()
        .expect("cookie pair")
        .to_string()
}

fn location(response: &Response<Body>) -> &str {
    response
        .headers()
        .get(LOCATION)
        .expect("location header")
        .to_str()
        .expect("ascii location")
}

async fn body_text(response: Response<Body>) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");

    String::from_utf8(bytes.to_vec()).expect("utf-8 body")
}

#[tokio::test]
async fn homepage_renders_without_touching_session() {
    let app = test_app();

    let response = get(&app, "/", None).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().get(SET_COOKIE).is_none());
    assert!(body_text(response).await.contains("Ubermelon"));
}

#[tokio::test]
async fn melons_lists_catalog_in_seed_order() {
    let state = test_state();
    let app = app(state.clone());

    let body = body_text(get(&app, "/melons", None).await).await;

    let mut last = 0;
    for melon in state.catalog.get_all() {
        let position = body
            .find(&format!("/melon/{}\"", melon.id))
            .unwrap_or_else(|| panic!("{} missing from listing", melon.id));
        assert!(position >= last, "{} out of order", melon.id);
        last = position;
    }
    assert!(body.contains("$2.00"));
}

#[tokio::test]
async fn melon_details_shows_buy_link() {
    let app = test_app();

    let response = get(&app, "/melon/cren", None).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text(response).await;
    assert!(body.contains("Crenshaw"));
    assert!(body.contains("/add_to_cart/cren"));
}

#[tokio::test]
async fn unknown_melon_is_not_found() {
    let app = test_app();

    let response = get(&app, "/melon/not-a-melon", None).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(body_text(response).await.contains("not-a-melon"));
}

#[tokio::test]
async fn empty_cart_has_zero_total() {
    let app = test_app();

    let response = get(&app, "/cart", None).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text(response).await;
    assert!(body.contains("Your cart is empty."));
    assert!(body.contains("Order total: $0.00"));
}

#[tokio::test]
async fn add_to_cart_accumulates_and_flashes_once() {
    let app = test_app();

    let first = get(&app, "/add_to_cart/cren", None).await;
    assert_eq!(first.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&first), "/cart");
    let cookie = session_cookie(&first);

    let second = get(&app, "/add_to_cart/cren", Some(&cookie)).await;
    let cookie = session_cookie(&second);

    let third = get(&app, "/add_to_cart/yw", Some(&cookie)).await;
    let cookie = session_cookie(&third);

    let cart = get(&app, "/cart", Some(&cookie)).await;
    assert_eq!(cart.status(), StatusCode::OK);
    let cookie = session_cookie(&cart);
    let body = body_text(cart).await;
    assert!(body.contains(ADDED_TO_CART));
    assert!(body.contains("Cart (3)"));
    assert!(body.contains("<td>2</td>"));
    assert!(body.contains("$4.00"));
    assert!(body.contains("Order total: $6.50"));

    let again = body_text(get(&app, "/cart", Some(&cookie)).await).await;
    assert!(!again.contains(ADDED_TO_CART));
    assert!(again.contains("Order total: $6.50"));
}

#[tokio::test]
async fn stale_cart_entry_fails_cart_view() {
    let app = test_app();

    let added = get(&app, "/add_to_cart/ghost", None).await;
    assert_eq!(added.status(), StatusCode::SEE_OTHER);
    let cookie = session_cookie(&added);

    let response = get(&app, "/cart", Some(&cookie)).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn forged_session_starts_fresh() {
    let app = test_app();

    let response = get(&app, "/cart", Some("session=eyJjYXJ0Ijp7ImEiOjV9fQ.deadbeef")).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("Your cart is empty."));
}

#[tokio::test]
async fn session_from_another_secret_is_ignored() {
    let other = app(AppState::new(Config {
        host: "127.0.0.1".to_string(),
        port: 0,
        session_secret: "some-other-deployment-secret-entirely".to_string(),
        catalog_path: None,
    })
    .expect("state"));
    let cookie = session_cookie(&get(&other, "/add_to_cart/cren", None).await);

    let body = body_text(get(&test_app(), "/cart", Some(&cookie)).await).await;

    assert!(body.contains("Your cart is empty."));
}

#[tokio::test]
async fn checkout_redirects_to_melons_with_notice() {
    let app = test_app();

    let added = get(&app, "/add_to_cart/cren", None).await;
    let response = get(&app, "/checkout", Some(&session_cookie(&added))).await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/melons");
    let cookie = session_cookie(&response);

    let body = body_text(get(&app, "/melons", Some(&cookie)).await).await;
    assert!(body.contains(CHECKOUT_NOT_IMPLEMENTED));
}

#[tokio::test]
async fn login_form_renders() {
    let app = test_app();

    let response = get(&app, "/login", None).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("<form action=\"/login\" method=\"post\">"));
}

#[tokio::test]
async fn login_submission_is_not_implemented() {
    let app = test_app();

    let request = Request::builder()
        .method(Method::POST)
        .uri("/login")
        .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from("email=melon%40ubermelon.com&password=seedless"))
        .expect("request");
    let response = app.oneshot(request).await.expect("response");

    assert_eq!(response.status(), StatusCode::NOT_IMPLEMENTED);
    assert_eq!(body_text(response).await, LOGIN_NOT_IMPLEMENTED);
}
