// End-to-end tests of the HTTP surface over the in-memory store

mod common;

use actix_web::{http::StatusCode, test, web, App};
use serde_json::{json, Value};

use account_catalog_server::server::http::configure_routes;

macro_rules! init_app {
    ($state:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($state.clone()))
                .configure(configure_routes),
        )
        .await
    };
}

macro_rules! sign_in {
    ($app:expr) => {{
        let req = test::TestRequest::post()
            .uri("/auth/sign-in")
            .set_json(json!({ "email": common::ADMIN_EMAIL, "password": common::ADMIN_PASSWORD }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&$app, req).await;
        body["token"].as_str().unwrap().to_string()
    }};
}

#[actix_web::test]
async fn test_health_endpoints() {
    let state = common::app_state_with_memory().await;
    let app = init_app!(state);

    let resp = test::call_service(&app, test::TestRequest::get().uri("/health").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = test::call_service(&app, test::TestRequest::get().uri("/health/ready").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "ready");
    assert_eq!(body["dependencies"]["storage"], "memory");
}

#[actix_web::test]
async fn test_mutations_require_a_principal() {
    let state = common::app_state_with_memory().await;
    let app = init_app!(state);

    let req = test::TestRequest::post()
        .uri("/api/accounts")
        .set_json(json!({ "username": "abc", "platform": "X", "type": "special" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let req = test::TestRequest::delete()
        .uri("/api/accounts/anything")
        .insert_header(("Authorization", "Bearer not-a-session"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "auth");
}

#[actix_web::test]
async fn test_wrong_password_is_rejected() {
    let state = common::app_state_with_memory().await;
    let app = init_app!(state);

    let req = test::TestRequest::post()
        .uri("/auth/sign-in")
        .set_json(json!({ "email": common::ADMIN_EMAIL, "password": "guess" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_admin_flow() {
    let state = common::app_state_with_memory().await;
    let app = init_app!(state);
    let token = sign_in!(app);
    let bearer = ("Authorization", format!("Bearer {}", token));

    let req = test::TestRequest::get().uri("/auth/me").insert_header(bearer.clone()).to_request();
    let me: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(me["email"], common::ADMIN_EMAIL);

    let req = test::TestRequest::post()
        .uri("/api/accounts")
        .insert_header(bearer.clone())
        .set_json(json!({ "username": "nike_x", "platform": "Instagram", "type": "ثلاثي" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let a: Value = test::read_body_json(resp).await;
    assert_eq!(a["type"], "three-letter");
    assert_eq!(a["status"], "available");
    assert!(a["createdAt"].is_string());

    let req = test::TestRequest::post()
        .uri("/api/accounts")
        .insert_header(bearer.clone())
        .set_json(json!({ "username": "nikeworld", "platform": "X", "type": "special", "status": "مباع" }))
        .to_request();
    let b: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(b["status"], "sold");

    let req = test::TestRequest::get()
        .uri("/api/accounts/search?platform=all&type=all&term=nike")
        .to_request();
    let found: Vec<Value> = test::call_and_read_body_json(&app, req).await;
    let names: Vec<&str> = found.iter().map(|l| l["username"].as_str().unwrap()).collect();
    assert_eq!(names, vec!["nikeworld", "nike_x"]);

    let a_id = a["id"].as_str().unwrap();
    let req = test::TestRequest::put()
        .uri(&format!("/api/accounts/{}/status", a_id))
        .insert_header(bearer.clone())
        .set_json(json!({ "status": "sold" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let req = test::TestRequest::post()
        .uri(&format!("/api/accounts/{}/toggle", a_id))
        .insert_header(bearer.clone())
        .to_request();
    let toggled: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(toggled["status"], "available");

    let req = test::TestRequest::delete()
        .uri(&format!("/api/accounts/{}", a_id))
        .insert_header(bearer.clone())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let req = test::TestRequest::get().uri(&format!("/api/accounts/{}", a_id)).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let req = test::TestRequest::get().uri("/api/accounts").to_request();
    let listed: Vec<Value> = test::call_and_read_body_json(&app, req).await;
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0]["username"], "nikeworld");

    let req = test::TestRequest::post()
        .uri("/auth/sign-out")
        .insert_header(bearer.clone())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let req = test::TestRequest::get().uri("/auth/me").insert_header(bearer).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_empty_username_is_rejected() {
    let state = common::app_state_with_memory().await;
    let app = init_app!(state);
    let token = sign_in!(app);

    let req = test::TestRequest::post()
        .uri("/api/accounts")
        .insert_header(("Authorization", format!("Bearer {}", token)))
        .set_json(json!({ "username": "", "platform": "X", "type": "special" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "validation");
    assert!(body["message"].as_str().unwrap().contains("missingUsername"));

    let req = test::TestRequest::get().uri("/api/accounts").to_request();
    let listed: Vec<Value> = test::call_and_read_body_json(&app, req).await;
    assert!(listed.is_empty());
}

#[actix_web::test]
async fn test_unknown_enum_labels_are_bad_requests() {
    let state = common::app_state_with_memory().await;
    let app = init_app!(state);

    let req = test::TestRequest::get()
        .uri("/api/accounts/search?platform=MySpace")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let token = sign_in!(app);
    let req = test::TestRequest::post()
        .uri("/api/accounts")
        .insert_header(("Authorization", format!("Bearer {}", token)))
        .set_json(json!({ "username": "abc", "platform": "X", "type": "five-letter" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_toggle_unknown_listing_is_not_found() {
    let state = common::app_state_with_memory().await;
    let app = init_app!(state);
    let token = sign_in!(app);

    let req = test::TestRequest::post()
        .uri("/api/accounts/missing/toggle")
        .insert_header(("Authorization", format!("Bearer {}", token)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
