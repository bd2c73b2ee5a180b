//! Admin-gated user management tests.

use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, ResponseTemplate};

use ecopuls_client::ApiError;
use ecopuls_client::resources::UserController;
use ecopuls_core::UserId;
use ecopuls_integration_tests::{TEST_BEARER, TestContext};

fn user_json(id: &str, email: &str, is_admin: bool) -> serde_json::Value {
    json!({
        "_id": id,
        "name": "Someone",
        "email": email,
        "isAdmin": is_admin
    })
}

#[tokio::test]
async fn test_listing_requires_token_and_issues_no_request_without_one() {
    let ctx = TestContext::new().await;

    Mock::given(method("GET"))
        .and(path("/api/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&ctx.server)
        .await;

    let controller = UserController::new(ctx.client.clone());
    let result = controller.list().await;

    assert!(matches!(result, Err(ApiError::AuthRequired(_))));
}

#[tokio::test]
async fn test_logout_then_listing_short_circuits() {
    let ctx = TestContext::new().await;
    ctx.log_in(true);

    Mock::given(method("GET"))
        .and(path("/api/users"))
        .and(header("authorization", TEST_BEARER))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([user_json("u1", "admin@example.com", true)])),
        )
        .expect(1)
        .mount(&ctx.server)
        .await;

    let controller = UserController::new(ctx.client.clone());
    controller.list().await.expect("listing while logged in");

    // Logout clears both token and profile; the next fetch must fail
    // client-side without touching the network (the mock allows one call).
    ctx.store.clear().expect("clear session");
    assert!(ctx.store.token().is_none());
    assert!(ctx.store.profile().is_none());

    let result = controller.list().await;
    assert!(matches!(result, Err(ApiError::AuthRequired(_))));
}

#[tokio::test]
async fn test_expired_token_surfaces_unauthorized() {
    let ctx = TestContext::new().await;
    ctx.log_in(true);

    Mock::given(method("GET"))
        .and(path("/api/users"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({"message": "Invalid token"})),
        )
        .mount(&ctx.server)
        .await;

    let controller = UserController::new(ctx.client.clone());
    let err = controller.list().await.expect_err("listing must fail");

    assert!(err.is_unauthorized());
}

#[tokio::test]
async fn test_toggle_admin_sends_negation_and_replaces_cached_user() {
    let ctx = TestContext::new().await;
    ctx.log_in(true);

    Mock::given(method("GET"))
        .and(path("/api/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            user_json("u1", "admin@example.com", true),
            user_json("u2", "maya@example.com", false)
        ])))
        .mount(&ctx.server)
        .await;

    // Toggling a non-admin submits the negation: {"isAdmin": true}.
    Mock::given(method("PUT"))
        .and(path("/api/users/u2"))
        .and(header("authorization", TEST_BEARER))
        .and(body_json(json!({"isAdmin": true})))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(user_json("u2", "maya@example.com", true)),
        )
        .expect(1)
        .mount(&ctx.server)
        .await;

    let controller = UserController::new(ctx.client.clone());
    let users = controller.list().await.expect("seed cache");
    let maya = users
        .iter()
        .find(|u| u.id == UserId::new("u2"))
        .expect("maya listed");

    let updated = controller.toggle_admin(maya).await.expect("toggle succeeds");
    assert!(updated.is_admin);

    let cached = controller.items();
    let cached_maya = cached
        .iter()
        .find(|u| u.id == UserId::new("u2"))
        .expect("maya still cached");
    assert!(cached_maya.is_admin);
    assert_eq!(cached.len(), 2);
}

#[tokio::test]
async fn test_delete_user_removes_from_cache() {
    let ctx = TestContext::new().await;
    ctx.log_in(true);

    Mock::given(method("GET"))
        .and(path("/api/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            user_json("u1", "admin@example.com", true),
            user_json("u2", "maya@example.com", false)
        ])))
        .mount(&ctx.server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/users/u2"))
        .and(header("authorization", TEST_BEARER))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "Deleted"})))
        .expect(1)
        .mount(&ctx.server)
        .await;

    let controller = UserController::new(ctx.client.clone());
    controller.list().await.expect("seed cache");

    let id = UserId::new("u2");
    controller.remove(&id).await.expect("delete succeeds");
    assert!(!controller.items().iter().any(|u| u.id == id));
    assert_eq!(controller.items().len(), 1);
}
