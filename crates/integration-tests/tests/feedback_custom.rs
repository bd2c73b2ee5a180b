//! Public form submission tests: feedback and custom product requests.

use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, ResponseTemplate};

use ecopuls_client::ApiError;
use ecopuls_client::resources::{
    CustomRequestController, FeedbackController, NewCustomRequest, NewFeedback,
};
use ecopuls_core::{CustomRequestId, FeedbackId};
use ecopuls_integration_tests::TestContext;

fn sample_request() -> NewCustomRequest {
    NewCustomRequest {
        name: "Ravi".to_string(),
        contact: "ravi@example.com".to_string(),
        size: "Medium".to_string(),
        quantity: "5 pieces".to_string(),
        details: "Natural dye only".to_string(),
    }
}

#[tokio::test]
async fn test_custom_request_submission_succeeds() {
    let ctx = TestContext::new().await;

    Mock::given(method("POST"))
        .and(path("/api/custom-products"))
        .and(body_partial_json(json!({
            "name": "Ravi",
            "contact": "ravi@example.com",
            "quantity": "5 pieces"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "_id": "cr1",
            "name": "Ravi",
            "contact": "ravi@example.com",
            "size": "Medium",
            "quantity": "5 pieces",
            "details": "Natural dye only"
        })))
        .expect(1)
        .mount(&ctx.server)
        .await;

    let controller = CustomRequestController::new(ctx.client.clone());
    let created = controller
        .submit(&sample_request())
        .await
        .expect("submission succeeds");

    // Success means the form may reset and the modal close.
    assert_eq!(created.id, CustomRequestId::new("cr1"));
    assert_eq!(controller.items().len(), 1);
}

#[tokio::test]
async fn test_custom_request_failure_retains_payload_for_retry() {
    let ctx = TestContext::new().await;

    Mock::given(method("POST"))
        .and(path("/api/custom-products"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({"message": "Mongo down"})))
        .up_to_n_times(1)
        .mount(&ctx.server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/custom-products"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "_id": "cr2",
            "name": "Ravi",
            "contact": "ravi@example.com"
        })))
        .mount(&ctx.server)
        .await;

    let controller = CustomRequestController::new(ctx.client.clone());
    let request = sample_request();

    let err = controller
        .submit(&request)
        .await
        .expect_err("first attempt fails");
    assert!(matches!(err, ApiError::Server { status: 500, .. }));
    assert!(controller.items().is_empty());

    // The caller still holds the payload unchanged and can retry as-is.
    assert_eq!(request.quantity, "5 pieces");
    controller.submit(&request).await.expect("retry succeeds");
    assert_eq!(controller.items().len(), 1);
}

#[tokio::test]
async fn test_custom_request_validation_short_circuits() {
    let ctx = TestContext::new().await;

    Mock::given(method("POST"))
        .and(path("/api/custom-products"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&ctx.server)
        .await;

    let controller = CustomRequestController::new(ctx.client.clone());
    let request = NewCustomRequest {
        name: "Ravi".to_string(),
        ..NewCustomRequest::default()
    };

    let result = controller.submit(&request).await;
    assert!(matches!(result, Err(ApiError::Validation(_))));
}

#[tokio::test]
async fn test_feedback_submit_and_delete_are_public() {
    // No session at any point: feedback is a public collection.
    let ctx = TestContext::new().await;

    Mock::given(method("POST"))
        .and(path("/api/feedback"))
        .and(body_partial_json(json!({
            "rating": 5,
            "subscribe": true
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "_id": "fb1",
            "name": "Asha",
            "email": "asha@example.com",
            "rating": 5,
            "message": "Lovely",
            "subscribe": true
        })))
        .expect(1)
        .mount(&ctx.server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/feedback/fb1"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&ctx.server)
        .await;

    let controller = FeedbackController::new(ctx.client.clone());
    let feedback = NewFeedback {
        name: "Asha".to_string(),
        email: "asha@example.com".to_string(),
        rating: Some(5),
        message: "Lovely".to_string(),
        subscribe: true,
        ..NewFeedback::default()
    };

    let created = controller.submit(&feedback).await.expect("submit succeeds");
    assert_eq!(created.id, FeedbackId::new("fb1"));
    assert_eq!(controller.items().len(), 1);

    controller.remove(&created.id).await.expect("delete succeeds");
    assert!(controller.items().is_empty());
}

#[tokio::test]
async fn test_feedback_listing_mirrors_server() {
    let ctx = TestContext::new().await;

    Mock::given(method("GET"))
        .and(path("/api/feedback"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"_id": "fb1", "name": "Asha", "rating": 4},
            {"_id": "fb2", "name": "Ravi"}
        ])))
        .expect(1)
        .mount(&ctx.server)
        .await;

    let controller = FeedbackController::new(ctx.client.clone());
    let entries = controller.list().await.expect("list succeeds");

    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].rating, Some(4));
    assert_eq!(entries[1].rating, None);
    assert_eq!(controller.items(), entries);
}
