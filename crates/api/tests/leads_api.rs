//! HTTP-level tests for the `/api/leads` lookup endpoints.

mod common;

use axum::http::StatusCode;
use common::{body_json, build_test_app, get, Collaborators, LEAD_ID};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

#[tokio::test]
async fn search_by_company_forwards_ilike_filter() {
    let collaborators = Collaborators::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/leads"))
        .and(query_param("company_name", "ilike.%acme%"))
        .and(query_param("limit", "5"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([{"id": LEAD_ID, "company_name": "Acme Plumbing"}])),
        )
        .expect(1)
        .mount(&collaborators.db)
        .await;

    let response = get(
        build_test_app(&collaborators),
        "/api/leads?company=acme&limit=5",
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["data"][0]["company_name"], "Acme Plumbing");
}

#[tokio::test]
async fn listing_without_company_returns_recent_leads() {
    let collaborators = Collaborators::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/leads"))
        .and(query_param("order", "created_at.desc"))
        .and(query_param("limit", "20"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&collaborators.db)
        .await;

    let response = get(build_test_app(&collaborators), "/api/leads").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"], json!([]));
}

#[tokio::test]
async fn get_lead_by_id() {
    let collaborators = Collaborators::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/leads"))
        .and(query_param("id", format!("eq.{LEAD_ID}")))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([{"id": LEAD_ID, "grade": "A"}])),
        )
        .expect(1)
        .mount(&collaborators.db)
        .await;

    let response = get(build_test_app(&collaborators), &format!("/api/leads/{LEAD_ID}")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["grade"], "A");
}

#[tokio::test]
async fn get_lead_with_bad_id_returns_400_without_calling_db() {
    let collaborators = Collaborators::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&collaborators.db)
        .await;

    let response = get(build_test_app(&collaborators), "/api/leads/42").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await["error"],
        "Invalid id format. Must be a valid UUID."
    );
}

#[tokio::test]
async fn get_missing_lead_returns_404() {
    let collaborators = Collaborators::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&collaborators.db)
        .await;

    let response = get(build_test_app(&collaborators), &format!("/api/leads/{LEAD_ID}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn malformed_limit_returns_400_envelope_without_calling_db() {
    let collaborators = Collaborators::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&collaborators.db)
        .await;

    for uri in ["/api/leads?limit=abc", "/api/leads?limit=-1"] {
        let response = get(build_test_app(&collaborators), uri).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{uri}");

        let json = body_json(response).await;
        assert_eq!(json["success"], false);
        assert_eq!(json["code"], "BAD_REQUEST");
        assert!(json["error"].as_str().unwrap().contains("limit"), "{uri}: {json}");
    }
}
