//! Integration tests for the `ValidatedJson` extractor.
//!
//! Mounts a small route taking a note payload whose `id` must be a Nanoid
//! and whose `body` may only use allow-listed HTML tags.

mod common;

use std::sync::LazyLock;

use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use common::{body_json, post_json, post_raw};
use keel_api::extract::ValidatedJson;
use keel_core::validation::{HtmlRule, NanoidRule, RequestSchema, RuleOptions, Schema, ValidationRule};
use serde::{Deserialize, Serialize};
use serde_json::json;

#[derive(Debug, Deserialize, Serialize)]
struct CreateNote {
    id: String,
    body: String,
    #[serde(default)]
    tag: Option<String>,
}

impl RequestSchema for CreateNote {
    fn schema() -> &'static Schema {
        static SCHEMA: LazyLock<Schema> = LazyLock::new(|| {
            Schema::new()
                .field("id", [ValidationRule::nanoid()])
                .field("body", [ValidationRule::html()])
                .optional_field(
                    "tag",
                    [ValidationRule::from(
                        NanoidRule::with_length(8)
                            .expect("positive length")
                            .with_options(RuleOptions::with_message("$property must be an 8-char id")),
                    )],
                )
        });
        &SCHEMA
    }
}

#[derive(Debug, Deserialize, Serialize)]
struct Comment {
    text: String,
}

impl RequestSchema for Comment {
    fn schema() -> &'static Schema {
        static SCHEMA: LazyLock<Schema> = LazyLock::new(|| {
            let rule = HtmlRule::with_allowed_tags(["<em>"]).expect("valid allow-list");
            Schema::new().field("text", [ValidationRule::from(rule)])
        });
        &SCHEMA
    }
}

async fn create_note(ValidatedJson(note): ValidatedJson<CreateNote>) -> Json<CreateNote> {
    Json(note)
}

async fn create_comment(ValidatedJson(comment): ValidatedJson<Comment>) -> Json<Comment> {
    Json(comment)
}

fn app() -> Router {
    Router::new()
        .route("/notes", post(create_note))
        .route("/comments", post(create_comment))
}

#[tokio::test]
async fn valid_payload_reaches_handler() {
    let response = post_json(
        app(),
        "/notes",
        json!({ "id": "V1StGXR8_Z5jdHi6B-myT", "body": "<p>Hello <em>there</em></p>" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["id"], "V1StGXR8_Z5jdHi6B-myT");
    assert_eq!(json["body"], "<p>Hello <em>there</em></p>");
}

#[tokio::test]
async fn every_failing_field_is_reported() {
    let response = post_json(
        app(),
        "/notes",
        json!({ "id": 12345, "body": "<script>alert(1)</script>" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");

    let details = json["details"].as_array().unwrap();
    assert_eq!(details.len(), 2);
    assert_eq!(details[0]["field"], "id");
    assert_eq!(details[0]["message"], "id must be a valid Nanoid");
    assert_eq!(details[1]["field"], "body");
    assert_eq!(details[1]["constraint"], "isValidHtml");
    assert!(details[1]["message"]
        .as_str()
        .unwrap()
        .starts_with("body can only contains the following HTML tags: <div>, <strong>"));
}

#[tokio::test]
async fn missing_field_is_a_validation_failure() {
    let response = post_json(app(), "/notes", json!({ "body": "plain text" })).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["details"][0]["field"], "id");
}

#[tokio::test]
async fn undeclared_properties_are_stripped() {
    let response = post_json(
        app(),
        "/notes",
        json!({
            "id": "V1StGXR8_Z5jdHi6B-myT",
            "body": "no markup",
            "isAdmin": true,
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert!(json.get("isAdmin").is_none());
}

#[tokio::test]
async fn optional_field_uses_its_own_length_and_message() {
    let ok = post_json(
        app(),
        "/notes",
        json!({ "id": "V1StGXR8_Z5jdHi6B-myT", "body": "x", "tag": "abcd_-12" }),
    )
    .await;
    assert_eq!(ok.status(), StatusCode::OK);
    assert_eq!(body_json(ok).await["tag"], "abcd_-12");

    let rejected = post_json(
        app(),
        "/notes",
        json!({ "id": "V1StGXR8_Z5jdHi6B-myT", "body": "x", "tag": "V1StGXR8_Z5jdHi6B-myT" }),
    )
    .await;
    assert_eq!(rejected.status(), StatusCode::BAD_REQUEST);
    let json = body_json(rejected).await;
    assert_eq!(json["details"][0]["message"], "tag must be an 8-char id");
}

#[tokio::test]
async fn custom_allow_list_applies() {
    let ok = post_json(app(), "/comments", json!({ "text": "<em>fine</em>" })).await;
    assert_eq!(ok.status(), StatusCode::OK);

    let rejected = post_json(app(), "/comments", json!({ "text": "<p>not here</p>" })).await;
    assert_eq!(rejected.status(), StatusCode::BAD_REQUEST);
    let json = body_json(rejected).await;
    assert_eq!(
        json["details"][0]["message"],
        "text can only contains the following HTML tags: <em>"
    );
}

#[tokio::test]
async fn malformed_json_is_a_bad_request() {
    let response = post_raw(app(), "/notes", "{ not json").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn non_object_body_is_a_bad_request() {
    let response = post_json(app(), "/notes", json!(["V1StGXR8_Z5jdHi6B-myT"])).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Request body must be a JSON object");
}
