//! Integration tests for the CSV import endpoint.

mod common;

use axum::http::StatusCode;
use common::{body_json, build_test_app, get, post_csv, post_multipart};
use opencrochet_core::store::TutorialStore;

const HEADER: &str = "id,title,description,tags,category,difficulty,instructions,materials,image\n";

fn csv(rows: &[&str]) -> String {
    let mut doc = HEADER.to_string();
    for row in rows {
        doc.push_str(row);
        doc.push('\n');
    }
    doc
}

// ---------------------------------------------------------------------------
// Success
// ---------------------------------------------------------------------------

#[tokio::test]
async fn valid_csv_is_imported_and_listed() {
    let (app, store) = build_test_app();
    let body = csv(&[
        "1,Basic Beanie,A warm hat,\"Quick, Gift\",Hats,Beginner,Ch 60|Join|Work even,Yarn|Hook,",
        "2,Cozy Granny Square Blanket,Another granny,Home,Blankets,,Ch 4|Join,Yarn,/granny.jpg",
    ]);

    let response = post_csv(app.clone(), "patterns.csv", &body).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    assert_eq!(json["data"]["imported"], 2);
    let imported = json["data"]["tutorials"].as_array().unwrap();
    assert_eq!(imported[0]["slug"], "basic-beanie");
    assert_eq!(
        imported[0]["tags"],
        serde_json::json!(["Quick", "Gift", "Beginner"])
    );
    assert_eq!(imported[0]["image"], "/placeholder.svg");
    assert_eq!(imported[1]["slug"], "cozy-granny-square-blanket-2");
    assert_eq!(imported[1]["image"], "/granny.jpg");

    assert_eq!(store.list_all().await.unwrap().len(), 8);

    let json = body_json(get(app, "/api/v1/tutorials?category=Hats&tag=Gift").await).await;
    let listed = json["data"].as_array().unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0]["slug"], "basic-beanie");
}

// ---------------------------------------------------------------------------
// Rejections
// ---------------------------------------------------------------------------

#[tokio::test]
async fn non_csv_upload_is_rejected() {
    let (app, store) = build_test_app();
    let response = post_csv(app, "patterns.xlsx", &csv(&[])).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "INVALID_FILE");
    assert_eq!(store.list_all().await.unwrap().len(), 6);
}

#[tokio::test]
async fn header_only_csv_is_a_parse_error() {
    let (app, _) = build_test_app();
    let response = post_csv(app, "empty.csv", HEADER).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "PARSE_ERROR");
    assert!(json["error"].as_str().unwrap().contains("no data rows found"));
}

#[tokio::test]
async fn ragged_csv_is_a_parse_error() {
    let (app, _) = build_test_app();
    let response = post_csv(app, "broken.csv", &csv(&["1,Only,three"])).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "PARSE_ERROR");
}

#[tokio::test]
async fn validation_errors_reject_the_whole_batch() {
    let (app, store) = build_test_app();
    let mut rows = vec!["1,Good Scarf,Long and warm,,Scarves,,Ch 30|Turn,Yarn,".to_string()];
    for id in 2..=8 {
        rows.push(format!("{id},,No title here,,Hats,,Ch 4,Yarn,"));
    }
    rows.push("9,Plant Hanger,Macrame style,,Macrame,,Ch 4,Cord,".to_string());
    let rows: Vec<&str> = rows.iter().map(String::as_str).collect();

    let response = post_csv(app, "patterns.csv", &csv(&rows)).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    let errors = json["errors"].as_array().unwrap();
    assert_eq!(errors.len(), 8);
    assert_eq!(errors[0], "Row 2: Missing required field 'title'");
    assert_eq!(errors[7], "Row 9: Invalid category 'Macrame'");

    let summary = json["summary"].as_array().unwrap();
    assert_eq!(summary.len(), 6);
    assert_eq!(summary[5], "...and 3 more errors");

    assert_eq!(store.list_all().await.unwrap().len(), 6);
}

#[tokio::test]
async fn missing_file_field_is_a_bad_request() {
    let (app, _) = build_test_app();
    let response = post_multipart(
        app,
        "/api/v1/imports",
        "attachment",
        "patterns.csv",
        &csv(&["1,Hat,Warm,,Hats,,Ch 4,Yarn,"]),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn oversized_upload_is_rejected() {
    let (app, store) = build_test_app();
    let row = "1,Hat,Warm,,Hats,,Ch 4,Yarn,";
    let rows = vec![row; 4000];

    let response = post_csv(app, "huge.csv", &csv(&rows)).await;

    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(store.list_all().await.unwrap().len(), 6);
}
