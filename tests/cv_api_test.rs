mod common;

use axum::http::{Method, StatusCode};
use serde_json::json;

use common::{app, register, send, valid_cv};

#[tokio::test]
async fn cv_routes_require_a_bearer_token() {
    let app = app();
    let (status, body) = send(&app, Method::GET, "/api/cvs", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "missing_authorization");

    let (status, _) = send(&app, Method::GET, "/api/cvs", Some("not-a-jwt"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn create_get_and_list() {
    let app = app();
    let token = register(&app, "owner@example.com").await;

    let (status, created) = send(&app, Method::POST, "/api/cvs", Some(&token), Some(valid_cv("John"))).await;
    assert_eq!(status, StatusCode::CREATED, "{created}");
    assert_eq!(created["firstName"], "John");
    assert_eq!(created["preferredLanguages"], json!(["English", "Spanish"]));
    let id = created["id"].as_str().unwrap().to_string();

    let (status, fetched) = send(&app, Method::GET, &format!("/api/cvs/{id}"), Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);

    let (status, list) = send(&app, Method::GET, "/api/cvs", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list["total"], 1);
    assert_eq!(list["cvs"][0]["id"], id.as_str());
}

#[tokio::test]
async fn invalid_draft_returns_field_errors() {
    let app = app();
    let token = register(&app, "owner@example.com").await;

    let mut draft = valid_cv("John");
    draft["age"] = json!(15);
    draft["workExperience"][0]["company"] = json!("");
    let (status, body) = send(&app, Method::POST, "/api/cvs", Some(&token), Some(draft)).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "Validation failed");
    assert_eq!(body["fields"]["age"], "Age must be between 16 and 100");
    assert_eq!(body["fields"]["workExperience.0.company"], "Company is required");

    let (_, list) = send(&app, Method::GET, "/api/cvs", Some(&token), None).await;
    assert_eq!(list["total"], 0);
}

#[tokio::test]
async fn validate_endpoint_does_not_persist() {
    let app = app();
    let token = register(&app, "owner@example.com").await;

    let (status, body) = send(&app, Method::POST, "/api/cvs/validate", Some(&token), Some(json!({}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["valid"], false);
    assert!(body["errors"]["firstName"].is_string());
    assert!(body["errors"]["termsAccepted"].is_string());

    let (_, body) = send(&app, Method::POST, "/api/cvs/validate", Some(&token), Some(valid_cv("John"))).await;
    assert_eq!(body["valid"], true);
    assert_eq!(body["errors"], json!({}));

    let (_, stats) = send(&app, Method::GET, "/api/cvs/stats", Some(&token), None).await;
    assert_eq!(stats["total"], 0);
}

#[tokio::test]
async fn other_owners_cannot_see_or_touch_a_cv() {
    let app = app();
    let alice = register(&app, "alice@example.com").await;
    let bob = register(&app, "bob@example.com").await;

    let (_, created) = send(&app, Method::POST, "/api/cvs", Some(&alice), Some(valid_cv("Alice"))).await;
    let uri = format!("/api/cvs/{}", created["id"].as_str().unwrap());

    let (status, _) = send(&app, Method::GET, &uri, Some(&bob), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = send(&app, Method::PUT, &uri, Some(&bob), Some(valid_cv("Mallory"))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = send(&app, Method::DELETE, &uri, Some(&bob), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, bobs) = send(&app, Method::GET, "/api/cvs", Some(&bob), None).await;
    assert_eq!(bobs["total"], 0);
    let (status, still_there) = send(&app, Method::GET, &uri, Some(&alice), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(still_there["firstName"], "Alice");
}

#[tokio::test]
async fn put_patch_and_delete() {
    let app = app();
    let token = register(&app, "owner@example.com").await;
    let (_, created) = send(&app, Method::POST, "/api/cvs", Some(&token), Some(valid_cv("John"))).await;
    let uri = format!("/api/cvs/{}", created["id"].as_str().unwrap());

    let mut edited = valid_cv("John");
    edited["lastName"] = json!("Smith");
    edited["workExperience"][0]["isCurrent"] = json!(true);
    edited["workExperience"][0]["endDate"] = json!("");
    let (status, replaced) = send(&app, Method::PUT, &uri, Some(&token), Some(edited)).await;
    assert_eq!(status, StatusCode::OK, "{replaced}");
    assert_eq!(replaced["lastName"], "Smith");
    assert_eq!(replaced["id"], created["id"]);
    assert_eq!(replaced["createdAt"], created["createdAt"]);

    let (status, patched) = send(&app, Method::PATCH, &uri, Some(&token), Some(json!({"isActive": false}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(patched["isActive"], false);
    assert_eq!(patched["lastName"], "Smith");

    let (status, body) = send(&app, Method::PATCH, &uri, Some(&token), Some(json!({"phoneNumber": "call me"}))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["fields"]["phoneNumber"], "Only digits are allowed");

    let (status, _) = send(&app, Method::DELETE, &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = send(&app, Method::GET, &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn put_clears_optional_fields_left_out_of_the_draft() {
    let app = app();
    let token = register(&app, "owner@example.com").await;

    let mut original = valid_cv("John");
    original["profilePicture"] = json!("data:image/png;base64,iVBORw0KGgo=");
    let (status, created) = send(&app, Method::POST, "/api/cvs", Some(&token), Some(original)).await;
    assert_eq!(status, StatusCode::CREATED, "{created}");
    assert!(created["profilePicture"].is_string());
    assert!(created["coordinates"].is_object());
    let uri = format!("/api/cvs/{}", created["id"].as_str().unwrap());

    let mut edited = valid_cv("John");
    let fields = edited.as_object_mut().unwrap();
    fields.remove("profilePicture");
    fields.remove("coordinates");
    let (status, replaced) = send(&app, Method::PUT, &uri, Some(&token), Some(edited)).await;
    assert_eq!(status, StatusCode::OK, "{replaced}");
    assert!(replaced["profilePicture"].is_null());
    assert!(replaced["coordinates"].is_null());

    let (_, fetched) = send(&app, Method::GET, &uri, Some(&token), None).await;
    assert!(fetched["profilePicture"].is_null());
    assert!(fetched["coordinates"].is_null());
}

#[tokio::test]
async fn patch_null_clears_but_absent_keeps() {
    let app = app();
    let token = register(&app, "owner@example.com").await;

    let mut original = valid_cv("John");
    original["profilePicture"] = json!("data:image/png;base64,iVBORw0KGgo=");
    let (_, created) = send(&app, Method::POST, "/api/cvs", Some(&token), Some(original)).await;
    let uri = format!("/api/cvs/{}", created["id"].as_str().unwrap());

    let (status, kept) = send(&app, Method::PATCH, &uri, Some(&token), Some(json!({"lastName": "Smith"}))).await;
    assert_eq!(status, StatusCode::OK);
    assert!(kept["profilePicture"].is_string());
    assert!(kept["coordinates"].is_object());

    let (status, cleared) = send(
        &app,
        Method::PATCH,
        &uri,
        Some(&token),
        Some(json!({"profilePicture": null, "coordinates": null})),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{cleared}");
    assert!(cleared["profilePicture"].is_null());
    assert!(cleared["coordinates"].is_null());
    assert_eq!(cleared["lastName"], "Smith");
}

#[tokio::test]
async fn search_filter_and_stats() {
    let app = app();
    let token = register(&app, "owner@example.com").await;

    send(&app, Method::POST, "/api/cvs", Some(&token), Some(valid_cv("John"))).await;
    let mut jane = valid_cv("Jane");
    jane["isActive"] = json!(false);
    jane["address"] = json!("42 Ocean Drive");
    send(&app, Method::POST, "/api/cvs", Some(&token), Some(jane)).await;

    let (_, found) = send(&app, Method::GET, "/api/cvs?search=ocean", Some(&token), None).await;
    assert_eq!(found["total"], 1);
    assert_eq!(found["cvs"][0]["firstName"], "Jane");

    let (_, active) = send(&app, Method::GET, "/api/cvs?status=active", Some(&token), None).await;
    assert_eq!(active["total"], 1);
    assert_eq!(active["cvs"][0]["firstName"], "John");

    let (_, stats) = send(&app, Method::GET, "/api/cvs/stats", Some(&token), None).await;
    assert_eq!(stats["total"], 2);
    assert_eq!(stats["active"], 1);
    assert_eq!(stats["recent"].as_array().unwrap().len(), 2);
}
