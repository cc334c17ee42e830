//! Integration tests for exercise endpoints

mod common;

use axum::http::StatusCode;
use serde_json::json;

#[tokio::test]
#[ignore = "requires database"]
async fn test_create_exercise_stamps_owner_from_token() {
    let app = common::TestApp::new().await;

    let email = format!("{}@example.com", common::unique("ex_owner"));
    let token = app.register_user(&email, "SecurePassword123!").await;

    let name = common::unique("Bench Press");
    let body = json!({ "name": name, "description": "Barbell, flat bench" });
    let (status, response) = app.post_auth("/exercises", &body.to_string(), &token).await;

    assert_eq!(status, StatusCode::CREATED);
    let response: serde_json::Value = serde_json::from_str(&response).unwrap();
    assert_eq!(response["name"], name);
    assert!(response["owner_id"].as_i64().unwrap() > 0);

    // Owner matches the caller's profile id
    let (_, me) = app.get_auth("/auth/me", &token).await;
    let me: serde_json::Value = serde_json::from_str(&me).unwrap();
    assert_eq!(response["owner_id"], me["id"]);
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_create_exercise_requires_auth() {
    let app = common::TestApp::new().await;

    let body = json!({ "name": common::unique("Squat") });
    let (status, _) = app.post("/exercises", &body.to_string()).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_duplicate_exercise_name_conflicts() {
    let app = common::TestApp::new().await;

    let token = app
        .register_user(
            &format!("{}@example.com", common::unique("ex_dup")),
            "SecurePassword123!",
        )
        .await;

    let name = common::unique("Deadlift");
    let body = json!({ "name": name });
    let (status, _) = app.post_auth("/exercises", &body.to_string(), &token).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = app.post_auth("/exercises", &body.to_string(), &token).await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_reads_are_public() {
    let app = common::TestApp::new().await;

    let token = app
        .register_user(
            &format!("{}@example.com", common::unique("ex_pub")),
            "SecurePassword123!",
        )
        .await;

    let name = common::unique("pull-up");
    let body = json!({ "name": name });
    let (_, created) = app.post_auth("/exercises", &body.to_string(), &token).await;
    let created: serde_json::Value = serde_json::from_str(&created).unwrap();
    let id = created["id"].as_i64().unwrap();

    // No Authorization header on any of these
    let (status, _) = app.get("/exercises/all").await;
    assert_eq!(status, StatusCode::OK);

    let (status, by_id) = app.get(&format!("/exercises/{id}")).await;
    assert_eq!(status, StatusCode::OK);
    let by_id: serde_json::Value = serde_json::from_str(&by_id).unwrap();
    assert_eq!(by_id["name"], name);

    let (status, _) = app.get(&format!("/exercises/name/{name}")).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_not_found_message_format() {
    let app = common::TestApp::new().await;

    let (status, response) = app.get("/exercises/999999999").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    let response: serde_json::Value = serde_json::from_str(&response).unwrap();
    assert_eq!(
        response["error"]["message"],
        "Exercise with id 999999999 not found"
    );
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_update_by_non_owner_is_forbidden() {
    let app = common::TestApp::new().await;

    let owner_token = app
        .register_user(
            &format!("{}@example.com", common::unique("ex_owner2")),
            "SecurePassword123!",
        )
        .await;
    let other_token = app
        .register_user(
            &format!("{}@example.com", common::unique("ex_other")),
            "SecurePassword123!",
        )
        .await;

    let body = json!({ "name": common::unique("Row") });
    let (_, created) = app
        .post_auth("/exercises", &body.to_string(), &owner_token)
        .await;
    let created: serde_json::Value = serde_json::from_str(&created).unwrap();
    let id = created["id"].as_i64().unwrap();

    let patch = json!({ "description": "tampered" });
    let (status, _) = app
        .put_auth(&format!("/exercises/{id}"), &patch.to_string(), &other_token)
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // Owner can update
    let patch = json!({ "description": "cable variant" });
    let (status, updated) = app
        .put_auth(&format!("/exercises/{id}"), &patch.to_string(), &owner_token)
        .await;
    assert_eq!(status, StatusCode::OK);
    let updated: serde_json::Value = serde_json::from_str(&updated).unwrap();
    assert_eq!(updated["description"], "cable variant");
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_owner_reassignment_needs_admin() {
    let app = common::TestApp::new().await;

    let owner_token = app
        .register_user(
            &format!("{}@example.com", common::unique("ex_reassign")),
            "SecurePassword123!",
        )
        .await;

    let body = json!({ "name": common::unique("Lunge") });
    let (_, created) = app
        .post_auth("/exercises", &body.to_string(), &owner_token)
        .await;
    let created: serde_json::Value = serde_json::from_str(&created).unwrap();
    let id = created["id"].as_i64().unwrap();

    // Even the owner cannot hand the record to someone else
    let patch = json!({ "owner_id": 42 });
    let (status, response) = app
        .put_auth(&format!("/exercises/{id}"), &patch.to_string(), &owner_token)
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    let response: serde_json::Value = serde_json::from_str(&response).unwrap();
    assert_eq!(
        response["error"]["message"],
        "Only admins may reassign ownership"
    );
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_delete_missing_exercise_message() {
    let app = common::TestApp::new().await;

    let token = app
        .register_user(
            &format!("{}@example.com", common::unique("ex_del")),
            "SecurePassword123!",
        )
        .await;

    let (status, response) = app.delete_auth("/exercises/999999999", &token).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    let response: serde_json::Value = serde_json::from_str(&response).unwrap();
    assert_eq!(
        response["error"]["message"],
        "Exercise with id 999999999 not found. Cannot delete."
    );
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_delete_then_get_404() {
    let app = common::TestApp::new().await;

    let token = app
        .register_user(
            &format!("{}@example.com", common::unique("ex_gone")),
            "SecurePassword123!",
        )
        .await;

    let body = json!({ "name": common::unique("Dip") });
    let (_, created) = app.post_auth("/exercises", &body.to_string(), &token).await;
    let created: serde_json::Value = serde_json::from_str(&created).unwrap();
    let id = created["id"].as_i64().unwrap();

    let (status, response) = app.delete_auth(&format!("/exercises/{id}"), &token).await;
    assert_eq!(status, StatusCode::OK);
    let response: serde_json::Value = serde_json::from_str(&response).unwrap();
    assert_eq!(
        response["detail"],
        format!("Exercise with id {id} deleted.")
    );

    let (status, _) = app.get(&format!("/exercises/{id}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_sql_metacharacters_stored_literally() {
    let app = common::TestApp::new().await;

    let token = app
        .register_user(
            &format!("{}@example.com", common::unique("ex_inject")),
            "SecurePassword123!",
        )
        .await;

    let hostile = format!("O'Brien'; DROP TABLE exercises;-- {}", uuid::Uuid::new_v4());
    let body = json!({ "name": hostile });
    let (status, created) = app.post_auth("/exercises", &body.to_string(), &token).await;
    assert_eq!(status, StatusCode::CREATED);

    let created: serde_json::Value = serde_json::from_str(&created).unwrap();
    assert_eq!(created["name"], hostile);
    let id = created["id"].as_i64().unwrap();

    // Table survived and the value reads back byte for byte
    let (status, fetched) = app.get(&format!("/exercises/{id}")).await;
    assert_eq!(status, StatusCode::OK);
    let fetched: serde_json::Value = serde_json::from_str(&fetched).unwrap();
    assert_eq!(fetched["name"], hostile);
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_pagination_is_ordered_and_clamped() {
    let app = common::TestApp::new().await;

    let token = app
        .register_user(
            &format!("{}@example.com", common::unique("ex_page")),
            "SecurePassword123!",
        )
        .await;

    for i in 0..3 {
        let body = json!({ "name": common::unique(&format!("Paged {i}")) });
        let (status, _) = app.post_auth("/exercises", &body.to_string(), &token).await;
        assert_eq!(status, StatusCode::CREATED);
    }

    // Oversized limit is clamped server-side rather than erroring
    let (status, page) = app.get("/exercises/all?offset=0&limit=100000").await;
    assert_eq!(status, StatusCode::OK);
    let page: serde_json::Value = serde_json::from_str(&page).unwrap();
    let ids: Vec<i64> = page
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["id"].as_i64().unwrap())
        .collect();
    assert!(ids.len() >= 3);
    assert!(ids.len() <= 100);

    // Ascending id order makes paging deterministic
    let mut sorted = ids.clone();
    sorted.sort_unstable();
    assert_eq!(ids, sorted);
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_my_exercises_only_lists_own() {
    let app = common::TestApp::new().await;

    let mine_token = app
        .register_user(
            &format!("{}@example.com", common::unique("ex_mine")),
            "SecurePassword123!",
        )
        .await;
    let other_token = app
        .register_user(
            &format!("{}@example.com", common::unique("ex_theirs")),
            "SecurePassword123!",
        )
        .await;

    let mine = common::unique("Mine");
    let theirs = common::unique("Theirs");
    app.post_auth(
        "/exercises",
        &json!({ "name": mine }).to_string(),
        &mine_token,
    )
    .await;
    app.post_auth(
        "/exercises",
        &json!({ "name": theirs }).to_string(),
        &other_token,
    )
    .await;

    let (status, page) = app.get_auth("/exercises/my", &mine_token).await;
    assert_eq!(status, StatusCode::OK);
    let page: serde_json::Value = serde_json::from_str(&page).unwrap();
    let names: Vec<&str> = page
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["name"].as_str().unwrap())
        .collect();
    assert!(names.contains(&mine.as_str()));
    assert!(!names.contains(&theirs.as_str()));
}
