mod common;

use axum::http::StatusCode;
use common::setup_test_app;
use serde_json::json;

#[tokio::test]
async fn test_group_crud() {
    let app = setup_test_app();
    let admin = app.admin_token().await;

    let (status, created) = app
        .request(
            "POST",
            "/api/groups",
            Some(&admin),
            Some(json!({ "name": "Informatics", "code": "INF-101" })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = created["id"].as_i64().unwrap();

    let (status, updated) = app
        .request(
            "PUT",
            &format!("/api/groups/{id}"),
            Some(&admin),
            Some(json!({ "name": "Computer Science", "code": "CS-101" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["code"], "CS-101");

    let (status, body) = app.get("/api/groups?sortBy=-code", Some(&admin)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["items"][0]["name"], "Computer Science");

    let (status, _) = app
        .request("DELETE", &format!("/api/groups/{id}"), Some(&admin), None)
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = app.get(&format!("/api/groups/{id}"), Some(&admin)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "error": "Group not found" }));
}

#[tokio::test]
async fn test_group_code_conflict() {
    let app = setup_test_app();
    let admin = app.admin_token().await;
    let dto = json!({ "name": "Informatics", "code": "INF-101" });

    app.request("POST", "/api/groups", Some(&admin), Some(dto.clone()))
        .await;
    let (status, body) = app
        .request("POST", "/api/groups", Some(&admin), Some(dto))
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body, json!({ "error": "Group with this code already exists" }));
}

#[tokio::test]
async fn test_group_validation() {
    let app = setup_test_app();
    let admin = app.admin_token().await;

    let (status, body) = app
        .request(
            "POST",
            "/api/groups",
            Some(&admin),
            Some(json!({ "name": "Informatics" })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Name and code are required");
}

#[tokio::test]
async fn test_deleting_group_keeps_students() {
    let app = setup_test_app();
    let admin = app.admin_token().await;

    let (_, group) = app
        .request(
            "POST",
            "/api/groups",
            Some(&admin),
            Some(json!({ "name": "Informatics", "code": "INF-101" })),
        )
        .await;
    let (_, student) = app
        .request(
            "POST",
            "/api/students",
            Some(&admin),
            Some(json!({ "name": "Ann", "surname": "Lee", "group_id": group["id"] })),
        )
        .await;
    assert_eq!(student["group_id"], group["id"]);

    let (status, _) = app
        .request("DELETE", &format!("/api/groups/{}", group["id"]), Some(&admin), None)
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = app
        .get(&format!("/api/students/{}", student["id"]), Some(&admin))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.get("group_id").is_none());
}

#[tokio::test]
async fn test_groups_are_admin_only() {
    let app = setup_test_app();
    let (teacher, _) = app.register("t@x.com", "secret1", "teacher").await;

    let (status, _) = app
        .request(
            "POST",
            "/api/groups",
            Some(&teacher),
            Some(json!({ "name": "Informatics", "code": "INF-101" })),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app.get("/api/groups/1", Some(&teacher)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}
