mod common;

use axum::http::StatusCode;
use common::setup_test_app;
use serde_json::json;

#[tokio::test]
async fn test_teacher_crud() {
    let app = setup_test_app();
    let admin = app.admin_token().await;

    let (status, created) = app
        .request(
            "POST",
            "/api/teachers",
            Some(&admin),
            Some(json!({ "name": "Tom", "surname": "Hill", "email": "tom@x.com", "phone": "555-0100" })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["email"], "tom@x.com");
    let id = created["id"].as_i64().unwrap();

    let (status, updated) = app
        .request(
            "PUT",
            &format!("/api/teachers/{id}"),
            Some(&admin),
            Some(json!({ "name": "Thomas", "surname": "Hill", "email": "thomas@x.com" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["name"], "Thomas");
    assert_eq!(updated["email"], "thomas@x.com");

    let (status, _) = app
        .request("DELETE", &format!("/api/teachers/{id}"), Some(&admin), None)
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = app.get(&format!("/api/teachers/{id}"), Some(&admin)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "error": "Teacher not found" }));
}

#[tokio::test]
async fn test_teacher_email_conflicts() {
    let app = setup_test_app();
    let admin = app.admin_token().await;
    let dto = json!({ "name": "Tom", "surname": "Hill", "email": "tom@x.com" });

    let (status, _) = app
        .request("POST", "/api/teachers", Some(&admin), Some(dto.clone()))
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = app
        .request("POST", "/api/teachers", Some(&admin), Some(dto))
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body, json!({ "error": "Teacher with this email already exists" }));

    let (_, other) = app
        .request(
            "POST",
            "/api/teachers",
            Some(&admin),
            Some(json!({ "name": "Sue", "surname": "Park", "email": "sue@x.com" })),
        )
        .await;
    let (status, body) = app
        .request(
            "PUT",
            &format!("/api/teachers/{}", other["id"]),
            Some(&admin),
            Some(json!({ "name": "Sue", "surname": "Park", "email": "tom@x.com" })),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body, json!({ "error": "Email already in use by another teacher" }));
}

#[tokio::test]
async fn test_teacher_validation() {
    let app = setup_test_app();
    let admin = app.admin_token().await;

    let (status, body) = app
        .request(
            "POST",
            "/api/teachers",
            Some(&admin),
            Some(json!({ "name": "Tom", "surname": "Hill" })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Name, surname and email are required");
}

#[tokio::test]
async fn test_teachers_are_admin_only() {
    let app = setup_test_app();
    let (teacher, _) = app.register("t@x.com", "secret1", "teacher").await;
    let (student, _) = app.register("s@x.com", "secret1", "student").await;

    for token in [&teacher, &student] {
        let (status, _) = app.get("/api/teachers", Some(token)).await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        // Nonexistent ids are still forbidden rather than not found.
        let (status, body) = app.get("/api/teachers/9999", Some(token)).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body, json!({ "error": "Insufficient permissions" }));

        let (status, _) = app
            .request("DELETE", "/api/teachers/abc", Some(token), None)
            .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }
}

#[tokio::test]
async fn test_registered_teacher_is_listed() {
    let app = setup_test_app();
    let admin = app.admin_token().await;
    let (_, registered) = app.register("t@x.com", "secret1", "teacher").await;

    let (status, body) = app.get("/api/teachers?email=T@X", Some(&admin)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["meta"]["total_items"], 1);
    assert_eq!(body["items"][0]["id"], registered["user"]["teacher_id"]);
    assert_eq!(body["items"][0]["user_id"], registered["user"]["id"]);
}

#[tokio::test]
async fn test_invalid_teacher_id() {
    let app = setup_test_app();
    let admin = app.admin_token().await;

    let (status, body) = app.get("/api/teachers/abc", Some(&admin)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "Invalid teacher ID" }));
}
