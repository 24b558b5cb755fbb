//! End-to-end flows against a real PostgreSQL database.
//!
//! Each test signs in as a fresh user, so tests can share one database
//! without cleanup. Without `HARVEYDRIVE_TEST_DATABASE_URL` they return early.

use std::collections::HashSet;

use axum::http::StatusCode;
use serde_json::{Value, json};
use uuid::Uuid;

use crate::helpers::{TestApp, TestResponse};

fn names(response: &TestResponse) -> HashSet<String> {
    response.body["data"]
        .as_array()
        .unwrap_or_else(|| panic!("data is not a list: {}", response.body))
        .iter()
        .filter_map(|file| file["name"].as_str().map(String::from))
        .collect()
}

fn set(items: &[&str]) -> HashSet<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[tokio::test]
async fn test_upload_same_name_twice_is_suffixed() {
    let Some(app) = TestApp::with_database().await else {
        return;
    };
    let token = app.fresh_user();
    let room = app.create_dataroom(&token, "Deal").await;

    let first = app.upload(&token, "a.txt", "one", None, Some(room)).await;
    let second = app.upload(&token, "a.txt", "two", None, Some(room)).await;

    assert_eq!(first.status, StatusCode::CREATED, "{}", first.body);
    assert_eq!(second.status, StatusCode::CREATED, "{}", second.body);
    assert_eq!(first.body["data"]["name"], "a.txt");
    assert_eq!(second.body["data"]["name"], "a (1).txt");
    assert_eq!(second.body["data"]["original_name"], "a.txt");
}

#[tokio::test]
async fn test_concurrent_uploads_get_distinct_names() {
    let Some(app) = TestApp::with_database().await else {
        return;
    };
    let token = app.fresh_user();
    let room = app.create_dataroom(&token, "Deal").await;

    let (left, right) = tokio::join!(
        app.upload(&token, "race.txt", "l", None, Some(room)),
        app.upload(&token, "race.txt", "r", None, Some(room)),
    );

    assert_eq!(left.status, StatusCode::CREATED, "{}", left.body);
    assert_eq!(right.status, StatusCode::CREATED, "{}", right.body);
    let got: HashSet<String> = [&left, &right]
        .iter()
        .filter_map(|r| r.body["data"]["name"].as_str().map(String::from))
        .collect();
    assert_eq!(got, set(&["race.txt", "race (1).txt"]));
}

#[tokio::test]
async fn test_duplicate_folder_is_409_with_attempted_name() {
    let Some(app) = TestApp::with_database().await else {
        return;
    };
    let token = app.fresh_user();
    let room = app.create_dataroom(&token, "Deal").await;
    app.create_folder(&token, "Reports", None, room).await;

    let response = app
        .request(
            "POST",
            "/api/folders",
            Some(json!({ "name": "Reports", "dataroom_id": room })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(response.body["error"], "NAME_CONFLICT");
    assert_eq!(response.body["details"]["attempted"], "Reports");
}

#[tokio::test]
async fn test_same_folder_name_in_other_scopes_is_allowed() {
    let Some(app) = TestApp::with_database().await else {
        return;
    };
    let token = app.fresh_user();
    let room = app.create_dataroom(&token, "Deal").await;
    let other_room = app.create_dataroom(&token, "Audit").await;
    let parent = app.create_folder(&token, "Reports", None, room).await;

    app.create_folder(&token, "Reports", None, other_room).await;
    app.create_folder(&token, "Reports", Some(parent), room).await;
}

#[tokio::test]
async fn test_concurrent_folder_creates_conflict_once() {
    let Some(app) = TestApp::with_database().await else {
        return;
    };
    let token = app.fresh_user();
    let room = app.create_dataroom(&token, "Deal").await;
    let body = json!({ "name": "Legal", "dataroom_id": room });

    let (left, right) = tokio::join!(
        app.request("POST", "/api/folders", Some(body.clone()), Some(&token)),
        app.request("POST", "/api/folders", Some(body.clone()), Some(&token)),
    );

    let mut statuses = [left.status, right.status];
    statuses.sort();
    assert_eq!(statuses, [StatusCode::CREATED, StatusCode::CONFLICT]);
}

#[tokio::test]
async fn test_search_is_scoped_to_subtree() {
    let Some(app) = TestApp::with_database().await else {
        return;
    };
    let token = app.fresh_user();
    let room = app.create_dataroom(&token, "Deal").await;
    let root = app.create_folder(&token, "Root", None, room).await;
    let child = app.create_folder(&token, "Child", Some(root), room).await;
    let sibling = app.create_folder(&token, "Sibling", None, room).await;

    app.upload(&token, "plan-child.txt", "x", Some(child), None).await;
    app.upload(&token, "plan-sibling.txt", "x", Some(sibling), None).await;
    app.upload(&token, "plan-top.txt", "x", None, Some(room)).await;
    app.upload(&token, "notes.txt", "x", Some(root), None).await;

    let scoped = app
        .request(
            "GET",
            &format!("/api/files/search?q=PLAN&dataroom_id={room}&folder_id={root}"),
            None,
            Some(&token),
        )
        .await;
    assert_eq!(scoped.status, StatusCode::OK, "{}", scoped.body);
    assert_eq!(names(&scoped), set(&["plan-child.txt"]));

    let everywhere = app
        .request(
            "GET",
            &format!("/api/files/search?q=plan&dataroom_id={room}"),
            None,
            Some(&token),
        )
        .await;
    assert_eq!(
        names(&everywhere),
        set(&["plan-child.txt", "plan-sibling.txt", "plan-top.txt"])
    );

    let path = app
        .request("GET", &format!("/api/folders/{child}/path"), None, Some(&token))
        .await;
    let crumbs: Vec<&str> = path.body["data"]
        .as_array()
        .map(|c| c.iter().filter_map(|f| f["name"].as_str()).collect())
        .unwrap_or_default();
    assert_eq!(crumbs, ["Root", "Child"]);
}

#[tokio::test]
async fn test_search_with_folder_of_other_dataroom_is_400() {
    let Some(app) = TestApp::with_database().await else {
        return;
    };
    let token = app.fresh_user();
    let room = app.create_dataroom(&token, "Deal").await;
    let other_room = app.create_dataroom(&token, "Audit").await;
    let foreign = app.create_folder(&token, "Elsewhere", None, other_room).await;
    app.upload(&token, "secret.txt", "x", Some(foreign), None).await;

    let response = app
        .request(
            "GET",
            &format!("/api/files/search?q=secret&dataroom_id={room}&folder_id={foreign}"),
            None,
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_upload_into_folder_of_other_dataroom_is_400() {
    let Some(app) = TestApp::with_database().await else {
        return;
    };
    let token = app.fresh_user();
    let room = app.create_dataroom(&token, "Deal").await;
    let other_room = app.create_dataroom(&token, "Audit").await;
    let folder = app.create_folder(&token, "Inbox", None, other_room).await;

    let response = app
        .upload(&token, "misplaced.txt", "x", Some(folder), Some(room))
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(app.blob_count(), 0);
}

#[tokio::test]
async fn test_move_folder_under_itself_or_descendant_is_400() {
    let Some(app) = TestApp::with_database().await else {
        return;
    };
    let token = app.fresh_user();
    let room = app.create_dataroom(&token, "Deal").await;
    let parent = app.create_folder(&token, "Parent", None, room).await;
    let child = app.create_folder(&token, "Child", Some(parent), room).await;
    let grandchild = app.create_folder(&token, "Grandchild", Some(child), room).await;

    for destination in [parent, child, grandchild] {
        let response = app
            .request(
                "PUT",
                &format!("/api/folders/{parent}/move"),
                Some(json!({ "parent_id": destination })),
                Some(&token),
            )
            .await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST, "{}", response.body);
    }

    let moved = app
        .request(
            "PUT",
            &format!("/api/folders/{grandchild}/move"),
            Some(json!({ "parent_id": parent })),
            Some(&token),
        )
        .await;
    assert_eq!(moved.status, StatusCode::OK, "{}", moved.body);
    assert_eq!(moved.body["data"]["parent_id"], json!(parent));
}

#[tokio::test]
async fn test_delete_folder_removes_subtree_rows_then_bytes() {
    let Some(app) = TestApp::with_database().await else {
        return;
    };
    let token = app.fresh_user();
    let room = app.create_dataroom(&token, "Deal").await;
    let parent = app.create_folder(&token, "Parent", None, room).await;
    let child = app.create_folder(&token, "Child", Some(parent), room).await;
    let file = app.upload(&token, "deep.txt", "x", Some(child), None).await.id();
    assert_eq!(app.blob_count(), 1);

    let response = app
        .request("DELETE", &format!("/api/folders/{parent}"), None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::OK, "{}", response.body);

    for path in [format!("/api/folders/{child}"), format!("/api/files/{file}")] {
        let gone = app.request("GET", &path, None, Some(&token)).await;
        assert_eq!(gone.status, StatusCode::NOT_FOUND, "{path}");
    }
    assert_eq!(app.blob_count(), 0);
}

#[tokio::test]
async fn test_delete_succeeds_when_blob_store_cannot_delete() {
    let Some(app) = TestApp::with_database_and_undeletable_blobs().await else {
        return;
    };
    let token = app.fresh_user();
    let room = app.create_dataroom(&token, "Deal").await;
    let file = app.upload(&token, "keep.txt", "x", None, Some(room)).await.id();
    let other = app.upload(&token, "other.txt", "x", None, Some(room)).await.id();

    let response = app
        .request("DELETE", &format!("/api/files/{file}"), None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::OK, "{}", response.body);
    let gone = app
        .request("GET", &format!("/api/files/{file}"), None, Some(&token))
        .await;
    assert_eq!(gone.status, StatusCode::NOT_FOUND);

    let response = app
        .request("DELETE", &format!("/api/datarooms/{room}"), None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::OK, "{}", response.body);
    let gone = app
        .request("GET", &format!("/api/files/{other}"), None, Some(&token))
        .await;
    assert_eq!(gone.status, StatusCode::NOT_FOUND);

    // The bytes stay behind as orphans.
    assert_eq!(app.blob_count(), 2);
}

#[tokio::test]
async fn test_readiness_with_database_is_ready() {
    let Some(app) = TestApp::with_database().await else {
        return;
    };

    let response = app.request("GET", "/api/health/ready", None, None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["status"], "ready");
    assert_eq!(response.body["data"]["database"], "connected");
    assert_eq!(response.body["data"]["storage"], Value::from("available"));
}

#[tokio::test]
async fn test_other_users_rows_are_invisible() {
    let Some(app) = TestApp::with_database().await else {
        return;
    };
    let owner = app.fresh_user();
    let room = app.create_dataroom(&owner, "Deal").await;
    let intruder = app.token_for(Uuid::new_v4());

    let response = app
        .request("GET", &format!("/api/datarooms/{room}"), None, Some(&intruder))
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
}
