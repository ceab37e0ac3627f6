mod common;

use std::sync::Arc;

use common::{body_json, setup_test_client, setup_test_client_with_url, TempDbFile};
use poem::http::StatusCode;
use serde_json::json;

#[tokio::test]
async fn test_health_endpoint() {
    let cli = setup_test_client().await;

    let resp = cli.get("/api/v1/health").send().await;
    resp.assert_status_is_ok();
    resp.assert_json(json!({"status": "ok", "message": "API is healthy"}))
        .await;
}

#[tokio::test]
async fn test_item_lifecycle() {
    let cli = setup_test_client().await;

    // Create
    let resp = cli
        .post("/api/v1/items/")
        .body_json(&json!({
            "name": "Laptop",
            "description": "Powerful computing device"
        }))
        .send()
        .await;
    resp.assert_status(StatusCode::CREATED);
    let created = body_json(resp).await;
    assert_eq!(created["name"], "Laptop");
    assert_eq!(created["description"], "Powerful computing device");
    let id = created["id"].as_i64().expect("id should be an integer");

    // Read back
    let resp = cli.get(format!("/api/v1/items/{}", id)).send().await;
    resp.assert_status_is_ok();
    assert_eq!(body_json(resp).await, created);

    // Partial update leaves the name alone
    let resp = cli
        .patch(format!("/api/v1/items/{}", id))
        .body_json(&json!({"description": "Updated description for laptop"}))
        .send()
        .await;
    resp.assert_status_is_ok();
    let updated = body_json(resp).await;
    assert_eq!(updated["id"], id);
    assert_eq!(updated["name"], "Laptop");
    assert_eq!(updated["description"], "Updated description for laptop");

    // Delete
    let resp = cli.delete(format!("/api/v1/items/{}", id)).send().await;
    resp.assert_status(StatusCode::NO_CONTENT);

    // Gone
    let resp = cli.get(format!("/api/v1/items/{}", id)).send().await;
    resp.assert_status(StatusCode::NOT_FOUND);
    resp.assert_json(json!({"detail": "Item not found"})).await;
}

#[tokio::test]
async fn test_list_items_in_creation_order() {
    let cli = setup_test_client().await;

    let resp = cli.get("/api/v1/items/").send().await;
    resp.assert_status_is_ok();
    resp.assert_json(json!([])).await;

    for name in ["Laptop", "Mouse", "Keyboard"] {
        cli.post("/api/v1/items/")
            .body_json(&json!({"name": name}))
            .send()
            .await
            .assert_status(StatusCode::CREATED);
    }

    let resp = cli.get("/api/v1/items").send().await;
    resp.assert_status_is_ok();
    let items = body_json(resp).await;
    let names: Vec<&str> = items
        .as_array()
        .expect("list should be an array")
        .iter()
        .filter_map(|item| item["name"].as_str())
        .collect();
    assert_eq!(names, vec!["Laptop", "Mouse", "Keyboard"]);
}

#[tokio::test]
async fn test_create_without_description_stores_null() {
    let cli = setup_test_client().await;

    let resp = cli
        .post("/api/v1/items/")
        .body_json(&json!({"name": "Mouse"}))
        .send()
        .await;
    resp.assert_status(StatusCode::CREATED);
    let created = body_json(resp).await;
    assert_eq!(created["name"], "Mouse");
    assert!(created["description"].is_null());
}

#[tokio::test]
async fn test_create_missing_name_is_unprocessable() {
    let cli = setup_test_client().await;

    let resp = cli
        .post("/api/v1/items/")
        .body_json(&json!({"description": "No name"}))
        .send()
        .await;
    resp.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_json(resp).await;
    assert!(body["detail"].is_string());

    let resp = cli.get("/api/v1/items/").send().await;
    resp.assert_json(json!([])).await;
}

#[tokio::test]
async fn test_create_empty_name_is_unprocessable() {
    let cli = setup_test_client().await;

    let resp = cli
        .post("/api/v1/items/")
        .body_json(&json!({"name": ""}))
        .send()
        .await;
    resp.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_create_malformed_json_is_unprocessable() {
    let cli = setup_test_client().await;

    let resp = cli
        .post("/api/v1/items/")
        .content_type("application/json")
        .body("{not json")
        .send()
        .await;
    resp.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_create_duplicate_name_is_conflict() {
    let cli = setup_test_client().await;

    cli.post("/api/v1/items/")
        .body_json(&json!({"name": "Laptop"}))
        .send()
        .await
        .assert_status(StatusCode::CREATED);

    let resp = cli
        .post("/api/v1/items/")
        .body_json(&json!({"name": "Laptop", "description": "Second one"}))
        .send()
        .await;
    resp.assert_status(StatusCode::CONFLICT);
    resp.assert_json(json!({"detail": "Item name already exists"}))
        .await;

    // The failed insert must not leave a partial row behind
    let items = body_json(cli.get("/api/v1/items/").send().await).await;
    assert_eq!(items.as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn test_non_integer_id_is_unprocessable() {
    let cli = setup_test_client().await;

    let resp = cli.get("/api/v1/items/abc").send().await;
    resp.assert_status(StatusCode::UNPROCESSABLE_ENTITY);

    let resp = cli
        .patch("/api/v1/items/abc")
        .body_json(&json!({"name": "Laptop"}))
        .send()
        .await;
    resp.assert_status(StatusCode::UNPROCESSABLE_ENTITY);

    let resp = cli.delete("/api/v1/items/abc").send().await;
    resp.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_unknown_id_is_not_found() {
    let cli = setup_test_client().await;

    let resp = cli.get("/api/v1/items/99999").send().await;
    resp.assert_status(StatusCode::NOT_FOUND);
    resp.assert_json(json!({"detail": "Item not found"})).await;

    let resp = cli
        .patch("/api/v1/items/99999")
        .body_json(&json!({"name": "Ghost"}))
        .send()
        .await;
    resp.assert_status(StatusCode::NOT_FOUND);
    resp.assert_json(json!({"detail": "Item not found"})).await;

    let resp = cli.delete("/api/v1/items/99999").send().await;
    resp.assert_status(StatusCode::NOT_FOUND);
    resp.assert_json(json!({"detail": "Item not found"})).await;
}

#[tokio::test]
async fn test_update_null_description_clears_it() {
    let cli = setup_test_client().await;

    let created = body_json(
        cli.post("/api/v1/items/")
            .body_json(&json!({"name": "Laptop", "description": "Powerful computing device"}))
            .send()
            .await,
    )
    .await;
    let id = created["id"].as_i64().expect("id should be an integer");

    let resp = cli
        .patch(format!("/api/v1/items/{}", id))
        .body_json(&json!({"description": null}))
        .send()
        .await;
    resp.assert_status_is_ok();
    let updated = body_json(resp).await;
    assert_eq!(updated["name"], "Laptop");
    assert!(updated["description"].is_null());
}

#[tokio::test]
async fn test_update_empty_body_returns_item_unchanged() {
    let cli = setup_test_client().await;

    let created = body_json(
        cli.post("/api/v1/items/")
            .body_json(&json!({"name": "Laptop", "description": "Powerful computing device"}))
            .send()
            .await,
    )
    .await;
    let id = created["id"].as_i64().expect("id should be an integer");

    let resp = cli
        .patch(format!("/api/v1/items/{}", id))
        .body_json(&json!({}))
        .send()
        .await;
    resp.assert_status_is_ok();
    assert_eq!(body_json(resp).await, created);
}

#[tokio::test]
async fn test_update_null_name_is_unprocessable() {
    let cli = setup_test_client().await;

    let created = body_json(
        cli.post("/api/v1/items/")
            .body_json(&json!({"name": "Laptop"}))
            .send()
            .await,
    )
    .await;
    let id = created["id"].as_i64().expect("id should be an integer");

    let resp = cli
        .patch(format!("/api/v1/items/{}", id))
        .body_json(&json!({"name": null}))
        .send()
        .await;
    resp.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    resp.assert_json(json!({"detail": "name cannot be null"})).await;
}

#[tokio::test]
async fn test_update_to_taken_name_is_conflict() {
    let cli = setup_test_client().await;

    for name in ["Laptop", "Mouse"] {
        cli.post("/api/v1/items/")
            .body_json(&json!({"name": name}))
            .send()
            .await
            .assert_status(StatusCode::CREATED);
    }
    let items = body_json(cli.get("/api/v1/items/").send().await).await;
    let mouse_id = items[1]["id"].as_i64().expect("id should be an integer");

    let resp = cli
        .patch(format!("/api/v1/items/{}", mouse_id))
        .body_json(&json!({"name": "Laptop"}))
        .send()
        .await;
    resp.assert_status(StatusCode::CONFLICT);

    // Renaming to its own current name is not a conflict
    let resp = cli
        .patch(format!("/api/v1/items/{}", mouse_id))
        .body_json(&json!({"name": "Mouse"}))
        .send()
        .await;
    resp.assert_status_is_ok();
}

#[tokio::test]
async fn test_delete_twice_is_not_found() {
    let cli = setup_test_client().await;

    let created = body_json(
        cli.post("/api/v1/items/")
            .body_json(&json!({"name": "Laptop"}))
            .send()
            .await,
    )
    .await;
    let id = created["id"].as_i64().expect("id should be an integer");

    cli.delete(format!("/api/v1/items/{}", id))
        .send()
        .await
        .assert_status(StatusCode::NO_CONTENT);
    cli.delete(format!("/api/v1/items/{}", id))
        .send()
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_ids_beyond_32_bits_are_not_found() {
    let cli = setup_test_client().await;

    let resp = cli.get("/api/v1/items/3000000000").send().await;
    resp.assert_status(StatusCode::NOT_FOUND);
    resp.assert_json(json!({"detail": "Item not found"})).await;

    let resp = cli
        .patch("/api/v1/items/3000000000")
        .body_json(&json!({"description": "far away"}))
        .send()
        .await;
    resp.assert_status(StatusCode::NOT_FOUND);

    let resp = cli.delete("/api/v1/items/3000000000").send().await;
    resp.assert_status(StatusCode::NOT_FOUND);
    resp.assert_json(json!({"detail": "Item not found"})).await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_updates_on_file_database_all_succeed() {
    let db_file = TempDbFile::new("concurrent_updates");
    let cli = Arc::new(setup_test_client_with_url(db_file.database_url()).await);

    let created = body_json(
        cli.post("/api/v1/items/")
            .body_json(&json!({"name": "Laptop"}))
            .send()
            .await,
    )
    .await;
    let id = created["id"].as_i64().expect("id should be an integer");

    let mut handles = Vec::new();
    for n in 0..40 {
        let cli = cli.clone();
        handles.push(tokio::spawn(async move {
            cli.patch(format!("/api/v1/items/{}", id))
                .body_json(&json!({"description": format!("d{}", n)}))
                .send()
                .await
                .assert_status_is_ok();
        }));
    }
    for handle in handles {
        handle.await.expect("concurrent update did not return 200");
    }

    // Last write wins: the stored description is one of the submitted values
    let item = body_json(cli.get(format!("/api/v1/items/{}", id)).send().await).await;
    let description = item["description"]
        .as_str()
        .expect("description should be set");
    let submitted: Vec<String> = (0..40).map(|n| format!("d{}", n)).collect();
    assert!(submitted.iter().any(|d| d == description));
    assert_eq!(item["name"], "Laptop");
}
