mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use coffeeshop::modules::drinks::repository::{DrinkRepository, InMemoryDrinkRepository};
use coffeeshop_auth::testutil::TokenBuilder;
use common::{request, seeded_repo, send, setup_test_app, token_with};
use serde_json::json;

#[tokio::test]
async fn test_get_drinks_is_public_and_short() {
    let app = setup_test_app(seeded_repo());

    let (status, body) = send(app, request("GET", "/drinks", None, None)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "success": true,
            "drinks": [
                {
                    "id": 1,
                    "title": "Latte",
                    "recipe": [
                        { "name": "espresso", "color": "brown" },
                        { "name": "milk", "color": "white" }
                    ]
                },
                {
                    "id": 2,
                    "title": "Americano",
                    "recipe": [{ "name": "espresso", "color": "brown" }]
                }
            ]
        })
    );
}

#[tokio::test]
async fn test_get_drinks_empty_menu() {
    let app = setup_test_app(Arc::new(InMemoryDrinkRepository::new()));

    let (status, body) = send(app, request("GET", "/drinks", None, None)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "success": true, "drinks": [] }));
}

#[tokio::test]
async fn test_get_drinks_detail_requires_token() {
    let app = setup_test_app(seeded_repo());

    let (status, body) = send(app, request("GET", "/drinks-detail", None, None)).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], 401);
    assert_eq!(body["code"], "authorization_header_missing");
}

#[tokio::test]
async fn test_get_drinks_detail_requires_permission() {
    let app = setup_test_app(seeded_repo());
    let token = token_with(&["post:drinks"]);

    let (status, body) = send(app, request("GET", "/drinks-detail", Some(&token), None)).await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], 403);
    assert_eq!(body["code"], "permissions_missing");
}

#[tokio::test]
async fn test_get_drinks_detail_returns_long_view() {
    let app = setup_test_app(seeded_repo());
    let token = token_with(&["get:drinks-detail"]);

    let (status, body) = send(app, request("GET", "/drinks-detail", Some(&token), None)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(
        body["drinks"][0]["recipe"],
        json!([
            { "name": "espresso", "color": "brown", "parts": 1 },
            { "name": "milk", "color": "white", "parts": 3 }
        ])
    );
}

#[tokio::test]
async fn test_expired_token_is_rejected() {
    let app = setup_test_app(seeded_repo());
    let token = TokenBuilder::new()
        .permissions(&["get:drinks-detail"])
        .expires_in(-3600)
        .build();

    let (status, body) = send(app, request("GET", "/drinks-detail", Some(&token), None)).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "token_expired");
}

#[tokio::test]
async fn test_create_drink_normalises_single_ingredient() {
    let app = setup_test_app(Arc::new(InMemoryDrinkRepository::new()));
    let token = token_with(&["post:drinks"]);
    let payload = json!({
        "title": "Water",
        "recipe": { "name": "water", "color": "blue", "parts": 1 }
    });

    let (status, body) = send(app, request("POST", "/drinks", Some(&token), Some(payload))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "success": true,
            "drinks": [{
                "id": 1,
                "title": "Water",
                "recipe": [{ "name": "water", "color": "blue", "parts": 1 }]
            }]
        })
    );
}

#[tokio::test]
async fn test_create_drink_persists() {
    let repo = seeded_repo();
    let app = setup_test_app(repo.clone());
    let token = token_with(&["post:drinks"]);
    let payload = json!({
        "title": "Mocha",
        "recipe": [
            { "name": "espresso", "color": "brown", "parts": 1 },
            { "name": "chocolate", "color": "dark brown", "parts": 1 }
        ]
    });

    let (status, body) = send(app, request("POST", "/drinks", Some(&token), Some(payload))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["drinks"][0]["id"], 3);
    let stored = repo.find(3).await.unwrap().unwrap();
    assert_eq!(stored.title, "Mocha");
    assert_eq!(stored.ingredients().len(), 2);
}

#[tokio::test]
async fn test_create_drink_without_permission_creates_nothing() {
    let repo = seeded_repo();
    let app = setup_test_app(repo.clone());
    let token = token_with(&["get:drinks-detail", "patch:drinks"]);
    let payload = json!({
        "title": "Water",
        "recipe": { "name": "water", "color": "blue", "parts": 1 }
    });

    let (status, body) = send(app, request("POST", "/drinks", Some(&token), Some(payload))).await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], "permissions_missing");
    assert_eq!(repo.list().await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_create_drink_missing_recipe_is_bad_request() {
    let app = setup_test_app(seeded_repo());
    let token = token_with(&["post:drinks"]);

    let (status, body) = send(
        app,
        request("POST", "/drinks", Some(&token), Some(json!({ "title": "Water" }))),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], 400);
    assert_eq!(body["message"], "recipe is required");
}

#[tokio::test]
async fn test_create_drink_invalid_recipe_is_unprocessable() {
    let app = setup_test_app(seeded_repo());
    let token = token_with(&["post:drinks"]);

    let empty_recipe = json!({ "title": "Nothing", "recipe": [] });
    let (status, _) = send(
        app.clone(),
        request("POST", "/drinks", Some(&token), Some(empty_recipe)),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let zero_parts = json!({
        "title": "Air",
        "recipe": { "name": "air", "color": "clear", "parts": 0 }
    });
    let (status, body) = send(app, request("POST", "/drinks", Some(&token), Some(zero_parts))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], "unprocessable");
}

#[tokio::test]
async fn test_create_drink_duplicate_title_is_unprocessable() {
    let app = setup_test_app(seeded_repo());
    let token = token_with(&["post:drinks"]);
    let payload = json!({
        "title": "Latte",
        "recipe": { "name": "milk", "color": "white", "parts": 2 }
    });

    let (status, body) = send(app, request("POST", "/drinks", Some(&token), Some(payload))).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_patch_drink_keeps_unsupplied_fields() {
    let repo = seeded_repo();
    let app = setup_test_app(repo.clone());
    let token = token_with(&["patch:drinks"]);

    let (status, body) = send(
        app,
        request("PATCH", "/drinks/1", Some(&token), Some(json!({ "title": "Cafe Latte" }))),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "success": true,
            "drinks": [{
                "id": 1,
                "title": "Cafe Latte",
                "recipe": [
                    { "name": "espresso", "color": "brown", "parts": 1 },
                    { "name": "milk", "color": "white", "parts": 3 }
                ]
            }]
        })
    );
}

#[tokio::test]
async fn test_patch_drink_replaces_recipe() {
    let repo = seeded_repo();
    let app = setup_test_app(repo.clone());
    let token = token_with(&["patch:drinks"]);
    let payload = json!({ "recipe": { "name": "water", "color": "clear", "parts": 2 } });

    let (status, _) = send(app, request("PATCH", "/drinks/2", Some(&token), Some(payload))).await;

    assert_eq!(status, StatusCode::OK);
    let stored = repo.find(2).await.unwrap().unwrap();
    assert_eq!(stored.title, "Americano");
    assert_eq!(stored.ingredients()[0].name, "water");
}

#[tokio::test]
async fn test_patch_missing_drink_is_not_found() {
    let app = setup_test_app(seeded_repo());
    let token = token_with(&["patch:drinks"]);

    let (status, body) = send(
        app,
        request("PATCH", "/drinks/999", Some(&token), Some(json!({ "title": "Ghost" }))),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], 404);
    assert_eq!(body["message"], "Drink not found");
}

#[tokio::test]
async fn test_patch_non_integer_id_is_not_found() {
    let app = setup_test_app(seeded_repo());
    let token = token_with(&["patch:drinks"]);

    let (status, body) = send(
        app,
        request("PATCH", "/drinks/latte", Some(&token), Some(json!({ "title": "Ghost" }))),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], 404);
}

#[tokio::test]
async fn test_patch_empty_body_is_unprocessable() {
    let app = setup_test_app(seeded_repo());
    let token = token_with(&["patch:drinks"]);

    let (status, body) = send(app, request("PATCH", "/drinks/1", Some(&token), Some(json!({})))).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["message"], "at least one of title or recipe is required");
}

#[tokio::test]
async fn test_patch_auth_runs_before_id_lookup() {
    let app = setup_test_app(seeded_repo());

    let (status, body) = send(
        app,
        request("PATCH", "/drinks/999", None, Some(json!({ "title": "Ghost" }))),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "authorization_header_missing");
}

#[tokio::test]
async fn test_delete_drink() {
    let repo = seeded_repo();
    let app = setup_test_app(repo.clone());
    let token = token_with(&["delete:drinks"]);

    let (status, body) = send(app, request("DELETE", "/drinks/1", Some(&token), None)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "success": true, "drinks": 1 }));
    assert!(repo.find(1).await.unwrap().is_none());
}

#[tokio::test]
async fn test_delete_without_permission_keeps_record() {
    let repo = seeded_repo();
    let app = setup_test_app(repo.clone());
    let token = token_with(&["get:drinks-detail", "post:drinks", "patch:drinks"]);

    let (status, body) = send(app, request("DELETE", "/drinks/1", Some(&token), None)).await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], "permissions_missing");
    assert!(repo.find(1).await.unwrap().is_some());
}

#[tokio::test]
async fn test_delete_missing_drink_is_not_found() {
    let app = setup_test_app(seeded_repo());
    let token = token_with(&["delete:drinks"]);

    let (status, _) = send(app, request("DELETE", "/drinks/42", Some(&token), None)).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_permission_match_is_exact() {
    let repo = seeded_repo();
    let app = setup_test_app(repo.clone());
    let token = token_with(&["delete:drinks:all", "DELETE:DRINKS", "delete:*"]);

    let (status, _) = send(app, request("DELETE", "/drinks/1", Some(&token), None)).await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert!(repo.find(1).await.unwrap().is_some());
}

#[tokio::test]
async fn test_unknown_route_is_not_found_envelope() {
    let app = setup_test_app(seeded_repo());

    let (status, body) = send(app, request("GET", "/coffee", None, None)).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], 404);
    assert_eq!(body["code"], "not_found");
}

#[tokio::test]
async fn test_wrong_method_is_method_not_allowed_envelope() {
    let app = setup_test_app(seeded_repo());

    let (status, body) = send(app.clone(), request("PUT", "/drinks", None, None)).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], 405);
    assert_eq!(body["code"], "method_not_allowed");

    let (status, _) = send(app, request("GET", "/drinks/1", None, None)).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn test_health() {
    let app = setup_test_app(seeded_repo());

    let (status, body) = send(app, request("GET", "/health", None, None)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "ok" }));
}
