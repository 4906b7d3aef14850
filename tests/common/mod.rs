use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use coffeeshop::modules::drinks::model::Ingredient;
use coffeeshop::modules::drinks::repository::{DrinkRepository, InMemoryDrinkRepository};
use coffeeshop::router::init_router;
use coffeeshop::state::AppState;
use coffeeshop_auth::testutil::{TokenBuilder, static_gate};
use coffeeshop_config::CorsConfig;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

#[allow(dead_code)]
pub fn ingredient(name: &str, color: &str, parts: i32) -> Ingredient {
    Ingredient {
        name: name.to_string(),
        color: color.to_string(),
        parts,
    }
}

/// Menu used by most tests: Latte is id 1, Americano id 2.
#[allow(dead_code)]
pub fn seeded_repo() -> Arc<InMemoryDrinkRepository> {
    Arc::new(InMemoryDrinkRepository::with_drinks(vec![
        (
            "Latte",
            vec![
                ingredient("espresso", "brown", 1),
                ingredient("milk", "white", 3),
            ],
        ),
        ("Americano", vec![ingredient("espresso", "brown", 1)]),
    ]))
}

/// Router over `repo`, trusting tokens minted by [`TokenBuilder`].
#[allow(dead_code)]
pub fn setup_test_app(repo: Arc<InMemoryDrinkRepository>) -> Router {
    let drinks: Arc<dyn DrinkRepository> = repo;
    init_router(AppState::new(drinks, static_gate(), CorsConfig::default()))
}

#[allow(dead_code)]
pub fn token_with(permissions: &[&str]) -> String {
    TokenBuilder::new().permissions(permissions).build()
}

#[allow(dead_code)]
pub fn request(method: &str, uri: &str, token: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }

    match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_string(&body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

/// Sends the request and returns the status and parsed JSON body.
#[allow(dead_code)]
pub async fn send(app: Router, req: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(req).await.unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).unwrap()
    };
    (status, json)
}
