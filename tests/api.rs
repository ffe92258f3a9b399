use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use foodlog::{app::build_app, AppState};
use serde_json::{json, Value};
use tower::ServiceExt;

async fn app() -> Router {
    let state = AppState::in_memory().await.expect("in-memory state");
    build_app(state)
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("request");

    let response = app.clone().oneshot(request).await.expect("response");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.expect("body");
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into()))
    };
    (status, value)
}

async fn create_food(app: &Router, name: &str, calories: f64) -> i64 {
    let (status, body) = send(
        app,
        "POST",
        "/api/v1/foods",
        Some(json!({
            "name": name,
            "category": "Test",
            "base_unit": "g",
            "base_quantity": 100.0,
            "calories": calories,
            "proteins": 9.0,
            "carbs": 14.0,
            "fats": 4.0
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    body["id"].as_i64().expect("food id")
}

fn approx(value: &Value, expected: f64) -> bool {
    value.as_f64().map(|v| (v - expected).abs() < 0.1).unwrap_or(false)
}

#[tokio::test]
async fn health_is_ok() {
    let app = app().await;
    let (status, body) = send(&app, "GET", "/api/v1/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, Value::String("ok".into()));
}

#[tokio::test]
async fn custom_unit_scenario_over_http() {
    let app = app().await;
    let food_id = create_food(&app, "Marmita", 112.0).await;

    let (status, unit) = send(
        &app,
        "PUT",
        &format!("/api/v1/foods/{food_id}/units"),
        Some(json!({"unit_name": "unidade", "grams": 350.0})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(unit["grams"], json!(350.0));

    let (status, n) = send(
        &app,
        "GET",
        &format!("/api/v1/foods/{food_id}/nutrition?quantity=1&unit=unidade"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(approx(&n["calories"], 392.0), "{n}");
    assert!(approx(&n["weight_grams"], 350.0), "{n}");

    let (_, default_query) = send(&app, "GET", &format!("/api/v1/foods/{food_id}/nutrition"), None).await;
    assert!(approx(&default_query["calories"], 112.0), "{default_query}");
}

#[tokio::test]
async fn errors_map_to_status_and_kind() {
    let app = app().await;

    let (status, body) = send(&app, "GET", "/api/v1/foods/999", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["kind"], "not_found");

    let (status, body) = send(
        &app,
        "POST",
        "/api/v1/recipes",
        Some(json!({"name": "Soup", "portions_yield": 0})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["kind"], "validation");

    let (status, _) = send(
        &app,
        "POST",
        "/api/v1/logs",
        Some(json!({
            "log_date": "2024-03-05",
            "loggable_type": "meal",
            "loggable_id": 3,
            "quantity": 1.0,
            "unit_name": "portion"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn composition_and_daily_summary_end_to_end() {
    let app = app().await;
    let oats = create_food(&app, "Oats", 389.0).await;
    send(
        &app,
        "PUT",
        &format!("/api/v1/foods/{oats}/units"),
        Some(json!({"unit_name": "tablespoon", "grams": 10.0})),
    )
    .await;

    let (status, recipe) = send(
        &app,
        "POST",
        "/api/v1/recipes",
        Some(json!({"name": "Pancakes", "portions_yield": 2})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let recipe_id = recipe["id"].as_i64().expect("recipe id");
    let (status, _) = send(
        &app,
        "POST",
        &format!("/api/v1/recipes/{recipe_id}/ingredients"),
        Some(json!({"food_id": oats, "quantity": 40.0, "unit_name": "g"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (_, meal) = send(&app, "POST", "/api/v1/meals", Some(json!({"name": "Breakfast"}))).await;
    let meal_id = meal["id"].as_i64().expect("meal id");
    for item in [
        json!({"food_id": oats, "quantity": 2.0, "unit_name": "tablespoon"}),
        json!({"recipe_id": recipe_id, "quantity": 1.0, "unit_name": "portion"}),
    ] {
        let (status, body) = send(&app, "POST", &format!("/api/v1/meals/{meal_id}/items"), Some(item)).await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
    }
    let (status, _) = send(
        &app,
        "POST",
        &format!("/api/v1/meals/{meal_id}/items"),
        Some(json!({"food_id": oats, "recipe_id": recipe_id, "quantity": 1.0, "unit_name": "g"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let expected = (2.0 * 10.0 / 100.0 * 389.0) + ((40.0 / 100.0 * 389.0) / 2.0);
    let (_, n) = send(&app, "GET", &format!("/api/v1/meals/{meal_id}/nutrition"), None).await;
    assert!(approx(&n["calories"], expected), "{n}");

    let (status, entry) = send(
        &app,
        "POST",
        "/api/v1/logs",
        Some(json!({
            "log_date": "2024-03-05",
            "loggable_type": "meal",
            "loggable_id": meal_id,
            "quantity": 3.0,
            "unit_name": "plate"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{entry}");
    assert!(approx(&entry["grams"], 40.0), "{entry}");
    assert_eq!(entry["loggable"], json!({"type": "meal", "id": meal_id}));
    assert_eq!(entry["log_date"], "2024-03-05");

    let (_, logs) = send(&app, "GET", "/api/v1/logs?date=2024-03-05", None).await;
    assert_eq!(logs.as_array().map(Vec::len), Some(1));

    let (status, summary) = send(&app, "GET", "/api/v1/logs/summary?date=2024-03-05", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(summary["entries"][0]["name"], "Breakfast");
    assert!(approx(&summary["totals"]["calories"], expected), "{summary}");
    assert!(approx(&summary["remaining_calories"], 2000.0 - expected), "{summary}");
}

#[tokio::test]
async fn deactivated_food_leaves_listing() {
    let app = app().await;
    let apple = create_food(&app, "Apple", 52.0).await;
    create_food(&app, "Pear", 57.0).await;

    let (status, _) = send(&app, "DELETE", &format!("/api/v1/foods/{apple}"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, foods) = send(&app, "GET", "/api/v1/foods", None).await;
    let names: Vec<&str> = foods
        .as_array()
        .expect("food list")
        .iter()
        .filter_map(|f| f["name"].as_str())
        .collect();
    assert_eq!(names, vec!["Pear"]);

    let (status, food) = send(&app, "GET", &format!("/api/v1/foods/{apple}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(food["is_active"], json!(false));
}
