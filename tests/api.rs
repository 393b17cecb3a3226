use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use temp_dir::TempDir;
use tower::ServiceExt;

async fn app(dir: &TempDir) -> anyhow::Result<Router> {
    let url = format!("sqlite://{}", dir.child("db.sqlite3").display());
    let pool = mealmind_db::pool::create_pool(&url, 2).await?;
    mealmind_db::migrate(&pool).await?;

    mealmind::create_app(pool.clone(), pool)
}

fn api_request(method: &str, uri: &str, user_id: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);

    if let Some(user_id) = user_id {
        builder = builder.header("x-user-id", user_id);
    }

    match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn health_needs_no_identity() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let app = app(&dir).await?;

    let response = app
        .clone()
        .oneshot(api_request("GET", "/health", None, None))
        .await?;
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(api_request("GET", "/ready", None, None))
        .await?;
    assert_eq!(response.status(), StatusCode::OK);

    Ok(())
}

#[tokio::test]
async fn api_rejects_requests_without_identity() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let app = app(&dir).await?;

    let response = app
        .oneshot(api_request("GET", "/api/meals", None, None))
        .await?;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    Ok(())
}

#[tokio::test]
async fn meal_crud_round_trip() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let app = app(&dir).await?;

    let create = json!({
        "name": "Tacos",
        "tags": ["mexican"],
        "cookTimeMinutes": 25,
        "ingredients": [
            {"name": "Tortillas", "quantity": "8"},
            {"name": "Ground beef"}
        ]
    });
    let response = app
        .clone()
        .oneshot(api_request("POST", "/api/meals", Some("alice"), Some(create)))
        .await?;
    assert_eq!(response.status(), StatusCode::OK);
    let meal = json_body(response).await;
    let id = meal["id"].as_str().unwrap().to_owned();
    assert_eq!(meal["cookTimeMinutes"], 25);

    let response = app
        .clone()
        .oneshot(api_request("GET", "/api/meals", Some("alice"), None))
        .await?;
    let meals = json_body(response).await;
    assert_eq!(meals.as_array().unwrap().len(), 1);

    // Another user's library is empty.
    let response = app
        .clone()
        .oneshot(api_request("GET", "/api/meals", Some("bob"), None))
        .await?;
    assert_eq!(json_body(response).await.as_array().unwrap().len(), 0);

    let update = json!({
        "name": "Fish tacos",
        "cookTimeMinutes": 30,
        "ingredients": [{"name": "Tortillas"}]
    });
    let response = app
        .clone()
        .oneshot(api_request(
            "PUT",
            &format!("/api/meals/{id}"),
            Some("alice"),
            Some(update),
        ))
        .await?;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["name"], "Fish tacos");

    let response = app
        .clone()
        .oneshot(api_request(
            "DELETE",
            &format!("/api/meals/{id}"),
            Some("alice"),
            None,
        ))
        .await?;
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(api_request(
            "GET",
            &format!("/api/meals/{id}"),
            Some("alice"),
            None,
        ))
        .await?;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    Ok(())
}

#[tokio::test]
async fn invalid_meal_input_is_unprocessable() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let app = app(&dir).await?;

    let create = json!({
        "name": "",
        "cookTimeMinutes": 25,
        "ingredients": []
    });
    let response = app
        .oneshot(api_request("POST", "/api/meals", Some("alice"), Some(create)))
        .await?;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    Ok(())
}

#[tokio::test]
async fn plan_generation_and_lookup_over_http() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let app = app(&dir).await?;

    // No plan yet.
    let response = app
        .clone()
        .oneshot(api_request(
            "GET",
            "/api/plan?week=2024-01-01",
            Some("alice"),
            None,
        ))
        .await?;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let create = json!({
        "name": "Curry",
        "cookTimeMinutes": 30,
        "ingredients": [{"name": "rice"}]
    });
    app.clone()
        .oneshot(api_request("POST", "/api/meals", Some("alice"), Some(create)))
        .await?;

    let response = app
        .clone()
        .oneshot(api_request(
            "POST",
            "/api/plan/generate",
            Some("alice"),
            Some(json!({"weekStart": "2024-01-01"})),
        ))
        .await?;
    assert_eq!(response.status(), StatusCode::OK);
    let plan = json_body(response).await;
    assert_eq!(plan["weekStart"], "2024-01-01");
    assert_eq!(plan["days"].as_array().unwrap().len(), 7);

    // Any date in the week resolves to the same plan.
    let response = app
        .clone()
        .oneshot(api_request(
            "GET",
            "/api/plan?week=2024-01-04",
            Some("alice"),
            None,
        ))
        .await?;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["weekStart"], "2024-01-01");

    // Shopping list derives from the stored plan.
    let response = app
        .oneshot(api_request(
            "POST",
            "/api/shopping/generate",
            Some("alice"),
            Some(json!({"weekStart": "2024-01-01"})),
        ))
        .await?;
    assert_eq!(response.status(), StatusCode::OK);
    let items = json_body(response).await;
    assert_eq!(items[0]["name"], "Rice");
    assert_eq!(items[0]["checked"], false);

    Ok(())
}
