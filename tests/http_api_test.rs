use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use film_ticket_box::adapters::http::build_router;
use film_ticket_box::{CinemaService, ValidationPolicy};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

fn app() -> Router {
    build_router(Arc::new(CinemaService::new(ValidationPolicy::default())))
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Option<String>, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(value) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(value.to_string())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .map(|v| v.to_str().unwrap().to_string());
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, content_type, json)
}

fn sorted(value: &Value) -> Vec<String> {
    let mut items: Vec<String> = value
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_str().unwrap().to_string())
        .collect();
    items.sort();
    items
}

fn reference_cinemas() -> Value {
    json!({"cinemas": [
        {"name": "PiterLand", "width": 2, "height": 3,
         "films": ["Once upon in hollywood", "Survived"]},
        {"name": "Galary", "films": ["Survived", "Ford VS Ferrari"], "width": 3, "height": 4}
    ]})
}

async fn registered_app() -> Router {
    let app = app();
    let (status, _, _) = send(&app, Method::POST, "/cinemas/", Some(reference_cinemas())).await;
    assert_eq!(status, StatusCode::CREATED);
    app
}

#[tokio::test]
async fn test_register_and_list_cinemas() {
    let app = registered_app().await;

    let (status, content_type, body) = send(&app, Method::GET, "/cinemas/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(content_type.as_deref(), Some("application/json"));
    assert_eq!(sorted(&body["cinemas"]), vec!["Galary", "PiterLand"]);

    // the slash-less form is the same resource
    let (status, _, body) = send(&app, Method::GET, "/cinemas", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(sorted(&body["cinemas"]), vec!["Galary", "PiterLand"]);
}

#[tokio::test]
async fn test_oversized_batch_is_rejected_atomically() {
    let app = app();
    let payload = json!({"cinemas": [
        {"name": "PiterLand", "width": 10, "height": 20, "films": ["Survived"]},
        {"name": "Galary", "width": 10, "height": 5, "films": ["Survived"]}
    ]});

    let (status, content_type, body) = send(&app, Method::POST, "/cinemas/", Some(payload)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(content_type.as_deref(), Some("application/json"));
    assert_eq!(body, json!({"reason": "Failed to add cinema"}));

    let (_, _, body) = send(&app, Method::GET, "/cinemas/", None).await;
    assert_eq!(body, json!({"cinemas": []}));
}

#[tokio::test]
async fn test_one_bad_cinema_voids_the_batch() {
    let app = app();
    let payload = json!({"cinemas": [
        {"name": "Small", "width": 2, "height": 2, "films": ["A"]},
        {"name": "Huge", "width": 10, "height": 2, "films": ["B"]}
    ]});

    let (status, _, _) = send(&app, Method::POST, "/cinemas/", Some(payload)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _, _) = send(&app, Method::GET, "/cinemas/Small", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_reregistering_is_rejected() {
    let app = registered_app().await;
    let (status, _, body) = send(&app, Method::POST, "/cinemas/", Some(reference_cinemas())).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["reason"], "Failed to add cinema");
}

#[tokio::test]
async fn test_malformed_registration_body() {
    let app = app();
    for payload in [
        json!({"theatres": []}),
        json!({"cinemas": [{"name": "NoSize", "films": []}]}),
        json!({"cinemas": [{"name": "Negative", "width": -1, "height": 2, "films": []}]}),
    ] {
        let (status, _, body) = send(&app, Method::POST, "/cinemas/", Some(payload)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["reason"], "Failed to add cinema");
    }

    // no content type at all
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri("/cinemas/")
                .body(Body::from(reference_cinemas().to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_film_queries() {
    let app = registered_app().await;

    let (status, _, body) = send(&app, Method::GET, "/cinemas/Galary", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(sorted(&body["films"]), vec!["Ford VS Ferrari", "Survived"]);

    let (status, _, body) = send(&app, Method::GET, "/cinemas/films", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        sorted(&body["films"]),
        vec!["Ford VS Ferrari", "Once upon in hollywood", "Survived"]
    );

    let (status, _, body) = send(&app, Method::GET, "/cinemas/films/Survived", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(sorted(&body["cinemas"]), vec!["Galary", "PiterLand"]);

    let (status, _, body) =
        send(&app, Method::GET, "/cinemas/films/Once%20upon%20in%20hollywood", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"cinemas": ["PiterLand"]}));

    let (status, _, body) = send(&app, Method::GET, "/cinemas/films/Tenet", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"cinemas": []}));

    let (status, content_type, body) = send(&app, Method::GET, "/cinemas/Nowhere", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(content_type.as_deref(), Some("application/json"));
    assert!(body["reason"].is_string());
}

#[tokio::test]
async fn test_seat_listing() {
    let app = registered_app().await;

    let (status, _, body) = send(&app, Method::GET, "/cinemas/PiterLand/Survived", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        sorted(&body["seats"]),
        vec!["0row0seat", "0row1seat", "0row2seat", "1row0seat", "1row1seat", "1row2seat"]
    );

    let (status, _, _) = send(&app, Method::GET, "/cinemas/PiterLand/Ford%20VS%20Ferrari", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _, _) = send(&app, Method::GET, "/cinemas/Nowhere/Survived", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_booking_sequence() {
    let app = registered_app().await;
    let uri = "/cinemas/PiterLand/Survived";

    let (status, content_type, _) =
        send(&app, Method::POST, uri, Some(json!({"seats": ["0row0seat", "0row1seat"]}))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(content_type.as_deref(), Some("application/json"));

    let (status, _, _) =
        send(&app, Method::POST, uri, Some(json!({"seats": ["0row2seat", "1row1seat"]}))).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, content_type, body) =
        send(&app, Method::POST, uri, Some(json!({"seats": ["0row0seat", "1row2seat"]}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(content_type.as_deref(), Some("application/json"));
    assert_eq!(body, json!({"busy_seats": ["0row0seat"]}));

    // the rejected request booked nothing
    let (_, _, body) = send(&app, Method::GET, "/cinemas/PiterLand/Survived?available=true", None).await;
    assert_eq!(sorted(&body["seats"]), vec!["1row0seat", "1row2seat"]);

    // the full universe is unaffected by bookings
    let (_, _, body) = send(&app, Method::GET, uri, None).await;
    assert_eq!(body["seats"].as_array().unwrap().len(), 6);
}

#[tokio::test]
async fn test_out_of_range_seats_are_reported_busy() {
    let app = registered_app().await;
    let (status, _, body) = send(
        &app,
        Method::POST,
        "/cinemas/PiterLand/Survived",
        Some(json!({"seats": ["1row0seat", "2row0seat", "0row3seat", "seat7"]})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"busy_seats": ["2row0seat", "0row3seat", "seat7"]}));

    let (status, _, _) = send(
        &app,
        Method::POST,
        "/cinemas/PiterLand/Survived",
        Some(json!({"seats": ["1row0seat"]})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn test_booking_errors() {
    let app = registered_app().await;

    let (status, _, body) = send(
        &app,
        Method::POST,
        "/cinemas/PiterLand/Survived",
        Some(json!({"seats": []})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["reason"].is_string());

    let (status, _, body) = send(
        &app,
        Method::POST,
        "/cinemas/PiterLand/Survived",
        Some(json!({"places": ["0row0seat"]})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["reason"].is_string());

    let (status, _, _) = send(
        &app,
        Method::POST,
        "/cinemas/PiterLand/Tenet",
        Some(json!({"seats": ["0row0seat"]})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_unknown_routes_and_methods() {
    let app = registered_app().await;

    let (status, content_type, body) = send(&app, Method::GET, "/theatres", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(content_type.as_deref(), Some("application/json"));
    assert_eq!(body["reason"], "Not found");

    let (status, _, _) = send(&app, Method::GET, "/cinemas/PiterLand/Survived/extra", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _, _) = send(&app, Method::DELETE, "/cinemas/PiterLand/Survived", None).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);

    let (status, _, body) = send(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "ok"}));
}
