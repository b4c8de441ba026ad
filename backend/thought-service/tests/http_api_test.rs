//! HTTP tests for the thought-service API against the in-memory store.

mod common;

use actix_web::http::{header::ContentType, StatusCode};
use actix_web::test;
use common::{test_app, MemoryStore};
use serde_json::{json, Value};
use std::sync::Arc;
use uuid::Uuid;

// Kadıköy, Istanbul
const ORIGIN_LAT: f64 = 40.9903;
const ORIGIN_LNG: f64 = 29.0290;

async fn body_json(resp: actix_web::dev::ServiceResponse) -> Value {
    let body = test::read_body(resp).await;
    serde_json::from_slice(&body).expect("response body is JSON")
}

#[actix_web::test]
async fn create_thought_as_anonymous_guest() {
    let store = Arc::new(MemoryStore::new());
    let app = test::init_service(test_app(store.clone())).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/thoughts")
        .set_json(json!({ "content": "Vapurda martılar", "latitude": ORIGIN_LAT, "longitude": ORIGIN_LNG }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let body = body_json(resp).await;
    assert_eq!(body["content"], "Vapurda martılar");
    assert_eq!(body["author"]["username"], "Anonim");
    assert_eq!(body["author"]["isGuest"], true);
    assert_eq!(body["isPublic"], true);
    assert_eq!(body["distance"], 0);
    assert_eq!(body["_count"]["comments"], 0);
    assert_eq!(body["comments"], json!([]));
    assert_eq!(body["latitude"], ORIGIN_LAT);
}

#[actix_web::test]
async fn create_thought_reuses_guest_by_username() {
    let store = Arc::new(MemoryStore::new());
    let app = test::init_service(test_app(store.clone())).await;

    let mut author_ids = Vec::new();
    for payload in [
        json!({ "content": "bir", "author": { "username": " deniz " } }),
        json!({ "content": "iki", "authorUsername": "deniz" }),
    ] {
        let req = test::TestRequest::post()
            .uri("/api/v1/thoughts")
            .set_json(payload)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let body = body_json(resp).await;
        assert_eq!(body["author"]["username"], "deniz");
        author_ids.push(body["authorId"].as_str().unwrap().to_string());
    }

    assert_eq!(author_ids[0], author_ids[1]);
    assert_eq!(store.user_count(), 1);
}

#[actix_web::test]
async fn create_thought_without_coordinates_defaults_to_zero() {
    let store = Arc::new(MemoryStore::new());
    let app = test::init_service(test_app(store)).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/thoughts")
        .set_json(json!({ "content": "konumsuz" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let body = body_json(resp).await;
    assert_eq!(body["latitude"], 0.0);
    assert_eq!(body["longitude"], 0.0);
    assert_eq!(body["distance"], 0);
}

#[actix_web::test]
async fn create_thought_with_explicit_author() {
    let store = Arc::new(MemoryStore::new());
    let registered = store.add_registered_user("zeynep");
    let app = test::init_service(test_app(store)).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/thoughts")
        .set_json(json!({
            "content": "kayıtlı",
            "authorId": registered.id,
            "authorUsername": "ignored"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let body = body_json(resp).await;
    assert_eq!(body["authorId"], registered.id.to_string());
    assert_eq!(body["author"]["isGuest"], false);
}

#[actix_web::test]
async fn create_thought_rejects_blank_content() {
    let store = Arc::new(MemoryStore::new());
    let app = test::init_service(test_app(store.clone())).await;

    for payload in [json!({ "content": "   \n" }), json!({ "authorUsername": "ali" })] {
        let req = test::TestRequest::post()
            .uri("/api/v1/thoughts")
            .set_json(payload)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(resp).await, json!({ "error": "Content is required" }));
    }

    // No guest is created for a rejected thought
    assert_eq!(store.user_count(), 0);
}

#[actix_web::test]
async fn create_thought_error_statuses() {
    let store = Arc::new(MemoryStore::new());
    store.add_registered_user("admin");
    let app = test::init_service(test_app(store)).await;

    let cases = [
        (
            json!({ "content": "x", "authorId": Uuid::new_v4() }),
            StatusCode::NOT_FOUND,
        ),
        (
            json!({ "content": "x", "authorUsername": "admin" }),
            StatusCode::CONFLICT,
        ),
        (
            json!({ "content": "x", "latitude": 123.0, "longitude": 10.0 }),
            StatusCode::BAD_REQUEST,
        ),
        (
            json!({ "content": "x".repeat(1001) }),
            StatusCode::BAD_REQUEST,
        ),
        (
            json!({ "content": "x", "authorUsername": "u".repeat(40) }),
            StatusCode::BAD_REQUEST,
        ),
    ];

    for (payload, expected) in cases {
        let req = test::TestRequest::post()
            .uri("/api/v1/thoughts")
            .set_json(payload.clone())
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), expected, "payload: {}", payload);
        let body = body_json(resp).await;
        assert!(body["error"].is_string());
    }
}

#[actix_web::test]
async fn malformed_json_body_returns_400() {
    let store = Arc::new(MemoryStore::new());
    let app = test::init_service(test_app(store)).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/thoughts")
        .insert_header(ContentType::json())
        .set_payload("{\"content\": ")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert!(body_json(resp).await["error"].is_string());
}

#[actix_web::test]
async fn list_without_location_returns_newest_with_placeholder_distance() {
    let store = Arc::new(MemoryStore::new());
    let author = store.add_registered_user("mert");
    let older = store.add_thought(&author, "eski", 10.0, 10.0, 60);
    let newer = store.add_thought(&author, "yeni", -20.0, 30.0, 1);
    let app = test::init_service(test_app(store)).await;

    let req = test::TestRequest::get().uri("/api/v1/thoughts").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body = body_json(resp).await;
    let thoughts = body.as_array().unwrap();
    assert_eq!(thoughts.len(), 2);
    assert_eq!(thoughts[0]["id"], newer.id.to_string());
    assert_eq!(thoughts[1]["id"], older.id.to_string());
    assert!(thoughts.iter().all(|t| t["distance"] == 1000));
}

#[actix_web::test]
async fn list_nearby_filters_by_radius_and_sorts_by_distance() {
    let store = Arc::new(MemoryStore::new());
    let author = store.add_registered_user("elif");
    // ~1.1 km and ~3.3 km north, ~55 km north, and one on the other side of the world
    let mid = store.add_thought(&author, "orta", ORIGIN_LAT + 0.03, ORIGIN_LNG, 1);
    let near = store.add_thought(&author, "yakın", ORIGIN_LAT + 0.01, ORIGIN_LNG, 30);
    store.add_thought(&author, "uzak", ORIGIN_LAT + 0.5, ORIGIN_LNG, 2);
    store.add_thought(&author, "antipod", -ORIGIN_LAT, ORIGIN_LNG - 180.0, 3);
    let app = test::init_service(test_app(store)).await;

    let uri = format!(
        "/api/v1/thoughts?lat={}&lng={}&radius=5",
        ORIGIN_LAT, ORIGIN_LNG
    );
    let req = test::TestRequest::get().uri(&uri).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body = body_json(resp).await;
    let thoughts = body.as_array().unwrap();
    assert_eq!(thoughts.len(), 2);
    assert_eq!(thoughts[0]["id"], near.id.to_string());
    assert_eq!(thoughts[1]["id"], mid.id.to_string());

    let d0 = thoughts[0]["distance"].as_i64().unwrap();
    let d1 = thoughts[1]["distance"].as_i64().unwrap();
    assert!((1_100..=1_125).contains(&d0), "distance {}", d0);
    assert!((3_320..=3_350).contains(&d1), "distance {}", d1);
}

#[actix_web::test]
async fn list_nearby_respects_limit() {
    let store = Arc::new(MemoryStore::new());
    let author = store.add_registered_user("can");
    for i in 1..=5 {
        store.add_thought(&author, "nokta", ORIGIN_LAT + 0.001 * i as f64, ORIGIN_LNG, i);
    }
    let app = test::init_service(test_app(store)).await;

    let uri = format!("/api/v1/thoughts?lat={}&lng={}&limit=3", ORIGIN_LAT, ORIGIN_LNG);
    let req = test::TestRequest::get().uri(&uri).to_request();
    let body = body_json(test::call_service(&app, req).await).await;
    let distances: Vec<i64> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["distance"].as_i64().unwrap())
        .collect();
    assert_eq!(distances.len(), 3);
    assert!(distances.windows(2).all(|w| w[0] <= w[1]));
}

#[actix_web::test]
async fn list_nearby_excludes_bounding_box_corners() {
    let store = Arc::new(MemoryStore::new());
    let author = store.add_registered_user("deniz");
    // Inside the 10 km box but ~13.9 km away diagonally
    store.add_thought(&author, "köşe", 41.089, 29.117, 1);
    let inside = store.add_thought(&author, "içeride", 41.05, 29.0, 2);
    let app = test::init_service(test_app(store)).await;

    let req = test::TestRequest::get()
        .uri("/api/v1/thoughts?lat=41.0&lng=29.0&radius=10")
        .to_request();
    let body = body_json(test::call_service(&app, req).await).await;
    let thoughts = body.as_array().unwrap();
    assert_eq!(thoughts.len(), 1);
    assert_eq!(thoughts[0]["id"], inside.id.to_string());
}

#[actix_web::test]
async fn list_nearby_keeps_near_thoughts_when_candidate_cap_is_reached() {
    let store = Arc::new(MemoryStore::new());
    let author = store.add_registered_user("selin");
    // ~100 m away and older than everything else
    let near = store.add_thought(&author, "yakında", 41.0009, 29.0, 500);
    for _ in 0..1_000 {
        store.add_thought(&author, "köşede", 41.089, 29.117, 1);
    }
    let app = test::init_service(test_app(store)).await;

    let req = test::TestRequest::get()
        .uri("/api/v1/thoughts?lat=41.0&lng=29.0")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body = body_json(resp).await;
    let thoughts = body.as_array().unwrap();
    assert_eq!(thoughts.len(), 1);
    assert_eq!(thoughts[0]["id"], near.id.to_string());
    let distance = thoughts[0]["distance"].as_i64().unwrap();
    assert!((95..=105).contains(&distance), "distance {}", distance);
}

#[actix_web::test]
async fn list_nearby_crosses_the_antimeridian() {
    let store = Arc::new(MemoryStore::new());
    let author = store.add_registered_user("mavi");
    let across = store.add_thought(&author, "öbür yaka", 0.0, -179.995, 1);
    store.add_thought(&author, "uzakta", 0.0, -179.5, 1);
    let app = test::init_service(test_app(store)).await;

    let req = test::TestRequest::get()
        .uri("/api/v1/thoughts?lat=0.0&lng=179.99&radius=10")
        .to_request();
    let body = body_json(test::call_service(&app, req).await).await;
    let thoughts = body.as_array().unwrap();
    assert_eq!(thoughts.len(), 1);
    assert_eq!(thoughts[0]["id"], across.id.to_string());
    let distance = thoughts[0]["distance"].as_i64().unwrap();
    assert!((1_650..=1_690).contains(&distance), "distance {}", distance);
}

#[actix_web::test]
async fn list_rejects_malformed_query() {
    let store = Arc::new(MemoryStore::new());
    let app = test::init_service(test_app(store)).await;

    for uri in [
        "/api/v1/thoughts?lat=abc&lng=29",
        "/api/v1/thoughts?lat=41&lng=29&radius=-2",
        "/api/v1/thoughts?lat=41&lng=29&limit=0",
        "/api/v1/thoughts?lat=91&lng=29",
    ] {
        let req = test::TestRequest::get().uri(uri).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "uri: {}", uri);
        let body = body_json(resp).await;
        assert!(body["error"].as_str().unwrap().starts_with("Invalid query"));
    }
}

#[actix_web::test]
async fn list_embeds_three_latest_comments_and_total_count() {
    let store = Arc::new(MemoryStore::new());
    let author = store.add_registered_user("selin");
    let thought = store.add_thought(&author, "yorum bekliyor", ORIGIN_LAT, ORIGIN_LNG + 0.001, 5);
    store.add_thought(&author, "sessiz", ORIGIN_LAT, ORIGIN_LNG + 0.002, 5);
    let app = test::init_service(test_app(store.clone())).await;

    for i in 1..=5 {
        let req = test::TestRequest::post()
            .uri(&format!("/api/v1/thoughts/{}/comments", thought.id))
            .set_json(json!({ "content": format!("yorum {}", i), "authorId": author.id }))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CREATED);
    }

    let calls_before = store.comment_batch_calls();
    let uri = format!("/api/v1/thoughts?lat={}&lng={}", ORIGIN_LAT, ORIGIN_LNG);
    let req = test::TestRequest::get().uri(&uri).to_request();
    let body = body_json(test::call_service(&app, req).await).await;
    let thoughts = body.as_array().unwrap();
    assert_eq!(thoughts.len(), 2);

    let commented = &thoughts[0];
    assert_eq!(commented["id"], thought.id.to_string());
    assert_eq!(commented["_count"]["comments"], 5);
    let previews: Vec<&str> = commented["comments"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["content"].as_str().unwrap())
        .collect();
    assert_eq!(previews, vec!["yorum 5", "yorum 4", "yorum 3"]);
    assert_eq!(commented["comments"][0]["author"]["username"], "selin");

    assert_eq!(thoughts[1]["_count"]["comments"], 0);
    assert_eq!(thoughts[1]["comments"], json!([]));

    // One batch for previews and one for counts, regardless of thought count
    assert_eq!(store.comment_batch_calls() - calls_before, 2);
}

#[actix_web::test]
async fn comments_are_listed_oldest_first() {
    let store = Arc::new(MemoryStore::new());
    let author = store.add_registered_user("umut");
    let thought = store.add_thought(&author, "soru", 0.0, 0.0, 1);
    let app = test::init_service(test_app(store)).await;

    for content in ["ilk", "ikinci", "üçüncü"] {
        let req = test::TestRequest::post()
            .uri(&format!("/api/v1/thoughts/{}/comments", thought.id))
            .set_json(json!({ "content": content, "authorId": author.id }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let body = body_json(resp).await;
        assert_eq!(body["thoughtId"], thought.id.to_string());
        assert_eq!(body["author"]["username"], "umut");
    }

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/thoughts/{}/comments", thought.id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    let contents: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["content"].as_str().unwrap())
        .collect();
    assert_eq!(contents, vec!["ilk", "ikinci", "üçüncü"]);
}

#[actix_web::test]
async fn comments_of_unknown_thought_are_empty() {
    let store = Arc::new(MemoryStore::new());
    let app = test::init_service(test_app(store)).await;

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/thoughts/{}/comments", Uuid::new_v4()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await, json!([]));
}

#[actix_web::test]
async fn create_comment_validation_and_missing_parent() {
    let store = Arc::new(MemoryStore::new());
    let author = store.add_registered_user("kerem");
    let thought = store.add_thought(&author, "konu", 0.0, 0.0, 1);
    let app = test::init_service(test_app(store.clone())).await;

    let uri = format!("/api/v1/thoughts/{}/comments", thought.id);
    for payload in [
        json!({ "content": "yorum" }),
        json!({ "authorId": author.id }),
        json!({ "content": "  ", "authorId": author.id }),
    ] {
        let req = test::TestRequest::post().uri(&uri).set_json(payload).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(resp).await, json!({ "error": "Missing required fields" }));
    }

    let req = test::TestRequest::post()
        .uri(&format!("/api/v1/thoughts/{}/comments", Uuid::new_v4()))
        .set_json(json!({ "content": "boşluğa", "authorId": author.id }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(resp).await, json!({ "error": "Thought not found" }));

    let req = test::TestRequest::post()
        .uri(&uri)
        .set_json(json!({ "content": "hayalet", "authorId": Uuid::new_v4() }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    assert_eq!(store.comment_total(), 0);
}

#[actix_web::test]
async fn malformed_thought_id_returns_404() {
    let store = Arc::new(MemoryStore::new());
    let app = test::init_service(test_app(store)).await;

    let req = test::TestRequest::get()
        .uri("/api/v1/thoughts/not-a-uuid/comments")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert!(body_json(resp).await["error"].is_string());
}

#[actix_web::test]
async fn create_guest_then_duplicate_conflicts() {
    let store = Arc::new(MemoryStore::new());
    let app = test::init_service(test_app(store)).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/users/guest")
        .set_json(json!({ "username": "  gezgin  " }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body = body_json(resp).await;
    assert_eq!(body["username"], "gezgin");
    assert_eq!(body["name"], "gezgin");
    assert_eq!(body["isGuest"], true);
    assert!(body["createdAt"].is_string());

    let req = test::TestRequest::post()
        .uri("/api/v1/users/guest")
        .set_json(json!({ "username": "gezgin" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    assert_eq!(body_json(resp).await, json!({ "error": "Username already exists" }));
}

#[actix_web::test]
async fn create_guest_requires_username() {
    let store = Arc::new(MemoryStore::new());
    let app = test::init_service(test_app(store)).await;

    for payload in [json!({}), json!({ "username": "   " })] {
        let req = test::TestRequest::post()
            .uri("/api/v1/users/guest")
            .set_json(payload)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(resp).await, json!({ "error": "Username is required" }));
    }
}

#[actix_web::test]
async fn cloud_is_reproducible_for_a_seed() {
    let store = Arc::new(MemoryStore::new());
    let author = store.add_registered_user("bulut");
    for i in 0..6 {
        store.add_thought(&author, "süzülen", ORIGIN_LAT + 0.002 * i as f64, ORIGIN_LNG, i);
    }
    let app = test::init_service(test_app(store)).await;

    let uri = format!(
        "/api/v1/thoughts/cloud?lat={}&lng={}&seed=42&zoom=1.4&offsetX=3",
        ORIGIN_LAT, ORIGIN_LNG
    );
    let first = body_json(
        test::call_service(&app, test::TestRequest::get().uri(&uri).to_request()).await,
    )
    .await;
    let second = body_json(
        test::call_service(&app, test::TestRequest::get().uri(&uri).to_request()).await,
    )
    .await;

    assert_eq!(first["seed"], 42);
    assert_eq!(first["placements"], second["placements"]);
    assert_eq!(first["view"]["offsetX"], 3.0);

    let thoughts = first["thoughts"].as_array().unwrap();
    let placements = first["placements"].as_array().unwrap();
    assert_eq!(thoughts.len(), 6);
    assert_eq!(placements.len(), 6);
    for placement in placements {
        let x = placement["x"].as_f64().unwrap();
        let y = placement["y"].as_f64().unwrap();
        assert!((10.0..=90.0).contains(&x) && (10.0..=90.0).contains(&y));
        assert!(placement["opacity"].as_f64().unwrap() <= 1.0);
        assert!(placement["size"].as_f64().unwrap() >= 8.0);
    }
    // The nearest thought is placed first and never needs the fallback grid
    assert_eq!(placements[0]["thoughtId"], thoughts[0]["id"]);
    assert_eq!(placements[0]["forced"], false);
}

#[actix_web::test]
async fn cloud_draws_and_echoes_a_seed() {
    let store = Arc::new(MemoryStore::new());
    let app = test::init_service(test_app(store)).await;

    let req = test::TestRequest::get().uri("/api/v1/thoughts/cloud").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert!(body["seed"].is_u64());
    assert_eq!(body["view"]["zoom"], 1.0);
    assert_eq!(body["placements"], json!([]));

    let req = test::TestRequest::get()
        .uri("/api/v1/thoughts/cloud?zoom=abc")
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn health_endpoints_follow_store_state() {
    let store = Arc::new(MemoryStore::new());
    let app = test::init_service(test_app(store.clone())).await;

    for uri in ["/api/v1/health", "/api/v1/health/ready", "/api/v1/health/live"] {
        let resp = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK, "uri: {}", uri);
    }

    store.set_failing(true);
    let resp = test::call_service(
        &app,
        test::TestRequest::get().uri("/api/v1/health/ready").to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body_json(resp).await["ready"], false);

    let resp = test::call_service(
        &app,
        test::TestRequest::get().uri("/api/v1/health/live").to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn storage_failure_returns_generic_500() {
    let store = Arc::new(MemoryStore::new());
    store.set_failing(true);
    let app = test::init_service(test_app(store)).await;

    let req = test::TestRequest::get().uri("/api/v1/thoughts").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_json(resp).await, json!({ "error": "Internal server error" }));
}

#[actix_web::test]
async fn unknown_route_returns_json_404() {
    let store = Arc::new(MemoryStore::new());
    let app = test::init_service(test_app(store)).await;

    let req = test::TestRequest::get().uri("/api/v1/nowhere").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn openapi_and_metrics_are_served() {
    let store = Arc::new(MemoryStore::new());
    let app = test::init_service(test_app(store)).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/thoughts")
        .set_json(json!({ "content": "ölçülen" }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CREATED);

    let resp = test::call_service(
        &app,
        test::TestRequest::get().uri("/api/v1/openapi.json").to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let doc = body_json(resp).await;
    assert!(doc["paths"]["/api/v1/thoughts"].is_object());
    assert!(doc["paths"]["/api/v1/thoughts/{id}/comments"].is_object());

    let resp = test::call_service(&app, test::TestRequest::get().uri("/metrics").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let text = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
    assert!(text.contains("thoughts_created_total"));
}
