//! HTTP-level tests for the API router: authentication, role gating and the
//! photo upload endpoint, driven through `tower::ServiceExt::oneshot`.

mod test_utils;

use std::io::Cursor;
use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use houseflow::config::AppConfig;
use houseflow::server::{AppState, create_app};
use houseflow::storage::LocalPhotoStore;
use houseflow::workflow::{Caller, TenancyStatus, UserRole};
use image::{ImageFormat, RgbImage};
use serde_json::{Value, json};
use tempfile::TempDir;
use tower::ServiceExt;
use uuid::Uuid;

const TOKEN: &str = "test-service-token";

async fn test_app() -> anyhow::Result<(Router, AppState, TempDir)> {
    let db = test_utils::setup_test_db().await?;
    let photo_root = TempDir::new()?;
    let config = AppConfig {
        service_tokens: vec![TOKEN.to_string()],
        photo_storage_root: photo_root.path().display().to_string(),
        ..Default::default()
    };
    let photos = Arc::new(LocalPhotoStore::new(photo_root.path()));
    let state = AppState::with_photo_store(config, db, photos);
    Ok((create_app(state.clone()), state, photo_root))
}

fn get(uri: &str, caller: Option<&Caller>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(caller) = caller {
        builder = builder
            .header(header::AUTHORIZATION, format!("Bearer {TOKEN}"))
            .header("X-User-Id", caller.user_id.to_string());
    }
    builder.body(Body::empty()).unwrap()
}

fn post_json(uri: &str, caller: &Caller, payload: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {TOKEN}"))
        .header("X-User-Id", caller.user_id.to_string())
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(payload.to_string()))
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn public_endpoints_do_not_require_auth() {
    let (app, _state, _dir) = test_app().await.unwrap();

    let response = app.clone().oneshot(get("/", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.oneshot(get("/health", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn protected_endpoints_reject_bad_credentials() {
    let (app, _state, _dir) = test_app().await.unwrap();

    // No credentials at all.
    let response = app
        .clone()
        .oneshot(get("/api/v1/houses", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // Wrong bearer token.
    let request = Request::builder()
        .method("GET")
        .uri("/api/v1/houses")
        .header(header::AUTHORIZATION, "Bearer wrong-token")
        .header("X-User-Id", Uuid::new_v4().to_string())
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // Valid token but no acting user header.
    let request = Request::builder()
        .method("GET")
        .uri("/api/v1/houses")
        .header(header::AUTHORIZATION, format!("Bearer {TOKEN}"))
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Valid token but the user does not exist.
    let ghost = Caller::new(Uuid::new_v4(), UserRole::Admin);
    let response = app
        .oneshot(get("/api/v1/houses", Some(&ghost)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn roles_are_resolved_from_the_profile_not_the_request() {
    let (app, state, _dir) = test_app().await.unwrap();
    let admin = test_utils::create_caller(&state.db, UserRole::Admin, "admin@example.com")
        .await
        .unwrap();
    let tenant = test_utils::create_caller(&state.db, UserRole::Tenant, "tenant@example.com")
        .await
        .unwrap();

    let payload = json!({ "name": "Maple House", "address": "12 Maple Street" });

    // A tenant cannot create houses even with a valid service token.
    let response = app
        .clone()
        .oneshot(post_json("/api/v1/houses", &tenant, &payload))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let body = body_json(response).await;
    assert_eq!(body["code"], "FORBIDDEN");

    let response = app
        .oneshot(post_json("/api/v1/houses", &admin, &payload))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    assert_eq!(body["name"], "Maple House");
}

#[tokio::test]
async fn move_out_declaration_round_trips_over_http() {
    let (app, state, _dir) = test_app().await.unwrap();
    let tenant = test_utils::create_caller(&state.db, UserRole::Tenant, "tenant@example.com")
        .await
        .unwrap();
    let (_house_id, room_id) = test_utils::create_house_with_room(&state.db).await.unwrap();
    let tenancy_id = test_utils::create_tenancy_with_status(
        &state.db,
        room_id,
        &tenant,
        TenancyStatus::Occupied,
    )
    .await
    .unwrap();

    let payload = json!({
        "planned_move_out_date": "2026-10-31",
        "notes": "end of lease",
        "rent_paid_up": true,
        "areas_cleaned": true,
        "has_damage": false,
    });
    let response = app
        .clone()
        .oneshot(post_json(
            &format!("/api/v1/tenancies/{tenancy_id}/move-out-intention"),
            &tenant,
            &payload,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    assert_eq!(body["sign_off_status"], "PENDING");

    let response = app
        .oneshot(get(&format!("/api/v1/tenancies/{tenancy_id}"), Some(&tenant)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "MOVE_OUT_INTENDED");
}

#[tokio::test]
async fn damage_without_description_maps_to_a_400() {
    let (app, state, _dir) = test_app().await.unwrap();
    let tenant = test_utils::create_caller(&state.db, UserRole::Tenant, "tenant@example.com")
        .await
        .unwrap();
    let (_house_id, room_id) = test_utils::create_house_with_room(&state.db).await.unwrap();
    let tenancy_id = test_utils::create_tenancy_with_status(
        &state.db,
        room_id,
        &tenant,
        TenancyStatus::Occupied,
    )
    .await
    .unwrap();

    let payload = json!({
        "planned_move_out_date": "2026-10-31",
        "rent_paid_up": true,
        "areas_cleaned": true,
        "has_damage": true,
    });
    let response = app
        .oneshot(post_json(
            &format!("/api/v1/tenancies/{tenancy_id}/move-out-intention"),
            &tenant,
            &payload,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["code"], "VALIDATION_FAILED");
}

fn png_fixture(width: u32, height: u32) -> Vec<u8> {
    let image = RgbImage::from_fn(width, height, |x, y| {
        image::Rgb([(x % 251) as u8, (y % 241) as u8, ((x ^ y) % 239) as u8])
    });
    let mut buf = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
        .unwrap();
    buf
}

#[tokio::test]
async fn photo_upload_compresses_and_returns_a_reference() {
    let (app, state, _dir) = test_app().await.unwrap();
    let tenant = test_utils::create_caller(&state.db, UserRole::Tenant, "tenant@example.com")
        .await
        .unwrap();
    let tenancy_id = Uuid::new_v4();

    let request = Request::builder()
        .method("POST")
        .uri(format!("/api/v1/tenancies/{tenancy_id}/photos/key-area"))
        .header(header::AUTHORIZATION, format!("Bearer {TOKEN}"))
        .header("X-User-Id", tenant.user_id.to_string())
        .header(header::CONTENT_TYPE, "application/octet-stream")
        .body(Body::from(png_fixture(640, 480)))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    let reference = body["reference"].as_str().unwrap();
    assert!(reference.starts_with("local:///key-area/"));
    assert!(body["bytes"].as_u64().unwrap() <= 1024 * 1024);

    // Unknown bucket names are rejected before any decoding happens.
    let request = Request::builder()
        .method("POST")
        .uri(format!("/api/v1/tenancies/{tenancy_id}/photos/selfies"))
        .header(header::AUTHORIZATION, format!("Bearer {TOKEN}"))
        .header("X-User-Id", tenant.user_id.to_string())
        .body(Body::from(png_fixture(16, 16)))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Bodies that are not an image come back as a 422.
    let request = Request::builder()
        .method("POST")
        .uri(format!("/api/v1/tenancies/{tenancy_id}/photos/damage"))
        .header(header::AUTHORIZATION, format!("Bearer {TOKEN}"))
        .header("X-User-Id", tenant.user_id.to_string())
        .body(Body::from(vec![0u8; 128]))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}
