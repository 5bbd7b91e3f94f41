//! End-to-end smoke tests for the full catpointd stack.
//!
//! Each test wires the in-memory repository, the virtual classifier, the real
//! alarm controller and the real axum router, then drives the HTTP layer via
//! `tower::ServiceExt::oneshot` — no TCP port is bound.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use catpoint_adapter_http_axum::router;
use catpoint_adapter_http_axum::state::AppState;
use catpoint_adapter_storage_memory::InMemorySecurityRepository;
use catpoint_adapter_virtual::VirtualImageClassifier;
use catpoint_app::event_bus::InProcessEventBus;
use catpoint_app::services::alarm_controller::AlarmController;

/// Build a fully-wired router on a fresh, disarmed system.
fn app() -> axum::Router {
    let events = Arc::new(InProcessEventBus::new(256));
    let controller = AlarmController::new(
        InMemorySecurityRepository::new(),
        VirtualImageClassifier::new(),
        Arc::clone(&events),
    );
    router::build(AppState::new(controller, events))
}

async fn call(
    app: &axum::Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let request = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => request
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => request.body(Body::empty()).unwrap(),
    };
    let resp = app.clone().oneshot(request).await.unwrap();
    let status = resp.status();
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn send_image(app: &axum::Router, bytes: Vec<u8>) -> (StatusCode, Value) {
    let resp = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/camera/image")
                .header("content-type", "application/octet-stream")
                .body(Body::from(bytes))
                .unwrap(),
        )
        .await
        .unwrap();
    let status = resp.status();
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap())
}

async fn add_sensor(app: &axum::Router, name: &str, sensor_type: &str) {
    let (status, _) = call(
        app,
        "POST",
        "/api/sensors",
        Some(json!({"name": name, "sensor_type": sensor_type})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
}

async fn set_arming(app: &axum::Router, arming_status: &str) -> Value {
    let (status, body) = call(
        app,
        "PUT",
        "/api/status/arming",
        Some(json!({"arming_status": arming_status})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    body
}

async fn set_active(app: &axum::Router, sensor_type: &str, name: &str, active: bool) -> Value {
    let (status, body) = call(
        app,
        "PUT",
        &format!("/api/sensors/{sensor_type}/{name}/active"),
        Some(json!({"active": active})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    body
}

async fn alarm_status(app: &axum::Router) -> String {
    let (_, body) = call(app, "GET", "/api/status", None).await;
    body["alarm_status"].as_str().unwrap().to_string()
}

// ---------------------------------------------------------------------------
// Health check and status
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_return_ok_when_health_check_called() {
    let resp = app()
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body = resp.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&body[..], b"OK");
}

#[tokio::test]
async fn should_start_disarmed_with_no_alarm() {
    let app = app();
    let (status, body) = call(&app, "GET", "/api/status", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"arming_status": "DISARMED", "alarm_status": "NO_ALARM", "sensors": []})
    );
}

// ---------------------------------------------------------------------------
// Sensors
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_list_registered_sensors_inactive() {
    let app = app();
    add_sensor(&app, "front", "DOOR").await;
    add_sensor(&app, "hall", "MOTION").await;

    let (status, body) = call(&app, "GET", "/api/sensors", None).await;

    assert_eq!(status, StatusCode::OK);
    let sensors = body.as_array().unwrap();
    assert_eq!(sensors.len(), 2);
    assert!(sensors.iter().all(|s| s["active"] == json!(false)));
}

#[tokio::test]
async fn should_return_400_when_sensor_registered_twice() {
    let app = app();
    add_sensor(&app, "front", "DOOR").await;

    let (status, body) = call(
        &app,
        "POST",
        "/api/sensors",
        Some(json!({"name": "front", "sensor_type": "DOOR"})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().is_some());
}

#[tokio::test]
async fn should_return_404_after_sensor_deleted() {
    let app = app();
    add_sensor(&app, "back", "WINDOW").await;

    let (status, _) = call(&app, "DELETE", "/api/sensors/WINDOW/back", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = call(&app, "DELETE", "/api/sensors/WINDOW/back", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn should_ignore_activation_while_disarmed() {
    let app = app();
    add_sensor(&app, "front", "DOOR").await;

    let sensor = set_active(&app, "DOOR", "front", true).await;

    assert_eq!(sensor["active"], json!(true));
    assert_eq!(alarm_status(&app).await, "NO_ALARM");
}

// ---------------------------------------------------------------------------
// Alarm lifecycle
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_escalate_to_alarm_when_second_sensor_trips_while_armed() {
    let app = app();
    add_sensor(&app, "front", "DOOR").await;
    add_sensor(&app, "hall", "MOTION").await;
    set_arming(&app, "ARMED_AWAY").await;

    set_active(&app, "DOOR", "front", true).await;
    assert_eq!(alarm_status(&app).await, "PENDING_ALARM");

    set_active(&app, "MOTION", "hall", true).await;
    assert_eq!(alarm_status(&app).await, "ALARM");

    // Deactivating everything does not clear an active alarm.
    set_active(&app, "DOOR", "front", false).await;
    set_active(&app, "MOTION", "hall", false).await;
    assert_eq!(alarm_status(&app).await, "ALARM");

    let body = set_arming(&app, "DISARMED").await;
    assert_eq!(body["alarm_status"], json!("NO_ALARM"));
}

#[tokio::test]
async fn should_clear_pending_alarm_when_last_sensor_deactivates() {
    let app = app();
    add_sensor(&app, "front", "DOOR").await;
    set_arming(&app, "ARMED_HOME").await;

    set_active(&app, "DOOR", "front", true).await;
    assert_eq!(alarm_status(&app).await, "PENDING_ALARM");

    set_active(&app, "DOOR", "front", false).await;
    assert_eq!(alarm_status(&app).await, "NO_ALARM");
}

#[tokio::test]
async fn should_reset_sensors_when_armed() {
    let app = app();
    add_sensor(&app, "front", "DOOR").await;
    set_active(&app, "DOOR", "front", true).await;

    let body = set_arming(&app, "ARMED_AWAY").await;

    assert_eq!(body["arming_status"], json!("ARMED_AWAY"));
    assert_eq!(body["sensors"][0]["active"], json!(false));
}

#[tokio::test]
async fn should_clear_pending_alarm_on_sweep_once_sensors_are_quiet() {
    let app = app();
    add_sensor(&app, "front", "DOOR").await;
    set_arming(&app, "ARMED_AWAY").await;
    set_active(&app, "DOOR", "front", true).await;

    let (status, body) = call(&app, "POST", "/api/sensors/check", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["alarm_status"], json!("PENDING_ALARM"));

    // Removing the sensor leaves the alarm alone; the sweep then clears it.
    let (status, _) = call(&app, "DELETE", "/api/sensors/DOOR/front", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(alarm_status(&app).await, "PENDING_ALARM");

    let (_, body) = call(&app, "POST", "/api/sensors/check", None).await;
    assert_eq!(body["alarm_status"], json!("NO_ALARM"));
}

// ---------------------------------------------------------------------------
// Camera
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_raise_alarm_when_cat_seen_while_armed_home() {
    let app = app();
    set_arming(&app, "ARMED_HOME").await;

    let (status, body) = send_image(&app, vec![0xFF; 64]).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"cat_detected": true, "alarm_status": "ALARM"}));
}

#[tokio::test]
async fn should_not_raise_alarm_when_cat_seen_while_armed_away() {
    let app = app();
    set_arming(&app, "ARMED_AWAY").await;

    let (_, body) = send_image(&app, vec![0xFF; 64]).await;

    assert_eq!(body, json!({"cat_detected": true, "alarm_status": "NO_ALARM"}));
}

#[tokio::test]
async fn should_clear_alarm_when_no_cat_and_sensors_quiet() {
    let app = app();
    set_arming(&app, "ARMED_HOME").await;
    send_image(&app, vec![0xFF; 64]).await;
    assert_eq!(alarm_status(&app).await, "ALARM");

    let (_, body) = send_image(&app, vec![0x00; 64]).await;

    assert_eq!(body, json!({"cat_detected": false, "alarm_status": "NO_ALARM"}));
}

#[tokio::test]
async fn should_keep_alarm_when_no_cat_but_sensor_active() {
    let app = app();
    add_sensor(&app, "front", "DOOR").await;
    set_arming(&app, "ARMED_HOME").await;
    set_active(&app, "DOOR", "front", true).await;
    assert_eq!(alarm_status(&app).await, "PENDING_ALARM");

    let (_, body) = send_image(&app, vec![0x00; 64]).await;

    assert_eq!(body["cat_detected"], json!(false));
    assert_eq!(body["alarm_status"], json!("PENDING_ALARM"));
}

// ---------------------------------------------------------------------------
// Event stream
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_stream_alarm_changes_to_subscribers() {
    let app = app();
    add_sensor(&app, "front", "DOOR").await;
    set_arming(&app, "ARMED_AWAY").await;

    let resp = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/events")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    set_active(&app, "DOOR", "front", true).await;

    let mut body = resp.into_body();
    let mut frames = String::new();
    while !frames.contains("alarm_status_changed") {
        let frame = body.frame().await.unwrap().unwrap();
        let data = frame.into_data().unwrap();
        frames.push_str(std::str::from_utf8(&data).unwrap());
    }
    assert!(frames.contains(r#""to":"PENDING_ALARM""#));
}
