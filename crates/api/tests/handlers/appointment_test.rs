use axum::http::StatusCode;
use chrono::Local;
use pretty_assertions::assert_eq;
use rstest::rstest;
use salonbook_core::models::appointment::{AppointmentStatus, DailyAppointment};
use salonbook_db::models::{CreateOutcome, NewAppointment};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::test_utils::{appointment, booking_payload, TestContext};

#[tokio::test]
async fn test_list_day_first_date_queries_storage_format() {
    let mut ctx = TestContext::new();
    let morning = appointment("03/15/2025", "09:30", AppointmentStatus::Confirmed);
    let afternoon = appointment("03/15/2025", "13:30", AppointmentStatus::Pending);
    let expected = vec![DailyAppointment::from(&morning), DailyAppointment::from(&afternoon)];

    ctx.store
        .expect_find_by_date()
        .withf(|date| date.to_storage_string() == "03/15/2025")
        .times(1)
        .returning(move |_| Ok(vec![morning.clone(), afternoon.clone()]));

    let (server, _) = ctx.server();
    let response = server
        .get("/appointments/today")
        .add_query_param("date", "15-03-2025")
        .await;

    response.assert_status_ok();
    let rows: Vec<DailyAppointment> = response.json();
    assert_eq!(rows, expected);
    assert_eq!(rows[0].time, "9:30 AM");
    assert_eq!(rows[1].time, "1:30 PM");
    assert_eq!(rows[0].service, "Gel Manicure");
}

#[tokio::test]
async fn test_list_storage_format_passes_through() {
    let mut ctx = TestContext::new();
    ctx.store
        .expect_find_by_date()
        .withf(|date| date.to_storage_string() == "12/01/2025")
        .times(1)
        .returning(|_| Ok(vec![]));

    let (server, _) = ctx.server();
    let response = server
        .get("/appointments/today")
        .add_query_param("date", "12/01/2025")
        .await;

    response.assert_status_ok();
    assert_eq!(response.json::<Value>(), json!([]));
}

#[tokio::test]
async fn test_list_defaults_to_today() {
    let mut ctx = TestContext::new();
    ctx.store
        .expect_find_by_date()
        .withf(|date| date.as_naive() == Local::now().date_naive())
        .times(1)
        .returning(|_| Ok(vec![]));

    let (server, _) = ctx.server();
    let response = server.get("/appointments/today").await;

    response.assert_status_ok();
}

#[rstest]
#[case("2025-03-15")]
#[case("March 15")]
#[case("31-02-2025")]
#[tokio::test]
async fn test_list_rejects_unrecognized_dates_before_querying(#[case] date: &str) {
    let mut ctx = TestContext::new();
    ctx.store.expect_find_by_date().never();

    let (server, _) = ctx.server();
    let response = server
        .get("/appointments/today")
        .add_query_param("date", date)
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert!(body["error"].as_str().unwrap().contains(date));
}

#[tokio::test]
async fn test_list_store_failure_is_generic_500() {
    let mut ctx = TestContext::new();
    ctx.store
        .expect_find_by_date()
        .returning(|_| Err(eyre::eyre!("connection refused to 10.0.0.5:5432")));

    let (server, _) = ctx.server();
    let response = server
        .get("/appointments/today")
        .add_query_param("date", "15-03-2025")
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.json::<Value>(), json!({"error": "Internal server error"}));
}

#[tokio::test]
async fn test_create_appointment() {
    let mut ctx = TestContext::new();
    ctx.store
        .expect_create()
        .withf(|new: &NewAppointment| {
            new.date == "03/15/2025"
                && new.time == "14:00"
                && new.status == AppointmentStatus::Confirmed
                && new.details.nail_shape.as_deref() == Some("almond")
                && new.services.len() == 2
        })
        .times(1)
        .returning(|new| {
            let mut created = appointment(&new.date, &new.time, new.status);
            created.customer_name = new.customer_name;
            Ok(CreateOutcome::Created(created))
        });

    let (server, mut rx) = ctx.server();
    let response = server.post("/appointments").json(&booking_payload()).await;

    response.assert_status(StatusCode::CREATED);
    let body: Value = response.json();
    assert_eq!(body["date"], "03/15/2025");
    assert_eq!(body["time"], "14:00");
    assert_eq!(body["status"], "confirmed");
    assert!(Uuid::parse_str(body["id"].as_str().unwrap()).is_ok());
    // Creating does not notify anyone
    assert!(rx.try_recv().is_err());
}

#[tokio::test]
async fn test_create_on_taken_slot_conflicts() {
    let mut ctx = TestContext::new();
    ctx.store
        .expect_create()
        .times(1)
        .returning(|_| Ok(CreateOutcome::SlotTaken));

    let (server, _) = ctx.server();
    let response = server.post("/appointments").json(&booking_payload()).await;

    response.assert_status(StatusCode::CONFLICT);
    let body: Value = response.json();
    assert_eq!(body["error"], "Conflict: 03/15/2025 at 2:00 PM is already booked");
}

#[rstest]
#[case("customerName", json!(""))]
#[case("customerEmail", json!("maria.example.com"))]
#[case("date", json!("2025-03-15"))]
#[case("time", json!("25:00"))]
#[case("services", json!([]))]
#[tokio::test]
async fn test_create_rejects_invalid_bookings(#[case] field: &str, #[case] value: Value) {
    let mut ctx = TestContext::new();
    ctx.store.expect_create().never();

    let mut payload = booking_payload();
    payload[field] = value;

    let (server, _) = ctx.server();
    let response = server.post("/appointments").json(&payload).await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_rejects_malformed_json() {
    let mut ctx = TestContext::new();
    ctx.store.expect_create().never();

    let (server, _) = ctx.server();
    let response = server
        .post("/appointments")
        .json(&json!({"customerName": "only a name"}))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_get_appointment() {
    let mut ctx = TestContext::new();
    let stored = appointment("03/15/2025", "10:00", AppointmentStatus::Confirmed);
    let id = stored.id;
    ctx.store
        .expect_find_by_id()
        .withf(move |requested| *requested == id)
        .times(1)
        .returning(move |_| Ok(Some(stored.clone())));

    let (server, _) = ctx.server();
    let response = server.get(&format!("/appointments/{}", id)).await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["id"], id.to_string());
    assert_eq!(body["status"], "confirmed");
}

#[tokio::test]
async fn test_get_unknown_appointment_is_404() {
    let mut ctx = TestContext::new();
    ctx.store.expect_find_by_id().returning(|_| Ok(None));

    let (server, _) = ctx.server();
    let response = server.get(&format!("/appointments/{}", Uuid::new_v4())).await;

    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_get_malformed_id_is_400() {
    let mut ctx = TestContext::new();
    ctx.store.expect_find_by_id().never();

    let (server, _) = ctx.server();
    let response = server.get("/appointments/not-a-uuid").await;

    response.assert_status(StatusCode::BAD_REQUEST);
}
