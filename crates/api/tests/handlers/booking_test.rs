use std::time::Duration;

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use rstest::rstest;
use salonbook_core::models::appointment::AppointmentStatus;
use salonbook_db::models::CancelOutcome;
use salonbook_notify::BookingEvent;
use serde_json::{json, Value};
use tokio::{sync::mpsc::UnboundedReceiver, time::timeout};
use uuid::Uuid;

use crate::test_utils::{appointment, booking_payload, Delivery, TestContext};

/// Waits for `count` deliveries, failing the test if they do not arrive.
async fn collect(rx: &mut UnboundedReceiver<Delivery>, count: usize) -> Vec<Delivery> {
    let mut deliveries = Vec::with_capacity(count);
    for _ in 0..count {
        let delivery = timeout(Duration::from_secs(2), rx.recv())
            .await
            .expect("timed out waiting for a delivery")
            .expect("delivery channel closed");
        deliveries.push(delivery);
    }
    deliveries.sort_by_key(|(name, _)| *name);
    deliveries
}

#[rstest]
#[case(json!({}))]
#[case(json!({"appointmentId": ""}))]
#[case(json!({"appointmentId": "   "}))]
#[case(json!({"appointmentId": null}))]
#[case(json!({"appointmentId": "abc-123"}))]
#[tokio::test]
async fn test_cancel_rejects_bad_ids_without_touching_store(#[case] body: Value) {
    let mut ctx = TestContext::new();
    ctx.store.expect_cancel().never();

    let (server, mut rx) = ctx.server();
    let response = server.post("/booking/cancel").json(&body).await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert!(rx.try_recv().is_err());
}

#[test_log::test(tokio::test)]
async fn test_cancel_without_body_is_400() {
    let mut ctx = TestContext::new();
    ctx.store.expect_cancel().never();

    let (server, _) = ctx.server();
    let response = server.post("/booking/cancel").await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["error"], "Validation error: appointmentId is required");
}

#[test_log::test(tokio::test)]
async fn test_cancel_with_wrongly_typed_id_reports_the_body_error() {
    let mut ctx = TestContext::new();
    ctx.store.expect_cancel().never();

    let (server, _) = ctx.server();
    let response = server
        .post("/booking/cancel")
        .json(&json!({ "appointmentId": 42 }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    let message = body["error"].as_str().unwrap();
    assert!(message.starts_with("Validation error: "));
    assert!(!message.contains("appointmentId is required"));
}

#[test_log::test(tokio::test)]
async fn test_cancel_appointment() {
    let mut ctx = TestContext::new();
    let mut cancelled = appointment("03/15/2025", "14:00", AppointmentStatus::Cancelled);
    let id = Uuid::new_v4();
    cancelled.id = id;

    ctx.store
        .expect_cancel()
        .withf(move |requested| *requested == id)
        .times(1)
        .returning(move |_| Ok(CancelOutcome::Cancelled(cancelled.clone())));

    let (server, mut rx) = ctx.server();
    let response = server
        .post("/booking/cancel")
        .json(&json!({ "appointmentId": format!(" {} ", id) }))
        .await;

    response.assert_status_ok();
    assert_eq!(
        response.json::<Value>(),
        json!({
            "success": true,
            "redirectUrl": format!("/booking/cancelled?appointmentId={}", id),
        })
    );

    let deliveries = collect(&mut rx, 3).await;
    let names: Vec<_> = deliveries.iter().map(|(name, _)| *name).collect();
    assert_eq!(names, vec!["email", "push", "whatsapp"]);
    for (_, event) in &deliveries {
        match event {
            BookingEvent::Cancelled(appointment) => assert_eq!(appointment.id, id),
            other => panic!("expected a cancellation notice, got {:?}", other),
        }
    }
}

#[test_log::test(tokio::test)]
async fn test_cancel_uses_configured_redirect() {
    let mut ctx = TestContext::new();
    ctx.config.cancel_redirect_path = "/salon/goodbye".to_string();
    ctx.store.expect_cancel().returning(|id| {
        let mut cancelled = appointment("03/15/2025", "14:00", AppointmentStatus::Cancelled);
        cancelled.id = id;
        Ok(CancelOutcome::Cancelled(cancelled))
    });

    let id = Uuid::new_v4();
    let (server, _) = ctx.server();
    let response = server
        .post("/booking/cancel")
        .json(&json!({ "appointmentId": id }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["redirectUrl"], format!("/salon/goodbye?appointmentId={}", id));
}

#[test_log::test(tokio::test)]
async fn test_cancel_already_cancelled_is_silent_success() {
    let mut ctx = TestContext::new();
    ctx.store.expect_cancel().times(1).returning(|id| {
        let mut cancelled = appointment("03/15/2025", "14:00", AppointmentStatus::Cancelled);
        cancelled.id = id;
        Ok(CancelOutcome::AlreadyCancelled(cancelled))
    });

    let id = Uuid::new_v4();
    let (server, mut rx) = ctx.server();
    let response = server
        .post("/booking/cancel")
        .json(&json!({ "appointmentId": id }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["success"], true);

    let nothing = timeout(Duration::from_millis(200), rx.recv()).await;
    assert!(nothing.is_err(), "no notification expected on a repeat cancel");
}

#[test_log::test(tokio::test)]
async fn test_cancel_unknown_appointment_is_404() {
    let mut ctx = TestContext::new();
    ctx.store.expect_cancel().returning(|_| Ok(CancelOutcome::NotFound));

    let id = Uuid::new_v4();
    let (server, mut rx) = ctx.server();
    let response = server
        .post("/booking/cancel")
        .json(&json!({ "appointmentId": id }))
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
    let body: Value = response.json();
    assert_eq!(
        body["error"],
        format!("Resource not found: Appointment with ID {} not found", id)
    );
    assert!(rx.try_recv().is_err());
}

#[test_log::test(tokio::test)]
async fn test_cancel_store_failure_is_generic_500() {
    let mut ctx = TestContext::new();
    ctx.store
        .expect_cancel()
        .returning(|_| Err(eyre::eyre!("deadlock detected")));

    let (server, _) = ctx.server();
    let response = server
        .post("/booking/cancel")
        .json(&json!({ "appointmentId": Uuid::new_v4() }))
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.json::<Value>(), json!({"error": "Internal server error"}));
}

#[test_log::test(tokio::test)]
async fn test_confirm_booking_all_channels_succeed() {
    let ctx = TestContext::new();
    let (server, mut rx) = ctx.server();

    let response = server.post("/booking/confirm").json(&booking_payload()).await;

    response.assert_status_ok();
    assert_eq!(
        response.json::<Value>(),
        json!({
            "success": true,
            "emailSent": true,
            "notificationSent": true,
            "whatsappSent": true,
        })
    );

    let deliveries = collect(&mut rx, 3).await;
    for (_, event) in &deliveries {
        match event {
            BookingEvent::Confirmed(booking) => {
                assert_eq!(booking.customer_name, "Maria Lopez");
                assert_eq!(booking.services.len(), 2);
            }
            other => panic!("expected a confirmation, got {:?}", other),
        }
    }
}

#[rstest]
#[case("email", json!({"success": true, "emailSent": false, "notificationSent": true, "whatsappSent": true}))]
#[case("push", json!({"success": true, "emailSent": true, "notificationSent": false, "whatsappSent": true}))]
#[case("whatsapp", json!({"success": true, "emailSent": true, "notificationSent": true, "whatsappSent": false}))]
#[tokio::test]
async fn test_confirm_booking_reports_failed_channel(
    #[case] failing: &'static str,
    #[case] expected: Value,
) {
    let ctx = TestContext::new().with_failing_channel(failing);
    let (server, mut rx) = ctx.server();

    let response = server.post("/booking/confirm").json(&booking_payload()).await;

    response.assert_status_ok();
    assert_eq!(response.json::<Value>(), expected);

    // The failing channel was still attempted
    let deliveries = collect(&mut rx, 3).await;
    assert!(deliveries.iter().any(|(name, _)| *name == failing));
}

#[test_log::test(tokio::test)]
async fn test_confirm_booking_every_channel_failing_still_succeeds() {
    let ctx = TestContext::new()
        .with_failing_channel("email")
        .with_failing_channel("push")
        .with_failing_channel("whatsapp");
    let (server, _) = ctx.server();

    let response = server.post("/booking/confirm").json(&booking_payload()).await;

    response.assert_status_ok();
    assert_eq!(
        response.json::<Value>(),
        json!({
            "success": true,
            "emailSent": false,
            "notificationSent": false,
            "whatsappSent": false,
        })
    );
}

#[rstest]
#[case("customerPhone", json!(""))]
#[case("date", json!("15/03"))]
#[case("services", json!([{"name": "", "price": 10.0}]))]
#[tokio::test]
async fn test_confirm_invalid_booking_sends_nothing(#[case] field: &str, #[case] value: Value) {
    let ctx = TestContext::new();
    let (server, mut rx) = ctx.server();

    let mut payload = booking_payload();
    payload[field] = value;
    let response = server.post("/booking/confirm").json(&payload).await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert!(rx.try_recv().is_err());
}

#[test_log::test(tokio::test)]
async fn test_confirm_twice_sends_twice() {
    let ctx = TestContext::new();
    let (server, mut rx) = ctx.server();

    for _ in 0..2 {
        server
            .post("/booking/confirm")
            .json(&booking_payload())
            .await
            .assert_status_ok();
    }

    let deliveries = collect(&mut rx, 6).await;
    assert_eq!(deliveries.len(), 6);
}

#[test_log::test(tokio::test)]
async fn test_cancel_redirect_keeps_existing_query() {
    let mut ctx = TestContext::new();
    ctx.config.cancel_redirect_path = "/booking/done?lang=es".to_string();
    ctx.store.expect_cancel().returning(|id| {
        let mut cancelled = appointment("03/15/2025", "14:00", AppointmentStatus::Cancelled);
        cancelled.id = id;
        Ok(CancelOutcome::AlreadyCancelled(cancelled))
    });

    let id = Uuid::new_v4();
    let (server, _) = ctx.server();
    let response = server
        .post("/booking/cancel")
        .json(&json!({ "appointmentId": id }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["redirectUrl"], format!("/booking/done?lang=es&appointmentId={}", id));
}
