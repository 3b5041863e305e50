use chrono::{Duration, Local};
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use booking_core::{default_artists, default_services, BookingDraft, BookingWizard, Step};
use studio_client::api::ApiGateway;
use studio_client::booking::{submit_booking, BookingError};
use studio_client::history::BookingHistory;
use studio_client::session::new_shared_session;

fn gateway_for(server: &MockServer) -> ApiGateway {
    ApiGateway::new(server.uri(), new_shared_session())
}

fn wizard_at_confirm(date_offset_days: i64) -> (BookingWizard, String) {
    let mut wizard = BookingWizard::new();
    wizard.select_service(default_services()[0].clone());
    wizard.advance().unwrap();
    wizard.select_artist(default_artists()[0].clone());
    wizard.advance().unwrap();
    let date = Local::now().date_naive() + Duration::days(date_offset_days);
    wizard.select_date(date).unwrap();
    wizard.select_time("2:00 PM").unwrap();
    wizard.advance().unwrap();
    (wizard, date.format("%Y-%m-%d").to_string())
}

#[tokio::test]
async fn successful_commit_posts_the_payload_and_discards_the_draft() {
    let server = MockServer::start().await;
    let (mut wizard, date) = wizard_at_confirm(7);

    Mock::given(method("POST"))
        .and(path("/bookings"))
        .and(body_json(json!({
            "service_id": "service-custom-tattoo",
            "artist_id": "artist-marcus-chen",
            "appointment_date": date,
            "appointment_time": "2:00 PM",
            "notes": ""
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "booking_id": "booking-1",
            "service_id": "service-custom-tattoo",
            "artist_id": "artist-marcus-chen",
            "appointment_date": date,
            "appointment_time": "2:00 PM",
            "notes": "",
            "status": "pending"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let created = submit_booking(&gateway_for(&server), &mut wizard).await.unwrap();
    assert_eq!(created.booking_id, "booking-1");

    // Draft discarded, wizard back at the first step.
    assert_eq!(wizard.step(), Step::ServiceSelect);
    assert_eq!(wizard.draft(), &BookingDraft::default());
}

#[tokio::test]
async fn failed_commit_keeps_the_draft_for_a_retry() {
    let server = MockServer::start().await;
    let (mut wizard, _) = wizard_at_confirm(7);
    wizard.set_notes("roses on the forearm");
    let draft_before = wizard.draft().clone();

    Mock::given(method("POST"))
        .and(path("/bookings"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "detail": "Artist not found" })))
        .mount(&server)
        .await;

    let err = submit_booking(&gateway_for(&server), &mut wizard).await.unwrap_err();
    assert_eq!(err, BookingError::Submission("Artist not found".to_string()));
    assert_eq!(wizard.step(), Step::Confirm);
    assert_eq!(wizard.draft(), &draft_before);
}

#[tokio::test]
async fn commit_away_from_the_confirm_step_is_rejected_without_a_request() {
    let server = MockServer::start().await;
    let mut wizard = BookingWizard::new();

    Mock::given(method("POST"))
        .and(path("/bookings"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let err = submit_booking(&gateway_for(&server), &mut wizard).await.unwrap_err();
    assert!(matches!(err, BookingError::Submission(_)));
}

#[tokio::test]
async fn history_stores_the_server_sequence_verbatim() {
    let server = MockServer::start().await;

    let booking = |id: &str, date: &str| {
        json!({
            "booking_id": id,
            "user_name": "Ada",
            "user_email": "ada@example.com",
            "artist_name": "Marcus Chen",
            "service_name": "Custom Tattoo",
            "appointment_date": date,
            "appointment_time": "2:00 PM",
            "notes": null,
            "status": "confirmed",
            "created_at": "2025-05-01T10:00:00Z"
        })
    };

    // Deliberately not in date order; the server's order is authoritative.
    Mock::given(method("GET"))
        .and(path("/bookings/my"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            booking("booking-2", "2025-07-01"),
            booking("booking-1", "2025-06-01"),
        ])))
        .mount(&server)
        .await;

    let view = BookingHistory::new(gateway_for(&server)).fetch().await.unwrap();
    assert!(!view.is_empty());
    let ids: Vec<&str> = view.bookings().iter().map(|b| b.booking_id.as_str()).collect();
    assert_eq!(ids, vec!["booking-2", "booking-1"]);
}

#[tokio::test]
async fn empty_history_reports_the_empty_state() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/bookings/my"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let view = BookingHistory::new(gateway_for(&server)).fetch().await.unwrap();
    assert!(view.is_empty());
}
