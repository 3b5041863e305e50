use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Authenticated user snapshot, replaced wholesale on each auth event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub user_id: String,
    pub email: String,
    pub name: String,
    #[serde(default)]
    pub phone: Option<String>,
}

/// Catalog entry for a bookable service. Read-only on the client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Service {
    pub service_id: String,
    pub name: String,
    pub description: String,
    pub duration_minutes: u32,
    pub price_start: u32,
    pub icon: String,
}

/// Catalog entry for a tattoo artist. Read-only on the client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Artist {
    pub artist_id: String,
    pub name: String,
    pub bio: String,
    pub specialty: String,
    pub image_url: String,
    #[serde(default)]
    pub instagram: Option<String>,
    pub years_experience: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Cancelled,
}

/// Payload for POST /bookings. `appointment_date` is an ISO calendar date
/// with no time component; `appointment_time` is one of the slot labels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingRequest {
    pub service_id: String,
    pub artist_id: String,
    pub appointment_date: String,
    pub appointment_time: String,
    pub notes: String,
}

/// The booking record the server returns on creation.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatedBooking {
    pub booking_id: String,
    pub service_id: String,
    pub artist_id: String,
    pub appointment_date: String,
    pub appointment_time: String,
    #[serde(default)]
    pub notes: Option<String>,
    pub status: BookingStatus,
}

/// A prior booking as listed by GET /bookings/my. The server joins in the
/// service and artist names; the client stores the list verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    pub booking_id: String,
    pub user_name: String,
    pub user_email: String,
    pub artist_name: String,
    pub service_name: String,
    pub appointment_date: String,
    pub appointment_time: String,
    #[serde(default)]
    pub notes: Option<String>,
    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn booking_status_uses_lowercase_wire_names() {
        let status: BookingStatus = serde_json::from_str("\"confirmed\"").unwrap();
        assert_eq!(status, BookingStatus::Confirmed);
        assert_eq!(serde_json::to_string(&BookingStatus::Pending).unwrap(), "\"pending\"");
    }

    #[test]
    fn unknown_booking_status_is_rejected() {
        assert!(serde_json::from_str::<BookingStatus>("\"rescheduled\"").is_err());
    }

    #[test]
    fn artist_tolerates_missing_instagram() {
        let artist: Artist = serde_json::from_value(serde_json::json!({
            "artist_id": "artist-1",
            "name": "Marcus Chen",
            "bio": "Blackwork specialist.",
            "specialty": "Blackwork",
            "image_url": "https://example.com/marcus.jpg",
            "years_experience": 12
        }))
        .unwrap();
        assert_eq!(artist.instagram, None);
    }
}
