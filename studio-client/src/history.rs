/// Booking history
/// Read-only consumer of the session and the gateway. The server's order
/// and content are authoritative: the returned sequence is stored verbatim
/// with no re-sorting, re-filtering or deduplication.
use std::time::Duration;

use booking_core::Booking;

use crate::api::{ApiError, ApiGateway};

const HISTORY_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, PartialEq)]
pub struct HistoryView {
    bookings: Vec<Booking>,
}

impl HistoryView {
    pub fn bookings(&self) -> &[Booking] {
        &self.bookings
    }

    /// Selects the empty-state affordance instead of a list.
    pub fn is_empty(&self) -> bool {
        self.bookings.is_empty()
    }
}

#[derive(Clone)]
pub struct BookingHistory {
    gateway: ApiGateway,
}

impl BookingHistory {
    pub fn new(gateway: ApiGateway) -> Self {
        Self { gateway }
    }

    /// Requires an authenticated session; an expired credential surfaces
    /// as a rejected request and the caller redirects to the public entry.
    pub async fn fetch(&self) -> Result<HistoryView, ApiError> {
        let bookings = self
            .gateway
            .get_json::<Vec<Booking>>("/bookings/my", HISTORY_TIMEOUT)
            .await?;
        Ok(HistoryView { bookings })
    }
}
