/// Booking commit
/// The terminal action of the wizard: a single POST, no partial-commit
/// protocol. On success the draft is discarded; on failure the wizard is
/// left at the confirmation step with the draft intact so the user can
/// retry without re-entering earlier steps.
use std::time::Duration;

use thiserror::Error;

use booking_core::{BookingWizard, CreatedBooking};

use crate::api::{ApiError, ApiGateway};

const COMMIT_TIMEOUT: Duration = Duration::from_secs(30);

/// Grace period before handing off to the booking history view.
pub const HANDOFF_DELAY: Duration = Duration::from_secs(2);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BookingError {
    #[error("{0}")]
    Submission(String),
}

pub async fn submit_booking(
    gateway: &ApiGateway,
    wizard: &mut BookingWizard,
) -> Result<CreatedBooking, BookingError> {
    let request = wizard
        .request()
        .map_err(|err| BookingError::Submission(err.to_string()))?;

    match gateway
        .post_json::<_, CreatedBooking>("/bookings", &request, COMMIT_TIMEOUT)
        .await
    {
        Ok(created) => {
            tracing::info!(booking_id = %created.booking_id, "booking confirmed");
            wizard.reset();
            Ok(created)
        }
        Err(err) => {
            // Draft and step stay untouched for a retry from Confirm.
            let message = match err {
                ApiError::Rejected { detail, .. } => detail,
                other => other.to_string(),
            };
            Err(BookingError::Submission(message))
        }
    }
}
