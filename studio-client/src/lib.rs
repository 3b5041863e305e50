/// Neax Tattoos booking client library
/// Exposes the session store, API gateway, catalog loader, booking
/// submission and booking history for reuse in the CLI binary and tests.

pub mod api;
pub mod booking;
pub mod catalog;
pub mod config;
pub mod history;
pub mod session;

pub use api::{ApiError, ApiGateway};
pub use booking::{submit_booking, BookingError};
pub use catalog::{Catalog, CatalogLoader};
pub use config::ClientConfig;
pub use history::{BookingHistory, HistoryView};
pub use session::{new_shared_session, AuthError, Session, SessionStore, SharedSession};
