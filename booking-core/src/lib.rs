/// Booking domain core
/// Pure logic shared by the studio client and its tests: data model,
/// default catalog with reconciliation policy, and the booking wizard
/// state machine. No I/O lives in this crate.

pub mod catalog;
pub mod model;
pub mod wizard;

pub use catalog::{dedup_artists, default_artists, default_services, resolve_artists, resolve_services};
pub use model::{Artist, Booking, BookingRequest, BookingStatus, CreatedBooking, Service, UserProfile};
pub use wizard::{BookingDraft, BookingWizard, Step, WizardError, TIME_SLOTS};
