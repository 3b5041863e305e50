/// Booking wizard state machine.
///
/// Four ordered steps, each with a gate predicate that must hold before the
/// wizard advances. The draft accumulates selections across steps and is
/// only discarded after a successful commit; moving backward never clears
/// anything, so earlier steps can be revisited without losing later picks.
use chrono::{Local, NaiveDate};
use thiserror::Error;

use crate::model::{Artist, BookingRequest, Service};

/// The fixed appointment slots for a single business day. Offered
/// unconditionally; the client has no availability data.
pub const TIME_SLOTS: [&str; 9] = [
    "10:00 AM", "11:00 AM", "12:00 PM", "1:00 PM", "2:00 PM", "3:00 PM", "4:00 PM", "5:00 PM",
    "6:00 PM",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Step {
    ServiceSelect,
    ArtistSelect,
    DateTimeSelect,
    Confirm,
}

impl Step {
    /// 1-based position, matching the progress indicator.
    pub fn number(self) -> u8 {
        match self {
            Step::ServiceSelect => 1,
            Step::ArtistSelect => 2,
            Step::DateTimeSelect => 3,
            Step::Confirm => 4,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Step::ServiceSelect => "Service",
            Step::ArtistSelect => "Artist",
            Step::DateTimeSelect => "Date & Time",
            Step::Confirm => "Confirm",
        }
    }

    fn next(self) -> Option<Step> {
        match self {
            Step::ServiceSelect => Some(Step::ArtistSelect),
            Step::ArtistSelect => Some(Step::DateTimeSelect),
            Step::DateTimeSelect => Some(Step::Confirm),
            Step::Confirm => None,
        }
    }

    fn prev(self) -> Option<Step> {
        match self {
            Step::ServiceSelect => None,
            Step::ArtistSelect => Some(Step::ServiceSelect),
            Step::DateTimeSelect => Some(Step::ArtistSelect),
            Step::Confirm => Some(Step::DateTimeSelect),
        }
    }
}

/// The in-progress, uncommitted selection. Lives only for one wizard
/// session and is never persisted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookingDraft {
    pub service: Option<Service>,
    pub artist: Option<Artist>,
    pub date: Option<NaiveDate>,
    pub time: Option<String>,
    pub notes: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WizardError {
    #[error("complete the current step before continuing")]
    GateBlocked,
    #[error("already at the confirmation step")]
    AtFinalStep,
    #[error("booking can only be submitted from the confirmation step")]
    NotAtConfirm,
    #[error("please complete all booking steps")]
    DraftIncomplete,
    #[error("appointment date cannot be in the past")]
    DateInPast,
    #[error("unknown time slot: {0}")]
    UnknownTimeSlot(String),
}

#[derive(Debug, Clone)]
pub struct BookingWizard {
    step: Step,
    draft: BookingDraft,
}

impl Default for BookingWizard {
    fn default() -> Self {
        Self::new()
    }
}

impl BookingWizard {
    pub fn new() -> Self {
        Self {
            step: Step::ServiceSelect,
            draft: BookingDraft::default(),
        }
    }

    pub fn step(&self) -> Step {
        self.step
    }

    pub fn draft(&self) -> &BookingDraft {
        &self.draft
    }

    pub fn select_service(&mut self, service: Service) {
        self.draft.service = Some(service);
    }

    pub fn select_artist(&mut self, artist: Artist) {
        self.draft.artist = Some(artist);
    }

    /// Past dates are rejected here, at selection time; the step-3 gate
    /// only checks that a date is present.
    pub fn select_date(&mut self, date: NaiveDate) -> Result<(), WizardError> {
        if date < Local::now().date_naive() {
            return Err(WizardError::DateInPast);
        }
        self.draft.date = Some(date);
        Ok(())
    }

    pub fn select_time(&mut self, slot: &str) -> Result<(), WizardError> {
        if !TIME_SLOTS.contains(&slot) {
            return Err(WizardError::UnknownTimeSlot(slot.to_string()));
        }
        self.draft.time = Some(slot.to_string());
        Ok(())
    }

    pub fn set_notes(&mut self, notes: impl Into<String>) {
        self.draft.notes = notes.into();
    }

    /// Gate predicate for the current step.
    pub fn can_advance(&self) -> bool {
        match self.step() {
            Step::ServiceSelect => self.draft.service.is_some(),
            Step::ArtistSelect => self.draft.artist.is_some(),
            Step::DateTimeSelect => self.draft.date.is_some() && self.draft.time.is_some(),
            Step::Confirm => false,
        }
    }

    /// Moves to the next step if the gate holds. A blocked advance leaves
    /// the step untouched and reports a user-visible rejection.
    pub fn advance(&mut self) -> Result<Step, WizardError> {
        if self.step() == Step::Confirm {
            return Err(WizardError::AtFinalStep);
        }
        if !self.can_advance() {
            return Err(WizardError::GateBlocked);
        }
        let next = self.step.next().ok_or(WizardError::AtFinalStep)?;
        self.step = next;
        Ok(next)
    }

    /// Moves back one step. Draft fields set on later steps are retained.
    pub fn retreat(&mut self) -> Option<Step> {
        let prev = self.step.prev()?;
        self.step = prev;
        Some(prev)
    }

    /// Builds the commit payload. Only valid at the confirmation step with
    /// service, artist, date and time all set; notes default to empty.
    pub fn request(&self) -> Result<BookingRequest, WizardError> {
        if self.step() != Step::Confirm {
            return Err(WizardError::NotAtConfirm);
        }
        match (&self.draft.service, &self.draft.artist, self.draft.date, &self.draft.time) {
            (Some(service), Some(artist), Some(date), Some(time)) => Ok(BookingRequest {
                service_id: service.service_id.clone(),
                artist_id: artist.artist_id.clone(),
                appointment_date: date.format("%Y-%m-%d").to_string(),
                appointment_time: time.clone(),
                notes: self.draft.notes.clone(),
            }),
            _ => Err(WizardError::DraftIncomplete),
        }
    }

    /// Discards the draft after a successful commit.
    pub fn reset(&mut self) {
        *self = BookingWizard::new();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn service() -> Service {
        Service {
            service_id: "service-custom-tattoo".to_string(),
            name: "Custom Tattoo".to_string(),
            description: String::new(),
            duration_minutes: 180,
            price_start: 200,
            icon: "Palette".to_string(),
        }
    }

    fn artist() -> Artist {
        Artist {
            artist_id: "artist-marcus-chen".to_string(),
            name: "Marcus Chen".to_string(),
            bio: String::new(),
            specialty: String::new(),
            image_url: String::new(),
            instagram: None,
            years_experience: 12,
        }
    }

    fn future_date() -> NaiveDate {
        Local::now().date_naive() + Duration::days(14)
    }

    fn wizard_at_confirm() -> BookingWizard {
        let mut wizard = BookingWizard::new();
        wizard.select_service(service());
        wizard.advance().unwrap();
        wizard.select_artist(artist());
        wizard.advance().unwrap();
        wizard.select_date(future_date()).unwrap();
        wizard.select_time("2:00 PM").unwrap();
        wizard.advance().unwrap();
        wizard
    }

    #[test]
    fn advance_without_service_is_a_no_op() {
        let mut wizard = BookingWizard::new();
        assert_eq!(wizard.advance(), Err(WizardError::GateBlocked));
        assert_eq!(wizard.step(), Step::ServiceSelect);
        assert_eq!(wizard.draft(), &BookingDraft::default());
    }

    #[test]
    fn each_gate_requires_its_selection() {
        let mut wizard = BookingWizard::new();
        wizard.select_service(service());
        assert_eq!(wizard.advance(), Ok(Step::ArtistSelect));

        assert_eq!(wizard.advance(), Err(WizardError::GateBlocked));
        wizard.select_artist(artist());
        assert_eq!(wizard.advance(), Ok(Step::DateTimeSelect));

        wizard.select_date(future_date()).unwrap();
        assert_eq!(wizard.advance(), Err(WizardError::GateBlocked));
        wizard.select_time("10:00 AM").unwrap();
        assert_eq!(wizard.advance(), Ok(Step::Confirm));
    }

    #[test]
    fn confirm_step_never_advances() {
        let mut wizard = wizard_at_confirm();
        assert_eq!(wizard.advance(), Err(WizardError::AtFinalStep));
        assert_eq!(wizard.step(), Step::Confirm);
    }

    #[test]
    fn retreat_keeps_every_draft_field() {
        let mut wizard = wizard_at_confirm();
        wizard.set_notes("roses on the forearm");
        let draft_before = wizard.draft().clone();

        assert_eq!(wizard.retreat(), Some(Step::DateTimeSelect));
        assert_eq!(wizard.retreat(), Some(Step::ArtistSelect));
        assert_eq!(wizard.retreat(), Some(Step::ServiceSelect));
        assert_eq!(wizard.retreat(), None);
        assert_eq!(wizard.draft(), &draft_before);
    }

    #[test]
    fn past_dates_are_rejected_at_selection() {
        let mut wizard = BookingWizard::new();
        let yesterday = Local::now().date_naive() - Duration::days(1);
        assert_eq!(wizard.select_date(yesterday), Err(WizardError::DateInPast));
        assert_eq!(wizard.draft().date, None);
        assert!(wizard.select_date(Local::now().date_naive()).is_ok());
    }

    #[test]
    fn unknown_time_slot_is_rejected() {
        let mut wizard = BookingWizard::new();
        assert_eq!(
            wizard.select_time("9:30 AM"),
            Err(WizardError::UnknownTimeSlot("9:30 AM".to_string()))
        );
        assert_eq!(wizard.draft().time, None);
    }

    #[test]
    fn request_payload_matches_the_draft() {
        let mut wizard = wizard_at_confirm();
        wizard.draft.date = Some(NaiveDate::from_ymd_opt(2025, 6, 1).unwrap());
        let request = wizard.request().unwrap();
        assert_eq!(
            request,
            BookingRequest {
                service_id: "service-custom-tattoo".to_string(),
                artist_id: "artist-marcus-chen".to_string(),
                appointment_date: "2025-06-01".to_string(),
                appointment_time: "2:00 PM".to_string(),
                notes: String::new(),
            }
        );
    }

    #[test]
    fn request_before_confirm_step_is_rejected() {
        let mut wizard = BookingWizard::new();
        wizard.select_service(service());
        assert_eq!(wizard.request(), Err(WizardError::NotAtConfirm));
    }

    #[test]
    fn request_with_missing_fields_is_rejected() {
        let mut wizard = wizard_at_confirm();
        wizard.draft.time = None;
        assert_eq!(wizard.request(), Err(WizardError::DraftIncomplete));
    }

    #[test]
    fn reset_discards_the_draft_and_returns_to_step_one() {
        let mut wizard = wizard_at_confirm();
        wizard.reset();
        assert_eq!(wizard.step(), Step::ServiceSelect);
        assert_eq!(wizard.draft(), &BookingDraft::default());
    }

    #[test]
    fn slot_table_spans_the_business_day() {
        assert_eq!(TIME_SLOTS.len(), 9);
        assert_eq!(TIME_SLOTS[0], "10:00 AM");
        assert_eq!(TIME_SLOTS[8], "6:00 PM");
    }
}
