//! Booking flow state machine.
//!
//! ```text
//! LoadingLocations -> FormInput -> Submitting -> Success
//!                         ^  \          |
//!                         |   v         v
//!                         +--- Error <--+
//! ```
//!
//! One flow owns one form session. While a submission is pending every edit
//! and any second submit are refused.

use tracing::{info, warn};

use crate::context::UserContext;
use crate::db::UserRepository;
use crate::error::AppError;
use crate::models::{Booking, BookingStatus, Car, Delegation, PaymentStatus};

use super::calculators::{quote, PaymentTotal, QuoteError, RentalInterval};
use super::selection::{reduce, LocationSelection, SelectionError, SelectionEvent};
use super::validation::{validate_booking_submission, ValidationFailure};

/// Values currently held by the booking form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookingForm {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub selection: LocationSelection,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormEvent {
    StartDateChanged(Option<String>),
    EndDateChanged(Option<String>),
    Location(SelectionEvent),
}

/// Why the flow landed in `Error`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlowFailure {
    Rejected(Vec<ValidationFailure>),
    SubmissionFailed(String),
}

impl FlowFailure {
    /// Messages to show the user
    pub fn messages(&self) -> Vec<String> {
        match self {
            FlowFailure::Rejected(failures) => failures.iter().map(|f| f.message().to_string()).collect(),
            FlowFailure::SubmissionFailed(_) => vec!["Failed to complete booking".to_string()],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlowState {
    LoadingLocations,
    FormInput,
    Submitting(Booking),
    Success(Booking),
    Error(FlowFailure),
}

impl FlowState {
    pub fn name(&self) -> &'static str {
        match self {
            FlowState::LoadingLocations => "loading_locations",
            FlowState::FormInput => "form_input",
            FlowState::Submitting(_) => "submitting",
            FlowState::Success(_) => "success",
            FlowState::Error(_) => "error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FlowError {
    #[error("A booking is already being submitted")]
    Busy,

    #[error("Cannot {action} while {state}")]
    InvalidTransition {
        state: &'static str,
        action: &'static str,
    },

    #[error("Booking rejected: {} problem(s)", .0.len())]
    Rejected(Vec<ValidationFailure>),

    #[error(transparent)]
    Selection(#[from] SelectionError),
}

pub struct BookingFlow {
    state: FlowState,
    car: Option<Car>,
    locations: Vec<Delegation>,
    form: BookingForm,
}

impl BookingFlow {
    pub fn new(car: Option<Car>) -> Self {
        Self {
            state: FlowState::LoadingLocations,
            car,
            locations: Vec::new(),
            form: BookingForm::default(),
        }
    }

    pub fn state(&self) -> &FlowState {
        &self.state
    }

    pub fn form(&self) -> &BookingForm {
        &self.form
    }

    pub fn locations(&self) -> &[Delegation] {
        &self.locations
    }

    pub fn car(&self) -> Option<&Car> {
        self.car.as_ref()
    }

    fn invalid(&self, action: &'static str) -> FlowError {
        FlowError::InvalidTransition {
            state: self.state.name(),
            action,
        }
    }

    /// Location list arrived. An empty list is a valid, if unhelpful, result.
    pub fn locations_loaded(&mut self, locations: Vec<Delegation>) -> Result<(), FlowError> {
        if self.state != FlowState::LoadingLocations {
            return Err(self.invalid("load locations"));
        }
        if locations.is_empty() {
            warn!("Booking form opened with no selectable locations");
        }
        self.locations = locations;
        self.state = FlowState::FormInput;
        Ok(())
    }

    /// Apply one field edit. Editing after an error returns to `FormInput`.
    pub fn apply(&mut self, event: FormEvent) -> Result<(), FlowError> {
        match self.state {
            FlowState::FormInput | FlowState::Error(_) => {}
            FlowState::Submitting(_) => return Err(FlowError::Busy),
            _ => return Err(self.invalid("edit the form")),
        }

        match event {
            FormEvent::StartDateChanged(date) => self.form.start_date = date,
            FormEvent::EndDateChanged(date) => self.form.end_date = date,
            FormEvent::Location(event) => {
                self.form.selection = reduce(self.form.selection.clone(), event)?;
            }
        }
        self.state = FlowState::FormInput;
        Ok(())
    }

    pub fn dismiss_error(&mut self) -> Result<(), FlowError> {
        match self.state {
            FlowState::Error(_) => {
                self.state = FlowState::FormInput;
                Ok(())
            }
            _ => Err(self.invalid("dismiss an error")),
        }
    }

    /// Amount to pay for the current form values, recomputed on every call
    pub fn quote(&self) -> Result<PaymentTotal, QuoteError> {
        quote(
            self.form.start_date.as_deref(),
            self.form.end_date.as_deref(),
            self.car.as_ref().map(|c| c.price),
        )
    }

    fn find_location(&self, id: Option<&String>) -> Option<&Delegation> {
        id.and_then(|id| self.locations.iter().find(|d| &d.delegation_id == id))
    }

    /// Every problem with the current form, or the payment it describes.
    ///
    /// Pickup and return ids must name a loaded location.
    pub fn check(&self) -> Result<PaymentTotal, Vec<ValidationFailure>> {
        let form = &self.form;
        let selection = &form.selection;
        let validated = validate_booking_submission(
            form.start_date.as_deref(),
            form.end_date.as_deref(),
            self.car.as_ref(),
            selection,
        );

        let mut failures = validated.as_ref().err().cloned().unwrap_or_default();
        if selection.pickup.is_some() && self.find_location(selection.pickup.as_ref()).is_none() {
            failures.push(ValidationFailure::UnknownPickup);
        }
        if !selection.linked
            && selection.delivery.is_some()
            && self.find_location(selection.delivery.as_ref()).is_none()
        {
            failures.push(ValidationFailure::UnknownDelivery);
        }

        if failures.is_empty() {
            validated
        } else {
            Err(failures)
        }
    }

    /// Validate the form and build the booking record it describes
    fn prepare_booking(&self, user: &UserContext, operation: String) -> Result<Booking, Vec<ValidationFailure>> {
        let total = self.check()?;

        let form = &self.form;
        let interval = RentalInterval::from_fields(form.start_date.as_deref(), form.end_date.as_deref());
        let pickup = self.find_location(form.selection.pickup.as_ref());
        let delivery = self.find_location(form.selection.effective_delivery());

        match (interval, self.car.as_ref(), pickup, delivery) {
            (Ok(interval), Some(car), Some(pickup), Some(delivery)) => Ok(Booking {
                user_id: user.user_id.clone(),
                operation,
                car: car.clone(),
                status: None,
                start_date: interval.start,
                end_date: interval.end,
                pick_up_delegation: pickup.clone(),
                deliver_delegation: delivery.clone(),
                total_to_payment: total.total,
                status_payment: PaymentStatus::Paid,
                status_booking: BookingStatus::Created,
            }),
            // A passing check guarantees every piece above
            _ => Err(vec![ValidationFailure::InvalidTotal]),
        }
    }

    /// Validate the form and move to `Submitting`, returning the record to send.
    ///
    /// On validation failure the flow moves to `Error` and nothing is sent.
    pub fn begin_submit(&mut self, user: &UserContext, operation: String) -> Result<Booking, FlowError> {
        match self.state {
            FlowState::FormInput | FlowState::Error(_) => {}
            FlowState::Submitting(_) => return Err(FlowError::Busy),
            _ => return Err(self.invalid("submit")),
        }

        match self.prepare_booking(user, operation) {
            Ok(booking) => {
                self.state = FlowState::Submitting(booking.clone());
                Ok(booking)
            }
            Err(failures) => {
                info!("Booking rejected for {}: {:?}", user.user_id, failures);
                self.state = FlowState::Error(FlowFailure::Rejected(failures.clone()));
                Err(FlowError::Rejected(failures))
            }
        }
    }

    /// Record how the pending submission ended
    pub fn submission_resolved(&mut self, outcome: Result<(), &AppError>) -> Result<(), FlowError> {
        let pending = match &self.state {
            FlowState::Submitting(booking) => booking.clone(),
            _ => return Err(self.invalid("resolve a submission")),
        };

        self.state = match outcome {
            Ok(()) => {
                info!("Booking {} confirmed for {}", pending.operation, pending.user_id);
                FlowState::Success(pending)
            }
            Err(e) => {
                warn!("Booking {} failed: {}", pending.operation, e);
                FlowState::Error(FlowFailure::SubmissionFailed(e.to_string()))
            }
        };
        Ok(())
    }

    /// Validate, send the booking to `repo`, and settle the flow.
    pub async fn submit<R: UserRepository>(
        &mut self,
        user: &UserContext,
        operation: String,
        repo: &R,
    ) -> Result<Booking, AppError> {
        let booking = self.begin_submit(user, operation)?;
        match repo.save_booking(booking.clone()).await {
            Ok(()) => {
                self.submission_resolved(Ok(()))?;
                Ok(booking)
            }
            Err(e) => {
                self.submission_resolved(Err(&e))?;
                Err(e)
            }
        }
    }
}
