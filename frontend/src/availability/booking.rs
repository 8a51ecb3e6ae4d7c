use chrono::{Months, NaiveDate};
use thiserror::Error;

use super::period::{parse_date_input, PeriodError};
use super::pricing::{compute_price, PriceQuote};
use crate::api::{ApiError, CreateBookingRequest, PaymentMethod, User};

/// A pending availability request, tagged with the generation it belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AvailabilityCheck {
    pub generation: u64,
    pub car_id: i64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BookingRefusal {
    #[error("Please login to make a booking")]
    LoginRequired,
    #[error("You cannot book your own car")]
    OwnCar,
    #[error("Please select pickup and return dates")]
    MissingDates,
    #[error("Selected dates are not available")]
    Unavailable,
    #[error("Availability is still being checked")]
    CheckPending,
}

/// Client-side state of the booking widget for one car.
///
/// `is_available` is tri-state: `None` while no complete date range is
/// selected (or while the check for it is in flight), `Some(bool)` once the
/// server has answered for the latest selection. Responses for earlier
/// selections are discarded by generation.
#[derive(Debug, Clone, PartialEq)]
pub struct BookingForm {
    pub car_id: i64,
    pub seller_id: i64,
    pub price_per_day: f64,
    pub payment_method: PaymentMethod,
    selection: Option<(NaiveDate, NaiveDate)>,
    quote: Option<PriceQuote>,
    is_available: Option<bool>,
    checking: bool,
    input_error: Option<PeriodError>,
    generation: u64,
}

impl BookingForm {
    pub fn new(car_id: i64, seller_id: i64, price_per_day: f64) -> Self {
        Self {
            car_id,
            seller_id,
            price_per_day,
            payment_method: PaymentMethod::default(),
            selection: None,
            quote: None,
            is_available: None,
            checking: false,
            input_error: None,
            generation: 0,
        }
    }

    pub fn quote(&self) -> Option<PriceQuote> {
        self.quote
    }

    pub fn is_available(&self) -> Option<bool> {
        self.is_available
    }

    pub fn is_checking(&self) -> bool {
        self.checking
    }

    pub fn input_error(&self) -> Option<&PeriodError> {
        self.input_error.as_ref()
    }

    pub fn selection(&self) -> Option<(NaiveDate, NaiveDate)> {
        self.selection
    }

    /// Applies new date inputs. Returns the availability request to issue,
    /// or `None` when the selection is incomplete or invalid. Every call
    /// supersedes whatever check was in flight.
    pub fn set_dates(&mut self, start: &str, end: &str) -> Option<AvailabilityCheck> {
        self.generation = self.generation.wrapping_add(1);
        self.selection = None;
        self.quote = None;
        self.is_available = None;
        self.checking = false;
        self.input_error = None;

        let parsed = parse_date_input(start).and_then(|s| Ok((s, parse_date_input(end)?)));
        let (start_date, end_date) = match parsed {
            Ok((Some(s), Some(e))) => (s, e),
            Ok(_) => return None,
            Err(err) => {
                self.input_error = Some(err);
                return None;
            }
        };
        if start_date > end_date {
            self.input_error = Some(PeriodError::InvertedRange);
            return None;
        }

        self.selection = Some((start_date, end_date));
        self.quote = Some(compute_price(self.price_per_day, start_date, end_date));
        self.checking = true;
        Some(AvailabilityCheck {
            generation: self.generation,
            car_id: self.car_id,
            start_date,
            end_date,
        })
    }

    /// Applies a check result. Returns `false` if the result is stale.
    pub fn apply_check(&mut self, generation: u64, result: Result<bool, ApiError>) -> bool {
        if generation != self.generation || !self.checking {
            log::debug!(
                "Discarding stale availability result (generation {}, latest {})",
                generation,
                self.generation
            );
            return false;
        }
        self.checking = false;
        self.is_available = Some(match result {
            Ok(available) => available,
            Err(err) => {
                log::warn!("Availability check failed: {}", err);
                false
            }
        });
        true
    }

    pub fn can_book(&self) -> bool {
        self.selection.is_some() && !self.checking && self.is_available == Some(true)
    }

    pub fn booking_request(&self, user: Option<&User>) -> Result<CreateBookingRequest, BookingRefusal> {
        let user = user.ok_or(BookingRefusal::LoginRequired)?;
        if user.id == self.seller_id {
            return Err(BookingRefusal::OwnCar);
        }
        let (start_date, end_date) = self.selection.ok_or(BookingRefusal::MissingDates)?;
        if self.checking {
            return Err(BookingRefusal::CheckPending);
        }
        if self.is_available != Some(true) {
            return Err(BookingRefusal::Unavailable);
        }
        Ok(CreateBookingRequest {
            car_id: self.car_id,
            start_date,
            end_date,
            payment_method: self.payment_method,
        })
    }
}

/// Pickup dates may be chosen from today up to six months ahead.
pub fn selectable_range(today: NaiveDate) -> (NaiveDate, NaiveDate) {
    let max = today.checked_add_months(Months::new(6)).unwrap_or(today);
    (today, max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{Role, UserStatus};

    fn form() -> BookingForm {
        BookingForm::new(11, 99, 100.0)
    }

    fn client(id: i64) -> User {
        User {
            id,
            email: "client@example.com".into(),
            name: "Cleo".into(),
            surname: "Client".into(),
            roles: vec![Role::Client],
            status: UserStatus::Active,
            seller_profile: None,
        }
    }

    #[test]
    fn empty_dates_keep_availability_unknown_without_a_check() {
        let mut form = form();
        assert!(form.set_dates("", "").is_none());
        assert!(form.set_dates("2024-06-01", "").is_none());
        assert!(form.set_dates("", "2024-06-03").is_none());
        assert_eq!(form.is_available(), None);
        assert!(form.input_error().is_none());
        assert!(form.quote().is_none());
        assert!(!form.can_book());
    }

    #[test]
    fn complete_selection_quotes_price_and_requests_check() {
        let mut form = form();
        let check = form.set_dates("2024-06-01", "2024-06-03").unwrap();
        assert_eq!(check.car_id, 11);
        assert_eq!(form.quote(), Some(PriceQuote { days: 3, total: 300.0 }));
        assert!(form.is_checking());
        assert_eq!(form.is_available(), None);
        assert!(!form.can_book());

        assert!(form.apply_check(check.generation, Ok(true)));
        assert_eq!(form.is_available(), Some(true));
        assert!(form.can_book());
    }

    #[test]
    fn stale_results_are_discarded() {
        let mut form = form();
        let first = form.set_dates("2024-06-01", "2024-06-03").unwrap();
        let second = form.set_dates("2024-06-01", "2024-06-05").unwrap();

        assert!(form.apply_check(second.generation, Ok(true)));
        assert!(!form.apply_check(first.generation, Ok(false)));
        assert_eq!(form.is_available(), Some(true));
        assert_eq!(form.quote().unwrap().days, 5);
    }

    #[test]
    fn clearing_a_date_invalidates_in_flight_check() {
        let mut form = form();
        let check = form.set_dates("2024-06-01", "2024-06-03").unwrap();
        assert!(form.set_dates("2024-06-01", "").is_none());
        assert!(!form.apply_check(check.generation, Ok(true)));
        assert_eq!(form.is_available(), None);
    }

    #[test]
    fn failed_check_marks_dates_unavailable() {
        let mut form = form();
        let check = form.set_dates("2024-06-01", "2024-06-03").unwrap();
        assert!(form.apply_check(check.generation, Err(ApiError::request_failed("offline"))));
        assert_eq!(form.is_available(), Some(false));
        assert!(!form.can_book());
    }

    #[test]
    fn malformed_or_inverted_dates_are_inline_errors() {
        let mut form = form();
        assert!(form.set_dates("2024-13-01", "2024-06-03").is_none());
        assert_eq!(form.input_error(), Some(&PeriodError::InvalidDate));
        assert!(form.set_dates("2024-06-05", "2024-06-03").is_none());
        assert_eq!(form.input_error(), Some(&PeriodError::InvertedRange));
        assert_eq!(form.is_available(), None);
    }

    #[test]
    fn booking_request_enforces_submission_rules() {
        let mut form = form();
        assert_eq!(form.booking_request(None).unwrap_err(), BookingRefusal::LoginRequired);
        assert_eq!(
            form.booking_request(Some(&client(99))).unwrap_err(),
            BookingRefusal::OwnCar
        );
        assert_eq!(
            form.booking_request(Some(&client(5))).unwrap_err(),
            BookingRefusal::MissingDates
        );

        let check = form.set_dates("2024-06-01", "2024-06-03").unwrap();
        assert_eq!(
            form.booking_request(Some(&client(5))).unwrap_err(),
            BookingRefusal::CheckPending
        );
        form.apply_check(check.generation, Ok(false));
        assert_eq!(
            form.booking_request(Some(&client(5))).unwrap_err(),
            BookingRefusal::Unavailable
        );

        let check = form.set_dates("2024-06-01", "2024-06-03").unwrap();
        form.apply_check(check.generation, Ok(true));
        let request = form.booking_request(Some(&client(5))).unwrap();
        assert_eq!(request.car_id, 11);
        assert_eq!(request.payment_method, PaymentMethod::Cash);
    }

    #[test]
    fn selectable_range_spans_six_months() {
        let today = NaiveDate::from_ymd_opt(2024, 8, 31).unwrap();
        let (min, max) = selectable_range(today);
        assert_eq!(min, today);
        assert_eq!(max, NaiveDate::from_ymd_opt(2025, 2, 28).unwrap());
    }
}
