use super::repository::BookingRepository;
use crate::api::{ApiClient, ApiError, Booking, CarSummary, CreateBookingRequest, PaymentMethod, User};
use crate::availability::{AvailabilityCheck, BookingForm, BookingRefusal};
use leptos::*;
use std::rc::Rc;

#[derive(Clone, Copy)]
pub struct BookingViewModel {
    pub form: RwSignal<BookingForm>,
    pub start_input: RwSignal<String>,
    pub end_input: RwSignal<String>,
    pub refusal: RwSignal<Option<BookingRefusal>>,
    pub booking_action: Action<CreateBookingRequest, Result<Booking, ApiError>>,
    repo: StoredValue<BookingRepository>,
}

impl BookingViewModel {
    /// Re-reads both date inputs. A complete range triggers a fresh
    /// availability check; results for older ranges are ignored.
    pub fn dates_changed(&self) {
        let start = self.start_input.get_untracked();
        let end = self.end_input.get_untracked();
        self.refusal.set(None);
        let check = self
            .form
            .try_update(|form| form.set_dates(&start, &end))
            .flatten();
        if let Some(check) = check {
            let repo = self.repo.get_value();
            let form = self.form;
            spawn_local(async move {
                run_availability_check(&repo, form, check).await;
            });
        }
    }

    pub fn set_payment_method(&self, method: PaymentMethod) {
        self.form.update(|form| form.payment_method = method);
    }

    /// Dispatches the booking, or records why it was refused.
    pub fn submit(&self, user: Option<&User>) -> Result<(), BookingRefusal> {
        let request = self.form.with_untracked(|form| form.booking_request(user));
        match request {
            Ok(request) => {
                self.refusal.set(None);
                self.booking_action.dispatch(request);
                Ok(())
            }
            Err(refusal) => {
                log::debug!("Booking refused: {}", refusal);
                self.refusal.set(Some(refusal.clone()));
                Err(refusal)
            }
        }
    }
}

/// Issues `check` and applies the answer if it is still the latest one.
pub async fn run_availability_check(
    repo: &BookingRepository,
    form: RwSignal<BookingForm>,
    check: AvailabilityCheck,
) -> bool {
    let result = repo.check(&check).await;
    form.try_update(|form| form.apply_check(check.generation, result))
        .unwrap_or(false)
}

pub fn use_booking_view_model(car: &CarSummary) -> BookingViewModel {
    let api = use_context::<ApiClient>().unwrap_or_else(ApiClient::new);
    let repo = BookingRepository::new_with_client(Rc::new(api));

    let form = create_rw_signal(BookingForm::new(car.id, car.seller_id, car.price));
    let start_input = create_rw_signal(String::new());
    let end_input = create_rw_signal(String::new());
    let refusal = create_rw_signal(None::<BookingRefusal>);

    let repo_create = repo.clone();
    let booking_action = create_action(move |request: &CreateBookingRequest| {
        let repo = repo_create.clone();
        let request = request.clone();
        async move { repo.create(&request).await }
    });

    BookingViewModel {
        form,
        start_input,
        end_input,
        refusal,
        booking_action,
        repo: store_value(repo),
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::api::{ListingType, Role, UserStatus};
    use crate::test_support::ssr::with_runtime;
    use httpmock::prelude::*;
    use serde_json::json;

    fn car() -> CarSummary {
        CarSummary {
            id: 3,
            seller_id: 50,
            brand: "Seat".into(),
            model: "Ibiza".into(),
            price: 100.0,
            listing_type: ListingType::Rent,
        }
    }

    fn user(id: i64) -> User {
        User {
            id,
            email: "user@example.com".into(),
            name: String::new(),
            surname: String::new(),
            roles: vec![Role::Client],
            status: UserStatus::Active,
            seller_profile: None,
        }
    }

    #[tokio::test]
    async fn late_answer_for_an_old_range_is_ignored() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(POST)
                .path("/api/public/bookings/check-availability")
                .json_body(json!({"carId": 3, "startDate": "2030-06-01", "endDate": "2030-06-03"}));
            then.status(200).json_body(json!({"isAvailable": true}));
        });
        server.mock(|when, then| {
            when.method(POST)
                .path("/api/public/bookings/check-availability")
                .json_body(json!({"carId": 3, "startDate": "2030-06-01", "endDate": "2030-06-10"}));
            then.status(200).json_body(json!({"isAvailable": false}));
        });

        let runtime = create_runtime();
        let repo = BookingRepository::new_with_client(Rc::new(ApiClient::new_with_base_url(
            server.url("/api"),
        )));
        let form = create_rw_signal(BookingForm::new(3, 50, 100.0));
        let first = form
            .try_update(|f| f.set_dates("2030-06-01", "2030-06-03"))
            .flatten()
            .unwrap();
        let second = form
            .try_update(|f| f.set_dates("2030-06-01", "2030-06-10"))
            .flatten()
            .unwrap();

        assert!(run_availability_check(&repo, form, second).await);
        assert!(!run_availability_check(&repo, form, first).await);

        let state = form.get_untracked();
        assert_eq!(state.is_available(), Some(false));
        assert_eq!(state.quote().map(|q| q.days), Some(10));
        assert!(!state.can_book());
        runtime.dispose();
    }

    #[tokio::test]
    async fn failed_check_resolves_to_unavailable() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(POST).path("/api/public/bookings/check-availability");
            then.status(500).json_body(json!({"message": "boom"}));
        });
        let runtime = create_runtime();
        let repo = BookingRepository::new_with_client(Rc::new(ApiClient::new_with_base_url(
            server.url("/api"),
        )));
        let form = create_rw_signal(BookingForm::new(3, 50, 100.0));
        let check = form
            .try_update(|f| f.set_dates("2030-06-01", "2030-06-03"))
            .flatten()
            .unwrap();
        assert!(run_availability_check(&repo, form, check).await);
        assert_eq!(form.get_untracked().is_available(), Some(false));
        runtime.dispose();
    }

    #[test]
    fn submit_refuses_anonymous_and_own_car() {
        with_runtime(|| {
            provide_context(ApiClient::new_with_base_url("http://127.0.0.1:9/api"));
            let vm = use_booking_view_model(&car());
            assert_eq!(vm.submit(None), Err(BookingRefusal::LoginRequired));
            assert_eq!(vm.refusal.get_untracked(), Some(BookingRefusal::LoginRequired));
            assert_eq!(vm.submit(Some(&user(50))), Err(BookingRefusal::OwnCar));
            assert_eq!(vm.submit(Some(&user(8))), Err(BookingRefusal::MissingDates));
        });
    }

    #[test]
    fn empty_dates_issue_no_check() {
        with_runtime(|| {
            provide_context(ApiClient::new_with_base_url("http://127.0.0.1:9/api"));
            let vm = use_booking_view_model(&car());
            vm.start_input.set("2030-06-01".into());
            vm.dates_changed();
            let form = vm.form.get_untracked();
            assert_eq!(form.is_available(), None);
            assert!(!form.is_checking());
            assert!(form.input_error().is_none());

            vm.set_payment_method(PaymentMethod::Card);
            assert_eq!(vm.form.get_untracked().payment_method, PaymentMethod::Card);
        });
    }
}
