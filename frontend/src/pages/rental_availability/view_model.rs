use super::repository::{AvailabilityChange, AvailabilityFlowError, RentalAvailabilityRepository};
use crate::api::{ApiClient, ApiError, CarSummary, ListingType};
use crate::availability::{parse_period_input, AvailabilityPeriod};
use crate::router::paths::AppRoute;
use crate::utils::navigation::{use_navigator, use_path_navigator, Navigator, PathNavigator};
use crate::utils::time::today_in_app_tz;
use leptos::*;
use std::rc::Rc;

pub const NOT_LISTED_FOR_RENT: &str = "This car is not listed for rent";

/// Tags a load or change request. Only the most recently issued ticket may
/// write the displayed periods.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestTicket {
    pub car_id: i64,
    pub generation: u64,
}

pub type LoadOutcome = (RequestTicket, Result<Vec<AvailabilityPeriod>, ApiError>);

pub type ChangeOutcome = (
    RequestTicket,
    AvailabilityChange,
    Result<Vec<AvailabilityPeriod>, AvailabilityFlowError>,
);

#[derive(Clone, Copy)]
pub struct RentalAvailabilityViewModel {
    pub car_id: RwSignal<Option<i64>>,
    pub periods: RwSignal<Vec<AvailabilityPeriod>>,
    pub start_input: RwSignal<String>,
    pub end_input: RwSignal<String>,
    pub form_error: RwSignal<Option<String>>,
    pub error: RwSignal<Option<ApiError>>,
    pub success: RwSignal<Option<String>>,
    pub notice: RwSignal<Option<String>>,
    pub cars_resource: Resource<(), Result<Vec<CarSummary>, ApiError>>,
    pub load_action: Action<RequestTicket, LoadOutcome>,
    pub change_action: Action<(RequestTicket, AvailabilityChange), ChangeOutcome>,
    generation: StoredValue<u64>,
    navigator: StoredValue<Navigator>,
    path_navigator: StoredValue<PathNavigator>,
}

impl RentalAvailabilityViewModel {
    fn issue(&self, car_id: i64) -> RequestTicket {
        let generation = self.generation.get_value() + 1;
        self.generation.set_value(generation);
        RequestTicket {
            car_id,
            generation,
        }
    }

    pub fn is_latest(&self, ticket: RequestTicket) -> bool {
        self.generation.get_value() == ticket.generation
            && self.car_id.get_untracked() == Some(ticket.car_id)
    }

    /// Selects a car and records it in the URL so a reload keeps it.
    pub fn pick_car(&self, car_id: i64) {
        if self.car_id.get_untracked() == Some(car_id) {
            return;
        }
        self.notice.set(None);
        self.car_id.set(Some(car_id));
        let path = AppRoute::rental_availability_for(car_id);
        self.path_navigator.with_value(|go| go(path.as_str()));
    }

    /// Checks the selected car against the seller's rental cars. An unknown
    /// car is dropped and the seller is sent back to the dashboard.
    pub fn verify_selection(&self, cars: &[CarSummary]) -> bool {
        let Some(car_id) = self.car_id.get_untracked() else {
            return false;
        };
        if listed_for_rent(cars, car_id) {
            return true;
        }
        log::warn!("Car {} is not one of the seller's rental cars", car_id);
        self.car_id.set(None);
        self.periods.set(Vec::new());
        self.notice.set(Some(NOT_LISTED_FOR_RENT.to_string()));
        self.navigator.with_value(|navigate| navigate(AppRoute::Seller));
        false
    }

    pub fn load(&self, car_id: i64) {
        let ticket = self.issue(car_id);
        self.periods.set(Vec::new());
        self.error.set(None);
        self.success.set(None);
        self.load_action.dispatch(ticket);
    }

    /// Applies a finished load unless a newer request superseded it.
    pub fn apply_load(&self, outcome: LoadOutcome) -> bool {
        let (ticket, result) = outcome;
        if !self.is_latest(ticket) {
            log::debug!("Dropping stale availability for car {}", ticket.car_id);
            return false;
        }
        match result {
            Ok(fetched) => self.periods.set(fetched),
            Err(err) => self.error.set(Some(err)),
        }
        true
    }

    /// Applies a finished add or remove unless a newer request superseded it.
    pub fn apply_change(&self, outcome: ChangeOutcome) -> bool {
        let (ticket, change, result) = outcome;
        if !self.is_latest(ticket) {
            log::debug!("Dropping stale availability change for car {}", ticket.car_id);
            return false;
        }
        match result {
            Ok(updated) => {
                self.periods.set(updated);
                self.error.set(None);
                self.success.set(Some(change.success_message().to_string()));
                if matches!(change, AvailabilityChange::Add(_)) {
                    self.start_input.set(String::new());
                    self.end_input.set(String::new());
                }
            }
            Err(AvailabilityFlowError::Invalid(err)) => {
                self.success.set(None);
                self.form_error.set(Some(err.to_string()));
            }
            Err(AvailabilityFlowError::Request(err)) => {
                self.success.set(None);
                self.error.set(Some(err));
            }
        }
        true
    }

    /// Validates the date inputs and dispatches an add. Returns `false` when
    /// the inputs were rejected locally.
    pub fn submit_add(&self) -> bool {
        let Some(car_id) = self.car_id.get_untracked() else {
            return false;
        };
        match parse_period_input(&self.start_input.get_untracked(), &self.end_input.get_untracked())
        {
            Ok(period) => {
                self.form_error.set(None);
                let ticket = self.issue(car_id);
                self.change_action
                    .dispatch((ticket, AvailabilityChange::Add(period)));
                true
            }
            Err(err) => {
                self.form_error.set(Some(err.to_string()));
                false
            }
        }
    }

    pub fn submit_remove(&self, period: AvailabilityPeriod) {
        if let Some(car_id) = self.car_id.get_untracked() {
            let ticket = self.issue(car_id);
            self.change_action
                .dispatch((ticket, AvailabilityChange::Remove(period)));
        }
    }

    pub fn is_busy(&self) -> bool {
        self.load_action.pending().get() || self.change_action.pending().get()
    }
}

fn listed_for_rent(cars: &[CarSummary], car_id: i64) -> bool {
    cars.iter()
        .any(|car| car.id == car_id && car.listing_type == ListingType::Rent)
}

pub fn use_rental_availability_view_model(initial_car: Option<i64>) -> RentalAvailabilityViewModel {
    let api = use_context::<ApiClient>().unwrap_or_else(ApiClient::new);
    let repo = RentalAvailabilityRepository::new_with_client(Rc::new(api));

    let car_id = create_rw_signal(initial_car);
    let periods = create_rw_signal(Vec::<AvailabilityPeriod>::new());

    let repo_cars = repo.clone();
    let cars_resource = create_resource(
        || (),
        move |_| {
            let repo = repo_cars.clone();
            async move { repo.rental_cars().await }
        },
    );

    let repo_load = repo.clone();
    let load_action = create_action(move |ticket: &RequestTicket| {
        let repo = repo_load.clone();
        let ticket = *ticket;
        async move {
            let result = repo.load_periods(ticket.car_id, today_in_app_tz()).await;
            (ticket, result)
        }
    });

    let repo_change = repo.clone();
    let change_action = create_action(move |input: &(RequestTicket, AvailabilityChange)| {
        let repo = repo_change.clone();
        let (ticket, change) = *input;
        let current = periods.get_untracked();
        async move {
            let result = repo
                .apply_change(ticket.car_id, change, &current, today_in_app_tz())
                .await;
            (ticket, change, result)
        }
    });

    let vm = RentalAvailabilityViewModel {
        car_id,
        periods,
        start_input: create_rw_signal(String::new()),
        end_input: create_rw_signal(String::new()),
        form_error: create_rw_signal(None),
        error: create_rw_signal(None),
        success: create_rw_signal(None),
        notice: create_rw_signal(None),
        cars_resource,
        load_action,
        change_action,
        generation: store_value(0),
        navigator: store_value(use_navigator()),
        path_navigator: store_value(use_path_navigator(false)),
    };

    // Periods load once the selection is known to be one of the seller's
    // rental cars.
    create_effect(move |_| {
        let Some(car) = vm.car_id.get() else {
            return;
        };
        if let Some(Ok(cars)) = vm.cars_resource.get() {
            if vm.verify_selection(&cars) {
                vm.load(car);
            }
        }
    });

    create_effect(move |_| {
        if let Some(outcome) = vm.load_action.value().get() {
            vm.apply_load(outcome);
        }
    });

    create_effect(move |_| {
        if let Some(outcome) = vm.change_action.value().get() {
            vm.apply_change(outcome);
        }
    });

    vm
}
