use crate::api::{ApiClient, ApiError, Booking, CarSummary, CreateBookingRequest};
use crate::availability::AvailabilityCheck;
use std::rc::Rc;

#[derive(Clone)]
pub struct BookingRepository {
    client: Rc<ApiClient>,
}

impl Default for BookingRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl BookingRepository {
    pub fn new() -> Self {
        Self {
            client: Rc::new(ApiClient::new()),
        }
    }

    pub fn new_with_client(client: Rc<ApiClient>) -> Self {
        Self { client }
    }

    pub async fn car(&self, car_id: i64) -> Result<CarSummary, ApiError> {
        self.client.get_public_car(car_id).await
    }

    pub async fn check(&self, check: &AvailabilityCheck) -> Result<bool, ApiError> {
        self.client
            .check_booking_availability(check.car_id, check.start_date, check.end_date)
            .await
    }

    pub async fn create(&self, request: &CreateBookingRequest) -> Result<Booking, ApiError> {
        self.client.create_booking(request).await
    }
}
