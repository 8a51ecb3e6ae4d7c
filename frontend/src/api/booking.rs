use chrono::NaiveDate;

use super::{
    client::ApiClient,
    types::{
        ApiError, AvailabilityCheckRequest, AvailabilityCheckResponse, Booking, CarSummary,
        CreateBookingRequest,
    },
};

impl ApiClient {
    /// Pass-through to the server; callers re-issue on every date change.
    pub async fn check_booking_availability(
        &self,
        car_id: i64,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<bool, ApiError> {
        let request = AvailabilityCheckRequest {
            car_id,
            start_date,
            end_date,
        };
        let response: AvailabilityCheckResponse = self
            .post_json("/public/bookings/check-availability", &request)
            .await?;
        Ok(response.is_available)
    }

    pub async fn create_booking(&self, request: &CreateBookingRequest) -> Result<Booking, ApiError> {
        self.post_json("/client/bookings", request).await
    }

    pub async fn get_public_car(&self, car_id: i64) -> Result<CarSummary, ApiError> {
        self.get_json(&format!("/public/cars/{}", car_id)).await
    }
}
